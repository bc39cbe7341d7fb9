use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use common::*;
use config::ConfigType;
use inspector::MassField;
use structopt::StructOpt;
use unit::{Mass, MassUnit};

/// Converts a mass between units
#[derive(Debug, StructOpt)]
#[structopt(rename_all = "kebab-case")]
struct Args {
    /// Mass to convert, e.g. "2 lb". Kilograms if no unit is given
    mass: String,

    /// Unit code to print in, every unit if not specified
    #[structopt(long)]
    to: Option<MassUnit>,

    /// Inspector config file, used for output precision
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
}

fn log_time(out: &mut dyn Write) -> std::io::Result<()> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    write!(out, "{:.3}", secs)
}

/// One line per unit, in table order if no unit is given
fn convert(mass: Mass, to: Option<MassUnit>, precision: Option<usize>) -> Vec<String> {
    let units = match to {
        Some(unit) => vec![unit],
        None => MassUnit::ALL.to_vec(),
    };

    units
        .into_iter()
        .map(|unit| MassField::with_unit(mass, unit).format_text(precision))
        .collect()
}

fn do_main() -> BoxedResult<()> {
    let args = Args::from_args();

    if let Some(path) = args.config.as_deref() {
        info!("loading config"; "path" => %path.display());
        config::init(ConfigType::File(path))?;
    }

    let mass: Mass = args.mass.parse()?;
    debug!("parsed mass"; "input" => args.mass.as_str(), "mass" => mass);

    let precision = config::get().inspector.precision;
    for line in convert(mass, args.to, precision) {
        println!("{}", line);
    }

    Ok(())
}

fn main() {
    let logger = match logging::LoggerBuilder::with_env().and_then(|builder| builder.init(log_time))
    {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("failed to initialize logging: {}", e);
            std::process::exit(2);
        }
    };
    debug!("initialized logging"; "level" => ?logger.level());

    let exit = match do_main() {
        Err(e) => {
            error!("error: {}", e);

            let mut src = e.source();
            while let Some(source) = src {
                error!(" caused by: {}", source);
                src = source.source();
            }

            1
        }
        Ok(()) => 0,
    };

    // flush logs before exiting
    drop(logger);
    std::process::exit(exit);
}
