use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{watcher, DebouncedEvent, RecursiveMode, Watcher};
use once_cell::sync::OnceCell;
use thiserror::Error;

use common::*;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parsing(#[from] ron::de::Error),

    #[error("Failed to watch config file: {0}")]
    Notify(#[from] notify::Error),

    #[error("Path is not a file")]
    NotAFile,

    #[error("Config has already been initialized")]
    AlreadyInitialized,
}

type ConfigResult<T> = std::result::Result<T, ConfigError>;

pub enum ConfigType<'a> {
    String(&'a str),
    File(&'a Path),
    /// Reloaded when modified on disk
    WatchedFile(&'a Path),
}

/// Defaults are used until [init] is called
static CONFIG: OnceCell<ArcSwap<Config>> = OnceCell::new();

/// Can only succeed once, and must be called before the first [get] to take effect
pub fn init(cfg: ConfigType) -> ConfigResult<()> {
    // parse config and fail early
    let config = cfg.load()?;

    CONFIG
        .set(ArcSwap::from_pointee(config))
        .map_err(|_| ConfigError::AlreadyInitialized)?;

    if let ConfigType::WatchedFile(path) = cfg {
        watch(path.to_owned())?;
    }

    Ok(())
}

/// Current config snapshot. A reload does not affect snapshots already taken
pub fn get() -> Arc<Config> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(Config::default()))
        .load_full()
}

fn watch(path: PathBuf) -> ConfigResult<()> {
    let watch_dir = path
        .parent()
        .map(Path::to_owned)
        .ok_or(ConfigError::NotAFile)?;
    let watch_file = path
        .file_name()
        .map(|s| s.to_owned())
        .ok_or(ConfigError::NotAFile)?;

    let (tx, rx) = channel();
    let mut watcher = watcher(tx, Duration::from_secs(1))?;
    watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

    thread::Builder::new()
        .name("cfg-watcher".to_owned())
        .spawn(move || {
            let _watcher = watcher; // keep alive
            let is_config = |p: &PathBuf| p.file_name().map(|f| f == watch_file).unwrap_or(false);

            loop {
                let reload = match rx.recv() {
                    Ok(e) => match e {
                        DebouncedEvent::Write(ref p) if is_config(p) => true,
                        DebouncedEvent::Remove(ref p) if is_config(p) => {
                            warn!("config was deleted");
                            true
                        }
                        DebouncedEvent::Rename(ref a, ref b) if is_config(a) || is_config(b) => {
                            warn!("config was renamed");
                            true
                        }
                        _ => false,
                    },
                    Err(_) => {
                        debug!("config watcher disconnected");
                        break;
                    }
                };

                if reload {
                    info!("config was modified, reloading"; "path" => %path.display());
                    reload_from(&path);
                }
            }
        })?;

    Ok(())
}

fn reload_from(path: &Path) {
    let cfg = match CONFIG.get() {
        Some(cfg) => cfg,
        None => {
            warn!("config reloaded before initialization");
            return;
        }
    };

    match ConfigType::File(path).load() {
        Ok(config) => {
            let new = Arc::new(config);
            let new_ptr = Arc::as_ptr(&new);

            let old = cfg.swap(new);
            let old_ptr = Arc::as_ptr(&old);

            debug!("swapped config instance"; "new" => ?new_ptr, "old" => ?old_ptr);
        }
        Err(e) => {
            warn!("failed to reload config, keeping the old one"; "error" => %e);
        }
    }
}

impl<'a> ConfigType<'a> {
    fn load(&self) -> ConfigResult<Config> {
        let bytes = match self {
            ConfigType::String(s) => Cow::Borrowed(*s),
            ConfigType::File(path) | ConfigType::WatchedFile(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotAFile);
                }

                let contents = std::fs::read_to_string(*path)?;
                Cow::Owned(contents)
            }
        };

        Ok(ron::de::from_str(&bytes)?)
    }
}
