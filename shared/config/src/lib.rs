pub use crate::config::*;
pub use load::{get, init, ConfigError, ConfigType};

mod config;
mod load;
