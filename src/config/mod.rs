//! C4: Config Loader (spec.md §4.4).

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{ignore_file_path, load_config};
pub use types::{Config, GlobalConfig, RuleSection};
pub use validation::{ConfigError, ConfigParseError};
