pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, ConfigOrigin, CONFIG_FILE_NAME};
pub use types::{Config, LoggingConfig};
