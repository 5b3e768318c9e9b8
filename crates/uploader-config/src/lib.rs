//! Configuration and utilities shared by the Repoship binaries.

mod credentials;
mod error;
mod logging;
mod paths;

pub use credentials::CredentialStore;
pub use error::{ConfigError, ConfigResult};
pub use logging::init_logging;
pub use paths::Paths;
