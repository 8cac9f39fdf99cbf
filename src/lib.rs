pub mod config;
pub mod logging;
pub mod upgrade;
pub mod version;
