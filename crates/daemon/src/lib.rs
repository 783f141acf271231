// DomainHub Daemon - configuration, logging and wiring
// (the binary in main.rs only sequences these)

pub mod config;
pub mod logging;
pub mod wiring;

pub use config::Settings;
pub use wiring::{build_services, build_state};
