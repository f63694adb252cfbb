//! TaskMaster application bootstrap and shutdown.
//!
//! [`bootstrap`] brings config, preferences and task data into memory and
//! never aborts; [`App::shutdown`] is its best-effort inverse.

pub mod bootstrap;
pub mod config;
pub mod logging;
pub mod paths;

pub use bootstrap::{bootstrap, App, BootstrapOptions, DataOrigin, SeedOutcome, VERSION};
pub use config::init_config;
pub use logging::init_logging;
