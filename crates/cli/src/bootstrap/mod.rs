mod config;
mod logging;
mod router;

pub use config::load_config;
pub use logging::init_logging;
pub use router::RouterServices;
