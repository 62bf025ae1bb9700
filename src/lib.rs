pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;

pub use application::inspect::run;
pub use config::Config;
pub use errors::AppError;
pub use infrastructure::goedgepickt::GoedGepicktClient;
