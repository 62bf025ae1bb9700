pub mod errors;
pub mod lenient;
pub mod order;
pub mod ports;
pub mod stock;
