pub mod goedgepickt;
pub mod order_file;
