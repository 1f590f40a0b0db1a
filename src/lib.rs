pub mod monitor;
pub mod network;
pub mod reading;
pub mod sensor;
pub mod transport;
