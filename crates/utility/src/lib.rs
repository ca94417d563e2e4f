pub mod geo;
pub mod serde;
pub mod time;
