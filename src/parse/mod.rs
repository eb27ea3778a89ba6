//! Text parsing for raw snapshot values

pub mod timestamp;
pub mod wait_time;

pub use timestamp::parse_timestamp;
pub use wait_time::{parse, parse_wait_time};
