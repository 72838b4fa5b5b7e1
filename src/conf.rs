//! Settings module.

pub use grappelli_conf::*;
