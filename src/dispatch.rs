//! Dispatch module.
//!
//! The request lifecycle: route resolution, interceptors, binding,
//! handler invocation, outcome rendering, and exception resolution.

pub use grappelli_dispatch::*;
