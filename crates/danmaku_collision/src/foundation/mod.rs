//! Foundation utilities shared across the engine
//!
//! Math type aliases and logging bootstrap. Kept deliberately small;
//! everything gameplay-specific lives in the collision modules.

pub mod logging;
pub mod math;
