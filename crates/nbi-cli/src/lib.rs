//! CLI library components for the bridge inventory validator.

pub mod logging;
pub mod output;
