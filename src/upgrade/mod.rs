//! Upgrade planning and execution layer
//!
//! # Modules
//!
//! - [`planner`]: Builds the ordered list of dnf invocations
//! - [`runner`]: Runs dnf interactively and reports its exit code
//! - [`pipeline`]: Ties resolution, planning and execution together

pub mod pipeline;
pub mod planner;
pub mod runner;
