//! Test helpers for end-to-end upgrade runs

mod fakes;

pub use fakes::*;
