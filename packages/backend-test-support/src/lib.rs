//! Test support utilities shared by the authgate test binaries: logging
//! initialization, unique test data, and Problem Details assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
