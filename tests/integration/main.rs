//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  No server or page is required.

mod mocks;
mod refresh_workflow_tests;
mod view_session_tests;
