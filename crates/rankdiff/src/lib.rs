// Library root: exposes configuration, report writers and orchestration to the
// binary and the integration tests.

pub mod config;
pub mod output;
pub mod run;
