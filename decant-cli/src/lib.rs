// decant-cli/src/lib.rs
//
// Library portion of the decant CLI application.
// Contains argument definitions, command logic, and output helpers.

pub mod cli;
pub mod commands;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::check::run_check;
pub use commands::convert::run_convert;
