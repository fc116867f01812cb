// decant-cli/src/main.rs
//
// Binary entry point: parses arguments, initializes logging, dispatches to
// the selected mode, and maps the outcome to a process exit code.
//
// Exit codes: 0 on full success, 1 when any job failed or a fatal setup
// error occurred (missing directory, no input files, missing dependency in
// --check mode), 2 on argument errors (clap's convention).

use clap::Parser;
use decant_cli::{output, run_check, run_convert, Cli};
use std::process;

fn main() {
    // RUST_LOG overrides; warnings (skipped files, symlink loops) show by
    // default without duplicating the styled status lines.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let exit_code = if cli.check {
        run_check()
    } else {
        match run_convert(&cli) {
            Ok(code) => code,
            Err(e) => {
                output::print_error(&e.to_string());
                1
            }
        }
    };

    process::exit(exit_code);
}
