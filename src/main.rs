use clap::Parser;
use locscan::{Cli, LocScan, LocScanError, OutputFormatter, OutputMode};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

/// 0 on success (decode failures included), otherwise the error's exit code.
fn run() -> i32 {
    let cli = Cli::parse();

    let locscan = match LocScan::from_cli(&cli) {
        Ok(locscan) => locscan,
        Err(e) => {
            print_startup_error(&e, cli.output_mode());
            return e.exit_code();
        }
    };

    let outcome = if cli.dry_run {
        locscan.dry_run().map(|_| ())
    } else {
        locscan.run().map(|_| ())
    };

    match outcome {
        Ok(()) => 0,
        Err(e) => {
            locscan.handle_error(&e);
            e.exit_code()
        }
    }
}

fn print_startup_error(error: &LocScanError, mode: OutputMode) {
    let formatter = OutputFormatter::new(mode, 0, false);
    formatter.print_user_friendly_error(error);
}
