use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;

use ccheck_drv::{process_file, selftest, FileOutcome, Options};

/// C99 style checker and fixer.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Rewrite each file in place, keeping the original as <path>.orig
    #[arg(long)]
    fix: bool,

    /// Run the built-in self-test suite and exit
    #[arg(long)]
    test: bool,

    /// Dump the token stream of each file instead of checking
    #[arg(long)]
    dump_toks: bool,

    /// Dump the AST of each file instead of checking
    #[arg(long)]
    dump_ast: bool,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Files to process
    #[arg(required_unless_present = "test")]
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = SimpleLogger::new().with_level(level).init();

    if cli.test {
        return if selftest::run() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let opts = Options {
        fix: cli.fix,
        dump_toks: cli.dump_toks,
        dump_ast: cli.dump_ast,
    };

    let mut failed = false;
    for path in &cli.paths {
        match process_file(path, &opts) {
            Ok(FileOutcome::Clean) => {}
            Ok(FileOutcome::Violations(_)) | Ok(FileOutcome::Fatal) => failed = true,
            Err(err) => {
                error!("{:#}", err);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
