//! ccheck-drv - Driver for the ccheck style checker.
//!
//! Orchestrates the pipeline for each input file: read, lex, parse,
//! check or fix, and render diagnostics as `file:RANGE: message` lines on
//! standard output. In fix mode the rewritten content replaces the file
//! after the original is preserved as `<path>.orig`.

pub mod dump;
pub mod selftest;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ccheck_util::Handler;
use log::debug;

/// Per-run options from the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Repair files in place instead of reporting violations.
    pub fix: bool,
    /// Dump the token stream instead of checking.
    pub dump_toks: bool,
    /// Dump the AST instead of checking.
    pub dump_ast: bool,
}

/// Result of processing one file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileOutcome {
    /// No violations reported.
    Clean,
    /// Style violations were reported (check mode only).
    Violations(usize),
    /// A fatal error was reported (parse error).
    Fatal,
}

/// Processes one input file according to the options.
///
/// Diagnostics go to standard output. I/O failures surface as errors;
/// parse errors are printed and reported as [`FileOutcome::Fatal`].
pub fn process_file(path: &Path, opts: &Options) -> Result<FileOutcome> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    debug!("lexing {}", path.display());
    let mut stream = ccheck_lex::tokenize(&source);

    if opts.dump_toks {
        print!("{}", dump::dump_tokens(&stream));
        return Ok(FileOutcome::Clean);
    }

    debug!("parsing {}", path.display());
    let module = match ccheck_par::parse_module(&stream) {
        Ok(module) => module,
        Err(err) => {
            println!("{}:{}", path.display(), err);
            return Ok(FileOutcome::Fatal);
        }
    };

    if opts.dump_ast {
        print!("{}", dump::dump_ast(&module, &stream));
        return Ok(FileOutcome::Clean);
    }

    debug!("checking {}", path.display());
    let handler = Handler::new();
    ccheck_style::check(&mut stream, &module, &handler, opts.fix);

    let diags = handler.sorted_diagnostics();
    for diag in &diags {
        println!("{}:{}", path.display(), diag);
    }

    if opts.fix {
        write_fixed(path, &source, &stream.write())?;
        Ok(FileOutcome::Clean)
    } else if diags.is_empty() {
        Ok(FileOutcome::Clean)
    } else {
        Ok(FileOutcome::Violations(diags.len()))
    }
}

/// Writes the repaired content back, keeping the original as
/// `<path>.orig` unless such a file already exists.
fn write_fixed(path: &Path, original: &str, fixed: &str) -> Result<()> {
    let backup = backup_path(path);
    if !backup.exists() {
        fs::write(&backup, original)
            .with_context(|| format!("failed to write {}", backup.display()))?;
    }
    fs::write(path, fixed).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Returns the backup path for a file: the path with `.orig` appended.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".orig");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path(Path::new("src/main.c")),
            PathBuf::from("src/main.c.orig")
        );
    }
}
