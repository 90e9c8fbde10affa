#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front end of the `fs-visit` binary. It
//! parses arguments with [`clap`](https://docs.rs/clap/), compiles the
//! include/exclude rules into a [`filters::FilterSet`], wires the requested
//! subscribers into a [`visit::FileSystemVisitor`] and prints every accepted
//! path on its own line.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error so tests can capture both streams in memory.
//! `--stop-at` and `--max-items` are plain event subscribers that request a
//! cooperative stop; `--print-events` records each firing and writes it ahead
//! of the path it precedes. Diagnostics enabled through `-v`, `--info` and
//! `--debug` are collected by the [`logging`] crate and written to standard
//! error after each printed path, with a final drain once the traversal ends.
//!
//! # Errors
//!
//! | Exit code | Meaning |
//! |-----------|---------|
//! | `0` | The traversal completed or was stopped on request. |
//! | `1` | Invalid arguments, filter patterns or diagnostic flags. |
//! | `2` | The traversal faulted or the output could not be written. |
//!
//! Failures are reported on standard error as `fs-visit error: ...`.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["fs-visit", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("fs-visit "));
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

mod args;
mod execute;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Help text describing the supported options.
const HELP_TEXT: &str = concat!(
    "fs-visit ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: fs-visit [OPTIONS] ROOT\n",
    "\n",
    "Lists ROOT and everything beneath it in pre-order: each directory is\n",
    "followed by its subdirectories, then by its own files.\n",
    "\n",
    "Options:\n",
    "  -h, --help              Show this help message and exit.\n",
    "  -V, --version           Output version information and exit.\n",
    "      --include=PATTERN   Visit paths matching PATTERN.\n",
    "      --exclude=PATTERN   Skip paths matching PATTERN; excluded directories are pruned.\n",
    "  -L, --follow-symlinks   Classify symbolic links by their target.\n",
    "      --stop-at=PATH      Stop the traversal once PATH has been found.\n",
    "      --max-items=N       Stop after N accepted paths.\n",
    "  -v, --verbose           Increase diagnostic verbosity (repeatable).\n",
    "      --info=FLAGS        Enable info diagnostics (visit, skip, stats).\n",
    "      --debug=FLAGS       Enable debug diagnostics (walk, event, filter, reader, all).\n",
    "      --print-events      Echo every traversal event to standard output.\n",
    "\n",
    "Patterns are matched against paths relative to ROOT. The last matching\n",
    "rule wins and unmatched paths are visited. A leading '/' anchors a\n",
    "pattern to ROOT and a trailing '/' restricts it to directories.\n",
    "A relative --stop-at PATH is resolved against ROOT.\n",
);

/// Version banner printed by `--version`.
const VERSION_TEXT: &str = concat!("fs-visit ", env!("CARGO_PKG_VERSION"), "\n");

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code: `0` on success, `1` for usage errors and
/// `2` when the traversal fails.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match args::parse_args(arguments) {
        Ok(parsed) => execute::execute(parsed, stdout, stderr),
        Err(error) => {
            let _ = write!(stderr, "{error}");
            1
        }
    }
}

/// Like [`run`], converting the status into an [`ExitCode`] for `main`.
pub fn run_with<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    exit_code_from(run(arguments, stdout, stderr))
}

/// Converts a numeric exit code into an [`ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
