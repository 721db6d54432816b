//! Handles all user-facing output for the CLI.
//!
//! UAST documents go to stdout untouched so they can be piped; status lines
//! are colorized when stdout is a terminal.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::errors::UastError;
use crate::uast::Node;

/// Serializes a UAST to stdout.
pub fn print_uast(tree: &Node, compact: bool) -> Result<(), UastError> {
    let text = if compact {
        serde_json::to_string(tree)
    } else {
        serde_json::to_string_pretty(tree)
    }
    .map_err(|e| UastError::Encode {
        message: e.to_string(),
    })?;
    println!("{text}");
    Ok(())
}

/// One bench result line: `ok   12.3ms  path (N nodes)`.
pub fn print_bench_ok(path: &Path, elapsed: Duration, nodes: usize) {
    status_line(
        Color::Green,
        "ok",
        &format!("{:>9.3?}  {} ({} nodes)", elapsed, path.display(), nodes),
    );
}

pub fn print_bench_failed(path: &Path, elapsed: Duration) {
    status_line(Color::Red, "FAIL", &format!("{:>9.3?}  {}", elapsed, path.display()));
}

pub fn print_bench_stop(path: &Path) {
    status_line(
        Color::Yellow,
        "stop",
        &format!("empty input {}, ending run", path.display()),
    );
}

pub fn print_bench_summary(files: usize, total: Duration) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_bold(true));
    let _ = writeln!(stdout, "{files} file(s) in {total:.3?}");
    let _ = stdout.reset();
}

fn status_line(color: Color, tag: &str, rest: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stdout, "{tag:<4}");
    let _ = stdout.reset();
    let _ = writeln!(stdout, " {rest}");
}
