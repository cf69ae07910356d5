//! Writing command results to the terminal.

use std::io::{self, ErrorKind, Write};
use std::path::Path;

/// Emit a rendered result table.
///
/// `out` receives the table itself, or a one-line confirmation when the
/// table went to `written_to`. Notices about empty input go to `notices`
/// and never replace the rendered table.
pub fn emit_table<W: Write, N: Write>(
    out: &mut W,
    notices: &mut N,
    input: &Path,
    records: usize,
    rendered: &str,
    written_to: Option<&Path>,
) -> io::Result<()> {
    if records == 0 {
        writeln!(
            notices,
            "No outcomes with a label found in {}.",
            input.display()
        )?;
    }
    match written_to {
        Some(path) => writeln!(out, "Wrote {records} outcomes to {}", path.display())?,
        None if rendered.ends_with('\n') => out.write_all(rendered.as_bytes())?,
        None => writeln!(out, "{rendered}")?,
    }
    out.flush()
}

/// Treat a reader that closed the pipe early as success.
pub fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
