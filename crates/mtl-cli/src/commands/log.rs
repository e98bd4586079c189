//! Commands that expose the log file itself.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use mtl_store::LogFile;

/// Prints the log path.
pub fn run_path<W: Write>(writer: &mut W, path: &Path) -> Result<()> {
    writeln!(writer, "{}", path.display())?;
    Ok(())
}

/// Opens the log in the default viewer without waiting for it to exit.
pub fn run_open(log: &LogFile) -> Result<()> {
    if !log.exists() {
        bail!(
            "no log file at {} yet, run `mtl start` first",
            log.path().display()
        );
    }

    open::that_detached(log.path())
        .with_context(|| format!("failed to open {}", log.path().display()))?;

    tracing::debug!(path = %log.path().display(), "launched log viewer");
    Ok(())
}
