use log::debug;
use std::io;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::probe::MediaProbe;
use crate::process::{Invocation, ProcessRunner};
use crate::shownotes::OUTPUT_FILE;

// @module: Rendered show notes and file manager reveal

/// Render the output show notes.
///
/// The optional metadata comment comes first, then the display title, a
/// blank line, and the body.
pub fn render_show_notes(display_title: &str, body: &str, probe: Option<&MediaProbe>) -> String {
    let mut out = String::new();

    if let Some(probe) = probe {
        out.push_str(&probe.comment_block());
        out.push_str("\n\n");
    }

    out.push_str(display_title);
    out.push_str("\n\n");
    out.push_str(body);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Write `shownotes.md` into `dir`, returning its path.
pub fn write_show_notes<P: AsRef<Path>>(dir: P, content: &str) -> io::Result<PathBuf> {
    let path = dir.as_ref().join(OUTPUT_FILE);
    FileManager::write_to_file(&path, content)?;
    Ok(path)
}

/// Command revealing `target` in the platform file manager, if there is one.
pub fn reveal_invocation(target: &Path) -> Option<Invocation> {
    if !cfg!(target_os = "macos") {
        return None;
    }

    let absolute = FileManager::expand_path(&target.to_string_lossy());
    let script = format!(
        "tell app \"Finder\" to reveal POSIX file \"{}\"",
        absolute.display()
    );
    Some(Invocation::new("osascript").arg("-e").arg(script))
}

/// Reveal `target` in the file manager. Best effort: failures are only logged.
pub fn reveal<R: ProcessRunner>(runner: &R, target: &Path) {
    let Some(invocation) = reveal_invocation(target) else {
        debug!("Revealing files is not supported on this platform");
        return;
    };

    match runner.run(&invocation) {
        Ok(output) if output.is_success() => debug!("Revealed {} in Finder", target.display()),
        Ok(output) => debug!("Reveal failed: {}", output.stderr.trim()),
        Err(e) => debug!("Reveal failed: {}", e),
    }
}
