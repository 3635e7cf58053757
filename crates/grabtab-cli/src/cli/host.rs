//! CLI download hosts: a dry-run printer and a terminal save prompt.

use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use grabtab_core::download::{
    DownloadError, DownloadHost, DownloadRequest, DownloadStarted, SaveLocation,
};

/// Prints each request instead of downloading it.
pub struct DryRunHost {
    dir: PathBuf,
    next_id: AtomicU64,
}

impl DryRunHost {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            next_id: AtomicU64::new(1),
        }
    }
}

impl DownloadHost for DryRunHost {
    async fn download(&self, request: DownloadRequest) -> Result<DownloadStarted, DownloadError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let target = self.dir.join(&request.filename);
        println!(
            "[dry-run] #{id} {} -> {}{}",
            request.url,
            target.display(),
            if request.prompt_user { " (prompt)" } else { "" }
        );
        Ok(DownloadStarted { id, target })
    }
}

/// Asks on the controlling terminal where to save. Stdin may be busy with the
/// event feed, so `/dev/tty` is used directly.
#[derive(Debug, Default)]
pub struct TtyPrompt;

impl SaveLocation for TtyPrompt {
    fn choose(&self, dir: &Path, suggested: &str) -> io::Result<Option<PathBuf>> {
        let default = dir.join(suggested);
        let tty = match OpenOptions::new().read(true).write(true).open("/dev/tty") {
            Ok(tty) => tty,
            Err(e) => {
                tracing::warn!("no terminal for save prompt ({}), using {}", e, default.display());
                return Ok(Some(default));
            }
        };
        let mut out = tty.try_clone()?;
        write!(out, "Save {suggested} as [{}]: ", default.display())?;
        out.flush()?;

        let mut line = String::new();
        let read = BufReader::new(tty).read_line(&mut line)?;
        Ok(parse_answer(read, &line, dir, default))
    }
}

/// Empty answer keeps the default, EOF cancels, relative paths land in `dir`.
fn parse_answer(read: usize, line: &str, dir: &Path, default: PathBuf) -> Option<PathBuf> {
    if read == 0 {
        return None;
    }
    let answer = line.trim();
    if answer.is_empty() {
        Some(default)
    } else {
        Some(dir.join(answer))
    }
}
