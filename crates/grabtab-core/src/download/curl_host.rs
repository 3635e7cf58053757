//! File-writing download host backed by libcurl.
//!
//! `download` resolves the save location (prompting if asked), then hands the
//! GET to a blocking task and returns. A target already on disk or in flight
//! gets a numbered name (`video (1).mp4`). [`CurlHost::wait_all`] waits for
//! every running transfer.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::url_model::safe_filename;

use super::{DownloadError, DownloadHost, DownloadRequest, DownloadStarted};

const FALLBACK_FILENAME: &str = "download.bin";

/// Decides where a prompted download is saved.
pub trait SaveLocation: Send + Sync {
    /// Returns the chosen path, or `None` if the user cancelled.
    fn choose(&self, dir: &Path, suggested: &str) -> io::Result<Option<PathBuf>>;
}

/// Saves into the host directory under the suggested name, without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDir;

impl SaveLocation for FixedDir {
    fn choose(&self, dir: &Path, suggested: &str) -> io::Result<Option<PathBuf>> {
        Ok(Some(dir.join(suggested)))
    }
}

/// Final result of one transfer, handed to the completion hook.
#[derive(Debug)]
pub struct TransferResult {
    pub id: u64,
    pub target: PathBuf,
    /// Bytes written on success.
    pub result: Result<u64, DownloadError>,
}

/// Running totals of finished transfers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferSummary {
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Default)]
struct Totals {
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

impl Totals {
    fn record(&self, ok: bool) {
        let counter = if ok { &self.succeeded } else { &self.failed };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

type CompletionHook = Arc<dyn Fn(&TransferResult) + Send + Sync>;

struct Transfer {
    target: PathBuf,
    handle: JoinHandle<()>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Download host that writes each stream to a file under `dir`.
///
/// Each transfer logs its result and calls the completion hook as soon as it
/// ends. Finished transfers are dropped from the in-flight list the next time
/// it is touched.
pub struct CurlHost<L = FixedDir> {
    dir: PathBuf,
    location: Arc<L>,
    next_id: AtomicU64,
    transfers: Mutex<Vec<Transfer>>,
    totals: Arc<Totals>,
    on_complete: Option<CompletionHook>,
}

impl CurlHost<FixedDir> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_location(dir, FixedDir)
    }
}

impl<L: SaveLocation + 'static> CurlHost<L> {
    /// Host that consults `location` whenever a request asks for a prompt.
    pub fn with_location(dir: impl Into<PathBuf>, location: L) -> Self {
        Self {
            dir: dir.into(),
            location: Arc::new(location),
            next_id: AtomicU64::new(1),
            transfers: Mutex::new(Vec::new()),
            totals: Arc::default(),
            on_complete: None,
        }
    }

    /// Calls `hook` from the transfer thread when each transfer ends.
    pub fn on_complete(mut self, hook: impl Fn(&TransferResult) + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Arc::new(hook));
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of transfers still running.
    pub fn in_flight(&self) -> usize {
        let mut transfers = lock(&self.transfers);
        transfers.retain(|t| !t.handle.is_finished());
        transfers.len()
    }

    /// Totals of every transfer finished so far.
    pub fn summary(&self) -> TransferSummary {
        TransferSummary {
            succeeded: self.totals.succeeded.load(Ordering::Relaxed),
            failed: self.totals.failed.load(Ordering::Relaxed),
        }
    }

    /// Waits until no transfer is running, then returns the totals.
    pub async fn wait_all(&self) -> TransferSummary {
        loop {
            let pending = std::mem::take(&mut *lock(&self.transfers));
            if pending.is_empty() {
                break;
            }
            for t in pending {
                if let Err(e) = t.handle.await {
                    tracing::error!(target = %t.target.display(), "transfer task failed: {}", e);
                    self.totals.record(false);
                }
            }
        }
        self.summary()
    }

    async fn resolve_target(&self, request: &DownloadRequest) -> Result<PathBuf, DownloadError> {
        let name = safe_filename(&request.filename, FALLBACK_FILENAME);
        if !request.prompt_user {
            return Ok(self.dir.join(name));
        }
        let location = Arc::clone(&self.location);
        let dir = self.dir.clone();
        let suggested = name.clone();
        let chosen = tokio::task::spawn_blocking(move || location.choose(&dir, &suggested))
            .await
            .map_err(|e| DownloadError::Rejected(format!("save prompt failed: {e}")))??;
        chosen.ok_or(DownloadError::Cancelled(name))
    }
}

impl<L: SaveLocation + 'static> DownloadHost for CurlHost<L> {
    async fn download(&self, request: DownloadRequest) -> Result<DownloadStarted, DownloadError> {
        let requested = self.resolve_target(&request).await?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        // Target choice and registration happen under one lock so concurrent
        // requests never share a file.
        let mut transfers = lock(&self.transfers);
        transfers.retain(|t| !t.handle.is_finished());
        let target = unique_target(&requested, |p| {
            p.exists() || transfers.iter().any(|t| t.target == p)
        });
        if target != requested {
            tracing::info!(
                id,
                requested = %requested.display(),
                target = %target.display(),
                "target taken, saving under a new name"
            );
        }

        let url = request.url;
        let dest = target.clone();
        let totals = Arc::clone(&self.totals);
        let hook = self.on_complete.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let result = fetch_to_file(&url, &dest);
            let done = TransferResult {
                id,
                target: dest,
                result,
            };
            match &done.result {
                Ok(bytes) => {
                    tracing::info!(id, target = %done.target.display(), bytes, "download finished")
                }
                Err(e) => {
                    tracing::error!(id, target = %done.target.display(), "download failed: {}", e)
                }
            }
            totals.record(done.result.is_ok());
            if let Some(hook) = hook {
                hook(&done);
            }
        });
        transfers.push(Transfer {
            target: target.clone(),
            handle,
        });
        drop(transfers);

        Ok(DownloadStarted { id, target })
    }
}

/// `path` unless `taken` says it is in use, else the first free `stem (n).ext`.
fn unique_target(path: &Path, taken: impl Fn(&Path) -> bool) -> PathBuf {
    if !taken(path) {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());
    let mut n = 1u32;
    loop {
        let name = match &ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = path.with_file_name(name);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Single GET of `url` into a new file at `dest`. Removes the partial file
/// on failure. Runs in the current thread.
fn fetch_to_file(url: &str, dest: &Path) -> Result<u64, DownloadError> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(dest)?;
    let result = transfer(url, &mut file);
    if result.is_err() {
        drop(file);
        let _ = std::fs::remove_file(dest);
    }
    result
}

fn transfer(url: &str, file: &mut File) -> Result<u64, DownloadError> {
    let mut written: u64 = 0;
    let mut write_error: Option<io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        let performed = transfer.perform();
        drop(transfer);
        if let Some(e) = write_error.take() {
            return Err(DownloadError::Io(e));
        }
        performed?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(DownloadError::Http {
            url: url.to_string(),
            status: code,
        });
    }
    file.flush()?;
    Ok(written)
}
