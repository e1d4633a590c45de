//! Page driver that replays captured timeline responses from a directory.
//!
//! Each `*.json` file is an envelope `{ "url": ..., "status": 200, "body": {...} }`.
//! Files are delivered in name order, `per_step` of them for each scroll.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use engine_logging::{engine_debug, engine_info, engine_warn};
use harvester_engine::{CapturedResponse, DriverError, PageDriver, ResponseSender};
use serde::Deserialize;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Deserialize)]
struct Envelope {
    url: String,
    #[serde(default = "default_status")]
    status: u16,
    #[serde(default)]
    body: serde_json::Value,
}

fn default_status() -> u16 {
    200
}

pub struct ReplayDriver {
    dir: PathBuf,
    per_step: usize,
    pending: VecDeque<PathBuf>,
    listener: Option<ResponseSender>,
}

impl ReplayDriver {
    pub fn new(dir: PathBuf, per_step: usize) -> Self {
        Self {
            dir,
            per_step: per_step.max(1),
            pending: VecDeque::new(),
            listener: None,
        }
    }

    fn load_capture(path: &Path) -> Result<CapturedResponse, String> {
        let content = fs::read(path).map_err(|e| e.to_string())?;
        let envelope: Envelope = serde_json::from_slice(&content).map_err(|e| e.to_string())?;
        let body = serde_json::to_vec(&envelope.body).map_err(|e| e.to_string());
        Ok(CapturedResponse {
            url: envelope.url,
            status: envelope.status,
            body,
        })
    }
}

/// Sorted `*.json` files in `dir`; empty when the directory is unreadable.
fn capture_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

impl PageDriver for ReplayDriver {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        engine_debug!("Replay navigate to {}", url);
        Ok(())
    }

    /// Login counts as confirmed once the capture directory holds at least one file.
    fn await_login_confirmation(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let files = capture_files(&self.dir);
            if !files.is_empty() {
                engine_info!(
                    "Replaying {} captured responses from {}",
                    files.len(),
                    self.dir.display()
                );
                self.pending = files.into();
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            thread::sleep(remaining.min(POLL_INTERVAL));
        }
    }

    fn listen(&mut self, responses: ResponseSender) {
        self.listener = Some(responses);
    }

    fn stop_listening(&mut self) {
        self.listener = None;
    }

    fn trigger_next_page(&mut self) {
        let Some(listener) = &self.listener else {
            return;
        };
        let mut delivered = 0;
        while delivered < self.per_step {
            let Some(path) = self.pending.pop_front() else {
                break;
            };
            match Self::load_capture(&path) {
                Ok(response) => {
                    if !listener.deliver(response) {
                        return;
                    }
                    delivered += 1;
                }
                Err(err) => engine_warn!("Skipping capture {}: {}", path.display(), err),
            }
        }
    }

    fn close(&mut self) {
        self.listener = None;
        self.pending.clear();
    }
}
