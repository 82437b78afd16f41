//! Retrieve maps from the archive one at a time and store them on disk.

use std::{
    fs,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use reqwest::blocking::Client;

use crate::{
    errors::WxMapErr,
    request::{DownloadTarget, RequestPlan},
};

/// Something that can retrieve the raw bytes behind a url.
pub trait Fetcher {
    /// Blocking retrieval of a single resource.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, WxMapErr>;
}

/// Retrieve maps over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Seconds before a single request is abandoned.
    pub const TIMEOUT_SECS: u64 = 60;

    /// Create a new fetcher.
    pub fn new() -> Result<Self, WxMapErr> {
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECS))
            .user_agent(concat!("wx-map/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, WxMapErr> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(WxMapErr::HttpStatus(url.to_owned(), status));
        }

        Ok(response.bytes()?.to_vec())
    }
}

/// Observer for the progress of a run.
pub trait Progress {
    /// Called once before the first request.
    fn start(&mut self, total: u64);
    /// A map was written to disk.
    fn saved(&mut self, target: &DownloadTarget);
    /// A map could not be retrieved and was skipped.
    fn skipped(&mut self, target: &DownloadTarget, err: &WxMapErr);
    /// Called once when the run ends.
    fn finish(&mut self);
}

/// Ignores all progress.
#[derive(Debug, Default)]
pub struct Quiet;

impl Progress for Quiet {
    fn start(&mut self, _total: u64) {}
    fn saved(&mut self, _target: &DownloadTarget) {}
    fn skipped(&mut self, _target: &DownloadTarget, _err: &WxMapErr) {}
    fn finish(&mut self) {}
}

/// Terminal progress bar with percent complete and time remaining.
pub struct ProgressBarReporter {
    bar: ProgressBar,
}

impl Default for ProgressBarReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBarReporter {
    const TEMPLATE: &'static str = "{bar:40.cyan/blue} {pos}/{len} {percent:>3}% {msg}";

    /// Create a reporter. Nothing is drawn until `start` is called.
    pub fn new() -> Self {
        ProgressBarReporter {
            bar: ProgressBar::hidden(),
        }
    }

    fn advance(&mut self) {
        self.bar.inc(1);
        self.bar
            .set_message(format!("ETA {}", HumanDuration(self.bar.eta())));
    }
}

impl Progress for ProgressBarReporter {
    fn start(&mut self, total: u64) {
        let style = ProgressStyle::with_template(Self::TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        self.bar = ProgressBar::new(total).with_style(style);
    }

    fn saved(&mut self, target: &DownloadTarget) {
        let line = saving_line(target);
        self.bar.suspend(|| println!("{}", line));
        self.advance();
    }

    fn skipped(&mut self, target: &DownloadTarget, err: &WxMapErr) {
        self.bar
            .suspend(|| eprintln!("Skipping {}: {}", target.remote_url, err));
        self.advance();
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}

fn saving_line(target: &DownloadTarget) -> String {
    format!("Saving file: {}", target.local_path.display())
}

/// Counts from a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Requests tried.
    pub attempted: usize,
    /// Maps written to disk.
    pub saved: usize,
    /// Maps that could not be retrieved.
    pub skipped: usize,
}

/// Runs a plan against the archive, strictly in order.
#[derive(Debug)]
pub struct Downloader<F> {
    fetcher: F,
    map_dir: PathBuf,
    wait: Duration,
}

impl<F: Fetcher> Downloader<F> {
    /// Seconds to pause between requests unless configured otherwise.
    pub const DEFAULT_WAIT_SECS: u64 = 5;

    /// Create a downloader that stores maps in `map_dir`.
    pub fn new<P: AsRef<Path>>(fetcher: F, map_dir: P) -> Self {
        Downloader {
            fetcher,
            map_dir: map_dir.as_ref().to_path_buf(),
            wait: Duration::from_secs(Self::DEFAULT_WAIT_SECS),
        }
    }

    /// Set the pause between consecutive requests.
    pub fn with_wait(self, wait: Duration) -> Self {
        Downloader { wait, ..self }
    }

    /// Download every map in the plan.
    ///
    /// A map that cannot be retrieved is logged and skipped. Failing to write to the map
    /// directory ends the run with an error, since every later write would fail too.
    pub fn run(
        &self,
        plan: &RequestPlan,
        progress: &mut dyn Progress,
    ) -> Result<Summary, WxMapErr> {
        fs::create_dir_all(&self.map_dir).map_err(|err| WxMapErr::storage(&self.map_dir, err))?;

        info!(
            "downloading {} maps from {} to {} every {}h into {}",
            plan.len(),
            plan.start(),
            plan.end(),
            plan.period(),
            self.map_dir.display()
        );

        progress.start(plan.len() as u64);
        let mut summary = Summary::default();

        for (i, req) in plan.iter().enumerate() {
            if i > 0 && self.wait > Duration::from_secs(0) {
                thread::sleep(self.wait);
            }

            let target = req.target(&self.map_dir);
            debug!("fetching {} from {}", req, target.remote_url);
            summary.attempted += 1;

            match self.fetcher.fetch(&target.remote_url) {
                Ok(bytes) => {
                    if let Err(err) = store(&target.local_path, &bytes) {
                        progress.finish();
                        return Err(err);
                    }

                    summary.saved += 1;
                    progress.saved(&target);
                }
                Err(err) => {
                    warn!(
                        "skipping {}: {} (archive page: {})",
                        req,
                        err,
                        req.map_type.page_url(req.date, req.hour)
                    );

                    summary.skipped += 1;
                    progress.skipped(&target, &err);
                }
            }
        }

        progress.finish();
        info!(
            "{} of {} maps saved, {} skipped",
            summary.saved, summary.attempted, summary.skipped
        );

        Ok(summary)
    }
}

// Overwrites any existing file.
fn store(path: &Path, bytes: &[u8]) -> Result<(), WxMapErr> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| WxMapErr::storage(parent, err))?;
    }

    fs::write(path, bytes).map_err(|err| WxMapErr::storage(path, err))
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
