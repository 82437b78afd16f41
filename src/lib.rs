#![deny(missing_docs)]
//! Download archived surface weather maps from the Weather Prediction Center.
//!
//! Surface maps for North America and the continental United States are available from
//! May 1, 2005 onward, several products at up to eight times per day. A [`RequestPlan`] lists
//! every (date, hour, map type) combination in a date range, and a [`Downloader`] retrieves them
//! one at a time and stores each as `{YYYYMMDD}_{HH}z_{map type}.gif`.

//
// Public API
//
pub use cmd_line::{default_map_dir, CmdLineArgs};
pub use errors::{ErrorKind, WxMapErr};
pub use fetch::{
    Downloader, Fetcher, HttpFetcher, Progress, ProgressBarReporter, Quiet, Summary,
};
pub use map_type::{MapType, HOST_URL};
pub use request::{parse_date, DownloadTarget, FetchRequest, Period, RequestPlan};

//
// Implementation only
//
#[macro_use]
extern crate strum_macros;

mod cmd_line;
mod errors;
mod fetch;
mod map_type;
mod request;
