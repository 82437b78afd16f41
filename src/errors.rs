//! Module for errors.
use std::{error::Error, fmt::Display, path::PathBuf};

/// Broad class of an error, which decides how a run reacts to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input, detected before any network activity.
    Configuration,
    /// A single map could not be retrieved. The run skips it and continues.
    Fetch,
    /// The local filesystem refused a write. Fatal for the whole run.
    Storage,
}

/// Error from the map downloader.
#[derive(Debug)]
pub enum WxMapErr {
    // Configuration errors
    /// A date that is neither YYYY-MM-DD nor YYYYMMDD.
    InvalidDate(String),
    /// The end date falls before the start date.
    EndBeforeStart {
        /// First day requested.
        start: chrono::NaiveDate,
        /// Last day requested.
        end: chrono::NaiveDate,
    },
    /// Hours between maps must be one of 3, 6, 12 or 24.
    InvalidPeriod(String),
    /// Unknown map type code.
    InvalidMapType(String),
    /// No map types were requested.
    NoMapTypes,
    /// Some other unusable command line value.
    InvalidArgument(String),
    /// Error forwarded from clap, including requests for help or version.
    CmdLine(clap::Error),

    // Per-request fetch errors
    /// Error forwarded from the http client.
    Http(reqwest::Error),
    /// The archive answered with something other than success.
    HttpStatus(String, reqwest::StatusCode),

    // Storage errors
    /// A directory or file could not be written.
    Storage {
        /// The path that failed.
        path: PathBuf,
        /// The underlying io error.
        source: std::io::Error,
    },
}

impl WxMapErr {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        use crate::errors::WxMapErr::*;

        match self {
            InvalidDate(_)
            | EndBeforeStart { .. }
            | InvalidPeriod(_)
            | InvalidMapType(_)
            | NoMapTypes
            | InvalidArgument(_)
            | CmdLine(_) => ErrorKind::Configuration,
            Http(_) | HttpStatus(_, _) => ErrorKind::Fetch,
            Storage { .. } => ErrorKind::Storage,
        }
    }

    /// Wrap an io error with the path it happened on.
    pub(crate) fn storage<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        WxMapErr::Storage {
            path: path.into(),
            source,
        }
    }
}

impl Display for WxMapErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::WxMapErr::*;

        match self {
            InvalidDate(val) => write!(f, "invalid date '{}', use YYYY-MM-DD or YYYYMMDD", val),
            EndBeforeStart { start, end } => {
                write!(f, "end date {} is before start date {}", end, start)
            }
            InvalidPeriod(val) => write!(f, "invalid period '{}', must be 3, 6, 12 or 24", val),
            InvalidMapType(val) => write!(f, "invalid map type: {}", val),
            NoMapTypes => write!(f, "no map types requested, use --maps at least once"),
            InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            CmdLine(err) => write!(f, "{}", err.message),

            Http(err) => write!(f, "http error: {}", err),
            HttpStatus(url, code) => write!(f, "HTTP error ({}): {}", code, url),

            Storage { path, .. } => write!(f, "unable to write {}", path.display()),
        }
    }
}

impl Error for WxMapErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WxMapErr::Http(err) => Some(err),
            WxMapErr::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<clap::Error> for WxMapErr {
    fn from(err: clap::Error) -> WxMapErr {
        WxMapErr::CmdLine(err)
    }
}

impl From<reqwest::Error> for WxMapErr {
    fn from(err: reqwest::Error) -> WxMapErr {
        WxMapErr::Http(err)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(WxMapErr::NoMapTypes.kind(), ErrorKind::Configuration);
        assert_eq!(
            WxMapErr::InvalidPeriod("5".to_owned()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            WxMapErr::HttpStatus("http://x".to_owned(), reqwest::StatusCode::NOT_FOUND).kind(),
            ErrorKind::Fetch
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = WxMapErr::storage("/maps/a.gif", io);
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.source().is_some());
    }
}
