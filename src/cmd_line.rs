//! Command line options.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use clap::{App, Arg, ArgMatches};
use dirs::{desktop_dir, home_dir};
use log::LevelFilter;

use crate::{
    errors::WxMapErr,
    map_type::MapType,
    request::{parse_date, Period, RequestPlan},
};

/// Struct to package up command line arguments.
#[derive(Clone, Debug)]
pub struct CmdLineArgs {
    // Dates, hours and map types to download
    plan: RequestPlan,
    // Where to put the maps
    map_dir: PathBuf,
    // Pause between downloads
    wait: Duration,
    // Number of times -v was given
    verbosity: u64,
}

impl<'a, 'b> CmdLineArgs {
    const DEFAULT_PERIOD: &'static str = "24";
    const DEFAULT_WAIT: &'static str = "5";
    const MAP_DIR_NAME: &'static str = "Wx_Maps";

    /// Create the application.
    pub fn new_app(app_name: &'static str, about: &'static str) -> App<'a, 'b> {
        let maps_help: &'static str = Box::leak(
            format!(
                "Type of surface map to download. Repeat this option to download several \
                 types of maps.\n{}",
                MapType::help_table()
            )
            .into_boxed_str(),
        );

        App::new(app_name)
            .author("Robert Osterburg <robert.osterburg@gmail.com>")
            .about(about)
            .version(clap::crate_version!())
            .arg(
                Arg::with_name("start_date")
                    .short("s")
                    .long("start_date")
                    .takes_value(true)
                    .required(true)
                    .help("Starting date as YYYY-MM-DD or YYYYMMDD."),
            )
            .arg(
                Arg::with_name("end_date")
                    .short("e")
                    .long("end_date")
                    .takes_value(true)
                    .required(true)
                    .help("Ending date (inclusive) as YYYY-MM-DD or YYYYMMDD."),
            )
            .arg(
                Arg::with_name("period")
                    .short("p")
                    .long("period")
                    .takes_value(true)
                    .default_value(Self::DEFAULT_PERIOD)
                    .help("Hours between subsequent maps (3, 6, 12, 24).")
                    .long_help(
                        "Hours between subsequent maps (3, 6, 12, 24). The first map of each \
                         day is always 00Z.",
                    ),
            )
            .arg(
                Arg::with_name("maps")
                    .short("m")
                    .long("maps")
                    .takes_value(true)
                    .multiple(true)
                    .number_of_values(1)
                    .required(true)
                    .help("Type of surface map to download. Repeat for several types.")
                    .long_help(maps_help),
            )
            .arg(
                Arg::with_name("map_dir")
                    .short("d")
                    .long("map_dir")
                    .takes_value(true)
                    .help("Directory to store downloaded maps.")
                    .long_help(
                        "Directory to store downloaded maps, created if needed. Defaults to \
                         'Wx_Maps' on your desktop.",
                    ),
            )
            .arg(
                Arg::with_name("wait")
                    .short("w")
                    .long("wait")
                    .takes_value(true)
                    .default_value(Self::DEFAULT_WAIT)
                    .help("Seconds to wait between downloads.")
                    .long_help(
                        "Seconds to wait between downloads. The archive is a shared \
                         resource, be kind to it.",
                    ),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .long("verbose")
                    .multiple(true)
                    .help("Log more, repeat for even more."),
            )
            .after_help(
                "One map of each type is downloaded for every date and time in the range. \
                 All times are UTC.",
            )
    }

    /// Parse the process arguments.
    ///
    /// Help and version requests come back as a [`WxMapErr::CmdLine`] error, which knows how to
    /// print itself and exit.
    pub fn matches(app: App<'a, 'b>) -> Result<Self, WxMapErr> {
        Self::matches_from(app, std::env::args_os())
    }

    /// Parse an explicit list of arguments, the first being the program name.
    pub fn matches_from<I, T>(app: App<'a, 'b>, args: I) -> Result<Self, WxMapErr>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app.get_matches_from_safe(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches<'a>) -> Result<Self, WxMapErr> {
        let start = parse_date(matches.value_of("start_date").unwrap_or_default())?;
        let end = parse_date(matches.value_of("end_date").unwrap_or_default())?;

        let period = Period::from_str(
            matches
                .value_of("period")
                .unwrap_or(Self::DEFAULT_PERIOD),
        )?;

        let maps = matches
            .values_of("maps")
            .into_iter()
            .flatten()
            .map(MapType::from_str)
            .collect::<Result<Vec<MapType>, WxMapErr>>()?;

        let map_dir = match matches.value_of("map_dir") {
            Some(dir) => resolve_dir(dir),
            None => default_map_dir(),
        };

        let wait = matches
            .value_of("wait")
            .unwrap_or(Self::DEFAULT_WAIT)
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                WxMapErr::InvalidArgument("wait must be a whole number of seconds".to_owned())
            })?;

        Ok(CmdLineArgs {
            plan: RequestPlan::new(start, end, period, maps)?,
            map_dir,
            wait,
            verbosity: matches.occurrences_of("verbose"),
        })
    }

    /// Get the validated dates, hours and map types
    pub fn plan(&self) -> &RequestPlan {
        &self.plan
    }

    /// Get the directory to store maps in
    pub fn map_dir(&self) -> &Path {
        &self.map_dir
    }

    /// Get the pause between downloads
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Get the log level asked for with -v.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// The default directory for maps, `Wx_Maps` on the desktop.
pub fn default_map_dir() -> PathBuf {
    desktop_dir()
        .or_else(|| home_dir().map(|hd| hd.join("Desktop")))
        .unwrap_or_default()
        .join(CmdLineArgs::MAP_DIR_NAME)
}

// Expand a leading ~ (but not ~user) and make the path absolute.
fn resolve_dir(dir: &str) -> PathBuf {
    let expanded = match (dir.strip_prefix('~'), home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') || rest.starts_with('\\') => {
            home.join(&rest[1..])
        }
        _ => PathBuf::from(dir),
    };

    if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use crate::errors::ErrorKind;

    use chrono::NaiveDate;
    use strum::IntoEnumIterator;

    fn parse(args: &[&str]) -> Result<CmdLineArgs, WxMapErr> {
        let app = CmdLineArgs::new_app("wxmap", "test");
        CmdLineArgs::matches_from(app, std::iter::once("wxmap").chain(args.iter().cloned()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["-s", "2017-07-04", "-e", "20170707", "-m", "namussfc"])
            .unwrap();

        let plan = args.plan();
        assert_eq!(plan.start(), NaiveDate::from_ymd(2017, 7, 4));
        assert_eq!(plan.end(), NaiveDate::from_ymd(2017, 7, 7));
        assert_eq!(plan.period().hours(), 24);
        assert_eq!(plan.maps(), &[MapType::NamUsSfc]);
        assert_eq!(args.wait(), Duration::from_secs(5));
        assert_eq!(args.log_level(), LevelFilter::Warn);
        assert!(args.map_dir().ends_with("Wx_Maps"));
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn test_long_options_and_repeated_maps() {
        let args = parse(&[
            "--start_date",
            "2017-07-04",
            "--end_date",
            "2017-07-04",
            "--period",
            "6",
            "--maps",
            "satsfcnps",
            "--maps",
            "NAMUSSFC",
            "--map_dir",
            "/tmp/maps",
            "--wait",
            "0",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.plan().period().hours(), 6);
        assert_eq!(args.plan().maps(), &[MapType::SatSfcNps, MapType::NamUsSfc]);
        assert_eq!(args.map_dir(), Path::new("/tmp/maps"));
        assert_eq!(args.wait(), Duration::from_secs(0));
        assert_eq!(args.log_level(), LevelFilter::Debug);
        assert_eq!(args.plan().len(), 8);
    }

    #[test]
    fn test_configuration_errors() {
        let cases: &[&[&str]] = &[
            &["-s", "2017-07-05", "-e", "2017-07-04", "-m", "namussfc"],
            &["-s", "2017-07-04", "-e", "2017-07-04", "-p", "5", "-m", "namussfc"],
            &["-s", "07/04/2017", "-e", "2017-07-04", "-m", "namussfc"],
            &["-s", "2017-07-04", "-e", "2017-07-04", "-m", "na_zoomin"],
            &["-s", "2017-07-04", "-e", "2017-07-04", "-m", "namussfc", "-w", "x"],
            &["-s", "2017-07-04", "-e", "2017-07-04"],
        ];

        for case in cases {
            let err = parse(case).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "{:?}", case);
        }
    }

    #[test]
    fn test_long_help_lists_map_types() {
        let mut help = Vec::new();
        CmdLineArgs::new_app("wxmap", "test")
            .write_long_help(&mut help)
            .unwrap();
        let help = String::from_utf8(help).unwrap();

        for map_type in MapType::iter() {
            assert!(help.contains(map_type.code()));
            assert!(help.contains(map_type.description()));
        }
    }

    #[test]
    fn test_help() {
        match parse(&["-h"]) {
            Err(WxMapErr::CmdLine(err)) => assert_eq!(err.kind, clap::ErrorKind::HelpDisplayed),
            other => panic!("expected help, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_dir() {
        if let Some(home) = home_dir() {
            assert_eq!(resolve_dir("~/Maps"), home.join("Maps"));
            assert_eq!(resolve_dir("~"), home);
        }

        let other_user = resolve_dir("~alice/maps");
        assert!(other_user.is_absolute());
        assert!(other_user.ends_with("~alice/maps"));

        assert!(resolve_dir("maps").is_absolute());
        assert_eq!(resolve_dir("/var/maps"), PathBuf::from("/var/maps"));
    }
}
