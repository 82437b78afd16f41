//! Enumerate the maps to download for a range of dates.

use std::{
    convert::TryFrom,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::{Duration, NaiveDate};
use itertools::iproduct;

use crate::{errors::WxMapErr, map_type::MapType};

const IMAGE_FILE_TYPE: &str = "gif";

/// Hours between subsequent maps. The first map of each day is always 00Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period(u32);

impl Period {
    /// Periods the archive supports.
    pub const VALID_HOURS: [u32; 4] = [3, 6, 12, 24];

    /// Number of hours between maps.
    pub fn hours(self) -> u32 {
        self.0
    }

    /// The map hours (UTC) for a single day.
    pub fn daily_hours(self) -> impl Iterator<Item = u32> + Clone {
        let period = self.0;
        (0..24 / period).map(move |n| n * period)
    }
}

impl Default for Period {
    fn default() -> Self {
        Period(24)
    }
}

impl TryFrom<u32> for Period {
    type Error = WxMapErr;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        if Period::VALID_HOURS.contains(&hours) {
            Ok(Period(hours))
        } else {
            Err(WxMapErr::InvalidPeriod(hours.to_string()))
        }
    }
}

impl FromStr for Period {
    type Err = WxMapErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hours: u32 = s
            .trim()
            .parse()
            .map_err(|_| WxMapErr::InvalidPeriod(s.to_owned()))?;

        Period::try_from(hours)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a date given as YYYY-MM-DD or YYYYMMDD.
pub fn parse_date(val: &str) -> Result<NaiveDate, WxMapErr> {
    let val = val.trim();

    let parsed = if val.contains('-') {
        NaiveDate::parse_from_str(val, "%Y-%m-%d")
    } else if val.len() == 8 && val.chars().all(|c| c.is_ascii_digit()) {
        NaiveDate::parse_from_str(val, "%Y%m%d")
    } else {
        return Err(WxMapErr::InvalidDate(val.to_owned()));
    };

    parsed.map_err(|_| WxMapErr::InvalidDate(val.to_owned()))
}

/// A single map to retrieve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FetchRequest {
    /// Day of the map.
    pub date: NaiveDate,
    /// Hour of the map, UTC.
    pub hour: u32,
    /// Which product.
    pub map_type: MapType,
}

impl FetchRequest {
    /// File name the map is stored under, e.g. `20170704_00z_namussfc.gif`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{:02}z_{}.{}",
            self.date.format("%Y%m%d"),
            self.hour,
            self.map_type.code(),
            IMAGE_FILE_TYPE
        )
    }

    /// Where this map comes from and where it goes.
    pub fn target(&self, map_dir: &Path) -> DownloadTarget {
        DownloadTarget {
            remote_url: self.map_type.remote_url(self.date, self.hour),
            local_path: map_dir.join(self.file_name()),
        }
    }
}

impl fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {:02}Z {}", self.date, self.hour, self.map_type)
    }
}

/// Remote source and local destination of a map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadTarget {
    /// Url of the image on the archive.
    pub remote_url: String,
    /// Path of the file on disk.
    pub local_path: PathBuf,
}

/// A validated request for a range of maps.
///
/// Requests come out ordered by date, then by hour within each day, then by map type in the order
/// given to [`RequestPlan::new`].
#[derive(Clone, Debug)]
pub struct RequestPlan {
    start: NaiveDate,
    end: NaiveDate,
    period: Period,
    maps: Vec<MapType>,
}

impl RequestPlan {
    /// Validate the inputs and create a plan. Both dates are inclusive.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        period: Period,
        maps: Vec<MapType>,
    ) -> Result<Self, WxMapErr> {
        if end < start {
            return Err(WxMapErr::EndBeforeStart { start, end });
        }

        if maps.is_empty() {
            return Err(WxMapErr::NoMapTypes);
        }

        Ok(RequestPlan {
            start,
            end,
            period,
            maps,
        })
    }

    /// First day of the plan.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the plan.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Hours between maps.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Requested map types, in order.
    pub fn maps(&self) -> &[MapType] {
        &self.maps
    }

    /// Number of days covered, counting both ends.
    pub fn num_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Total number of requests.
    pub fn len(&self) -> usize {
        self.num_days() * self.period.daily_hours().count() * self.maps.len()
    }

    /// A valid plan always has at least one request.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all the requests in order.
    pub fn iter(&self) -> impl Iterator<Item = FetchRequest> + '_ {
        let start = self.start;
        let dates = (0..self.num_days() as i64).map(move |d| start + Duration::days(d));

        iproduct!(dates, self.period.daily_hours(), self.maps.iter()).map(
            |(date, hour, &map_type)| FetchRequest {
                date,
                hour,
                map_type,
            },
        )
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
