//! Map products available from the surface analysis archive.

use chrono::{Datelike, NaiveDate};
use std::{fmt, str::FromStr};
use strum::IntoEnumIterator;

use crate::errors::WxMapErr;

/// The archive host.
pub const HOST_URL: &str = "http://www.wpc.ncep.noaa.gov/";

const PAGE_PATH: &str = "archives/web_pages/sfc/sfc_archive_maps.php";

/// Surface map products in the archive.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter, Hash)]
pub enum MapType {
    /// United States (CONUS)
    NamUsSfc,
    /// United States, fronts and analysis only
    UsFntSfc,
    /// United States, black and white
    PrintUs,
    /// U.S. analysis and satellite composite
    UsSatSfc,
    /// U.S. analysis and radar composite
    RadSfcUsExp,
    /// North America, fronts and analysis only
    NamFntSfc,
    /// North America analysis and satellite composite
    SatSfcNps,
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for MapType {
    type Err = WxMapErr;

    /// Parse a map type code, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();

        MapType::iter()
            .find(|map_type| map_type.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| WxMapErr::InvalidMapType(s.to_owned()))
    }
}

impl MapType {
    /// The code the archive uses for this product.
    pub fn code(self) -> &'static str {
        use MapType::*;

        match self {
            NamUsSfc => "namussfc",
            UsFntSfc => "usfntsfc",
            PrintUs => "print_us",
            UsSatSfc => "ussatsfc",
            RadSfcUsExp => "radsfcus_exp",
            NamFntSfc => "namfntsfc",
            SatSfcNps => "satsfcnps",
        }
    }

    /// A human readable name for the product.
    pub fn description(self) -> &'static str {
        use MapType::*;

        match self {
            NamUsSfc => "United States (CONUS)",
            UsFntSfc => "United States (Fronts/Analysis Only)",
            PrintUs => "United States (B/W)",
            UsSatSfc => "U.S. Analysis/Satellite Composite",
            RadSfcUsExp => "U.S. Analysis/Radar Composite",
            NamFntSfc => "North America (Fronts/Analysis Only)",
            SatSfcNps => "North America Analysis/Satellite Composite",
        }
    }

    /// One line per product with its code and description, for help output.
    pub fn help_table() -> String {
        MapType::iter()
            .map(|map_type| format!("    {:<14}{}", map_type.code(), map_type.description()))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Path template of the image on the archive host.
    ///
    /// The placeholders `{year}`, `{month}`, `{day}` and `{hour}` are replaced by the zero
    /// padded values of the map time.
    pub fn url_template(self) -> &'static str {
        use MapType::*;

        match self {
            NamUsSfc => "archives/sfc/{year}/namussfc{year}{month}{day}{hour}.gif",
            UsFntSfc => "archives/sfc/{year}/usfntsfc{year}{month}{day}{hour}.gif",
            PrintUs => "archives/sfc/{year}/print_us{year}{month}{day}{hour}.gif",
            UsSatSfc => "archives/sfc/{year}/ussatsfc{year}{month}{day}{hour}.gif",
            RadSfcUsExp => "archives/sfc/{year}/radsfcus_exp{year}{month}{day}{hour}.gif",
            NamFntSfc => "archives/sfc/{year}/namfntsfc{year}{month}{day}{hour}.gif",
            SatSfcNps => "archives/sfc/{year}/satsfcnps{year}{month}{day}{hour}.gif",
        }
    }

    /// Build the url of the map image for a date and hour (UTC).
    pub fn remote_url(self, date: NaiveDate, hour: u32) -> String {
        let path = self
            .url_template()
            .replace("{year}", &format!("{:04}", date.year()))
            .replace("{month}", &format!("{:02}", date.month()))
            .replace("{day}", &format!("{:02}", date.day()))
            .replace("{hour}", &format!("{:02}", hour));

        format!("{}{}", HOST_URL, path)
    }

    /// Build the url of the archive web page that displays this map.
    pub fn page_url(self, date: NaiveDate, hour: u32) -> String {
        format!(
            "{}{}?arcdate={:02}/{:02}/{}&selmap={}{:02}{:02}{:02}&maptype={}",
            HOST_URL,
            PAGE_PATH,
            date.month(),
            date.day(),
            date.year(),
            date.year(),
            date.month(),
            date.day(),
            hour,
            self.code()
        )
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
