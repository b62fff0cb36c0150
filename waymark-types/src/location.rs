//! Fixed precision geographic coordinates.

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::InvalidLocation;

/// Number of fixed point units in one degree.
pub const COORDINATE_PRECISION: i32 = 10_000_000;

const UNDEFINED_COORDINATE: i32 = i32::MAX;

/// Longitude/latitude pair stored as integers in units of 1e-7 degree.
///
/// Two locations describe the same point if and only if they compare equal. The [`Default`] value is
/// [`Location::UNDEFINED`], a sentinel that every geometry operation rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    x: i32,
    y: i32,
}

impl Location {
    /// Location that does not point anywhere.
    pub const UNDEFINED: Location = Location {
        x: UNDEFINED_COORDINATE,
        y: UNDEFINED_COORDINATE,
    };

    /// Creates a location from longitude and latitude in degrees.
    ///
    /// Values are rounded to the nearest fixed point unit. A NaN or infinite value leaves that
    /// coordinate undefined, so the location is never valid.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            x: double_to_fix(lon),
            y: double_to_fix(lat),
        }
    }

    /// Creates a location from raw fixed point values.
    pub const fn from_fixed(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Raw fixed point longitude.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Raw fixed point latitude.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Whether the location is anything other than [`Location::UNDEFINED`].
    pub fn is_defined(&self) -> bool {
        self.x != UNDEFINED_COORDINATE || self.y != UNDEFINED_COORDINATE
    }

    /// Whether the location is defined and inside of the -180..=180 / -90..=90 degree range.
    pub fn is_valid(&self) -> bool {
        (-180 * COORDINATE_PRECISION..=180 * COORDINATE_PRECISION).contains(&self.x)
            && (-90 * COORDINATE_PRECISION..=90 * COORDINATE_PRECISION).contains(&self.y)
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> Result<f64, InvalidLocation> {
        if self.is_valid() {
            Ok(fix_to_double(self.x))
        } else {
            Err(InvalidLocation)
        }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> Result<f64, InvalidLocation> {
        if self.is_valid() {
            Ok(fix_to_double(self.y))
        } else {
            Err(InvalidLocation)
        }
    }

    /// Longitude in degrees without the validity check.
    pub fn lon_unchecked(&self) -> f64 {
        fix_to_double(self.x)
    }

    /// Latitude in degrees without the validity check.
    pub fn lat_unchecked(&self) -> f64 {
        fix_to_double(self.y)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_defined() {
            write!(f, "({},{})", self.lon_unchecked(), self.lat_unchecked())
        } else {
            write!(f, "(undefined,undefined)")
        }
    }
}

impl From<(f64, f64)> for Location {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

/// Non-finite values map to the undefined coordinate.
fn double_to_fix(value: f64) -> i32 {
    if !value.is_finite() {
        return UNDEFINED_COORDINATE;
    }

    (value * COORDINATE_PRECISION as f64).round() as i32
}

fn fix_to_double(value: i32) -> f64 {
    value as f64 / COORDINATE_PRECISION as f64
}

/// Anything that sits at a single [`Location`]: a location itself, a node or a node reference.
pub trait HasLocation {
    /// Location of the object. May be [`Location::UNDEFINED`].
    fn location(&self) -> Location;
}

impl HasLocation for Location {
    fn location(&self) -> Location {
        *self
    }
}

/// Creates a new [`Location`] from longitude and latitude values (in degrees).
///
/// ```
/// use waymark_types::lonlat;
///
/// let location = lonlat!(3.2, 4.2);
/// assert_eq!(location.lon(), Ok(3.2));
/// assert_eq!(location.lat(), Ok(4.2));
/// ```
#[macro_export]
macro_rules! lonlat {
    ($lon:expr, $lat:expr) => {
        ::waymark_types::Location::new($lon, $lat)
    };
}
