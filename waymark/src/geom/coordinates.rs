use waymark_types::{InvalidLocation, Location};

/// Validated coordinates in degrees, as handed to backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Coordinates {
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
}

impl Coordinates {
    /// Creates new coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinates rounded to `precision` decimal places.
    pub fn rounded(&self, precision: u8) -> Self {
        let factor = 10f64.powi(i32::from(precision));
        Self {
            x: (self.x * factor).round() / factor,
            y: (self.y * factor).round() / factor,
        }
    }

    /// Writes `x`, `separator` and `y` to `out` with at most `precision` decimal places and no
    /// trailing zeros.
    pub fn append_to_string(&self, out: &mut String, separator: char, precision: usize) {
        append_number(out, self.x, precision);
        out.push(separator);
        append_number(out, self.y, precision);
    }
}

impl TryFrom<Location> for Coordinates {
    type Error = InvalidLocation;

    fn try_from(location: Location) -> Result<Self, Self::Error> {
        Ok(Self {
            x: location.lon()?,
            y: location.lat()?,
        })
    }
}

fn append_number(out: &mut String, value: f64, precision: usize) {
    let formatted = format!("{value:.precision$}");
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    if trimmed == "-0" {
        out.push('0');
    } else {
        out.push_str(trimmed);
    }
}
