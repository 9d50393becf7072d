use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Highest index of [`LOCATIONS`].
pub const MAX_LOCATION_INDEX: usize = LOCATIONS.len() - 1;

/// Observer position in degrees, north and east positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Built-in observer sites, selectable by index.
pub const LOCATIONS: [(&str, Location); 5] = [
    ("Utrecht NL", Location::new(52.091702, 5.119823)),
    ("Nordkapp NO", Location::new(71.169356, 25.786090)),
    ("Singapore SG", Location::new(1.297808, 103.853796)),
    ("Boise ID", Location::new(43.6009089, -116.3041092)),
    ("Atlanta GA", Location::new(33.7678358, -84.4908155)),
];

impl Location {
    pub const fn new(lat: f64, lng: f64) -> Location {
        Location { lat, lng }
    }

    pub fn from_index(index: usize) -> Result<Location> {
        LOCATIONS
            .get(index)
            .map(|(_, location)| *location)
            .ok_or(Error::UnknownLocation(index))
    }

    /// Local sidereal angle in radians at unix time `t`.
    pub fn sidereal_angle(&self, t: i64) -> f64 {
        crate::time::sidereal_angle(t, self.lng)
    }
}
