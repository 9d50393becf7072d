//! The selectable pointing targets: the Sun, Moon and planets, followed by a
//! handful of bright stars.

use crate::coords::Equatorial;
use crate::ephem::Body;
use crate::error::{Error, Result};

/// Highest valid object index.
pub const MAX_OBJECT_INDEX: usize = Body::ALL.len() + STARS.len() - 1;

/// A fixed star, J2000 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub name: &'static str,
    pub ra_hours: f64,
    pub dec_degrees: f64,
}

/// Stars follow the bodies in index order, starting at 9.
pub const STARS: [Star; 6] = [
    Star {
        name: "Arcturus",
        ra_hours: 14.261,
        dec_degrees: 19.182,
    },
    Star {
        name: "Vega",
        ra_hours: 18.616,
        dec_degrees: 38.784,
    },
    // Dubhe and Capella are circumpolar from mid-northern latitudes
    Star {
        name: "Dubhe",
        ra_hours: 11.062,
        dec_degrees: 61.751,
    },
    Star {
        name: "Capella",
        ra_hours: 5.278,
        dec_degrees: 45.998,
    },
    Star {
        name: "Castor",
        ra_hours: 7.577,
        dec_degrees: 31.888,
    },
    Star {
        name: "Alcyone",
        ra_hours: 3.7914,
        dec_degrees: 24.105,
    },
];

/// Something the pointer can aim at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CelestialObject {
    Body(Body),
    FixedStar(Star),
}

impl CelestialObject {
    /// 0-8 are [`Body::ALL`], 9 and up index [`STARS`].
    pub fn from_index(index: usize) -> Result<CelestialObject> {
        if let Some(body) = Body::from_index(index) {
            return Ok(CelestialObject::Body(body));
        }
        STARS
            .get(index - Body::ALL.len())
            .map(|star| CelestialObject::FixedStar(*star))
            .ok_or(Error::UnknownObject(index))
    }

    /// The index after `index`, wrapping past the last star back to the Sun.
    pub fn next_index(index: usize) -> usize {
        if index >= MAX_OBJECT_INDEX {
            0
        } else {
            index + 1
        }
    }

    pub fn index(&self) -> usize {
        match self {
            CelestialObject::Body(body) => body.index(),
            CelestialObject::FixedStar(star) => {
                let offset = STARS.iter().position(|s| s.name == star.name).unwrap_or(0);
                Body::ALL.len() + offset
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CelestialObject::Body(body) => body.name(),
            CelestialObject::FixedStar(star) => star.name,
        }
    }

    /// Geocentric RA/Dec at unix time `t`. Stars ignore the time.
    pub fn equatorial(&self, t: i64) -> Equatorial {
        match self {
            CelestialObject::Body(body) => body.position(t),
            CelestialObject::FixedStar(star) => Equatorial::new(star.ra_hours, star.dec_degrees),
        }
    }

    /// All objects in index order.
    pub fn all() -> impl Iterator<Item = CelestialObject> {
        (0..=MAX_OBJECT_INDEX).filter_map(|i| CelestialObject::from_index(i).ok())
    }
}
