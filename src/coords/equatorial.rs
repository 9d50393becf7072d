use std::ops::Add;

use super::Equatorial;
use crate::ephem::math::fmod2p;

/// Cartesian position in the ecliptic frame, x towards the vernal equinox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EclipticVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Cartesian position in the equatorial frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquatorialVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EclipticVector {
    pub fn new(x: f64, y: f64, z: f64) -> EclipticVector {
        EclipticVector { x, y, z }
    }

    /// From ecliptic longitude and latitude (radians) and distance.
    pub fn from_spherical(lon: f64, lat: f64, r: f64) -> EclipticVector {
        let (sin_lon, cos_lon) = lon.sin_cos();
        let (sin_lat, cos_lat) = lat.sin_cos();
        EclipticVector {
            x: r * cos_lon * cos_lat,
            y: r * sin_lon * cos_lat,
            z: r * sin_lat,
        }
    }

    pub fn longitude(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn latitude(&self) -> f64 {
        self.z.atan2(self.x.hypot(self.y))
    }

    pub fn distance(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Rotates around the x axis by the obliquity of the ecliptic.
    pub fn to_equatorial(self, obliquity: f64) -> EquatorialVector {
        let (sin_e, cos_e) = obliquity.sin_cos();
        EquatorialVector {
            x: self.x,
            y: self.y * cos_e - self.z * sin_e,
            z: self.y * sin_e + self.z * cos_e,
        }
    }
}

impl Add for EclipticVector {
    type Output = EclipticVector;
    fn add(self, other: EclipticVector) -> EclipticVector {
        EclipticVector {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl EquatorialVector {
    pub fn to_radec(self) -> Equatorial {
        let ra = fmod2p(self.y.atan2(self.x));
        let dec = (self.z / self.x.hypot(self.y)).atan();
        // fmod2p can round up to exactly 2pi for tiny negative angles
        let ra_hours = (ra.to_degrees() / 15.0) % 24.0;
        Equatorial::new(ra_hours, dec.to_degrees())
    }
}
