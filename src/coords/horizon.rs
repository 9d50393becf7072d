/// Unit vector in the hour-angle/declination frame: `(1, 0, 0)` is hour angle
/// 0 on the celestial equator, z points at the celestial pole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HourAngleVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Unit vector in the observer's horizon frame: x south, y west, z zenith.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizonVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Azimuth (degrees from north through east) and altitude (degrees).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AzAlt {
    pub az: f64,
    pub alt: f64,
}

impl HourAngleVector {
    /// From hour angle and declination, both radians.
    pub fn new(hour_angle: f64, dec: f64) -> HourAngleVector {
        let (sin_ha, cos_ha) = hour_angle.sin_cos();
        let (sin_dec, cos_dec) = dec.sin_cos();
        HourAngleVector {
            x: cos_ha * cos_dec,
            y: sin_ha * cos_dec,
            z: sin_dec,
        }
    }

    /// Tilts the frame about the east-west axis by the observer latitude.
    pub fn to_horizon(self, lat: f64) -> HorizonVector {
        let (sin_lat, cos_lat) = lat.sin_cos();
        HorizonVector {
            x: self.x * sin_lat - self.z * cos_lat,
            y: self.y,
            z: self.x * cos_lat + self.z * sin_lat,
        }
    }
}

impl HorizonVector {
    pub fn to_azalt(self) -> AzAlt {
        // x points south, so half a turn brings zero azimuth round to north
        let az = self.y.atan2(self.x) + std::f64::consts::PI;
        let alt = self.z.atan2(self.x.hypot(self.y));
        AzAlt {
            az: az.to_degrees().rem_euclid(360.0),
            alt: alt.to_degrees(),
        }
    }
}
