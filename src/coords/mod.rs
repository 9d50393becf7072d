//! Sky coordinates and the equatorial to horizontal transform.

pub mod equatorial;
pub mod horizon;
pub mod location;

pub use equatorial::{EclipticVector, EquatorialVector};
pub use horizon::{AzAlt, HorizonVector, HourAngleVector};
pub use location::Location;

/// Right ascension in hours `[0, 24)` and declination in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    pub ra_hours: f64,
    pub dec_degrees: f64,
}

impl Equatorial {
    pub const fn new(ra_hours: f64, dec_degrees: f64) -> Equatorial {
        Equatorial {
            ra_hours,
            dec_degrees,
        }
    }
}

/// Azimuth `[0, 360)` and altitude in degrees of `target` for an observer at
/// latitude `lat_deg` whose local sidereal angle is `sidereal` radians.
pub fn transform(target: Equatorial, lat_deg: f64, sidereal: f64) -> AzAlt {
    let ra = target.ra_hours / 12.0 * std::f64::consts::PI;
    let hour_angle = sidereal - ra;
    HourAngleVector::new(hour_angle, target.dec_degrees.to_radians())
        .to_horizon(lat_deg.to_radians())
        .to_azalt()
}

#[cfg(test)]
mod test {
    use super::*;

    // 2024-06-15T21:30:00Z
    const T: i64 = 1_718_487_000;

    #[test]
    fn vega_from_utrecht() {
        let utrecht = Location::from_index(0).unwrap();
        let sidereal = utrecht.sidereal_angle(T);
        assert_approx_eq!(sidereal, 4.05386, 1e-4);

        // reference from sin(alt) = sin(lat) sin(dec) + cos(lat) cos(dec) cos(H)
        let AzAlt { az, alt } = transform(Equatorial::new(18.616, 38.784), utrecht.lat, sidereal);
        assert_approx_eq!(az, 93.497, 0.1);
        assert_approx_eq!(alt, 55.187, 0.1);
    }

    #[test]
    fn arcturus_and_dubhe_from_utrecht() {
        let utrecht = Location::from_index(0).unwrap();
        let sidereal = utrecht.sidereal_angle(T);

        let arcturus = transform(Equatorial::new(14.261, 19.182), utrecht.lat, sidereal);
        assert_approx_eq!(arcturus.az, 210.474, 0.1);
        assert_approx_eq!(arcturus.alt, 54.097, 0.1);

        let dubhe = transform(Equatorial::new(11.062, 61.751), utrecht.lat, sidereal);
        assert_approx_eq!(dubhe.az, 312.074, 0.1);
        assert_approx_eq!(dubhe.alt, 54.265, 0.1);
    }

    #[test]
    fn transit_altitude() {
        // an object on the meridian culminates at 90 - lat + dec
        let lat = 52.09;
        let sidereal = 5.0 / 12.0 * std::f64::consts::PI;
        let azalt = transform(Equatorial::new(5.0, 20.0), lat, sidereal);
        assert_approx_eq!(azalt.alt, 90.0 - lat + 20.0);
        assert_approx_eq!(azalt.az, 180.0);
    }

    #[test]
    fn azimuth_is_in_range() {
        for n in 0..200 {
            let ra = (n as f64 * 0.37) % 24.0;
            let dec = -89.0 + (n as f64 * 7.3) % 178.0;
            let azalt = transform(Equatorial::new(ra, dec), 33.77, n as f64 * 0.1);
            assert!((0.0..360.0).contains(&azalt.az), "{azalt:?}");
            assert!((-90.0..=90.0).contains(&azalt.alt), "{azalt:?}");
        }
    }
}
