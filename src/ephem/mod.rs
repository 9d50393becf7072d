//! Low-precision ephemeris for the Sun, Moon and planets.
//!
//! Positions come from mean orbital elements that vary linearly with time,
//! plus the largest periodic perturbations of the Moon, Jupiter, Saturn and
//! Uranus. Accuracy is in the arcminute range for a few decades around 2000.
//! There is no precession, nutation, aberration or topocentric (parallax)
//! correction; the Moon can therefore be off by up to a degree for an
//! observer on the earth's surface.
//!
//! Algorithm: Paul Schlyter, "How to compute planetary positions",
//! <http://www.stjarnhimlen.se/comp/ppcomp.html>.

pub mod elements;
pub(crate) mod math;
#[cfg(test)]
mod tests;

use elements::*;
use math::*;

use crate::coords::{EclipticVector, Equatorial};
use crate::time::ephemeris_day;

/// Solar system objects with a computed position, in object-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Moon,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    pub fn from_index(index: usize) -> Option<Body> {
        Body::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }

    /// Orbital elements; `None` for the Sun, whose orbit is the earth's.
    pub fn elements(self) -> Option<&'static OrbitalElements> {
        match self {
            Body::Sun => None,
            Body::Mercury => Some(&MERCURY),
            Body::Venus => Some(&VENUS),
            Body::Moon => Some(&MOON),
            Body::Mars => Some(&MARS),
            Body::Jupiter => Some(&JUPITER),
            Body::Saturn => Some(&SATURN),
            Body::Uranus => Some(&URANUS),
            Body::Neptune => Some(&NEPTUNE),
        }
    }

    fn perturbations(self) -> Option<&'static Perturbations> {
        match self {
            Body::Moon => Some(&MOON_PERTURBATIONS),
            Body::Jupiter => Some(&JUPITER_PERTURBATIONS),
            Body::Saturn => Some(&SATURN_PERTURBATIONS),
            Body::Uranus => Some(&URANUS_PERTURBATIONS),
            _ => None,
        }
    }

    /// Orbits the earth rather than the Sun.
    pub fn is_geocentric(self) -> bool {
        self == Body::Moon
    }

    /// Geocentric right ascension and declination at unix time `t`.
    pub fn position(self, t: i64) -> Equatorial {
        position(self, t)
    }
}

/// The Sun as seen from the earth on day `d`.
#[derive(Debug, Clone, Copy)]
struct Sun {
    mean_anomaly: f64,
    perihelion: f64,
    /// True ecliptic longitude, radians
    longitude: f64,
    /// AU
    distance: f64,
}

impl Sun {
    fn at(d: f64) -> Sun {
        let perihelion = SUN_PERIHELION.at(d);
        let e = SUN_ECCENTRICITY.at(d);
        let mean_anomaly = SUN_MEAN_ANOMALY.at(d);

        // the earth's orbit is close enough to circular for a single step
        let ecc = eccentric_anomaly_approx(mean_anomaly, e);
        let (v, distance) = true_anomaly(1.0, e, ecc);

        Sun {
            mean_anomaly,
            perihelion,
            longitude: v + perihelion,
            distance,
        }
    }

    fn vector(&self) -> EclipticVector {
        EclipticVector::from_spherical(self.longitude, 0.0, self.distance)
    }
}

/// Arguments of the periodic terms, in the order [`Term`] documents.
fn perturbation_args(body: Body, orbit: &Orbit, sun: &Sun, d: f64) -> [f64; 4] {
    if body == Body::Moon {
        let sun_mean_longitude = sun.mean_anomaly + sun.perihelion;
        let moon_mean_longitude = orbit.mean_anomaly + orbit.perihelion + orbit.node;
        let elongation = moon_mean_longitude - sun_mean_longitude;
        let latitude_argument = moon_mean_longitude - orbit.node;
        [
            orbit.mean_anomaly,
            elongation,
            sun.mean_anomaly,
            latitude_argument,
        ]
    } else {
        [
            JUPITER.mean_anomaly.at(d),
            SATURN.mean_anomaly.at(d),
            URANUS.mean_anomaly.at(d),
            0.0,
        ]
    }
}

/// Position of `body` relative to what it orbits, in ecliptic coordinates,
/// including perturbations.
fn orbital_position(body: Body, orbit: &Orbit, sun: &Sun, d: f64) -> EclipticVector {
    let Orbit {
        node,
        inclination,
        perihelion,
        semi_major_axis,
        eccentricity,
        mean_anomaly,
    } = *orbit;

    let ecc = eccentric_anomaly(mean_anomaly, eccentricity);
    let (v, r) = true_anomaly(semi_major_axis, eccentricity, ecc);

    let (sin_n, cos_n) = node.sin_cos();
    let (sin_vw, cos_vw) = (v + perihelion).sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let raw = EclipticVector::new(
        r * (cos_n * cos_vw - sin_n * sin_vw * cos_i),
        r * (sin_n * cos_vw + cos_n * sin_vw * cos_i),
        r * (sin_vw * sin_i),
    );

    let Some(perturbations) = body.perturbations() else {
        return raw;
    };

    let args = perturbation_args(body, orbit, sun, d);
    let (d_lon, d_lat, d_r) = perturbations.apply(&args);
    EclipticVector::from_spherical(
        raw.longitude() + d_lon,
        raw.latitude() + d_lat,
        r + d_r,
    )
}

/// Geocentric right ascension and declination of `body` at unix time `t`.
pub fn position(body: Body, t: i64) -> Equatorial {
    let d = ephemeris_day(t);
    let sun = Sun::at(d);

    let geocentric = match body.elements() {
        None => sun.vector(),
        Some(elements) => {
            let orbit = elements.at(d);
            let own = orbital_position(body, &orbit, &sun, d);
            if body.is_geocentric() {
                own
            } else {
                own + sun.vector()
            }
        }
    };

    geocentric.to_equatorial(OBLIQUITY.at(d)).to_radec()
}
