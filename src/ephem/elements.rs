//! Orbital element tables.
//!
//! Every element is a linear function of the ephemeris day `d` (see
//! [`crate::time::ephemeris_day`]). Angles are stored in radians; the degree
//! values they were derived from are kept alongside for reference.
//! Source: Paul Schlyter, "How to compute planetary positions".

/// `base + rate * d`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    pub base: f64,
    pub rate: f64,
}

impl Linear {
    pub const fn new(base: f64, rate: f64) -> Linear {
        Linear { base, rate }
    }

    pub const fn fixed(base: f64) -> Linear {
        Linear { base, rate: 0.0 }
    }

    #[inline]
    pub fn at(&self, d: f64) -> f64 {
        self.base + self.rate * d
    }
}

/// The six Keplerian elements of a heliocentric (geocentric for the Moon)
/// orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Longitude of the ascending node
    pub node: Linear,
    /// Inclination to the ecliptic
    pub inclination: Linear,
    /// Argument of perihelion
    pub perihelion: Linear,
    /// AU, earth radii for the Moon
    pub semi_major_axis: Linear,
    pub eccentricity: Linear,
    pub mean_anomaly: Linear,
}

/// [`OrbitalElements`] evaluated on one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub node: f64,
    pub inclination: f64,
    pub perihelion: f64,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub mean_anomaly: f64,
}

impl OrbitalElements {
    pub fn at(&self, d: f64) -> Orbit {
        Orbit {
            node: self.node.at(d),
            inclination: self.inclination.at(d),
            perihelion: self.perihelion.at(d),
            semi_major_axis: self.semi_major_axis.at(d),
            eccentricity: self.eccentricity.at(d),
            mean_anomaly: self.mean_anomaly.at(d),
        }
    }
}

// The Sun's orbit is the earth's, seen from the other side: node and
// inclination are zero and the mean distance is 1 AU.

/// 282.9404 + 4.70935E-05 * d
pub const SUN_PERIHELION: Linear = Linear::new(4.93824156690976, 8.219366312880E-7);
pub const SUN_ECCENTRICITY: Linear = Linear::new(0.016709, -1.151E-09);
/// 356.0470 + 0.9856002585 * d
pub const SUN_MEAN_ANOMALY: Linear = Linear::new(6.21419244184825, 1.720196961933E-2);

/// Obliquity of the ecliptic, 23.4393 - 3.563E-7 * d
pub const OBLIQUITY: Linear = Linear::new(0.409092959362707, -6.218608124856E-9);

pub const MERCURY: OrbitalElements = OrbitalElements {
    node: Linear::new(0.843540316769135, 5.665111859171E-7), // 48.3313 + 3.24587E-5 * d
    inclination: Linear::new(0.122255078114447, 8.726646259972E-10), // 7.0047 + 5.00E-8 * d
    perihelion: Linear::new(0.508311436680081, 1.770531806393E-7), // 29.1241 + 1.01444E-5 * d
    semi_major_axis: Linear::fixed(0.387098),
    eccentricity: Linear::new(0.205635, 5.59E-10),
    mean_anomaly: Linear::new(2.94360599390206, 7.142471001491E-2), // 168.6562 + 4.0923344368 * d
};

pub const VENUS: OrbitalElements = OrbitalElements {
    node: Linear::new(1.3383167251, 4.303807402493E-7), // 76.6799 + 2.46590E-5 * d
    inclination: Linear::new(0.0592469467881995, 4.799655442984E-10), // 3.3946 + 2.75E-8 * d
    perihelion: Linear::new(0.958028679712207, 2.415081899155E-7), // 54.8910 + 1.38374E-5 * d
    semi_major_axis: Linear::fixed(0.723330),
    eccentricity: Linear::new(0.006773, -1.302E-9),
    mean_anomaly: Linear::new(0.837848798078382, 2.796244746150E-2), // 48.0052 + 1.6021302244 * d
};

pub const MOON: OrbitalElements = OrbitalElements {
    node: Linear::new(2.18380482931436, -9.242183063049E-4), // 125.1228 - 0.0529538083 * d
    inclination: Linear::fixed(0.0898041713321162),          // 5.1454
    perihelion: Linear::new(5.55125356008773, 2.868576423897E-3), // 318.0634 + 0.1643573223 * d
    semi_major_axis: Linear::fixed(60.2666),
    eccentricity: Linear::fixed(0.0549),
    mean_anomaly: Linear::new(2.01350607288027, 2.280271437431E-1), // 115.3654 + 13.0649929509 * d
};

pub const MARS: OrbitalElements = OrbitalElements {
    node: Linear::new(0.864939798727838, 3.68405843840215E-7), // 49.5574 + 2.11081E-5 * d
    inclination: Linear::new(0.0322833551741391, -3.10668606854991E-10), // 1.8497 - 1.78E-8 * d
    perihelion: Linear::new(5.00039623223179, 5.11313402993511E-7), // 286.5016 + 2.92961E-5 * d
    semi_major_axis: Linear::fixed(1.523688),
    eccentricity: Linear::new(0.093405, 2.516E-9),
    mean_anomaly: Linear::new(0.324667892785237, 9.14588790052766E-3), // 18.6021 + 0.5240207766 * d
};

pub const JUPITER: OrbitalElements = OrbitalElements {
    node: Linear::new(1.75325653745689, 4.832013847316E-7), // 100.4542 + 2.76854E-5 * d
    inclination: Linear::new(0.0227416401534861, -2.717477645355E-9), // 1.3030 - 1.557E-7 * d
    perihelion: Linear::new(4.78006761278927, 2.871153885993E-7), // 273.8777 + 1.64505E-5 * d
    semi_major_axis: Linear::fixed(5.20256),
    eccentricity: Linear::new(0.048498, 4.469E-9),
    mean_anomaly: Linear::new(0.347233254684272, 1.450112046753E-3), // 19.8950 + 0.0830853001 * d
};

pub const SATURN: OrbitalElements = OrbitalElements {
    node: Linear::new(1.98380056901132, 4.170987846416E-7), // 113.6634 + 2.38980E-5 * d
    inclination: Linear::new(0.0434342637651309, -1.886700921406E-9), // 2.4886 - 1.081E-7 * d
    perihelion: Linear::new(5.92354101618438, 5.195164504779E-7), // 339.3939 + 2.97661E-5 * d
    semi_major_axis: Linear::fixed(9.55475),
    eccentricity: Linear::new(0.055546, -9.499E-9),
    mean_anomaly: Linear::new(5.53211777016887, 5.837118978783E-4), // 316.9670 + 0.0334442282 * d
};

pub const URANUS: OrbitalElements = OrbitalElements {
    node: Linear::new(1.29155237312206, 2.439621228438E-7), // 74.0005 + 1.3978E-5 * d
    inclination: Linear::new(0.0134966311056722, 3.316125578789E-10), // 0.7733 + 1.9E-8 * d
    perihelion: Linear::new(1.68705619892874, 5.334598858721E-7), // 96.6612 + 3.0565E-5 * d
    semi_major_axis: Linear::new(19.18171, -1.55E-8),
    eccentricity: Linear::new(0.047318, 7.45E-9),
    mean_anomaly: Linear::new(2.48867370706497, 2.046539221501E-4), // 142.5905 + 0.011725806 * d
};

pub const NEPTUNE: OrbitalElements = OrbitalElements {
    node: Linear::new(2.30000536025364, 5.266181952043E-7), // 131.7806 + 3.0173E-5 * d
    inclination: Linear::new(0.0308923277602996, -4.450589592586E-9), // 1.7700 - 2.55E-7 * d
    perihelion: Linear::new(4.7620627962257, -1.051909940177E-7), // 272.8461 - 6.027E-6 * d
    semi_major_axis: Linear::new(30.05826, 3.313E-8),
    eccentricity: Linear::new(0.008606, 2.15E-9),
    mean_anomaly: Linear::new(4.54216876376693, 1.046350542911E-4), // 260.2471 + 0.005995147 * d
};

/// Whether a periodic term uses a sine or a cosine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sin,
    Cos,
}

/// One periodic correction: `amplitude * wave(k · args + phase)`.
///
/// The Moon's terms take `[M, D, Ms, F]` as arguments (its mean anomaly, mean
/// elongation, the Sun's mean anomaly and its argument of latitude). The
/// giant planets take `[Mj, Ms, Mu, 0]`, the mean anomalies of Jupiter,
/// Saturn and Uranus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub amplitude: f64,
    pub wave: Wave,
    pub multipliers: [f64; 4],
    pub phase: f64,
}

impl Term {
    const fn sin(amplitude: f64, multipliers: [f64; 4], phase: f64) -> Term {
        Term {
            amplitude,
            wave: Wave::Sin,
            multipliers,
            phase,
        }
    }

    const fn cos(amplitude: f64, multipliers: [f64; 4], phase: f64) -> Term {
        Term {
            amplitude,
            wave: Wave::Cos,
            multipliers,
            phase,
        }
    }

    pub fn eval(&self, args: &[f64; 4]) -> f64 {
        let angle = self
            .multipliers
            .iter()
            .zip(args)
            .fold(self.phase, |acc, (k, a)| acc + k * a);
        match self.wave {
            Wave::Sin => self.amplitude * angle.sin(),
            Wave::Cos => self.amplitude * angle.cos(),
        }
    }
}

/// Periodic corrections to the ecliptic longitude, latitude (both radians)
/// and distance.
#[derive(Debug, Clone, Copy)]
pub struct Perturbations {
    pub longitude: &'static [Term],
    pub latitude: &'static [Term],
    pub distance: &'static [Term],
}

impl Perturbations {
    fn sum(terms: &[Term], args: &[f64; 4]) -> f64 {
        terms.iter().map(|t| t.eval(args)).sum()
    }

    /// Corrections `(longitude, latitude, distance)` for the given arguments.
    pub fn apply(&self, args: &[f64; 4]) -> (f64, f64, f64) {
        (
            Self::sum(self.longitude, args),
            Self::sum(self.latitude, args),
            Self::sum(self.distance, args),
        )
    }
}

pub const MOON_PERTURBATIONS: Perturbations = Perturbations {
    longitude: &[
        Term::sin(-0.022235495, [1.0, -2.0, 0.0, 0.0], 0.0), // -1.274 evection
        Term::sin(0.011484266, [0.0, 2.0, 0.0, 0.0], 0.0),   // +0.658 variation
        Term::sin(-0.003246312, [0.0, 0.0, 1.0, 0.0], 0.0),  // -0.186 yearly equation
        Term::sin(-0.001029744, [2.0, -2.0, 0.0, 0.0], 0.0), // -0.059
        Term::sin(-0.000994838, [1.0, -2.0, 1.0, 0.0], 0.0), // -0.057
        Term::sin(0.000925025, [1.0, 2.0, 0.0, 0.0], 0.0),   // +0.053
        Term::sin(0.000802851, [0.0, 2.0, -1.0, 0.0], 0.0),  // +0.046
        Term::sin(0.000715585, [1.0, 0.0, -1.0, 0.0], 0.0),  // +0.041
        Term::sin(-0.000610865, [0.0, 1.0, 0.0, 0.0], 0.0),  // -0.035 parallactic equation
        Term::sin(-0.000541052, [1.0, 0.0, 1.0, 0.0], 0.0),  // -0.031
        Term::sin(-0.000261799, [0.0, -2.0, 0.0, 2.0], 0.0), // -0.015
        Term::sin(0.000191986, [1.0, -4.0, 0.0, 0.0], 0.0),  // +0.011
    ],
    latitude: &[
        Term::sin(-0.003019420, [0.0, -2.0, 0.0, 1.0], 0.0), // -0.173
        Term::sin(-0.000959931, [1.0, -2.0, 0.0, -1.0], 0.0), // -0.055
        Term::sin(-0.000802851, [1.0, -2.0, 0.0, 1.0], 0.0), // -0.046
        Term::sin(0.000575959, [0.0, 2.0, 0.0, 1.0], 0.0),   // +0.033
        Term::sin(0.000296706, [2.0, 0.0, 0.0, 1.0], 0.0),   // +0.017
    ],
    // earth radii
    distance: &[
        Term::cos(-0.58, [1.0, -2.0, 0.0, 0.0], 0.0),
        Term::cos(-0.46, [0.0, 2.0, 0.0, 0.0], 0.0),
    ],
};

pub const JUPITER_PERTURBATIONS: Perturbations = Perturbations {
    longitude: &[
        Term::sin(-0.005794493116621, [2.0, -5.0, 0.0, 0.0], -1.17984257434817), // -0.332, 67.6
        Term::sin(-0.000977384381117, [2.0, -2.0, 0.0, 0.0], 0.366519142918809), // -0.056, 21
        Term::sin(0.000733038285838, [3.0, -5.0, 0.0, 0.0], 0.366519142918809), // +0.042, 21
        Term::sin(-0.000628318530718, [1.0, -2.0, 0.0, 0.0], 0.0),               // -0.036
        Term::cos(0.000383972435439, [1.0, -1.0, 0.0, 0.0], 0.0),                // +0.022
        Term::sin(0.000401425727959, [2.0, -3.0, 0.0, 0.0], 0.907571211037051), // +0.023, 52
        Term::sin(-0.000279252680319, [1.0, -5.0, 0.0, 0.0], -1.20427718387609), // -0.016, 69
    ],
    latitude: &[],
    distance: &[],
};

pub const SATURN_PERTURBATIONS: Perturbations = Perturbations {
    longitude: &[
        Term::sin(0.014172073526194, [2.0, -5.0, 0.0, 0.0], -1.17984257434817), // +0.812, 67.6
        Term::cos(-0.003996803987067, [2.0, -4.0, 0.0, 0.0], -0.0349065850398866), // -0.229, 2
        Term::sin(0.002076941809873, [1.0, -2.0, 0.0, 0.0], -0.0523598775598299), // +0.119, 3
        Term::sin(0.000802851455917, [2.0, -6.0, 0.0, 0.0], -1.20427718387609), // +0.046, 69
        Term::sin(0.000244346095279, [1.0, -3.0, 0.0, 0.0], 0.558505360638185), // +0.014, 32
    ],
    latitude: &[
        Term::cos(-0.000349065850399, [2.0, -4.0, 0.0, 0.0], -0.0349065850398866), // -0.020, 2
        Term::sin(0.000314159265359, [2.0, -6.0, 0.0, 0.0], -0.855211333477221), // +0.018, 49
    ],
    distance: &[],
};

pub const URANUS_PERTURBATIONS: Perturbations = Perturbations {
    longitude: &[
        Term::sin(0.000698131700798, [0.0, 1.0, -2.0, 0.0], 0.10471975511966), // +0.040, 6
        Term::sin(0.000610865238198, [0.0, 1.0, -3.0, 0.0], 0.575958653158129), // +0.035, 33
        Term::sin(-0.000261799387799, [1.0, 0.0, -1.0, 0.0], 0.349065850398866), // -0.015, 20
    ],
    latitude: &[],
    distance: &[],
};
