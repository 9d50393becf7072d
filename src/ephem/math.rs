use std::f64::consts::TAU;

/// Stop iterating Kepler's equation once a correction is below 0.05 degrees.
pub const KEPLER_TOLERANCE: f64 = 0.000_872_664;

/// Newton's method converges in a handful of steps for e < 0.3; the cap only
/// guards against non-finite input.
const KEPLER_MAX_ITERATIONS: usize = 32;

/// First-order eccentric anomaly, good enough for near-circular orbits.
pub fn eccentric_anomaly_approx(mean_anomaly: f64, e: f64) -> f64 {
    mean_anomaly + e * mean_anomaly.sin() * (1.0 + e * mean_anomaly.cos())
}

/// Eccentric anomaly solved from `M = E - e sin E`.
pub fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = eccentric_anomaly_approx(mean_anomaly, e);
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let next = ecc - (ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        let delta = ecc - next;
        ecc = next;
        if delta.abs() <= KEPLER_TOLERANCE {
            break;
        }
    }
    ecc
}

/// True anomaly and distance for eccentric anomaly `ecc` on an orbit with
/// semi-major axis `a` and eccentricity `e`.
pub fn true_anomaly(a: f64, e: f64, ecc: f64) -> (f64, f64) {
    let xv = a * (ecc.cos() - e);
    let yv = a * ((1.0 - e * e).sqrt() * ecc.sin());
    (yv.atan2(xv), xv.hypot(yv))
}

/// Returns mod 2pi of argument
pub fn fmod2p(x: f64) -> f64 {
    x.rem_euclid(TAU)
}
