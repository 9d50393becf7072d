//! Time sources and the sidereal clock.
//!
//! A sidereal day is the time the earth needs for one turn relative to the
//! stars: 23h56m4.091s of solar time. The pointer only ever needs the local
//! sidereal angle, which is derived here from whole unix seconds using integer
//! millisecond arithmetic. The cumulative drift of that shortcut is about one
//! millisecond per day.

use std::cell::Cell;
use std::f64::consts::TAU;

/// Length of a mean sidereal day in solar milliseconds.
pub const SIDEREAL_DAY_MS: i64 = 86_164_091;

/// Unix time in milliseconds at which the Greenwich sidereal angle was zero.
///
/// Calibrated on 2019-01-01T00:00:00Z, where Greenwich sidereal time is
/// 6.6907020497 h, i.e. 24_020_761 ms into the sidereal day.
pub const SIDEREAL_EPOCH_MS: i64 = 1_546_276_779_239;

/// Unix time of 1999-12-31T00:00:00Z, day 0 of the ephemeris day count.
pub const EPHEMERIS_EPOCH: i64 = 946_684_800 - 86_400;

/// Local sidereal angle in radians, `[0, 2π)`, for unix time `t` (seconds)
/// and an observer at `lng_deg` degrees east.
pub fn sidereal_angle(t: i64, lng_deg: f64) -> f64 {
    let correction = (lng_deg * SIDEREAL_DAY_MS as f64 / 360.0) as i64;
    let ms = (t * 1000 - SIDEREAL_EPOCH_MS + correction).rem_euclid(SIDEREAL_DAY_MS);
    ms as f64 * TAU / SIDEREAL_DAY_MS as f64
}

/// Fractional days since [`EPHEMERIS_EPOCH`], the time argument of every
/// orbital element.
pub fn ephemeris_day(t: i64) -> f64 {
    (t - EPHEMERIS_EPOCH) as f64 / 86_400.0
}

/// The civil time source, in seconds since the unix epoch.
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock that only moves when told to. Drives demo runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(t: i64) -> ManualClock {
        ManualClock { now: Cell::new(t) }
    }

    pub fn set(&self, t: i64) {
        self.now.set(t);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.get()
    }
}
