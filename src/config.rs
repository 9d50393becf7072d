//! Pointer configuration.
//!
//! Loaded from `--config <path>` or `~/.skypointer/config.toml`. Every key is
//! optional; a missing default file means the stock 28BYJ-48 build.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::coords::location::MAX_LOCATION_INDEX;
use crate::coords::Location;
use crate::error::{Error, Result};
use crate::object::{CelestialObject, MAX_OBJECT_INDEX};
use crate::pointer::Geometry;
use crate::stepper::store::REGISTER_MIN;
use crate::stepper::MotorSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub steps_per_revolution: i32,
    pub azimuth_first_pin: u8,
    pub altitude_first_pin: u8,
    pub step_delay_fast_ms: u64,
    /// Cadence while jogging by hand.
    pub step_delay_slow_ms: u64,
    pub slop_steps: i32,
    /// Lowest altitude in motor ticks; -200 is about -35 degrees.
    pub altitude_limit: i32,
    /// Jog iterations at the slow cadence before speeding up.
    pub jog_speedup_after: u32,
    /// Index into the object table.
    pub object: usize,
    /// Index into the built-in locations, unless `latitude` and `longitude`
    /// are both given.
    pub location: usize,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Seconds between control cycles when tracking.
    pub cycle_seconds: u64,
    /// Simulated seconds per cycle in demo mode.
    pub demo_advance_seconds: i64,
    /// Defaults to `position.bin` beside the config file.
    pub register_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            steps_per_revolution: 2048,
            azimuth_first_pin: 2,
            altitude_first_pin: 6,
            step_delay_fast_ms: 4,
            step_delay_slow_ms: 20,
            slop_steps: 0,
            altitude_limit: -200,
            jog_speedup_after: 20,
            object: 0,
            location: 0,
            latitude: None,
            longitude: None,
            cycle_seconds: 40,
            demo_advance_seconds: 300,
            register_file: None,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file yields the
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("no config file, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        let contents = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let config = Self::parse(&contents, &path)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate the contents of a config file read from `path`.
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// The default config file path: `~/.skypointer/config.toml`.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    fn dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".skypointer"))
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));
        let spr = self.steps_per_revolution;

        if spr <= 0 || spr % 4 != 0 {
            return invalid(format!(
                "steps-per-revolution must be a positive multiple of 4, got {spr}"
            ));
        }
        if self.step_delay_fast_ms == 0 {
            return invalid("step-delay-fast-ms must be at least 1".into());
        }
        if self.step_delay_slow_ms < self.step_delay_fast_ms {
            return invalid(format!(
                "step-delay-slow-ms ({}) is shorter than step-delay-fast-ms ({})",
                self.step_delay_slow_ms, self.step_delay_fast_ms
            ));
        }
        if self.slop_steps < 0 {
            return invalid(format!("slop-steps must not be negative, got {}", self.slop_steps));
        }
        if !(-spr..=spr).contains(&self.altitude_limit) {
            return invalid(format!(
                "altitude-limit {} is more than one revolution",
                self.altitude_limit
            ));
        }
        // lowest positions a move can pass through, overshoot included
        let slop = i64::from(self.slop_steps);
        let lowest_azimuth = -i64::from(spr / 2) - slop;
        let lowest_altitude = i64::from(self.altitude_limit) - slop;
        if lowest_azimuth < i64::from(REGISTER_MIN) {
            return invalid(format!(
                "steps-per-revolution {spr} with slop-steps {} reaches azimuth {lowest_azimuth}, \
                 below the register minimum {REGISTER_MIN}",
                self.slop_steps
            ));
        }
        if lowest_altitude < i64::from(REGISTER_MIN) {
            return invalid(format!(
                "altitude-limit {} with slop-steps {} reaches {lowest_altitude}, \
                 below the register minimum {REGISTER_MIN}",
                self.altitude_limit, self.slop_steps
            ));
        }
        if self.cycle_seconds == 0 {
            return invalid("cycle-seconds must be at least 1".into());
        }
        if self.object > MAX_OBJECT_INDEX {
            return Err(Error::UnknownObject(self.object));
        }
        match (self.latitude, self.longitude) {
            (None, None) => {
                if self.location > MAX_LOCATION_INDEX {
                    return Err(Error::UnknownLocation(self.location));
                }
            }
            (Some(lat), Some(lng)) => {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                    return invalid(format!("latitude/longitude {lat}, {lng} out of range"));
                }
            }
            _ => return invalid("latitude and longitude must be given together".into()),
        }
        Ok(())
    }

    /// Observer position: the explicit coordinates, or the selected site.
    pub fn location(&self) -> Result<Location> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Ok(Location::new(lat, lng)),
            _ => Location::from_index(self.location),
        }
    }

    pub fn object(&self) -> Result<CelestialObject> {
        CelestialObject::from_index(self.object)
    }

    pub fn motor_settings(&self) -> MotorSettings {
        MotorSettings {
            azimuth_first_pin: self.azimuth_first_pin,
            altitude_first_pin: self.altitude_first_pin,
            slop_steps: self.slop_steps,
            step_delay_fast: Duration::from_millis(self.step_delay_fast_ms),
            step_delay_slow: Duration::from_millis(self.step_delay_slow_ms),
        }
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            steps_per_revolution: self.steps_per_revolution,
            altitude_limit: self.altitude_limit,
        }
    }

    pub fn cycle(&self) -> Duration {
        Duration::from_secs(self.cycle_seconds)
    }

    /// Where the axis positions are persisted.
    pub fn register_path(&self) -> Result<PathBuf> {
        match &self.register_file {
            Some(path) => Ok(path.clone()),
            None => Self::dir()
                .map(|d| d.join("position.bin"))
                .ok_or_else(|| Error::InvalidConfig("could not determine home directory".into())),
        }
    }
}
