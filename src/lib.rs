//! Two-axis celestial pointer.
//!
//! Computes where a Sun/planet/Moon/star sits in the sky for an observer and
//! drives an azimuth + altitude stepper pair towards it, persisting every
//! physical step so a power cut never desynchronises the pointer.

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

pub mod config;
pub mod coords;
pub mod ephem;
pub mod error;
pub mod object;
pub mod pointer;
pub mod stepper;
pub mod time;

pub use config::Config;
pub use coords::{transform, AzAlt, Equatorial, Location};
pub use ephem::Body;
pub use error::{Error, Result};
pub use object::{CelestialObject, Star};
pub use pointer::{Pointer, Target};
pub use stepper::{Axis, StepperController};
pub use time::{sidereal_angle, Clock, ManualClock, SystemClock};
