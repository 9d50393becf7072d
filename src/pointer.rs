//! Turns a sky position into motor targets and drives the controller there.

use std::time::Duration;

use crate::coords::{transform, AzAlt, Equatorial, Location};
use crate::error::Result;
use crate::object::CelestialObject;
use crate::stepper::coil::CoilDriver;
use crate::stepper::pacing::Pacer;
use crate::stepper::store::PositionStore;
use crate::stepper::{MoveReport, StepperController};
use crate::time::Clock;

/// Folds an azimuth in `[0, 360)` into `(-180, 180]`.
///
/// Stars north of the observer's zenith circle around the north point; with
/// the fold they swing across 0 instead of making the pointer run a full
/// turn every time they cross north.
pub fn fold_azimuth(az: f64) -> f64 {
    if az > 180.0 {
        az - 360.0
    } else {
        az
    }
}

/// Motor ticks for a folded azimuth. The azimuth motor turns against the
/// compass, hence the sign.
pub fn azimuth_ticks(az: f64, steps_per_revolution: i32) -> i32 {
    (-az * steps_per_revolution as f64 / 360.0) as i32
}

/// Motor ticks for an altitude, never below the mechanical stop.
pub fn altitude_ticks(alt: f64, steps_per_revolution: i32, altitude_limit: i32) -> i32 {
    let ticks = (alt * steps_per_revolution as f64 / 360.0) as i32;
    ticks.max(altitude_limit)
}

/// Mechanics of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub steps_per_revolution: i32,
    /// Lowest altitude the pointer may be driven to, in ticks.
    pub altitude_limit: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            steps_per_revolution: 2048,
            altitude_limit: -200,
        }
    }
}

/// Where an object is and where the motors must go to point at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub object: CelestialObject,
    pub time: i64,
    pub equatorial: Equatorial,
    /// Compass azimuth `[0, 360)` and altitude.
    pub horizontal: AzAlt,
    pub azimuth_ticks: i32,
    pub altitude_ticks: i32,
}

/// Computes the motor target for `object` seen from `location` at unix time
/// `t`.
pub fn aim(object: CelestialObject, location: Location, t: i64, geometry: Geometry) -> Target {
    let sidereal = location.sidereal_angle(t);
    let equatorial = object.equatorial(t);
    let horizontal = transform(equatorial, location.lat, sidereal);

    let az = fold_azimuth(horizontal.az);
    Target {
        object,
        time: t,
        equatorial,
        horizontal,
        azimuth_ticks: azimuth_ticks(az, geometry.steps_per_revolution),
        altitude_ticks: altitude_ticks(
            horizontal.alt,
            geometry.steps_per_revolution,
            geometry.altitude_limit,
        ),
    }
}

/// The control context: what to point at, from where, and the motors.
pub struct Pointer<S, D, P> {
    controller: StepperController<S, D, P>,
    location: Location,
    object: CelestialObject,
    geometry: Geometry,
}

impl<S: PositionStore, D: CoilDriver, P: Pacer> Pointer<S, D, P> {
    pub fn new(
        controller: StepperController<S, D, P>,
        location: Location,
        object: CelestialObject,
        geometry: Geometry,
    ) -> Self {
        Pointer {
            controller,
            location,
            object,
            geometry,
        }
    }

    pub fn object(&self) -> CelestialObject {
        self.object
    }

    pub fn set_object(&mut self, object: CelestialObject) {
        log::info!("now pointing at {}", object.name());
        self.object = object;
    }

    /// Moves on to the next object in index order, wrapping after the last
    /// star.
    pub fn next_object(&mut self) -> Result<CelestialObject> {
        let index = CelestialObject::next_index(self.object.index());
        let next = CelestialObject::from_index(index)?;
        self.set_object(next);
        Ok(next)
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn controller(&self) -> &StepperController<S, D, P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut StepperController<S, D, P> {
        &mut self.controller
    }

    /// Motor target for the current object at `t`, without moving.
    pub fn aim(&self, t: i64) -> Target {
        aim(self.object, self.location, t, self.geometry)
    }

    /// One control cycle: read the clock, compute the target and step there.
    pub fn update(&mut self, clock: &impl Clock) -> Result<(Target, MoveReport)> {
        let t = clock.now();
        self.controller
            .rollover_azimuth(self.geometry.steps_per_revolution)?;

        let target = self.aim(t);
        log::debug!(
            "{} at ra {:.4}h dec {:.3}: az {:.3} alt {:.3} -> ticks {} / {}",
            target.object.name(),
            target.equatorial.ra_hours,
            target.equatorial.dec_degrees,
            target.horizontal.az,
            target.horizontal.alt,
            target.azimuth_ticks,
            target.altitude_ticks
        );

        let report = self
            .controller
            .step_to(target.azimuth_ticks, target.altitude_ticks, false)?;
        Ok((target, report))
    }

    /// Start-up sweep: half a turn one way, down to the stop at the zero
    /// azimuth, half a turn the other way. A pointer that slips or binds
    /// shows it here.
    pub fn self_test(&mut self, settle: Duration) -> Result<()> {
        let half = self.geometry.steps_per_revolution / 2;
        let moves = [
            (half, 0),
            (0, self.geometry.altitude_limit),
            (-half, 0),
        ];
        for (azimuth, altitude) in moves {
            self.controller.step_to(azimuth, altitude, false)?;
            self.controller.pause(settle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephem::Body;
    use crate::stepper::coil::LogCoils;
    use crate::stepper::pacing::Unpaced;
    use crate::stepper::store::MemoryStore;
    use crate::stepper::{Axis, MotorSettings};
    use crate::time::ManualClock;

    // 2024-06-15T21:30:00Z
    const T: i64 = 1_718_487_000;

    fn pointer(
        object: usize,
        azimuth: i32,
        altitude: i32,
    ) -> Pointer<MemoryStore, LogCoils, Unpaced> {
        let controller = StepperController::new(
            MemoryStore::new(azimuth, altitude).unwrap(),
            LogCoils,
            Unpaced,
            MotorSettings::default(),
        );
        Pointer::new(
            controller,
            Location::from_index(0).unwrap(),
            CelestialObject::from_index(object).unwrap(),
            Geometry::default(),
        )
    }

    #[test]
    fn test_fold_azimuth() {
        assert_eq!(fold_azimuth(270.0), -90.0);
        assert_eq!(fold_azimuth(90.0), 90.0);
        assert_eq!(fold_azimuth(180.0), 180.0);
        assert_eq!(fold_azimuth(0.0), 0.0);
        assert_approx_eq!(fold_azimuth(359.9), -0.1, 1e-9);
    }

    #[test]
    fn ticks_truncate_towards_zero() {
        assert_eq!(azimuth_ticks(90.0, 2048), -512);
        assert_eq!(azimuth_ticks(-90.0, 2048), 512);
        assert_eq!(azimuth_ticks(93.497, 2048), -531);
        assert_eq!(altitude_ticks(55.187, 2048, -200), 313);
        assert_eq!(altitude_ticks(-0.1, 2048, -200), 0);
    }

    #[test]
    fn altitude_is_clamped_to_the_stop() {
        assert_eq!(altitude_ticks(-35.0, 2048, -200), -199);
        assert_eq!(altitude_ticks(-36.0, 2048, -200), -200);
        assert_eq!(altitude_ticks(-90.0, 2048, -200), -200);
        assert_eq!(altitude_ticks(-90.0, 2048, 0), 0);
    }

    #[test]
    fn vega_target() {
        let target = pointer(10, 0, 0).aim(T);
        assert_eq!(target.object.name(), "Vega");
        assert_approx_eq!(target.horizontal.az, 93.497, 0.01);
        assert_approx_eq!(target.horizontal.alt, 55.187, 0.01);
        assert_eq!(target.azimuth_ticks, -531);
        assert_eq!(target.altitude_ticks, 313);
    }

    #[test]
    fn western_targets_turn_the_other_way() {
        // Arcturus at azimuth 210.5 folds to -149.5
        let target = pointer(9, 0, 0).aim(T);
        assert_eq!(target.azimuth_ticks, 850);
        assert_eq!(target.altitude_ticks, 307);
    }

    #[test]
    fn sun_below_horizon_at_night_hits_the_stop() {
        // Utrecht, 23:30 local summer time: the Sun is about 10 degrees down
        let mut target = pointer(0, 0, 0).aim(T);
        assert_eq!(target.object, CelestialObject::Body(Body::Sun));
        assert!(target.horizontal.alt < 0.0);
        assert!(target.altitude_ticks >= -200);

        // midnight sun from Nordkapp
        let mut p = pointer(0, 0, 0);
        p.set_location(Location::from_index(1).unwrap());
        target = p.aim(T);
        assert!(target.horizontal.alt > 0.0);
    }

    #[test]
    fn update_moves_to_target() {
        let mut p = pointer(10, 0, 0);
        let clock = ManualClock::new(T);
        let (target, report) = p.update(&clock).unwrap();
        assert_eq!(report.positions, [-531, 313]);
        assert_eq!(report.steps, [531, 313]);
        assert_eq!(p.controller().position(Axis::Azimuth).unwrap(), target.azimuth_ticks);
        assert_eq!(p.controller().position(Axis::Altitude).unwrap(), 313);

        // same instant again: nothing to do
        let (_, report) = p.update(&clock).unwrap();
        assert!(report.is_idle());
    }

    #[test]
    fn next_object_wraps_to_the_sun() {
        let mut p = pointer(13, 0, 0);
        assert_eq!(p.next_object().unwrap().name(), "Alcyone");
        assert_eq!(p.next_object().unwrap(), CelestialObject::Body(Body::Sun));
        assert_eq!(p.next_object().unwrap(), CelestialObject::Body(Body::Mercury));
        assert_eq!(p.object(), CelestialObject::Body(Body::Mercury));
    }

    #[test]
    fn update_resets_wound_azimuth() {
        let mut p = pointer(10, -1500, 313);
        let (_, report) = p.update(&ManualClock::new(T)).unwrap();
        // -1500 + 2048 = 548, then 1079 steps back to -531
        assert_eq!(report.steps[0], 1079);
        assert_eq!(p.controller().position(Axis::Azimuth).unwrap(), -531);
    }

    #[test]
    fn self_test_ends_at_negative_half_turn() {
        let mut p = pointer(0, 0, 0);
        p.self_test(Duration::from_millis(500)).unwrap();
        assert_eq!(p.controller().position(Axis::Azimuth).unwrap(), -1024);
        assert_eq!(p.controller().position(Axis::Altitude).unwrap(), 0);
    }
}
