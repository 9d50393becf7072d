//! Hand calibration: nudging one axis without moving its stored zero.

use super::coil::CoilDriver;
use super::pacing::Pacer;
use super::store::PositionStore;
use super::{Axis, StepperController};
use crate::error::Result;

/// Steps per jog iteration: one full coil cycle, so the rotor ends on the
/// same phase the stored position implies.
pub const JOG_STEPS: i32 = 4;

/// Repeated calibrating moves on one axis.
///
/// Starts at the slow cadence for fine control and switches to the fast one
/// once the jog has run for `speedup_after` iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jog {
    pub axis: Axis,
    /// `JOG_STEPS` or `-JOG_STEPS`.
    pub direction: i32,
    pub speedup_after: u32,
}

impl Jog {
    pub fn new(axis: Axis, speedup_after: u32) -> Jog {
        Jog {
            axis,
            direction: JOG_STEPS,
            speedup_after,
        }
    }

    pub fn reversed(self) -> Jog {
        Jog {
            direction: -self.direction,
            ..self
        }
    }

    /// Jogs for `iterations` and returns the number of steps the rotor was
    /// turned, signed. The controller is left at its fast cadence.
    pub fn run<S, D, P>(
        &self,
        controller: &mut StepperController<S, D, P>,
        iterations: u32,
    ) -> Result<i32>
    where
        S: PositionStore,
        D: CoilDriver,
        P: Pacer,
    {
        log::info!(
            "jogging {} by {} steps x{iterations}",
            self.axis.name(),
            self.direction
        );
        let slow = controller.settings().step_delay_slow;
        let fast = controller.settings().step_delay_fast;

        controller.set_step_delay(slow);
        let result = self.jog(controller, iterations, fast);
        controller.set_step_delay(fast);
        result
    }

    fn jog<S, D, P>(
        &self,
        controller: &mut StepperController<S, D, P>,
        iterations: u32,
        fast: std::time::Duration,
    ) -> Result<i32>
    where
        S: PositionStore,
        D: CoilDriver,
        P: Pacer,
    {
        let mut moved = 0;
        for count in 0..iterations {
            // calibrating moves leave the store alone, so each one starts
            // from the same stored position
            let mut azimuth = controller.position(Axis::Azimuth)?;
            let mut altitude = controller.position(Axis::Altitude)?;
            match self.axis {
                Axis::Azimuth => azimuth += self.direction,
                Axis::Altitude => altitude += self.direction,
            }
            controller.step_to(azimuth, altitude, true)?;
            moved += self.direction;

            if count == self.speedup_after {
                controller.set_step_delay(fast);
            }
        }
        Ok(moved)
    }
}
