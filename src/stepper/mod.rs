//! Incremental two-axis stepper control with per-step persistence.
//!
//! Every physical step is written to the [`PositionStore`] before the next
//! one is issued, so after a power cut the stored position is at most one
//! step behind the rotor. There is deliberately no shortest-path logic: the
//! pointer always unwinds the way it came, which keeps the altitude cable
//! from twisting.

pub mod coil;
pub mod jog;
pub mod pacing;
pub mod store;

use std::time::Duration;

use coil::{CoilDriver, Phase};
use pacing::Pacer;
use store::PositionStore;

use crate::error::Result;

pub use jog::Jog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Azimuth,
    Altitude,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Azimuth, Axis::Altitude];

    /// Index of the persisted register holding this axis.
    pub fn register(self) -> usize {
        match self {
            Axis::Azimuth => 0,
            Axis::Altitude => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Azimuth => "azimuth",
            Axis::Altitude => "altitude",
        }
    }
}

/// Wiring and timing of the motor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorSettings {
    /// First of four consecutive driver outputs of the azimuth motor.
    pub azimuth_first_pin: u8,
    pub altitude_first_pin: u8,
    /// Extra steps taken on a counter-clockwise move to take up gear play.
    pub slop_steps: i32,
    pub step_delay_fast: Duration,
    /// Cadence while calibrating by hand.
    pub step_delay_slow: Duration,
}

impl Default for MotorSettings {
    fn default() -> Self {
        MotorSettings {
            azimuth_first_pin: 2,
            altitude_first_pin: 6,
            slop_steps: 0,
            step_delay_fast: Duration::from_millis(4),
            step_delay_slow: Duration::from_millis(20),
        }
    }
}

/// What a completed [`StepperController::step_to`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// Physical steps issued per axis, azimuth first.
    pub steps: [u32; 2],
    /// Final rotor positions.
    pub positions: [i32; 2],
}

impl MoveReport {
    pub fn is_idle(&self) -> bool {
        self.steps == [0, 0]
    }
}

/// Remaining work of one axis during a move.
#[derive(Debug)]
struct AxisMove {
    axis: Axis,
    pin: u8,
    position: i32,
    delta: i32,
    steps: u32,
    released: bool,
}

pub struct StepperController<S, D, P> {
    store: S,
    coils: D,
    pacer: P,
    settings: MotorSettings,
    step_delay: Duration,
}

impl<S: PositionStore, D: CoilDriver, P: Pacer> StepperController<S, D, P> {
    pub fn new(store: S, coils: D, pacer: P, settings: MotorSettings) -> Self {
        StepperController {
            store,
            coils,
            pacer,
            settings,
            step_delay: settings.step_delay_fast,
        }
    }

    pub fn settings(&self) -> &MotorSettings {
        &self.settings
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn set_step_delay(&mut self, delay: Duration) {
        self.step_delay = delay;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn coils(&self) -> &D {
        &self.coils
    }

    pub fn into_parts(self) -> (S, D, P) {
        (self.store, self.coils, self.pacer)
    }

    /// Holds still for `delay` on the step pacer.
    pub fn pause(&mut self, delay: Duration) {
        self.pacer.start();
        self.pacer.wait(delay);
    }

    /// Persisted position of `axis`.
    pub fn position(&self, axis: Axis) -> Result<i32> {
        self.store.get(axis)
    }

    fn first_pin(&self, axis: Axis) -> u8 {
        match axis {
            Axis::Azimuth => self.settings.azimuth_first_pin,
            Axis::Altitude => self.settings.altitude_first_pin,
        }
    }

    /// Moves both axes from their persisted positions to the given targets.
    ///
    /// A counter-clockwise move overshoots by `slop_steps` and comes back,
    /// so the pointer always settles while turning clockwise. With
    /// `calibrating` set nothing is persisted and no slop is applied: the
    /// rotor is moved relative to the stored zero, which is how the zero is
    /// adjusted by hand.
    ///
    /// On a storage error the move stops immediately, with the coils
    /// released and the failing step not persisted.
    pub fn step_to(
        &mut self,
        azimuth: i32,
        altitude: i32,
        calibrating: bool,
    ) -> Result<MoveReport> {
        let mut moves = [
            self.plan(Axis::Azimuth, azimuth, calibrating)?,
            self.plan(Axis::Altitude, altitude, calibrating)?,
        ];

        if moves.iter().all(|m| m.delta == 0) {
            return Ok(MoveReport {
                steps: [0, 0],
                positions: [moves[0].position, moves[1].position],
            });
        }

        log::info!(
            "moving az {} -> {azimuth}, alt {} -> {altitude}{}",
            moves[0].position,
            moves[1].position,
            if calibrating { " (calibrating)" } else { "" }
        );

        match self.run(&mut moves, calibrating) {
            Ok(()) => {
                let report = MoveReport {
                    steps: [moves[0].steps, moves[1].steps],
                    positions: [moves[0].position, moves[1].position],
                };
                log::info!(
                    "move done after {} az / {} alt steps",
                    report.steps[0],
                    report.steps[1]
                );
                Ok(report)
            }
            Err(e) => {
                for m in &moves {
                    self.coils.energize(m.pin, Phase::Off);
                }
                Err(e)
            }
        }
    }

    fn plan(&self, axis: Axis, target: i32, calibrating: bool) -> Result<AxisMove> {
        let position = self.store.get(axis)?;
        let mut delta = target - position;
        if delta < 0 && !calibrating {
            delta -= self.settings.slop_steps;
        }
        Ok(AxisMove {
            axis,
            pin: self.first_pin(axis),
            position,
            delta,
            steps: 0,
            released: false,
        })
    }

    fn run(&mut self, moves: &mut [AxisMove; 2], calibrating: bool) -> Result<()> {
        self.pacer.start();
        // the rotor may have been nudged while unpowered; pull it back to
        // the phase it is recorded at before the first step
        for m in moves.iter().filter(|m| m.delta != 0) {
            self.coils.energize(m.pin, Phase::from_position(m.position));
        }
        self.pacer.wait(self.step_delay);

        while moves.iter().any(|m| m.delta != 0) {
            for m in moves.iter_mut() {
                self.step(m, calibrating)?;
            }

            self.pacer.wait(self.step_delay);

            for m in moves.iter_mut().filter(|m| m.delta == 0 && !m.released) {
                self.coils.energize(m.pin, Phase::Off);
                m.released = true;
            }
        }
        Ok(())
    }

    /// Issues one step of `m`, if it has any left.
    fn step(&mut self, m: &mut AxisMove, calibrating: bool) -> Result<()> {
        let direction = m.delta.signum();
        if direction == 0 {
            return Ok(());
        }

        m.position += direction;
        m.steps += 1;
        self.coils.energize(m.pin, Phase::from_position(m.position));
        if !calibrating {
            self.store.set(m.axis, m.position)?;
        }
        log::trace!("{} step to {}", m.axis.name(), m.position);

        m.delta -= direction;
        if direction < 0 && m.delta == 0 && !calibrating {
            // overshoot done, come back over the gear play
            m.delta += self.settings.slop_steps;
        }
        Ok(())
    }

    /// Brings a persisted azimuth that has wandered below any position a
    /// move can leave behind back into range by whole revolutions. The rotor
    /// does not move: a revolution is a multiple of four steps, so the coil
    /// phase is the same.
    ///
    /// Targets never go below minus half a revolution, and a move interrupted
    /// during backlash take-up can stop up to `slop_steps` lower still.
    ///
    /// Returns the corrected position, if a correction was needed.
    pub fn rollover_azimuth(&mut self, steps_per_revolution: i32) -> Result<Option<i32>> {
        let position = self.store.get(Axis::Azimuth)?;
        let lowest = -(steps_per_revolution / 2) - self.settings.slop_steps;
        if steps_per_revolution <= 0 || position >= lowest {
            return Ok(None);
        }

        let turns = (lowest - position + steps_per_revolution - 1) / steps_per_revolution;
        let corrected = position + turns * steps_per_revolution;
        log::warn!("azimuth wound to {position}, resetting to {corrected}");
        self.store.set(Axis::Azimuth, corrected)?;
        Ok(Some(corrected))
    }
}
