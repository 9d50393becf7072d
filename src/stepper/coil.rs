//! Coil energisation of a four-wire unipolar stepper (28BYJ-48 on a ULN2003
//! driver), two adjacent coils on at a time.

/// Logic levels of the four driver inputs, first pin first.
pub type CoilPattern = [bool; 4];

/// Full-step sequence; index is `position & 3`.
const PATTERNS: [CoilPattern; 4] = [
    [true, true, false, false],
    [true, false, false, true],
    [false, false, true, true],
    [false, true, true, false],
];

const OFF: CoilPattern = [false; 4];

/// Which of the four holding patterns to apply, or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Step(u8),
    Off,
}

impl Phase {
    /// The phase that holds the rotor at step `position`.
    pub fn from_position(position: i32) -> Phase {
        Phase::Step((position & 3) as u8)
    }

    pub fn pattern(self) -> CoilPattern {
        match self {
            Phase::Step(n) => PATTERNS.get(n as usize).copied().unwrap_or(OFF),
            Phase::Off => OFF,
        }
    }
}

/// Writes coil levels to the four consecutive outputs starting at
/// `first_pin`.
pub trait CoilDriver {
    fn write(&mut self, first_pin: u8, pattern: CoilPattern);

    fn energize(&mut self, first_pin: u8, phase: Phase) {
        self.write(first_pin, phase.pattern());
    }
}

/// Driver for hosts without GPIO: reports every write through `log`.
#[derive(Debug, Default)]
pub struct LogCoils;

impl CoilDriver for LogCoils {
    fn write(&mut self, first_pin: u8, pattern: CoilPattern) {
        let levels: String = pattern.iter().map(|on| if *on { '1' } else { '0' }).collect();
        log::trace!("pins {}-{}: {levels}", first_pin, first_pin + 3);
    }
}
