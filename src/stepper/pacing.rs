//! Step cadence.
//!
//! Steps are issued on a fixed grid of deadlines rather than after fixed
//! sleeps, so time spent persisting a position does not stretch the cadence.

use std::thread;
use std::time::{Duration, Instant};

pub trait Pacer {
    /// Aligns the deadline grid to the next millisecond.
    fn start(&mut self);

    /// Moves the deadline `delay` further and blocks until it has passed.
    fn wait(&mut self, delay: Duration);
}

/// Sleeps the calling thread until each deadline.
#[derive(Debug, Default)]
pub struct DeadlinePacer {
    deadline: Option<Instant>,
}

impl DeadlinePacer {
    pub fn new() -> DeadlinePacer {
        DeadlinePacer::default()
    }

    fn sleep_until(deadline: Instant) {
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }
}

impl Pacer for DeadlinePacer {
    fn start(&mut self) {
        let deadline = Instant::now() + Duration::from_millis(1);
        Self::sleep_until(deadline);
        self.deadline = Some(deadline);
    }

    fn wait(&mut self, delay: Duration) {
        let deadline = self.deadline.unwrap_or_else(Instant::now) + delay;
        Self::sleep_until(deadline);
        self.deadline = Some(deadline);
    }
}

/// Never blocks. For dry runs where no motor is attached.
#[derive(Debug, Default)]
pub struct Unpaced;

impl Pacer for Unpaced {
    fn start(&mut self) {}
    fn wait(&mut self, _delay: Duration) {}
}
