use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use skypointer::pointer::{Geometry, Pointer};
use skypointer::stepper::coil::{CoilDriver, CoilPattern};
use skypointer::stepper::pacing::Unpaced;
use skypointer::stepper::store::{MemoryStore, PositionStore, RegisterFile};
use skypointer::stepper::{Axis, MotorSettings, StepperController};
use skypointer::{CelestialObject, Clock, Config, Error, Location, ManualClock, Result};

// 2024-06-15T21:30:00Z
const T: i64 = 1_718_487_000;

/// Store wrapper that logs every write and can cut the power after a given
/// number of them.
struct Recording<S> {
    inner: S,
    writes: Rc<RefCell<Vec<(Axis, i32)>>>,
    fail_after: Option<usize>,
}

impl<S> Recording<S> {
    fn new(inner: S) -> Self {
        Recording {
            inner,
            writes: Rc::default(),
            fail_after: None,
        }
    }
}

impl<S: PositionStore> PositionStore for Recording<S> {
    fn get(&self, axis: Axis) -> Result<i32> {
        self.inner.get(axis)
    }

    fn set(&mut self, axis: Axis, value: i32) -> Result<()> {
        let mut writes = self.writes.borrow_mut();
        if self.fail_after == Some(writes.len()) {
            return Err(Error::Io {
                path: "registers".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "power lost"),
            });
        }
        writes.push((axis, value));
        self.inner.set(axis, value)
    }
}

#[derive(Default)]
struct Coils {
    writes: Vec<(u8, CoilPattern)>,
}

impl CoilDriver for Coils {
    fn write(&mut self, first_pin: u8, pattern: CoilPattern) {
        self.writes.push((first_pin, pattern));
    }
}

fn pointer<S: PositionStore>(store: S, object: usize) -> Pointer<S, Coils, Unpaced> {
    let controller =
        StepperController::new(store, Coils::default(), Unpaced, MotorSettings::default());
    Pointer::new(
        controller,
        Location::from_index(0).unwrap(),
        CelestialObject::from_index(object).unwrap(),
        Geometry::default(),
    )
}

#[test]
fn tracks_vega_through_the_evening() {
    let store = Recording::new(MemoryStore::default());
    let writes = Rc::clone(&store.writes);
    let mut pointer = pointer(store, 10);
    let clock = ManualClock::new(T);

    let mut last = [0, 0];
    for _ in 0..24 {
        let (target, _) = pointer.update(&clock).unwrap();
        let store = pointer.controller().store();
        assert_eq!(store.get(Axis::Azimuth).unwrap(), target.azimuth_ticks);
        assert_eq!(store.get(Axis::Altitude).unwrap(), target.altitude_ticks);
        clock.advance(300);

        // each write records exactly one step
        for (axis, value) in writes.borrow_mut().drain(..) {
            let previous = &mut last[axis.register()];
            assert_eq!((value - *previous).abs(), 1, "{axis:?} jumped to {value}");
            *previous = value;
        }
    }
}

#[test]
fn sun_below_horizon_rests_on_the_stop() {
    let mut pointer = pointer(MemoryStore::default(), 0);
    let clock = ManualClock::new(T);
    let geometry = pointer.geometry();
    for _ in 0..48 {
        let (target, report) = pointer.update(&clock).unwrap();
        assert!(target.altitude_ticks >= geometry.altitude_limit);
        assert!(target.azimuth_ticks.abs() <= geometry.steps_per_revolution / 2);
        assert_eq!(report.positions, [target.azimuth_ticks, target.altitude_ticks]);
        clock.advance(1800);
    }
}

#[test]
fn coils_are_released_between_cycles() {
    let mut pointer = pointer(MemoryStore::default(), 11);
    let clock = ManualClock::new(T);
    for _ in 0..6 {
        pointer.update(&clock).unwrap();
        clock.advance(300);
    }
    let coils = &pointer.controller().coils().writes;
    for pin in [2, 6] {
        let last = coils.iter().rev().find(|(p, _)| *p == pin).map(|(_, c)| *c);
        assert_eq!(last, Some([false; 4]), "pin {pin}");
    }
}

#[test]
fn resumes_after_power_loss() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("position.bin");

    let mut store = Recording::new(RegisterFile::open(&path).unwrap());
    store.fail_after = Some(200);
    let mut lost = pointer(store, 10);
    let clock = ManualClock::new(T);
    assert!(lost.update(&clock).is_err());
    drop(lost);

    // steps alternate axes, so each has taken 100 steps towards (-531, 313)
    let store = RegisterFile::open(&path).unwrap();
    assert_eq!(store.get(Axis::Azimuth).unwrap(), -100);
    assert_eq!(store.get(Axis::Altitude).unwrap(), 100);

    let mut resumed = pointer(store, 10);
    let (_, report) = resumed.update(&clock).unwrap();
    assert_eq!(report.steps, [431, 213]);
    assert_eq!(report.positions, [-531, 313]);

    let store = RegisterFile::open(&path).unwrap();
    assert_eq!(store.get(Axis::Azimuth).unwrap(), -531);
    assert_eq!(store.get(Axis::Altitude).unwrap(), 313);
}

#[test]
fn demo_clock_runs_ahead() {
    let mut pointer = pointer(MemoryStore::default(), 3);
    let clock = ManualClock::new(T);
    let mut times = Vec::new();
    for _ in 0..12 {
        let (target, _) = pointer.update(&clock).unwrap();
        times.push(target.time);
        clock.advance(300);
    }
    assert_eq!(times.first(), Some(&T));
    assert_eq!(times.last(), Some(&(T + 11 * 300)));
    assert_eq!(clock.now(), T + 12 * 300);
}

#[test]
fn self_test_then_track() {
    let mut pointer = pointer(MemoryStore::default(), 10);
    pointer.self_test(Duration::ZERO).unwrap();
    let (_, report) = pointer.update(&ManualClock::new(T)).unwrap();
    // from -1024 to -531
    assert_eq!(report.steps, [493, 313]);
}

#[test]
fn tour_visits_every_object() {
    let mut pointer = pointer(MemoryStore::default(), 0);
    let clock = ManualClock::new(T);
    let mut seen = Vec::new();
    for _ in 0..16 {
        let (target, report) = pointer.update(&clock).unwrap();
        assert_eq!(report.positions, [target.azimuth_ticks, target.altitude_ticks]);
        seen.push(target.object.index());
        pointer.next_object().unwrap();
    }
    let expected: Vec<usize> = (0..=14).chain([0]).collect();
    assert_eq!(seen, expected);
}

#[test]
fn widest_accepted_geometry_fits_the_registers() {
    let config = Config::parse(
        "steps-per-revolution = 4000\nslop-steps = 0\naltitude-limit = -1000",
        Path::new("config.toml"),
    )
    .unwrap();

    let controller = StepperController::new(
        MemoryStore::default(),
        Coils::default(),
        Unpaced,
        config.motor_settings(),
    );
    let mut pointer = Pointer::new(
        controller,
        config.location().unwrap(),
        config.object().unwrap(),
        config.geometry(),
    );
    pointer.self_test(Duration::ZERO).unwrap();
    let store = pointer.controller().store();
    assert_eq!(store.get(Axis::Azimuth).unwrap(), -2000);

    assert!(Config::parse("steps-per-revolution = 4096", Path::new("config.toml")).is_err());
}
