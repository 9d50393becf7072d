//! `skypointer`: point a two-axis stepper pair at the Sun, Moon, a planet or
//! a bright star, and keep it there.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use skypointer::object::CelestialObject;
use skypointer::pointer::{self, Pointer, Target};
use skypointer::stepper::coil::LogCoils;
use skypointer::stepper::pacing::DeadlinePacer;
use skypointer::stepper::store::{PositionStore, RegisterFile};
use skypointer::stepper::{Axis, Jog, StepperController};
use skypointer::{Clock, Config, ManualClock, SystemClock};

/// Pause after each self-test move, long enough to see where it stopped.
const SETTLE: Duration = Duration::from_millis(500);

type Controller = StepperController<RegisterFile, LogCoils, DeadlinePacer>;

/// Two-axis celestial pointer.
#[derive(Debug, Parser)]
#[command(name = "skypointer", version)]
struct Cli {
    /// Config file; defaults to `~/.skypointer/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Object index, overriding the config (see `objects`).
    #[arg(long, global = true)]
    object: Option<usize>,

    /// More log output; repeat for per-step tracing.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print where the object is and the motor target, without moving.
    Where {
        /// Unix time in seconds; defaults to now.
        #[arg(long)]
        at: Option<i64>,
    },

    /// List the selectable objects.
    Objects,

    /// Run the control loop.
    Track {
        /// Stop after this many cycles.
        #[arg(long)]
        cycles: Option<u64>,

        /// Run on simulated time, advancing `demo-advance-seconds` per cycle.
        #[arg(long)]
        demo: bool,

        /// Move on to the next object after every cycle.
        #[arg(long)]
        tour: bool,
    },

    /// Sweep both axes to check for slipping or binding.
    SelfTest,

    /// Turn one axis by hand without moving its stored zero.
    Jog {
        #[arg(value_enum)]
        axis: AxisArg,

        /// Number of four-step nudges.
        iterations: u32,

        /// Turn counter-clockwise.
        #[arg(long)]
        reverse: bool,
    },

    /// Show the persisted axis positions, or overwrite them.
    Position {
        #[arg(
            long,
            num_args = 2,
            value_names = ["AZIMUTH", "ALTITUDE"],
            allow_negative_numbers = true
        )]
        set: Option<Vec<i32>>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AxisArg {
    Azimuth,
    Altitude,
}

impl From<AxisArg> for Axis {
    fn from(arg: AxisArg) -> Axis {
        match arg {
            AxisArg::Azimuth => Axis::Azimuth,
            AxisArg::Altitude => Axis::Altitude,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(object) = cli.object {
        config.object = object;
        config.validate()?;
    }

    match cli.command {
        Command::Where { at } => print_where(&config, at.unwrap_or_else(|| SystemClock.now())),
        Command::Objects => {
            for object in CelestialObject::all() {
                println!("{:>2}  {}", object.index(), object.name());
            }
            Ok(())
        }
        Command::Track {
            cycles,
            demo,
            tour,
        } => track(&config, cycles, demo, tour),
        Command::SelfTest => {
            let mut pointer = open_pointer(&config)?;
            pointer.self_test(SETTLE)?;
            Ok(())
        }
        Command::Jog {
            axis,
            iterations,
            reverse,
        } => {
            let mut controller = open_controller(&config)?;
            let mut jog = Jog::new(axis.into(), config.jog_speedup_after);
            if reverse {
                jog = jog.reversed();
            }
            let moved = jog.run(&mut controller, iterations)?;
            println!("turned {} by {moved} steps", jog.axis.name());
            Ok(())
        }
        Command::Position { set } => {
            let mut controller = open_controller(&config)?;
            if let Some([azimuth, altitude]) = set.as_deref() {
                let store = controller.store_mut();
                store.set(Axis::Azimuth, *azimuth)?;
                store.set(Axis::Altitude, *altitude)?;
            }
            for axis in Axis::ALL {
                println!("{:<8} {}", axis.name(), controller.position(axis)?);
            }
            Ok(())
        }
    }
}

fn print_where(config: &Config, t: i64) -> Result<()> {
    let target = pointer::aim(config.object()?, config.location()?, t, config.geometry());
    print_target(&target);
    Ok(())
}

fn print_target(target: &Target) {
    println!(
        "{:<8} ra {:>7.4}h  dec {:>+8.3}  az {:>7.3}  alt {:>+7.3}  ticks {:>5} {:>5}",
        target.object.name(),
        target.equatorial.ra_hours,
        target.equatorial.dec_degrees,
        target.horizontal.az,
        target.horizontal.alt,
        target.azimuth_ticks,
        target.altitude_ticks
    );
}

fn open_controller(config: &Config) -> Result<Controller> {
    let path = config.register_path()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let store = RegisterFile::open(&path)
        .with_context(|| format!("failed to open position registers {}", path.display()))?;
    Ok(StepperController::new(
        store,
        LogCoils,
        DeadlinePacer::new(),
        config.motor_settings(),
    ))
}

fn open_pointer(config: &Config) -> Result<Pointer<RegisterFile, LogCoils, DeadlinePacer>> {
    Ok(Pointer::new(
        open_controller(config)?,
        config.location()?,
        config.object()?,
        config.geometry(),
    ))
}

fn track(config: &Config, cycles: Option<u64>, demo: bool, tour: bool) -> Result<()> {
    let mut pointer = open_pointer(config)?;
    pointer.self_test(SETTLE)?;

    if demo {
        let clock = ManualClock::new(SystemClock.now());
        run_cycles(&mut pointer, &clock, cycles, tour, || {
            clock.advance(config.demo_advance_seconds)
        })
    } else {
        run_cycles(&mut pointer, &SystemClock, cycles, tour, || {
            thread::sleep(config.cycle())
        })
    }
}

fn run_cycles(
    pointer: &mut Pointer<RegisterFile, LogCoils, DeadlinePacer>,
    clock: &impl Clock,
    cycles: Option<u64>,
    tour: bool,
    mut between: impl FnMut(),
) -> Result<()> {
    let mut n = 0;
    while cycles.map_or(true, |c| n < c) {
        let (target, _) = pointer.update(clock)?;
        print_target(&target);
        n += 1;
        if tour {
            pointer.next_object()?;
        }
        between();
    }
    Ok(())
}
