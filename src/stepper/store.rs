//! Durable axis positions.
//!
//! The controller only needs get/set on two integer registers. Positions are
//! kept in the three-byte minute/hour/day layout of an RTC alarm register:
//! `value + 2000` split into minutes, hours and day of month. The offset lets
//! backlash take-up run slightly below zero.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::Axis;
use crate::error::{Error, Result};

/// Lowest position a register can hold.
pub const REGISTER_MIN: i32 = -2000;
/// Highest position a register can hold: day 31, 23:59.
pub const REGISTER_MAX: i32 = 31 * MINUTES_PER_DAY - 1 + REGISTER_MIN;

const MINUTES_PER_DAY: i32 = 60 * 24;

/// Encoded register: minute, hour, day of month.
pub type Register = [u8; 3];

pub fn encode_register(value: i32) -> Result<Register> {
    if !(REGISTER_MIN..=REGISTER_MAX).contains(&value) {
        return Err(Error::RegisterRange(value));
    }
    let v = value - REGISTER_MIN;
    Ok([
        (v % 60) as u8,
        (v / 60 % 24) as u8,
        (1 + v / MINUTES_PER_DAY) as u8,
    ])
}

pub fn decode_register(register: Register) -> Result<i32> {
    let [minute, hour, day] = register;
    if minute >= 60 || hour >= 24 || !(1..=31).contains(&day) {
        return Err(Error::CorruptRegister(register));
    }
    let v = (day as i32 - 1) * MINUTES_PER_DAY + hour as i32 * 60 + minute as i32;
    Ok(v + REGISTER_MIN)
}

/// Durable storage of the two axis positions.
///
/// A successful `set` must survive power loss: the controller relies on it
/// to resume from the last completed step.
pub trait PositionStore {
    fn get(&self, axis: Axis) -> Result<i32>;
    fn set(&mut self, axis: Axis, value: i32) -> Result<()>;
}

impl<S: PositionStore + ?Sized> PositionStore for &mut S {
    fn get(&self, axis: Axis) -> Result<i32> {
        (**self).get(axis)
    }

    fn set(&mut self, axis: Axis, value: i32) -> Result<()> {
        (**self).set(axis, value)
    }
}

/// Volatile registers, for dry runs and tests. Holds only what the durable
/// stores can hold, from construction on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStore {
    positions: [i32; 2],
}

impl MemoryStore {
    pub fn new(azimuth: i32, altitude: i32) -> Result<MemoryStore> {
        encode_register(azimuth)?;
        encode_register(altitude)?;
        Ok(MemoryStore {
            positions: [azimuth, altitude],
        })
    }
}

impl PositionStore for MemoryStore {
    fn get(&self, axis: Axis) -> Result<i32> {
        Ok(self.positions[axis.register()])
    }

    fn set(&mut self, axis: Axis, value: i32) -> Result<()> {
        encode_register(value)?;
        self.positions[axis.register()] = value;
        Ok(())
    }
}

/// Both registers in one six-byte file, azimuth first.
///
/// Every `set` writes a sibling temporary file and renames it over the
/// original, so a reader sees either the old or the new pair, never a torn
/// write.
#[derive(Debug)]
pub struct RegisterFile {
    path: PathBuf,
    registers: [Register; 2],
}

impl RegisterFile {
    /// Opens `path`, creating it with both axes at 0 when it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<RegisterFile> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            log::info!("creating position registers at {}", path.display());
            let zero = encode_register(0)?;
            let mut file = RegisterFile {
                path,
                registers: [zero, zero],
            };
            file.flush()?;
            return Ok(file);
        }

        let bytes = fs::read(&path).map_err(|e| Error::io(&path, e))?;
        let registers = match bytes.as_slice() {
            [a0, a1, a2, b0, b1, b2] => [[*a0, *a1, *a2], [*b0, *b1, *b2]],
            _ => {
                let found = bytes.get(..3).map_or([0; 3], |b| [b[0], b[1], b[2]]);
                return Err(Error::CorruptRegister(found));
            }
        };
        for register in registers {
            decode_register(register)?;
        }
        Ok(RegisterFile { path, registers })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&mut self) -> Result<()> {
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;
        file.write_all(&self.registers.concat())
            .and_then(|_| file.sync_all())
            .map_err(|e| Error::io(&temp_path, e))?;
        drop(file);
        fs::rename(&temp_path, &self.path).map_err(|e| Error::io(&self.path, e))
    }
}

impl PositionStore for RegisterFile {
    fn get(&self, axis: Axis) -> Result<i32> {
        decode_register(self.registers[axis.register()])
    }

    fn set(&mut self, axis: Axis, value: i32) -> Result<()> {
        self.registers[axis.register()] = encode_register(value)?;
        self.flush()
    }
}
