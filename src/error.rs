use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the collaborator seams: configuration, object and
/// location selection, and the persisted position registers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown object index {0} (valid: 0..={max})", max = crate::object::MAX_OBJECT_INDEX)]
    UnknownObject(usize),

    #[error("unknown location index {0} (valid: 0..={max})", max = crate::coords::location::MAX_LOCATION_INDEX)]
    UnknownLocation(usize),

    /// The value cannot be represented in a position register.
    #[error("position {0} outside register range {min}..={max}",
        min = crate::stepper::store::REGISTER_MIN,
        max = crate::stepper::store::REGISTER_MAX)]
    RegisterRange(i32),

    /// The stored bytes are not a valid minute/hour/day triple.
    #[error("corrupt position register {0:02x?}")]
    CorruptRegister([u8; 3]),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config at {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
