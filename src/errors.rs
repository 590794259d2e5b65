use thiserror::Error;

use crate::operator::OperatorClass;

/// Configuration errors are rejected before any generation starts and are
/// fatal to the whole run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("integer length {0} outside supported range 1-19")]
    IntegerLenOutOfRange(usize),

    #[error("decimal length {0} outside supported range 1-19")]
    DecimalLenOutOfRange(usize),

    #[error("fraction length {0} outside supported range 1-19")]
    FractionLenOutOfRange(usize),

    #[error("operator spacing {0} exceeds maximum of 9")]
    SpacingOutOfRange(usize),

    #[error("maximum expression length must be at least 1")]
    ZeroMaxLength,

    #[error("operator class {0:?} has no pickable symbol")]
    EmptyWeightTable(OperatorClass),

    #[error("cannot determine config directory")]
    NoConfigDir,

    #[error("cannot read config file {path}: {message}")]
    ConfigFileRead { path: String, message: String },

    #[error("cannot parse config file {path}: {message}")]
    ConfigFileParse { path: String, message: String },

    #[error("cannot write config file {path}: {message}")]
    ConfigFileWrite { path: String, message: String },

    #[error("invalid environment override: {0}")]
    Environment(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
