// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Error types that can be returned by the `gmxprep` crate.

use std::path::Path;

use colored::{ColoredString, Colorize};
use thiserror::Error;

fn path_to_yellow(path: &Path) -> ColoredString {
    path.to_str().unwrap().yellow()
}

/// Errors that can occur inside the application itself.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{} could not read the configuration file '{}'", "error:".red().bold(), .0.yellow())]
    CouldNotReadConfig(String),
    #[error("{} could not understand the contents of the configuration file '{}' ({})", "error:".red().bold(), .0.yellow(), .1)]
    CouldNotParseConfig(String, serde_yaml::Error),
}

/// Errors that can occur while reading and editing mdp configurations.
#[derive(Error, Debug)]
pub enum MdpError {
    #[error("{} file '{}' does not exist or could not be read", "error:".red().bold(), path_to_yellow(.0))]
    FileNotFound(Box<Path>),

    #[error("{} value of type '{}' has no mdp representation", "error:".red().bold(), .0.yellow())]
    UnsupportedValueType(String),
}

/// Errors that can occur while setting validated protocol parameters.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("{} invalid value '{}' for mdp parameter '{}'", "error:".red().bold(), .value.yellow(), .key.yellow())]
    InvalidEnumValue { key: String, value: String },

    #[error("{} mdp parameter '{}' requires a string value when validation is requested", "error:".red().bold(), .0.yellow())]
    TypeMismatch(String),
}

/// Errors that can occur while writing output files.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{} could not create file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotCreateFile(Box<Path>),

    #[error("{} could not create a backup for file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotBackupFile(Box<Path>),

    #[error("{} could not write line into '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotWriteLine(Box<Path>),
}

/// Errors that can occur while assembling a finalized mdp configuration.
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("{}", .0)]
    Mdp(#[from] MdpError),

    #[error("{}", .0)]
    Protocol(#[from] ProtocolError),

    #[error("{}", .0)]
    Write(#[from] WriteError),
}

/// Errors that can occur at the boundary with the external MD engine.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{} no molecules found in '{}'", "error:".red().bold(), path_to_yellow(.0))]
    MissingStructure(Box<Path>),

    #[error("{} unsupported protein force field '{}' (supported: ff14SB, ff19SB, ff99SB)", "error:".red().bold(), .0.yellow())]
    UnsupportedForceField(String),

    #[error("{} index group '{}' contains no atoms", "error:".red().bold(), .0.yellow())]
    EmptyIndexGroup(String),

    #[error("{} the MD engine failed during stage '{}' ({})", "error:".red().bold(), .stage.yellow(), .message)]
    EngineFailure { stage: String, message: String },
}
