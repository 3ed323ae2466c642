// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Parsing, editing and validated construction of Gromacs mdp run-control files.

pub mod config;
pub mod options;
mod parser;
pub mod protocol;
pub mod value;

pub use config::MdpConfig;
pub use protocol::GromacsProtocol;
pub use value::MdpValue;
