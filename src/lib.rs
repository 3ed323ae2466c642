// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! # gmxprep: Preparing Gromacs simulations of protein-ligand complexes
//!
//! Crate for preparing Gromacs molecular dynamics simulations: assembling
//! run-control (mdp) files from defaults and overrides, and orchestrating
//! the load → parameterize → solvate → minimize → heat preparation pipeline
//! through an external MD engine.
//!
//! The heart of the crate is the mdp editor: it rewrites `key = value` lines
//! in place while preserving the formatting of the file (inline comments,
//! alignment, ordering), and offers a validated, typed protocol layer on top.
//!
//! ## Usage
//!
//! Run:
//!
//! ```bash
//! $ cargo add gmxprep
//! ```
//!
//! Import the crate in your Rust code:
//!
//! ```rust
//! use gmxprep::prelude::*;
//! ```
//!
//! `gmxprep` is also available as a command line tool. You can install it using:
//! ```bash
//! $ cargo install gmxprep
//! ```
//!
//! ## Examples
//!
//! Assembling a finalized mdp file from a base configuration and overrides.
//!
//! ```no_run
//! use gmxprep::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // construct the assembly
//!     let prep = Prep::new()
//!         .mdp("default.mdp")              // base mdp file
//!         .overrides_file("changes.txt")   // key=value overrides file
//!         .set("nsteps", 50_000)           // in-code overrides win over the file
//!         .set("tcoupl", "v-rescale")
//!         .output("production.mdp")        // finalized mdp file
//!         .build()?;                       // constructing the assembly
//!
//!     // activate colog if you want logging (requires the `colog` crate)
//!     colog::init();
//!
//!     // assemble the configuration and write the output
//!     prep.run()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ***
//!
//! Editing an mdp configuration directly. Only the values change; key text,
//! whitespace and inline comments are preserved.
//!
//! ```rust
//! use gmxprep::prelude::*;
//!
//! let mut mdp = MdpConfig::from_lines(vec![
//!     "integrator = md ; leap-frog".to_owned(),
//!     "nstlog    = 500   ; log frequency".to_owned(),
//! ]);
//!
//! mdp.set("nstlog", 1000);
//! mdp.set("dt", 0.002);
//!
//! assert_eq!(mdp.lines()[1], "nstlog    = 1000   ; log frequency");
//! ```
//!
//! ***
//!
//! Using the validated protocol wrapper. Values of enumerated parameters are
//! checked against the legal option sets; matching is case-insensitive, but
//! the canonical spelling is always written.
//!
//! ```no_run
//! use gmxprep::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let mut protocol = GromacsProtocol::from_file("default.mdp")?;
//!
//!     protocol.set_integrator("MD")?;       // recorded as 'md'
//!     protocol.set_dt(0.001).set_nsteps(100).set_nstlog(500);
//!     protocol.set_pcoupl("parrinello-rahman")?;  // recorded as 'Parrinello-Rahman'
//!
//!     // pending changes are materialized into the buffer on hand-off
//!     let config = protocol.into_config();
//!     config.write("production.mdp", false)?;
//!
//!     Ok(())
//! }
//! ```

/// Version of the `gmxprep` crate.
pub const GMXPREP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Message that should be added to every panic.
pub(crate) const PANIC_MESSAGE: &str =
    "\n\n\n            >>> THIS SHOULD NOT HAVE HAPPENED! PLEASE REPORT THIS ERROR <<<
(open an issue at 'github.com/Ladme/gmxprep/issues' or write an e-mail to 'ladmeb@gmail.com')\n\n";

pub mod errors;
pub mod mdp;
pub mod prep;

/// This module contains re-exported public structures of the `gmxprep` crate.
pub mod prelude {
    pub use super::mdp::{
        options::{
            Barostat, CommMode, ConstraintAlgorithm, Constraints, CoulombModifier, CoulombType,
            CutoffScheme, DispCorr, Integrator, LjPmeCombRule, PressureCouplingType, Thermostat,
            VdwModifier, VdwType,
        },
        GromacsProtocol, MdpConfig, MdpValue,
    };

    pub use super::prep::{
        EngineProcess, Heating, IndexGroups, LigandCharges, MdEngine, Minimization, Pipeline,
        Prep, ProteinForceField, Solvation,
    };
}
