// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! This module contains structures and methods for assembling finalized
//! run-control files and for driving the preparation pipeline.

pub mod index;
pub mod stages;

use derive_builder::Builder;
use getset::{CopyGetters, Getters};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::errors::PrepError;
use crate::mdp::{GromacsProtocol, MdpConfig, MdpValue};

pub use index::IndexGroups;
pub use stages::{
    EngineProcess, Heating, LigandCharges, MdEngine, Minimization, Pipeline, ProteinForceField,
    Solvation,
};

/// Structure holding everything necessary to assemble a finalized mdp file
/// from a base configuration and optional parameter overrides.
#[derive(Debug, Clone, Builder, Getters, CopyGetters, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Prep {
    /// Path to the base mdp file providing the default run parameters.
    #[builder(setter(into))]
    #[getset(get = "pub")]
    mdp: String,

    /// Path to a `key=value` file with parameter overrides.
    /// Optional parameter. Overrides from this file are applied first.
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    #[getset(get = "pub")]
    overrides_file: Option<String>,

    /// Mapping of parameter overrides applied after the overrides file.
    /// Iteration order of the mapping is the application order.
    #[builder(default)]
    #[serde(default)]
    #[getset(get = "pub")]
    overrides: IndexMap<String, serde_yaml::Value>,

    /// Path to the output mdp file where the finalized configuration
    /// will be written.
    #[builder(setter(into))]
    #[getset(get = "pub")]
    output: String,

    /// Overwrite the output file if it already exists instead of backing it up.
    #[builder(default, setter(custom))]
    #[serde(default)]
    #[getset(get_copy = "pub")]
    overwrite: bool,

    /// Print nothing to the standard output during the assembly.
    #[builder(default, setter(custom))]
    #[serde(default)]
    #[getset(get_copy = "pub")]
    silent: bool,
}

impl Prep {
    /// Start constructing the mdp assembly.
    pub fn new() -> PrepBuilder {
        PrepBuilder::default()
    }

    /// Assemble the finalized mdp configuration.
    ///
    /// The base mdp file is read once; overrides from the overrides file
    /// are applied first, followed by overrides from the mapping. A later
    /// write for the same key unconditionally wins over an earlier one.
    pub fn assemble(&self) -> Result<MdpConfig, PrepError> {
        let mut protocol = GromacsProtocol::from_file(&self.mdp)?;
        log::info!("Read base mdp file '{}'.", self.mdp);

        if let Some(file) = &self.overrides_file {
            let parsed = protocol.config_mut().apply_file(file)?;
            log::info!(
                "Applied {} mdp override(s) from file '{}'.",
                parsed.len(),
                file
            );
        }

        if !self.overrides.is_empty() {
            let mut changes = IndexMap::new();
            for (key, value) in &self.overrides {
                changes.insert(key.clone(), MdpValue::try_from(value.clone())?);
            }

            protocol.config_mut().apply(&changes);
            log::info!("Applied {} mdp override(s) from the mapping.", changes.len());
        }

        Ok(protocol.into_config())
    }

    /// Assemble the finalized mdp configuration and write it into the output file.
    pub fn run(&self) -> Result<(), PrepError> {
        let config = self.assemble()?;
        config.write(&self.output, self.overwrite)?;
        log::info!("Written finalized mdp file into '{}'.", self.output);

        Ok(())
    }
}

impl PrepBuilder {
    /// Be silent. Print nothing to the standard output during the assembly.
    #[inline(always)]
    pub fn silent(&mut self) -> &mut Self {
        self.silent = Some(true);
        self
    }

    /// Do not make backups. Overwrite the output file if it exists.
    #[inline(always)]
    pub fn overwrite(&mut self) -> &mut Self {
        self.overwrite = Some(true);
        self
    }

    /// Add a single override to the overrides mapping.
    pub fn set(&mut self, key: &str, value: impl Into<serde_yaml::Value>) -> &mut Self {
        self.overrides
            .get_or_insert_with(IndexMap::new)
            .insert(key.to_owned(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prep_builder() {
        let prep = Prep::new()
            .mdp("default.mdp")
            .output("final.mdp")
            .set("nsteps", 1000)
            .set("dt", 0.001)
            .build()
            .unwrap();

        assert_eq!(prep.mdp(), "default.mdp");
        assert_eq!(prep.output(), "final.mdp");
        assert_eq!(prep.overrides_file(), &None);
        assert_eq!(prep.overrides().len(), 2);
        assert!(!prep.silent());
        assert!(!prep.overwrite());
    }

    #[test]
    fn test_prep_builder_missing_field() {
        assert!(Prep::new().mdp("default.mdp").build().is_err());
    }

    #[test]
    fn test_prep_from_yaml() {
        let prep: Prep = serde_yaml::from_str(
            "mdp: default.mdp
overrides_file: changes.txt
overrides:
  nsteps: 1000
  tcoupl: v-rescale
output: final.mdp
overwrite: true",
        )
        .unwrap();

        assert_eq!(prep.mdp(), "default.mdp");
        assert_eq!(prep.overrides_file(), &Some("changes.txt".to_owned()));
        assert_eq!(prep.overrides().len(), 2);
        assert_eq!(prep.output(), "final.mdp");
        assert!(prep.overwrite());
        assert!(!prep.silent());
    }

    #[test]
    fn test_prep_from_yaml_unknown_field() {
        let result: Result<Prep, _> = serde_yaml::from_str(
            "mdp: default.mdp
output: final.mdp
unknown_field: 7",
        );

        assert!(result.is_err());
    }
}
