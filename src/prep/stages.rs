// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Stage descriptions for the preparation pipeline and the interface
//! required from the external MD engine.

use std::path::Path;

use derive_builder::Builder;
use getset::{CopyGetters, Getters};
use serde::Deserialize;

use crate::errors::PipelineError;
use crate::mdp::MdpConfig;

/// Default charge method used for ligand parameterization.
const DEFAULT_CHARGE_METHOD: &str = "BCC";

/// Default water model used for solvation.
const DEFAULT_WATER_MODEL: &str = "tip3p";

/// Default edge of the solvation box (nm).
const DEFAULT_BOX_SIZE: f64 = 8.0;

/// Default maximal number of minimization steps.
const DEFAULT_MINIMIZATION_STEPS: u32 = 10_000;

/// Default runtime of the heating equilibration (ps).
const DEFAULT_HEATING_RUNTIME: f64 = 500.0;

/// Default final temperature of the heating equilibration (K).
const DEFAULT_HEATING_TEMPERATURE: f64 = 300.0;

/// Amber force field used for protein parameterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ProteinForceField {
    #[default]
    #[serde(alias = "ff14sb", alias = "ff14SB")]
    Ff14Sb,
    #[serde(alias = "ff19sb", alias = "ff19SB")]
    Ff19Sb,
    #[serde(alias = "ff99sb", alias = "ff99SB")]
    Ff99Sb,
}

impl ProteinForceField {
    /// Parse a force field from its name. Matching is case-insensitive.
    pub fn from_name(name: &str) -> Result<Self, PipelineError> {
        match name.trim().to_lowercase().as_str() {
            "ff14sb" => Ok(Self::Ff14Sb),
            "ff19sb" => Ok(Self::Ff19Sb),
            "ff99sb" => Ok(Self::Ff99Sb),
            _ => Err(PipelineError::UnsupportedForceField(name.to_owned())),
        }
    }

    /// Canonical name of the force field.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ff14Sb => "ff14SB",
            Self::Ff19Sb => "ff19SB",
            Self::Ff99Sb => "ff99SB",
        }
    }
}

/// Settings for ligand parameterization with GAFF2.
#[derive(Debug, Clone, Getters, CopyGetters, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LigandCharges {
    /// Charge method used to derive partial charges.
    #[serde(default = "default_charge_method")]
    #[getset(get = "pub")]
    charge_method: String,
    /// Net charge of the ligand. Recommended if known;
    /// the engine derives it otherwise.
    #[serde(default)]
    #[getset(get_copy = "pub")]
    net_charge: Option<i32>,
}

fn default_charge_method() -> String {
    DEFAULT_CHARGE_METHOD.to_owned()
}

impl Default for LigandCharges {
    fn default() -> Self {
        Self {
            charge_method: default_charge_method(),
            net_charge: None,
        }
    }
}

impl LigandCharges {
    pub fn new(charge_method: &str, net_charge: Option<i32>) -> Self {
        Self {
            charge_method: charge_method.to_owned(),
            net_charge,
        }
    }
}

/// Settings for solvating the parameterized complex.
#[derive(Debug, Clone, Getters, CopyGetters, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Solvation {
    /// Water model used for solvation.
    #[serde(default = "default_water_model")]
    #[getset(get = "pub")]
    water_model: String,
    /// Edge of the cubic solvation box (nm).
    #[serde(default = "default_box_size")]
    #[getset(get_copy = "pub")]
    box_size: f64,
}

fn default_water_model() -> String {
    DEFAULT_WATER_MODEL.to_owned()
}

fn default_box_size() -> f64 {
    DEFAULT_BOX_SIZE
}

impl Default for Solvation {
    fn default() -> Self {
        Self {
            water_model: default_water_model(),
            box_size: DEFAULT_BOX_SIZE,
        }
    }
}

impl Solvation {
    pub fn new(water_model: &str, box_size: f64) -> Self {
        Self {
            water_model: water_model.to_owned(),
            box_size,
        }
    }
}

/// Settings for the energy minimization stage.
#[derive(Debug, Clone, Copy, CopyGetters, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Minimization {
    /// Maximal number of minimization steps.
    #[serde(default = "default_minimization_steps")]
    #[getset(get_copy = "pub")]
    steps: u32,
}

fn default_minimization_steps() -> u32 {
    DEFAULT_MINIMIZATION_STEPS
}

impl Default for Minimization {
    fn default() -> Self {
        Self {
            steps: DEFAULT_MINIMIZATION_STEPS,
        }
    }
}

impl Minimization {
    pub fn new(steps: u32) -> Self {
        Self { steps }
    }
}

/// Settings for the restrained NVT heating equilibration.
#[derive(Debug, Clone, Getters, CopyGetters, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Heating {
    /// Runtime of the equilibration (ps).
    #[serde(default = "default_heating_runtime")]
    #[getset(get_copy = "pub")]
    runtime: f64,
    /// Temperature at the start of the heating (K).
    #[serde(default)]
    #[getset(get_copy = "pub")]
    temperature_start: f64,
    /// Temperature at the end of the heating (K).
    #[serde(default = "default_heating_temperature")]
    #[getset(get_copy = "pub")]
    temperature_end: f64,
    /// Atoms restrained during the equilibration.
    #[serde(default = "default_restraint")]
    #[getset(get = "pub")]
    restraint: String,
}

fn default_heating_runtime() -> f64 {
    DEFAULT_HEATING_RUNTIME
}

fn default_heating_temperature() -> f64 {
    DEFAULT_HEATING_TEMPERATURE
}

fn default_restraint() -> String {
    "backbone".to_owned()
}

impl Default for Heating {
    /// Stepwise heating from 0 to 300 K over 500 ps with restrained backbone.
    fn default() -> Self {
        Self {
            runtime: DEFAULT_HEATING_RUNTIME,
            temperature_start: 0.0,
            temperature_end: DEFAULT_HEATING_TEMPERATURE,
            restraint: default_restraint(),
        }
    }
}

/// Interface to the external molecular-modeling toolkit and MD engine.
///
/// The preparation pipeline treats the engine as an opaque capability:
/// no physics or force-field math is performed by this crate.
pub trait MdEngine {
    /// A molecular system (one or more molecules, possibly parameterized).
    type System;
    /// A running MD-engine process.
    type Process: EngineProcess<System = Self::System>;

    /// Read a molecular system from a structure file.
    /// Fails with `MissingStructure` if the file contains no molecules.
    fn read_structure(&self, path: &Path) -> Result<Self::System, PipelineError>;

    /// Parameterize the protein and the ligand and combine them into
    /// a single system.
    fn parameterize(
        &self,
        protein: Self::System,
        ligand: Self::System,
        force_field: ProteinForceField,
        charges: &LigandCharges,
    ) -> Result<Self::System, PipelineError>;

    /// Solvate the system in a water box, adding counter ions.
    fn solvate(
        &self,
        system: Self::System,
        settings: &Solvation,
    ) -> Result<Self::System, PipelineError>;

    /// Minimize the energy of the system.
    fn minimize(
        &self,
        system: Self::System,
        settings: &Minimization,
    ) -> Result<Self::System, PipelineError>;

    /// Run the restrained heating equilibration.
    fn heat(&self, system: Self::System, settings: &Heating)
        -> Result<Self::System, PipelineError>;

    /// Launch an MD run using the finalized run-control configuration.
    /// The configuration buffer is handed over to the engine.
    fn launch(
        &self,
        system: Self::System,
        config: MdpConfig,
    ) -> Result<Self::Process, PipelineError>;
}

/// A running MD-engine process.
pub trait EngineProcess {
    type System;

    /// Block until the process finishes.
    fn wait(&mut self) -> Result<(), PipelineError>;

    /// Get the evolved system once the process has finished.
    fn system(&mut self) -> Result<Self::System, PipelineError>;
}

/// Description of the full preparation pipeline:
/// load, parameterize, solvate, minimize, heat.
#[derive(Debug, Clone, Builder, Getters, CopyGetters, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pipeline {
    /// Path to the protein structure file (PDB).
    #[builder(setter(into))]
    #[getset(get = "pub")]
    protein: String,

    /// Path to the ligand structure file (SDF, 3D coordinates recommended).
    #[builder(setter(into))]
    #[getset(get = "pub")]
    ligand: String,

    /// Amber force field used for the protein.
    #[builder(default)]
    #[serde(default)]
    #[getset(get_copy = "pub")]
    force_field: ProteinForceField,

    /// Ligand parameterization settings.
    #[builder(default)]
    #[serde(default)]
    #[getset(get = "pub")]
    charges: LigandCharges,

    /// Solvation settings.
    #[builder(default)]
    #[serde(default)]
    #[getset(get = "pub")]
    solvation: Solvation,

    /// Minimization settings.
    #[builder(default)]
    #[serde(default)]
    #[getset(get = "pub")]
    minimization: Minimization,

    /// Heating equilibration settings.
    #[builder(default)]
    #[serde(default)]
    #[getset(get = "pub")]
    heating: Heating,
}

impl Pipeline {
    /// Start constructing the pipeline description.
    pub fn new() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Run the preparation pipeline using the provided engine,
    /// returning the equilibrated system.
    pub fn run<E: MdEngine>(&self, engine: &E) -> Result<E::System, PipelineError> {
        let protein = engine.read_structure(Path::new(&self.protein))?;
        log::info!("Read protein structure from '{}'.", self.protein);

        let ligand = engine.read_structure(Path::new(&self.ligand))?;
        log::info!("Read ligand structure from '{}'.", self.ligand);

        let system = engine.parameterize(protein, ligand, self.force_field, &self.charges)?;
        log::info!(
            "Parameterized the complex (protein: {}, ligand charges: {}).",
            self.force_field.name(),
            self.charges.charge_method()
        );

        let system = engine.solvate(system, &self.solvation)?;
        log::info!(
            "Solvated the complex in a {} nm box of {} water.",
            self.solvation.box_size(),
            self.solvation.water_model()
        );

        let system = engine.minimize(system, &self.minimization)?;
        log::info!(
            "Minimized the system ({} steps at most).",
            self.minimization.steps()
        );

        let system = engine.heat(system, &self.heating)?;
        log::info!(
            "Heated the system from {} K to {} K over {} ps.",
            self.heating.temperature_start(),
            self.heating.temperature_end(),
            self.heating.runtime()
        );

        Ok(system)
    }

    /// Run the preparation pipeline and launch a production run using the
    /// provided run-control configuration. Blocks until the engine finishes
    /// and returns the evolved system.
    pub fn run_and_launch<E: MdEngine>(
        &self,
        engine: &E,
        config: MdpConfig,
    ) -> Result<E::System, PipelineError> {
        let system = self.run(engine)?;

        let mut process = engine.launch(system, config)?;
        log::info!("Started the MD engine.");

        process.wait()?;
        log::info!("The MD engine finished.");

        process.system()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_force_field_from_name() {
        assert_eq!(
            ProteinForceField::from_name("ff14SB").unwrap(),
            ProteinForceField::Ff14Sb
        );
        assert_eq!(
            ProteinForceField::from_name(" FF19sb ").unwrap(),
            ProteinForceField::Ff19Sb
        );
        assert_eq!(
            ProteinForceField::from_name("ff99sb").unwrap(),
            ProteinForceField::Ff99Sb
        );

        match ProteinForceField::from_name("charmm36") {
            Err(PipelineError::UnsupportedForceField(name)) => assert_eq!(name, "charmm36"),
            _ => panic!("unsupported force field should be rejected"),
        }
    }

    #[test]
    fn test_stage_defaults() {
        let charges = LigandCharges::default();
        assert_eq!(charges.charge_method(), "BCC");
        assert_eq!(charges.net_charge(), None);

        let solvation = Solvation::default();
        assert_eq!(solvation.water_model(), "tip3p");
        assert_eq!(solvation.box_size(), 8.0);

        let minimization = Minimization::default();
        assert_eq!(minimization.steps(), 10_000);

        let heating = Heating::default();
        assert_eq!(heating.runtime(), 500.0);
        assert_eq!(heating.temperature_start(), 0.0);
        assert_eq!(heating.temperature_end(), 300.0);
        assert_eq!(heating.restraint(), "backbone");
    }

    #[test]
    fn test_pipeline_from_yaml() {
        let pipeline: Pipeline = serde_yaml::from_str(
            "protein: protein.pdb
ligand: ligand.sdf
force_field: ff19SB
charges:
  net_charge: -1
solvation:
  water_model: tip4p
  box_size: 10.0
minimization:
  steps: 5000
heating:
  runtime: 200.0",
        )
        .unwrap();

        assert_eq!(pipeline.protein(), "protein.pdb");
        assert_eq!(pipeline.ligand(), "ligand.sdf");
        assert_eq!(pipeline.force_field(), ProteinForceField::Ff19Sb);
        assert_eq!(pipeline.charges().net_charge(), Some(-1));
        assert_eq!(pipeline.charges().charge_method(), "BCC");
        assert_eq!(pipeline.solvation().water_model(), "tip4p");
        assert_eq!(pipeline.solvation().box_size(), 10.0);
        assert_eq!(pipeline.minimization().steps(), 5000);
        assert_eq!(pipeline.heating().runtime(), 200.0);
        assert_eq!(pipeline.heating().temperature_end(), 300.0);
    }

    /// Engine that only records the order of the performed stages.
    struct RecordingEngine {
        stages: RefCell<Vec<&'static str>>,
    }

    impl RecordingEngine {
        fn new() -> Self {
            Self {
                stages: RefCell::new(Vec::new()),
            }
        }
    }

    struct FinishedProcess;

    impl EngineProcess for FinishedProcess {
        type System = usize;

        fn wait(&mut self) -> Result<(), PipelineError> {
            Ok(())
        }

        fn system(&mut self) -> Result<usize, PipelineError> {
            Ok(1)
        }
    }

    impl MdEngine for RecordingEngine {
        type System = usize;
        type Process = FinishedProcess;

        fn read_structure(&self, path: &Path) -> Result<usize, PipelineError> {
            if path.to_str() == Some("empty.pdb") {
                return Err(PipelineError::MissingStructure(Box::from(path)));
            }

            self.stages.borrow_mut().push("read");
            Ok(0)
        }

        fn parameterize(
            &self,
            protein: usize,
            _ligand: usize,
            _force_field: ProteinForceField,
            _charges: &LigandCharges,
        ) -> Result<usize, PipelineError> {
            self.stages.borrow_mut().push("parameterize");
            Ok(protein + 1)
        }

        fn solvate(&self, system: usize, _settings: &Solvation) -> Result<usize, PipelineError> {
            self.stages.borrow_mut().push("solvate");
            Ok(system + 1)
        }

        fn minimize(
            &self,
            system: usize,
            _settings: &Minimization,
        ) -> Result<usize, PipelineError> {
            self.stages.borrow_mut().push("minimize");
            Ok(system + 1)
        }

        fn heat(&self, system: usize, _settings: &Heating) -> Result<usize, PipelineError> {
            self.stages.borrow_mut().push("heat");
            Ok(system + 1)
        }

        fn launch(
            &self,
            _system: usize,
            _config: MdpConfig,
        ) -> Result<FinishedProcess, PipelineError> {
            self.stages.borrow_mut().push("launch");
            Ok(FinishedProcess)
        }
    }

    #[test]
    fn test_pipeline_stage_order() {
        let pipeline = Pipeline::new()
            .protein("protein.pdb")
            .ligand("ligand.sdf")
            .build()
            .unwrap();

        let engine = RecordingEngine::new();
        let system = pipeline.run(&engine).unwrap();

        assert_eq!(system, 4);
        assert_eq!(
            *engine.stages.borrow(),
            ["read", "read", "parameterize", "solvate", "minimize", "heat"]
        );
    }

    #[test]
    fn test_pipeline_run_and_launch() {
        let pipeline = Pipeline::new()
            .protein("protein.pdb")
            .ligand("ligand.sdf")
            .build()
            .unwrap();

        let engine = RecordingEngine::new();
        let config = MdpConfig::from_lines(vec!["nsteps = 100".to_owned()]);
        let system = pipeline.run_and_launch(&engine, config).unwrap();

        assert_eq!(system, 1);
        assert_eq!(engine.stages.borrow().last(), Some(&"launch"));
    }

    #[test]
    fn test_pipeline_missing_structure() {
        let pipeline = Pipeline::new()
            .protein("empty.pdb")
            .ligand("ligand.sdf")
            .build()
            .unwrap();

        let engine = RecordingEngine::new();
        match pipeline.run(&engine) {
            Err(PipelineError::MissingStructure(path)) => {
                assert_eq!(path.to_str(), Some("empty.pdb"))
            }
            _ => panic!("empty structure file should abort the pipeline"),
        }
    }
}
