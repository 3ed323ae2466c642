// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Contains the implementation of the `GromacsProtocol` structure and its methods.

use std::path::Path;

use indexmap::IndexMap;

use super::config::MdpConfig;
use super::options::{
    canonicalize, Barostat, CommMode, ConstraintAlgorithm, CoulombModifier, CoulombType,
    CutoffScheme, DispCorr, Integrator, LjPmeCombRule, PressureCouplingType, Thermostat, VdwModifier,
    VdwType, PBC_OPTIONS,
};
use super::value::MdpValue;
use crate::errors::{MdpError, ProtocolError};

/// A Gromacs run protocol with one typed setter per supported mdp parameter.
///
/// The protocol is constructed from a base mdp file. Setters only record
/// pending changes; the configuration buffer is rewritten when
/// [`apply_pending`](GromacsProtocol::apply_pending) (or
/// [`into_config`](GromacsProtocol::into_config)) is called. Setters
/// validating against a closed option set accept any casing but always
/// record the canonical spelling.
#[derive(Debug, Clone)]
pub struct GromacsProtocol {
    config: MdpConfig,
    pending: IndexMap<String, MdpValue>,
}

impl GromacsProtocol {
    /// Construct a protocol from a base mdp file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MdpError> {
        Ok(Self::from_config(MdpConfig::from_file(path)?))
    }

    /// Construct a protocol from an already loaded mdp configuration.
    pub fn from_config(config: MdpConfig) -> Self {
        Self {
            config,
            pending: IndexMap::new(),
        }
    }

    /// Get the underlying mdp configuration. Pending changes are not included.
    pub fn config(&self) -> &MdpConfig {
        &self.config
    }

    /// Get mutable access to the underlying mdp configuration.
    pub fn config_mut(&mut self) -> &mut MdpConfig {
        &mut self.config
    }

    /// Get the pending parameter changes that have not yet been
    /// materialized into the configuration buffer.
    pub fn pending(&self) -> &IndexMap<String, MdpValue> {
        &self.pending
    }

    /// Materialize all pending parameter changes into the configuration buffer.
    pub fn apply_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.config.apply(&pending);
    }

    /// Materialize pending changes and hand off the finalized configuration.
    pub fn into_config(mut self) -> MdpConfig {
        self.apply_pending();
        self.config
    }

    /// Set an mdp parameter with an optional check against a set of allowed values.
    ///
    /// When `allowed` is provided, the value must be a string; it is matched
    /// case-insensitively against the set and recorded with canonical casing.
    /// The change is kept as pending state; the last write for a key wins.
    pub fn set_parameter(
        &mut self,
        parameter: &str,
        value: impl Into<MdpValue>,
        allowed: Option<&[&str]>,
    ) -> Result<&mut Self, ProtocolError> {
        let key = parameter.trim();
        let mut value = value.into();

        if let Some(allowed) = allowed {
            let MdpValue::Str(candidate) = &value else {
                return Err(ProtocolError::TypeMismatch(key.to_owned()));
            };

            value = MdpValue::Str(canonicalize(key, allowed, candidate)?.to_owned());
        }

        self.pending.insert(key.to_owned(), value);
        Ok(self)
    }

    fn record(&mut self, parameter: &str, value: impl Into<MdpValue>) -> &mut Self {
        self.pending.insert(parameter.to_owned(), value.into());
        self
    }

    // ========================================================================
    // Run control
    // ========================================================================

    /// Set 'integrator' (integration algorithm).
    pub fn set_integrator(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("integrator", value, Some(Integrator::OPTIONS))
    }

    /// Set 'tinit' (starting time, ps).
    pub fn set_tinit(&mut self, value: f64) -> &mut Self {
        self.record("tinit", value)
    }

    /// Set 'dt' (time step, ps).
    pub fn set_dt(&mut self, value: f64) -> &mut Self {
        self.record("dt", value)
    }

    /// Set 'nsteps' (number of steps).
    pub fn set_nsteps(&mut self, value: i64) -> &mut Self {
        self.record("nsteps", value)
    }

    /// Set 'init-step' (initial step index).
    pub fn set_init_step(&mut self, value: i64) -> &mut Self {
        self.record("init-step", value)
    }

    /// Set 'simulation-part' (part index for split runs).
    pub fn set_simulation_part(&mut self, value: i64) -> &mut Self {
        self.record("simulation-part", value)
    }

    /// Set 'mts' (enable multiple time stepping).
    pub fn set_mts(&mut self, value: bool) -> &mut Self {
        self.record("mts", value)
    }

    /// Set 'mass-repartition-factor' (hydrogen mass repartition factor).
    pub fn set_mass_repartition_factor(&mut self, value: f64) -> &mut Self {
        self.record("mass-repartition-factor", value)
    }

    /// Set 'comm-mode' (center-of-mass motion removal mode).
    pub fn set_comm_mode(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("comm-mode", value, Some(CommMode::OPTIONS))
    }

    /// Set 'nstcomm' (frequency of COM motion removal).
    pub fn set_nstcomm(&mut self, value: i64) -> &mut Self {
        self.record("nstcomm", value)
    }

    /// Set 'bd-fric' (Brownian dynamics friction).
    pub fn set_bd_fric(&mut self, value: f64) -> &mut Self {
        self.record("bd-fric", value)
    }

    /// Set 'ld-seed' (random seed for stochastic dynamics).
    pub fn set_ld_seed(&mut self, value: i64) -> &mut Self {
        self.record("ld-seed", value)
    }

    // ========================================================================
    // Minimization
    // ========================================================================

    /// Set 'emtol' (energy minimization convergence criterion).
    pub fn set_emtol(&mut self, value: f64) -> &mut Self {
        self.record("emtol", value)
    }

    /// Set 'emstep' (energy minimization step size).
    pub fn set_emstep(&mut self, value: f64) -> &mut Self {
        self.record("emstep", value)
    }

    /// Set 'niter' (maximum number of minimization iterations).
    pub fn set_niter(&mut self, value: i64) -> &mut Self {
        self.record("niter", value)
    }

    /// Set 'fcstep' (flexible constraints update interval).
    pub fn set_fcstep(&mut self, value: i64) -> &mut Self {
        self.record("fcstep", value)
    }

    /// Set 'nstcgsteep' (steepest-descent steps before conjugate gradient).
    pub fn set_nstcgsteep(&mut self, value: i64) -> &mut Self {
        self.record("nstcgsteep", value)
    }

    /// Set 'nbfgscorr' (L-BFGS history size).
    pub fn set_nbfgscorr(&mut self, value: i64) -> &mut Self {
        self.record("nbfgscorr", value)
    }

    /// Set 'rtpi' (test-particle insertion radius).
    pub fn set_rtpi(&mut self, value: f64) -> &mut Self {
        self.record("rtpi", value)
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Set 'nstxout' (coordinate output frequency).
    pub fn set_nstxout(&mut self, value: i64) -> &mut Self {
        self.record("nstxout", value)
    }

    /// Set 'nstvout' (velocity output frequency).
    pub fn set_nstvout(&mut self, value: i64) -> &mut Self {
        self.record("nstvout", value)
    }

    /// Set 'nstfout' (force output frequency).
    pub fn set_nstfout(&mut self, value: i64) -> &mut Self {
        self.record("nstfout", value)
    }

    /// Set 'nstlog' (log output frequency).
    pub fn set_nstlog(&mut self, value: i64) -> &mut Self {
        self.record("nstlog", value)
    }

    /// Set 'nstcalcenergy' (energy calculation frequency).
    pub fn set_nstcalcenergy(&mut self, value: i64) -> &mut Self {
        self.record("nstcalcenergy", value)
    }

    /// Set 'nstenergy' (energy write frequency).
    pub fn set_nstenergy(&mut self, value: i64) -> &mut Self {
        self.record("nstenergy", value)
    }

    /// Set 'nstxout-compressed' (compressed trajectory output frequency).
    pub fn set_nstxout_compressed(&mut self, value: i64) -> &mut Self {
        self.record("nstxout-compressed", value)
    }

    /// Set 'compressed-x-precision' (compressed trajectory precision).
    pub fn set_compressed_x_precision(&mut self, value: i64) -> &mut Self {
        self.record("compressed-x-precision", value)
    }

    // ========================================================================
    // Periodic boundary conditions and neighbor list
    // ========================================================================

    /// Set 'cutoff-scheme' (neighbor list scheme).
    pub fn set_cutoff_scheme(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("cutoff-scheme", value, Some(CutoffScheme::OPTIONS))
    }

    /// Set 'nstlist' (neighbor list update frequency).
    pub fn set_nstlist(&mut self, value: i64) -> &mut Self {
        self.record("nstlist", value)
    }

    /// Set 'pbc' (periodic boundary conditions).
    pub fn set_pbc(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("pbc", value, Some(PBC_OPTIONS))
    }

    /// Set 'periodic-molecules' (treat molecules as periodic).
    pub fn set_periodic_molecules(&mut self, value: bool) -> &mut Self {
        self.record("periodic-molecules", value)
    }

    /// Set 'verlet-buffer-tolerance' (target energy drift for buffer sizing).
    pub fn set_verlet_buffer_tolerance(&mut self, value: f64) -> &mut Self {
        self.record("verlet-buffer-tolerance", value)
    }

    /// Set 'verlet-buffer-pressure-tolerance' (target pressure error for buffer sizing).
    pub fn set_verlet_buffer_pressure_tolerance(&mut self, value: f64) -> &mut Self {
        self.record("verlet-buffer-pressure-tolerance", value)
    }

    /// Set 'rlist' (neighbor list cutoff, nm).
    pub fn set_rlist(&mut self, value: f64) -> &mut Self {
        self.record("rlist", value)
    }

    // ========================================================================
    // Short-range Coulomb
    // ========================================================================

    /// Set 'coulomb-modifier' (Coulomb potential modifier near the cutoff).
    pub fn set_coulomb_modifier(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("coulomb-modifier", value, Some(CoulombModifier::OPTIONS))
    }

    /// Set 'rcoulomb-switch' (Coulomb switching radius, nm).
    pub fn set_rcoulomb_switch(&mut self, value: f64) -> &mut Self {
        self.record("rcoulomb-switch", value)
    }

    /// Set 'rcoulomb' (Coulomb cutoff radius, nm).
    pub fn set_rcoulomb(&mut self, value: f64) -> &mut Self {
        self.record("rcoulomb", value)
    }

    /// Set 'epsilon-r' (relative dielectric constant).
    pub fn set_epsilon_r(&mut self, value: f64) -> &mut Self {
        self.record("epsilon-r", value)
    }

    /// Set 'epsilon-rf' (reaction-field dielectric constant).
    /// Accepts a number or a string (e.g. '0' meaning infinity).
    pub fn set_epsilon_rf(&mut self, value: impl Into<MdpValue>) -> &mut Self {
        self.record("epsilon-rf", value)
    }

    /// Set 'table-extension' (extension of tables beyond the cutoffs, nm).
    pub fn set_table_extension(&mut self, value: f64) -> &mut Self {
        self.record("table-extension", value)
    }

    // ========================================================================
    // Short-range van der Waals
    // ========================================================================

    /// Set 'vdw-type' (van der Waals interaction type).
    pub fn set_vdw_type(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("vdw-type", value, Some(VdwType::OPTIONS))
    }

    /// Set 'vdw-modifier' (Lennard-Jones modifier near the cutoff).
    pub fn set_vdw_modifier(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("vdw-modifier", value, Some(VdwModifier::OPTIONS))
    }

    /// Set 'rvdw-switch' (Lennard-Jones switching radius, nm).
    pub fn set_rvdw_switch(&mut self, value: f64) -> &mut Self {
        self.record("rvdw-switch", value)
    }

    /// Set 'rvdw' (Lennard-Jones cutoff radius, nm).
    pub fn set_rvdw(&mut self, value: f64) -> &mut Self {
        self.record("rvdw", value)
    }

    /// Set 'dispcorr' (long-range dispersion correction mode).
    pub fn set_dispcorr(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("dispcorr", value, Some(DispCorr::OPTIONS))
    }

    // ========================================================================
    // Long-range electrostatics / PME
    // ========================================================================

    /// Set 'coulombtype' (electrostatics method).
    pub fn set_coulombtype(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("coulombtype", value, Some(CoulombType::OPTIONS))
    }

    /// Set 'fourierspacing' (PME grid spacing, nm).
    pub fn set_fourierspacing(&mut self, value: f64) -> &mut Self {
        self.record("fourierspacing", value)
    }

    /// Set 'fourier-nx' (PME grid size along x).
    pub fn set_fourier_nx(&mut self, value: i64) -> &mut Self {
        self.record("fourier-nx", value)
    }

    /// Set 'fourier-ny' (PME grid size along y).
    pub fn set_fourier_ny(&mut self, value: i64) -> &mut Self {
        self.record("fourier-ny", value)
    }

    /// Set 'fourier-nz' (PME grid size along z).
    pub fn set_fourier_nz(&mut self, value: i64) -> &mut Self {
        self.record("fourier-nz", value)
    }

    /// Set 'pme-order' (PME interpolation order).
    pub fn set_pme_order(&mut self, value: i64) -> &mut Self {
        self.record("pme-order", value)
    }

    // ========================================================================
    // Ewald / LJ-PME
    // ========================================================================

    /// Set 'ewald-rtol' (PME/Ewald relative tolerance).
    pub fn set_ewald_rtol(&mut self, value: f64) -> &mut Self {
        self.record("ewald-rtol", value)
    }

    /// Set 'ewald-geometry' (Ewald boundary geometry).
    pub fn set_ewald_geometry(&mut self, value: &str) -> &mut Self {
        self.record("ewald-geometry", value)
    }

    /// Set 'epsilon-surface' (surface dielectric for non-3D Ewald).
    pub fn set_epsilon_surface(&mut self, value: f64) -> &mut Self {
        self.record("epsilon-surface", value)
    }

    /// Set 'ewald-rtol-lj' (LJ-PME relative tolerance).
    pub fn set_ewald_rtol_lj(&mut self, value: f64) -> &mut Self {
        self.record("ewald-rtol-lj", value)
    }

    /// Set 'lj-pme-comb-rule' (combination rule for LJ-PME).
    pub fn set_lj_pme_comb_rule(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("lj-pme-comb-rule", value, Some(LjPmeCombRule::OPTIONS))
    }

    // ========================================================================
    // Temperature and pressure coupling
    // ========================================================================

    /// Set 'tcoupl' (thermostat algorithm).
    pub fn set_tcoupl(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("tcoupl", value, Some(Thermostat::OPTIONS))
    }

    /// Set 'pcoupl' (barostat algorithm).
    pub fn set_pcoupl(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("pcoupl", value, Some(Barostat::OPTIONS))
    }

    /// Set 'pcoupltype' (pressure coupling geometry mode).
    pub fn set_pcoupltype(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter("pcoupltype", value, Some(PressureCouplingType::OPTIONS))
    }

    /// Set 'refcoord-scaling' (reference coordinate scaling under pressure coupling).
    pub fn set_refcoord_scaling(&mut self, value: &str) -> &mut Self {
        self.record("refcoord-scaling", value)
    }

    // ========================================================================
    // Constraints
    // ========================================================================

    /// Set 'constraints' (bond/angle constraint type).
    pub fn set_constraints(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter(
            "constraints",
            value,
            Some(super::options::Constraints::OPTIONS),
        )
    }

    /// Set 'constraint-algorithm' (constraint solver).
    pub fn set_constraint_algorithm(&mut self, value: &str) -> Result<&mut Self, ProtocolError> {
        self.set_parameter(
            "constraint-algorithm",
            value,
            Some(ConstraintAlgorithm::OPTIONS),
        )
    }

    /// Set 'continuation' (continue the run from a previous state).
    pub fn set_continuation(&mut self, value: bool) -> &mut Self {
        self.record("continuation", value)
    }

    /// Set 'shake-sor' (use successive over-relaxation for SHAKE).
    pub fn set_shake_sor(&mut self, value: bool) -> &mut Self {
        self.record("shake-sor", value)
    }

    /// Set 'shake-tol' (SHAKE tolerance).
    pub fn set_shake_tol(&mut self, value: f64) -> &mut Self {
        self.record("shake-tol", value)
    }

    /// Set 'lincs-order' (LINCS expansion order).
    pub fn set_lincs_order(&mut self, value: i64) -> &mut Self {
        self.record("lincs-order", value)
    }

    /// Set 'lincs-warnangle' (LINCS warning angle, degrees).
    pub fn set_lincs_warnangle(&mut self, value: f64) -> &mut Self {
        self.record("lincs-warnangle", value)
    }

    // ========================================================================
    // Walls
    // ========================================================================

    /// Set 'nwall' (number of walls).
    pub fn set_nwall(&mut self, value: i64) -> &mut Self {
        self.record("nwall", value)
    }

    /// Set 'wall-type' (wall potential type).
    pub fn set_wall_type(&mut self, value: &str) -> &mut Self {
        self.record("wall-type", value)
    }

    /// Set 'wall-r-linpot' (distance below which the wall potential is linear, nm).
    pub fn set_wall_r_linpot(&mut self, value: f64) -> &mut Self {
        self.record("wall-r-linpot", value)
    }

    /// Set 'wall-ewald-zfac' (box scaling factor for Ewald with walls).
    pub fn set_wall_ewald_zfac(&mut self, value: f64) -> &mut Self {
        self.record("wall-ewald-zfac", value)
    }

    // ========================================================================
    // Biasing and restraints
    // ========================================================================

    /// Set 'qmmm' (enable QM/MM coupling).
    pub fn set_qmmm(&mut self, value: bool) -> &mut Self {
        self.record("qmmm", value)
    }

    /// Set 'pull' (enable the pulling code).
    pub fn set_pull(&mut self, value: bool) -> &mut Self {
        self.record("pull", value)
    }

    /// Set 'awh' (enable accelerated weight histogram sampling).
    pub fn set_awh(&mut self, value: bool) -> &mut Self {
        self.record("awh", value)
    }

    /// Set 'rotation' (enable enforced rotation).
    pub fn set_rotation(&mut self, value: bool) -> &mut Self {
        self.record("rotation", value)
    }
}
