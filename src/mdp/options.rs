// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Closed sets of legal values for enumerated mdp parameters.
//!
//! Each option set lists its canonical tokens exactly as Gromacs spells them.
//! Lookup is case-insensitive, but the value written into the mdp file always
//! uses the canonical casing.

use std::fmt::{self, Display};

use crate::errors::ProtocolError;
use crate::mdp::MdpValue;

/// Legal values of the 'pbc' parameter.
pub const PBC_OPTIONS: &[&str] = &["xyz", "no", "xy", "screw"];

/// Match `candidate` case-insensitively against a set of canonical tokens.
/// Returns the canonical spelling of the matched token.
pub fn canonicalize<'a>(
    key: &str,
    allowed: &[&'a str],
    candidate: &str,
) -> Result<&'a str, ProtocolError> {
    let lowered = candidate.trim().to_lowercase();

    allowed
        .iter()
        .find(|option| option.to_lowercase() == lowered)
        .copied()
        .ok_or_else(|| ProtocolError::InvalidEnumValue {
            key: key.to_owned(),
            value: candidate.to_owned(),
        })
}

macro_rules! impl_option_set {
    ($name:ident) => {
        impl $name {
            /// Canonical mdp token of this option.
            pub fn as_str(self) -> &'static str {
                Self::OPTIONS[self as usize]
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl From<$name> for MdpValue {
            fn from(value: $name) -> Self {
                MdpValue::Str(value.as_str().to_owned())
            }
        }
    };
}

/// Integration algorithm for time propagation of the equations of motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integrator {
    /// Leap-frog integrator.
    LeapFrog,
    /// Velocity Verlet integrator.
    VelocityVerlet,
    /// Leap-frog stochastic dynamics.
    StochasticDynamics,
    /// Brownian (Langevin) dynamics.
    BrownianDynamics,
}

impl Integrator {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] = &["md", "md-vv", "sd", "bd"];
}

impl_option_set!(Integrator);

/// Center-of-mass motion removal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommMode {
    Linear,
    Angular,
    LinearAccelerationCorrection,
    None,
}

impl CommMode {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] = &[
        "Linear",
        "Angular",
        "Linear-acceleration-correction",
        "None",
    ];
}

impl_option_set!(CommMode);

/// Neighbor-list and cutoff handling scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoffScheme {
    Verlet,
    Group,
}

impl CutoffScheme {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] = &["Verlet", "group"];
}

impl_option_set!(CutoffScheme);

/// Electrostatics method for long-range Coulomb interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoulombType {
    CutOff,
    Ewald,
    Pme,
    Pm3Ad,
    ReactionField,
}

impl CoulombType {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] =
        &["Cut-off", "Ewald", "PME", "PM3-AD", "Reaction-field"];
}

impl_option_set!(CoulombType);

/// Modifier applied to short-range Coulomb interactions near the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoulombModifier {
    PotentialShift,
    None,
}

impl CoulombModifier {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] = &["Potential-shift", "None"];
}

impl_option_set!(CoulombModifier);

/// Method for computing van der Waals interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VdwType {
    CutOff,
    Shift,
    Pme,
    Switch,
}

impl VdwType {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] = &["Cut-off", "Shift", "PME", "Switch"];
}

impl_option_set!(VdwType);

/// Modifier applied to Lennard-Jones interactions near the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VdwModifier {
    PotentialShift,
    None,
    ForceSwitch,
    PotentialSwitch,
}

impl VdwModifier {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] =
        &["Potential_Shift", "None", "Force-switch", "potential-switch"];
}

impl_option_set!(VdwModifier);

/// Long-range dispersion correction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispCorr {
    No,
    EnergyPressure,
    Energy,
}

impl DispCorr {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] = &["no", "EnerPres", "Energy"];
}

impl_option_set!(DispCorr);

/// Combination rule for Lennard-Jones PME interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LjPmeCombRule {
    Geometric,
    LorentzBerthelot,
}

impl LjPmeCombRule {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] = &["Geometric", "Lorentz-Berthelot"];
}

impl_option_set!(LjPmeCombRule);

/// Thermostat algorithm for temperature coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thermostat {
    No,
    Berendsen,
    NoseHoover,
    Andersen,
    AndersenMassive,
    VRescale,
}

impl Thermostat {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] = &[
        "no",
        "berendsen",
        "nose-hoover",
        "andersen",
        "andersen-massive",
        "v-rescale",
    ];
}

impl_option_set!(Thermostat);

/// Barostat algorithm for pressure coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Barostat {
    No,
    Berendsen,
    CRescale,
    ParrinelloRahman,
    Mttk,
}

impl Barostat {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] =
        &["no", "Berendsen", "C-rescale", "Parrinello-Rahman", "MTTK"];
}

impl_option_set!(Barostat);

/// Pressure coupling geometry mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureCouplingType {
    Isotropic,
    SemiIsotropic,
    Anisotropic,
    SurfaceTension,
}

impl PressureCouplingType {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] =
        &["isotropic", "semiisotropic", "anisotropic", "surface-tension"];
}

impl_option_set!(PressureCouplingType);

/// Bond/angle constraint type applied during the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraints {
    None,
    HBonds,
    AllBonds,
    HAngles,
    AllAngles,
}

impl Constraints {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] =
        &["none", "h-bonds", "all-bonds", "h-angles", "all-angles"];
}

impl_option_set!(Constraints);

/// Constraint solver algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintAlgorithm {
    Lincs,
    Shake,
}

impl ConstraintAlgorithm {
    /// Canonical tokens of this option set.
    pub const OPTIONS: &'static [&'static str] = &["LINCS", "SHAKE"];
}

impl_option_set!(ConstraintAlgorithm);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_case_insensitive() {
        assert_eq!(
            canonicalize("integrator", Integrator::OPTIONS, "MD").unwrap(),
            "md"
        );
        assert_eq!(
            canonicalize("integrator", Integrator::OPTIONS, "md-VV").unwrap(),
            "md-vv"
        );
        assert_eq!(
            canonicalize("pcoupl", Barostat::OPTIONS, "parrinello-rahman").unwrap(),
            "Parrinello-Rahman"
        );
        assert_eq!(
            canonicalize("cutoff-scheme", CutoffScheme::OPTIONS, "verlet").unwrap(),
            "Verlet"
        );
        assert_eq!(canonicalize("pbc", PBC_OPTIONS, "XYZ").unwrap(), "xyz");
    }

    #[test]
    fn test_canonicalize_trims_whitespace() {
        assert_eq!(
            canonicalize("coulombtype", CoulombType::OPTIONS, " pme ").unwrap(),
            "PME"
        );
    }

    #[test]
    fn test_canonicalize_invalid_value() {
        match canonicalize("integrator", Integrator::OPTIONS, "bogus") {
            Err(ProtocolError::InvalidEnumValue { key, value }) => {
                assert_eq!(key, "integrator");
                assert_eq!(value, "bogus");
            }
            _ => panic!("invalid value should be rejected"),
        }
    }

    #[test]
    fn test_as_str_matches_options() {
        assert_eq!(Integrator::LeapFrog.as_str(), "md");
        assert_eq!(Integrator::BrownianDynamics.as_str(), "bd");
        assert_eq!(CommMode::LinearAccelerationCorrection.as_str(), "Linear-acceleration-correction");
        assert_eq!(CoulombType::ReactionField.as_str(), "Reaction-field");
        assert_eq!(VdwModifier::ForceSwitch.as_str(), "Force-switch");
        assert_eq!(DispCorr::EnergyPressure.as_str(), "EnerPres");
        assert_eq!(Thermostat::VRescale.as_str(), "v-rescale");
        assert_eq!(Barostat::Mttk.as_str(), "MTTK");
        assert_eq!(Constraints::HBonds.as_str(), "h-bonds");
        assert_eq!(ConstraintAlgorithm::Lincs.as_str(), "LINCS");
    }

    #[test]
    fn test_enum_converts_to_canonical_string_value() {
        assert_eq!(
            MdpValue::from(Integrator::VelocityVerlet),
            MdpValue::Str("md-vv".to_owned())
        );
        assert_eq!(
            MdpValue::from(ConstraintAlgorithm::Shake),
            MdpValue::Str("SHAKE".to_owned())
        );
    }

    #[test]
    fn test_display_uses_canonical_casing() {
        assert_eq!(PressureCouplingType::SemiIsotropic.to_string(), "semiisotropic");
        assert_eq!(LjPmeCombRule::LorentzBerthelot.to_string(), "Lorentz-Berthelot");
    }
}
