use uom::si::{
    available_energy::joule_per_kilogram,
    dynamic_viscosity::pascal_second,
    f64::{DynamicViscosity, MolarMass, Ratio, SpecificHeatCapacity, ThermodynamicTemperature, Velocity},
    molar_mass::gram_per_mole,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::dict::Dict;
use crate::support::units::{SpecificEnthalpy, SpecificGasConstant};

/// Universal gas constant as used by OpenFOAM, J/(kmol·K).
const UNIVERSAL_GAS_CONSTANT: f64 = 8314.47;

/// The `thermoType` block selecting the solver's thermophysical model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermoType {
    /// Written as the `type` key.
    pub kind: &'static str,
    pub mixture: &'static str,
    pub transport: &'static str,
    pub thermo: &'static str,
    pub equation_of_state: &'static str,
    pub specie: &'static str,
    pub energy: &'static str,
}

impl ThermoType {
    /// Constant-property perfect gas solved for sensible internal energy.
    pub const PERFECT_GAS: Self = Self {
        kind: "hePsiThermo",
        mixture: "pureMixture",
        transport: "const",
        thermo: "hConst",
        equation_of_state: "perfectGas",
        specie: "specie",
        energy: "sensibleInternalEnergy",
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Specie {
    pub n_moles: u32,

    /// Molecular weight in kg/kmol.
    pub mol_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermodynamics {
    /// Specific heat at constant pressure, J/(kg·K).
    pub cp: f64,

    /// Heat of formation, J/kg.
    pub hf: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transport {
    /// Dynamic viscosity, Pa·s.
    pub mu: f64,

    /// Prandtl number.
    pub pr: f64,
}

/// The `mixture` block: specie, thermodynamic and transport constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixture {
    pub specie: Specie,
    pub thermodynamics: Thermodynamics,
    pub transport: Transport,
}

/// Contents of `constant/thermophysicalProperties` for a single fluid.
///
/// Numbers are stored exactly as they are written to disk. The typed
/// accessors convert them to [`uom`] quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermophysicalProperties {
    pub thermo_type: ThermoType,
    pub mixture: Mixture,
}

impl ThermophysicalProperties {
    /// Builds the dictionary written to the case.
    #[must_use]
    pub fn to_dict(&self) -> Dict {
        let t = &self.thermo_type;
        let thermo_type = Dict::new()
            .with("type", t.kind)
            .with("mixture", t.mixture)
            .with("transport", t.transport)
            .with("thermo", t.thermo)
            .with("equationOfState", t.equation_of_state)
            .with("specie", t.specie)
            .with("energy", t.energy);

        let m = &self.mixture;
        let mixture = Dict::new()
            .with(
                "specie",
                Dict::new()
                    .with("nMoles", m.specie.n_moles)
                    .with("molWeight", m.specie.mol_weight),
            )
            .with(
                "thermodynamics",
                Dict::new()
                    .with("Cp", m.thermodynamics.cp)
                    .with("Hf", m.thermodynamics.hf),
            )
            .with(
                "transport",
                Dict::new()
                    .with("mu", m.transport.mu)
                    .with("Pr", m.transport.pr),
            );

        Dict::new()
            .with("thermoType", thermo_type)
            .with("mixture", mixture)
    }

    #[must_use]
    pub fn molar_mass(&self) -> MolarMass {
        MolarMass::new::<gram_per_mole>(self.mixture.specie.mol_weight)
    }

    #[must_use]
    pub fn cp(&self) -> SpecificHeatCapacity {
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(self.mixture.thermodynamics.cp)
    }

    #[must_use]
    pub fn formation_enthalpy(&self) -> SpecificEnthalpy {
        SpecificEnthalpy::new::<joule_per_kilogram>(self.mixture.thermodynamics.hf)
    }

    #[must_use]
    pub fn viscosity(&self) -> DynamicViscosity {
        DynamicViscosity::new::<pascal_second>(self.mixture.transport.mu)
    }

    #[must_use]
    pub fn prandtl(&self) -> Ratio {
        Ratio::new::<ratio>(self.mixture.transport.pr)
    }

    /// Specific gas constant `R = R_u / W`.
    #[must_use]
    pub fn gas_constant(&self) -> SpecificGasConstant {
        SpecificGasConstant::new::<joule_per_kilogram_kelvin>(
            UNIVERSAL_GAS_CONSTANT / self.mixture.specie.mol_weight,
        )
    }

    /// Heat capacity ratio `γ = cp / (cp - R)`.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        let cp = self.mixture.thermodynamics.cp;
        let r = self.gas_constant().get::<joule_per_kilogram_kelvin>();
        cp / (cp - r)
    }

    /// Perfect-gas speed of sound `a = sqrt(γ·R·T)`.
    #[must_use]
    pub fn speed_of_sound(&self, temperature: ThermodynamicTemperature) -> Velocity {
        let r = self.gas_constant().get::<joule_per_kilogram_kelvin>();
        let t = temperature.get::<kelvin>();
        Velocity::new::<meter_per_second>((self.gamma() * r * t).sqrt())
    }
}
