use super::properties::{
    Mixture, Specie, ThermoType, Thermodynamics, ThermophysicalProperties, Transport,
};

/// Dry air at standard conditions, inviscid.
pub(super) const PROPERTIES: ThermophysicalProperties = ThermophysicalProperties {
    thermo_type: ThermoType::PERFECT_GAS,
    mixture: Mixture {
        specie: Specie {
            n_moles: 1,
            mol_weight: 28.96,
        },
        thermodynamics: Thermodynamics {
            cp: 1004.5,
            hf: 2.544e6,
        },
        transport: Transport { mu: 0.0, pr: 1.0 },
    },
};
