use super::properties::{
    Mixture, Specie, ThermoType, Thermodynamics, ThermophysicalProperties, Transport,
};

/// Air rescaled so that the speed of sound is 1 m/s at a temperature of 1 K.
///
/// The molecular weight gives `R = 8314.47 / 11640.3 ≈ 0.714` and with
/// `cp = 2.5` the heat capacity ratio stays at 1.4.
pub(super) const PROPERTIES: ThermophysicalProperties = ThermophysicalProperties {
    thermo_type: ThermoType::PERFECT_GAS,
    mixture: Mixture {
        specie: Specie {
            n_moles: 1,
            mol_weight: 11640.3,
        },
        thermodynamics: Thermodynamics { cp: 2.5, hf: 0.0 },
        transport: Transport { mu: 0.0, pr: 1.0 },
    },
};
