//! Shortcuts for commonly used fluids.
//!
//! A [`Fluid`] names a substance and maps to a fixed
//! [`ThermophysicalProperties`] record. The record is plain data; writing it
//! into a case is done by [`write_thermophysical_properties`].
//!
//! ```
//! use firefish::fluids::Fluid;
//!
//! let air = Fluid::Air.thermophysical_properties();
//! assert_eq!(air.mixture.specie.mol_weight, 28.96);
//!
//! let fluid: Fluid = "DIMENSIONLESS_AIR".parse().unwrap();
//! assert_eq!(fluid, Fluid::DimensionlessAir);
//! assert!("WATER".parse::<Fluid>().is_err());
//! ```

mod air;
mod dimensionless_air;
mod error;
mod properties;

use std::{fmt, str::FromStr};

use crate::case::{Case, CaseError, FileClass, FileName};

pub use error::FluidError;
pub use properties::{
    Mixture, Specie, ThermoType, Thermodynamics, ThermophysicalProperties, Transport,
};

/// Commonly used fluids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fluid {
    Air,

    /// Air scaled so that the speed of sound is 1 m/s at 1 K.
    DimensionlessAir,
}

impl Fluid {
    pub const ALL: [Fluid; 2] = [Fluid::Air, Fluid::DimensionlessAir];

    /// Returns the canonical identifier, such as `AIR`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Fluid::Air => "AIR",
            Fluid::DimensionlessAir => "DIMENSIONLESS_AIR",
        }
    }

    /// Returns the thermophysical properties written for this fluid.
    #[must_use]
    pub const fn thermophysical_properties(self) -> ThermophysicalProperties {
        match self {
            Fluid::Air => air::PROPERTIES,
            Fluid::DimensionlessAir => dimensionless_air::PROPERTIES,
        }
    }
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses an identifier such as `AIR` or `dimensionless-air`.
///
/// Matching ignores case and treats `-` and spaces as `_`.
impl FromStr for Fluid {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        Fluid::ALL
            .into_iter()
            .find(|fluid| fluid.name() == normalized)
            .ok_or_else(|| FluidError::Unrecognized {
                name: s.to_string(),
            })
    }
}

/// Converts from the numeric tag, `0` for air and `1` for dimensionless air.
impl TryFrom<u8> for Fluid {
    type Error = FluidError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Fluid::Air),
            1 => Ok(Fluid::DimensionlessAir),
            _ => Err(FluidError::Unrecognized {
                name: tag.to_string(),
            }),
        }
    }
}

/// Merges the properties of `fluid` into `constant/thermophysicalProperties`.
///
/// # Errors
///
/// Returns a [`CaseError`] if the dictionary cannot be read or written.
pub fn write_thermophysical_properties(case: &Case, fluid: Fluid) -> Result<(), CaseError> {
    tracing::info!(%fluid, "writing thermophysical properties");
    case.update_data_file(
        FileName::ThermophysicalProperties,
        FileClass::Dictionary,
        fluid.thermophysical_properties().to_dict(),
    )
}

/// Resolves `name` to a [`Fluid`] and writes its properties.
///
/// Nothing is written if `name` is not recognized.
///
/// # Errors
///
/// Returns [`FluidError::Unrecognized`] for an unknown name, or
/// [`FluidError::Case`] if writing fails.
pub fn write_named_thermophysical_properties(case: &Case, name: &str) -> Result<(), FluidError> {
    let fluid: Fluid = name.parse()?;
    write_thermophysical_properties(case, fluid)?;
    Ok(())
}
