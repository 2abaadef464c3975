use std::fmt;

/// Physical dimensions of a field, as exponents of the seven SI base units.
///
/// The order is mass, length, time, temperature, quantity, current and
/// luminous intensity, which is the order OpenFOAM expects in a
/// `dimensions` entry.
///
/// ```
/// use firefish::dict::Dimension;
///
/// let pressure = Dimension::new(1, -1, -2, 0, 0, 0, 0);
/// assert_eq!(pressure.to_string(), "[1 -1 -2 0 0 0 0]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    pub mass: i8,
    pub length: i8,
    pub time: i8,
    pub temperature: i8,
    pub quantity: i8,
    pub current: i8,
    pub luminous_intensity: i8,
}

impl Dimension {
    #[must_use]
    pub const fn new(
        mass: i8,
        length: i8,
        time: i8,
        temperature: i8,
        quantity: i8,
        current: i8,
        luminous_intensity: i8,
    ) -> Self {
        Self {
            mass,
            length,
            time,
            temperature,
            quantity,
            current,
            luminous_intensity,
        }
    }

    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0, 0, 0, 0, 0);
    pub const PRESSURE: Self = Self::new(1, -1, -2, 0, 0, 0, 0);
    pub const VELOCITY: Self = Self::new(0, 1, -1, 0, 0, 0, 0);
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 1, 0, 0, 0);

    /// Kinematic pressure, used by incompressible solvers.
    pub const KINEMATIC_PRESSURE: Self = Self::new(0, 2, -2, 0, 0, 0, 0);

    #[must_use]
    pub const fn exponents(&self) -> [i8; 7] {
        [
            self.mass,
            self.length,
            self.time,
            self.temperature,
            self.quantity,
            self.current,
            self.luminous_intensity,
        ]
    }

    #[must_use]
    pub const fn from_exponents(exponents: [i8; 7]) -> Self {
        let [m, l, t, k, n, a, j] = exponents;
        Self::new(m, l, t, k, n, a, j)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [m, l, t, k, n, a, j] = self.exponents();
        write!(f, "[{m} {l} {t} {k} {n} {a} {j}]")
    }
}
