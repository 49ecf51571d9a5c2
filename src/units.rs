use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Boltzmann constant kB (kJ/(mol·K)).
pub const BOLTZMANN: f64 = 8.314_462_618_153_24e-3;

/// Coulomb prefactor 1/(4πε₀) (kJ·nm/(mol·e²)).
pub const COULOMB_CONSTANT: f64 = 138.935_456;

/// A named unit, defined by its value in the internal base system
/// (nm, ps, amu, K, kJ/mol, kJ/(mol·nm³), nm³).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub symbol: &'static str,
    factor: f64,
}

pub const NANOMETER: Unit = Unit { symbol: "nm", factor: 1.0 };
pub const ANGSTROM: Unit = Unit { symbol: "Å", factor: 0.1 };
pub const PICOSECOND: Unit = Unit { symbol: "ps", factor: 1.0 };
pub const FEMTOSECOND: Unit = Unit { symbol: "fs", factor: 1.0e-3 };
pub const DALTON: Unit = Unit { symbol: "amu", factor: 1.0 };
pub const KELVIN: Unit = Unit { symbol: "K", factor: 1.0 };
pub const KILOJOULE_PER_MOLE: Unit = Unit { symbol: "kJ/mol", factor: 1.0 };
pub const KILOCALORIE_PER_MOLE: Unit = Unit { symbol: "kcal/mol", factor: 4.184 };
pub const BAR: Unit = Unit { symbol: "bar", factor: 0.060_221_408_57 };
pub const ATMOSPHERE: Unit = Unit { symbol: "atm", factor: 0.061_019_342_23 };
pub const NANOMETER_CUBED: Unit = Unit { symbol: "nm³", factor: 1.0 };

/// A dimensional value, stored in the internal base system.
///
/// Construct one by multiplying a float with a unit (`300.0 * KELVIN`),
/// and convert back to a bare float by dividing by a unit
/// (`energy / KILOCALORIE_PER_MOLE`). The crate does not track dimensions;
/// callers are expected to divide by a unit of the dimension they put in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    value: f64,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value: value * unit.factor }
    }

    pub fn is_nan(&self) -> bool {
        self.value.is_nan()
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

impl Mul<Unit> for f64 {
    type Output = Quantity;
    fn mul(self, unit: Unit) -> Quantity {
        Quantity::new(self, unit)
    }
}

impl Div<Unit> for Quantity {
    type Output = f64;
    fn div(self, unit: Unit) -> f64 {
        self.value / unit.factor
    }
}

impl Add for Quantity {
    type Output = Quantity;
    fn add(self, rhs: Quantity) -> Quantity {
        Quantity { value: self.value + rhs.value }
    }
}

impl Sub for Quantity {
    type Output = Quantity;
    fn sub(self, rhs: Quantity) -> Quantity {
        Quantity { value: self.value - rhs.value }
    }
}

impl Neg for Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        Quantity { value: -self.value }
    }
}

impl Div<Quantity> for Quantity {
    type Output = f64;
    /// Ratio of two quantities in the internal base system, e.g. thermal
    /// energy over pressure yields a volume in nm³.
    fn div(self, rhs: Quantity) -> f64 {
        self.value / rhs.value
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Quantity {
        Quantity { value: self.value * rhs }
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;
    fn div(self, rhs: f64) -> Quantity {
        Quantity { value: self.value / rhs }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.value)
    }
}
