use std::ops::{Div, Mul};

use common::derive_more::{Add, AddAssign, Sub, SubAssign};
use common::*;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// A unit of mass that can be converted to and from kilograms. Codes are always 2 characters
/// long, so they can be recognised as a suffix of edited text.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum MassUnit {
    #[strum(serialize = "kg")]
    Kilograms,

    /// Metric tonnes
    #[strum(serialize = "t.")]
    Tonnes,

    #[strum(serialize = "g.")]
    Grams,

    #[strum(serialize = "lb")]
    Pounds,

    #[strum(serialize = "oz")]
    Ounces,
}

/// Mass in kilograms. Other units are only ever derived from this
#[derive(
    Copy, Clone, Debug, Default, PartialEq, PartialOrd, Add, AddAssign, Sub, SubAssign, Serialize,
    Deserialize,
)]
pub struct Mass {
    kilograms: f32,
}

impl MassUnit {
    /// Every unit in table order
    pub const ALL: [MassUnit; 5] = [
        MassUnit::Kilograms,
        MassUnit::Tonnes,
        MassUnit::Grams,
        MassUnit::Pounds,
        MassUnit::Ounces,
    ];

    /// The unit [Mass] is stored in
    pub const CANONICAL: MassUnit = MassUnit::Kilograms;

    /// Length of every unit code, in chars
    pub const CODE_LEN: usize = 2;

    pub const fn code(self) -> &'static str {
        match self {
            MassUnit::Kilograms => "kg",
            MassUnit::Tonnes => "t.",
            MassUnit::Grams => "g.",
            MassUnit::Pounds => "lb",
            MassUnit::Ounces => "oz",
        }
    }

    /// How many kilograms are in 1 of this unit
    pub const fn multiplier(self) -> f32 {
        match self {
            MassUnit::Kilograms => 1.0,
            MassUnit::Tonnes => 1000.0,
            MassUnit::Grams => 0.001,
            MassUnit::Pounds => 0.453592,
            MassUnit::Ounces => 0.0283495,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }

    /// (code, multiplier) pairs in table order
    pub fn conversions() -> impl Iterator<Item = (&'static str, f32)> {
        Self::ALL.iter().map(|unit| (unit.code(), unit.multiplier()))
    }
}

impl Default for MassUnit {
    fn default() -> Self {
        Self::CANONICAL
    }
}

impl TryFrom<String> for MassUnit {
    type Error = strum::ParseError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl From<MassUnit> for String {
    fn from(unit: MassUnit) -> Self {
        unit.code().to_owned()
    }
}

impl Display for MassUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.code())
    }
}

logging::slog_value_display!(MassUnit);

macro_rules! unit_accessors {
    ($($name:ident => $unit:expr),+ $(,)?) => {
        $(
            paste::paste! {
                #[doc = "Mass in " $name]
                #[inline]
                pub fn $name(self) -> f32 {
                    self.in_unit($unit)
                }

                #[doc = "Sets the mass from a value in " $name]
                #[inline]
                pub fn [< set_ $name >](&mut self, value: f32) {
                    self.set_in_unit($unit, value)
                }
            }
        )+
    };
}

impl Mass {
    pub const fn new(kilograms: f32) -> Self {
        Self { kilograms }
    }

    pub fn from_unit(unit: MassUnit, value: f32) -> Self {
        let mut mass = Self::default();
        mass.set_in_unit(unit, value);
        mass
    }

    pub const fn kilograms(self) -> f32 {
        self.kilograms
    }

    pub fn set_kilograms(&mut self, kilograms: f32) {
        self.kilograms = kilograms;
    }

    /// How many of `unit` this mass is
    pub fn in_unit(self, unit: MassUnit) -> f32 {
        self.kilograms / unit.multiplier()
    }

    pub fn set_in_unit(&mut self, unit: MassUnit, value: f32) {
        self.kilograms = value * unit.multiplier();
    }

    unit_accessors! {
        tonnes => MassUnit::Tonnes,
        grams => MassUnit::Grams,
        pounds => MassUnit::Pounds,
        ounces => MassUnit::Ounces,
    }
}

impl From<Mass> for f32 {
    fn from(mass: Mass) -> Self {
        mass.kilograms
    }
}

impl Mul<f32> for Mass {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.kilograms * rhs)
    }
}

impl Div<f32> for Mass {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.kilograms / rhs)
    }
}

impl Display for Mass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.kilograms, MassUnit::CANONICAL)
    }
}

logging::slog_value_display!(Mass);

#[cfg(test)]
mod tests {
    use std::f32::EPSILON;

    use common::*;
    use strum::IntoEnumIterator;

    use crate::mass::{Mass, MassUnit};

    const SAMPLES: [f32; 8] = [0.0, 1.0, -1.0, 0.25, 7.5, 1234.5678, -0.001, 1.0e6];

    #[test]
    fn table() {
        for unit in MassUnit::iter() {
            assert_eq!(unit.code().chars().count(), MassUnit::CODE_LEN, "{:?}", unit);
            assert!(unit.multiplier() > 0.0, "{:?}", unit);
            assert_eq!(MassUnit::from_code(unit.code()), Some(unit));
            assert!(MassUnit::ALL.contains(&unit));
        }

        assert_eq!(MassUnit::ALL.len(), MassUnit::iter().count());
        assert_eq!(MassUnit::CANONICAL.multiplier(), 1.0);
        assert_eq!(MassUnit::from_code("KG"), None);
        assert_eq!(MassUnit::from_code("st"), None);

        let codes: Vec<_> = MassUnit::conversions().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["kg", "t.", "g.", "lb", "oz"]);
    }

    #[test]
    fn identity() {
        for k in SAMPLES.iter().copied() {
            let mass = Mass::new(k);
            assert_eq!(mass.kilograms(), k);
            assert_eq!(mass.in_unit(MassUnit::Kilograms), k);
            assert_eq!(f32::from(mass), k);

            let mut mass = Mass::default();
            mass.set_kilograms(k);
            assert_eq!(mass, Mass::new(k));
        }
    }

    #[test]
    fn round_trip() {
        for unit in MassUnit::ALL.iter().copied() {
            for k in SAMPLES.iter().copied() {
                let mut mass = Mass::new(k);
                let value = mass.in_unit(unit);
                mass.set_in_unit(unit, value);

                let margin = (EPSILON * k.abs().max(1.0), 4);
                assert!(
                    mass.kilograms().approx_eq(k, margin),
                    "{} -> {} {} -> {}",
                    k,
                    value,
                    unit,
                    mass.kilograms()
                );
            }
        }
    }

    #[test]
    fn named_accessors() {
        assert!(Mass::new(1000.0).tonnes().approx_eq(1.0, (EPSILON, 2)));
        assert!(Mass::new(1.0).grams().approx_eq(1000.0, (EPSILON, 2)));
        assert!(Mass::new(0.453592).pounds().approx_eq(1.0, (EPSILON, 2)));
        assert!(Mass::new(0.056699).ounces().approx_eq(2.0, (EPSILON, 2)));

        let mut mass = Mass::default();
        mass.set_tonnes(2.5);
        assert!(mass.kilograms().approx_eq(2500.0, (EPSILON, 2)));

        mass.set_grams(1.0);
        assert!(mass.kilograms().approx_eq(0.001, (EPSILON, 2)));

        mass.set_pounds(0.453592);
        assert!(mass.kilograms().approx_eq(1.0, (EPSILON, 2)));

        mass.set_ounces(0.0);
        assert_eq!(mass.kilograms(), 0.0);
    }

    #[test]
    fn from_unit() {
        let mass = Mass::from_unit(MassUnit::Tonnes, 3.0);
        assert!(mass.in_unit(MassUnit::Tonnes).approx_eq(3.0, (EPSILON, 2)));
        assert_eq!(Mass::from_unit(MassUnit::Kilograms, 4.0), Mass::new(4.0));
    }

    #[test]
    fn arithmetic() {
        let mut a = Mass::new(2.0) + Mass::new(3.0);
        assert_eq!(a, Mass::new(5.0));

        a -= Mass::new(1.0);
        assert_eq!(a, Mass::new(4.0));

        a += Mass::new(-6.0);
        assert_eq!(a - Mass::new(1.0), Mass::new(-3.0));

        assert_eq!(Mass::new(3.0) * 2.0, Mass::new(6.0));
        assert_eq!(Mass::new(3.0) / 2.0, Mass::new(1.5));
        assert!(Mass::new(1.0) < Mass::new(2.0));
    }

    #[test]
    fn display() {
        assert_eq!(Mass::new(12.5).to_string(), "12.5 kg");
        assert_eq!(Mass::default().to_string(), "0 kg");
        assert_eq!(MassUnit::Tonnes.to_string(), "t.");
    }

    #[test]
    fn serialization() {
        let mass = Mass::new(42.5);
        let ser = ron::to_string(&mass).unwrap();
        assert!(ser.contains("kilograms"), "{}", ser);
        assert_eq!(ron::from_str::<Mass>(&ser).unwrap(), mass);

        assert_eq!(ron::to_string(&MassUnit::Ounces).unwrap(), "\"oz\"");
        let unit: MassUnit = ron::from_str("\"t.\"").unwrap();
        assert_eq!(unit, MassUnit::Tonnes);
    }
}
