use serde::Deserialize;
use unit::MassUnit;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inspector: Inspector,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Inspector {
    /// Unit shown by newly created fields
    pub default_unit: MassUnit,

    pub unit_switch: UnitSwitchPolicy,

    /// Decimal places shown in fields, all significant digits if None
    pub precision: Option<usize>,
}

/// What happens to the displayed unit when a different unit is typed into a field
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
pub enum UnitSwitchPolicy {
    /// `1 t.` typed over kilograms shows `1 t.`
    FollowTyped,

    /// `1 t.` typed over kilograms shows `1000 kg`
    KeepDisplayed,
}

impl Default for Inspector {
    fn default() -> Self {
        Self {
            default_unit: MassUnit::CANONICAL,
            unit_switch: UnitSwitchPolicy::default(),
            precision: None,
        }
    }
}

impl Default for UnitSwitchPolicy {
    fn default() -> Self {
        Self::FollowTyped
    }
}
