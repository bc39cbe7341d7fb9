use common::*;
use config::UnitSwitchPolicy;
use serde::{Deserialize, Serialize};
use unit::{parse_entry, Mass, MassEntry, MassUnit};

/// A mass being edited, and the unit it is currently displayed in. The unit is only a display
/// preference and has no effect on the mass
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassField {
    mass: Mass,
    last_unit: MassUnit,
}

/// Entry in the unit dropdown
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnitMenuItem {
    pub unit: MassUnit,
    pub selected: bool,
}

/// What changed after committing text
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FieldEdit {
    pub value_changed: bool,
    pub unit_changed: bool,
}

impl MassField {
    /// Displayed in the configured default unit
    pub fn new(mass: Mass) -> Self {
        Self::with_unit(mass, config::get().inspector.default_unit)
    }

    pub fn with_unit(mass: Mass, unit: MassUnit) -> Self {
        Self {
            mass,
            last_unit: unit,
        }
    }

    pub fn mass(&self) -> Mass {
        self.mass
    }

    pub fn set_mass(&mut self, mass: Mass) {
        self.mass = mass;
    }

    pub fn last_unit(&self) -> MassUnit {
        self.last_unit
    }

    pub fn display_value(&self) -> f32 {
        self.mass.in_unit(self.last_unit)
    }

    /// Text for the field, formatted with the configured precision
    pub fn display_text(&self) -> String {
        self.format_text(config::get().inspector.precision)
    }

    pub fn format_text(&self, precision: Option<usize>) -> String {
        let value = self.display_value();
        match precision {
            Some(precision) => format!("{:.*} {}", precision, value, self.last_unit),
            None => format!("{} {}", value, self.last_unit),
        }
    }

    pub fn unit_menu(&self) -> impl Iterator<Item = UnitMenuItem> + '_ {
        MassUnit::ALL.iter().map(move |&unit| UnitMenuItem {
            unit,
            selected: unit == self.last_unit,
        })
    }

    /// Changes the displayed unit only. Returns true if it changed
    pub fn select_unit(&mut self, unit: MassUnit) -> bool {
        if unit == self.last_unit {
            return false;
        }

        debug!("switching mass field unit"; "from" => self.last_unit, "to" => unit);
        self.last_unit = unit;
        true
    }

    /// Applies text typed into the field. Text that doesn't parse or overflows is discarded, as
    /// is text that repeats the value as shown with `precision`, so committing the displayed
    /// text every frame doesn't drift
    pub fn commit_text(
        &mut self,
        text: &str,
        policy: UnitSwitchPolicy,
        precision: Option<usize>,
    ) -> FieldEdit {
        let shown = self.format_text(precision);
        if text == shown {
            return FieldEdit::default();
        }

        // the shown value may be rounded
        let shown_value = parse_entry(&shown, self.last_unit, self.display_value()).value;
        let previous = MassEntry::new(self.last_unit, shown_value);
        let entry = parse_entry(text, self.last_unit, previous.value);
        if entry == previous {
            return FieldEdit::default();
        }

        let mass = match entry.try_to_mass() {
            Ok(mass) => mass,
            Err(err) => {
                debug!("discarding mass edit"; "text" => text, "error" => %err);
                return FieldEdit::default();
            }
        };

        let mut edit = FieldEdit {
            value_changed: mass != self.mass,
            unit_changed: false,
        };
        self.mass = mass;

        if entry.unit != self.last_unit {
            match policy {
                UnitSwitchPolicy::FollowTyped => edit.unit_changed = self.select_unit(entry.unit),
                UnitSwitchPolicy::KeepDisplayed => {
                    trace!("keeping displayed unit";
                        "typed" => entry.unit, "displayed" => self.last_unit);
                }
            }
        }

        trace!("committed mass field"; "mass" => self.mass, "unit" => self.last_unit);
        edit
    }

    /// Policy and precision from the global config
    pub fn commit_text_with_config(&mut self, text: &str) -> FieldEdit {
        let cfg = config::get();
        self.commit_text(text, cfg.inspector.unit_switch, cfg.inspector.precision)
    }
}

impl Default for MassField {
    fn default() -> Self {
        Self::new(Mass::default())
    }
}

impl FieldEdit {
    pub fn is_empty(&self) -> bool {
        !(self.value_changed || self.unit_changed)
    }
}

impl UnitMenuItem {
    pub fn label(&self) -> &'static str {
        self.unit.code()
    }
}
