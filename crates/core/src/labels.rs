//! Stored values and display labels for the closed sets used by the sell form.
//!
//! Records keep the raw value (e.g. `"ada_dent"`). Display code goes through
//! [`LabelTable::label`], which falls back to the raw value when it is not in
//! the table so newly added categories render without a formatter change.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Category constants
// ---------------------------------------------------------------------------

pub const CATEGORY_HP_FLAGSHIP: &str = "hp_flagship";
pub const CATEGORY_LAPTOP: &str = "laptop";
pub const CATEGORY_KOMPUTER: &str = "komputer";

/// All valid device categories.
pub const VALID_CATEGORIES: &[&str] = &[CATEGORY_HP_FLAGSHIP, CATEGORY_LAPTOP, CATEGORY_KOMPUTER];

// ---------------------------------------------------------------------------
// Physical condition constants
// ---------------------------------------------------------------------------

pub const CONDITION_MULUS: &str = "mulus";
pub const CONDITION_NORMAL: &str = "normal";
pub const CONDITION_ADA_DENT: &str = "ada_dent";
pub const CONDITION_PECAH: &str = "pecah";

/// All valid physical conditions.
pub const VALID_CONDITIONS: &[&str] = &[
    CONDITION_MULUS,
    CONDITION_NORMAL,
    CONDITION_ADA_DENT,
    CONDITION_PECAH,
];

// ---------------------------------------------------------------------------
// Label tables
// ---------------------------------------------------------------------------

/// Immutable value -> label mapping with identity fallback.
#[derive(Debug, Clone, Copy)]
pub struct LabelTable(&'static [(&'static str, &'static str)]);

impl LabelTable {
    /// Display label for `value`, or `value` itself when unknown.
    pub fn label<'a>(&self, value: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|(key, _)| *key == value)
            .map(|(_, label)| *label)
            .unwrap_or(value)
    }

    /// Whether `value` is one of the known keys.
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|(key, _)| *key == value)
    }

    /// The table as serializable options, in declaration order.
    pub fn options(&self) -> Vec<LabeledOption> {
        self.0
            .iter()
            .map(|(value, label)| LabeledOption { value, label })
            .collect()
    }
}

/// A `{ value, label }` pair for select / checkbox inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabeledOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Category names used in the admin message.
pub const CATEGORY_LABELS: LabelTable = LabelTable(&[
    (CATEGORY_HP_FLAGSHIP, "HP Flagship"),
    (CATEGORY_LAPTOP, "Laptop"),
    (CATEGORY_KOMPUTER, "Komputer"),
]);

/// Condition names used in the admin message.
pub const CONDITION_LABELS: LabelTable = LabelTable(&[
    (CONDITION_MULUS, "Mulus (Seperti Baru)"),
    (CONDITION_NORMAL, "Normal (Ada Bekas Pakai)"),
    (CONDITION_ADA_DENT, "Ada Dent/Penyok"),
    (CONDITION_PECAH, "Pecah/Retak"),
]);

/// Functional feature checkboxes offered on the condition step.
pub const FUNCTIONAL_FEATURES: LabelTable = LabelTable(&[
    ("layar", "Layar"),
    ("speaker", "Speaker"),
    ("kamera", "Kamera"),
    ("face_touch_id", "Face/TouchID"),
    ("baterai", "Baterai"),
    ("port", "Port"),
]);

/// Accessory checkboxes offered on the condition step.
pub const ACCESSORIES: LabelTable = LabelTable(&[
    ("dus", "Dus"),
    ("charger", "Charger"),
    ("kabel", "Kabel"),
    ("nota", "Nota"),
]);
