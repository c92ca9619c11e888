use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::numeric::NumberInput;

/// Number of comparable listings a worksheet holds.
pub const ANALOG_CAPACITY: usize = 3;

/// The twelve adjustment dimensions of the sales-comparison chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Rights,
    Financing,
    SaleDate,
    Trade,
    Location,
    Area,
    Walls,
    Communications,
    HouseCondition,
    Floor,
    FlatCondition,
    Balcony,
}

impl AdjustmentKind {
    /// Canonical application order. This order is a methodology contract and
    /// must never be rearranged.
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Rights,
            Self::Financing,
            Self::SaleDate,
            Self::Trade,
            Self::Location,
            Self::Area,
            Self::Walls,
            Self::Communications,
            Self::HouseCondition,
            Self::Floor,
            Self::FlatCondition,
            Self::Balcony,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rights => "Ownership rights (always 1)",
            Self::Financing => "Financing terms (always 1)",
            Self::SaleDate => "Sale date (always 1)",
            Self::Trade => "Bargaining discount",
            Self::Location => "Location",
            Self::Area => "Flat area",
            Self::Walls => "Wall material",
            Self::Communications => "Utility connections",
            Self::HouseCondition => "Building condition",
            Self::Floor => "Floor level",
            Self::FlatCondition => "Interior finish",
            Self::Balcony => "Balcony / loggia",
        }
    }

    /// Rights, financing, and sale date are unity by methodology; the
    /// pipeline multiplies by exactly 1 for them regardless of stored state.
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Rights | Self::Financing | Self::SaleDate)
    }

    /// Dimensions whose multiplier is recomputed from worksheet selections
    /// rather than typed in directly.
    pub const fn is_derived(self) -> bool {
        matches!(
            self,
            Self::Trade
                | Self::Location
                | Self::Area
                | Self::Walls
                | Self::HouseCondition
                | Self::Floor
                | Self::FlatCondition
                | Self::Balcony
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalconyPresence {
    Present,
    Absent,
}

impl BalconyPresence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "present" | "yes" | "balcony" | "loggia" => Some(Self::Present),
            "absent" | "no" | "none" => Some(Self::Absent),
            _ => None,
        }
    }
}

/// One multiplier per adjustment dimension. All fields default to 1.0, the
/// "no adjustment / not yet resolved" value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentSet {
    pub rights: f64,
    pub financing: f64,
    pub sale_date: f64,
    pub trade: f64,
    pub location: f64,
    pub area: f64,
    pub walls: f64,
    pub communications: f64,
    pub house_condition: f64,
    pub floor: f64,
    pub flat_condition: f64,
    pub balcony: f64,
}

impl Default for AdjustmentSet {
    fn default() -> Self {
        Self {
            rights: 1.0,
            financing: 1.0,
            sale_date: 1.0,
            trade: 1.0,
            location: 1.0,
            area: 1.0,
            walls: 1.0,
            communications: 1.0,
            house_condition: 1.0,
            floor: 1.0,
            flat_condition: 1.0,
            balcony: 1.0,
        }
    }
}

impl AdjustmentSet {
    pub fn value(&self, kind: AdjustmentKind) -> f64 {
        match kind {
            AdjustmentKind::Rights => self.rights,
            AdjustmentKind::Financing => self.financing,
            AdjustmentKind::SaleDate => self.sale_date,
            AdjustmentKind::Trade => self.trade,
            AdjustmentKind::Location => self.location,
            AdjustmentKind::Area => self.area,
            AdjustmentKind::Walls => self.walls,
            AdjustmentKind::Communications => self.communications,
            AdjustmentKind::HouseCondition => self.house_condition,
            AdjustmentKind::Floor => self.floor,
            AdjustmentKind::FlatCondition => self.flat_condition,
            AdjustmentKind::Balcony => self.balcony,
        }
    }

    pub fn set_value(&mut self, kind: AdjustmentKind, value: f64) {
        match kind {
            AdjustmentKind::Rights => self.rights = value,
            AdjustmentKind::Financing => self.financing = value,
            AdjustmentKind::SaleDate => self.sale_date = value,
            AdjustmentKind::Trade => self.trade = value,
            AdjustmentKind::Location => self.location = value,
            AdjustmentKind::Area => self.area = value,
            AdjustmentKind::Walls => self.walls = value,
            AdjustmentKind::Communications => self.communications = value,
            AdjustmentKind::HouseCondition => self.house_condition = value,
            AdjustmentKind::Floor => self.floor = value,
            AdjustmentKind::FlatCondition => self.flat_condition = value,
            AdjustmentKind::Balcony => self.balcony = value,
        }
    }
}

/// The property being appraised. Carries the same categorical dimensions as
/// an analog minus the price, which is the unknown being solved for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub region: String,
    pub fund: String,
    #[serde(default)]
    pub area_sqm: NumberInput,
    #[serde(default)]
    pub location_class: Option<String>,
    #[serde(default)]
    pub wall_material: Option<String>,
    #[serde(default)]
    pub house_condition: Option<String>,
    #[serde(default)]
    pub flat_condition: Option<String>,
    #[serde(default)]
    pub floor_level: Option<String>,
    pub balcony: BalconyPresence,
}

/// One comparable listing. Selections start empty and multipliers start at
/// 1.0; the session layer fills the derived multipliers in as selections
/// become resolvable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Analog {
    pub offer_price_thousand: NumberInput,
    pub area_sqm: NumberInput,
    pub units: NumberInput,
    pub wall_material: Option<String>,
    pub house_condition: Option<String>,
    pub flat_condition: Option<String>,
    pub floor_level: Option<String>,
    pub balcony: Option<BalconyPresence>,
    pub listed_on: Option<NaiveDate>,
    pub adjustments: AdjustmentSet,
}

/// Immutable worksheet snapshot: subject plus comparables. Mutation always
/// produces a fresh snapshot so change detection can compare values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    pub subject: Subject,
    pub analogs: Vec<Analog>,
}
