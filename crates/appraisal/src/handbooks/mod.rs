mod flats_2024;
mod flats_2025;
mod houses_2025;
mod lookup;
pub mod tables;

pub use lookup::WorksheetOptions;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::worksheet::domain::{Analog, Subject, Worksheet, ANALOG_CAPACITY};
use tables::{BalconyTable, KeyMap, LocationTable, PairTable, RegionPairTable, TradeDiscountTable};

/// Identity card of one reference-data bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandbookInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub effective_from: NaiveDate,
}

/// One named reference-data bundle: coefficient tables, alias and fund-group
/// maps, formula constants, and the default worksheet template.
///
/// A bundle derives from another by struct-update composition (clone the
/// base, replace named fields), so every bundle's effective behavior is
/// readable off its own fields with no inheritance chain to chase.
#[derive(Debug, Clone)]
pub struct Handbook {
    pub info: HandbookInfo,

    /// Exponent of the area-ratio adjustment; varies by handbook vintage and
    /// property type, never inferred.
    pub area_exponent: f64,
    /// Exponent for the land-plot area adjustment; only the house bundles
    /// carry one.
    pub land_area_exponent: Option<f64>,
    /// Damping applied to the published bargaining discount before it is
    /// turned into a multiplier.
    pub trade_damping: f64,

    pub trade_discounts: TradeDiscountTable,

    pub location: LocationTable,
    pub location_aliases: KeyMap,
    pub location_fund_groups: KeyMap,

    pub walls: PairTable,
    pub walls_aliases: KeyMap,
    pub walls_fund_groups: KeyMap,

    pub house_condition: PairTable,
    pub house_condition_aliases: KeyMap,
    pub house_condition_fund_groups: KeyMap,

    pub flat_condition: RegionPairTable,
    pub flat_condition_aliases: KeyMap,

    pub balcony: BalconyTable,
    pub balcony_aliases: KeyMap,

    pub floor: PairTable,
    pub floor_aliases: KeyMap,
    pub floor_fund_groups: KeyMap,
    /// Basement/mezzanine group consulted when the primary floor group has
    /// no entry for the subject's floor level.
    pub floor_fallback_group: Option<String>,

    pub default_subject: Subject,
}

impl Handbook {
    /// Fresh worksheet with this bundle's default subject and empty analogs.
    pub fn default_worksheet(&self) -> Worksheet {
        Worksheet {
            subject: self.default_subject.clone(),
            analogs: vec![Analog::default(); ANALOG_CAPACITY],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HandbookError {
    #[error("unknown handbook id '{0}'")]
    UnknownHandbook(String),
}

/// All reference-data bundles known to this build, keyed by id.
#[derive(Debug, Clone)]
pub struct HandbookRegistry {
    handbooks: BTreeMap<String, Arc<Handbook>>,
    default_id: String,
}

impl HandbookRegistry {
    pub fn builtin() -> Self {
        let flats_2025 = flats_2025::handbook();
        let flats_2024 = flats_2024::handbook();
        let houses_2025 = houses_2025::handbook();

        let default_id = flats_2025.info.id.clone();
        let mut handbooks = BTreeMap::new();
        for handbook in [flats_2025, flats_2024, houses_2025] {
            handbooks.insert(handbook.info.id.clone(), Arc::new(handbook));
        }

        Self {
            handbooks,
            default_id,
        }
    }

    pub fn default_handbook_id(&self) -> &str {
        &self.default_id
    }

    pub fn available(&self) -> Vec<HandbookInfo> {
        self.handbooks
            .values()
            .map(|handbook| handbook.info.clone())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Handbook>> {
        self.handbooks.get(id).cloned()
    }

    pub fn require(&self, id: &str) -> Result<Arc<Handbook>, HandbookError> {
        self.get(id)
            .ok_or_else(|| HandbookError::UnknownHandbook(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_lists_three_bundles() {
        let registry = HandbookRegistry::builtin();
        assert_eq!(registry.default_handbook_id(), "flats_2025");

        let infos = registry.available();
        assert_eq!(infos.len(), 3);
        let ids: Vec<&str> = infos.iter().map(|info| info.id.as_str()).collect();
        assert!(ids.contains(&"flats_2025"));
        assert!(ids.contains(&"flats_2024"));
        assert!(ids.contains(&"houses_2025"));
    }

    #[test]
    fn require_reports_unknown_ids() {
        let registry = HandbookRegistry::builtin();
        assert!(registry.get("flats_2025").is_some());
        match registry.require("flats_1999") {
            Err(HandbookError::UnknownHandbook(id)) => assert_eq!(id, "flats_1999"),
            other => panic!("expected unknown handbook error, got {other:?}"),
        }
    }

    #[test]
    fn default_worksheet_matches_capacity() {
        let registry = HandbookRegistry::builtin();
        let handbook = registry.get("flats_2025").expect("default bundle present");
        let worksheet = handbook.default_worksheet();
        assert_eq!(worksheet.analogs.len(), ANALOG_CAPACITY);
        assert_eq!(worksheet.subject.region, "Moscow");
    }
}
