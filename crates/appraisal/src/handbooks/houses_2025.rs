//! Detached residential houses, 2025 edition. Carries its own market classes,
//! bargaining discounts, and location coefficients, a damped bargaining
//! formula, and a land-plot area exponent; the flat-specific pair tables are
//! inherited from the 2025 flats bundle unchanged.

use chrono::NaiveDate;

use super::flats_2025::{self, REGION_MOSCOW, REGION_MOSCOW_OBLAST};
use super::tables::{KeyMap, LocationTable, TradeDiscountTable};
use super::{Handbook, HandbookInfo};
use crate::numeric::NumberInput;
use crate::worksheet::domain::{BalconyPresence, Subject};

const CLASS_ELITE: &str = "Elite houses";
const CLASS_COMFORT_PLUS: &str = "Comfort-plus houses";
const CLASS_MID_MARKET: &str = "Mid-market houses";
const CLASS_ECONOMY: &str = "Economy class houses";

const LOCATION_GROUP_ELITE: &str = "Elite houses";
const LOCATION_GROUP_MASS: &str = "Comfort-plus, mid-market and economy houses";

pub(super) fn handbook() -> Handbook {
    let base = flats_2025::handbook();

    Handbook {
        info: HandbookInfo {
            id: "houses_2025".to_string(),
            name: "Residential Houses 2025".to_string(),
            description: "Reference coefficients for detached house valuation, 2025 edition"
                .to_string(),
            effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid edition date"),
        },

        area_exponent: -0.5,
        land_area_exponent: Some(-0.04),
        // House sellers concede less of the published discount in practice.
        trade_damping: 0.95,

        trade_discounts: trade_discounts(),

        location: location_table(),
        location_aliases: KeyMap::empty(),
        location_fund_groups: KeyMap::from_pairs(&[
            (CLASS_ELITE, LOCATION_GROUP_ELITE),
            (CLASS_COMFORT_PLUS, LOCATION_GROUP_MASS),
            (CLASS_MID_MARKET, LOCATION_GROUP_MASS),
            (CLASS_ECONOMY, LOCATION_GROUP_MASS),
        ]),

        // No house-specific alias data has been published for the inherited
        // dimensions, so their alias maps are empty rather than carried over.
        walls_aliases: KeyMap::empty(),
        house_condition_aliases: KeyMap::empty(),
        flat_condition_aliases: KeyMap::empty(),
        balcony_aliases: KeyMap::empty(),
        floor_aliases: KeyMap::empty(),

        default_subject: default_subject(),

        ..base
    }
}

fn default_subject() -> Subject {
    Subject {
        region: REGION_MOSCOW.to_string(),
        fund: CLASS_ELITE.to_string(),
        area_sqm: NumberInput::Blank,
        location_class: Some("Prestigious districts".to_string()),
        wall_material: Some("brick".to_string()),
        house_condition: Some("good".to_string()),
        flat_condition: Some("standard finish".to_string()),
        floor_level: None,
        balcony: BalconyPresence::Absent,
    }
}

fn trade_discounts() -> TradeDiscountTable {
    TradeDiscountTable::from_rows(&[
        (
            REGION_MOSCOW,
            &[
                (CLASS_ELITE, "12.5%"),
                (CLASS_COMFORT_PLUS, "11.2%"),
                (CLASS_MID_MARKET, "10.8%"),
                (CLASS_ECONOMY, "9.5%"),
            ],
        ),
        (
            REGION_MOSCOW_OBLAST,
            &[
                (CLASS_ELITE, "13.2%"),
                (CLASS_COMFORT_PLUS, "12.1%"),
                (CLASS_MID_MARKET, "11.5%"),
                (CLASS_ECONOMY, "10.2%"),
            ],
        ),
    ])
}

fn location_table() -> LocationTable {
    const MOSCOW_ELITE: &[(&str, f64)] = &[
        ("Prestigious districts", 1.0),
        ("Central districts", 0.85),
        ("Dormitory districts", 0.7),
        ("Outskirts", 0.55),
    ];
    const MOSCOW_MASS: &[(&str, f64)] = &[
        ("Prestigious districts", 1.0),
        ("Central districts", 0.82),
        ("Dormitory districts", 0.68),
        ("Outskirts", 0.52),
    ];
    const OBLAST_ELITE: &[(&str, f64)] = &[
        ("Prestigious villages", 1.0),
        ("Developed settlements", 0.75),
        ("Ordinary settlements", 0.6),
        ("Remote areas", 0.45),
    ];
    const OBLAST_MASS: &[(&str, f64)] = &[
        ("Prestigious villages", 1.0),
        ("Developed settlements", 0.72),
        ("Ordinary settlements", 0.58),
        ("Remote areas", 0.42),
    ];

    LocationTable::from_rows(&[
        (
            REGION_MOSCOW,
            &[
                (LOCATION_GROUP_ELITE, MOSCOW_ELITE),
                (LOCATION_GROUP_MASS, MOSCOW_MASS),
            ],
        ),
        (
            REGION_MOSCOW_OBLAST,
            &[
                (LOCATION_GROUP_ELITE, OBLAST_ELITE),
                (LOCATION_GROUP_MASS, OBLAST_MASS),
            ],
        ),
    ])
}
