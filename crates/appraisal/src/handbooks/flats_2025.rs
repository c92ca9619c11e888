//! Residential flats reference data, 2025 edition. This is the default
//! bundle; the 2024 flats and 2025 houses bundles derive from it.

use chrono::NaiveDate;

use super::tables::{
    BalconyGrid, BalconyTable, KeyMap, LocationTable, PairGrid, PairTable, RegionPairTable,
    TradeDiscountTable,
};
use super::{Handbook, HandbookInfo};
use crate::numeric::NumberInput;
use crate::worksheet::domain::{BalconyPresence, Subject};

pub(super) const FUND_OLD_STOCK: &str = "Old stock";
pub(super) const FUND_SOVIET: &str = "Soviet-era mass housing";
pub(super) const FUND_MODERN: &str = "Modern mass housing";
pub(super) const FUND_PREMIUM: &str = "Premium comfort housing";

pub(super) const REGION_MOSCOW: &str = "Moscow";
pub(super) const REGION_MOSCOW_OBLAST: &str = "Moscow Oblast";
pub(super) const REGION_OVER_1M: &str = "Cities over 1M residents";
pub(super) const REGION_500K_1M: &str = "Cities 500k to 1M residents";
pub(super) const REGION_UNDER_500K: &str = "Cities under 500k residents";

const LOCATION_GROUP_STANDARD: &str = "Old stock, Soviet-era and modern mass housing";
const LOCATION_GROUP_PREMIUM: &str = "Premium comfort housing";

const WALL_GROUP_OLD: &str = "Old stock";
const WALL_GROUP_COMBINED: &str = "Soviet-era, modern and premium housing";

const HOUSE_GROUP_ALL: &str = "Old stock, Soviet-era and modern mass housing";

const FLOOR_GROUP_OLD_SOVIET: &str = "Old stock, Soviet-era mass housing";
const FLOOR_GROUP_MODERN_PREMIUM: &str = "Modern mass housing, premium comfort housing";
const FLOOR_GROUP_BASEMENT: &str = "Basement and mezzanine levels";

const BALCONY_BUCKET_CAPITALS: &str = "Moscow and Saint Petersburg";
const BALCONY_BUCKET_REGIONAL: &str = "Regional cities";

pub(super) fn handbook() -> Handbook {
    Handbook {
        info: HandbookInfo {
            id: "flats_2025".to_string(),
            name: "Residential Flats 2025".to_string(),
            description: "Reference coefficients for apartment valuation, 2025 edition".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid edition date"),
        },

        area_exponent: -0.5,
        land_area_exponent: None,
        trade_damping: 1.0,

        trade_discounts: trade_discounts(),

        location: location_table(),
        location_aliases: KeyMap::from_pairs(&[("Saint Petersburg", REGION_MOSCOW)]),
        location_fund_groups: KeyMap::from_pairs(&[
            (FUND_OLD_STOCK, LOCATION_GROUP_STANDARD),
            (FUND_SOVIET, LOCATION_GROUP_STANDARD),
            (FUND_MODERN, LOCATION_GROUP_STANDARD),
            (FUND_PREMIUM, LOCATION_GROUP_PREMIUM),
        ]),

        walls: wall_table(),
        walls_aliases: KeyMap::empty(),
        walls_fund_groups: KeyMap::from_pairs(&[
            (FUND_OLD_STOCK, WALL_GROUP_OLD),
            (FUND_SOVIET, WALL_GROUP_COMBINED),
            (FUND_MODERN, WALL_GROUP_COMBINED),
            (FUND_PREMIUM, WALL_GROUP_COMBINED),
        ]),

        house_condition: house_condition_table(),
        house_condition_aliases: KeyMap::from_pairs(&[("Saint Petersburg", REGION_MOSCOW)]),
        house_condition_fund_groups: KeyMap::from_pairs(&[
            (FUND_OLD_STOCK, HOUSE_GROUP_ALL),
            (FUND_SOVIET, HOUSE_GROUP_ALL),
            (FUND_MODERN, HOUSE_GROUP_ALL),
            (FUND_PREMIUM, HOUSE_GROUP_ALL),
        ]),

        flat_condition: flat_condition_table(),
        flat_condition_aliases: KeyMap::from_pairs(&[("Saint Petersburg", REGION_MOSCOW)]),

        balcony: balcony_table(),
        balcony_aliases: KeyMap::from_pairs(&[
            (REGION_MOSCOW, BALCONY_BUCKET_CAPITALS),
            ("Saint Petersburg", BALCONY_BUCKET_CAPITALS),
            (REGION_MOSCOW_OBLAST, BALCONY_BUCKET_REGIONAL),
            (REGION_OVER_1M, BALCONY_BUCKET_REGIONAL),
            (REGION_500K_1M, BALCONY_BUCKET_REGIONAL),
            (REGION_UNDER_500K, BALCONY_BUCKET_REGIONAL),
        ]),

        floor: floor_table(),
        floor_aliases: KeyMap::from_pairs(&[("Saint Petersburg", REGION_MOSCOW)]),
        floor_fund_groups: KeyMap::from_pairs(&[
            (FUND_OLD_STOCK, FLOOR_GROUP_OLD_SOVIET),
            (FUND_SOVIET, FLOOR_GROUP_OLD_SOVIET),
            (FUND_MODERN, FLOOR_GROUP_MODERN_PREMIUM),
            (FUND_PREMIUM, FLOOR_GROUP_MODERN_PREMIUM),
        ]),
        floor_fallback_group: Some(FLOOR_GROUP_BASEMENT.to_string()),

        default_subject: default_subject(),
    }
}

fn default_subject() -> Subject {
    Subject {
        region: REGION_MOSCOW.to_string(),
        fund: FUND_OLD_STOCK.to_string(),
        area_sqm: NumberInput::Value(46.7),
        location_class: Some("Cultural and historic center".to_string()),
        wall_material: Some("brick".to_string()),
        house_condition: Some("good".to_string()),
        flat_condition: Some("standard finish".to_string()),
        floor_level: Some("middle floors".to_string()),
        balcony: BalconyPresence::Present,
    }
}

fn trade_discounts() -> TradeDiscountTable {
    TradeDiscountTable::from_rows(&[
        (
            REGION_MOSCOW,
            &[
                (FUND_OLD_STOCK, "8.8%"),
                (FUND_SOVIET, "7.9%"),
                (FUND_MODERN, "7.2%"),
                (FUND_PREMIUM, "7.4%"),
            ],
        ),
        (
            REGION_MOSCOW_OBLAST,
            &[
                (FUND_OLD_STOCK, "10.1%"),
                (FUND_SOVIET, "9.3%"),
                (FUND_MODERN, "6.8%"),
                (FUND_PREMIUM, "-"),
            ],
        ),
        (
            REGION_OVER_1M,
            &[
                (FUND_OLD_STOCK, "9.0%"),
                (FUND_SOVIET, "7.8%"),
                (FUND_MODERN, "6.6%"),
                (FUND_PREMIUM, "7.2%"),
            ],
        ),
        (
            REGION_500K_1M,
            &[
                (FUND_OLD_STOCK, "9.8%"),
                (FUND_SOVIET, "8.6%"),
                (FUND_MODERN, "7.4%"),
                (FUND_PREMIUM, "7.9%"),
            ],
        ),
        (
            REGION_UNDER_500K,
            &[
                (FUND_OLD_STOCK, "10.4%"),
                (FUND_SOVIET, "9.1%"),
                (FUND_MODERN, "8.0%"),
                (FUND_PREMIUM, "-"),
            ],
        ),
    ])
}

fn location_table() -> LocationTable {
    const MOSCOW_STANDARD: &[(&str, f64)] = &[
        ("Cultural and historic center", 1.0),
        ("Prestigious residential districts", 0.93),
        ("Mid-city residential belt", 0.87),
        ("Dormitory districts", 0.78),
        ("Industrial fringe", 0.69),
    ];
    const MOSCOW_PREMIUM: &[(&str, f64)] = &[
        ("Cultural and historic center", 1.0),
        ("Prestigious residential districts", 0.95),
        ("Mid-city residential belt", 0.88),
        ("Dormitory districts", 0.8),
        ("Industrial fringe", 0.72),
    ];
    const OBLAST_STANDARD: &[(&str, f64)] = &[
        ("Near-Moscow satellite towns", 1.0),
        ("Developed district centers", 0.84),
        ("Ordinary settlements", 0.71),
        ("Remote settlements", 0.58),
    ];
    const OBLAST_PREMIUM: &[(&str, f64)] = &[
        ("Near-Moscow satellite towns", 1.0),
        ("Developed district centers", 0.86),
        ("Ordinary settlements", 0.74),
        ("Remote settlements", 0.61),
    ];
    const OVER_1M_STANDARD: &[(&str, f64)] = &[
        ("City center", 1.0),
        ("Districts adjoining the center", 0.9),
        ("Dormitory districts", 0.81),
        ("Industrial outskirts", 0.7),
    ];
    const OVER_1M_PREMIUM: &[(&str, f64)] = &[
        ("City center", 1.0),
        ("Districts adjoining the center", 0.92),
        ("Dormitory districts", 0.83),
        ("Industrial outskirts", 0.73),
    ];
    const MID_STANDARD: &[(&str, f64)] = &[
        ("City center", 1.0),
        ("Districts adjoining the center", 0.88),
        ("Dormitory districts", 0.78),
        ("Industrial outskirts", 0.67),
    ];
    const MID_PREMIUM: &[(&str, f64)] = &[
        ("City center", 1.0),
        ("Districts adjoining the center", 0.9),
        ("Dormitory districts", 0.8),
        ("Industrial outskirts", 0.7),
    ];
    const SMALL_STANDARD: &[(&str, f64)] = &[
        ("City center", 1.0),
        ("Mid-city districts", 0.86),
        ("Outskirts", 0.72),
    ];
    const SMALL_PREMIUM: &[(&str, f64)] = &[
        ("City center", 1.0),
        ("Mid-city districts", 0.88),
        ("Outskirts", 0.75),
    ];

    LocationTable::from_rows(&[
        (
            REGION_MOSCOW,
            &[
                (LOCATION_GROUP_STANDARD, MOSCOW_STANDARD),
                (LOCATION_GROUP_PREMIUM, MOSCOW_PREMIUM),
            ],
        ),
        (
            REGION_MOSCOW_OBLAST,
            &[
                (LOCATION_GROUP_STANDARD, OBLAST_STANDARD),
                (LOCATION_GROUP_PREMIUM, OBLAST_PREMIUM),
            ],
        ),
        (
            REGION_OVER_1M,
            &[
                (LOCATION_GROUP_STANDARD, OVER_1M_STANDARD),
                (LOCATION_GROUP_PREMIUM, OVER_1M_PREMIUM),
            ],
        ),
        (
            REGION_500K_1M,
            &[
                (LOCATION_GROUP_STANDARD, MID_STANDARD),
                (LOCATION_GROUP_PREMIUM, MID_PREMIUM),
            ],
        ),
        (
            REGION_UNDER_500K,
            &[
                (LOCATION_GROUP_STANDARD, SMALL_STANDARD),
                (LOCATION_GROUP_PREMIUM, SMALL_PREMIUM),
            ],
        ),
    ])
}

fn old_stock_wall_grid() -> PairGrid {
    PairGrid::from_rows(&[
        ("brick", &[("brick", 1.0), ("wood", 1.18)]),
        ("wood", &[("brick", 0.85), ("wood", 1.0)]),
    ])
}

fn combined_wall_grid() -> PairGrid {
    PairGrid::from_rows(&[
        (
            "brick",
            &[
                ("brick", 1.0),
                ("panel", 1.09),
                ("monolithic", 0.97),
                ("breezeblock", 1.05),
            ],
        ),
        (
            "panel",
            &[
                ("brick", 0.92),
                ("panel", 1.0),
                ("monolithic", 0.89),
                ("breezeblock", 0.97),
            ],
        ),
        (
            "monolithic",
            &[
                ("brick", 1.03),
                ("panel", 1.12),
                ("monolithic", 1.0),
                ("breezeblock", 1.08),
            ],
        ),
        (
            "breezeblock",
            &[
                ("brick", 0.95),
                ("panel", 1.03),
                ("monolithic", 0.92),
                ("breezeblock", 1.0),
            ],
        ),
    ])
}

// The under-500k bucket has no published wall coefficients, so that region is
// deliberately absent here.
fn wall_table() -> PairTable {
    let groups = [
        (WALL_GROUP_OLD, old_stock_wall_grid()),
        (WALL_GROUP_COMBINED, combined_wall_grid()),
    ];
    PairTable::from_rows(&[
        (REGION_MOSCOW, &groups),
        (REGION_MOSCOW_OBLAST, &groups),
        (REGION_OVER_1M, &groups),
        (REGION_500K_1M, &groups),
    ])
}

fn house_condition_grid() -> PairGrid {
    PairGrid::from_rows(&[
        (
            "good",
            &[("good", 1.0), ("satisfactory", 1.12), ("needs major repairs", 1.27)],
        ),
        (
            "satisfactory",
            &[("good", 0.89), ("satisfactory", 1.0), ("needs major repairs", 1.13)],
        ),
        (
            "needs major repairs",
            &[("good", 0.79), ("satisfactory", 0.88), ("needs major repairs", 1.0)],
        ),
    ])
}

fn house_condition_table() -> PairTable {
    let groups = [(HOUSE_GROUP_ALL, house_condition_grid())];
    PairTable::from_rows(&[
        (REGION_MOSCOW, &groups),
        (REGION_MOSCOW_OBLAST, &groups),
        (REGION_OVER_1M, &groups),
        (REGION_500K_1M, &groups),
        (REGION_UNDER_500K, &groups),
    ])
}

fn flat_condition_grid() -> PairGrid {
    PairGrid::from_rows(&[
        (
            "modern renovation",
            &[
                ("modern renovation", 1.0),
                ("standard finish", 1.08),
                ("dated finish", 1.17),
                ("shell condition", 1.26),
            ],
        ),
        (
            "standard finish",
            &[
                ("modern renovation", 0.93),
                ("standard finish", 1.0),
                ("dated finish", 1.08),
                ("shell condition", 1.17),
            ],
        ),
        (
            "dated finish",
            &[
                ("modern renovation", 0.85),
                ("standard finish", 0.93),
                ("dated finish", 1.0),
                ("shell condition", 1.08),
            ],
        ),
        (
            "shell condition",
            &[
                ("modern renovation", 0.79),
                ("standard finish", 0.86),
                ("dated finish", 0.93),
                ("shell condition", 1.0),
            ],
        ),
    ])
}

fn flat_condition_table() -> RegionPairTable {
    RegionPairTable::from_rows(&[
        (REGION_MOSCOW, flat_condition_grid()),
        (REGION_MOSCOW_OBLAST, flat_condition_grid()),
        (REGION_OVER_1M, flat_condition_grid()),
        (REGION_500K_1M, flat_condition_grid()),
        (REGION_UNDER_500K, flat_condition_grid()),
    ])
}

fn balcony_table() -> BalconyTable {
    BalconyTable::from_rows(&[
        (
            BALCONY_BUCKET_CAPITALS,
            BalconyGrid {
                both_present: 1.0,
                subject_only: 1.049,
                comparable_only: 0.953,
                both_absent: 1.0,
            },
        ),
        (
            BALCONY_BUCKET_REGIONAL,
            BalconyGrid {
                both_present: 1.0,
                subject_only: 1.062,
                comparable_only: 0.942,
                both_absent: 1.0,
            },
        ),
    ])
}

fn old_soviet_floor_grid() -> PairGrid {
    PairGrid::from_rows(&[
        (
            "first floor",
            &[("first floor", 1.0), ("middle floors", 0.93), ("top floor", 0.97)],
        ),
        (
            "middle floors",
            &[("first floor", 1.08), ("middle floors", 1.0), ("top floor", 1.04)],
        ),
        (
            "top floor",
            &[("first floor", 1.03), ("middle floors", 0.96), ("top floor", 1.0)],
        ),
    ])
}

fn modern_premium_floor_grid() -> PairGrid {
    PairGrid::from_rows(&[
        (
            "first floor",
            &[("first floor", 1.0), ("middle floors", 0.95), ("top floor", 0.98)],
        ),
        (
            "middle floors",
            &[("first floor", 1.06), ("middle floors", 1.0), ("top floor", 1.03)],
        ),
        (
            "top floor",
            &[("first floor", 1.02), ("middle floors", 0.97), ("top floor", 1.0)],
        ),
    ])
}

fn basement_floor_grid() -> PairGrid {
    PairGrid::from_rows(&[
        (
            "basement",
            &[("first floor", 0.9), ("middle floors", 0.84), ("top floor", 0.87)],
        ),
        (
            "mezzanine",
            &[("first floor", 0.95), ("middle floors", 0.9), ("top floor", 0.92)],
        ),
    ])
}

fn floor_table() -> PairTable {
    let groups = [
        (FLOOR_GROUP_OLD_SOVIET, old_soviet_floor_grid()),
        (FLOOR_GROUP_MODERN_PREMIUM, modern_premium_floor_grid()),
        (FLOOR_GROUP_BASEMENT, basement_floor_grid()),
    ];
    PairTable::from_rows(&[
        (REGION_MOSCOW, &groups),
        (REGION_MOSCOW_OBLAST, &groups),
        (REGION_OVER_1M, &groups),
        (REGION_500K_1M, &groups),
        (REGION_UNDER_500K, &groups),
    ])
}
