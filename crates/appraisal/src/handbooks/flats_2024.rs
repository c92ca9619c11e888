//! Residential flats, 2024 edition: the 2025 bundle with the previous year's
//! bargaining discounts. Regions without a 2024 override carry the 2025 row.

use chrono::NaiveDate;

use super::flats_2025::{
    self, FUND_MODERN, FUND_OLD_STOCK, FUND_PREMIUM, FUND_SOVIET, REGION_MOSCOW,
    REGION_MOSCOW_OBLAST, REGION_OVER_1M,
};
use super::{Handbook, HandbookInfo};

pub(super) fn handbook() -> Handbook {
    let base = flats_2025::handbook();

    let mut trade_discounts = base.trade_discounts.clone();
    trade_discounts.set_region(
        REGION_MOSCOW,
        &[
            (FUND_OLD_STOCK, "9.2%"),
            (FUND_SOVIET, "8.2%"),
            (FUND_MODERN, "7.5%"),
            (FUND_PREMIUM, "7.7%"),
        ],
    );
    trade_discounts.set_region(
        REGION_MOSCOW_OBLAST,
        &[
            (FUND_OLD_STOCK, "10.6%"),
            (FUND_SOVIET, "9.6%"),
            (FUND_MODERN, "7.1%"),
            (FUND_PREMIUM, "-"),
        ],
    );
    trade_discounts.set_region(
        REGION_OVER_1M,
        &[
            (FUND_OLD_STOCK, "9.3%"),
            (FUND_SOVIET, "8.1%"),
            (FUND_MODERN, "6.9%"),
            (FUND_PREMIUM, "7.5%"),
        ],
    );

    Handbook {
        info: HandbookInfo {
            id: "flats_2024".to_string(),
            name: "Residential Flats 2024".to_string(),
            description: "Reference coefficients for apartment valuation, 2024 edition".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid edition date"),
        },
        trade_discounts,
        ..base
    }
}
