use serde::Serialize;

use super::domain::{AdjustmentKind, Analog};
use crate::numeric;

/// One link of the adjustment chain, kept for audit display; decisions are
/// never made from the trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentStep {
    pub kind: AdjustmentKind,
    pub label: &'static str,
    pub cumulative: f64,
}

/// Derived figures for one comparable. Recomputed from scratch on every
/// evaluation; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedAnalog {
    pub price_per_area: f64,
    pub steps: Vec<AdjustmentStep>,
    pub final_adjusted_price_per_area: f64,
    pub units: f64,
}

/// Run the full adjustment chain for one comparable.
///
/// The base is offer price over area, short-circuited to 0 when the area is
/// not yet positive so no NaN or infinity can enter the chain. Locked
/// dimensions contribute exactly 1; every other multiplier is taken from the
/// stored field, falling back to 1 when non-finite.
pub fn compute_analog(analog: &Analog) -> ComputedAnalog {
    let offer_price = numeric::parse_number(&analog.offer_price_thousand);
    let area = numeric::parse_number(&analog.area_sqm);
    let price_per_area = if area > 0.0 { offer_price / area } else { 0.0 };

    let order = AdjustmentKind::ordered();
    let mut steps = Vec::with_capacity(order.len());
    let mut cumulative = price_per_area;

    for kind in order {
        let factor = if kind.is_locked() {
            1.0
        } else {
            sanitize(analog.adjustments.value(kind))
        };
        cumulative *= factor;
        steps.push(AdjustmentStep {
            kind,
            label: kind.label(),
            cumulative,
        });
    }

    ComputedAnalog {
        price_per_area,
        steps,
        final_adjusted_price_per_area: cumulative,
        units: numeric::parse_number(&analog.units),
    }
}

fn sanitize(multiplier: f64) -> f64 {
    if multiplier.is_finite() {
        multiplier
    } else {
        1.0
    }
}
