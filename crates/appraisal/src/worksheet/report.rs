use serde::Serialize;

use super::domain::AdjustmentKind;
use super::session::WorksheetValuation;
use crate::handbooks::HandbookInfo;
use crate::numeric::format_number;

/// One adjustment step with a display-ready rendering of the running value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub kind: AdjustmentKind,
    pub label: &'static str,
    pub cumulative: f64,
    pub cumulative_display: String,
}

/// Per-comparable block of the valuation summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalogResultView {
    pub analog_index: usize,
    pub price_per_area: f64,
    pub price_per_area_display: String,
    pub steps: Vec<StepView>,
    pub final_adjusted_price_per_area: f64,
    pub final_adjusted_display: String,
    pub units: f64,
    pub weight: f64,
    pub weight_display: String,
    pub weighted_contribution: f64,
}

/// Display-ready valuation report: what a consumer renders as the result
/// table of the worksheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationSummary {
    pub handbook_id: String,
    pub handbook_name: String,
    pub analogs: Vec<AnalogResultView>,
    pub total_units: f64,
    pub weighted_average_price_per_area: f64,
    pub weighted_average_display: String,
    pub final_valuation_thousand: f64,
    pub final_valuation_display: String,
}

impl WorksheetValuation {
    pub fn summary(&self, info: &HandbookInfo) -> ValuationSummary {
        let analogs = self
            .analogs
            .iter()
            .enumerate()
            .map(|(index, computed)| {
                let weight = self.weights.get(index).copied().unwrap_or(0.0);
                AnalogResultView {
                    analog_index: index,
                    price_per_area: computed.price_per_area,
                    price_per_area_display: format_number(computed.price_per_area, 2),
                    steps: computed
                        .steps
                        .iter()
                        .map(|step| StepView {
                            kind: step.kind,
                            label: step.label,
                            cumulative: step.cumulative,
                            cumulative_display: format_number(step.cumulative, 2),
                        })
                        .collect(),
                    final_adjusted_price_per_area: computed.final_adjusted_price_per_area,
                    final_adjusted_display: format_number(
                        computed.final_adjusted_price_per_area,
                        2,
                    ),
                    units: computed.units,
                    weight,
                    weight_display: format_number(weight, 4),
                    weighted_contribution: computed.final_adjusted_price_per_area * weight,
                }
            })
            .collect();

        ValuationSummary {
            handbook_id: info.id.clone(),
            handbook_name: info.name.clone(),
            analogs,
            total_units: self.total_units,
            weighted_average_price_per_area: self.weighted_average_price_per_area,
            weighted_average_display: format_number(self.weighted_average_price_per_area, 2),
            final_valuation_thousand: self.final_valuation_thousand,
            final_valuation_display: format_number(self.final_valuation_thousand, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handbooks::HandbookRegistry;
    use crate::numeric::NumberInput;
    use crate::worksheet::domain::Analog;
    use crate::worksheet::{evaluate_worksheet, WorksheetSession};

    #[test]
    fn summary_renders_display_strings() {
        let registry = HandbookRegistry::builtin();
        let mut session = WorksheetSession::new(&registry, None).expect("default bundle opens");
        let mut state = session.state().clone();
        state.analogs[0] = Analog {
            offer_price_thousand: NumberInput::Value(5000.0),
            area_sqm: NumberInput::Value(50.0),
            units: NumberInput::Value(1.0),
            ..Analog::default()
        };
        let state = session.submit(state).clone();

        let valuation = evaluate_worksheet(&state);
        let summary = valuation.summary(&session.handbook().info);

        assert_eq!(summary.handbook_id, "flats_2025");
        assert_eq!(summary.analogs.len(), 3);
        assert_eq!(summary.analogs[0].price_per_area_display, "100.00");
        assert_eq!(summary.analogs[0].weight_display, "1.0000");
        assert_eq!(summary.analogs[0].steps.len(), 12);
        assert_eq!(summary.analogs[1].weight, 0.0);
        assert_eq!(
            summary.final_valuation_display,
            format_number(summary.final_valuation_thousand, 2)
        );
    }
}
