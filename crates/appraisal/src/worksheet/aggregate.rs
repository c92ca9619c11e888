use serde::Serialize;

use super::pipeline::ComputedAnalog;

/// Unit-count weighting across the comparables. A zero total yields all-zero
/// weights instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedAggregate {
    pub total_units: f64,
    pub weights: Vec<f64>,
    pub weighted_average_price_per_area: f64,
}

pub fn aggregate(computed: &[ComputedAnalog]) -> WeightedAggregate {
    let total_units: f64 = computed.iter().map(|analog| analog.units).sum();

    let weights: Vec<f64> = computed
        .iter()
        .map(|analog| {
            if total_units > 0.0 {
                analog.units / total_units
            } else {
                0.0
            }
        })
        .collect();

    let weighted_average_price_per_area = computed
        .iter()
        .zip(&weights)
        .map(|(analog, weight)| analog.final_adjusted_price_per_area * weight)
        .sum();

    WeightedAggregate {
        total_units,
        weights,
        weighted_average_price_per_area,
    }
}

/// Scale the weighted average back up by the subject's area.
pub fn final_valuation(weighted_average_price_per_area: f64, subject_area: f64) -> f64 {
    weighted_average_price_per_area * subject_area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computed(final_price: f64, units: f64) -> ComputedAnalog {
        ComputedAnalog {
            price_per_area: final_price,
            steps: Vec::new(),
            final_adjusted_price_per_area: final_price,
            units,
        }
    }

    #[test]
    fn weights_sum_to_one_when_units_present() {
        let result = aggregate(&[computed(100.0, 1.0), computed(90.0, 1.0), computed(80.0, 2.0)]);
        assert_eq!(result.total_units, 4.0);
        let sum: f64 = result.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_total_units_yields_all_zero_weights() {
        let result = aggregate(&[computed(100.0, 0.0), computed(90.0, 0.0)]);
        assert_eq!(result.total_units, 0.0);
        assert!(result.weights.iter().all(|weight| *weight == 0.0));
        assert_eq!(result.weighted_average_price_per_area, 0.0);
    }

    #[test]
    fn zero_unit_analog_keeps_its_slot_but_not_its_price() {
        let result = aggregate(&[
            computed(100.0, 1.0),
            computed(90.0, 1.0),
            computed(1_000_000.0, 0.0),
        ]);
        assert_eq!(result.weights, vec![0.5, 0.5, 0.0]);
        assert!((result.weighted_average_price_per_area - 95.0).abs() < 1e-12);
    }

    #[test]
    fn valuation_scales_by_subject_area() {
        assert!((final_valuation(95.0, 46.7) - 4436.5).abs() < 1e-9);
        assert_eq!(final_valuation(95.0, 0.0), 0.0);
    }
}
