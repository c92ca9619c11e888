use std::sync::Arc;

use serde::Serialize;

use super::aggregate::{self, WeightedAggregate};
use super::domain::{AdjustmentKind, AdjustmentSet, Worksheet};
use super::pipeline::{self, ComputedAnalog};
use crate::handbooks::{Handbook, HandbookError, HandbookRegistry};
use crate::numeric;

/// Full evaluation of one worksheet snapshot: the pipeline output per
/// comparable plus the weighted aggregate and the subject valuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorksheetValuation {
    pub analogs: Vec<ComputedAnalog>,
    pub total_units: f64,
    pub weights: Vec<f64>,
    pub weighted_average_price_per_area: f64,
    pub final_valuation_thousand: f64,
}

/// Evaluate a snapshot: pipeline per analog, then unit weighting, then the
/// subject scale-up. Pure and idempotent.
pub fn evaluate_worksheet(state: &Worksheet) -> WorksheetValuation {
    let analogs: Vec<ComputedAnalog> = state.analogs.iter().map(pipeline::compute_analog).collect();

    let WeightedAggregate {
        total_units,
        weights,
        weighted_average_price_per_area,
    } = aggregate::aggregate(&analogs);

    let subject_area = numeric::parse_number(&state.subject.area_sqm);
    let final_valuation_thousand =
        aggregate::final_valuation(weighted_average_price_per_area, subject_area);

    WorksheetValuation {
        analogs,
        total_units,
        weights,
        weighted_average_price_per_area,
        final_valuation_thousand,
    }
}

/// Recompute every derived multiplier from the canonical selections and
/// return a fresh snapshot.
///
/// Each derivation reads only the subject/analog selections, never another
/// derived field. A dimension that cannot be resolved (missing selection,
/// region absent from its table) leaves the previously stored multiplier in
/// place so a half-filled worksheet keeps its last good values; a resolved
/// value overwrites the field only when it actually differs.
pub fn refresh_adjustments(handbook: &Handbook, state: &Worksheet) -> Worksheet {
    let mut next = state.clone();
    let subject = &next.subject;

    let trade = handbook
        .calc_trade_multiplier(handbook.trade_avg_percent(&subject.region, &subject.fund));

    let location = handbook
        .resolve_location_region_key(&subject.region)
        .zip(handbook.resolve_location_fund_group_key(&subject.fund))
        .zip(subject.location_class.as_deref())
        .and_then(|((region_key, fund_key), class)| {
            handbook.calc_location_multiplier(region_key, fund_key, class)
        });

    let subject_area = numeric::parse_number(&subject.area_sqm);

    let walls_keys = handbook
        .resolve_walls_region_key(&subject.region)
        .zip(handbook.resolve_walls_fund_group_key(&subject.fund));
    let house_keys = handbook
        .resolve_house_condition_region_key(&subject.region)
        .zip(handbook.resolve_house_condition_fund_group_key(&subject.fund));
    let flat_key = handbook.resolve_flat_condition_region_key(&subject.region);
    let balcony_key = handbook.resolve_balcony_region_key(&subject.region);
    let floor_keys = handbook
        .resolve_floor_region_key(&subject.region)
        .zip(handbook.resolve_floor_fund_group_key(&subject.fund));

    for analog in &mut next.analogs {
        let adjustments = &mut analog.adjustments;

        if let Some(multiplier) = trade {
            set_if_changed(adjustments, AdjustmentKind::Trade, multiplier);
        }
        if let Some(multiplier) = location {
            set_if_changed(adjustments, AdjustmentKind::Location, multiplier);
        }

        let analog_area = numeric::parse_number(&analog.area_sqm);
        if let Some(multiplier) = handbook.calc_area_multiplier(subject_area, analog_area) {
            set_if_changed(adjustments, AdjustmentKind::Area, multiplier);
        }

        if let Some(multiplier) = walls_keys
            .zip(subject.wall_material.as_deref())
            .zip(analog.wall_material.as_deref())
            .and_then(|(((region_key, fund_key), subject_wall), analog_wall)| {
                handbook.calc_walls_multiplier(region_key, fund_key, subject_wall, analog_wall)
            })
        {
            set_if_changed(adjustments, AdjustmentKind::Walls, multiplier);
        }

        if let Some(multiplier) = house_keys
            .zip(subject.house_condition.as_deref())
            .zip(analog.house_condition.as_deref())
            .and_then(|(((region_key, fund_key), subject_value), analog_value)| {
                handbook.calc_house_condition_multiplier(
                    region_key,
                    fund_key,
                    subject_value,
                    analog_value,
                )
            })
        {
            set_if_changed(adjustments, AdjustmentKind::HouseCondition, multiplier);
        }

        if let Some(multiplier) = flat_key
            .zip(subject.flat_condition.as_deref())
            .zip(analog.flat_condition.as_deref())
            .and_then(|((region_key, subject_value), analog_value)| {
                handbook.calc_flat_condition_multiplier(region_key, subject_value, analog_value)
            })
        {
            set_if_changed(adjustments, AdjustmentKind::FlatCondition, multiplier);
        }

        if let Some(multiplier) = balcony_key.zip(analog.balcony).and_then(|(region_key, analog_balcony)| {
            handbook.calc_balcony_multiplier(region_key, subject.balcony, analog_balcony)
        }) {
            set_if_changed(adjustments, AdjustmentKind::Balcony, multiplier);
        }

        if let Some(multiplier) = floor_keys
            .zip(subject.floor_level.as_deref())
            .zip(analog.floor_level.as_deref())
            .and_then(|(((region_key, fund_key), subject_floor), analog_floor)| {
                handbook.calc_floor_multiplier(region_key, fund_key, subject_floor, analog_floor)
            })
        {
            set_if_changed(adjustments, AdjustmentKind::Floor, multiplier);
        }
    }

    next
}

fn set_if_changed(adjustments: &mut AdjustmentSet, kind: AdjustmentKind, value: f64) {
    if (adjustments.value(kind) - value).abs() > f64::EPSILON {
        adjustments.set_value(kind, value);
    }
}

/// One interactive appraisal session: the active reference bundle plus the
/// current worksheet snapshot. All state transitions replace the snapshot
/// wholesale.
#[derive(Debug, Clone)]
pub struct WorksheetSession {
    handbook: Arc<Handbook>,
    state: Worksheet,
}

impl WorksheetSession {
    /// Open a session on the given handbook (or the registry default) with
    /// that bundle's template worksheet.
    pub fn new(
        registry: &HandbookRegistry,
        handbook_id: Option<&str>,
    ) -> Result<Self, HandbookError> {
        let id = handbook_id.unwrap_or_else(|| registry.default_handbook_id());
        let handbook = registry.require(id)?;
        let state = handbook.default_worksheet();
        Ok(Self { handbook, state })
    }

    pub fn handbook(&self) -> &Handbook {
        &self.handbook
    }

    pub fn state(&self) -> &Worksheet {
        &self.state
    }

    /// Accept an edited snapshot, re-derive the auto adjustments, and make
    /// the result the current state.
    pub fn submit(&mut self, next: Worksheet) -> &Worksheet {
        self.state = refresh_adjustments(&self.handbook, &next);
        &self.state
    }

    /// Swap the active bundle. Selections are reset to the new bundle's
    /// template because table keys are not portable across handbooks.
    pub fn switch_handbook(
        &mut self,
        registry: &HandbookRegistry,
        handbook_id: &str,
    ) -> Result<&Worksheet, HandbookError> {
        let handbook = registry.require(handbook_id)?;
        tracing::debug!(handbook = handbook_id, "switching handbook, worksheet selections reset");
        self.state = handbook.default_worksheet();
        self.handbook = handbook;
        Ok(&self.state)
    }

    pub fn evaluate(&self) -> WorksheetValuation {
        evaluate_worksheet(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumberInput;
    use crate::worksheet::domain::{Analog, BalconyPresence};

    fn session() -> (HandbookRegistry, WorksheetSession) {
        let registry = HandbookRegistry::builtin();
        let session = WorksheetSession::new(&registry, None).expect("default bundle opens");
        (registry, session)
    }

    #[test]
    fn refresh_fills_derived_fields_from_selections() {
        let (_registry, mut session) = session();
        let mut state = session.state().clone();
        state.analogs[0] = Analog {
            offer_price_thousand: NumberInput::Value(5000.0),
            area_sqm: NumberInput::Value(50.0),
            units: NumberInput::Value(1.0),
            wall_material: Some("brick".to_string()),
            balcony: Some(BalconyPresence::Absent),
            ..Analog::default()
        };

        let refreshed = session.submit(state).clone();
        let adjustments = &refreshed.analogs[0].adjustments;

        // Moscow / Old stock published discount is 8.8%.
        assert_eq!(adjustments.trade, 0.912);
        // Subject class "Cultural and historic center" carries 1.0.
        assert_eq!(adjustments.location, 1.0);
        // (46.7 / 50)^-0.5 rounded to four decimals.
        assert_eq!(adjustments.area, 1.0347);
        // brick vs brick in the old stock group.
        assert_eq!(adjustments.walls, 1.0);
        // Subject has a balcony, the comparable does not.
        assert_eq!(adjustments.balcony, 1.049);
        // No house condition selected on the analog yet: untouched.
        assert_eq!(adjustments.house_condition, 1.0);
    }

    #[test]
    fn unresolvable_dimension_retains_previous_value() {
        let (_registry, mut session) = session();
        let mut state = session.state().clone();
        state.analogs[0].wall_material = Some("brick".to_string());
        state.analogs[0].adjustments.walls = 0.97;
        // A region absent from the walls table and its alias map.
        state.subject.region = "Cities under 500k residents".to_string();

        let refreshed = session.submit(state).clone();
        assert_eq!(refreshed.analogs[0].adjustments.walls, 0.97);
    }

    #[test]
    fn refresh_is_stable_when_nothing_changed() {
        let (_registry, mut session) = session();
        let mut state = session.state().clone();
        state.analogs[0].area_sqm = NumberInput::Value(50.0);
        let first = session.submit(state).clone();
        let second = session.submit(first.clone()).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn switch_handbook_resets_selections() {
        let (registry, mut session) = session();
        let mut state = session.state().clone();
        state.subject.region = "Moscow Oblast".to_string();
        session.submit(state);

        let state = session
            .switch_handbook(&registry, "houses_2025")
            .expect("houses bundle exists")
            .clone();
        assert_eq!(state.subject.region, "Moscow");
        assert_eq!(state.subject.fund, "Elite houses");
        assert_eq!(session.handbook().info.id, "houses_2025");

        match session.switch_handbook(&registry, "missing") {
            Err(HandbookError::UnknownHandbook(id)) => assert_eq!(id, "missing"),
            other => panic!("expected unknown handbook, got {other:?}"),
        }
    }

    #[test]
    fn evaluation_is_idempotent() {
        let (_registry, mut session) = session();
        let mut state = session.state().clone();
        state.analogs[0] = Analog {
            offer_price_thousand: NumberInput::Value(5000.0),
            area_sqm: NumberInput::Value(50.0),
            units: NumberInput::Value(1.0),
            ..Analog::default()
        };
        session.submit(state);

        let first = session.evaluate();
        let second = session.evaluate();
        assert_eq!(first, second);
    }
}
