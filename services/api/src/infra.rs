use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use appraisal::handbooks::HandbookRegistry;
use appraisal::numeric::NumberInput;
use appraisal::worksheet::domain::{Analog, BalconyPresence, Worksheet};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) registry: Arc<HandbookRegistry>,
    pub(crate) default_handbook: Option<String>,
}

impl AppState {
    pub(crate) fn handbook_id<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_handbook.as_deref())
            .unwrap_or_else(|| self.registry.default_handbook_id())
    }
}

/// Worked example used by the CLI demo and handler tests: a 46.7 m² Moscow
/// flat against two priced comparables.
pub(crate) fn sample_worksheet(registry: &HandbookRegistry) -> Worksheet {
    let handbook = registry
        .get(registry.default_handbook_id())
        .expect("builtin registry always has its default bundle");
    let mut worksheet = handbook.default_worksheet();
    worksheet.subject.area_sqm = NumberInput::Value(46.7);

    worksheet.analogs[0] = Analog {
        offer_price_thousand: NumberInput::Value(5000.0),
        area_sqm: NumberInput::Value(50.0),
        units: NumberInput::Value(1.0),
        wall_material: Some("brick".to_string()),
        house_condition: Some("good".to_string()),
        flat_condition: Some("standard finish".to_string()),
        floor_level: Some("middle floors".to_string()),
        balcony: Some(BalconyPresence::Present),
        ..Analog::default()
    };
    worksheet.analogs[1] = Analog {
        offer_price_thousand: NumberInput::Value(4650.0),
        area_sqm: NumberInput::Value(48.5),
        units: NumberInput::Value(2.0),
        wall_material: Some("brick".to_string()),
        house_condition: Some("satisfactory".to_string()),
        flat_condition: Some("dated finish".to_string()),
        floor_level: Some("first floor".to_string()),
        balcony: Some(BalconyPresence::Absent),
        ..Analog::default()
    };

    worksheet
}
