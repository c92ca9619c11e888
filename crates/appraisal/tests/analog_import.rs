use appraisal::handbooks::HandbookRegistry;
use appraisal::numeric::{self, NumberInput};
use appraisal::worksheet::import::import_analogs;
use appraisal::worksheet::WorksheetSession;

const EXPORT: &str = "\
Offer Price (thousand),Area (sqm),Units,Wall Material,Building Condition,Interior Finish,Floor Level,Balcony,Listed On
5000,50,1,brick,good,standard finish,middle floors,absent,2025-02-01
4650,\"48,5\",2,brick,satisfactory,dated finish,first floor,present,2025-02-11
";

#[test]
fn imported_listings_flow_through_the_worksheet() {
    let registry = HandbookRegistry::builtin();
    let mut session = WorksheetSession::new(&registry, None).expect("session opens");

    let analogs = import_analogs(EXPORT.as_bytes()).expect("export parses");
    assert_eq!(analogs.len(), 2);
    assert_eq!(numeric::parse_number(&analogs[1].area_sqm), 48.5);

    let mut state = session.state().clone();
    state.subject.area_sqm = NumberInput::Value(46.7);
    let capacity = state.analogs.len();
    for (slot, analog) in state.analogs.iter_mut().zip(analogs) {
        *slot = analog;
    }
    assert_eq!(state.analogs.len(), capacity, "import fills existing slots");

    let refreshed = session.submit(state).clone();

    // The derived adjustments came from the imported selections.
    let first = &refreshed.analogs[0].adjustments;
    assert_eq!(first.trade, 0.912, "Moscow old stock discount 8.8%");
    assert_eq!(first.walls, 1.0, "brick vs brick");
    assert_eq!(first.balcony, 1.049, "subject has a balcony, listing does not");
    assert_eq!(first.house_condition, 1.12, "good vs satisfactory");
    assert_eq!(first.floor, 1.0, "middle floors on both sides");

    let second = &refreshed.analogs[1].adjustments;
    assert_eq!(second.flat_condition, 1.08, "standard vs dated finish");
    assert_eq!(second.balcony, 1.0, "both sides have balconies");
    assert_eq!(second.floor, 1.08, "middle floors vs first floor");

    let valuation = session.evaluate();
    assert_eq!(valuation.total_units, 3.0);
    assert!(valuation.final_valuation_thousand > 0.0);
    assert_eq!(valuation.weights[2], 0.0, "untouched third slot has no units");
}
