use appraisal::handbooks::{Handbook, HandbookRegistry};
use appraisal::worksheet::domain::BalconyPresence;

fn bundle(id: &str) -> std::sync::Arc<Handbook> {
    HandbookRegistry::builtin()
        .get(id)
        .unwrap_or_else(|| panic!("bundle {id} missing"))
}

#[test]
fn region_resolution_prefers_direct_keys_then_aliases() {
    let flats = bundle("flats_2025");

    assert_eq!(flats.resolve_location_region_key("Moscow"), Some("Moscow"));
    assert_eq!(
        flats.resolve_location_region_key("Saint Petersburg"),
        Some("Moscow"),
        "alias routes to the canonical key"
    );
    assert_eq!(flats.resolve_location_region_key("Nowhere"), None);

    // Walls carry no aliases, so the aliased label fails there.
    assert_eq!(flats.resolve_walls_region_key("Saint Petersburg"), None);
    assert_eq!(flats.resolve_walls_region_key("Moscow Oblast"), Some("Moscow Oblast"));
}

#[test]
fn fund_group_bucketing_is_dimension_specific() {
    let flats = bundle("flats_2025");

    // Floor splits the funds into an old/soviet and a modern/premium bucket.
    let old = flats
        .resolve_floor_fund_group_key("Old stock")
        .expect("old stock bucket");
    let soviet = flats
        .resolve_floor_fund_group_key("Soviet-era mass housing")
        .expect("soviet bucket");
    let modern = flats
        .resolve_floor_fund_group_key("Modern mass housing")
        .expect("modern bucket");
    let premium = flats
        .resolve_floor_fund_group_key("Premium comfort housing")
        .expect("premium bucket");
    assert_eq!(old, soviet);
    assert_eq!(modern, premium);
    assert_ne!(old, modern);

    // Walls isolate old stock instead; the floor bucketing must not leak.
    let walls_old = flats
        .resolve_walls_fund_group_key("Old stock")
        .expect("walls old group");
    let walls_soviet = flats
        .resolve_walls_fund_group_key("Soviet-era mass housing")
        .expect("walls soviet group");
    assert_ne!(walls_old, walls_soviet);

    // Unrecognized fund labels resolve nowhere.
    assert_eq!(flats.resolve_floor_fund_group_key("Dacha stock"), None);
    assert_eq!(flats.resolve_walls_fund_group_key("Dacha stock"), None);
}

#[test]
fn calculators_return_some_exactly_for_offered_options() {
    let flats = bundle("flats_2025");
    let region = flats.resolve_walls_region_key("Moscow").expect("region");
    let fund = flats
        .resolve_walls_fund_group_key("Soviet-era mass housing")
        .expect("fund group");

    for subject_wall in flats.subject_wall_options(region, fund) {
        let comparables = flats.analog_wall_options(region, fund, subject_wall);
        assert!(!comparables.is_empty());
        for analog_wall in comparables {
            let multiplier = flats
                .calc_walls_multiplier(region, fund, subject_wall, analog_wall)
                .unwrap_or_else(|| panic!("offered pair {subject_wall}/{analog_wall} must price"));
            assert!(multiplier.is_finite());
        }
    }

    // A pairing never offered must be None, not NaN.
    assert_eq!(flats.calc_walls_multiplier(region, fund, "brick", "straw"), None);
    assert_eq!(flats.calc_walls_multiplier(region, "no such group", "brick", "brick"), None);
}

#[test]
fn multipliers_obey_the_four_decimal_contract() {
    let flats = bundle("flats_2025");
    let houses = bundle("houses_2025");

    let mut produced = vec![
        flats.calc_trade_multiplier(Some(9.2)),
        flats.calc_area_multiplier(46.7, 50.0),
        flats.calc_area_multiplier(33.3, 71.9),
        houses.calc_trade_multiplier(Some(10.0)),
        houses.calc_land_area_multiplier(600.0, 500.0),
        flats.calc_balcony_multiplier(
            flats.resolve_balcony_region_key("Moscow").expect("bucket"),
            BalconyPresence::Present,
            BalconyPresence::Absent,
        ),
    ];
    let walls_region = flats.resolve_walls_region_key("Moscow").expect("region");
    let walls_fund = flats
        .resolve_walls_fund_group_key("Modern mass housing")
        .expect("fund group");
    produced.push(flats.calc_walls_multiplier(walls_region, walls_fund, "brick", "panel"));

    for multiplier in produced {
        let value = multiplier.expect("resolvable inputs");
        let scaled = value * 10_000.0;
        assert!(
            (scaled - scaled.round()).abs() < 1e-6,
            "{value} is not rounded to four decimals"
        );
    }
}

#[test]
fn area_multiplier_rejects_degenerate_areas() {
    let flats = bundle("flats_2025");
    assert_eq!(flats.calc_area_multiplier(0.0, 50.0), None);
    assert_eq!(flats.calc_area_multiplier(46.7, 0.0), None);
    assert_eq!(flats.calc_area_multiplier(-10.0, 50.0), None);
    assert_eq!(flats.calc_area_multiplier(f64::NAN, 50.0), None);
    assert_eq!(flats.calc_area_multiplier(46.7, 50.0), Some(1.0347));
}

#[test]
fn floor_lookup_falls_back_to_basement_group() {
    let flats = bundle("flats_2025");
    let region = flats.resolve_floor_region_key("Moscow").expect("region");
    let fund = flats
        .resolve_floor_fund_group_key("Old stock")
        .expect("fund group");

    // Subject options merge the primary group with the basement levels.
    let subject_options = flats.subject_floor_options(region, fund);
    assert!(subject_options.contains(&"middle floors"));
    assert!(subject_options.contains(&"basement"));
    assert!(subject_options.contains(&"mezzanine"));

    // "basement" is missing from the primary group, so both the option
    // provider and the calculator consult the fallback group.
    let comparables = flats.analog_floor_options(region, fund, "basement");
    assert_eq!(comparables, vec!["first floor", "middle floors", "top floor"]);
    assert_eq!(
        flats.calc_floor_multiplier(region, fund, "basement", "middle floors"),
        Some(0.84)
    );

    // Primary-group lookups do not touch the fallback.
    assert_eq!(
        flats.calc_floor_multiplier(region, fund, "middle floors", "first floor"),
        Some(1.08)
    );
    assert_eq!(flats.calc_floor_multiplier(region, fund, "basement", "penthouse"), None);
}

#[test]
fn flat_condition_and_balcony_need_no_fund_group() {
    let flats = bundle("flats_2025");

    let region = flats
        .resolve_flat_condition_region_key("Cities under 500k residents")
        .expect("region");
    let options = flats.subject_flat_condition_options(region);
    assert!(options.contains(&"standard finish"));
    assert_eq!(
        flats.calc_flat_condition_multiplier(region, "standard finish", "dated finish"),
        Some(1.08)
    );

    let bucket = flats
        .resolve_balcony_region_key("Cities over 1M residents")
        .expect("bucket");
    assert_eq!(
        flats.calc_balcony_multiplier(bucket, BalconyPresence::Absent, BalconyPresence::Present),
        Some(0.942)
    );
    assert_eq!(
        flats.calc_balcony_multiplier(bucket, BalconyPresence::Present, BalconyPresence::Present),
        Some(1.0)
    );
    assert_eq!(flats.resolve_balcony_region_key("Nowhere"), None);
}

#[test]
fn flats_2024_overlays_only_the_published_rows() {
    let current = bundle("flats_2025");
    let previous = bundle("flats_2024");

    assert_eq!(previous.trade_avg_percent("Moscow", "Old stock"), Some(9.2));
    assert_eq!(current.trade_avg_percent("Moscow", "Old stock"), Some(8.8));

    // Regions without a 2024 override carry the 2025 row.
    assert_eq!(
        previous.trade_avg_percent("Cities 500k to 1M residents", "Old stock"),
        current.trade_avg_percent("Cities 500k to 1M residents", "Old stock"),
    );

    // Everything else is shared with the base bundle.
    assert_eq!(
        previous.calc_area_multiplier(46.7, 50.0),
        current.calc_area_multiplier(46.7, 50.0)
    );
    let region = previous.resolve_walls_region_key("Moscow").expect("region");
    let fund = previous
        .resolve_walls_fund_group_key("Old stock")
        .expect("fund group");
    assert_eq!(
        previous.calc_walls_multiplier(region, fund, "brick", "wood"),
        Some(1.18)
    );
}

#[test]
fn houses_bundle_has_its_own_market_classes_and_damped_trade() {
    let houses = bundle("houses_2025");

    let funds = houses.fund_categories("Moscow");
    assert!(funds.contains(&"Elite houses"));
    assert!(!funds.contains(&"Old stock"));

    assert_eq!(houses.trade_avg_percent("Moscow", "Elite houses"), Some(12.5));
    // Damped formula: 1 - 0.95 * 10%.
    assert_eq!(houses.calc_trade_multiplier(Some(10.0)), Some(0.905));

    assert_eq!(
        houses.resolve_location_fund_group_key("Mid-market houses"),
        houses.resolve_location_fund_group_key("Economy class houses")
    );
    let region = houses.resolve_location_region_key("Moscow Oblast").expect("region");
    let group = houses
        .resolve_location_fund_group_key("Elite houses")
        .expect("group");
    assert_eq!(
        houses.calc_location_multiplier(region, group, "Developed settlements"),
        Some(0.75)
    );

    // Land-plot adjustment exists only for houses.
    assert_eq!(houses.calc_land_area_multiplier(600.0, 500.0), Some(0.9927));
    assert_eq!(bundle("flats_2025").calc_land_area_multiplier(600.0, 500.0), None);

    // Wall coefficients are inherited from the flats bundle.
    let walls_region = houses.resolve_walls_region_key("Moscow").expect("region");
    assert_eq!(
        houses.walls.multiplier(walls_region, "Old stock", "brick", "wood"),
        Some(1.18)
    );
    // But the house market classes have no wall fund-group mapping.
    assert_eq!(houses.resolve_walls_fund_group_key("Elite houses"), None);
}
