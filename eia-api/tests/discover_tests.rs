use eia_api::discover::{CONCEPTS, discover, matching_concepts};

#[test]
fn solar_queries_map_to_electricity_generation_routes() {
    let candidates = discover("solar energy in california");
    assert!(
        candidates.contains(&"electricity/electric-power-operational-data".to_string()),
        "expected a renewable/electricity route in {candidates:?}"
    );
}

#[test]
fn empty_or_unmatched_input_yields_no_candidates() {
    assert!(discover("").is_empty());
    assert!(discover("   ").is_empty());
    assert!(discover("zebra xylophone").is_empty());
}

#[test]
fn matching_is_case_insensitive() {
    assert_eq!(discover("CRUDE OIL prices"), discover("crude oil prices"));
}

#[test]
fn stronger_keyword_matches_rank_first() {
    // "petroleum" and "refinery" both credit petroleum routes; the single
    // weak "power" hit on electricity should not outrank them.
    let candidates = discover("petroleum refinery power usage");
    assert_eq!(candidates[0], "petroleum/pri/gnd");
}

#[test]
fn routes_are_never_duplicated() {
    // "solar" (renewable) and "electricity" both credit the operational
    // data route.
    let candidates = discover("solar electricity generation");
    let target = "electricity/electric-power-operational-data";
    assert_eq!(candidates.iter().filter(|r| *r == target).count(), 1);
}

#[test]
fn repeated_keywords_accumulate_score() {
    // "coal" (4) outweighs a single "oil" (3), but three mentions of oil
    // flip the order.
    let once = discover("oil and coal");
    assert_eq!(once[0], "coal/consumption-and-quality");
    let repeated = discover("oil oil oil and coal");
    assert_eq!(repeated[0], "petroleum/pri/gnd");
}

#[test]
fn matching_concepts_surface_common_facets() {
    let concepts = matching_concepts("wind power by state");
    let names: Vec<&str> = concepts.iter().map(|c| c.name).collect();
    assert!(names.contains(&"renewable"));
    assert!(names.contains(&"electricity"));
}

#[test]
fn concept_table_routes_are_normalized_paths() {
    for concept in CONCEPTS {
        assert!(!concept.routes.is_empty(), "{} has no routes", concept.name);
        for route in concept.routes {
            assert!(
                !route.starts_with('/') && !route.ends_with('/'),
                "route {route} should not carry surrounding slashes"
            );
        }
    }
}
