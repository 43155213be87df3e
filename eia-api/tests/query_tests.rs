use std::collections::BTreeMap;

use eia_api::query::{
    FacetValue, RouteRequest, SortDirection, encode, ensure_data_suffix, redacted_query,
};

fn data_request() -> RouteRequest {
    RouteRequest {
        route: "electricity/retail-sales/data".to_string(),
        ..Default::default()
    }
}

fn values_for<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
    params
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

#[test]
fn facets_always_encode_as_arrays() {
    let mut request = data_request();
    request.facets = BTreeMap::from([
        ("stateid".to_string(), FacetValue::One("CO".to_string())),
        (
            "sectorid".to_string(),
            FacetValue::Many(vec!["RES".to_string(), "COM".to_string()]),
        ),
    ]);

    let params = encode(&request);

    // A scalar facet value still comes out under the array-form key.
    assert_eq!(values_for(&params, "facets[stateid][]"), vec!["CO"]);
    assert_eq!(values_for(&params, "facets[sectorid][]"), vec!["RES", "COM"]);
    assert!(
        params.iter().all(|(k, _)| k != "facets[stateid]"),
        "bare facet key must never appear"
    );
}

#[test]
fn absent_data_elements_emit_no_data_keys() {
    let request = data_request();
    let params = encode(&request);
    assert!(params.iter().all(|(k, _)| !k.starts_with("data")));

    let mut request = data_request();
    request.data_elements = Vec::new();
    let params = encode(&request);
    assert!(params.iter().all(|(k, _)| !k.starts_with("data")));
}

#[test]
fn data_elements_use_indexed_bracket_keys() {
    let mut request = data_request();
    request.data_elements = vec!["price".to_string(), "revenue".to_string()];

    let params = encode(&request);

    assert_eq!(values_for(&params, "data[0]"), vec!["price"]);
    assert_eq!(values_for(&params, "data[1]"), vec!["revenue"]);
}

#[test]
fn sort_requires_both_column_and_direction() {
    let mut request = data_request();
    request.sort_column = Some("period".to_string());
    let params = encode(&request);
    assert!(params.iter().all(|(k, _)| !k.starts_with("sort")));

    request.sort_column = None;
    request.sort_direction = Some(SortDirection::Desc);
    let params = encode(&request);
    assert!(params.iter().all(|(k, _)| !k.starts_with("sort")));

    request.sort_column = Some("period".to_string());
    let params = encode(&request);
    assert_eq!(values_for(&params, "sort[0][column]"), vec!["period"]);
    assert_eq!(values_for(&params, "sort[0][direction]"), vec!["desc"]);
}

#[test]
fn absent_scalars_are_omitted_entirely() {
    let mut request = data_request();
    request.frequency = Some(String::new());
    request.start_period = None;

    let params = encode(&request);

    for key in ["frequency", "start", "end"] {
        assert!(
            params.iter().all(|(k, _)| k != key),
            "{key} must be omitted, not emitted empty"
        );
    }
}

#[test]
fn length_defaults_and_caps_at_5000() {
    let request = data_request();
    let params = encode(&request);
    assert_eq!(values_for(&params, "length"), vec!["5000"]);
    assert_eq!(values_for(&params, "offset"), vec!["0"]);

    let mut request = data_request();
    request.length = Some(99999);
    let params = encode(&request);
    assert_eq!(values_for(&params, "length"), vec!["5000"]);
}

#[test]
fn empty_facet_value_lists_are_dropped() {
    let mut request = data_request();
    request.facets = BTreeMap::from([
        ("stateid".to_string(), FacetValue::Many(Vec::new())),
        ("sectorid".to_string(), FacetValue::One(String::new())),
    ]);

    let params = encode(&request);

    assert!(params.iter().all(|(k, _)| !k.starts_with("facets")));
}

#[test]
fn data_suffix_is_appended_when_missing() {
    assert_eq!(
        ensure_data_suffix("electricity/retail-sales"),
        "electricity/retail-sales/data"
    );
    assert_eq!(
        ensure_data_suffix("/electricity/retail-sales/data/"),
        "electricity/retail-sales/data"
    );
    assert_eq!(ensure_data_suffix("data"), "data");
}

#[test]
fn redacted_query_never_contains_a_real_key() {
    let params = vec![("frequency".to_string(), "M".to_string())];
    let rendered = redacted_query(&params);
    assert!(rendered.contains("frequency=M"));
    assert!(rendered.ends_with("api_key=REDACTED"));
}

/// Encoding, then decoding the rendered query string, must reproduce the
/// original structured values (facets normalize to lists).
#[test]
fn encode_round_trips_through_a_query_string() {
    let mut request = data_request();
    request.data_elements = vec!["price".to_string(), "sales".to_string()];
    request.facets = BTreeMap::from([
        ("stateid".to_string(), FacetValue::One("CO".to_string())),
        (
            "sectorid".to_string(),
            FacetValue::Many(vec!["RES".to_string(), "COM".to_string()]),
        ),
    ]);
    request.frequency = Some("M".to_string());
    request.sort_column = Some("period".to_string());
    request.sort_direction = Some(SortDirection::Desc);

    let params = encode(&request);
    let query: String = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let decoded: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    let pick = |key: &str| -> Vec<String> {
        decoded
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    };

    assert_eq!(pick("data[0]"), vec!["price"]);
    assert_eq!(pick("data[1]"), vec!["sales"]);
    assert_eq!(pick("facets[stateid][]"), vec!["CO"]);
    assert_eq!(pick("facets[sectorid][]"), vec!["RES", "COM"]);
    assert_eq!(pick("frequency"), vec!["M"]);
    assert_eq!(pick("sort[0][column]"), vec!["period"]);
    assert_eq!(pick("sort[0][direction]"), vec!["desc"]);
}
