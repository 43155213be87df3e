use std::collections::BTreeMap;

use serde::Deserialize;

/// Default page size for data requests. The API rejects anything larger.
pub const DEFAULT_LENGTH: u32 = 5000;
/// Hard cap on rows per request, imposed by the upstream API.
pub const MAX_LENGTH: u32 = 5000;

/// Placeholder substituted for the API key whenever a query string is
/// rendered for logs or error messages.
pub const REDACTED_KEY: &str = "REDACTED";

/// A structured request against an EIA v2 route.
///
/// Covers both the `/data` endpoint (all fields meaningful) and the
/// `seriesid/<id>` compatibility endpoint (facets unused). Everything except
/// the route itself is optional; absent fields are omitted from the encoded
/// query string entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteRequest {
    pub route: String,
    #[serde(default)]
    pub data_elements: Vec<String>,
    #[serde(default)]
    pub facets: BTreeMap<String, FacetValue>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub start_period: Option<String>,
    #[serde(default)]
    pub end_period: Option<String>,
    #[serde(default)]
    pub sort_column: Option<String>,
    #[serde(default)]
    pub sort_direction: Option<SortDirection>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub offset: Option<u64>,
}

/// A facet filter value. The upstream API always expects an array, but
/// callers frequently pass a single scalar; both are accepted and the
/// encoder normalizes to the array form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    One(String),
    Many(Vec<String>),
}

impl FacetValue {
    pub fn values(&self) -> &[String] {
        match self {
            FacetValue::One(v) => std::slice::from_ref(v),
            FacetValue::Many(vs) => vs.as_slice(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Flatten a [`RouteRequest`] into the exact query-parameter pairs the EIA
/// v2 API expects.
///
/// List-valued data columns use the indexed bracket form (`data[0]`,
/// `data[1]`, ...); facet filters use `facets[<key>][]` with one pair per
/// value; sort becomes `sort[0][column]` / `sort[0][direction]` and is only
/// emitted when both halves are present. The API key is never part of the
/// encoded output; the transport appends it at send time.
pub fn encode(request: &RouteRequest) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(frequency) = non_empty(request.frequency.as_deref()) {
        params.push(("frequency".to_string(), frequency.to_string()));
    }
    if let Some(start) = non_empty(request.start_period.as_deref()) {
        params.push(("start".to_string(), start.to_string()));
    }
    if let Some(end) = non_empty(request.end_period.as_deref()) {
        params.push(("end".to_string(), end.to_string()));
    }

    params.push((
        "length".to_string(),
        request.length.unwrap_or(DEFAULT_LENGTH).min(MAX_LENGTH).to_string(),
    ));
    params.push(("offset".to_string(), request.offset.unwrap_or(0).to_string()));

    for (index, element) in request
        .data_elements
        .iter()
        .filter(|e| !e.is_empty())
        .enumerate()
    {
        params.push((format!("data[{index}]"), element.clone()));
    }

    for (key, value) in &request.facets {
        for v in value.values().iter().filter(|v| !v.is_empty()) {
            params.push((format!("facets[{key}][]"), v.clone()));
        }
    }

    if let (Some(column), Some(direction)) = (
        non_empty(request.sort_column.as_deref()),
        request.sort_direction,
    ) {
        params.push(("sort[0][column]".to_string(), column.to_string()));
        params.push(("sort[0][direction]".to_string(), direction.as_str().to_string()));
    }

    params
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Normalize a route path for the tabular `/data` endpoint, appending the
/// suffix when the caller left it off.
pub fn ensure_data_suffix(route: &str) -> String {
    let trimmed = route.trim_matches('/');
    if trimmed == "data" || trimmed.ends_with("/data") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/data")
    }
}

/// Render parameter pairs as a percent-encoded query string with the API
/// key replaced by a placeholder. This is the only form in which a query
/// string may reach a log line or an error message.
pub fn redacted_query(params: &[(String, String)]) -> String {
    let mut parts: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    parts.push(format!("api_key={REDACTED_KEY}"));
    parts.join("&")
}
