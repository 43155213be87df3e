use serde_json::{Map, Value};

/// One of the four payload shapes the EIA v2 API returns, plus a fallback
/// for anything that matches none of them.
///
/// The API declares no schema; shape is inferred from key presence, and the
/// checks below form an ordered priority chain because a route-metadata
/// body may incidentally contain keys that overlap with the other shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedResponse {
    RouteListing(RouteListing),
    RouteMetadata(RouteMetadata),
    FacetValues(FacetValues),
    TabularData(TabularData),
    Unrecognized(Unrecognized),
}

/// A parent node and its child routes in the data catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteListing {
    pub parent_id: Option<String>,
    pub parent_name: Option<String>,
    pub description: Option<String>,
    pub children: Vec<RouteEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Metadata for a single route: its facets, data columns, frequencies, and
/// available period. Every section is independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMetadata {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub facets: Vec<FacetDescriptor>,
    pub data_columns: Vec<DataColumn>,
    pub frequencies: Vec<Frequency>,
    pub start_period: Option<String>,
    pub end_period: Option<String>,
    pub default_date_format: Option<String>,
    pub default_frequency: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacetDescriptor {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataColumn {
    pub id: String,
    pub name: Option<String>,
    pub units: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frequency {
    pub id: Option<String>,
    /// The value to pass as the `frequency` query parameter (e.g. "M").
    pub query: Option<String>,
    pub description: Option<String>,
    pub format: Option<String>,
}

/// The enumerated values of one facet.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetValues {
    pub total: u64,
    pub values: Vec<FacetValueEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacetValueEntry {
    pub id: String,
    pub name: Option<String>,
    pub alias: Option<String>,
}

/// Tabular rows from a `/data` or `seriesid/` endpoint. An empty row set is
/// a legitimate result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularData {
    pub total: u64,
    pub rows: Vec<Map<String, Value>>,
    pub warning: Option<String>,
}

/// Fallback for bodies matching no known shape. Always surfaced to the
/// caller as an error, never silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Unrecognized {
    pub error: Option<String>,
    pub raw: Value,
}

/// Classify an upstream JSON body into one of the known response shapes.
///
/// Total and panic-free for arbitrary JSON: any value, including `null`,
/// `{}`, and deeply nested junk, maps to exactly one variant.
pub fn classify(body: &Value) -> ClassifiedResponse {
    let content = unwrap_envelope(body);

    // Facet-value listings overload the `facets` key also used by route
    // metadata; the discriminator is `totalFacets`, so this check runs
    // first.
    if content.get("totalFacets").is_some()
        && content.get("facets").is_some_and(Value::is_array)
    {
        return ClassifiedResponse::FacetValues(facet_values(content));
    }

    if let Some(routes) = content.get("routes").and_then(Value::as_array)
        && !routes.is_empty()
    {
        return ClassifiedResponse::RouteListing(route_listing(content, routes));
    }

    if content.get("id").is_some() || content.get("name").is_some() {
        return ClassifiedResponse::RouteMetadata(route_metadata(content));
    }

    if let Some(rows) = content.get("data").and_then(Value::as_array) {
        return ClassifiedResponse::TabularData(tabular_data(content, rows));
    }

    ClassifiedResponse::Unrecognized(Unrecognized {
        error: extract_error(body),
        raw: body.clone(),
    })
}

/// The API wraps results under a `response` key only sometimes, usually
/// alongside a `request` echo, but the echo is not guaranteed. No content
/// shape has a `response` key of its own, so an object there always means
/// the wrapped form.
fn unwrap_envelope(body: &Value) -> &Value {
    match body.get("response") {
        Some(response) if response.is_object() => response,
        _ => body,
    }
}

fn facet_values(content: &Value) -> FacetValues {
    let values = content
        .get("facets")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| FacetValueEntry {
                    id: field_str(item, "id").unwrap_or_else(|| "N/A".to_string()),
                    name: field_str(item, "name"),
                    alias: field_str(item, "alias"),
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let total = content
        .get("totalFacets")
        .and_then(coerce_u64)
        .unwrap_or(values.len() as u64);

    FacetValues { total, values }
}

fn route_listing(content: &Value, routes: &[Value]) -> RouteListing {
    RouteListing {
        parent_id: field_str(content, "id"),
        parent_name: field_str(content, "name"),
        description: field_str(content, "description"),
        children: routes
            .iter()
            .map(|route| RouteEntry {
                id: field_str(route, "id").unwrap_or_else(|| "N/A".to_string()),
                name: field_str(route, "name"),
                description: field_str(route, "description"),
            })
            .collect(),
    }
}

fn route_metadata(content: &Value) -> RouteMetadata {
    let facets = content
        .get("facets")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| FacetDescriptor {
                    id: field_str(item, "id").unwrap_or_else(|| "N/A".to_string()),
                    name: field_str(item, "name"),
                    description: field_str(item, "description"),
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    RouteMetadata {
        id: field_str(content, "id"),
        name: field_str(content, "name"),
        description: field_str(content, "description"),
        facets,
        data_columns: data_columns(content.get("data")),
        frequencies: frequencies(content.get("frequency")),
        start_period: field_str(content, "startPeriod"),
        end_period: field_str(content, "endPeriod"),
        default_date_format: field_str(content, "defaultDateFormat"),
        default_frequency: field_str(content, "defaultFrequency"),
    }
}

/// Route metadata carries its column descriptors as a map of column id to
/// descriptor, but some routes return a list of descriptor objects instead.
/// Both shapes are handled.
fn data_columns(data: Option<&Value>) -> Vec<DataColumn> {
    match data {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(id, details)| DataColumn {
                id: id.clone(),
                name: field_str(details, "name").or_else(|| field_str(details, "alias")),
                units: field_str(details, "units"),
            })
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                field_str(item, "id").map(|id| DataColumn {
                    id,
                    name: field_str(item, "name").or_else(|| field_str(item, "alias")),
                    units: field_str(item, "units"),
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn frequencies(frequency: Option<&Value>) -> Vec<Frequency> {
    frequency
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| Frequency {
                    id: field_str(item, "id"),
                    query: field_str(item, "query"),
                    description: field_str(item, "description"),
                    format: field_str(item, "format"),
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
}

fn tabular_data(content: &Value, rows: &[Value]) -> TabularData {
    let rows: Vec<Map<String, Value>> = rows
        .iter()
        .filter_map(Value::as_object)
        .cloned()
        .collect();

    // The API has been observed to return `total` as a string.
    let total = content
        .get("total")
        .and_then(coerce_u64)
        .unwrap_or(rows.len() as u64);

    let warning = content
        .get("warning")
        .or_else(|| content.get("warnings"))
        .and_then(warning_text);

    TabularData {
        total,
        rows,
        warning,
    }
}

fn warning_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) if !items.is_empty() => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            Some(parts.join("; "))
        }
        _ => None,
    }
}

/// Look for an `error` field at the body root, inside the `response`
/// envelope, and inside the `request` echo.
fn extract_error(body: &Value) -> Option<String> {
    let candidates = [
        body.get("error"),
        body.get("response").and_then(|r| r.get("error")),
        body.get("request").and_then(|r| r.get("error")),
    ];
    for candidate in candidates.into_iter().flatten() {
        match candidate {
            Value::String(s) if !s.is_empty() => return Some(s.clone()),
            Value::Null => {}
            other => return Some(other.to_string()),
        }
    }
    None
}

fn field_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(coerce_str)
}

/// Ids and names arrive as strings most of the time, but the API is loose
/// enough that numbers show up too.
fn coerce_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
