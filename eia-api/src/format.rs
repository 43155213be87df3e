use serde_json::Value;

use crate::classify::{
    ClassifiedResponse, FacetValues, RouteListing, RouteMetadata, TabularData, Unrecognized,
};

/// Maximum rows rendered into a table before truncation kicks in.
pub const MAX_TABLE_ROWS: usize = 100;

/// Column names that identify a row as state-by-sector data, used for the
/// national-aggregation advisory.
const STATE_COLUMN: &str = "stateid";
const SECTOR_COLUMN: &str = "sectorid";
const NATIONAL_AGGREGATE: &str = "US";

/// Render a classified response as a single human-readable text block for
/// the tool surface. `route_path` is the path the caller requested and is
/// only used for headers and child-path hints.
pub fn format_response(classified: &ClassifiedResponse, route_path: &str) -> String {
    match classified {
        ClassifiedResponse::RouteListing(listing) => format_route_listing(listing, route_path),
        ClassifiedResponse::RouteMetadata(metadata) => format_route_metadata(metadata, route_path),
        ClassifiedResponse::FacetValues(values) => format_facet_values(values, route_path),
        ClassifiedResponse::TabularData(data) => format_tabular_data(data, route_path),
        ClassifiedResponse::Unrecognized(unrecognized) => {
            format_unrecognized(unrecognized, route_path)
        }
    }
}

fn format_route_listing(listing: &RouteListing, route_path: &str) -> String {
    let mut lines = Vec::new();

    let parent = listing
        .parent_id
        .clone()
        .unwrap_or_else(|| route_path.trim_matches('/').to_string());
    if parent.is_empty() {
        lines.push("Top-level routes:".to_string());
    } else {
        match &listing.parent_name {
            Some(name) => lines.push(format!("Routes under '{parent}' ({name}):")),
            None => lines.push(format!("Routes under '{parent}':")),
        }
    }
    if let Some(description) = &listing.description {
        lines.push(format!("  Description: {description}"));
    }

    for child in &listing.children {
        let name = child.name.as_deref().unwrap_or("N/A");
        lines.push(format!("  - {}: {}", child.id, name));
        if let Some(description) = &child.description {
            lines.push(format!("    Description: {description}"));
        }
    }

    lines.join("\n")
}

fn format_route_metadata(metadata: &RouteMetadata, route_path: &str) -> String {
    let route = metadata
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| route_path.trim_matches('/').to_string());

    let mut lines = vec![format!("Metadata for route '{route}':")];
    if let Some(name) = &metadata.name {
        lines.push(format!("  Name: {name}"));
    }
    if let Some(description) = &metadata.description {
        lines.push(format!("  Description: {description}"));
    }

    if !metadata.facets.is_empty() {
        lines.push(String::new());
        lines.push("  Facets (dimension filters):".to_string());
        let base = route_path.trim_matches('/');
        for facet in &metadata.facets {
            let name = facet.name.as_deref().unwrap_or("N/A");
            match &facet.description {
                Some(description) => {
                    lines.push(format!("    - {}: {} ({})", facet.id, name, description))
                }
                None => lines.push(format!("    - {}: {}", facet.id, name)),
            }
            let facet_path = if base.is_empty() {
                format!("facet/{}", facet.id)
            } else {
                format!("{base}/facet/{}", facet.id)
            };
            lines.push(format!("      Values: list route '{facet_path}'"));
        }
    }

    if !metadata.data_columns.is_empty() {
        lines.push(String::new());
        lines.push("  Data columns (for the data_elements parameter):".to_string());
        for column in &metadata.data_columns {
            let name = column.name.as_deref().unwrap_or("N/A");
            match &column.units {
                Some(units) => {
                    lines.push(format!("    - {}: {}, units: {}", column.id, name, units))
                }
                None => lines.push(format!("    - {}: {}", column.id, name)),
            }
        }
    }

    if !metadata.frequencies.is_empty() {
        lines.push(String::new());
        lines.push("  Frequencies (for the frequency parameter):".to_string());
        for frequency in &metadata.frequencies {
            let id = frequency.id.as_deref().unwrap_or("N/A");
            // `query` is the value to send; `id` is the descriptive name.
            let query = frequency.query.as_deref().unwrap_or(id);
            let mut line = format!("    - '{query}' ({id})");
            if let Some(description) = &frequency.description {
                line.push_str(&format!(": {description}"));
            }
            if let Some(format) = &frequency.format {
                line.push_str(&format!(", period format {format}"));
            }
            lines.push(line);
        }
    }

    if metadata.start_period.is_some() || metadata.end_period.is_some() {
        lines.push(String::new());
        lines.push(format!(
            "  Available period: {} to {}",
            metadata.start_period.as_deref().unwrap_or("?"),
            metadata.end_period.as_deref().unwrap_or("?")
        ));
    }
    if let Some(format) = &metadata.default_date_format {
        lines.push(format!("  Default date format: {format}"));
    }
    if let Some(frequency) = &metadata.default_frequency {
        lines.push(format!("  Default frequency: {frequency}"));
    }

    lines.join("\n")
}

fn format_facet_values(values: &FacetValues, route_path: &str) -> String {
    let mut lines = vec![format!(
        "Facet values for '{}' ({} total):",
        route_path.trim_matches('/'),
        values.total
    )];

    if values.values.is_empty() {
        lines.push("  No facet values returned.".to_string());
    }
    for value in &values.values {
        let name = value.name.as_deref().unwrap_or("N/A");
        match &value.alias {
            Some(alias) if Some(alias.as_str()) != value.name.as_deref() => {
                lines.push(format!("  - {}: {} (alias: {})", value.id, name, alias))
            }
            _ => lines.push(format!("  - {}: {}", value.id, name)),
        }
    }

    lines.join("\n")
}

fn format_tabular_data(data: &TabularData, route_path: &str) -> String {
    if data.rows.is_empty() {
        return format!(
            "No data found for route '{}' with the given criteria. \
             The API returned an empty result set; this is not an error. \
             Try widening the period bounds or removing facet filters.",
            route_path.trim_matches('/')
        );
    }

    let mut lines = vec![format!(
        "Total matching records: {} (showing {} in this response)",
        data.total,
        data.rows.len()
    )];
    if let Some(warning) = &data.warning {
        lines.push(format!("Warning from API: {warning}"));
    }

    // Columns are not independently declared; the first row's key set is
    // the authoritative column list.
    let columns: Vec<&String> = data.rows[0].keys().collect();
    lines.push(format!(
        "| {} |",
        columns
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    ));
    lines.push(format!("|{}|", vec!["---"; columns.len()].join("|")));

    for row in data.rows.iter().take(MAX_TABLE_ROWS) {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| row.get(*column).map(cell_text).unwrap_or_else(|| "N/A".to_string()))
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    if data.rows.len() > MAX_TABLE_ROWS {
        lines.push(format!(
            "... and {} more records (use the offset parameter to page through results).",
            data.rows.len() - MAX_TABLE_ROWS
        ));
    }

    lines.join("\n")
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_unrecognized(unrecognized: &Unrecognized, route_path: &str) -> String {
    let mut text = format!(
        "Response from route '{}' did not match any known shape \
         (route listing, route metadata, facet values, or tabular data).",
        route_path.trim_matches('/')
    );
    if let Some(error) = &unrecognized.error {
        text.push_str(&format!(" Upstream error: {error}."));
    }
    let raw = unrecognized.raw.to_string();
    text.push_str(&format!(
        " Raw response (bounded): {}",
        crate::client::truncate(&raw, 600)
    ));
    text
}

/// Advisory appended to state-by-sector tables when the request did not pin
/// the state facet to the national aggregate. Heuristic UX sugar only; it
/// inspects column names and may mis-fire on unrelated routes.
pub fn aggregation_advisory(data: &TabularData, state_facet: Option<&[String]>) -> Option<String> {
    let first = data.rows.first()?;
    if !first.contains_key(STATE_COLUMN) || !first.contains_key(SECTOR_COLUMN) {
        return None;
    }
    if let Some(values) = state_facet
        && values.iter().any(|v| v == NATIONAL_AGGREGATE)
    {
        return None;
    }
    Some(format!(
        "Note: these rows are broken out by state and sector. For a national total, \
         re-query with facets {{\"{STATE_COLUMN}\": \"{NATIONAL_AGGREGATE}\"}} or sum the rows manually."
    ))
}
