//! Static resource and prompt text served over the MCP surface.

pub const GUIDE_URI: &str = "eia://metadata/api-guide";
pub const GUIDE_NAME: &str = "EIA API v2 Quick Guide";
pub const GUIDE_DESCRIPTION: &str =
    "How to use the tools on this server to explore and pull data from the EIA Open Data API v2.";

pub const GUIDE_TEXT: &str = r#"EIA API v2 Quick Guide

The EIA v2 API organizes energy data as a hierarchy of routes (URL paths).
A route may have child routes, or it may be a leaf exposing a /data endpoint
for tabular rows and facet/<id> endpoints for filter values.

Tools on this server:

1. eia_list_routes(segment_path?)
   Explore the data tree.
   - Omitted or empty: lists the top-level routes (electricity, petroleum, ...).
   - A route path such as "electricity/retail-sales": lists sub-routes and the
     route's metadata (facets, data columns, frequencies, available period).
   - A facet path such as "electricity/retail-sales/facet/sectorid": lists the
     valid values for that facet (e.g. RES for residential).

2. eia_get_route_data(route, ...)
   The main tool for tabular data. The route is normalized to end in /data.
   Key arguments:
   - data_elements: list of column ids to return (e.g. ["price", "revenue"]).
     Find the ids with eia_list_routes on the base route.
   - facets: filters such as {"stateid": "CO", "sectorid": "RES"}. Find the
     facet ids on the base route, then their valid values via the facet path.
   - frequency: the query value of a frequency (e.g. "M" for monthly).
   - start_period / end_period: bounds in YYYY, YYYY-MM, or YYYY-MM-DD form
     depending on the chosen frequency.
   - sort_column / sort_direction, length, offset: ordering and pagination.

3. eia_get_series_data(series_id, ...)
   Compatibility lookup for APIv1 series ids (e.g. "ELEC.SALES.CO-RES.A").
   Use only when the user explicitly provides a series id; never invent one.

4. eia_discover_routes(query, fetch_metadata?)
   Keyword heuristic mapping a natural-language phrase to candidate routes.
   With fetch_metadata true it also pulls metadata for the top candidates.

5. eia_raw_request(route, params?)
   Debug passthrough returning raw JSON. Prefer the formatted tools.

Recommended flow for a question like "petroleum consumption in Brazil":
1. eia_discover_routes("petroleum consumption") or eia_list_routes() to find
   the category.
2. eia_list_routes("petroleum") to see sub-routes, then drill down until a
   route's metadata shows the facets, data columns, and frequencies you need.
3. List the relevant facet values (e.g. the country facet) to find the right
   filter id.
4. Call eia_get_route_data with the route, data_elements, facets, frequency,
   and period bounds you collected.
"#;

pub const PROMPT_FETCH_DATA: &str = "eia_fetch_route_data";
pub const PROMPT_FETCH_DATA_DESCRIPTION: &str =
    "Walk through finding the route, data columns, facets, and facet values for an EIA data question, then fetch the data.";
pub const PROMPT_FETCH_DATA_TEXT: &str = "I would like to pull data from the EIA API. Please follow \
the recommended flow in the 'EIA API v2 Quick Guide' resource to discover the route, data elements, \
facets, and facet values needed, then call eia_get_route_data.";

pub const PROMPT_EXPLORE: &str = "eia_explore_routes";
pub const PROMPT_EXPLORE_DESCRIPTION: &str =
    "Explore the EIA v2 route hierarchy to discover routes and their metadata.";
pub const PROMPT_EXPLORE_TEXT: &str = "I would like to explore the EIA v2 route hierarchy. Which \
path segment should we investigate (for example 'electricity', \
'petroleum/pri/gnd/facet/duoarea', or blank for the top level)? See the 'EIA API v2 Quick Guide' \
resource for examples.";
