use std::collections::BTreeMap;
use std::env;

use eia_api::classify::ClassifiedResponse;
use eia_api::query::{FacetValue, SortDirection, encode, ensure_data_suffix, redacted_query};
use eia_api::{
    Configuration, EiaClient, EiaError, MetadataCache, RouteRequest, aggregation_advisory,
    classify, discover, format_response, matching_concepts,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use thiserror::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

use crate::guide;

const METHODS: &[&str] = &[
    "initialize",
    "initialized",
    "shutdown",
    "tools/list",
    "tools/call",
    "resources/list",
    "resources/read",
    "prompts/list",
    "prompts/get",
    "eia.listRoutes",
    "eia.getRouteData",
    "eia.getSeriesData",
    "eia.discoverRoutes",
    "eia.rawRequest",
];

/// How many discovery candidates get a follow-up metadata fetch. Fetches
/// run sequentially.
const MAX_METADATA_FETCHES: usize = 2;

pub struct EiaMcpServer {
    client: EiaClient,
    cache: MetadataCache,
}

impl EiaMcpServer {
    pub async fn bootstrap() -> Result<(), ServerError> {
        let server = Self::new()?;
        let result = server.run().await;
        server.cache.clear();
        result
    }

    fn new() -> Result<Self, ServerError> {
        let api_key = env::var("EIA_API_KEY").ok().filter(|key| !key.is_empty());
        let base_url = env::var("EIA_API_BASE_URL").ok();
        let user_agent = env::var("EIA_USER_AGENT")
            .unwrap_or_else(|_| format!("eia-mcp-server/{}", env!("CARGO_PKG_VERSION")));

        // A missing key must not abort the process; every upstream call
        // degrades to a MissingCredential failure instead.
        if api_key.is_none() {
            tracing::warn!("EIA_API_KEY is not set; upstream calls will fail until it is");
        }

        let mut config = Configuration::new().with_user_agent(user_agent);
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        if let Some(url) = base_url {
            config = config.with_base_url(url);
        }
        let client = EiaClient::with_config(config)?;

        Ok(Self {
            client,
            cache: MetadataCache::new(),
        })
    }

    async fn run(&self) -> Result<(), ServerError> {
        let stdin = io::stdin();
        let stdout = io::stdout();

        let reader = BufReader::new(stdin);
        let mut writer = BufWriter::new(stdout);

        self.send_ready(&mut writer).await?;

        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let request = match serde_json::from_str::<Request>(trimmed) {
                Ok(request) => request,
                Err(err) => {
                    tracing::warn!("invalid request: {err}");
                    let response =
                        Response::error(None, ServerError::InvalidRequest(err.to_string()));
                    self.write_response(&mut writer, &response).await?;
                    continue;
                }
            };

            let response = self.handle_request(request).await;
            self.write_response(&mut writer, &response).await?;
        }

        Ok(())
    }

    async fn send_ready(&self, writer: &mut BufWriter<io::Stdout>) -> Result<(), ServerError> {
        let ready = json!({
            "jsonrpc": "2.0",
            "id": null,
            "result": {
                "server": "eia-mcp-server",
                "version": env!("CARGO_PKG_VERSION"),
                "methods": METHODS,
            }
        });

        let payload = serde_json::to_string(&ready).map_err(ServerError::Serialization)?;
        writer.write_all(payload.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        tracing::info!("EIA MCP server ready");
        Ok(())
    }

    async fn write_response(
        &self,
        writer: &mut BufWriter<io::Stdout>,
        response: &Response,
    ) -> Result<(), ServerError> {
        let payload = serde_json::to_string(response).map_err(ServerError::Serialization)?;
        writer.write_all(payload.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    async fn handle_request(&self, request: Request) -> Response {
        match self.dispatch(&request.method, request.params).await {
            Ok(result) => Response::success(request.id, result),
            Err(err) => Response::error(request.id, err),
        }
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, ServerError> {
        if method == "tools/call" {
            let params: CallToolParams = parse_required_params(method, params)?;
            let spec = find_tool_spec(&params.name)
                .ok_or_else(|| ServerError::InvalidMethod(params.name.clone()))?;

            let outcome = self.call_tool(spec.method_name, params.arguments).await?;
            let response = ToolResponse::from(outcome);
            return serde_json::to_value(response).map_err(ServerError::Serialization);
        }

        if find_tool_spec_by_method(method).is_some() {
            let outcome = self.call_tool(method, params).await?;
            let response = ToolResponse::from(outcome);
            return serde_json::to_value(response).map_err(ServerError::Serialization);
        }

        self.invoke_method(method, params).await
    }

    async fn invoke_method(&self, method: &str, params: Option<Value>) -> Result<Value, ServerError> {
        match method {
            "initialize" => {
                let params: InitializeParams = parse_optional_params(method, params)?;
                let result = InitializeResult::new(params.client_info);
                Ok(serde_json::to_value(result).map_err(ServerError::Serialization)?)
            }
            "initialized" => Ok(Value::Null),
            "shutdown" => {
                self.cache.clear();
                Ok(Value::Null)
            }
            "tools/list" => {
                let params: ListToolsParams = parse_optional_params(method, params)?;
                let _ = params.cursor;
                let result = ListToolsResult {
                    tools: tool_descriptors(),
                    next_cursor: None,
                };
                Ok(serde_json::to_value(result).map_err(ServerError::Serialization)?)
            }
            "resources/list" => Ok(json!({
                "resources": [{
                    "uri": guide::GUIDE_URI,
                    "name": guide::GUIDE_NAME,
                    "description": guide::GUIDE_DESCRIPTION,
                    "mimeType": "text/plain",
                }]
            })),
            "resources/read" => {
                let params: ReadResourceParams = parse_required_params(method, params)?;
                if params.uri != guide::GUIDE_URI {
                    return Err(ServerError::InvalidParams(format!(
                        "unknown resource: {}",
                        params.uri
                    )));
                }
                Ok(json!({
                    "contents": [{
                        "uri": guide::GUIDE_URI,
                        "mimeType": "text/plain",
                        "text": guide::GUIDE_TEXT,
                    }]
                }))
            }
            "prompts/list" => Ok(json!({
                "prompts": [
                    {
                        "name": guide::PROMPT_FETCH_DATA,
                        "description": guide::PROMPT_FETCH_DATA_DESCRIPTION,
                    },
                    {
                        "name": guide::PROMPT_EXPLORE,
                        "description": guide::PROMPT_EXPLORE_DESCRIPTION,
                    },
                ]
            })),
            "prompts/get" => {
                let params: GetPromptParams = parse_required_params(method, params)?;
                let (description, text) = match params.name.as_str() {
                    name if name == guide::PROMPT_FETCH_DATA => (
                        guide::PROMPT_FETCH_DATA_DESCRIPTION,
                        guide::PROMPT_FETCH_DATA_TEXT,
                    ),
                    name if name == guide::PROMPT_EXPLORE => {
                        (guide::PROMPT_EXPLORE_DESCRIPTION, guide::PROMPT_EXPLORE_TEXT)
                    }
                    other => {
                        return Err(ServerError::InvalidParams(format!(
                            "unknown prompt: {other}"
                        )));
                    }
                };
                Ok(json!({
                    "description": description,
                    "messages": [{
                        "role": "user",
                        "content": { "type": "text", "text": text },
                    }]
                }))
            }
            other => Err(ServerError::InvalidMethod(other.to_string())),
        }
    }

    async fn call_tool(&self, method: &str, params: Option<Value>) -> Result<ToolOutcome, ServerError> {
        match method {
            "eia.listRoutes" => {
                let params: ListRoutesParams = parse_optional_params(method, params)?;
                Ok(self.list_routes(params).await)
            }
            "eia.getRouteData" => {
                let params: RouteDataParams = parse_required_params(method, params)?;
                Ok(self.get_route_data(params).await)
            }
            "eia.getSeriesData" => {
                let params: SeriesDataParams = parse_required_params(method, params)?;
                Ok(self.get_series_data(params).await)
            }
            "eia.discoverRoutes" => {
                let params: DiscoverParams = parse_required_params(method, params)?;
                Ok(self.discover_routes(params).await)
            }
            "eia.rawRequest" => {
                let params: RawRequestParams = parse_required_params(method, params)?;
                Ok(self.raw_request(params).await)
            }
            other => Err(ServerError::InvalidMethod(other.to_string())),
        }
    }

    /// List routes, route metadata, or facet values depending on where the
    /// path points. All three are metadata lookups, so they go through the
    /// TTL cache.
    async fn list_routes(&self, params: ListRoutesParams) -> ToolOutcome {
        let path = params
            .segment_path
            .as_deref()
            .unwrap_or("")
            .trim_matches('/')
            .to_string();

        match self.cache.get_or_fetch(&self.client, &path, &[]).await {
            Ok(body) => self.classified_outcome(&body, &path, None),
            Err(err) => failure_outcome(&path, &[], &err),
        }
    }

    /// Fetch tabular rows from a route's `/data` endpoint. Data responses
    /// are volatile and paginated, so they never touch the cache.
    async fn get_route_data(&self, params: RouteDataParams) -> ToolOutcome {
        let request = RouteRequest {
            route: ensure_data_suffix(&params.route),
            data_elements: params.data_elements.unwrap_or_default(),
            facets: params.facets.unwrap_or_default(),
            frequency: params.frequency,
            start_period: params.start_period,
            end_period: params.end_period,
            sort_column: params.sort_column,
            sort_direction: params.sort_direction,
            length: params.length,
            offset: params.offset,
        };
        let encoded = encode(&request);

        match self.client.request(&request.route, &encoded).await {
            Ok(body) => self.classified_outcome(&body, &request.route, Some(&request.facets)),
            Err(err) => failure_outcome(&request.route, &encoded, &err),
        }
    }

    /// Compatibility lookup for APIv1 series ids. The `seriesid/<id>`
    /// endpoint returns data directly, without a `/data` suffix.
    async fn get_series_data(&self, params: SeriesDataParams) -> ToolOutcome {
        let request = RouteRequest {
            route: format!("seriesid/{}", params.series_id.trim_matches('/')),
            data_elements: params.data_elements.unwrap_or_default(),
            frequency: params.frequency,
            start_period: params.start_period,
            end_period: params.end_period,
            sort_column: params.sort_column,
            sort_direction: params.sort_direction,
            length: params.length,
            offset: params.offset,
            ..RouteRequest::default()
        };
        let encoded = encode(&request);

        match self.client.request(&request.route, &encoded).await {
            Ok(body) => self.classified_outcome(&body, &request.route, None),
            Err(err) => failure_outcome(&request.route, &encoded, &err),
        }
    }

    /// Keyword discovery over the static concept table, optionally
    /// following up with metadata fetches for the top candidates. No
    /// candidates is not an error; the catalog's top level is listed
    /// instead.
    async fn discover_routes(&self, params: DiscoverParams) -> ToolOutcome {
        let candidates = discover(&params.query);

        if candidates.is_empty() {
            let listing = match self.cache.get_or_fetch(&self.client, "", &[]).await {
                Ok(body) => self.classified_outcome(&body, "", None),
                Err(err) => failure_outcome("", &[], &err),
            };
            return ToolOutcome {
                text: format!(
                    "No route candidates matched '{}'. Browse the catalog from the top instead:\n\n{}",
                    params.query, listing.text
                ),
                is_error: listing.is_error,
            };
        }

        let mut lines = vec![format!("Candidate routes for '{}':", params.query)];
        for route in &candidates {
            lines.push(format!("  - {route}"));
        }
        for concept in matching_concepts(&params.query) {
            if !concept.common_facets.is_empty() {
                lines.push(format!(
                    "  Common facets for {}: {}",
                    concept.name,
                    concept.common_facets.join(", ")
                ));
            }
        }

        if params.fetch_metadata.unwrap_or(false) {
            for route in candidates.iter().take(MAX_METADATA_FETCHES) {
                lines.push(String::new());
                match self.cache.get_or_fetch(&self.client, route, &[]).await {
                    Ok(body) => lines.push(self.classified_outcome(&body, route, None).text),
                    Err(err) => lines.push(failure_outcome(route, &[], &err).text),
                }
            }
        }

        ToolOutcome::ok(lines.join("\n"))
    }

    /// Debug passthrough: raw JSON, pretty-printed, clearly separate from
    /// the formatted tools.
    async fn raw_request(&self, params: RawRequestParams) -> ToolOutcome {
        let pairs: Vec<(String, String)> = params
            .params
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();

        match self.client.request(&params.route, &pairs).await {
            Ok(body) => {
                let text =
                    serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
                ToolOutcome::ok(text)
            }
            Err(err) => failure_outcome(&params.route, &pairs, &err),
        }
    }

    /// Classify and format an upstream body. Only the unrecognized shape is
    /// an error; an empty tabular result is reported as plain information.
    fn classified_outcome(
        &self,
        body: &Value,
        route: &str,
        request_facets: Option<&BTreeMap<String, FacetValue>>,
    ) -> ToolOutcome {
        let classified = classify(body);
        let mut text = format_response(&classified, route);

        match &classified {
            ClassifiedResponse::Unrecognized(_) => ToolOutcome::error(text),
            ClassifiedResponse::TabularData(data) => {
                let state_facet = request_facets
                    .and_then(|facets| facets.get("stateid"))
                    .map(FacetValue::values);
                if let Some(note) = aggregation_advisory(data, state_facet) {
                    text.push_str("\n\n");
                    text.push_str(&note);
                }
                ToolOutcome::ok(text)
            }
            _ => ToolOutcome::ok(text),
        }
    }
}

/// A tool invocation's result: one text block plus the error flag the host
/// surface expects. Upstream failures become text with the flag set; they
/// are never JSON-RPC-level errors.
#[derive(Debug)]
struct ToolOutcome {
    text: String,
    is_error: bool,
}

impl ToolOutcome {
    fn ok(text: String) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    fn error(text: String) -> Self {
        Self {
            text,
            is_error: true,
        }
    }
}

/// Every failure message names the route and the redacted query so the
/// caller can retry by hand. The credential never appears here.
fn failure_outcome(route: &str, params: &[(String, String)], err: &EiaError) -> ToolOutcome {
    ToolOutcome::error(format!(
        "Request to route '{}' failed: {err}\nQuery (redacted): {}",
        route.trim_matches('/'),
        redacted_query(params)
    ))
}

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    _jsonrpc: Option<String>,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

#[derive(Debug, Serialize)]
struct Response {
    jsonrpc: &'static str,
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ResponseError>,
}

impl Response {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, error: ServerError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(ResponseError::from(error)),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponseError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl From<ServerError> for ResponseError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(message) => Self {
                code: -32600,
                message,
                data: None,
            },
            ServerError::InvalidMethod(method) => Self {
                code: -32601,
                message: format!("Unknown method: {method}"),
                data: None,
            },
            ServerError::InvalidParams(message) => Self {
                code: -32602,
                message,
                data: None,
            },
            ServerError::Json(err) => Self {
                code: -32700,
                message: err.to_string(),
                data: None,
            },
            ServerError::Io(err) => Self {
                code: -32020,
                message: err.to_string(),
                data: None,
            },
            ServerError::Eia(err) => Self {
                code: -32010,
                message: err.to_string(),
                data: None,
            },
            ServerError::Serialization(err) => Self {
                code: -32603,
                message: err.to_string(),
                data: None,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unknown method: {0}")]
    InvalidMethod(String),
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Eia(#[from] EiaError),
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
}

type ServerResult<T> = Result<T, ServerError>;

fn parse_required_params<T>(method: &str, params: Option<Value>) -> ServerResult<T>
where
    T: DeserializeOwned,
{
    match params {
        Some(value) => serde_json::from_value(value)
            .map_err(|err| ServerError::InvalidParams(format!("{method}: {err}"))),
        None => Err(ServerError::InvalidParams(format!(
            "{method}: missing parameters"
        ))),
    }
}

fn parse_optional_params<T>(method: &str, params: Option<Value>) -> ServerResult<T>
where
    T: DeserializeOwned + Default,
{
    match params {
        Some(value) => serde_json::from_value(value)
            .map_err(|err| ServerError::InvalidParams(format!("{method}: {err}"))),
        None => Ok(T::default()),
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListRoutesParams {
    #[serde(default)]
    segment_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RouteDataParams {
    route: String,
    #[serde(default)]
    data_elements: Option<Vec<String>>,
    #[serde(default)]
    facets: Option<BTreeMap<String, FacetValue>>,
    #[serde(default)]
    frequency: Option<String>,
    #[serde(default)]
    start_period: Option<String>,
    #[serde(default)]
    end_period: Option<String>,
    #[serde(default)]
    sort_column: Option<String>,
    #[serde(default)]
    sort_direction: Option<SortDirection>,
    #[serde(default)]
    length: Option<u32>,
    #[serde(default)]
    offset: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SeriesDataParams {
    series_id: String,
    #[serde(default)]
    data_elements: Option<Vec<String>>,
    #[serde(default)]
    frequency: Option<String>,
    #[serde(default)]
    start_period: Option<String>,
    #[serde(default)]
    end_period: Option<String>,
    #[serde(default)]
    sort_column: Option<String>,
    #[serde(default)]
    sort_direction: Option<SortDirection>,
    #[serde(default)]
    length: Option<u32>,
    #[serde(default)]
    offset: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DiscoverParams {
    query: String,
    #[serde(default)]
    fetch_metadata: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawRequestParams {
    route: String,
    #[serde(default)]
    params: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct InitializeParams {
    #[serde(default, rename = "clientInfo")]
    client_info: Option<ClientInfo>,
}

#[derive(Debug, Deserialize)]
struct ClientInfo {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Serialize)]
struct InitializeResult {
    #[serde(rename = "serverInfo")]
    server_info: ServerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    capabilities: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "clientInfo")]
    client_info: Option<ClientInfoSummary>,
}

impl InitializeResult {
    fn new(client_info: Option<ClientInfo>) -> Self {
        let client_info = client_info.map(|info| ClientInfoSummary {
            name: info.name,
            version: info.version,
        });

        Self {
            server_info: ServerInfo {
                name: "eia-mcp-server",
                version: env!("CARGO_PKG_VERSION"),
            },
            capabilities: Some(json!({
                "tools": {
                    "list": true
                },
                "resources": {
                    "list": true
                },
                "prompts": {
                    "list": true
                }
            })),
            client_info,
        }
    }
}

#[derive(Debug, Serialize)]
struct ServerInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ClientInfoSummary {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListToolsParams {
    #[serde(default, rename = "cursor")]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct GetPromptParams {
    name: String,
}

#[derive(Debug, Serialize)]
struct ToolSpec {
    tool_name: &'static str,
    method_name: &'static str,
    description: &'static str,
    input_schema: Value,
}

#[derive(Debug, Serialize)]
struct ListToolsResult {
    tools: Vec<ToolDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "nextCursor")]
    next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct ToolDescriptor {
    name: &'static str,
    description: &'static str,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

#[derive(Debug, Serialize)]
struct ToolResponse {
    content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "isError")]
    is_error: Option<bool>,
}

impl From<ToolOutcome> for ToolResponse {
    fn from(outcome: ToolOutcome) -> Self {
        Self {
            content: vec![ToolContent::Text { text: outcome.text }],
            is_error: outcome.is_error.then_some(true),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

fn tool_descriptors() -> Vec<ToolDescriptor> {
    tool_specs()
        .into_iter()
        .map(|spec| ToolDescriptor {
            name: spec.tool_name,
            description: spec.description,
            input_schema: spec.input_schema,
        })
        .collect()
}

fn find_tool_spec(name: &str) -> Option<ToolSpec> {
    tool_specs().into_iter().find(|spec| spec.tool_name == name)
}

fn find_tool_spec_by_method(method: &str) -> Option<ToolSpec> {
    tool_specs()
        .into_iter()
        .find(|spec| spec.method_name == method)
}

fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            tool_name: "eia_list_routes",
            method_name: "eia.listRoutes",
            description: "Explore the EIA v2 data tree: list top-level routes, a route's sub-routes and metadata (facets, data columns, frequencies), or the values of one facet",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "segment_path": {
                        "type": "string",
                        "description": "Path to explore. Empty or omitted lists top-level routes; a route path (e.g. 'electricity/retail-sales') lists sub-routes and metadata; a facet path (e.g. 'electricity/retail-sales/facet/sectorid') lists that facet's values"
                    }
                },
                "additionalProperties": false
            }),
        },
        ToolSpec {
            tool_name: "eia_get_route_data",
            method_name: "eia.getRouteData",
            description: "Fetch tabular data from a route's /data endpoint, rendered as a markdown table. The route is normalized to end in /data",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "route": {"type": "string", "description": "Route path, e.g. 'electricity/retail-sales' or 'electricity/retail-sales/data'"},
                    "data_elements": {"type": "array", "items": {"type": "string"}, "description": "Column ids to return, e.g. [\"price\", \"revenue\"]; discover them with eia_list_routes"},
                    "facets": {
                        "type": "object",
                        "additionalProperties": {
                            "anyOf": [
                                {"type": "string"},
                                {"type": "array", "items": {"type": "string"}}
                            ]
                        },
                        "description": "Facet filters, e.g. {\"stateid\": \"CO\", \"sectorid\": [\"RES\", \"COM\"]}"
                    },
                    "frequency": {"type": "string", "description": "Frequency query value, e.g. 'M' for monthly or 'A' for annual"},
                    "start_period": {"type": "string", "description": "Start bound in YYYY, YYYY-MM, or YYYY-MM-DD form depending on frequency"},
                    "end_period": {"type": "string", "description": "End bound, same format as start_period"},
                    "sort_column": {"type": "string", "description": "Column to sort by, e.g. 'period'"},
                    "sort_direction": {"type": "string", "enum": ["asc", "desc"], "description": "Sort direction; required together with sort_column"},
                    "length": {"type": "integer", "minimum": 1, "maximum": 5000, "description": "Maximum rows to return (default and cap 5000)"},
                    "offset": {"type": "integer", "minimum": 0, "description": "Row offset for pagination"}
                },
                "required": ["route"],
                "additionalProperties": false
            }),
        },
        ToolSpec {
            tool_name: "eia_get_series_data",
            method_name: "eia.getSeriesData",
            description: "Fetch data by a legacy APIv1 series id (e.g. 'ELEC.SALES.CO-RES.A') via the v2 compatibility endpoint. Use only when the user supplies a series id",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "series_id": {"type": "string", "description": "APIv1 series identifier"},
                    "data_elements": {"type": "array", "items": {"type": "string"}, "description": "Column ids to return"},
                    "frequency": {"type": "string", "description": "Frequency query value"},
                    "start_period": {"type": "string", "description": "Start period bound"},
                    "end_period": {"type": "string", "description": "End period bound"},
                    "sort_column": {"type": "string", "description": "Column to sort by"},
                    "sort_direction": {"type": "string", "enum": ["asc", "desc"], "description": "Sort direction; required together with sort_column"},
                    "length": {"type": "integer", "minimum": 1, "maximum": 5000, "description": "Maximum rows to return"},
                    "offset": {"type": "integer", "minimum": 0, "description": "Row offset for pagination"}
                },
                "required": ["series_id"],
                "additionalProperties": false
            }),
        },
        ToolSpec {
            tool_name: "eia_discover_routes",
            method_name: "eia.discoverRoutes",
            description: "Map a natural-language phrase to candidate EIA routes via keyword matching, optionally fetching metadata for the top candidates",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Free-text phrase, e.g. 'solar generation in texas'"},
                    "fetch_metadata": {"type": "boolean", "description": "Also fetch metadata for the top candidates (at most 2)"}
                },
                "required": ["query"],
                "additionalProperties": false
            }),
        },
        ToolSpec {
            tool_name: "eia_raw_request",
            method_name: "eia.rawRequest",
            description: "Debug passthrough: issue a GET against any route and return the raw JSON body without formatting",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "route": {"type": "string", "description": "Route path to request"},
                    "params": {"type": "object", "additionalProperties": true, "description": "Extra query parameters, passed through as-is"}
                },
                "required": ["route"],
                "additionalProperties": false
            }),
        },
    ]
}
