//! Async Rust client for the U.S. Energy Information Administration (EIA)
//! Open Data API v2.
//!
//! The API organizes tabular energy data as a hierarchy of slash-separated
//! routes, each optionally exposing a `/data` endpoint for rows and
//! `facet/<id>` endpoints for filter values. This crate covers the full
//! request pipeline: encoding the API's quirky bracketed query parameters,
//! issuing the HTTP call, classifying the loosely-shaped JSON responses,
//! and rendering them as readable text, plus a keyword heuristic for
//! finding routes from natural-language phrases and a TTL cache for
//! metadata lookups.

pub mod cache;
pub mod classify;
pub mod client;
pub mod discover;
pub mod format;
pub mod query;

pub use cache::MetadataCache;
pub use classify::{ClassifiedResponse, classify};
pub use client::{Configuration, EIA_API_BASE_URL, EiaClient, EiaError};
pub use discover::{Concept, discover, matching_concepts};
pub use format::{aggregation_advisory, format_response};
pub use query::{FacetValue, RouteRequest, SortDirection, encode, ensure_data_suffix, redacted_query};
