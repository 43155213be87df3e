/// A named energy concept mapping free-text keywords to candidate API
/// routes. The table is static for the process lifetime; it is a
/// convenience heuristic, not a search index, and carries no completeness
/// or precision guarantee.
#[derive(Debug)]
pub struct Concept {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub routes: &'static [&'static str],
    pub common_facets: &'static [&'static str],
}

pub const CONCEPTS: &[Concept] = &[
    Concept {
        name: "electricity",
        keywords: &[
            "electricity",
            "electric",
            "power",
            "grid",
            "utility",
            "retail sales",
            "generation",
            "kilowatt",
            "megawatt",
        ],
        routes: &[
            "electricity/retail-sales",
            "electricity/electric-power-operational-data",
        ],
        common_facets: &["stateid", "sectorid"],
    },
    Concept {
        name: "renewable",
        keywords: &["renewable", "solar", "wind", "hydro", "geothermal", "biomass"],
        routes: &[
            "electricity/electric-power-operational-data",
            "electricity/facility-fuel",
        ],
        common_facets: &["stateid", "fueltypeid"],
    },
    Concept {
        name: "petroleum",
        keywords: &["petroleum", "oil", "crude", "gasoline", "diesel", "refinery", "barrel"],
        routes: &["petroleum/pri/gnd", "petroleum/sum/snd"],
        common_facets: &["duoarea", "product"],
    },
    Concept {
        name: "natural-gas",
        keywords: &["natural gas", "lng", "pipeline", "shale"],
        routes: &["natural-gas/pri/sum", "natural-gas/cons/sum"],
        common_facets: &["duoarea", "process"],
    },
    Concept {
        name: "coal",
        keywords: &["coal", "mine", "lignite", "anthracite"],
        routes: &["coal/consumption-and-quality", "coal/market-sales-price"],
        common_facets: &["location", "sector"],
    },
    Concept {
        name: "nuclear",
        keywords: &["nuclear", "uranium", "reactor"],
        routes: &["nuclear-outages/us-nuclear-outages"],
        common_facets: &[],
    },
    Concept {
        name: "total-energy",
        keywords: &["total energy", "energy overview", "consumption", "production", "summary"],
        routes: &["total-energy"],
        common_facets: &["msn"],
    },
    Concept {
        name: "emissions",
        keywords: &["emission", "co2", "carbon", "greenhouse"],
        routes: &["co2-emissions/co2-emissions-aggregates"],
        common_facets: &["stateId", "sectorId", "fuelId"],
    },
    Concept {
        name: "international",
        keywords: &["international", "world", "country", "global", "import", "export"],
        routes: &["international"],
        common_facets: &["countryRegionId", "productId"],
    },
];

/// Map a free-text phrase to candidate route paths.
///
/// Lower-cases the input, checks each concept keyword for substring
/// membership, and credits all of a matching concept's routes with
/// `keyword length x occurrence count`. Routes come back sorted by
/// descending accumulated score; ties keep first-registered order. Empty
/// input or no matches yields an empty vector - callers fall back to
/// listing top-level routes, never treat this as an error.
pub fn discover(query: &str) -> Vec<String> {
    let text = query.to_lowercase();
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&'static str, usize)> = Vec::new();
    for concept in CONCEPTS {
        let credit: usize = concept
            .keywords
            .iter()
            .map(|keyword| keyword.len() * occurrences(&text, keyword))
            .sum();
        if credit == 0 {
            continue;
        }
        for route in concept.routes {
            match scored.iter_mut().find(|(r, _)| r == route) {
                Some(entry) => entry.1 += credit,
                None => scored.push((route, credit)),
            }
        }
    }

    // Stable sort keeps first-registered order among equal scores.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(route, _)| route.to_string()).collect()
}

/// The concepts whose keywords match the query, in table order. Used by
/// callers to surface common-facet hints alongside the candidate routes.
pub fn matching_concepts(query: &str) -> Vec<&'static Concept> {
    let text = query.to_lowercase();
    if text.trim().is_empty() {
        return Vec::new();
    }
    CONCEPTS
        .iter()
        .filter(|concept| {
            concept
                .keywords
                .iter()
                .any(|keyword| occurrences(&text, keyword) > 0)
        })
        .collect()
}

fn occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
