//! Source configuration: which external lists to fetch and how to
//! read them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::PipelineError;

/// One configured external source list. Static: loaded once at
/// startup, immutable for the rest of the run.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    /// Data-retrieval options forwarded to the CSV reader
    /// (`delimiter`, `has_headers`).
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct SourceSpec {
    #[serde(rename = "URL")]
    url: String,
    #[serde(rename = "PARAMS", default)]
    params: BTreeMap<String, String>,
}

/// Load source configs from a JSON mapping file.
///
/// The mapping's key order is the processing order, which is why
/// serde_json's `preserve_order` feature is on.
pub fn load_sources(path: &Path) -> Result<Vec<SourceConfig>, PipelineError> {
    let text = std::fs::read_to_string(path)?;
    parse_sources(&text)
}

pub fn parse_sources(text: &str) -> Result<Vec<SourceConfig>, PipelineError> {
    let map: serde_json::Map<String, Value> =
        serde_json::from_str(text).map_err(|e| PipelineError::Config(e.to_string()))?;

    map.into_iter()
        .map(|(name, value)| {
            let spec: SourceSpec = serde_json::from_value(value)
                .map_err(|e| PipelineError::Config(format!("source {name}: {e}")))?;
            Ok(SourceConfig {
                name,
                url: spec.url,
                params: spec.params,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources_keeps_file_order() {
        let text = r#"{
            "sdn": {"URL": "https://example.com/sdn.csv", "PARAMS": {"has_headers": "false"}},
            "alt": {"URL": "https://example.com/alt.csv"},
            "consolidated": {"URL": "https://example.com/cons.csv", "PARAMS": {"delimiter": ";"}}
        }"#;

        let sources = parse_sources(text).unwrap();
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].name, "sdn");
        assert_eq!(sources[1].name, "alt");
        assert_eq!(sources[2].name, "consolidated");
        assert_eq!(sources[0].params.get("has_headers").unwrap(), "false");
        assert!(sources[1].params.is_empty());
        assert_eq!(sources[2].url, "https://example.com/cons.csv");
    }

    #[test]
    fn test_parse_sources_rejects_missing_url() {
        let text = r#"{"sdn": {"PARAMS": {}}}"#;
        let err = parse_sources(text).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
