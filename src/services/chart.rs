// src/services/chart.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version stamped on every chart we cache. Bump when the adapted shape changes.
pub const CHART_SCHEMA_VERSION: u32 = 1;

// Keys whose presence at the top level means the payload is already a chart.
const CHART_FIELDS: &[&str] = &["planets", "houses", "ascendant", "lagna", "dasha"];
const ENVELOPE_FIELDS: &[&str] = &["data", "chart"];

/// An adapted birth chart. The handler passes `chart` through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub schema_version: u32,
    pub chart: Map<String, Value>,
}

impl ChartData {
    pub fn new(chart: Map<String, Value>) -> Self {
        Self { schema_version: CHART_SCHEMA_VERSION, chart }
    }

    pub fn is_current(&self) -> bool {
        self.schema_version == CHART_SCHEMA_VERSION
    }
}

/// Normalize a raw chart service response into a [`ChartData`].
///
/// Unwraps a `data`/`chart` envelope when the payload carries no chart fields
/// of its own. Non-object payloads are kept under a `raw` key.
pub fn adapt_chart_if_needed(raw: Value) -> ChartData {
    match raw {
        Value::Object(mut map) => {
            let has_chart_fields = CHART_FIELDS.iter().any(|k| map.contains_key(*k));
            if !has_chart_fields {
                for key in ENVELOPE_FIELDS {
                    if matches!(map.get(*key), Some(Value::Object(_))) {
                        if let Some(Value::Object(inner)) = map.remove(*key) {
                            return ChartData::new(inner);
                        }
                    }
                }
            }
            ChartData::new(map)
        }
        other => {
            let mut map = Map::new();
            map.insert("raw".to_string(), other);
            ChartData::new(map)
        }
    }
}
