pub mod analytics;
pub mod config;
pub mod layout;
pub mod lenient;
pub mod loader;
pub mod measure;
pub mod metrics;
pub mod raw;
pub mod schema;

use wasm_bindgen::prelude::*;

use analytics::Analyzer;
use layout::GridLayout;
use metrics::MetricsSnapshot;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Lay out backend schema JSON as a node/edge graph (JSON).
#[wasm_bindgen(js_name = "schemaGraph")]
pub fn schema_graph(schema_json: &str) -> Result<String, String> {
    let schema = loader::parse_schema(schema_json).map_err(|e| e.to_string())?;
    let graph = GridLayout::default().layout(&schema);
    serde_json::to_string(&graph).map_err(|e| e.to_string())
}

/// Compute graph statistics (JSON) for backend schema JSON.
#[wasm_bindgen(js_name = "schemaStats")]
pub fn schema_stats(
    schema_json: &str,
    selected: Option<String>,
    metrics_json: Option<String>,
) -> Result<String, String> {
    let schema = loader::parse_schema(schema_json).map_err(|e| e.to_string())?;
    let metrics = metrics_json
        .as_deref()
        .map(MetricsSnapshot::from_json)
        .transpose()
        .map_err(|e| e.to_string())?;

    let mut analyzer = Analyzer::default();
    if let Some(metrics) = &metrics {
        analyzer = analyzer.with_metrics(metrics);
    }
    let stats = analyzer.analyze(&schema, selected.as_deref());
    serde_json::to_string(&stats).map_err(|e| e.to_string())
}
