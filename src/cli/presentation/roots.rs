//! Roots presentation: table of root ids and paths.

use crate::error::ApiError;
use crate::roots::RootRegistry;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

pub fn format_roots_text(registry: &RootRegistry) -> String {
    if registry.is_empty() {
        return "No shared directories configured.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Root ID", "Name", "Path"]);
    for root in registry.roots() {
        table.add_row(vec![
            root.id.clone(),
            root.name(),
            root.absolute_path.display().to_string(),
        ]);
    }
    table.to_string()
}

pub fn format_roots_json(registry: &RootRegistry) -> Result<String, ApiError> {
    let roots: Vec<serde_json::Value> = registry
        .roots()
        .map(|root| {
            json!({
                "rootId": root.id,
                "name": root.name(),
                "path": root.absolute_path.display().to_string(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&roots).map_err(|e| ApiError::OutputError(e.to_string()))
}
