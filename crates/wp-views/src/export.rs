//! Chart specification export

use egui::Ui;
use serde::Serialize;

/// Pretty JSON of a chart specification
pub fn spec_to_json<T: Serialize>(spec: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(spec)
}

/// Button copying a specification to the clipboard
pub fn copy_spec_button<T: Serialize>(ui: &mut Ui, spec: &T) {
    if ui
        .small_button("📋 JSON")
        .on_hover_text("Copiar a especificação do gráfico")
        .clicked()
    {
        match spec_to_json(spec) {
            Ok(json) => {
                tracing::debug!("Copied chart specification ({} bytes)", json.len());
                ui.output_mut(|o| o.copied_text = json);
            }
            Err(e) => tracing::error!("Failed to serialize chart specification: {}", e),
        }
    }
}
