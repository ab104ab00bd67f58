use eframe::egui::{Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bottom bar – load summary or error
// ---------------------------------------------------------------------------

/// One-line summary of what was loaded, or why nothing was.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Data: {}", state.data_dir.display()));
        ui.separator();

        if let Some(diagram) = &state.diagram {
            ui.label(format!(
                "{} series, {} points",
                diagram.series.len(),
                diagram.point_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

