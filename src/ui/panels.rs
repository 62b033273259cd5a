use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::hex_color;
use crate::state::DashboardState;
use crate::ui::{controls, pie, scatter};

const CHART_HEIGHT: f32 = 340.0;
const TITLE_COLOR: &str = "#503D36";

// ---------------------------------------------------------------------------
// Dashboard page (central panel)
// ---------------------------------------------------------------------------

/// Heading, dropdown, pie, slider and scatter, top to bottom.
pub fn dashboard(ui: &mut Ui, state: &mut DashboardState, title: &str, site_search: &mut String) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(title)
                .size(40.0)
                .color(hex_color(TITLE_COLOR)),
        );
    });
    ui.add_space(8.0);

    controls::site_dropdown(ui, state, site_search);
    ui.add_space(8.0);

    pie::success_pie_chart(ui, &state.charts().pie, CHART_HEIGHT);
    ui.add_space(8.0);

    ui.label("Payload range (Kg):");
    controls::payload_slider(ui, state);
    ui.add_space(8.0);

    scatter::success_payload_scatter_chart(
        ui,
        &state.charts().scatter,
        state.dataset().booster_categories(),
        &state.color_map,
        state.slider(),
        CHART_HEIGHT,
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Record counts plus the reset and copy actions.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let range = state.controls().payload;
        ui.label(format!(
            "{} launches loaded, {} in {}–{} kg",
            state.dataset().len(),
            state.in_range_count(),
            range.low,
            range.high
        ));

        ui.separator();

        if ui.button("Reset").clicked() {
            state.reset_controls();
            state.status_message = None;
        }

        if ui.button("Copy chart data").clicked() {
            copy_charts(ui, state);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn copy_charts(ui: &Ui, state: &mut DashboardState) {
    match state.charts_json() {
        Ok(json) => {
            ui.ctx().copy_text(json);
            log::info!("Copied chart data to clipboard");
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to copy chart data: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
