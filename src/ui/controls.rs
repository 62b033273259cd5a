use eframe::egui::{self, Align2, FontId, Response, Sense, Slider, SliderClamping, TextEdit, Ui};

use crate::data::filter::SiteSelection;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Site dropdown
// ---------------------------------------------------------------------------

/// Searchable single-select dropdown over "All Sites" and every launch site.
pub fn site_dropdown(ui: &mut Ui, state: &mut DashboardState, search: &mut String) {
    let current = state.controls().site.clone();
    let options = state.site_options();

    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(current.display_label())
        .width(ui.available_width().min(420.0))
        .close_behavior(egui::PopupCloseBehavior::CloseOnClickOutside)
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(TextEdit::singleline(search).hint_text("Search sites…"));
            ui.separator();

            let visible: Vec<&SiteSelection> = options
                .iter()
                .filter(|o| option_matches(o, search.as_str()))
                .collect();
            for opt in visible {
                if ui
                    .selectable_label(*opt == current, opt.display_label())
                    .clicked()
                {
                    state.select_site(opt.clone());
                    search.clear();
                    ui.memory_mut(|m| m.close_popup());
                }
            }
        });
}

/// Case-insensitive substring match on the label or the raw value.
fn option_matches(option: &SiteSelection, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty()
        || option.display_label().to_lowercase().contains(&needle)
        || option.value().to_lowercase().contains(&needle)
}

// ---------------------------------------------------------------------------
// Payload range slider
// ---------------------------------------------------------------------------

/// Two-handle payload range with labelled tick marks under the rail.
pub fn payload_slider(ui: &mut Ui, state: &mut DashboardState) {
    let cfg = state.slider().clone();
    let range = state.controls().payload;
    let (mut low, mut high) = (range.low, range.high);

    let mut low_changed = false;
    let mut high_changed = false;

    ui.push_id("payload-slider", |ui: &mut Ui| {
        ui.spacing_mut().slider_width = (ui.available_width() - 120.0).max(200.0);

        // No clamping: values outside the rail (e.g. the dataset's own bounds)
        // stay untouched until a handle is moved.
        low_changed = moved_by_user(&ui.add(
            Slider::new(&mut low, cfg.min..=cfg.max)
                .step_by(cfg.step)
                .clamping(SliderClamping::Never)
                .text("from"),
        ));
        high_changed = moved_by_user(&ui.add(
            Slider::new(&mut high, cfg.min..=cfg.max)
                .step_by(cfg.step)
                .clamping(SliderClamping::Never)
                .text("to"),
        ));

        tick_marks(ui, &cfg.marks, cfg.min, cfg.max);
    });

    if low_changed {
        state.set_payload_low(low);
    }
    if high_changed {
        state.set_payload_high(high);
    }
}

/// A slider reports `changed()` for normalisation it applies on its own, so
/// only count a change that came with pointer or keyboard interaction.
fn moved_by_user(response: &Response) -> bool {
    response.changed()
        && (response.dragged()
            || response.drag_stopped()
            || response.clicked()
            || response.has_focus()
            || response.lost_focus())
}

fn tick_marks(ui: &mut Ui, marks: &[f64], min: f64, max: f64) {
    let width = ui.spacing().slider_width;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 16.0), Sense::hover());
    // The handle centre never reaches the very edge of the rail.
    let inset = ui.spacing().interact_size.y / 2.5;
    let painter = ui.painter_at(rect.expand(8.0));
    let color = ui.visuals().weak_text_color();

    for &mark in marks {
        let x = mark_x(mark, min, max, rect.left() + inset, rect.right() - inset);
        painter.text(
            egui::pos2(x, rect.top()),
            Align2::CENTER_TOP,
            format!("{mark}"),
            FontId::proportional(11.0),
            color,
        );
    }
}

/// Horizontal position of `value` on a rail spanning `left..=right`.
fn mark_x(value: f64, min: f64, max: f64, left: f32, right: f32) -> f32 {
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0) as f32;
    left + t * (right - left)
}
