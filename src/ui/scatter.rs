use std::ops::RangeInclusive;

use eframe::egui::{RichText, Ui};
use egui_plot::{GridMark, Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::charts::ScatterSpec;
use crate::color::ColorMap;
use crate::config::SliderConfig;

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter chart
// ---------------------------------------------------------------------------

/// Render one point series per booster category, coloured by `color_map`.
pub fn success_payload_scatter_chart(
    ui: &mut Ui,
    scatter: &ScatterSpec,
    categories: &[String],
    color_map: &ColorMap,
    slider: &SliderConfig,
    height: f32,
) {
    ui.label(RichText::new(&scatter.title).heading());

    Plot::new("success-payload-scatter-chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(scatter.x_label.as_str())
        .y_axis_label(scatter.y_label.as_str())
        .y_axis_formatter(outcome_tick_label)
        .include_x(slider.min)
        .include_x(slider.max)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (category, points) in scatter.series(categories) {
                let coords: PlotPoints = points
                    .iter()
                    .map(|p| [p.payload_kg, p.outcome.as_f64()])
                    .collect();

                plot_ui.points(
                    Points::new(coords)
                        .name(category)
                        .color(color_map.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

/// The outcome axis is categorical: only 0 and 1 get a label.
fn outcome_tick_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if mark.value == 0.0 || mark.value == 1.0 {
        format!("{}", mark.value as i64)
    } else {
        String::new()
    }
}
