use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::charts::PieSpec;
use crate::color::pie_slice_color;

// Arc resolution for a full circle.
const CIRCLE_SEGMENTS: usize = 96;
// Polygon fill is only correct for convex shapes, so wedges are drawn in
// pieces no wider than a quarter turn.
const MAX_PIECE: f64 = 0.25;

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

pub fn success_pie_chart(ui: &mut Ui, pie: &PieSpec, height: f32) {
    ui.label(RichText::new(&pie.title).heading());

    let fractions = pie.fractions();
    if fractions.is_empty() {
        ui.add_sized([ui.available_width(), height], |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| ui.label("No successful launches to show."))
                .inner
        });
        return;
    }

    Plot::new("success-pie-chart")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (i, (slice, frac)) in pie.slices.iter().zip(&fractions).enumerate() {
                let end = start + frac;
                let color = pie_slice_color(i);

                for piece in wedge_pieces(start, end, 1.0) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(piece))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                if *frac > 0.0 {
                    let [x, y] = point_on_circle((start + end) / 2.0, 0.65);
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{:.1}%", frac * 100.0)).color(Color32::WHITE),
                    ));
                }
                start = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Point at `fraction` of a full turn, starting at 12 o'clock and running
/// clockwise.
fn point_on_circle(fraction: f64, radius: f64) -> [f64; 2] {
    let angle = TAU / 4.0 - fraction * TAU;
    [radius * angle.cos(), radius * angle.sin()]
}

/// Convex polygons covering the wedge between two fractions of the circle.
fn wedge_pieces(start: f64, end: f64, radius: f64) -> Vec<Vec<[f64; 2]>> {
    let mut pieces = Vec::new();
    let mut from = start;
    while end - from > f64::EPSILON {
        let to = (from + MAX_PIECE).min(end);
        let steps = (((to - from) * CIRCLE_SEGMENTS as f64).ceil() as usize).max(1);

        let mut piece = Vec::with_capacity(steps + 2);
        piece.push([0.0, 0.0]);
        for k in 0..=steps {
            let f = from + (to - from) * k as f64 / steps as f64;
            piece.push(point_on_circle(f, radius));
        }
        pieces.push(piece);
        from = to;
    }
    pieces
}
