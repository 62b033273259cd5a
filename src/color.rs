use std::collections::HashMap;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Qualitative palettes
// ---------------------------------------------------------------------------

/// ColorBrewer "Set1", used for booster categories.
const SET1: [&str; 9] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];

/// Plotly's default qualitative sequence, used for pie slices.
const PLOTLY: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

/// Parse a `#rrggbb` string. Falls back to gray on malformed input.
pub fn hex_color(hex: &str) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(c) => Color32::from_rgb(c.red, c.green, c.blue),
        Err(_) => Color32::GRAY,
    }
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// `n` colours: Set1 first, then generated hues for anything beyond it.
pub fn qualitative_palette(n: usize) -> Vec<Color32> {
    let mut colors: Vec<Color32> = SET1.iter().take(n).map(|h| hex_color(h)).collect();
    if n > SET1.len() {
        colors.extend(generate_palette(n - SET1.len()));
    }
    colors
}

/// Colour of the `i`-th pie slice; the sequence repeats.
pub fn pie_slice_color(i: usize) -> Color32 {
    hex_color(PLOTLY[i % PLOTLY.len()])
}

// ---------------------------------------------------------------------------
// Color mapping: booster category → Color32
// ---------------------------------------------------------------------------

/// Maps each booster category to a fixed colour.
///
/// Built once from the full dataset so a category keeps its colour no matter
/// which subset is plotted.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign colours in the given order (first appearance in the dataset).
    pub fn new(categories: &[String]) -> Self {
        let palette = qualitative_palette(categories.len());
        let mapping = categories
            .iter()
            .cloned()
            .zip(palette)
            .collect::<HashMap<String, Color32>>();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}
