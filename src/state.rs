use std::sync::Arc;

use anyhow::{Context, Result};

use crate::charts::{compute_charts, ChartSpecs};
use crate::color::ColorMap;
use crate::config::SliderConfig;
use crate::data::filter::{filter_records, PayloadRange, SiteSelection};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Control values
// ---------------------------------------------------------------------------

/// Current values of the site dropdown and the payload slider.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl ControlState {
    /// Startup values: every site, full payload span of the dataset.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        let (min, max) = dataset.payload_bounds();
        Self {
            site: SiteSelection::All,
            payload: PayloadRange::new(min, max),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Every control mutation goes through a setter; a setter that actually
/// changes a value recomputes both charts.
pub struct DashboardState {
    dataset: Arc<LaunchDataset>,
    controls: ControlState,
    slider: SliderConfig,
    /// Colour per booster category, fixed for the whole session.
    pub color_map: ColorMap,
    charts: ChartSpecs,
    /// Status message shown in the top bar.
    pub status_message: Option<String>,
}

impl DashboardState {
    pub fn new(dataset: Arc<LaunchDataset>, slider: SliderConfig) -> Self {
        let controls = ControlState::initial(&dataset);
        let (min, max) = dataset.payload_bounds();
        if min < slider.min || max > slider.max {
            log::warn!(
                "Dataset payloads {min}..={max} kg exceed the slider bounds {}..={}; \
                 the initial range keeps the dataset bounds until a handle is moved",
                slider.min,
                slider.max
            );
        }

        let color_map = ColorMap::new(dataset.booster_categories());
        let charts = compute_charts(&dataset, &controls);
        Self {
            dataset,
            controls,
            slider,
            color_map,
            charts,
            status_message: None,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn slider(&self) -> &SliderConfig {
        &self.slider
    }

    /// The charts for the current control values.
    pub fn charts(&self) -> &ChartSpecs {
        &self.charts
    }

    /// Dropdown options: `All` followed by every site in dataset order.
    pub fn site_options(&self) -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::All)
            .chain(
                self.dataset
                    .sites()
                    .iter()
                    .map(|s| SiteSelection::from_value(s)),
            )
            .collect()
    }

    /// Rows in the current payload range across all sites.
    pub fn in_range_count(&self) -> usize {
        filter_records(&self.dataset, &SiteSelection::All, &self.controls.payload).len()
    }

    pub fn select_site(&mut self, site: SiteSelection) {
        if self.controls.site != site {
            self.controls.site = site;
            self.recompute();
        }
    }

    /// Move the low handle; pushes the high handle along if it is passed.
    pub fn set_payload_low(&mut self, low: f64) {
        let high = self.controls.payload.high.max(low);
        self.set_payload_range(PayloadRange { low, high });
    }

    /// Move the high handle; pushes the low handle along if it is passed.
    pub fn set_payload_high(&mut self, high: f64) {
        let low = self.controls.payload.low.min(high);
        self.set_payload_range(PayloadRange { low, high });
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) {
        let range = PayloadRange::new(range.low, range.high);
        if self.controls.payload != range {
            self.controls.payload = range;
            self.recompute();
        }
    }

    /// Restore the startup control values.
    pub fn reset_controls(&mut self) {
        let initial = ControlState::initial(&self.dataset);
        if self.controls != initial {
            self.controls = initial;
            self.recompute();
        }
    }

    /// Current chart data as pretty-printed JSON.
    pub fn charts_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.charts).context("serializing chart data")
    }

    fn recompute(&mut self) {
        self.charts = compute_charts(&self.dataset, &self.controls);
        log::debug!(
            "Recomputed charts for site={} payload={}..={}: {} slices, {} points",
            self.controls.site,
            self.controls.payload.low,
            self.controls.payload.high,
            self.charts.pie.slices.len(),
            self.charts.scatter.points.len()
        );
    }
}
