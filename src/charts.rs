//! Chart specifications and the pure function that derives them from the
//! current control values.
//!
//! The pie chart is computed from the whole table (or the selected site's
//! rows) and ignores the payload range; only the scatter chart honours it.

use serde::Serialize;

use crate::data::filter::{
    filter_records, outcome_frequencies, records_for_site, success_rate_by_site, SiteSelection,
};
use crate::data::model::{LaunchDataset, LaunchRecord, OutcomeClass};
use crate::state::ControlState;

pub const SCATTER_TITLE: &str = "Payload vs. Success";
pub const SCATTER_X_LABEL: &str = "Payload Mass (kg)";
pub const SCATTER_Y_LABEL: &str = "Launch Outcome";
pub const SCATTER_COLOR_LABEL: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieSpec {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Each slice's share of the whole. Empty when the total is zero.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        if total <= 0.0 {
            return Vec::new();
        }
        self.slices.iter().map(|s| s.value / total).collect()
    }
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_kg: f64,
    pub outcome: OutcomeClass,
    pub booster_category: String,
    pub site: String,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(r: &LaunchRecord) -> Self {
        ScatterPoint {
            payload_kg: r.payload_kg,
            outcome: r.outcome,
            booster_category: r.booster_category.clone(),
            site: r.site.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSpec {
    /// Points grouped per booster category, in `category_order`. Categories
    /// with no points are skipped.
    pub fn series<'a>(&'a self, category_order: &'a [String]) -> Vec<(&'a str, Vec<&'a ScatterPoint>)> {
        category_order
            .iter()
            .filter_map(|cat| {
                let pts: Vec<&ScatterPoint> = self
                    .points
                    .iter()
                    .filter(|p| &p.booster_category == cat)
                    .collect();
                (!pts.is_empty()).then_some((cat.as_str(), pts))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Both charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpecs {
    pub pie: PieSpec,
    pub scatter: ScatterSpec,
}

/// Recompute both charts from scratch for the given controls.
pub fn compute_charts(dataset: &LaunchDataset, controls: &ControlState) -> ChartSpecs {
    ChartSpecs {
        pie: pie_spec(dataset, &controls.site),
        scatter: ScatterSpec {
            title: SCATTER_TITLE.to_string(),
            x_label: SCATTER_X_LABEL.to_string(),
            y_label: SCATTER_Y_LABEL.to_string(),
            color_label: SCATTER_COLOR_LABEL.to_string(),
            points: filter_records(dataset, &controls.site, &controls.payload)
                .into_iter()
                .map(ScatterPoint::from)
                .collect(),
        },
    }
}

fn pie_spec(dataset: &LaunchDataset, site: &SiteSelection) -> PieSpec {
    match site {
        SiteSelection::All => PieSpec {
            title: "Total Success Launches By Site".to_string(),
            slices: success_rate_by_site(dataset.records())
                .into_iter()
                .map(|(label, value)| PieSlice { label, value })
                .collect(),
        },
        SiteSelection::Site(name) => PieSpec {
            title: format!("Total Success Launches for site {name}"),
            slices: outcome_frequencies(records_for_site(dataset, site))
                .into_iter()
                .map(|(class, value)| PieSlice {
                    label: class.label().to_string(),
                    value,
                })
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::PayloadRange;

    fn example() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("KSC LC-39A", 5000.0, "v1.0", OutcomeClass::Success),
            LaunchRecord::new("KSC LC-39A", 3000.0, "v1.0", OutcomeClass::Failure),
            LaunchRecord::new("CCAFS LC-40", 2000.0, "v1.1", OutcomeClass::Success),
        ])
        .unwrap()
    }

    fn controls(site: &str, low: f64, high: f64) -> ControlState {
        ControlState {
            site: SiteSelection::from_value(site),
            payload: PayloadRange::new(low, high),
        }
    }

    fn slice_map(pie: &PieSpec) -> Vec<(&str, f64)> {
        pie.slices.iter().map(|s| (s.label.as_str(), s.value)).collect()
    }

    #[test]
    fn all_sites_example() {
        let ds = example();
        let charts = compute_charts(&ds, &controls("ALL", 0.0, 10_000.0));

        assert_eq!(charts.pie.title, "Total Success Launches By Site");
        assert_eq!(
            slice_map(&charts.pie),
            vec![("CCAFS LC-40", 1.0), ("KSC LC-39A", 0.5)]
        );
        assert_eq!(charts.scatter.points.len(), 3);
        assert_eq!(charts.scatter.title, "Payload vs. Success");
        assert_eq!(charts.scatter.y_label, "Launch Outcome");
    }

    #[test]
    fn single_site_example() {
        let ds = example();
        let charts = compute_charts(&ds, &controls("KSC LC-39A", 4000.0, 10_000.0));

        assert_eq!(charts.pie.title, "Total Success Launches for site KSC LC-39A");
        assert_eq!(slice_map(&charts.pie), vec![("Success", 0.5), ("Failed", 0.5)]);
        assert_eq!(charts.scatter.points.len(), 1);
        assert_eq!(charts.scatter.points[0].payload_kg, 5000.0);
        assert_eq!(charts.scatter.points[0].outcome, OutcomeClass::Success);
    }

    #[test]
    fn all_sites_pie_ignores_payload_range() {
        let ds = example();
        let wide = compute_charts(&ds, &controls("ALL", 0.0, 10_000.0));
        let narrow = compute_charts(&ds, &controls("ALL", 4500.0, 4600.0));
        assert_eq!(wide.pie, narrow.pie);
        assert!(narrow.scatter.points.is_empty());

        let expected: f64 = 1.0 + 0.5;
        assert!((narrow.pie.total() - expected).abs() < 1e-12);
        assert_eq!(narrow.pie.slices.len(), ds.sites().len());
    }

    #[test]
    fn site_pie_sums_to_one_and_ignores_payload_range() {
        let ds = example();
        for (low, high) in [(0.0, 10_000.0), (0.0, 0.0), (2500.0, 3500.0)] {
            let charts = compute_charts(&ds, &controls("KSC LC-39A", low, high));
            assert!((charts.pie.total() - 1.0).abs() < 1e-12);
            assert!(matches!(charts.pie.slices.len(), 1 | 2));
            assert!(charts
                .pie
                .slices
                .iter()
                .all(|s| s.label == "Success" || s.label == "Failed"));
        }
    }

    #[test]
    fn single_outcome_site_has_one_slice() {
        let ds = example();
        let charts = compute_charts(&ds, &controls("CCAFS LC-40", 0.0, 10_000.0));
        assert_eq!(slice_map(&charts.pie), vec![("Success", 1.0)]);
        assert_eq!(charts.pie.fractions(), vec![1.0]);
    }

    #[test]
    fn scatter_rows_match_filters_exactly() {
        let ds = example();
        let charts = compute_charts(&ds, &controls("ALL", 2000.0, 3000.0));
        let payloads: Vec<f64> = charts.scatter.points.iter().map(|p| p.payload_kg).collect();
        assert_eq!(payloads, vec![3000.0, 2000.0]);

        let charts = compute_charts(&ds, &controls("KSC LC-39A", 2000.0, 3000.0));
        let payloads: Vec<f64> = charts.scatter.points.iter().map(|p| p.payload_kg).collect();
        assert_eq!(payloads, vec![3000.0]);
    }

    #[test]
    fn empty_scatter_still_has_pie() {
        let ds = example();
        let charts = compute_charts(&ds, &controls("CCAFS LC-40", 6000.0, 9000.0));
        assert!(charts.scatter.points.is_empty());
        assert_eq!(charts.pie.slices.len(), 1);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let ds = example();
        let c = controls("KSC LC-39A", 1000.0, 6000.0);
        assert_eq!(compute_charts(&ds, &c), compute_charts(&ds, &c));
    }

    #[test]
    fn series_follow_category_order() {
        let ds = example();
        let charts = compute_charts(&ds, &controls("ALL", 0.0, 10_000.0));
        let order = vec!["v1.1".to_string(), "v1.0".to_string(), "FT".to_string()];
        let series = charts.scatter.series(&order);
        let names: Vec<&str> = series.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["v1.1", "v1.0"]);
        assert_eq!(series[1].1.len(), 2);
    }

    #[test]
    fn zero_total_pie_has_no_fractions() {
        let pie = PieSpec {
            title: String::new(),
            slices: vec![PieSlice { label: "A".into(), value: 0.0 }],
        };
        assert!(pie.fractions().is_empty());
    }
}
