use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::model::{LaunchDataset, LaunchRecord, OutcomeClass};

// ---------------------------------------------------------------------------
// Predicates: site selection and payload range
// ---------------------------------------------------------------------------

/// Dropdown value meaning "every site".
pub const ALL_SITES: &str = "ALL";

/// The site dropdown's current value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a raw dropdown value; `"ALL"` is the sentinel for every site.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The raw dropdown value.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(s) => s,
        }
    }

    /// Text shown in the dropdown.
    pub fn display_label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(s) => s,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl From<SiteSelection> for String {
    fn from(selection: SiteSelection) -> Self {
        selection.value().to_string()
    }
}

/// Inclusive payload interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Build a range from two ends in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { low: a, high: b }
        } else {
            PayloadRange { low: b, high: a }
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_kg: f64) -> bool {
        self.low <= payload_kg && payload_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Row filtering
// ---------------------------------------------------------------------------

/// Records matching `site` whose payload lies in `range`, in dataset order.
pub fn filter_records<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteSelection,
    range: &PayloadRange,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|r| site.matches(&r.site) && range.contains(r.payload_kg))
        .collect()
}

/// Records matching `site`, ignoring payload.
pub fn records_for_site<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteSelection,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|r| site.matches(&r.site))
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Mean of the outcome class per site, keyed and ordered by site name.
pub fn success_rate_by_site<'a, I>(records: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.site.as_str()).or_insert((0.0, 0));
        entry.0 += r.outcome.as_f64();
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(site, (sum, n))| (site.to_string(), sum / n as f64))
        .collect()
}

/// Relative frequency of each outcome present in `records`.
///
/// Sorted by descending frequency; a tie puts `Success` first. Classes that do
/// not occur are omitted, so a site with a single outcome yields one entry.
pub fn outcome_frequencies<'a, I>(records: I) -> Vec<(OutcomeClass, f64)>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut counts: BTreeMap<OutcomeClass, usize> = BTreeMap::new();
    let mut total = 0usize;
    for r in records {
        *counts.entry(r.outcome).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return Vec::new();
    }

    let mut freqs: Vec<(OutcomeClass, usize)> = counts.into_iter().collect();
    freqs.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    freqs
        .into_iter()
        .map(|(class, n)| (class, n as f64 / total as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("KSC LC-39A", 5000.0, "v1.0", OutcomeClass::Success),
            LaunchRecord::new("KSC LC-39A", 3000.0, "v1.0", OutcomeClass::Failure),
            LaunchRecord::new("CCAFS LC-40", 2000.0, "v1.1", OutcomeClass::Success),
            LaunchRecord::new("CCAFS LC-40", 4000.0, "v1.1", OutcomeClass::Success),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, "FT", OutcomeClass::Failure),
        ])
        .unwrap()
    }

    #[test]
    fn site_selection_values() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from_value("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".into())
        );
        assert_eq!(SiteSelection::All.value(), "ALL");
        assert_eq!(SiteSelection::All.display_label(), "All Sites");
        assert!(SiteSelection::All.matches("anything"));
        assert!(!SiteSelection::Site("A".into()).matches("B"));
    }

    #[test]
    fn payload_range_is_inclusive_and_ordered() {
        let r = PayloadRange::new(5000.0, 2000.0);
        assert_eq!(r, PayloadRange { low: 2000.0, high: 5000.0 });
        assert!(r.contains(2000.0));
        assert!(r.contains(5000.0));
        assert!(!r.contains(1999.9));
        assert!(!r.contains(5000.1));
    }

    #[test]
    fn filter_by_range_keeps_order() {
        let ds = dataset();
        let rows = filter_records(&ds, &SiteSelection::All, &PayloadRange::new(3000.0, 5000.0));
        let payloads: Vec<f64> = rows.iter().map(|r| r.payload_kg).collect();
        assert_eq!(payloads, vec![5000.0, 3000.0, 4000.0]);
    }

    #[test]
    fn filter_by_site_and_range() {
        let ds = dataset();
        let site = SiteSelection::Site("CCAFS LC-40".into());
        let rows = filter_records(&ds, &site, &PayloadRange::new(0.0, 3000.0));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].payload_kg, 2000.0);
        assert_eq!(records_for_site(&ds, &site).len(), 2);
    }

    #[test]
    fn success_rate_groups_sorted_by_site() {
        let ds = dataset();
        let rates = success_rate_by_site(ds.records());
        assert_eq!(
            rates,
            vec![
                ("CCAFS LC-40".to_string(), 1.0),
                ("KSC LC-39A".to_string(), 0.5),
                ("VAFB SLC-4E".to_string(), 0.0),
            ]
        );
    }

    #[test]
    fn frequencies_omit_absent_classes() {
        let ds = dataset();
        let site = SiteSelection::Site("CCAFS LC-40".into());
        let freqs = outcome_frequencies(records_for_site(&ds, &site));
        assert_eq!(freqs, vec![(OutcomeClass::Success, 1.0)]);
    }

    #[test]
    fn frequencies_sorted_descending_with_success_on_tie() {
        let ds = dataset();
        let site = SiteSelection::Site("KSC LC-39A".into());
        let freqs = outcome_frequencies(records_for_site(&ds, &site));
        assert_eq!(
            freqs,
            vec![(OutcomeClass::Success, 0.5), (OutcomeClass::Failure, 0.5)]
        );

        let all = outcome_frequencies(ds.records());
        assert_eq!(all[0], (OutcomeClass::Success, 0.6));
        assert_eq!(all[1].0, OutcomeClass::Failure);
    }

    #[test]
    fn frequencies_of_nothing_is_empty() {
        assert!(outcome_frequencies(std::iter::empty::<&LaunchRecord>()).is_empty());
    }
}
