use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::model::{DatasetError, LaunchDataset, LaunchRecord, OutcomeClass};

/// Columns the dashboard reads. Any other column in the file is ignored.
pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_CATEGORY_COLUMN: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [
    SITE_COLUMN,
    PAYLOAD_COLUMN,
    CLASS_COLUMN,
    BOOSTER_CATEGORY_COLUMN,
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the launch records CSV at `path`.
pub fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let file = File::open(path)
        .with_context(|| format!("opening launch records {}", path.display()))?;
    let dataset =
        load_csv_reader(file).with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} ({} sites, payload {}..={} kg)",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );
    Ok(dataset)
}

/// Parse launch records from any CSV source with a header row.
pub fn load_csv_reader<R: Read>(source: R) -> Result<LaunchDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DatasetError::MissingColumn(required.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let row_no = i + 1;
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let outcome = OutcomeClass::from_value(raw.class).ok_or(DatasetError::InvalidClass {
            row: row_no,
            value: raw.class,
        })?;

        let record = LaunchRecord::new(raw.site, raw.payload_kg, raw.booster_category, outcome);
        log::debug!("row {row_no}: {record:?}");
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// Row schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_kg: f64,
    // Read as a number so `1.0` exports are accepted.
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
2,3,CCAFS LC-40,1,525.0,F9 v1.0  B0005,v1.0
3,7,VAFB SLC-4E,0,500.0,F9 v1.1  B1003,v1.1
4,20,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    #[test]
    fn reads_required_columns_and_ignores_the_rest() {
        let ds = load_csv_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.booster_categories(), ["v1.0", "v1.1", "FT"]);
        assert_eq!(ds.payload_bounds(), (0.0, 2490.0));

        let last = &ds.records()[4];
        assert_eq!(last.site, "KSC LC-39A");
        assert_eq!(last.payload_kg, 2490.0);
        assert_eq!(last.outcome, OutcomeClass::Success);
    }

    #[test]
    fn float_class_values_are_accepted() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,10,1.0,FT\nA,20,0.0,FT\n";
        let ds = load_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].outcome, OutcomeClass::Success);
        assert_eq!(ds.records()[1].outcome, OutcomeClass::Failure);
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category\nA,10,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingColumn("class".to_string()))
        );
    }

    #[test]
    fn invalid_class_reports_row() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,10,1,FT\nA,20,2,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::InvalidClass { row: 2, value: 2.0 })
        );
    }

    #[test]
    fn unparsable_payload_is_fatal() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,heavy,1,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"), "{err:#}");
    }

    #[test]
    fn negative_payload_is_fatal() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,-5,1,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::InvalidPayload { row: 1, .. })
        ));
    }

    #[test]
    fn header_only_file_is_fatal() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert_eq!(err.downcast_ref::<DatasetError>(), Some(&DatasetError::Empty));
    }

    #[test]
    fn load_csv_reads_a_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn missing_file_is_fatal_with_path_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let err = load_csv(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing.csv"), "{err:#}");
    }
}
