// core/tests/test_csv_fixture.rs
// Leser eksportformatet (samme kolonner som den genererte tabellen) og sjekker label per rad.
use wearable_risk_core::{label_batch, RawRecord, RiskLabel, ThresholdConfig};

fn read_fixture() -> (Vec<RawRecord>, Vec<String>) {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/labeled_records.csv");
    let mut rdr = csv::Reader::from_path(path).expect("open fixture");
    let headers = rdr.headers().expect("headers").clone();
    let label_idx = headers.iter().position(|h| h == "risk_label").expect("risk_label column");

    let mut records = Vec::new();
    let mut expected = Vec::new();
    for row in rdr.records() {
        let row = row.expect("csv row");
        let raw: RawRecord = row.deserialize(Some(&headers)).expect("deserialize row");
        records.push(raw);
        expected.push(row[label_idx].to_string());
    }
    (records, expected)
}

#[test]
fn fixture_labels_match() {
    let (records, expected) = read_fixture();
    assert_eq!(records.len(), 9);

    let report = label_batch(&records, &ThresholdConfig::default(), None);
    assert!(report.rejected.is_empty(), "rejected: {:?}", report.rejected);

    for (row, want) in report.rows.iter().zip(expected.iter()) {
        assert_eq!(
            row.risk_label.as_str(),
            want,
            "user_id={:?} score={} breakdown={:?}",
            row.user_id,
            row.score,
            row.breakdown
        );
    }
}

#[test]
fn fixture_empty_and_nan_cells_are_missing() {
    let (records, _) = read_fixture();

    let user5 = &records[4];
    assert_eq!(user5.spo2_pct, None);
    assert_eq!(user5.bp_systolic, None);
    assert_eq!(user5.past_incident_flag, 0);

    let report = label_batch(&records, &ThresholdConfig::default(), None);
    let user9 = &report.rows[8];
    assert_eq!(user9.breakdown.hr, 0);
    assert_eq!(user9.breakdown.skin_temp, 2);
    assert_eq!(user9.risk_label, RiskLabel::Low);
}

#[test]
fn fixture_distribution() {
    let (records, _) = read_fixture();
    let report = label_batch(&records, &ThresholdConfig::default(), None);
    assert_eq!(report.count(RiskLabel::Low), 4);
    assert_eq!(report.count(RiskLabel::Moderate), 2);
    assert_eq!(report.count(RiskLabel::High), 2);
    assert_eq!(report.count(RiskLabel::Critical), 1);
}
