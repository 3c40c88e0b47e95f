use wearable_risk_core::cli::render_report;
use wearable_risk_core::{label_batch, RawRecord, ThresholdConfig};

#[test]
fn test_render_report() {
    let raw = vec![
        RawRecord {
            user_id: Some(1),
            altitude: 100.0,
            steps: 1500,
            past_incident_flag: 1,
            weather_condition: "Storm".into(),
            ..Default::default()
        },
        RawRecord {
            user_id: Some(2),
            altitude: 100.0,
            steps: 5000,
            weather_condition: "Sleet".into(),
            ..Default::default()
        },
    ];
    let report = label_batch(&raw, &ThresholdConfig::default(), None);
    let text = render_report(&report);

    assert!(text.starts_with("--- Risk Report"));
    assert!(text.contains("MODERATE        1 ( 50.0%)"), "got:\n{text}");
    assert!(text.contains("CRITICAL        0 (  0.0%)"), "got:\n{text}");
    assert!(text.contains("Rejected: 1"));
    assert!(text.contains("row 1: unknown weather_condition \"Sleet\""));
    assert!(text.ends_with("Total: 2"));
}
