use std::fs;

use regcheck_model::{
    CustomerRecord, MatchKeys, MatchOutput, MatchRecord, RegistryCandidate, Summary, Thresholds,
    Tier, TierCounts, TopCandidate,
};
use regcheck_report::{ReportFormat, write_reports};

fn customer() -> CustomerRecord {
    CustomerRecord {
        row_index: 0,
        customer_id: Some("C1".to_string()),
        display_name: "Hospital Virgen del Puerto".to_string(),
        street: "Valcorchero 2".to_string(),
        city: "Plasencia".to_string(),
        postal_raw: "10600".to_string(),
        keys: MatchKeys {
            house_number: Some("2".to_string()),
            ..MatchKeys::default()
        },
    }
}

fn candidate() -> RegistryCandidate {
    RegistryCandidate {
        source_name: "extremadura".to_string(),
        body_index: 0,
        name: Some("HOSPITAL VIRGEN DEL PUERTO".to_string()),
        via: Some("CL VALCORCHERO".to_string()),
        number: Some("2".to_string()),
        municipality: Some("PLASENCIA".to_string()),
        center_code: Some("100123".to_string()),
        last_authorization_date: Some("2021-01-01".to_string()),
        service_offering: None,
        keys: MatchKeys {
            postal_code: Some("10600".to_string()),
            ..MatchKeys::default()
        },
    }
}

fn output() -> MatchOutput {
    let customer = customer();
    let candidate = candidate();
    let matches = vec![
        MatchRecord::matched(&customer, &candidate, 0.987_654, Tier::Alta),
        MatchRecord::no_candidate(&customer, "vacia"),
    ];
    let top3 = vec![TopCandidate::new(&customer, &candidate, 1, 0.987_654)];
    let mut tiers = TierCounts::default();
    tiers.add(Tier::Alta);
    tiers.add(Tier::Sin);
    MatchOutput {
        matches,
        top3,
        summary: Summary {
            customers: 1,
            records: 2,
            tiers,
            thresholds: Thresholds::default(),
        },
    }
}

#[test]
fn writes_all_reports() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out_dir = dir.path().join("out");
    let paths = write_reports(&out_dir, &output(), ReportFormat::Both).expect("write reports");
    assert_eq!(paths.all().count(), 3);

    let matches = fs::read_to_string(paths.matches_csv.as_ref().unwrap()).unwrap();
    let mut lines = matches.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("CUSTOMER_ID,NAME,STREET,CITY,POSTAL_CODE,NUMBER,SOURCE,MIN_source"));
    assert!(header.ends_with("SCORE,TIER"));
    let best = lines.next().unwrap();
    assert!(best.contains("extremadura"));
    assert!(best.ends_with("0.9877,ALTA"));
    let sentinel = lines.next().unwrap();
    assert!(sentinel.contains(",vacia,,"));
    assert!(sentinel.ends_with("SIN"));

    let top3 = fs::read_to_string(paths.top3_csv.as_ref().unwrap()).unwrap();
    assert!(top3.starts_with("CUSTOMER_ID,NAME,SOURCE,CAND_RANK,CAND_SCORE,CAND_name"));
    assert!(top3.contains("C1,Hospital Virgen del Puerto,extremadura,1,0.9877"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(paths.json.as_ref().unwrap()).unwrap()).unwrap();
    assert_eq!(json["summary"]["tiers"]["sin"], 1);
    assert_eq!(json["matches"][1]["MIN_name"], serde_json::Value::Null);
    assert_eq!(json["matches"][0]["TIER"], "ALTA");
}

#[test]
fn json_only_skips_csv() {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = write_reports(dir.path(), &output(), ReportFormat::Json).expect("write reports");
    assert!(paths.json.is_some());
    assert!(paths.matches_csv.is_none());
    assert!(!dir.path().join("matches.csv").exists());
}
