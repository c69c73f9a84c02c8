//! End-to-end matching scenarios.

use regcheck_ingest::column_index;
use regcheck_match::{MatchEngine, MatchError};
use regcheck_model::{
    CellValue, CustomerRow, MatchConfig, MatchOutput, RegistryMatrix, Thresholds, Tier,
};

fn customer(id: &str, name: &str, street: &str, city: &str, postal: &str) -> CustomerRow {
    [
        ("Customer", id),
        ("Name", name),
        ("STREET", street),
        ("CITY", city),
        ("PostalCode", postal),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), CellValue::text(v)))
    .collect()
}

fn sheet_row(cells: &[(&str, &str)]) -> Vec<CellValue> {
    let mut row = vec![CellValue::Empty; 29];
    for (letter, value) in cells {
        row[column_index(letter).unwrap()] = CellValue::text(*value);
    }
    row
}

fn registry(name: &str, body: Vec<Vec<CellValue>>) -> RegistryMatrix {
    let mut rows = vec![
        vec![CellValue::text("Registro de centros sanitarios")],
        sheet_row(&[
            ("C", "Código centro"),
            ("E", "Nombre"),
            ("K", "Municipio"),
            ("M", "Vía"),
            ("N", "Número"),
            ("O", "Código postal"),
        ]),
    ];
    rows.extend(body);
    RegistryMatrix::new(name, rows)
}

fn virgen_del_puerto() -> Vec<CellValue> {
    sheet_row(&[
        ("C", "100123"),
        ("E", "HOSPITAL VIRGEN DEL PUERTO"),
        ("K", "PLASENCIA"),
        ("M", "CL VALCORCHERO"),
        ("N", "2"),
        ("O", "10600"),
    ])
}

fn sonrisas() -> Vec<CellValue> {
    sheet_row(&[
        ("C", "100999"),
        ("E", "CLINICA DENTAL SONRISAS"),
        ("K", "PLASENCIA"),
        ("M", "AVENIDA DE LA VERA"),
        ("N", "15"),
        ("O", "10600"),
    ])
}

fn hospital_customer() -> CustomerRow {
    customer(
        "C1",
        "Hospital Virgen del Puerto",
        "Valcorchero 2",
        "Plasencia",
        "10600",
    )
}

fn run(customers: &[CustomerRow], sources: &[RegistryMatrix]) -> MatchOutput {
    MatchEngine::new(MatchConfig::default())
        .unwrap()
        .run(customers, sources)
        .unwrap()
}

#[test]
fn near_identical_registry_row_is_alta() {
    let output = run(
        &[hospital_customer()],
        &[registry("extremadura", vec![virgen_del_puerto()])],
    );
    assert_eq!(output.matches.len(), 1);
    let record = &output.matches[0];
    assert_eq!(record.tier, Tier::Alta);
    assert!(record.score >= 0.85);
    assert_eq!(record.min_source.as_deref(), Some("extremadura"));
    assert_eq!(record.min_name.as_deref(), Some("HOSPITAL VIRGEN DEL PUERTO"));
    assert_eq!(record.min_center_code.as_deref(), Some("100123"));
    assert_eq!(record.house_number.as_deref(), Some("2"));
}

#[test]
fn postal_code_alone_is_never_alta() {
    let output = run(
        &[hospital_customer()],
        &[registry("extremadura", vec![sonrisas()])],
    );
    let record = &output.matches[0];
    assert_ne!(record.tier, Tier::Alta);
    assert_eq!(record.tier, Tier::Sin);
    assert_eq!(record.score, 0.5167);
    assert_eq!(record.min_name.as_deref(), Some("CLINICA DENTAL SONRISAS"));
}

#[test]
fn blank_body_yields_sentinels() {
    let blank = registry("vacia", vec![vec![CellValue::Empty; 29], vec![]]);
    let customers = [
        hospital_customer(),
        customer("C2", "Farmacia López", "Calle Mayor 5", "Lugo", "27001"),
    ];
    let output = run(&customers, &[blank]);
    assert_eq!(output.matches.len(), 2);
    for record in &output.matches {
        assert_eq!(record.score, 0.0);
        assert_eq!(record.tier, Tier::Sin);
        assert_eq!(record.source, "vacia");
        assert!(!record.has_match());
        assert_eq!(record.min_name, None);
        assert_eq!(record.min_postal_code, None);
    }
    assert!(output.top3.is_empty());
}

#[test]
fn one_record_per_customer_and_source() {
    let customers = [
        hospital_customer(),
        customer("C2", "Farmacia López", "Calle Mayor 5", "Lugo", "27001"),
        customer("C3", "Centro de Salud Norte", "", "", ""),
    ];
    let sources = [
        registry("extremadura", vec![virgen_del_puerto(), sonrisas()]),
        registry("vacia", vec![vec![]]),
        RegistryMatrix::new("sin-filas", Vec::new()),
    ];
    let output = run(&customers, &sources);
    // The row-less source is skipped entirely.
    assert_eq!(output.matches.len(), customers.len() * 2);
    for id in ["C1", "C2", "C3"] {
        for source in ["extremadura", "vacia"] {
            let count = output
                .matches
                .iter()
                .filter(|m| m.customer_id.as_deref() == Some(id) && m.source == source)
                .count();
            assert_eq!(count, 1, "{id} / {source}");
        }
    }
}

#[test]
fn top_candidates_are_ranked_and_rank_one_is_best() {
    let output = run(
        &[hospital_customer()],
        &[registry("extremadura", vec![sonrisas(), virgen_del_puerto()])],
    );
    let best = &output.matches[0];
    let shortlist: Vec<_> = output.top3_for(Some("C1"), "extremadura").collect();
    assert_eq!(shortlist.len(), 2);
    assert_eq!(shortlist[0].rank, 1);
    assert_eq!(shortlist[1].rank, 2);
    assert!(shortlist[0].score >= shortlist[1].score);
    assert_eq!(shortlist[0].score, best.score);
    assert_eq!(shortlist[0].candidate_name, best.min_name);
    assert_eq!(shortlist[0].candidate_center_code, best.min_center_code);
}

#[test]
fn shortlist_is_capped_at_three() {
    let body = (0..5)
        .map(|i| {
            let name = format!("CENTRO MEDICO {i}");
            sheet_row(&[
                ("E", name.as_str()),
                ("K", "PLASENCIA"),
                ("O", "10600"),
            ])
        })
        .collect();
    let output = run(&[hospital_customer()], &[registry("extremadura", body)]);
    let ranks: Vec<u8> = output.top3.iter().map(|c| c.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn matches_are_sorted_by_customer_then_score() {
    let customers = [
        customer("C2", "Farmacia López", "Calle Mayor 5", "Lugo", "27001"),
        hospital_customer(),
    ];
    let sources = [
        registry("vacia", vec![vec![]]),
        registry("extremadura", vec![virgen_del_puerto()]),
    ];
    let output = run(&customers, &sources);
    let order: Vec<(&str, &str)> = output
        .matches
        .iter()
        .map(|m| (m.customer_id.as_deref().unwrap_or_default(), m.source.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("C1", "extremadura"),
            ("C1", "vacia"),
            ("C2", "vacia"),
            ("C2", "extremadura"),
        ]
    );
}

#[test]
fn summary_counts_customers_and_tiers() {
    let customers = [
        hospital_customer(),
        customer("C2", "Farmacia López", "Calle Mayor 5", "Lugo", "27001"),
    ];
    let sources = [
        registry("extremadura", vec![virgen_del_puerto(), sonrisas()]),
        registry("vacia", vec![vec![CellValue::Empty]]),
    ];
    let output = run(&customers, &sources);
    insta::assert_json_snapshot!(output.summary, @r#"
    {
      "customers": 2,
      "records": 4,
      "tiers": {
        "alta": 1,
        "revisar": 0,
        "sin": 3
      },
      "thresholds": {
        "alta": 0.85,
        "baja": 0.65
      }
    }
    "#);
}

#[test]
fn missing_customer_column_aborts_the_run() {
    let mut row = hospital_customer();
    row.remove("CITY");
    let err = MatchEngine::new(MatchConfig::default())
        .unwrap()
        .run(&[row], &[registry("extremadura", vec![virgen_del_puerto()])])
        .unwrap_err();
    assert!(matches!(err, MatchError::Ingest(_)));
    let message = err.to_string();
    assert!(message.contains("'CITY'"), "{message}");
    assert!(message.contains("PostalCode"), "{message}");
}

#[test]
fn empty_customer_set_gives_empty_output() {
    let output = run(&[], &[registry("extremadura", vec![virgen_del_puerto()])]);
    assert!(output.matches.is_empty());
    assert_eq!(output.summary.customers, 0);
}

#[test]
fn lower_thresholds_promote_review() {
    let config = MatchConfig::default().with_thresholds(Thresholds::new(0.9, 0.5).unwrap());
    let output = MatchEngine::new(config)
        .unwrap()
        .run(
            &[hospital_customer()],
            &[registry("extremadura", vec![sonrisas()])],
        )
        .unwrap();
    assert_eq!(output.matches[0].tier, Tier::Revisar);
    assert_eq!(output.summary.thresholds.baja, 0.5);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = MatchConfig::default();
    config.thresholds = Thresholds {
        alta: 0.5,
        baja: 0.7,
    };
    assert!(matches!(
        MatchEngine::new(config),
        Err(MatchError::Config(_))
    ));
}
