use proptest::prelude::*;
use regcheck_model::TextRules;
use regcheck_normalize::TextNormalizer;

fn normalizer() -> TextNormalizer {
    TextNormalizer::new(&TextRules::default()).expect("default rules")
}

/// Address-like text: Spanish letters, digits, the punctuation that shows
/// up in registry exports, and connector characters glued to abbreviations.
fn arb_address() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-zA-ZáéíóúüñÁÉÍÓÚÜÑ0-9 .,/ºª_\u{200D}-]{0,40}",
        1 => r"(C/|Av\.|Avda|Ctra\.|Hosp\.|S\. |S\.|Pza|Sta\.|Dr\.) ?[A-Za-z ]{0,20} ?[0-9]{0,4}",
        1 => r"(Hosp|Av|Ctra|Cl|[A-Za-z_]{1,6})_[A-Za-z]{1,10}",
    ]
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in arb_address()) {
        let n = normalizer();
        let once = n.normalize(&text);
        prop_assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn normalized_text_is_upper_alnum_and_single_spaced(text in arb_address()) {
        let out = normalizer().normalize(&text);
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(!out.contains("  "));
        prop_assert!(out.chars().all(|ch| ch == ' ' || ch.is_alphanumeric()));
    }

    #[test]
    fn street_core_never_contains_via_words(text in arb_address()) {
        let n = normalizer();
        let core = n.street_core(&text);
        for token in core.split(' ') {
            prop_assert!(!["CALLE", "AVENIDA", "PLAZA", "CARRETERA", "PASEO"].contains(&token));
        }
    }
}

#[test]
fn accented_abbreviation_equals_expanded_form() {
    let n = normalizer();
    assert_eq!(n.normalize("Av. Príncipe"), n.normalize("AVENIDA PRINCIPE"));
}

#[test]
fn underscore_joined_abbreviation_equals_dotted_form() {
    let n = normalizer();
    assert_eq!(n.normalize("Hosp_Central"), "HOSPITAL CENTRAL");
    assert_eq!(n.normalize("Av_Principe"), n.normalize("Av. Principe"));
}

#[test]
fn glued_abbreviations_are_stable_under_renormalization() {
    let n = normalizer();
    for input in ["S.Av2", "S.S.Juan", "Avda.Principe", "S.A.", "Hosp\u{200C}Central", "C/Mayor_5"] {
        let once = n.normalize(input);
        assert_eq!(n.normalize(&once), once, "{input:?}");
    }
}

#[test]
fn catalan_and_spanish_accents_fold() {
    let n = normalizer();
    assert_eq!(n.normalize("Plaça Catalunya"), "PLACA CATALUNYA");
    assert_eq!(n.normalize("Lleó"), "LLEO");
}
