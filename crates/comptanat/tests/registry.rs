//! Integration tests for the variable registry and definitions.

use comptanat::resolver::compute_suggestions;
use comptanat::{FieldValue, VariableDef, VariableRegistry};

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn iteration_follows_insertion_order() {
    let mut registry = VariableRegistry::new();
    registry.insert("C", VariableDef::new().code("D43"));
    registry.insert("A", VariableDef::new().code("D41"));
    registry.insert("B", VariableDef::new().code("D42"));

    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[test]
fn replacing_a_definition_keeps_its_position() {
    let mut registry = VariableRegistry::new();
    registry.insert("A", VariableDef::new().code("D41"));
    registry.insert("B", VariableDef::new().code("D42"));
    registry.insert("A", VariableDef::new().code("D44"));

    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get("A"), Some(&VariableDef::new().code("D44")));
}

#[test]
fn collects_from_pairs() {
    let registry: VariableRegistry = [
        ("X".to_string(), VariableDef::new().code("D41")),
        ("Y".to_string(), VariableDef::new().code("D42")),
    ]
    .into_iter()
    .collect();
    assert!(registry.contains("X"));
    assert!(registry.contains("Y"));
}

// =============================================================================
// Serde
// =============================================================================

#[test]
fn deserializes_the_original_registry_layout() {
    let json = r#"{
        "Interets_verses_par_rdm": {
            "code": "D41",
            "institution": "S2",
            "ressources": false,
            "year": null,
            "description": "",
            "drop": true
        },
        "Interets_dividendes_verses_par_rdm": {
            "code": null,
            "institution": "S2",
            "ressources": false,
            "description": "Interets et dividendes verses par RDM",
            "formula": "Interets_verses_par_rdm + Dividendes_verses_par_rdm"
        }
    }"#;

    let registry: VariableRegistry = serde_json::from_str(json).unwrap();
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(
        names,
        vec![
            "Interets_verses_par_rdm",
            "Interets_dividendes_verses_par_rdm"
        ]
    );

    let direct = registry.get("Interets_verses_par_rdm").unwrap();
    assert!(direct.drop);
    assert!(direct.formula.is_none());
    let constraints: Vec<(&str, Option<&FieldValue>)> = direct.constraints().collect();
    assert!(constraints.contains(&("code", Some(&FieldValue::Text("D41".to_string())))));
    assert!(constraints.contains(&("ressources", Some(&FieldValue::Flag(false)))));
    assert!(constraints.contains(&("year", None)));

    let derived = registry.get("Interets_dividendes_verses_par_rdm").unwrap();
    assert_eq!(
        derived.formula.as_deref(),
        Some("Interets_verses_par_rdm + Dividendes_verses_par_rdm")
    );
    assert!(!derived.drop);
}

#[test]
fn serde_round_trip_preserves_order_and_definitions() {
    let mut registry = VariableRegistry::new();
    registry.insert("Zeta", VariableDef::new().code("D42"));
    registry.insert("Alpha", VariableDef::new().formula("Zeta / 2"));

    let json = serde_json::to_string(&registry).unwrap();
    let back: VariableRegistry = serde_json::from_str(&json).unwrap();

    assert_eq!(
        back.names().collect::<Vec<_>>(),
        registry.names().collect::<Vec<_>>()
    );
    assert_eq!(back.get("Zeta"), registry.get("Zeta"));
    assert_eq!(back.get("Alpha"), registry.get("Alpha"));
}

#[test]
fn chained_constructors_match_deserialized_definitions() {
    let json = r#"{"code": "D41", "institution": "S2", "ressources": false}"#;
    let from_json: VariableDef = serde_json::from_str(json).unwrap();
    let built = VariableDef::new()
        .code("D41")
        .institution("S2")
        .ressources(false);
    assert_eq!(from_json, built);
}

// =============================================================================
// Suggestions
// =============================================================================

#[test]
fn suggestions_rank_close_names_first() {
    let candidates = ["Interets_verses_par_rdm", "Dividendes_verses_par_rdm"];
    let suggestions = compute_suggestions("Interets_verse_par_rdm", candidates);
    assert_eq!(
        suggestions.first().map(String::as_str),
        Some("Interets_verses_par_rdm")
    );
}

#[test]
fn suggestions_ignore_distant_names() {
    let candidates = ["Produit_interieur_brut"];
    let suggestions = compute_suggestions("X", candidates);
    assert!(suggestions.is_empty());
}
