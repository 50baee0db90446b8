//! Integration tests for the row filter.

use comptanat::resolver::{FilterError, filter_many, filter_rows};
use comptanat::{Table, VariableDef, table};

fn sample_table() -> Table {
    table![
        ("D41", "S2", false, 1999, "Interets verses par RDM", 10.0),
        ("D41", "S2", false, 2000, "Interets verses par RDM", 12.0),
        ("D42", "S2", false, 1999, "Dividendes verses par RDM", 5.0),
        ("D42", "S2", false, 2000, "Dividendes verses par RDM", 6.0),
        ("D41", "S2", true, 1999, "Interets verses au RDM", 4.0),
        ("B1g/PIB", "S1", false, 1999, "Produit interieur brut", 100.0),
    ]
}

// =============================================================================
// Year narrowing and equality constraints
// =============================================================================

#[test]
fn narrows_to_requested_years() {
    let table = sample_table();
    let def = VariableDef::new().code("D41").ressources(false);

    let one_year = filter_rows(&table, &def, &(1999..=1999)).unwrap();
    assert_eq!(one_year.len(), 1);
    assert_eq!(one_year.records()[0].value, 10.0);

    let both_years = filter_rows(&table, &def, &(1999..=2000)).unwrap();
    assert_eq!(both_years.len(), 2);
}

#[test]
fn matches_every_constrained_field() {
    let table = sample_table();
    let def = VariableDef::new().institution("S1").ressources(false);
    let result = filter_rows(&table, &def, &(1999..=2000)).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.records()[0].code, "B1g/PIB");
}

#[test]
fn description_matches_by_substring() {
    let table = sample_table();
    let def = VariableDef::new().description("Dividendes");
    let result = filter_rows(&table, &def, &(1999..=2000)).unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|r| r.code == "D42"));
}

#[test]
fn empty_description_matches_everything() {
    let table = sample_table();
    let def = VariableDef::new().description("");
    let result = filter_rows(&table, &def, &(1999..=2000)).unwrap();
    assert_eq!(result.len(), table.len());
}

#[test]
fn none_constraint_is_skipped() {
    let table = sample_table();
    let def = VariableDef::new().code("D42").unconstrained("institution");
    let result = filter_rows(&table, &def, &(1999..=2000)).unwrap();
    assert_eq!(result.len(), 2);
}

#[test]
fn integer_shaped_constraint_matches_float_column() {
    let table = sample_table();
    // An integer deserializes as a year-shaped value; the filter must still
    // match it against the float `value` column.
    let def: VariableDef = serde_json::from_str(r#"{"code": "D41", "value": 10}"#).unwrap();
    let result = filter_rows(&table, &def, &(1999..=1999)).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.records()[0].value, 10.0);
}

#[test]
fn preserves_duplicate_rows() {
    let table = table![
        ("D41", "S2", false, 1999, "Interets", 10.0),
        ("D41", "S2", false, 1999, "Interets", 10.0),
    ];
    let def = VariableDef::new().code("D41");
    let result = filter_rows(&table, &def, &(1999..=1999)).unwrap();
    assert_eq!(result.len(), 2);
}

// =============================================================================
// Formula-bearing constraint sets
// =============================================================================

#[test]
fn formula_forces_empty_result() {
    let table = sample_table();
    let def = VariableDef::new().code("D41").formula("A + B");
    let result = filter_rows(&table, &def, &(1999..=2000)).unwrap();
    assert!(result.is_empty());
}

// =============================================================================
// Schema errors and short-circuiting
// =============================================================================

#[test]
fn unknown_column_is_an_error() {
    let table = sample_table();
    let def = VariableDef::new().constraint("quarter", 1);
    let err = filter_rows(&table, &def, &(1999..=2000)).unwrap_err();
    assert_eq!(
        err,
        FilterError::UnknownColumn {
            column: "quarter".to_string()
        }
    );
}

#[test]
fn short_circuit_skips_constraints_after_empty() {
    let table = sample_table();
    // "code" sorts before "quarter"; the failed code match empties the
    // subset, so the unknown column is never reached.
    let def = VariableDef::new().code("ZZZ").constraint("quarter", 1);
    let result = filter_rows(&table, &def, &(1999..=2000)).unwrap();
    assert!(result.is_empty());
}

// =============================================================================
// filter_many
// =============================================================================

#[test]
fn filter_many_unions_and_dedups() {
    let table = sample_table();
    let defs = vec![
        VariableDef::new().code("D41").ressources(false),
        VariableDef::new().description("Interets"),
    ];
    // Both defs match the (D41, false, 1999) row; it appears once.
    let result = filter_many(&table, &defs, &(1999..=1999)).unwrap();
    assert_eq!(result.len(), 2);
    let values: Vec<f64> = result.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![10.0, 4.0]);
}

#[test]
fn filter_many_is_dedup_idempotent() {
    let table = sample_table();
    let def = VariableDef::new().code("D42");
    let once = filter_many(&table, &[def.clone()], &(1999..=2000)).unwrap();
    let twice = filter_many(&table, &[def.clone(), def], &(1999..=2000)).unwrap();
    assert_eq!(once, twice);
}
