use omniform_mapping::{
    Mapping, MappingError, RowData, apply_mapping, generate_mapping, validate_mapping,
    validate_pairs,
};
use serde_json::json;

#[test]
fn test_generate_mapping_zips_by_position() {
    let mapping = generate_mapping(&["#a", "#b"], &["Name", "Email"]).unwrap();

    assert_eq!(
        serde_json::to_value(&mapping).unwrap(),
        json!({"#a": "Name", "#b": "Email"})
    );
    assert!(validate_mapping(&mapping));
}

#[test]
fn test_generate_mapping_length_mismatch() {
    let result = generate_mapping(&["#a", "#b"], &["Name"]);

    assert_eq!(
        result,
        Err(MappingError::LengthMismatch {
            selectors: 2,
            columns: 1
        })
    );
}

#[test]
fn test_generate_mapping_empty_inputs() {
    let selectors: [&str; 0] = [];
    let mapping = generate_mapping(&selectors, &selectors).unwrap();

    assert!(mapping.is_empty());
    assert!(!validate_mapping(&mapping));
}

#[test]
fn test_validate_rejects_blank_entries() {
    let blank_value = Mapping::from_pairs([("#a", "")]).unwrap();
    let whitespace_key = Mapping::from_pairs([("   ", "Name")]).unwrap();

    assert!(!validate_mapping(&blank_value));
    assert!(!validate_mapping(&whitespace_key));
    assert!(!validate_mapping(&Mapping::new()));
}

#[test]
fn test_validate_rejects_duplicate_pairs() {
    assert!(!validate_pairs(&[("#a", "Name"), ("#a", "Name")]));
    assert!(validate_pairs(&[("#a", "Name"), ("#b", "Name")]));
    assert!(!validate_pairs::<&str, &str>(&[]));
}

#[test]
fn test_apply_mapping_skips_missing_columns() {
    let mapping = Mapping::from_pairs([
        ("#name", "Name"),
        ("#subscribe", "Subscribe"),
        ("#phone", "Phone"),
    ])
    .unwrap();
    let row: RowData = serde_json::from_value(json!({
        "Name": "Ada",
        "Subscribe": true,
        "Unused": 3
    }))
    .unwrap();

    let values = apply_mapping(&mapping, &row);

    assert_eq!(
        serde_json::Value::Object(values),
        json!({"#name": "Ada", "#subscribe": true})
    );
}
