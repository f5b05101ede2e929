use omniform::CommandError;
use omniform::commands::{
    apply_mapping_to_row, auto_map_selectors, generate, load_mapping, ranked_selectors,
    read_headers_file, repository, save_mapping_file, scan_markup,
};
use omniform_mapping::AutoMapOptions;
use omniform_scanner::{RegistryView, ScanOptions};
use serde_json::json;
use tempfile::TempDir;

const SIGNUP_FORM: &str = r#"<html><body>
<form>
  <input id="firstName">
  <input id="lastName">
  <input name="email" type="email">
  <button type="submit">Sign up</button>
</form>
</body></html>"#;

#[test]
fn test_scan_then_auto_map() {
    let view = scan_markup(SIGNUP_FORM, &ScanOptions::default());
    let selectors = ranked_selectors(&view);
    let headers = vec![
        "Email".to_string(),
        "Last Name".to_string(),
        "First Name".to_string(),
    ];

    let mapping = auto_map_selectors(&selectors, &headers, &AutoMapOptions::default());

    assert_eq!(mapping.get("#firstName"), Some("First Name"));
    assert_eq!(mapping.get("#lastName"), Some("Last Name"));
    assert_eq!(mapping.get("[name=\"email\"]"), Some("Email"));
    assert_eq!(mapping.get("button"), None);
}

#[test]
fn test_scan_view_round_trips_through_json() {
    let view = scan_markup(SIGNUP_FORM, &ScanOptions::default());

    let json = serde_json::to_string(&view).unwrap();
    let parsed: RegistryView = serde_json::from_str(&json).unwrap();

    assert_eq!(ranked_selectors(&parsed), ranked_selectors(&view));
    assert_eq!(parsed.len(), 4);
}

#[test]
fn test_generate_length_mismatch() {
    let result = generate(&["#a".into()], &[]);

    assert!(matches!(result, Err(CommandError::Mapping(_))));
}

#[tokio::test]
async fn test_headers_file() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("people.csv");
    std::fs::write(&csv, "First Name,\"Last, Family Name\"\nAda,Lovelace\n").unwrap();
    let empty = dir.path().join("empty.csv");
    std::fs::write(&empty, "\n").unwrap();

    assert_eq!(
        read_headers_file(&csv).await.unwrap(),
        vec!["First Name", "Last, Family Name"]
    );
    assert!(matches!(
        read_headers_file(&empty).await,
        Err(CommandError::NoHeaders(_))
    ));
}

#[tokio::test]
async fn test_save_load_and_apply() {
    let dir = TempDir::new().unwrap();
    let repo = repository(&dir.path().join("store"));

    let mapping_file = dir.path().join("mapping.json");
    std::fs::write(&mapping_file, r##"{"#first": "First Name", "#opt": "Newsletter"}"##).unwrap();
    let row_file = dir.path().join("row.json");
    std::fs::write(&row_file, r#"{"First Name": "Ada", "Newsletter": false}"#).unwrap();

    let saved = save_mapping_file(&repo, "signup", &mapping_file).await.unwrap();
    assert_eq!(load_mapping(&repo, "signup").await.unwrap(), saved);

    let values = apply_mapping_to_row(&repo, "signup", &row_file).await.unwrap();
    assert_eq!(
        serde_json::Value::Object(values),
        json!({"#first": "Ada", "#opt": false})
    );
}

#[tokio::test]
async fn test_save_rejects_invalid_files() {
    let dir = TempDir::new().unwrap();
    let repo = repository(&dir.path().join("store"));

    let duplicate = dir.path().join("duplicate.json");
    std::fs::write(&duplicate, r##"{"#a": "Name", "#a": "Name"}"##).unwrap();
    let blank = dir.path().join("blank.json");
    std::fs::write(&blank, r##"{"#a": "  "}"##).unwrap();

    assert!(matches!(
        save_mapping_file(&repo, "dup", &duplicate).await,
        Err(CommandError::Parse { .. })
    ));
    assert!(matches!(
        save_mapping_file(&repo, "blank", &blank).await,
        Err(CommandError::Persistence(_))
    ));
    assert!(matches!(
        load_mapping(&repo, "blank").await,
        Err(CommandError::MappingNotFound(_))
    ));
}
