use omniform_mapping::{AutoMapOptions, Scorer, auto_map};

#[test]
fn test_camel_case_selector_matches_header() {
    let mapping = auto_map(
        &["#firstName"],
        &["First Name", "Last Name"],
        &AutoMapOptions::default().with_threshold(0.1),
    );

    assert_eq!(mapping.get("#firstName"), Some("First Name"));
    assert_eq!(mapping.len(), 1);
    assert!(!mapping.contains_column("Last Name"));
}

#[test]
fn test_headers_are_used_once() {
    // Both selectors prefer "Email"; the first one takes it.
    let mapping = auto_map(
        &["#email", "[name=\"email\"]"],
        &["Email", "Email Confirmation"],
        &AutoMapOptions::default(),
    );

    assert_eq!(mapping.get("#email"), Some("Email"));
    assert_eq!(mapping.get("[name=\"email\"]"), Some("Email Confirmation"));
}

#[test]
fn test_threshold_drops_weak_matches() {
    let selectors = ["#billingStreetAddress"];
    let headers = ["Street"];

    // Jaccard {billing, street, address} vs {street} = 1/3.
    let loose = auto_map(&selectors, &headers, &AutoMapOptions::default());
    assert_eq!(loose.get("#billingStreetAddress"), Some("Street"));

    let strict = auto_map(
        &selectors,
        &headers,
        &AutoMapOptions::default().with_threshold(0.5),
    );
    assert!(strict.is_empty());
}

#[test]
fn test_unrelated_names_stay_unmapped() {
    let mapping = auto_map(
        &["#zip", "#phone"],
        &["Company", "Phone Number"],
        &AutoMapOptions::default(),
    );

    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.get("#phone"), Some("Phone Number"));
    assert_eq!(mapping.get("#zip"), None);
}

#[test]
fn test_zero_threshold_still_requires_overlap() {
    let mapping = auto_map(
        &["#zip"],
        &["Company"],
        &AutoMapOptions::default().with_threshold(0.0),
    );

    assert!(mapping.is_empty());
}

#[test]
fn test_custom_scorer() {
    let exact = Scorer::custom("exact", |a, b| if a == b { 1.0 } else { 0.0 });
    let options = AutoMapOptions::default().with_scorer(exact);

    let mapping = auto_map(&["#lastName", "#first"], &["First Name", "Last Name"], &options);

    assert_eq!(mapping.get("#lastName"), Some("Last Name"));
    assert_eq!(mapping.get("#first"), None);
}

#[test]
fn test_dice_scorer() {
    let options = AutoMapOptions::default().with_scorer(Scorer::dice());

    let mapping = auto_map(&["#emailAddress"], &["Phone", "E-mail address"], &options);

    assert_eq!(mapping.get("#emailAddress"), Some("E-mail address"));
}
