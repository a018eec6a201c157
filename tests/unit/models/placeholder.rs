use super::*;

#[test]
fn create_trims_and_assigns_ids() {
    let mut catalog = PlaceholderCatalog::new();
    let id = catalog.create("  Company ", "  legal name ").unwrap();

    let item = catalog.get(&id).unwrap();
    assert_eq!(item.title, "Company");
    assert_eq!(item.description, "legal name");
    assert_eq!(item.token(), "@@Company@@");
}

#[test]
fn create_rejects_blank_title() {
    let mut catalog = PlaceholderCatalog::new();
    assert_eq!(
        catalog.create("   ", "desc"),
        Err(TemplateError::EmptyPlaceholderTitle)
    );
    assert!(catalog.is_empty());
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut catalog = PlaceholderCatalog::new();
    let a = catalog.create("A", "").unwrap();
    assert!(catalog.delete(&a));
    let b = catalog.create("A", "").unwrap();
    assert_ne!(a, b);
}

#[test]
fn update_replaces_in_place() {
    let mut catalog = PlaceholderCatalog::new();
    let a = catalog.create("A", "first").unwrap();
    let b = catalog.create("B", "second").unwrap();

    catalog.update(&a, " Alpha ", " renamed ").unwrap();

    let titles: Vec<_> = catalog.items().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "B"]);
    assert_eq!(catalog.get(&a).unwrap().description, "renamed");
    assert_eq!(catalog.get(&b).unwrap().description, "second");
}

#[test]
fn update_errors() {
    let mut catalog = PlaceholderCatalog::new();
    let a = catalog.create("A", "").unwrap();

    assert_eq!(
        catalog.update(&a, "", "x"),
        Err(TemplateError::EmptyPlaceholderTitle)
    );
    assert_eq!(
        catalog.update(&PlaceholderId::from("ph-99"), "T", ""),
        Err(TemplateError::UnknownPlaceholder)
    );
    assert_eq!(catalog.get(&a).unwrap().title, "A");
}

#[test]
fn delete_unknown_returns_false() {
    let mut catalog = PlaceholderCatalog::new();
    catalog.create("A", "").unwrap();
    assert!(!catalog.delete(&PlaceholderId::from("ph-42")));
    assert_eq!(catalog.len(), 1);
}

#[test]
fn unresolved_tokens_lists_unknown_titles_once() {
    let mut catalog = PlaceholderCatalog::new();
    catalog.create("Company", "").unwrap();

    let text = "@@Company@@ and @@City@@, again @@City@@ and @@Zip@@";
    assert_eq!(catalog.unresolved_tokens(text), vec!["City", "Zip"]);
}
