use super::*;

fn tree() -> TemplateTree {
    TemplateTree::new()
}

#[test]
fn starts_with_selected_root_file() {
    let tree = tree();
    let snapshot = tree.snapshot();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, FileId::root());
    assert_eq!(snapshot[0].name, ROOT_FILE_NAME);
    assert_eq!(snapshot[0].kind, NodeKind::File);
    assert_eq!(tree.selected(), Some(FileId::root()));
}

#[test]
fn name_validation() {
    assert!(is_valid_name("README.md"));
    assert!(is_valid_name("src_2-final"));
    assert!(!is_valid_name(""));
    assert!(!is_valid_name("my file"));
    assert!(!is_valid_name("a/b"));
    assert!(!is_valid_name("ünïcode"));
}

#[test]
fn create_folder_and_nested_file() {
    let mut tree = tree();
    let src = tree
        .create_node(NodeKind::Folder, "src", None, false)
        .unwrap();
    let lib = tree
        .create_node(NodeKind::File, "lib.rs", Some(&src), false)
        .unwrap();

    let folder = tree.node(&src).unwrap();
    let children = folder.children.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, lib);
    assert_eq!(children[0].parent_id, Some(src.clone()));
    assert_eq!(tree.parent_id(&lib), Some(src));
    assert_eq!(tree.snapshot().len(), 2);
}

#[test]
fn files_have_no_children_folders_have_empty_list() {
    let mut tree = tree();
    let folder = tree
        .create_node(NodeKind::Folder, "docs", None, false)
        .unwrap();

    assert_eq!(tree.node(&folder).unwrap().children, Some(Vec::new()));
    assert_eq!(tree.node(&FileId::root()).unwrap().children, None);
}

#[test]
fn rejects_invalid_name_without_mutation() {
    let mut tree = tree();
    let before = tree.snapshot();

    assert_eq!(
        tree.create_node(NodeKind::File, "bad name", None, false),
        Err(TemplateError::InvalidName)
    );
    assert_eq!(tree.snapshot(), before);
}

#[test]
fn rejects_duplicate_sibling_name() {
    let mut tree = tree();
    assert_eq!(
        tree.create_node(NodeKind::File, "main.md", None, false),
        Err(TemplateError::DuplicateName)
    );

    let a = tree.create_node(NodeKind::Folder, "a", None, false).unwrap();
    let b = tree.create_node(NodeKind::Folder, "b", None, false).unwrap();
    tree.create_node(NodeKind::File, "x.txt", Some(&a), false)
        .unwrap();
    assert_eq!(
        tree.create_node(NodeKind::Folder, "x.txt", Some(&a), false),
        Err(TemplateError::DuplicateName)
    );
    // 不同父级下同名合法
    assert!(tree
        .create_node(NodeKind::File, "x.txt", Some(&b), false)
        .is_ok());
}

#[test]
fn name_is_checked_before_duplicate() {
    let mut tree = tree();
    assert_eq!(
        tree.create_node(NodeKind::File, "", None, false),
        Err(TemplateError::InvalidName)
    );
}

#[test]
fn parent_must_exist_and_be_a_folder() {
    let mut tree = tree();
    assert_eq!(
        tree.create_node(NodeKind::File, "a.txt", Some(&FileId::from("nope")), false),
        Err(TemplateError::UnknownNode)
    );
    assert_eq!(
        tree.create_node(NodeKind::File, "a.txt", Some(&FileId::root()), false),
        Err(TemplateError::ParentNotFolder)
    );
}

#[test]
fn repeating_folder_holds_exactly_one_file() {
    let mut tree = tree();
    let users = tree
        .create_node(NodeKind::Folder, "users", None, true)
        .unwrap();

    let profile = tree
        .create_node(NodeKind::File, "profile.md", Some(&users), false)
        .unwrap();
    let node = tree.node(&users).unwrap();
    assert!(node.is_repeating);
    assert_eq!(node.repeating_template_file_id, Some(profile));

    assert_eq!(
        tree.create_node(NodeKind::File, "other.md", Some(&users), false),
        Err(TemplateError::RepeatingFolderSingleFileOnly)
    );
    assert_eq!(
        tree.create_node(NodeKind::Folder, "sub", Some(&users), false),
        Err(TemplateError::RepeatingFolderNoSubfolders)
    );
    assert_eq!(tree.node(&users).unwrap().children.unwrap().len(), 1);
}

#[test]
fn duplicate_is_reported_before_repeating_constraints() {
    let mut tree = tree();
    let users = tree
        .create_node(NodeKind::Folder, "users", None, true)
        .unwrap();
    tree.create_node(NodeKind::File, "profile.md", Some(&users), false)
        .unwrap();

    assert_eq!(
        tree.create_node(NodeKind::File, "profile.md", Some(&users), false),
        Err(TemplateError::DuplicateName)
    );
}

#[test]
fn deleting_the_repeating_template_file_frees_the_slot() {
    let mut tree = tree();
    let users = tree
        .create_node(NodeKind::Folder, "users", None, true)
        .unwrap();
    let profile = tree
        .create_node(NodeKind::File, "profile.md", Some(&users), false)
        .unwrap();

    assert_eq!(tree.delete_node(&profile), vec![profile]);
    assert_eq!(tree.node(&users).unwrap().repeating_template_file_id, None);
    assert!(tree
        .create_node(NodeKind::File, "again.md", Some(&users), false)
        .is_ok());
}

#[test]
fn root_file_cannot_be_deleted() {
    let mut tree = tree();
    assert!(tree.delete_node(&FileId::root()).is_empty());
    assert!(tree.contains(&FileId::root()));
}

#[test]
fn delete_removes_whole_subtree() {
    let mut tree = tree();
    let a = tree.create_node(NodeKind::Folder, "a", None, false).unwrap();
    let b = tree
        .create_node(NodeKind::Folder, "b", Some(&a), false)
        .unwrap();
    let c = tree
        .create_node(NodeKind::File, "c.txt", Some(&b), false)
        .unwrap();

    let mut removed = tree.delete_node(&a);
    removed.sort();
    let mut expected = vec![a.clone(), b.clone(), c.clone()];
    expected.sort();
    assert_eq!(removed, expected);
    assert!(!tree.contains(&c));
    assert_eq!(tree.len(), 1);
}

#[test]
fn deleting_unknown_id_is_a_no_op() {
    let mut tree = tree();
    assert!(tree.delete_node(&FileId::from("missing")).is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn deleting_selected_ancestor_clears_selection() {
    let mut tree = tree();
    let a = tree.create_node(NodeKind::Folder, "a", None, false).unwrap();
    let f = tree
        .create_node(NodeKind::File, "f.md", Some(&a), false)
        .unwrap();
    tree.select_node(&f).unwrap();

    tree.delete_node(&a);
    assert_eq!(tree.selected(), None);
}

#[test]
fn deleting_other_node_keeps_selection() {
    let mut tree = tree();
    let a = tree.create_node(NodeKind::File, "a.md", None, false).unwrap();
    tree.select_node(&FileId::root());

    tree.delete_node(&a);
    assert_eq!(tree.selected(), Some(FileId::root()));
}

#[test]
fn select_unknown_returns_none_and_keeps_selection() {
    let mut tree = tree();
    assert!(tree.select_node(&FileId::from("ghost")).is_none());
    assert_eq!(tree.selected(), Some(FileId::root()));
}

#[test]
fn toggle_only_affects_folders() {
    let mut tree = tree();
    let a = tree.create_node(NodeKind::Folder, "a", None, false).unwrap();

    tree.toggle_expansion(&a);
    assert!(tree.is_expanded(&a));
    tree.toggle_expansion(&a);
    assert!(!tree.is_expanded(&a));

    tree.toggle_expansion(&FileId::root());
    assert!(!tree.is_expanded(&FileId::root()));
}

#[test]
fn flatten_respects_expansion_and_insertion_order() {
    let mut tree = tree();
    let a = tree.create_node(NodeKind::Folder, "zeta", None, false).unwrap();
    tree.create_node(NodeKind::File, "b.md", Some(&a), false)
        .unwrap();
    tree.create_node(NodeKind::File, "alpha.md", None, false)
        .unwrap();

    let names: Vec<_> = tree
        .flatten_for_view()
        .into_iter()
        .map(|row| row.name)
        .collect();
    assert_eq!(names, vec!["main.md", "zeta", "alpha.md"]);

    tree.expand(&a);
    let rows = tree.flatten_for_view();
    let names: Vec<_> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["main.md", "zeta", "b.md", "alpha.md"]);
    assert_eq!(rows[2].depth, 1);
}

#[test]
fn snapshot_serializes_with_wire_field_names() {
    let mut tree = tree();
    let users = tree
        .create_node(NodeKind::Folder, "users", None, true)
        .unwrap();
    tree.create_node(NodeKind::File, "p.md", Some(&users), false)
        .unwrap();

    let json = serde_json::to_value(tree.node(&users).unwrap()).unwrap();
    assert_eq!(json["type"], "folder");
    assert_eq!(json["isRepeating"], true);
    assert_eq!(json["repeatingTemplateFileId"], "node-2");
    assert_eq!(json["children"][0]["parentId"], "node-1");
    assert!(json["children"][0].get("children").is_none());
}
