use super::*;
use crate::kernel::editor::{CursorMove, EditorAction};
use crate::kernel::Effect;
use crate::models::TemplateTree;

fn editor() -> EditorState {
    EditorState::new(&SessionConfig::default())
}

fn file_node(id: &str, name: &str) -> FileNode {
    FileNode {
        id: FileId::from(id),
        name: name.to_string(),
        kind: NodeKind::File,
        children: None,
        parent_id: None,
        is_repeating: false,
        repeating_template_file_id: None,
    }
}

fn root_node() -> FileNode {
    TemplateTree::new().node(&FileId::root()).unwrap()
}

#[test]
fn root_content_is_seeded_and_unchanged() {
    let editor = editor();
    assert_eq!(
        editor.content(&FileId::root()),
        "# Project Template\n\nWelcome to your new project template!"
    );
    assert!(!editor.is_changed(&FileId::root()));
    assert!(!editor.has_changes());
    assert_eq!(editor.active(), &ActiveView::Empty);
}

#[test]
fn selecting_a_file_loads_its_content() {
    let mut editor = editor();
    assert!(editor.set_active_file(Some(&root_node())));
    assert_eq!(editor.buffer.text(), editor.content(&FileId::root()));

    assert!(editor.set_active_file(Some(&file_node("node-1", "a.md"))));
    assert_eq!(editor.buffer.text(), "");
    assert_eq!(editor.active_file(), Some(&FileId::from("node-1")));
}

#[test]
fn folder_has_no_buffer() {
    let mut editor = editor();
    let mut folder = file_node("node-1", "src");
    folder.kind = NodeKind::Folder;
    folder.children = Some(Vec::new());

    editor.set_active_file(Some(&folder));
    assert!(matches!(editor.active(), ActiveView::Folder { name, .. } if name == "src"));
    assert!(editor.active_file().is_none());
    assert!(!editor.update_content("ignored"));
    assert!(editor.contents().get(&FileId::from("node-1")).is_none());
}

#[test]
fn change_flag_tracks_initial_value() {
    let mut editor = editor();
    editor.set_active_file(Some(&file_node("node-1", "a.md")));

    assert!(editor.update_content("draft"));
    assert!(editor.is_changed(&FileId::from("node-1")));

    // 改回初始值（空串）后标记清除
    assert!(editor.update_content(""));
    assert!(!editor.is_changed(&FileId::from("node-1")));
    assert!(!editor.has_changes());
}

#[test]
fn root_reverted_to_default_body_is_unchanged() {
    let mut editor = editor();
    editor.set_active_file(Some(&root_node()));
    let original = editor.content(&FileId::root()).to_string();

    editor.update_content("rewritten");
    assert!(editor.is_changed(&FileId::root()));
    editor.update_content(&original);
    assert!(!editor.is_changed(&FileId::root()));
}

#[test]
fn mark_saved_clears_flags_but_keeps_contents() {
    let mut editor = editor();
    editor.set_active_file(Some(&file_node("node-1", "a.md")));
    editor.update_content("body");

    assert!(editor.mark_saved());
    assert!(!editor.has_changes());
    assert_eq!(editor.content(&FileId::from("node-1")), "body");
}

#[test]
fn remove_files_prunes_content_and_clears_active() {
    let mut editor = editor();
    editor.set_active_file(Some(&file_node("node-1", "a.md")));
    editor.update_content("body");

    assert!(editor.remove_files(&[FileId::from("node-1")]));
    assert_eq!(editor.active(), &ActiveView::Empty);
    assert!(editor.contents().get(&FileId::from("node-1")).is_none());
    assert!(!editor.has_changes());
}

#[test]
fn insert_placeholder_at_cursor() {
    let mut editor = editor();
    editor.set_active_file(Some(&file_node("node-1", "a.md")));
    editor.update_content("AB");
    editor.buffer.set_cursor(1);

    let id = editor.create_placeholder("Name", "").unwrap();
    let placeholder = editor.catalog().get(&id).cloned().unwrap();
    assert!(editor.insert_placeholder(&placeholder));

    assert_eq!(editor.content(&FileId::from("node-1")), "A@@Name@@B");
    assert_eq!(editor.buffer.cursor(), 9);
    assert!(editor.is_changed(&FileId::from("node-1")));
}

#[test]
fn shift_motion_selection_is_replaced_by_placeholder() {
    let mut editor = editor();
    editor.set_active_file(Some(&file_node("node-1", "a.md")));
    editor.update_content("AxyB");
    editor.buffer.set_cursor(1);

    let (changed, _) =
        editor.dispatch_action(EditorAction::ExtendSelection(CursorMove::Right));
    assert!(changed);
    editor.dispatch_action(EditorAction::ExtendSelection(CursorMove::Right));
    assert_eq!(editor.buffer.selection().map(|s| s.range()), Some(1..3));

    let id = editor.create_placeholder("Name", "").unwrap();
    let (changed, _) = editor.dispatch_action(EditorAction::InsertPlaceholder(id));
    assert!(changed);
    assert_eq!(editor.content(&FileId::from("node-1")), "A@@Name@@B");
    assert_eq!(editor.buffer.cursor(), 9);
    assert!(!editor.buffer.has_selection());
}

#[test]
fn extend_selection_without_active_file_is_ignored() {
    let mut editor = editor();
    editor.set_active_file(None);
    let (changed, effects) =
        editor.dispatch_action(EditorAction::ExtendSelection(CursorMove::Left));
    assert!(!changed);
    assert!(effects.is_empty());
}

#[test]
fn insert_placeholder_without_active_file_is_noop() {
    let mut editor = editor();
    let id = editor.create_placeholder("Name", "").unwrap();
    let placeholder = editor.catalog().get(&id).cloned().unwrap();

    assert!(!editor.insert_placeholder(&placeholder));
    assert!(!editor.has_changes());
}

#[test]
fn submit_creates_or_updates_depending_on_editing() {
    let mut editor = editor();
    editor.submit_placeholder("Company", "legal").unwrap();
    let id = editor.placeholders()[0].id.clone();

    editor.begin_edit_placeholder(&id).unwrap();
    assert_eq!(editor.editing_placeholder().map(|p| p.title.as_str()), Some("Company"));
    editor.submit_placeholder("Org", "renamed").unwrap();

    assert_eq!(editor.placeholders().len(), 1);
    assert_eq!(editor.placeholders()[0].title, "Org");
    assert!(editor.editing_placeholder().is_none());
}

#[test]
fn deleting_edited_placeholder_ends_editing() {
    let mut editor = editor();
    let id = editor.create_placeholder("A", "").unwrap();
    editor.begin_edit_placeholder(&id).unwrap();

    assert!(editor.delete_placeholder(&id));
    assert!(editor.editing_placeholder().is_none());
    assert_eq!(
        editor.begin_edit_placeholder(&id),
        Err(TemplateError::UnknownPlaceholder)
    );
}

#[test]
fn deleting_placeholder_keeps_inserted_text() {
    let mut editor = editor();
    editor.set_active_file(Some(&file_node("node-1", "a.md")));
    let id = editor.create_placeholder("City", "").unwrap();
    let (_, _) = editor.dispatch_action(EditorAction::InsertPlaceholder(id.clone()));

    editor.dispatch_action(EditorAction::DeletePlaceholder(id));
    assert_eq!(editor.content(&FileId::from("node-1")), "@@City@@");
}

#[test]
fn typing_emits_contents_changed() {
    let mut editor = editor();
    editor.set_active_file(Some(&file_node("node-1", "a.md")));

    let (changed, effects) = editor.dispatch_action(EditorAction::InsertText("hi".to_string()));
    assert!(changed);
    match effects.as_slice() {
        [Effect::ContentsChanged { contents, changes }] => {
            assert_eq!(contents.get(&FileId::from("node-1")).map(String::as_str), Some("hi"));
            assert_eq!(changes.get(&FileId::from("node-1")), Some(&true));
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn edits_without_active_file_are_ignored() {
    let mut editor = editor();
    let (changed, effects) = editor.dispatch_action(EditorAction::InsertText("x".to_string()));
    assert!(!changed);
    assert!(effects.is_empty());

    let (changed, _) = editor.dispatch_action(EditorAction::MoveCursor(CursorMove::Right));
    assert!(!changed);
}

#[test]
fn invalid_placeholder_action_is_rejected() {
    let mut editor = editor();
    let (changed, effects) = editor.dispatch_action(EditorAction::CreatePlaceholder {
        title: "  ".to_string(),
        description: String::new(),
    });
    assert!(!changed);
    assert!(matches!(
        effects.as_slice(),
        [Effect::Rejected(TemplateError::EmptyPlaceholderTitle)]
    ));

    let (_, effects) = editor.dispatch_action(EditorAction::InsertPlaceholder(
        PlaceholderId::from("ph-9"),
    ));
    assert!(matches!(
        effects.as_slice(),
        [Effect::Rejected(TemplateError::UnknownPlaceholder)]
    ));
}

#[test]
fn placeholder_changes_emit_catalog_snapshot() {
    let mut editor = editor();
    let (_, effects) = editor.dispatch_action(EditorAction::CreatePlaceholder {
        title: "Company".to_string(),
        description: "d".to_string(),
    });
    match effects.as_slice() {
        [Effect::PlaceholdersChanged(items)] => assert_eq!(items[0].title, "Company"),
        other => panic!("unexpected effects: {other:?}"),
    }
}
