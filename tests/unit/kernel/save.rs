use super::*;
use crate::kernel::editor::EditorAction;
use crate::kernel::services::ports::SessionConfig;
use crate::kernel::{Action, Store};
use crate::models::NodeKind;

fn store() -> Store {
    Store::new(AppState::new(SessionConfig::default()))
}

#[test]
fn payload_uses_camel_case_wire_names() {
    let state = AppState::new(SessionConfig::default());
    let payload = SavePayload::from_state(&state);
    let json: serde_json::Value = serde_json::from_str(&payload.to_json_pretty().unwrap()).unwrap();

    assert!(json.get("files").is_some());
    assert!(json.get("fileContents").is_some());
    assert!(json.get("placeholders").is_some());
    assert_eq!(json["metadata"]["name"], "Project Template");
    assert_eq!(json["files"][0]["id"], "main-md");
    assert_eq!(json["files"][0]["type"], "file");
    assert_eq!(
        json["fileContents"]["main-md"],
        "# Project Template\n\nWelcome to your new project template!"
    );
}

#[test]
fn payload_contains_full_tree_contents_and_catalog() {
    let mut store = store();
    store.dispatch(Action::CreateNode {
        kind: NodeKind::Folder,
        name: "users".to_string(),
        parent: None,
        is_repeating: true,
    });
    let users = store.state().tree.snapshot()[1].id.clone();
    store.dispatch(Action::CreateNode {
        kind: NodeKind::File,
        name: "profile.md".to_string(),
        parent: Some(users.clone()),
        is_repeating: false,
    });
    let profile = store.state().tree.node(&users).unwrap().children.unwrap()[0]
        .id
        .clone();
    store.dispatch(Action::SelectNode(profile.clone()));
    store.dispatch(Action::Editor(EditorAction::UpdateContent(
        "Hi @@User@@".to_string(),
    )));
    store.dispatch(Action::Editor(EditorAction::CreatePlaceholder {
        title: "User".to_string(),
        description: "user name".to_string(),
    }));

    let payload = SavePayload::from_state(store.state());
    assert_eq!(payload.files.len(), 2);
    assert_eq!(payload.file_contents.get(&profile).map(String::as_str), Some("Hi @@User@@"));
    assert_eq!(payload.placeholders.len(), 1);

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["files"][1]["isRepeating"], true);
    assert_eq!(json["files"][1]["repeatingTemplateFileId"], profile.as_str());
    assert_eq!(json["placeholders"][0]["title"], "User");
}

#[test]
fn metadata_name_follows_config() {
    let config = SessionConfig {
        template_name: "Microservice".to_string(),
        ..SessionConfig::default()
    };
    let payload = SavePayload::from_state(&AppState::new(config));
    assert_eq!(payload.metadata.name, "Microservice");
}
