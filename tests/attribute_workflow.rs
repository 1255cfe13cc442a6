mod common;

use common::{list_body, FakeApi, Workspace};
use serde_json::{json, Value};
use sfcc_meta_sync::ui::{BookendPhase, Report};
use sfcc_meta_sync::{
    AttributeDeleteParams, AttributeGetParams, AttributePushParams, MetadataSync, Mutation,
    PushOutcome, SyncError,
};

fn push_params(object_type: &str, attribute_id: &str, force_recreate: bool) -> AttributePushParams {
    AttributePushParams {
        object_type: Some(object_type.to_string()),
        attribute_id: Some(attribute_id.to_string()),
        force_recreate,
    }
}

#[tokio::test]
async fn test_push_without_local_file_writes_template_only() {
    let workspace = Workspace::new();
    let api = FakeApi::new();
    let sync = MetadataSync::new(workspace.context(&api));

    let outcomes = sync
        .attribute_push(&push_params("Product", "shoeSize", false))
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 1);
    let PushOutcome::TemplateBootstrapped { path } = &outcomes[0] else {
        panic!("expected a bootstrapped template, got {:?}", outcomes[0]);
    };
    assert_eq!(path, &workspace.store.definition_path("Product", "shoeSize"));
    assert_eq!(workspace.file_count(), 1);

    let template: Value = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
    assert_eq!(template["id"], "shoeSize");

    assert!(api.calls_to("create_").is_empty());
    assert!(api.calls_to("update_").is_empty());

    let errors = workspace.reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("sfccdx attribute:get -o Product -a shoeSize"));
    assert!(workspace.reporter.successes().is_empty());
}

#[tokio::test]
async fn test_push_existing_attribute_updates_with_resource_state() {
    let workspace = Workspace::new();
    workspace
        .store
        .write_definition("Product", "color", &json!({ "id": "color", "value_type": "string" }))
        .unwrap();

    let api = FakeApi::new();
    api.respond(
        "attribute_definition/Product/color",
        200,
        json!({ "id": "color", "_resource_state": "860cde3040519cce439cd99e209f8a87c3ad0b7e2813edbf6f5501f763b73bd5" }),
    );

    let sync = MetadataSync::new(workspace.context(&api));
    let outcomes = sync
        .attribute_push(&push_params("Product", "color", false))
        .await
        .unwrap();

    assert_eq!(outcomes, vec![PushOutcome::Pushed(Mutation::Update)]);

    let updates = api.calls_to("update_attribute_definition/Product/color");
    assert_eq!(updates.len(), 1);
    assert_eq!(
        updates[0].resource_state.as_deref(),
        Some("860cde3040519cce439cd99e209f8a87c3ad0b7e2813edbf6f5501f763b73bd5")
    );
    assert_eq!(updates[0].body.as_ref().unwrap()["value_type"], "string");
    assert!(api.calls_to("create_").is_empty());

    // The remote state is always read before mutating
    assert_eq!(
        api.call_keys(),
        vec![
            "attribute_definition/Product/color",
            "update_attribute_definition/Product/color"
        ]
    );
    assert_eq!(
        workspace.reporter.successes(),
        vec!["Attribute color of object Product is pushed."]
    );
}

#[tokio::test]
async fn test_force_recreate_creates_existing_attribute() {
    let workspace = Workspace::new();
    workspace
        .store
        .write_definition("Product", "color", &json!({ "id": "color" }))
        .unwrap();

    let api = FakeApi::new();
    api.respond(
        "attribute_definition/Product/color",
        200,
        json!({ "id": "color", "_resource_state": "abc" }),
    );

    let sync = MetadataSync::new(workspace.context(&api));
    let outcomes = sync
        .attribute_push(&push_params("Product", "color", true))
        .await
        .unwrap();

    assert_eq!(outcomes, vec![PushOutcome::Pushed(Mutation::Create)]);
    assert_eq!(api.calls_to("create_attribute_definition/Product/color").len(), 1);
    assert!(api.calls_to("update_").is_empty());
}

#[tokio::test]
async fn test_missing_remote_attribute_is_created() {
    let workspace = Workspace::new();
    workspace
        .store
        .write_definition("Profile", "newsletter", &json!({ "id": "newsletter" }))
        .unwrap();

    let api = FakeApi::new();
    let sync = MetadataSync::new(workspace.context(&api));
    let outcomes = sync
        .attribute_push(&push_params("Profile", "newsletter", false))
        .await
        .unwrap();

    assert_eq!(outcomes, vec![PushOutcome::Pushed(Mutation::Create)]);
}

#[tokio::test]
async fn test_rejected_push_reports_fault_message() {
    let workspace = Workspace::new();
    workspace
        .store
        .write_definition("Product", "color", &json!({ "id": "color" }))
        .unwrap();

    let api = FakeApi::new();
    api.fail(
        "create_attribute_definition/Product/color",
        400,
        "Attribute definition 'color' is invalid.",
    );

    let sync = MetadataSync::new(workspace.context(&api));
    let outcomes = sync
        .attribute_push(&push_params("Product", "color", false))
        .await
        .unwrap();

    assert!(!outcomes[0].is_pushed());
    assert_eq!(
        workspace.reporter.errors(),
        vec!["Attribute color of object Product could not be pushed: Attribute definition 'color' is invalid."]
    );
}

#[tokio::test]
async fn test_push_all_local_attributes_of_object() {
    let workspace = Workspace::new();
    for id in ["alpha", "beta"] {
        workspace
            .store
            .write_definition("Product", id, &json!({ "id": id }))
            .unwrap();
    }

    let api = FakeApi::new();
    let sync = MetadataSync::new(workspace.context(&api));
    let outcomes = sync
        .attribute_push(&AttributePushParams {
            object_type: Some("Product".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(
        api.calls_to("create_")
            .iter()
            .map(|call| call.key.as_str())
            .collect::<Vec<_>>(),
        vec![
            "create_attribute_definition/Product/alpha",
            "create_attribute_definition/Product/beta"
        ]
    );
}

#[tokio::test]
async fn test_get_single_attribute_saves_cleaned_body() {
    let workspace = Workspace::new();
    let api = FakeApi::new();
    api.respond(
        "attribute_definition/Product/color",
        200,
        json!({
            "_v": "21.10",
            "_type": "object_attribute_definition",
            "_resource_state": "abc",
            "link": "https://example.com",
            "effective_id": "color",
            "system": false,
            "id": "color",
            "display_name": { "default": "Color" },
        }),
    );

    let sync = MetadataSync::new(workspace.context(&api));
    sync.attribute_get(&AttributeGetParams {
        object_type: Some("Product".to_string()),
        attribute_id: Some("color".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    let saved = workspace.store.read_definition("Product", "color").unwrap().unwrap();
    let saved: Value = serde_json::from_slice(&saved).unwrap();
    assert_eq!(
        saved,
        json!({ "id": "color", "display_name": { "default": "Color" } })
    );
    assert_eq!(
        workspace.reporter.successes(),
        vec!["Product/color has been successfully retrieved!"]
    );
}

#[tokio::test]
async fn test_get_with_do_not_save_writes_nothing() {
    let workspace = Workspace::new();
    let api = FakeApi::new();
    api.respond("attribute_definition/Product/color", 200, json!({ "id": "color" }));

    let sync = MetadataSync::new(workspace.context(&api));
    sync.attribute_get(&AttributeGetParams {
        object_type: Some("Product".to_string()),
        attribute_id: Some("color".to_string()),
        do_not_save: true,
        ..Default::default()
    })
    .await
    .unwrap();

    assert_eq!(workspace.file_count(), 0);
    assert_eq!(workspace.reporter.successes().len(), 1);
}

fn attribute_list(api: &FakeApi) {
    api.respond(
        "attribute_definitions/Product",
        200,
        list_body(vec![
            json!({ "id": "color", "system": false }),
            json!({ "id": "size", "system": false }),
            json!({ "id": "name", "system": true }),
        ]),
    );
    for id in ["color", "size", "name"] {
        api.respond(
            &format!("attribute_definition/Product/{}", id),
            200,
            json!({ "id": id }),
        );
    }
}

#[tokio::test]
async fn test_bulk_get_skips_system_attributes_by_default() {
    let workspace = Workspace::new();
    let api = FakeApi::new();
    attribute_list(&api);

    let sync = MetadataSync::new(workspace.context(&api));
    sync.attribute_get(&AttributeGetParams {
        object_type: Some("Product".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    assert_eq!(workspace.file_count(), 2);
    assert!(workspace.store.read_definition("Product", "name").unwrap().is_none());
}

#[tokio::test]
async fn test_bulk_get_with_system_attributes() {
    let workspace = Workspace::new();
    let api = FakeApi::new();
    attribute_list(&api);

    let sync = MetadataSync::new(workspace.context(&api));
    sync.attribute_get(&AttributeGetParams {
        object_type: Some("Product".to_string()),
        include_system_attributes: true,
        ..Default::default()
    })
    .await
    .unwrap();

    assert_eq!(workspace.file_count(), 3);
    assert_eq!(workspace.reporter.successes().len(), 3);
}

#[tokio::test]
async fn test_get_across_object_types_skips_custom_objects() {
    let workspace = Workspace::new();
    let api = FakeApi::new();
    api.respond(
        "object_definitions",
        200,
        list_body(vec![
            json!({ "object_type": "Product" }),
            json!({ "object_type": "CustomObject" }),
            json!({ "object_type": "Profile" }),
        ]),
    );
    api.respond("attribute_definitions/Product", 200, list_body(vec![]));
    api.respond("attribute_definitions/Profile", 200, list_body(vec![]));

    let sync = MetadataSync::new(workspace.context(&api));
    sync.attribute_get(&AttributeGetParams::default())
        .await
        .unwrap();

    assert_eq!(
        api.call_keys(),
        vec![
            "object_definitions",
            "attribute_definitions/Product",
            "attribute_definitions/Profile"
        ]
    );
}

#[tokio::test]
async fn test_id_without_object_fails_before_any_remote_call() {
    let workspace = Workspace::new();
    let api = FakeApi::new();
    let sync = MetadataSync::new(workspace.context(&api));

    let err = sync
        .attribute_get(&AttributeGetParams {
            attribute_id: Some("color".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SyncError>(),
        Some(SyncError::MissingObjectType { .. })
    ));
    assert!(api.calls().is_empty());
    assert!(workspace.reporter.reports().is_empty());

    let err = sync
        .attribute_push(&AttributePushParams {
            attribute_id: Some("color".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("You must specify an object"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_delete_removes_file_unless_preserved() {
    let workspace = Workspace::new();
    for id in ["color", "size"] {
        workspace
            .store
            .write_definition("Product", id, &json!({ "id": id }))
            .unwrap();
    }

    let api = FakeApi::new();
    let sync = MetadataSync::new(workspace.context(&api));

    sync.attribute_delete(&AttributeDeleteParams {
        object_type: Some("Product".to_string()),
        attribute_id: Some("color".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();
    assert!(workspace.store.read_definition("Product", "color").unwrap().is_none());

    sync.attribute_delete(&AttributeDeleteParams {
        object_type: Some("Product".to_string()),
        attribute_id: Some("size".to_string()),
        preserve_file: true,
        ..Default::default()
    })
    .await
    .unwrap();
    assert!(workspace.store.read_definition("Product", "size").unwrap().is_some());

    assert_eq!(
        workspace.reporter.successes(),
        vec![
            "Attribute color of Product deleted successfully.",
            "Attribute size of Product deleted successfully."
        ]
    );
}

#[tokio::test]
async fn test_failed_delete_keeps_file() {
    let workspace = Workspace::new();
    workspace
        .store
        .write_definition("Product", "color", &json!({ "id": "color" }))
        .unwrap();

    let api = FakeApi::new();
    api.fail(
        "delete_attribute_definition/Product/color",
        400,
        "System attributes cannot be deleted.",
    );

    let sync = MetadataSync::new(workspace.context(&api));
    sync.attribute_delete(&AttributeDeleteParams {
        object_type: Some("Product".to_string()),
        attribute_id: Some("color".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    assert!(workspace.store.read_definition("Product", "color").unwrap().is_some());
    assert_eq!(
        workspace.reporter.errors(),
        vec!["System attributes cannot be deleted."]
    );
}

#[tokio::test]
async fn test_delete_requires_object() {
    let workspace = Workspace::new();
    let api = FakeApi::new();
    let sync = MetadataSync::new(workspace.context(&api));

    let result = sync.attribute_delete(&AttributeDeleteParams::default()).await;

    assert!(result.is_err());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_commands_are_framed_by_bookends() {
    let workspace = Workspace::new();
    let api = FakeApi::new();
    api.respond("attribute_definitions/Product", 200, list_body(vec![]));

    let sync = MetadataSync::new(workspace.context(&api));
    sync.attribute_get(&AttributeGetParams {
        object_type: Some("Product".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    assert_eq!(
        workspace.reporter.reports(),
        vec![
            Report::Bookend {
                command: "attribute:get".to_string(),
                phase: BookendPhase::Start,
            },
            Report::Bookend {
                command: "attribute:get".to_string(),
                phase: BookendPhase::End,
            },
        ]
    );
}

#[tokio::test]
async fn test_debug_mode_echoes_fields() {
    let workspace = Workspace::new();
    let api = FakeApi::new();
    api.respond(
        "attribute_definition/Product/color",
        200,
        json!({ "id": "color", "display_name": { "default": "Color" } }),
    );

    let sync = MetadataSync::new(workspace.context(&api).with_debug(true));
    sync.attribute_get(&AttributeGetParams {
        object_type: Some("Product".to_string()),
        attribute_id: Some("color".to_string()),
        do_not_save: true,
        ..Default::default()
    })
    .await
    .unwrap();

    let fields = workspace
        .reporter
        .reports()
        .into_iter()
        .find_map(|report| match report {
            Report::Fields(rows) => Some(rows),
            _ => None,
        })
        .expect("debug output");
    assert!(fields.contains(&("display_name.default".to_string(), "Color".to_string())));
    assert!(fields.contains(&("value_type".to_string(), "undefined".to_string())));
}
