use crate::helpers::{get_json_response_body, TestApp};
use serde_json::json;
use team_portal::domain::CategoryTitle;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_empty_collection_if_no_members(app: &mut TestApp) {
    let response = app.get_members_by_type("Alle Medlemmer").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body, json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_all_members_in_display_order(app: &mut TestApp) {
    app.seed_member(2, "Nora Nordmann", "nora@example.com").await;
    app.seed_member(1, "Ola Nordmann", "ola@example.com").await;

    let response = app.get_members_by_type("Alle Medlemmer").await;
    assert_eq!(response.status().as_u16(), 200);

    let schema = json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["order", "name", "email", "categories"],
            "properties": {
                "order": {"type": "integer"},
                "name": {"type": "string", "minLength": 1, "maxLength": 30},
                "categories": {"type": "array"}
            }
        }
    });

    let body = get_json_response_body(response).await;
    assert!(jsonschema::is_valid(&schema, &body));

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ola Nordmann", "Nora Nordmann"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_filter_members_by_category(app: &mut TestApp) {
    app.seed_member(1, "Ola Nordmann", "ola@example.com").await;
    app.seed_member(2, "Nora Nordmann", "nora@example.com").await;

    let board = CategoryTitle::parse("Board".to_owned()).unwrap();
    app.member_store
        .write()
        .await
        .set_categories(2, &[board])
        .await
        .unwrap();

    let response = app.get_members_by_type("Board").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let members = body.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["name"], "Nora Nordmann");
    assert_eq!(members[0]["categories"], json!(["Board"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_empty_collection_for_unknown_category(
    app: &mut TestApp,
) {
    app.seed_member(1, "Ola Nordmann", "ola@example.com").await;

    let response = app.get_members_by_type("No Such Category").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body, json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_member_type_is_missing(app: &mut TestApp) {
    let response = app
        .http_client
        .get(format!("{}/members-by-type/", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}
