use crate::helpers::{get_json_response_body, TestApp};
use serde_json::json;
use team_portal::domain::{ProjectMember, ProjectName, Semester};
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_empty_collection_if_no_projects(app: &mut TestApp) {
    let response = app.get_projects().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body, json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_when_creating_without_auth(app: &mut TestApp) {
    let response = app
        .post_project(&json!({
            "name": "Chess bot",
            "description": "A chess-playing robot",
            "logo": "images/chess.png",
            "hours_a_week": 6
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_create_project_and_report_unresolved_leaders(
    app: &mut TestApp,
) {
    app.log_in();
    app.seed_member(1, "Ola Nordmann", "ola@example.com").await;

    let response = app
        .post_project(&json!({
            "name": "Chess bot",
            "description": "A chess-playing robot",
            "logo": "images/chess.png",
            "hours_a_week": 6,
            "leaders": ["ola@example.com", "ghost@example.com"]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    assert_eq!(body["name"], "Chess bot");
    assert_eq!(body["leaders_not_found"], json!(["ghost@example.com"]));

    let schema = json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["name", "description", "hours_a_week", "leaders"],
            "properties": {
                "name": {"type": "string", "minLength": 1, "maxLength": 100},
                "hours_a_week": {"type": "integer"},
                "leaders": {"type": "array", "items": {"type": "string"}}
            }
        }
    });

    let body = get_json_response_body(app.get_projects().await).await;
    assert!(jsonschema::is_valid(&schema, &body));

    let projects = body.as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["leaders"], json!(["ola@example.com"]));
    // No github link supplied, so the default one applies
    assert_eq!(projects[0]["github_link"], "https://github.com");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_upsert_project_by_name(app: &mut TestApp) {
    app.log_in();

    let first = app
        .post_project(&json!({
            "name": "Chess bot",
            "description": "First description",
            "logo": "images/chess.png",
            "hours_a_week": 6
        }))
        .await;
    assert_eq!(first.status().as_u16(), 201);

    let second = app
        .post_project(&json!({
            "name": "Chess bot",
            "description": "Second description",
            "logo": "images/chess.png",
            "hours_a_week": 8,
            "github_link": "https://github.com/example/chess-bot"
        }))
        .await;
    assert_eq!(second.status().as_u16(), 201);

    let body = get_json_response_body(app.get_projects().await).await;
    let projects = body.as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["description"], "Second description");
    assert_eq!(projects[0]["hours_a_week"], 8);
    assert_eq!(
        projects[0]["github_link"],
        "https://github.com/example/chess-bot"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_replace_leader_set_on_each_sync(app: &mut TestApp) {
    app.log_in();
    app.seed_member(1, "Ola Nordmann", "ola@example.com").await;
    app.seed_member(2, "Nora Nordmann", "nora@example.com").await;

    let body = json!({
        "name": "Chess bot",
        "description": "A chess-playing robot",
        "logo": "images/chess.png",
        "hours_a_week": 6,
        "leaders": ["ola@example.com"]
    });
    assert_eq!(app.post_project(&body).await.status().as_u16(), 201);

    let mut replacement = body.clone();
    replacement["leaders"] = json!(["nora@example.com"]);
    assert_eq!(app.post_project(&replacement).await.status().as_u16(), 201);

    let body = get_json_response_body(app.get_projects().await).await;
    assert_eq!(body[0]["leaders"], json!(["nora@example.com"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_role_rows_most_recent_semester_first(app: &mut TestApp) {
    app.log_in();
    app.seed_member(1, "Ola Nordmann", "ola@example.com").await;

    let body = json!({
        "name": "Chess bot",
        "description": "A chess-playing robot",
        "logo": "images/chess.png",
        "hours_a_week": 6
    });
    assert_eq!(app.post_project(&body).await.status().as_u16(), 201);

    let name = ProjectName::parse("Chess bot").unwrap();
    for (year, semester, role) in [
        (2023, Semester::Fall, "Developer"),
        (2024, Semester::Spring, "Lead"),
        (2024, Semester::Fall, "Mentor"),
    ] {
        let row = ProjectMember::new(
            1,
            name.clone(),
            year,
            semester,
            role.to_owned(),
        )
        .unwrap();
        app.project_store
            .write()
            .await
            .add_project_member(&row)
            .await
            .unwrap();
    }

    let body = get_json_response_body(app.get_projects().await).await;
    let members = body[0]["members"].as_array().unwrap();
    let roles: Vec<&str> =
        members.iter().map(|m| m["role"].as_str().unwrap()).collect();
    // Year descending, Spring above Fall within a year
    assert_eq!(roles, vec!["Lead", "Mentor", "Developer"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_invalid_project_names(app: &mut TestApp) {
    app.log_in();

    let response = app
        .post_project(&json!({
            "name": "",
            "description": "A chess-playing robot",
            "logo": "images/chess.png",
            "hours_a_week": 6
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
