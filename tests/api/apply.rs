use crate::helpers::{get_json_response_body, TestApp};
use serde_json::json;
use test_context::test_context;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

fn valid_application() -> serde_json::Value {
    json!({
        "first_name": "Kari",
        "last_name": "Nordmann",
        "email": "kari@example.com",
        "phone_number": "12345678",
        "about": "I love robotics",
        "projects_to_join": ["Chess bot"],
        "lead": true
    })
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_persist_application_and_send_confirmation(app: &mut TestApp) {
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_apply(&valid_application()).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["message"], "Application sent in successfully");
    assert_eq!(body["email_sent"], true);

    let applications = app
        .application_store
        .read()
        .await
        .get_applications()
        .await
        .unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].first_name, "Kari");
    assert_eq!(applications[0].projects_to_join, vec!["Chess bot"]);
    assert!(applications[0].lead);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_with_email_sent_false_if_email_fails(
    app: &mut TestApp,
) {
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_apply(&valid_application()).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["email_sent"], false);

    // The row is persisted even though the email never went out
    let applications = app
        .application_store
        .read()
        .await
        .get_applications()
        .await
        .unwrap();
    assert_eq!(applications.len(), 1);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_field_errors_for_each_missing_field(app: &mut TestApp) {
    let response = app.post_apply(&json!({})).await;
    assert_eq!(response.status().as_u16(), 400);

    let body = get_json_response_body(response).await;
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("first_name"));
    assert!(errors.contains_key("last_name"));
    assert!(errors.contains_key("email"));
    assert!(errors.contains_key("phone_number"));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_field_error_for_invalid_email(app: &mut TestApp) {
    let mut application = valid_application();
    application["email"] = json!("not-an-email");

    let response = app.post_apply(&application).await;
    assert_eq!(response.status().as_u16(), 400);

    let body = get_json_response_body(response).await;
    let errors = body["errors"].as_object().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_key("email"));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_non_list_projects_to_join(app: &mut TestApp) {
    let mut application = valid_application();
    application["projects_to_join"] = json!("Chess bot");

    let response = app.post_apply(&application).await;
    assert_eq!(response.status().as_u16(), 400);

    let body = get_json_response_body(response).await;
    assert!(body["errors"]
        .as_object()
        .unwrap()
        .contains_key("projects_to_join"));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_store_duplicate_submissions_as_independent_rows(
    app: &mut TestApp,
) {
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let application = valid_application();
    assert_eq!(app.post_apply(&application).await.status().as_u16(), 200);
    assert_eq!(app.post_apply(&application).await.status().as_u16(), 200);

    let applications = app
        .application_store
        .read()
        .await
        .get_applications()
        .await
        .unwrap();
    assert_eq!(applications.len(), 2);
    assert_ne!(applications[0].id, applications[1].id);
}
