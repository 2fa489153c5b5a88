use crate::helpers::{get_json_response_body, TestApp};
use serde_json::json;
use test_context::test_context;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_no_auth_cookie(app: &mut TestApp) {
    let response = app.get_applications().await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_auth_cookie_is_invalid(app: &mut TestApp) {
    let url = reqwest::Url::parse(&app.address).unwrap();
    app.cookie_jar
        .add_cookie_str("jwt=not-a-real-token; Path=/", &url);

    let response = app.get_applications().await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_applications_for_authenticated_requests(
    app: &mut TestApp,
) {
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let application = json!({
        "first_name": "Kari",
        "last_name": "Nordmann",
        "email": "kari@example.com",
        "phone_number": "12345678"
    });
    assert_eq!(app.post_apply(&application).await.status().as_u16(), 200);

    app.log_in();
    let response = app.get_applications().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let applications = body.as_array().unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0]["first_name"], "Kari");
    assert_eq!(applications[0]["lead"], false);
    assert_eq!(applications[0]["projects_to_join"], json!([]));
}
