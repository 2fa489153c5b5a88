use crate::helpers::{get_json_response_body, TestApp};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_empty_collection_if_no_categories(app: &mut TestApp) {
    let response = app.get_categories().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body, json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_when_creating_without_auth(app: &mut TestApp) {
    let response = app.post_category(&json!({"title": "Board"})).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_created_categories_alphabetically(app: &mut TestApp) {
    app.log_in();

    for title in ["Tech", "Board", "Marketing"] {
        let response = app.post_category(&json!({ "title": title })).await;
        assert_eq!(response.status().as_u16(), 201);
    }

    let response = app.get_categories().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body, json!(["Board", "Marketing", "Tech"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_treat_duplicate_category_as_success(app: &mut TestApp) {
    app.log_in();

    assert_eq!(
        app.post_category(&json!({"title": "Board"}))
            .await
            .status()
            .as_u16(),
        201
    );
    assert_eq!(
        app.post_category(&json!({"title": "Board"}))
            .await
            .status()
            .as_u16(),
        201
    );

    let body = get_json_response_body(app.get_categories().await).await;
    assert_eq!(body, json!(["Board"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_invalid_titles(app: &mut TestApp) {
    app.log_in();

    let too_long = "a".repeat(31);
    let response = app.post_category(&json!({ "title": too_long })).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.post_category(&json!({"title": ""})).await;
    assert_eq!(response.status().as_u16(), 400);
}
