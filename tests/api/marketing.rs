use crate::helpers::{get_json_response_body, TestApp};
use serde_json::json;
use test_context::test_context;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

async fn mount_upstream_success(app: &TestApp, label: &str, url: &str) {
    Mock::given(path("/v1/chat/completions"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": label}}]
        })))
        .expect(1)
        .mount(&app.image_server)
        .await;

    Mock::given(path("/v1/images/generations"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": url}]
        })))
        .expect(1)
        .mount(&app.image_server)
        .await;
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_generate_and_record_an_image(app: &mut TestApp) {
    mount_upstream_success(app, "Event", "https://cdn.example.com/img.png")
        .await;

    let response = app
        .post_marketing_image(&json!({
            "prompt": "Chess tournament this Friday",
            "width": 1024,
            "height": 1024
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["image_url"], "https://cdn.example.com/img.png");

    // The refined prompt keeps the user text and is what gets echoed back
    let refined = body["prompt"].as_str().unwrap();
    assert!(refined.contains("Chess tournament this Friday"));
    assert_ne!(refined, "Chess tournament this Friday");

    let images = app.image_store.read().await.get_images().await.unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].image_url, "https://cdn.example.com/img.png");
    assert_eq!(images[0].prompt, refined);
    assert_eq!((images[0].width, images[0].height), (1024, 1024));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_accept_landscape_and_portrait_dimensions(app: &mut TestApp) {
    mount_upstream_success(app, "General", "https://cdn.example.com/w.png")
        .await;

    let response = app
        .post_marketing_image(&json!({
            "prompt": "A robot hand moving a chess piece",
            "width": 1792,
            "height": 1024
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_record_a_prompt_at_the_length_cap(app: &mut TestApp) {
    mount_upstream_success(app, "General", "https://cdn.example.com/x.png")
        .await;

    // The refined prompt exceeds the user-facing cap once the template
    // prefix is added; recording it must still succeed
    let max_length_prompt = "a".repeat(1000);
    let response = app
        .post_marketing_image(&json!({
            "prompt": max_length_prompt,
            "width": 1024,
            "height": 1024
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let images = app.image_store.read().await.get_images().await.unwrap();
    assert_eq!(images.len(), 1);
    assert!(images[0].prompt.len() > 1000);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_forbidden_prompt_characters(app: &mut TestApp) {
    let response = app
        .post_marketing_image(&json!({
            "prompt": "chess?",
            "width": 1024,
            "height": 1024
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let images = app.image_store.read().await.get_images().await.unwrap();
    assert!(images.is_empty());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_prompts_over_the_length_limit(app: &mut TestApp) {
    let response = app
        .post_marketing_image(&json!({
            "prompt": "a".repeat(1001),
            "width": 1024,
            "height": 1024
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_unsupported_dimensions(app: &mut TestApp) {
    let response = app
        .post_marketing_image(&json!({
            "prompt": "Chess tournament",
            "width": 512,
            "height": 512
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_502_when_upstream_fails(app: &mut TestApp) {
    Mock::given(path("/v1/chat/completions"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.image_server)
        .await;

    let response = app
        .post_marketing_image(&json!({
            "prompt": "Chess tournament",
            "width": 1024,
            "height": 1024
        }))
        .await;
    assert_eq!(response.status().as_u16(), 502);

    let images = app.image_store.read().await.get_images().await.unwrap();
    assert!(images.is_empty());
}
