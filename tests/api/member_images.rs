use crate::helpers::{get_json_response_body, TestApp};
use serde_json::json;
use team_portal::domain::MemberName;
use test_context::test_context;

const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47];

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_no_auth_cookie(app: &mut TestApp) {
    let response = app
        .post_member_images(&[("Ola Nordmann.png", PNG_BYTES)])
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_match_files_to_members_by_filename(app: &mut TestApp) {
    app.log_in();
    app.seed_member(1, "Ola Nordmann", "ola@example.com").await;

    let response = app
        .post_member_images(&[
            ("Ola Nordmann.png", PNG_BYTES),
            ("Unknown Person.jpg", PNG_BYTES),
        ])
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["members_not_found"], json!(["Unknown Person"]));

    let updated = body["updated_members"].as_array().unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0]["name"], "Ola Nordmann");
    assert_eq!(updated[0]["image"], "images/Ola Nordmann.png");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_overwrite_existing_image_reference(app: &mut TestApp) {
    app.log_in();
    app.seed_member(1, "Ola Nordmann", "ola@example.com").await;

    let first = app
        .post_member_images(&[("Ola Nordmann.png", PNG_BYTES)])
        .await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app
        .post_member_images(&[("Ola Nordmann.jpeg", PNG_BYTES)])
        .await;
    assert_eq!(second.status().as_u16(), 200);

    let name = MemberName::parse("Ola Nordmann".to_owned()).unwrap();
    let member = app
        .member_store
        .read()
        .await
        .find_member_by_name(&name)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.image.as_deref(), Some("images/Ola Nordmann.jpeg"));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_when_nothing_matches(app: &mut TestApp) {
    app.log_in();

    let response = app
        .post_member_images(&[("Nobody Here.png", PNG_BYTES)])
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["updated_members"], json!([]));
    assert_eq!(body["members_not_found"], json!(["Nobody Here"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_strip_only_the_final_extension(app: &mut TestApp) {
    app.log_in();

    let response = app
        .post_member_images(&[("Ola Nordmann.profile.png", PNG_BYTES)])
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["members_not_found"], json!(["Ola Nordmann.profile"]));
}
