use crate::helpers::TestApp;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_round_trip_the_cache_and_return_ok(app: &mut TestApp) {
    let response = app.get_health_check().await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}
