use crate::helpers::App;

#[tokio::test]
async fn landing_page_renders_the_form() {
    let app = App::new().await;

    let response = app.get_home().await;

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains(r#"id="signup-form""#));
    assert!(body.contains("Get Early Access"));
}

#[tokio::test]
async fn landing_page_renders_without_a_store() {
    let app = App::without_store().await;

    let response = app.get_home().await;

    assert!(response.status().is_success());
}
