use reqwest::StatusCode;
use serde_json::{json, Value};

use waitlist::signups::get_signup_by_email;

use crate::helpers::App;

#[tokio::test]
async fn signup_returns_200_and_the_new_id_for_a_valid_email() {
    let app = App::new().await;

    let response = app
        .post_signups(&json!({ "email": "test@example.com", "name": "" }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    let saved = get_signup_by_email(app.store(), "test@example.com")
        .await
        .unwrap()
        .expect("The signup should have been stored");
    assert_eq!(body["id"], saved.id.to_string());
    assert_eq!(saved.email, "test@example.com");
    assert_eq!(saved.name, None);
}

#[tokio::test]
async fn signup_stores_a_lower_cased_email_and_trimmed_name() {
    let app = App::new().await;

    let response = app
        .post_signups(&json!({ "email": "Foo@Bar.com", "name": " Alice " }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let saved = get_signup_by_email(app.store(), "foo@bar.com")
        .await
        .unwrap()
        .expect("The signup should have been stored");
    assert_eq!(saved.email, "foo@bar.com");
    assert_eq!(saved.name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn signup_without_a_name_field_is_accepted() {
    let app = App::new().await;

    let response = app.post_signups(&json!({ "email": "test@example.com" })).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn signup_returns_409_for_an_email_already_signed_up() {
    let app = App::new().await;
    app.post_signups(&json!({ "email": "test@example.com" }))
        .await;

    for email in ["test@example.com", "TEST@Example.COM"] {
        let response = app.post_signups(&json!({ "email": email })).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "error": "This email is already signed up" })
        );
    }
    assert_eq!(app.store().len().await, 1);
}

#[tokio::test]
async fn signup_returns_400_for_invalid_emails() {
    let app = App::new().await;
    let test_cases = [
        ("", "empty email"),
        ("not-an-email", "missing the @ symbol"),
        ("@example.com", "missing the local part"),
        ("test@example", "missing a dot after the @"),
        ("te st@example.com", "containing whitespace"),
        (" test@example.com", "leading whitespace"),
    ];

    for (email, description) in test_cases {
        let response = app.post_signups(&json!({ "email": email })).await;

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "The API did not fail with 400 for an email {}",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "error": "Please enter a valid email address" })
        );
    }
    assert!(app.store().is_empty().await);
}

#[tokio::test]
async fn signup_rejects_a_body_without_an_email() {
    let app = App::new().await;

    let response = app.post_signups(&json!({ "name": "Alice" })).await;

    assert!(response.status().is_client_error());
    assert!(app.store().is_empty().await);
}

#[tokio::test]
async fn signup_returns_503_when_no_store_is_configured() {
    let app = App::without_store().await;

    let response = app.post_signups(&json!({ "email": "test@example.com" })).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": false, "error": "Something went wrong. Please try again." })
    );
}

#[tokio::test]
async fn concurrent_signups_for_the_same_email_store_one_record() {
    let app = App::new().await;
    let body = json!({ "email": "race@example.com" });

    let (first, second) = tokio::join!(app.post_signups(&body), app.post_signups(&body));

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
    assert_eq!(app.store().len().await, 1);
}
