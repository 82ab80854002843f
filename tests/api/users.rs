use confetti_cuisine::store::UserStore;

use crate::helpers::{
    assert_is_redirect_to, spawn_app, spawn_app_with_failing_subscriber_lookup,
};

fn signup_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "first": "Jane",
        "last": "Doe",
        "email": email,
        "password": "sup3r-s3cret",
        "zipCode": "10016",
    })
}

#[tokio::test]
async fn signup_creates_an_account() {
    let app = spawn_app().await;

    let response = app
        .post_form("/users/create", &signup_body("jane@example.com"))
        .await;
    assert_is_redirect_to(&response, "/users");

    let html_page = app.get_html("/users").await;
    assert!(html_page.contains("account created successfully!"));
    assert!(html_page.contains("Jane Doe"));

    let user = app
        .store
        .find_user_by_email("jane@example.com")
        .await
        .unwrap()
        .expect("user was not stored");
    assert_eq!(user.zip_code, Some(10016));
    assert!(user.courses.is_empty());
    assert_eq!(user.subscribed_account, None);
}

#[tokio::test]
async fn nested_name_fields_are_accepted() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/users/create",
            &serde_json::json!({
                "name.first": "Jane",
                "name.last": "Doe",
                "email": "jane@example.com",
                "password": "sup3r-s3cret",
            }),
        )
        .await;

    assert_is_redirect_to(&response, "/users");
    let user = app
        .store
        .find_user_by_email("jane@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.full_name(), "Jane Doe");
}

#[tokio::test]
async fn signup_links_the_subscriber_with_the_same_email() {
    let app = spawn_app().await;
    let subscriber_id =
        app.create_subscriber("Jane Doe", "jane@example.com").await;

    let response = app
        .post_form("/users/create", &signup_body("JANE@example.com"))
        .await;
    assert_is_redirect_to(&response, "/users");

    let user = app
        .store
        .find_user_by_email("jane@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.subscribed_account, Some(subscriber_id));

    let html_page = app.get_html(&format!("/users/{}", user.id)).await;
    assert!(html_page.contains(&format!(
        r#"<a href="/subscribers/{}" class="subscribed-account">"#,
        subscriber_id
    )));
}

#[tokio::test]
async fn signup_is_aborted_when_the_subscriber_lookup_fails() {
    let app = spawn_app_with_failing_subscriber_lookup().await;

    let response = app
        .post_form("/users/create", &signup_body("jane@example.com"))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let html_page = response.text().await.unwrap();
    assert!(
        html_page.contains("500 | Sorry, our application is taking a nap!")
    );
    assert!(!html_page.contains("connection reset"));
    assert_eq!(app.store.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn signup_with_a_taken_email_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .post_form("/users/create", &signup_body(&app.test_user.email))
        .await;

    assert_is_redirect_to(&response, "/users/new");
    let html_page = app.get_html("/users/new").await;
    assert!(html_page.contains("A user with that email already exists."));
    assert_eq!(app.store.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn every_invalid_field_is_reported() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/users/create",
            &serde_json::json!({
                "first": "",
                "last": "Doe",
                "email": "jane@example.com",
                "zipCode": "123",
            }),
        )
        .await;

    assert_is_redirect_to(&response, "/users/new");
    let html_page = app.get_html("/users/new").await;
    assert!(html_page.contains(concat!(
        "First name cannot be empty and ",
        "Zip code must be a number between 10000 and 99999 and ",
        "Password cannot be empty",
    )));
    assert_eq!(app.store.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn anonymous_users_cannot_edit_accounts() {
    let app = spawn_app().await;
    let user_id = app.test_user.user_id;

    let response = app.get(&format!("/users/{}/edit", user_id)).await;
    assert_is_redirect_to(&response, "/users/login");

    let html_page = app.get_html("/users/login").await;
    assert!(html_page.contains("You must be logged in to do that."));

    let response = app
        .get(&format!("/users/{}/delete?_method=DELETE", user_id))
        .await;
    assert_is_redirect_to(&response, "/users/login");
    assert!(app.store.find_user(user_id).await.unwrap().is_some());
}

#[tokio::test]
async fn logged_in_users_can_update_accounts() {
    let app = spawn_app().await;
    let user_id = app.test_user.user_id;
    app.login().await;

    let html_page = app.get_html(&format!("/users/{}/edit", user_id)).await;
    assert!(html_page.contains(&app.test_user.email));

    let response = app
        .post_form(
            &format!("/users/{}/update?_method=PUT", user_id),
            &serde_json::json!({
                "first": "Jonathan",
                "last": "Wexler",
                "email": &app.test_user.email,
                "zipCode": "54321",
            }),
        )
        .await;
    assert_is_redirect_to(&response, &format!("/users/{}", user_id));

    let user = app.store.find_user(user_id).await.unwrap().unwrap();
    assert_eq!(user.first_name, "Jonathan");
    assert_eq!(user.zip_code, Some(54321));
}

#[tokio::test]
async fn deleting_your_own_account_logs_you_out() {
    let app = spawn_app().await;
    let user_id = app.test_user.user_id;
    app.login().await;

    let response = app
        .get(&format!("/users/{}/delete?_method=DELETE", user_id))
        .await;

    assert_is_redirect_to(&response, "/users");
    assert!(app.store.find_user(user_id).await.unwrap().is_none());
    let html_page = app.get_html("/").await;
    assert!(html_page.contains(r#"<a href="/users/login">Log in</a>"#));
}
