use crate::helpers::{assert_is_redirect_to, spawn_app};

#[tokio::test]
async fn an_error_flash_message_is_set_on_failure() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/users/login",
            &serde_json::json!({
                "email": &app.test_user.email,
                "password": "wrong-password",
            }),
        )
        .await;
    assert_is_redirect_to(&response, "/users/login");

    let html_page = app.get_html("/users/login").await;
    assert!(html_page
        .contains(r#"<p class="flash error"><i>Failed to login.</i></p>"#));

    // Flash messages are shown once.
    let html_page = app.get_html("/users/login").await;
    assert!(!html_page.contains("Failed to login."));
}

#[tokio::test]
async fn unknown_emails_fail_like_wrong_passwords() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/users/login",
            &serde_json::json!({
                "email": "nobody@example.com",
                "password": "whatever",
            }),
        )
        .await;

    assert_is_redirect_to(&response, "/users/login");
    let html_page = app.get_html("/users/login").await;
    assert!(html_page.contains("Failed to login."));
}

#[tokio::test]
async fn login_and_logout_toggle_the_navigation() {
    let app = spawn_app().await;
    let logged_in_as = format!("Logged in as {}", app.test_user.full_name());

    let response = app.login().await;
    assert_is_redirect_to(&response, "/");

    let html_page = app.get_html("/").await;
    assert!(html_page.contains("Logged in!"));
    assert!(html_page.contains(&logged_in_as));

    let response = app.get("/users/logout").await;
    assert_is_redirect_to(&response, "/");

    let html_page = app.get_html("/").await;
    assert!(html_page.contains("You have been logged out!"));
    assert!(!html_page.contains(&logged_in_as));
    assert!(html_page.contains(r#"<a href="/users/login">Log in</a>"#));
}

#[tokio::test]
async fn emails_are_matched_case_insensitively() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/users/login",
            &serde_json::json!({
                "email": app.test_user.email.to_uppercase(),
                "password": &app.test_user.password,
            }),
        )
        .await;

    assert_is_redirect_to(&response, "/");
}
