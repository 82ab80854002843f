use confetti_cuisine::store::UserStore;

use uuid::Uuid;

use crate::helpers::{assert_is_redirect_to, spawn_app};

#[tokio::test]
async fn unknown_paths_render_the_not_found_page() {
    let app = spawn_app().await;

    let response = app.get("/no/such/page").await;

    assert_eq!(response.status().as_u16(), 404);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("The page does not exist!"));
}

#[tokio::test]
async fn missing_records_render_the_not_found_page() {
    let app = spawn_app().await;

    for resource in ["subscribers", "users", "courses"] {
        let response =
            app.get(&format!("/{}/{}", resource, Uuid::new_v4())).await;

        assert_eq!(response.status().as_u16(), 404, "GET /{}/{{id}}", resource);
        let html_page = response.text().await.unwrap();
        assert!(html_page.contains("The page does not exist!"));
    }
}

#[tokio::test]
async fn malformed_ids_render_the_not_found_page() {
    let app = spawn_app().await;

    let response = app.get("/courses/not-a-uuid").await;

    assert_eq!(response.status().as_u16(), 404);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("The page does not exist!"));
}

#[tokio::test]
async fn wrong_methods_on_member_routes_render_the_not_found_page() {
    let app = spawn_app().await;
    let user_id = app.test_user.user_id;
    app.login().await;

    let paths = [
        format!("/users/{}/update", user_id),
        format!("/users/{}/delete", user_id),
        format!("/courses/{}/join", Uuid::new_v4()),
        format!("/subscribers/{}/update", Uuid::new_v4()),
    ];
    for path in paths {
        let response = app.get(&path).await;

        assert_eq!(response.status().as_u16(), 404, "GET {}", path);
        let html_page = response.text().await.unwrap();
        assert!(html_page.contains("The page does not exist!"));
    }
    assert!(app.store.find_user(user_id).await.unwrap().is_some());
}

#[tokio::test]
async fn error_pages_keep_the_login_state_and_flash_messages() {
    let app = spawn_app().await;
    let response = app.login().await;
    assert_is_redirect_to(&response, "/");

    let response = app.get(&format!("/users/{}", Uuid::new_v4())).await;

    assert_eq!(response.status().as_u16(), 404);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("The page does not exist!"));
    assert!(html_page.contains(&format!(
        "Logged in as {}",
        app.test_user.full_name()
    )));
    assert!(html_page.contains("Logged in!"));

    let html_page = app.get_html("/no/such/page").await;
    assert!(html_page.contains("Logged in as"));
}
