use confetti_cuisine::store::SubscriberStore;

use crate::helpers::{assert_is_redirect_to, spawn_app};

#[tokio::test]
async fn subscribing_with_valid_form_data_stores_the_subscriber() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/subscribers/create",
            &serde_json::json!({
                "name": "Ada Lovelace",
                "email": "Ada@Example.com",
                "zipCode": "10016",
            }),
        )
        .await;
    assert_is_redirect_to(&response, "/subscribers");

    let html_page = app.get_html("/subscribers").await;
    assert!(html_page.contains("Ada Lovelace subscribed successfully!"));
    assert!(html_page.contains("ada@example.com"));

    let saved = app.store.list_subscribers().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].zip_code, Some(10016));
}

#[tokio::test]
async fn invalid_form_data_is_sent_back_to_the_form() {
    let app = spawn_app().await;
    let test_cases = vec![
        (
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "zipCode": "90",
            }),
            "Zip code must be a number between 10000 and 99999",
        ),
        (
            serde_json::json!({"name": "", "email": "ada@example.com"}),
            "Name cannot be empty",
        ),
        (
            serde_json::json!({"name": "Ada", "email": "not-an-email"}),
            "is not a valid email",
        ),
    ];

    for (body, error) in test_cases {
        let response = app.post_form("/subscribers/create", &body).await;
        assert_is_redirect_to(&response, "/subscribers/new");

        let html_page = app.get_html("/subscribers/new").await;
        assert!(html_page.contains(error), "expected `{}` in the page", error);
    }

    assert!(app.store.list_subscribers().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_emails_are_rejected() {
    let app = spawn_app().await;
    app.create_subscriber("Ada Lovelace", "ada@example.com").await;

    let response = app
        .post_form(
            "/subscribers/create",
            &serde_json::json!({"name": "Ada L.", "email": "ada@example.com"}),
        )
        .await;

    assert_is_redirect_to(&response, "/subscribers/new");
    let html_page = app.get_html("/subscribers/new").await;
    assert!(html_page.contains("A subscriber with that email already exists."));
    assert_eq!(app.store.list_subscribers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn a_form_post_can_stand_in_for_put() {
    let app = spawn_app().await;
    let id = app.create_subscriber("Ada Lovelace", "ada@example.com").await;

    let response = app
        .post_form(
            &format!("/subscribers/{}/update?_method=PUT", id),
            &serde_json::json!({
                "name": "Augusta Ada King",
                "email": "ada@example.com",
            }),
        )
        .await;

    assert_is_redirect_to(&response, &format!("/subscribers/{}", id));
    let html_page = app.get_html(&format!("/subscribers/{}", id)).await;
    assert!(html_page.contains("Augusta Ada King"));

    let saved = app.store.find_subscriber(id).await.unwrap().unwrap();
    assert_eq!(saved.zip_code, None);
}

#[tokio::test]
async fn a_link_can_stand_in_for_delete() {
    let app = spawn_app().await;
    let id = app.create_subscriber("Ada Lovelace", "ada@example.com").await;

    let response = app
        .get(&format!("/subscribers/{}/delete?_method=DELETE", id))
        .await;

    assert_is_redirect_to(&response, "/subscribers");
    assert!(app.store.find_subscriber(id).await.unwrap().is_none());

    let response = app
        .get(&format!("/subscribers/{}/delete?_method=DELETE", id))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}
