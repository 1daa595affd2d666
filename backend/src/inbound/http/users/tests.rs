//! Tests for people API handlers.

use super::*;
use crate::domain::ports::{MockPeopleCommand, MockPeopleQuery};
use crate::domain::EmailId;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn alice() -> UserInfo {
    UserInfo {
        id: UserId::new(1),
        user: User {
            first_name: "Alice".into(),
            last_name: "Smith".into(),
            gender: "female".into(),
            nationality: "US".into(),
            age: 31,
        },
        emails: vec!["alice@example.com".into()],
    }
}

async fn call(
    query: MockPeopleQuery,
    command: MockPeopleCommand,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let state = HttpState::new(Arc::new(query), Arc::new(command));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(people_api()),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn assert_error(body: &Value, code: &str, message: &str) {
    assert_eq!(body.get("error").and_then(Value::as_str), Some(code));
    assert_eq!(body.get("message").and_then(Value::as_str), Some(message));
}

fn detail<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get("details")
        .and_then(|details| details.get(key))
        .and_then(Value::as_str)
}

#[actix_web::test]
async fn lists_users_with_flattened_fields() {
    let mut query = MockPeopleQuery::new();
    query
        .expect_get_all_users()
        .times(1)
        .return_once(|| Ok(vec![alice()]));

    let (status, body) = call(
        query,
        MockPeopleCommand::new(),
        actix_test::TestRequest::get().uri("/api/v1/users"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "users": [{
                "id": 1,
                "first_name": "Alice",
                "last_name": "Smith",
                "gender": "female",
                "nationality": "US",
                "age": 31,
                "emails": ["alice@example.com"],
            }]
        })
    );
}

#[actix_web::test]
async fn empty_listing_is_not_found() {
    let mut query = MockPeopleQuery::new();
    query
        .expect_get_all_users()
        .return_once(|| Err(Error::not_found("no users found")));

    let (status, body) = call(
        query,
        MockPeopleCommand::new(),
        actix_test::TestRequest::get().uri("/api/v1/users"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "not_found", "no users found");
}

#[actix_web::test]
async fn looks_up_by_last_name() {
    let mut query = MockPeopleQuery::new();
    query
        .expect_get_user_by_last_name()
        .withf(|last_name| last_name == "Smith")
        .times(1)
        .return_once(|_| Ok(alice()));

    let (status, body) = call(
        query,
        MockPeopleCommand::new(),
        actix_test::TestRequest::get().uri("/api/v1/users/Smith"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], json!(1));
    assert_eq!(body["user"]["emails"], json!(["alice@example.com"]));
}

#[actix_web::test]
async fn returns_email_rows() {
    let mut query = MockPeopleQuery::new();
    query
        .expect_get_user_emails()
        .with(eq(UserId::new(1)))
        .return_once(|_| {
            Ok(vec![Email {
                id: EmailId::new(7),
                user_id: UserId::new(1),
                email: "alice@example.com".into(),
            }])
        });

    let (status, body) = call(
        query,
        MockPeopleCommand::new(),
        actix_test::TestRequest::get().uri("/api/v1/users/1/emails"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "emails": [{ "id": 7, "user_id": 1, "email": "alice@example.com" }] })
    );
}

#[actix_web::test]
async fn returns_friend_summaries() {
    let mut query = MockPeopleQuery::new();
    query
        .expect_get_user_friends()
        .with(eq(UserId::new(1)))
        .return_once(|_| {
            Ok(vec![Friend {
                friend_id: UserId::new(2),
                first_name: "Bob".into(),
                last_name: "Jones".into(),
            }])
        });

    let (status, body) = call(
        query,
        MockPeopleCommand::new(),
        actix_test::TestRequest::get().uri("/api/v1/users/1/friends"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "friends": [{ "friend_id": 2, "first_name": "Bob", "last_name": "Jones" }] })
    );
}

#[rstest]
#[case::emails("/api/v1/users/abc/emails")]
#[case::friends("/api/v1/users/-1/friends")]
#[actix_web::test]
async fn rejects_non_numeric_ids(#[case] uri: &str) {
    let (status, body) = call(
        MockPeopleQuery::new(),
        MockPeopleCommand::new(),
        actix_test::TestRequest::get().uri(uri),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("invalid_request"));
    assert_eq!(detail(&body, "code"), Some("invalid_id"));
}

#[actix_web::test]
async fn creates_user_and_returns_id() {
    let mut command = MockPeopleCommand::new();
    command
        .expect_create_user()
        .withf(|name| name.first_name() == "Alice" && name.last_name() == "Smith")
        .times(1)
        .return_once(|_| Ok(UserId::new(1)));

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "first_name": "Alice", "last_name": "Smith" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "user_id": 1 }));
}

#[rstest]
#[case::missing(json!({ "last_name": "Smith" }), "missing_field")]
#[case::blank(json!({ "first_name": "  ", "last_name": "Smith" }), "empty_first_name")]
#[actix_web::test]
async fn create_requires_a_first_name(#[case] payload: Value, #[case] code: &str) {
    let mut command = MockPeopleCommand::new();
    command.expect_create_user().times(0);

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail(&body, "field"), Some("first_name"));
    assert_eq!(detail(&body, "code"), Some(code));
}

#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    let (status, body) = call(
        MockPeopleQuery::new(),
        MockPeopleCommand::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"first_name\":"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "invalid_request", "request body is not valid JSON");
    assert_eq!(detail(&body, "code"), Some("malformed_json"));
}

#[actix_web::test]
async fn enrichment_failure_is_a_server_error_with_message() {
    let mut command = MockPeopleCommand::new();
    command
        .expect_create_user()
        .return_once(|_| Err(Error::enrichment_failed("age lookup failed")));

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "first_name": "Alice" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error(&body, "enrichment_failed", "age lookup failed");
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let mut query = MockPeopleQuery::new();
    query
        .expect_get_all_users()
        .return_once(|| Err(Error::internal("connection refused by 10.0.0.5")));

    let (status, body) = call(
        query,
        MockPeopleCommand::new(),
        actix_test::TestRequest::get().uri("/api/v1/users"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error(&body, "internal_error", "Internal server error");
}

#[actix_web::test]
async fn adds_emails() {
    let mut command = MockPeopleCommand::new();
    command
        .expect_add_user_emails()
        .with(eq(UserId::new(1)), eq(vec!["a@x.io".to_owned()]))
        .times(1)
        .return_once(|_, _| Ok(()));

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/1/emails")
            .set_json(json!({ "emails": ["a@x.io"] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Emails added successfully" }));
}

#[rstest]
#[case::emails("/api/v1/users/1/emails", json!({ "emails": [] }), "emails")]
#[case::friends("/api/v1/users/1/friends", json!({ "friends_ids": [] }), "friends_ids")]
#[actix_web::test]
async fn rejects_empty_lists(#[case] uri: &str, #[case] payload: Value, #[case] field: &str) {
    let (status, body) = call(
        MockPeopleQuery::new(),
        MockPeopleCommand::new(),
        actix_test::TestRequest::post().uri(uri).set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "invalid_request", &format!("{field} must not be empty"));
    assert_eq!(detail(&body, "code"), Some("empty_list"));
}

#[actix_web::test]
async fn adds_friends() {
    let mut command = MockPeopleCommand::new();
    command
        .expect_add_user_friendships()
        .with(eq(UserId::new(1)), eq(vec![UserId::new(2), UserId::new(3)]))
        .times(1)
        .return_once(|_, _| Ok(()));

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/api/v1/users/1/friends")
            .set_json(json!({ "friends_ids": [2, 3] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Friends added successfully" }));
}

#[actix_web::test]
async fn update_replaces_every_field() {
    let mut command = MockPeopleCommand::new();
    command
        .expect_update_user()
        .withf(|id, user| *id == UserId::new(1) && user.age == 32 && user.nationality == "GB")
        .times(1)
        .return_once(|_, _| Ok(()));

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::put().uri("/api/v1/users/1").set_json(json!({
            "first_name": "Alice",
            "last_name": "Smith",
            "gender": "female",
            "nationality": "GB",
            "age": 32,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "User update successfully" }));
}

#[actix_web::test]
async fn update_without_last_name_stores_it_empty() {
    let mut command = MockPeopleCommand::new();
    command
        .expect_update_user()
        .withf(|id, user| *id == UserId::new(1) && user.last_name.is_empty())
        .times(1)
        .return_once(|_, _| Ok(()));

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::put().uri("/api/v1/users/1").set_json(json!({
            "first_name": "Alice",
            "gender": "female",
            "nationality": "GB",
            "age": 32,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "User update successfully" }));
}

#[actix_web::test]
async fn update_reports_missing_fields() {
    let (status, body) = call(
        MockPeopleQuery::new(),
        MockPeopleCommand::new(),
        actix_test::TestRequest::put()
            .uri("/api/v1/users/1")
            .set_json(json!({ "first_name": "Alice", "last_name": "Smith" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail(&body, "field"), Some("gender"));
    assert_eq!(detail(&body, "code"), Some("missing_field"));
}

#[actix_web::test]
async fn update_of_unknown_user_is_not_found() {
    let mut command = MockPeopleCommand::new();
    command
        .expect_update_user()
        .return_once(|_, _| Err(Error::not_found("user 9 not found")));

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::put().uri("/api/v1/users/9").set_json(json!({
            "first_name": "Alice",
            "last_name": "Smith",
            "gender": "female",
            "nationality": "GB",
            "age": 32,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "not_found", "user 9 not found");
}

#[actix_web::test]
async fn deletes_user() {
    let mut command = MockPeopleCommand::new();
    command
        .expect_delete_user()
        .with(eq(UserId::new(4)))
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::delete().uri("/api/v1/users/4"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Deleted user successfully" }));
}

#[actix_web::test]
async fn email_deletion_is_not_routed_as_user_deletion() {
    let mut command = MockPeopleCommand::new();
    command.expect_delete_user().times(0);
    command
        .expect_delete_emails()
        .with(eq(vec![EmailId::new(4), EmailId::new(5)]))
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::delete()
            .uri("/api/v1/users/emails")
            .set_json(json!({ "ids": [4, 5] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Emails deleted successfully" }));
}

#[rstest]
#[case::lowercase("friends")]
#[case::capitalised("Friends")]
#[actix_web::test]
async fn deletes_friend_pairs_as_given(#[case] key: &str) {
    let mut command = MockPeopleCommand::new();
    command
        .expect_delete_friendships()
        .with(eq(vec![(UserId::new(2), UserId::new(1))]))
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body) = call(
        MockPeopleQuery::new(),
        command,
        actix_test::TestRequest::delete()
            .uri("/api/v1/users/1/friends")
            .set_json(json!({ key: [{ "id_first_friend": 2, "id_second_friend": 1 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Friendships deleted successfully" }));
}
