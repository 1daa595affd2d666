//! People API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/Smith
//! GET    /api/v1/users/1/emails
//! GET    /api/v1/users/1/friends
//! POST   /api/v1/users {"first_name":"Alice","last_name":"Smith"}
//! POST   /api/v1/users/1/emails {"emails":["alice@example.com"]}
//! POST   /api/v1/users/1/friends {"friends_ids":[2,3]}
//! PUT    /api/v1/users/1 {"first_name":"Alice","last_name":"Smith","gender":"female","nationality":"US","age":31}
//! DELETE /api/v1/users/emails {"ids":[4,5]}
//! DELETE /api/v1/users/1
//! DELETE /api/v1/users/1/friends {"friends":[{"id_first_friend":1,"id_second_friend":2}]}
//! ```

use actix_web::{Scope, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Email, Error, Friend, PersonName, User, UserId, UserInfo, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, email_ids, parse_user_id, require, require_non_empty, user_ids,
};

const FIRST_NAME: FieldName = FieldName::new("first_name");
const GENDER: FieldName = FieldName::new("gender");
const NATIONALITY: FieldName = FieldName::new("nationality");
const AGE: FieldName = FieldName::new("age");
const EMAILS: FieldName = FieldName::new("emails");
const FRIENDS_IDS: FieldName = FieldName::new("friends_ids");
const IDS: FieldName = FieldName::new("ids");
const FRIENDS: FieldName = FieldName::new("friends");

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Alice")]
    pub first_name: Option<String>,
    #[schema(example = "Smith")]
    pub last_name: Option<String>,
}

/// Request body for `POST /api/v1/users/{id}/emails`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddEmailsRequest {
    #[schema(example = json!(["alice@example.com"]))]
    pub emails: Option<Vec<String>>,
}

/// Request body for `POST /api/v1/users/{id}/friends`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddFriendsRequest {
    #[schema(example = json!([2, 3]))]
    pub friends_ids: Option<Vec<u64>>,
}

/// Request body for `PUT /api/v1/users/{id}`; every field is replaced.
///
/// `last_name` may be omitted and is then stored empty, as on creation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub age: Option<u8>,
}

/// Request body for `DELETE /api/v1/users/emails`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteEmailsRequest {
    #[schema(example = json!([4, 5]))]
    pub ids: Option<Vec<u64>>,
}

/// One friendship pair, in either orientation.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct FriendPairRequest {
    pub id_first_friend: u64,
    pub id_second_friend: u64,
}

/// Request body for `DELETE /api/v1/users/{id}/friends`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteFriendsRequest {
    #[serde(alias = "Friends")]
    pub friends: Option<Vec<FriendPairRequest>>,
}

/// A user with their email addresses, flattened for clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInfoDto {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub nationality: String,
    pub age: u8,
    pub emails: Vec<String>,
}

impl From<UserInfo> for UserInfoDto {
    fn from(info: UserInfo) -> Self {
        let UserInfo { id, user, emails } = info;
        Self {
            id: id.get(),
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            nationality: user.nationality,
            age: user.age,
            emails,
        }
    }
}

/// One stored email address.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmailDto {
    pub id: u64,
    pub user_id: u64,
    pub email: String,
}

impl From<Email> for EmailDto {
    fn from(email: Email) -> Self {
        Self {
            id: email.id.get(),
            user_id: email.user_id.get(),
            email: email.email,
        }
    }
}

/// A friend summary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FriendDto {
    pub friend_id: u64,
    pub first_name: String,
    pub last_name: String,
}

impl From<Friend> for FriendDto {
    fn from(friend: Friend) -> Self {
        Self {
            friend_id: friend.friend_id.get(),
            first_name: friend.first_name,
            last_name: friend.last_name,
        }
    }
}

/// `{"user": ...}` envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: UserInfoDto,
}

/// `{"users": [...]}` envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserInfoDto>,
}

/// `{"emails": [...]}` envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmailsResponse {
    pub emails: Vec<EmailDto>,
}

/// `{"friends": [...]}` envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FriendsResponse {
    pub friends: Vec<FriendDto>,
}

/// `{"user_id": n}` returned after creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserIdResponse {
    pub user_id: u64,
}

/// Plain acknowledgement for mutations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "OK")]
    pub message: String,
}

fn acknowledge(message: &str) -> web::Json<MessageResponse> {
    web::Json(MessageResponse {
        message: message.to_owned(),
    })
}

fn map_name_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyFirstName => {
            Error::invalid_request("first_name must not be empty")
                .with_details(json!({ "field": "first_name", "code": "empty_first_name" }))
        }
    }
}

/// Every people route under `/api/v1`, with extractor errors mapped to the
/// domain envelope.
///
/// `DELETE /users/emails` is registered before `DELETE /users/{id}` so the
/// literal segment wins.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use people::inbound::http::users::people_api;
///
/// let app = App::new().service(people_api());
/// ```
pub fn people_api() -> Scope {
    web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(get_all_users)
        .service(get_user_emails)
        .service(get_user_friends)
        .service(get_user_by_last_name)
        .service(create_user)
        .service(add_user_emails)
        .service(add_user_friends)
        .service(update_user)
        .service(delete_emails)
        .service(delete_user)
        .service(delete_user_friends)
}

/// List every user with their email addresses.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = UsersResponse),
        (status = 404, description = "No users stored", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getAllUsers"
)]
#[get("/users")]
pub async fn get_all_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersResponse>> {
    let users = state.query.get_all_users().await?;
    Ok(web::Json(UsersResponse {
        users: users.into_iter().map(UserInfoDto::from).collect(),
    }))
}

/// Look a user up by last name; the lowest id wins when several match.
#[utoipa::path(
    get,
    path = "/api/v1/users/{last_name}",
    params(("last_name" = String, Path, description = "Last name to look up")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "No user with that last name", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserByLastName"
)]
#[get("/users/{last_name}")]
pub async fn get_user_by_last_name(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let last_name = path.into_inner();
    let user = state.query.get_user_by_last_name(&last_name).await?;
    Ok(web::Json(UserResponse {
        user: UserInfoDto::from(user),
    }))
}

/// List a user's email rows.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/emails",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "Emails", body = EmailsResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "No emails", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserEmails"
)]
#[get("/users/{id}/emails")]
pub async fn get_user_emails(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmailsResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let emails = state.query.get_user_emails(user_id).await?;
    Ok(web::Json(EmailsResponse {
        emails: emails.into_iter().map(EmailDto::from).collect(),
    }))
}

/// List a user's friends.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/friends",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "Friends", body = FriendsResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "No friends", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserFriends"
)]
#[get("/users/{id}/friends")]
pub async fn get_user_friends(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<FriendsResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let friends = state.query.get_user_friends(user_id).await?;
    Ok(web::Json(FriendsResponse {
        friends: friends.into_iter().map(FriendDto::from).collect(),
    }))
}

/// Create a user from a name; age, gender, and nationality are looked up.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserIdResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No estimate for the name", body = ErrorSchema),
        (status = 500, description = "Enrichment or storage failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<UserIdResponse>> {
    let CreateUserRequest {
        first_name,
        last_name,
    } = payload.into_inner();
    let first_name = require(first_name, FIRST_NAME)?;
    let name = PersonName::new(first_name, last_name.unwrap_or_default())
        .map_err(map_name_validation_error)?;
    let user_id = state.command.create_user(name).await?;
    Ok(web::Json(UserIdResponse {
        user_id: user_id.get(),
    }))
}

/// Attach email addresses to a user.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/emails",
    params(("id" = u64, Path, description = "User id")),
    request_body = AddEmailsRequest,
    responses(
        (status = 200, description = "Emails added", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "addUserEmails"
)]
#[post("/users/{id}/emails")]
pub async fn add_user_emails(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AddEmailsRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let emails = require_non_empty(payload.into_inner().emails, EMAILS)?;
    state.command.add_user_emails(user_id, emails).await?;
    Ok(acknowledge("Emails added successfully"))
}

/// Link a user to each listed friend.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/friends",
    params(("id" = u64, Path, description = "User id")),
    request_body = AddFriendsRequest,
    responses(
        (status = 200, description = "Friends added", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "addUserFriends"
)]
#[post("/users/{id}/friends")]
pub async fn add_user_friends(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AddFriendsRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let friend_ids = require_non_empty(payload.into_inner().friends_ids, FRIENDS_IDS)?;
    state
        .command
        .add_user_friendships(user_id, user_ids(friend_ids))
        .await?;
    Ok(acknowledge("Friends added successfully"))
}

/// Replace every field of a user.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let UpdateUserRequest {
        first_name,
        last_name,
        gender,
        nationality,
        age,
    } = payload.into_inner();
    let user = User {
        first_name: require(first_name, FIRST_NAME)?,
        last_name: last_name.unwrap_or_default(),
        gender: require(gender, GENDER)?,
        nationality: require(nationality, NATIONALITY)?,
        age: require(age, AGE)?,
    };
    state.command.update_user(user_id, user).await?;
    Ok(acknowledge("User update successfully"))
}

/// Delete a user with their emails and friendships.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    state.command.delete_user(user_id).await?;
    Ok(acknowledge("Deleted user successfully"))
}

/// Delete email rows by id.
#[utoipa::path(
    delete,
    path = "/api/v1/users/emails",
    request_body = DeleteEmailsRequest,
    responses(
        (status = 200, description = "Emails deleted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteEmails"
)]
#[delete("/users/emails")]
pub async fn delete_emails(
    state: web::Data<HttpState>,
    payload: web::Json<DeleteEmailsRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let ids = require_non_empty(payload.into_inner().ids, IDS)?;
    state.command.delete_emails(email_ids(ids)).await?;
    Ok(acknowledge("Emails deleted successfully"))
}

/// Delete friendship pairs given in any orientation.
///
/// The pairs in the body are authoritative; the path id is only validated.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/friends",
    params(("id" = u64, Path, description = "User id")),
    request_body = DeleteFriendsRequest,
    responses(
        (status = 200, description = "Friendships deleted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUserFriends"
)]
#[delete("/users/{id}/friends")]
pub async fn delete_user_friends(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<DeleteFriendsRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    parse_user_id(&path.into_inner())?;
    let pairs = require_non_empty(payload.into_inner().friends, FRIENDS)?
        .into_iter()
        .map(|pair| {
            (
                UserId::new(pair.id_first_friend),
                UserId::new(pair.id_second_friend),
            )
        })
        .collect();
    state.command.delete_friendships(pairs).await?;
    Ok(acknowledge("Friendships deleted successfully"))
}

#[cfg(test)]
mod tests;
