//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every people endpoint, the health probes, the request
//! and response DTOs, and the error envelope wrappers ([`ErrorSchema`],
//! [`ErrorCodeSchema`]) that keep the domain free of utoipa derives.
//!
//! The generated document backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    AddEmailsRequest, AddFriendsRequest, CreateUserRequest, DeleteEmailsRequest,
    DeleteFriendsRequest, EmailDto, EmailsResponse, FriendDto, FriendPairRequest,
    FriendsResponse, MessageResponse, UpdateUserRequest, UserIdResponse, UserInfoDto,
    UserResponse, UsersResponse,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "People API",
        description = "Users with enriched demographics, their emails, and friendships."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::get_all_users,
        crate::inbound::http::users::get_user_by_last_name,
        crate::inbound::http::users::get_user_emails,
        crate::inbound::http::users::get_user_friends,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::add_user_emails,
        crate::inbound::http::users::add_user_friends,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::delete_emails,
        crate::inbound::http::users::delete_user_friends,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateUserRequest,
        AddEmailsRequest,
        AddFriendsRequest,
        UpdateUserRequest,
        DeleteEmailsRequest,
        DeleteFriendsRequest,
        FriendPairRequest,
        UserInfoDto,
        EmailDto,
        FriendDto,
        UserResponse,
        UsersResponse,
        EmailsResponse,
        FriendsResponse,
        UserIdResponse,
        MessageResponse,
    )),
    tags(
        (name = "users", description = "Users, emails, and friendships"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
