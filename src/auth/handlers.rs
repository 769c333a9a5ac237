use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::{
    accounts::{CreateUserOutcome, EditPasswordOutcome, EditUserOutcome, User},
    auth::{
        dto::{
            EditPasswordRequest, EditUserRequest, LoginRequest, MessageResponse,
            PasswordChangedResponse, RegisterRequest, EDIT_PASSWORD_FIELDS, EDIT_USER_FIELDS,
            LOGIN_FIELDS, REGISTER_FIELDS,
        },
        extractors::ApiKeyUser,
    },
    error::{ApiError, ApiResult},
    state::AppState,
    validation::verify_required_params,
};

const INCORRECT_CREDENTIALS: &str = "INCORRECT_CREDENTIALS";
const USER_DOESNT_EXIST: &str = "USER_DOESNT_EXIST";

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(get_user).put(edit_user))
        .route("/user/password", put(edit_password))
}

/// Checks the required fields, then decodes the body into its request type.
fn parse_body<T: DeserializeOwned>(
    required: &[&str],
    body: Map<String, Value>,
) -> ApiResult<T> {
    verify_required_params(required, &body)?;
    serde_json::from_value(Value::Object(body)).map_err(|e| ApiError::BadBody(e.to_string()))
}

#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let req: RegisterRequest = parse_body(REGISTER_FIELDS, body)?;

    let outcome = state
        .accounts
        .create_user(
            &req.first_name,
            &req.last_name,
            &req.email,
            &req.password,
            &req.age,
        )
        .await?;

    let status = match outcome {
        CreateUserOutcome::Created => StatusCode::CREATED,
        CreateUserOutcome::EmailAlreadyTaken => StatusCode::CONFLICT,
        CreateUserOutcome::FailedToCreate => StatusCode::INTERNAL_SERVER_ERROR,
    };
    Ok((status, Json(MessageResponse { message: outcome.code() })))
}

#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<Json<User>> {
    let req: LoginRequest = parse_body(LOGIN_FIELDS, body)?;

    if !state.accounts.check_login(&req.email, &req.password).await? {
        warn!("login failed");
        return Err(ApiError::Rejected(StatusCode::UNAUTHORIZED, INCORRECT_CREDENTIALS));
    }

    let user = state
        .accounts
        .get_user_by_email(&req.email)
        .await?
        .ok_or(ApiError::Rejected(StatusCode::UNAUTHORIZED, INCORRECT_CREDENTIALS))?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    ApiKeyUser(user_id): ApiKeyUser,
) -> ApiResult<Json<User>> {
    let user = state
        .accounts
        .get_user_by_id(user_id)
        .await?
        .ok_or(ApiError::Rejected(StatusCode::NOT_FOUND, USER_DOESNT_EXIST))?;
    Ok(Json(user))
}

#[instrument(skip(state, body))]
pub async fn edit_user(
    State(state): State<AppState>,
    ApiKeyUser(user_id): ApiKeyUser,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<Json<MessageResponse>> {
    let req: EditUserRequest = parse_body(EDIT_USER_FIELDS, body)?;

    let outcome = state
        .accounts
        .edit_user(user_id, &req.email, &req.first_name, &req.last_name, &req.age)
        .await?;

    match outcome {
        EditUserOutcome::Updated | EditUserOutcome::NoChange => {
            Ok(Json(MessageResponse { message: outcome.code() }))
        }
        EditUserOutcome::EmailAlreadyTaken => {
            Err(ApiError::Rejected(StatusCode::CONFLICT, outcome.code()))
        }
    }
}

#[instrument(skip(state, body))]
pub async fn edit_password(
    State(state): State<AppState>,
    ApiKeyUser(user_id): ApiKeyUser,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<Response> {
    let req: EditPasswordRequest = parse_body(EDIT_PASSWORD_FIELDS, body)?;

    let outcome = state
        .accounts
        .edit_user_password(user_id, &req.old_password, &req.new_password)
        .await?;

    match outcome {
        EditPasswordOutcome::PasswordChanged => {
            let api_key = state
                .accounts
                .get_api_key_by_id(user_id)
                .await?
                .ok_or(ApiError::Rejected(StatusCode::NOT_FOUND, USER_DOESNT_EXIST))?;
            Ok(Json(PasswordChangedResponse { message: outcome.code(), api_key }).into_response())
        }
        EditPasswordOutcome::NoChange => {
            Ok(Json(MessageResponse { message: outcome.code() }).into_response())
        }
        EditPasswordOutcome::IncorrectCredentials => {
            Err(ApiError::Rejected(StatusCode::UNAUTHORIZED, outcome.code()))
        }
        EditPasswordOutcome::UserDoesntExist => {
            Err(ApiError::Rejected(StatusCode::NOT_FOUND, outcome.code()))
        }
    }
}
