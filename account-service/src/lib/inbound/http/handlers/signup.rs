use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::account::models::SignupCommand;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequestBody>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let command = SignupCommand::new(body.full_name, body.email, body.password, body.role)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let authenticated = state.auth_service.signup(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AuthResponseData {
            account: (&authenticated.account).into(),
            token: (&authenticated.tokens).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequestBody {
    full_name: String,
    email: String,
    password: String,
    role: String,
}
