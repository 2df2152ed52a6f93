//! Axum route handlers for signup and login.

use axum::{
    extract::{FromRequest, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

/// `Json` whose rejections come back in the `AppError` envelope.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Fields are optional so missing ones surface as our own 400, not a JSON rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl CredentialsRequest {
    fn into_parts(self) -> Result<(String, String), AppError> {
        match (self.username, self.password) {
            (Some(u), Some(p)) if !u.trim().is_empty() && !p.is_empty() => Ok((u, p)),
            _ => Err(AppError::Validation(
                "Username and password are required".to_string(),
            )),
        }
    }
}

/// POST /api/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let (username, password) = req.into_parts()?;
    state.users.register(&username, &password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// POST /api/login
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let (username, password) = req.into_parts()?;
    if !state.users.verify(&username, &password).await? {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(MessageResponse {
        message: "Login successful".to_string(),
    }))
}
