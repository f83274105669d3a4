// ============================
// signup-backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers for the signup, verify, and signin endpoints.
//!
//! Handlers only translate between the wire types and the lifecycle
//! service; every outcome the service returns maps to a fixed status via
//! `AppError::into_response`.
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use ::metrics::counter;

use crate::error::AppError;
use crate::metrics as keys;
use crate::AppState;
use signup_common::{
    MessageResponse, SigninRequest, SigninResponse, SignupRequest, VerifyRequest,
};

/// `POST /signup`
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    match state.accounts.signup(&req.email, req.password, &req.name).await {
        Ok(()) => {
            counter!(keys::SIGNUP_CREATED).increment(1);
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    message: "Signup successful! Please check your email for the verification code."
                        .to_string(),
                }),
            ))
        },
        Err(err) => {
            counter!(keys::SIGNUP_REJECTED).increment(1);
            Err(err)
        },
    }
}

/// `POST /verify`
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    match state.accounts.verify(&req.email, &req.code).await {
        Ok(()) => {
            counter!(keys::VERIFY_COMPLETED).increment(1);
            Ok(Json(MessageResponse {
                message: "Account verified successfully!".to_string(),
            }))
        },
        Err(err) => {
            counter!(keys::VERIFY_REJECTED).increment(1);
            Err(err)
        },
    }
}

/// `POST /signin`
pub async fn signin(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, AppError> {
    match state.accounts.signin(&req.email, req.password).await {
        Ok(user) => {
            counter!(keys::SIGNIN_ACCEPTED).increment(1);
            Ok(Json(SigninResponse {
                message: "Signin successful!".to_string(),
                user,
            }))
        },
        Err(err) => {
            counter!(keys::SIGNIN_REJECTED).increment(1);
            Err(err)
        },
    }
}
