use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    #[allow(dead_code)]
    pub email: Option<String>,
}

/// Caller identity on guest-tolerant routes. `None` means the request is
/// scoped to the anonymous "guest" user.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

fn user_from_request(state: &AppState, req: &Request) -> Option<AuthUser> {
    let auth_header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?;
    let token_data = verify_token(token, &state.config).ok()?;

    Some(AuthUser {
        id: token_data.claims.sub,
        email: if token_data.claims.email.is_empty() {
            None
        } else {
            Some(token_data.claims.email)
        },
    })
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = user_from_request(&state, &req).ok_or(AppError::Unauthorized)?;

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

/// Never rejects: a missing or invalid token downgrades the caller to guest.
pub async fn optional_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let maybe = MaybeUser(user_from_request(&state, &req));
    req.extensions_mut().insert(maybe);
    next.run(req).await
}
