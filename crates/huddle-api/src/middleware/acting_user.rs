use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Header carrying the authenticated admin's id, set by the upstream
/// authentication layer.
pub const USER_HEADER: &str = "x-huddle-user";

/// The admin performing a request. Stamped onto `createdBy` and
/// `lastModifiedBy`.
#[derive(Clone, Debug)]
pub struct ActingUser {
    pub id: String,
}

/// Require an acting user on admin routes.
///
/// Authentication happens before requests reach this service; this layer
/// only rejects requests that arrive without an identity and makes the
/// identity available to handlers as an `Extension<ActingUser>`.
pub async fn require_acting_user(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let Some(id) = id else {
        return ApiError::Unauthorized(format!("missing {USER_HEADER} header")).into_response();
    };

    req.extensions_mut().insert(ActingUser { id });
    next.run(req).await
}
