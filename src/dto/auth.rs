//! Caller identity supplied by the fronting authentication collaborator.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::{AppError, ServiceError};

/// Header carrying the authenticated username.
pub const USER_HEADER: &str = "x-contest-user";
/// Header flagging staff/superuser callers.
pub const STAFF_HEADER: &str = "x-contest-staff";

/// Who is making the request, passed explicitly into every service call.
///
/// Authentication itself is out of scope: a trusted reverse proxy terminates
/// the session and forwards the identity in headers. Requests without a
/// username are rejected before any handler logic runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Authenticated username.
    pub username: String,
    /// Whether the caller holds the staff/superuser role.
    pub is_staff: bool,
}

impl Identity {
    /// Refuse the operation unless the caller is staff.
    pub fn require_staff(&self) -> Result<(), ServiceError> {
        if self.is_staff {
            Ok(())
        } else {
            Err(ServiceError::Unauthorized(format!(
                "user `{}` lacks the staff role",
                self.username
            )))
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Unauthorized("missing caller identity".into()))?;

        let is_staff = parts
            .headers
            .get(STAFF_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| matches!(value.trim(), "1" | "true" | "yes"));

        Ok(Self {
            username: username.to_string(),
            is_staff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Identity, AppError> {
        let (mut parts, ()) = request.into_parts();
        Identity::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn parses_user_and_staff_headers() {
        let request = Request::builder()
            .header(USER_HEADER, "alice")
            .header(STAFF_HEADER, "true")
            .body(())
            .unwrap();

        let identity = extract(request).await.unwrap();
        assert_eq!(identity.username, "alice");
        assert!(identity.is_staff);
    }

    #[tokio::test]
    async fn missing_staff_header_means_participant() {
        let request = Request::builder()
            .header(USER_HEADER, "bob")
            .body(())
            .unwrap();

        let identity = extract(request).await.unwrap();
        assert!(!identity.is_staff);
        assert!(identity.require_staff().is_err());
    }

    #[tokio::test]
    async fn missing_or_blank_user_is_rejected() {
        let no_header = Request::builder().body(()).unwrap();
        assert!(matches!(
            extract(no_header).await,
            Err(AppError::Unauthorized(_))
        ));

        let blank = Request::builder()
            .header(USER_HEADER, "   ")
            .body(())
            .unwrap();
        assert!(matches!(extract(blank).await, Err(AppError::Unauthorized(_))));
    }
}
