use axum::extract::{FromRequestParts, Request};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use super::error::AppError;
use super::routes::AppState;
use crate::actions::AuthenticateAction;
use crate::{TeamError, TokenRepository, User, UserRepository};

/// The caller resolved from an `Authorization: Bearer <token>` header.
///
/// Rejects with 401 `{"error":"Unauthorized"}` when the header is missing
/// or the token is unknown or expired.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn id(&self) -> i64 {
        self.0.id
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
}

impl<U, T, TM, IM, B> FromRequestParts<AppState<U, T, TM, IM, B>> for AuthenticatedUser
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: Clone + Send + Sync + 'static,
    IM: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U, T, TM, IM, B>,
    ) -> Result<Self, Self::Rejection> {
        let token =
            extract_bearer_token(&parts.headers).ok_or(AppError(TeamError::Unauthorized))?;

        let action = AuthenticateAction::new(state.user_repo.clone(), state.token_repo.clone());
        let user = action.execute(&token).await.map_err(AppError)?;

        Ok(AuthenticatedUser(user))
    }
}

/// Logs every request reaching the team-leader routes.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    log::info!(
        target: "teamwork",
        "msg=\"team leader API\", method=\"{method}\", path=\"{path}\", status={}",
        response.status().as_u16()
    );

    response
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(extract_bearer_token(&headers), Some("abc123".to_owned()));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
