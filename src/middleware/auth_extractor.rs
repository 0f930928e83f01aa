// src/middleware/auth_extractor.rs
use std::fmt;

use actix_web::http::{header, StatusCode};
use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest, HttpResponse, ResponseError};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::models::user::JwtClaims;

/// Requester identity established from the bearer token. Routes that
/// require login take this as an extractor argument; routes that merely
/// adapt to it take `Option<AuthenticatedUser>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Login-flow URL with the original target carried in `next`, so the
/// client can come back after authenticating. Slashes in the target stay
/// literal; everything else is percent-encoded.
pub fn login_url(next: &str) -> String {
    let next = urlencoding::encode(next).replace("%2F", "/");
    format!("/auth/login/?next={}", next)
}

/// Raised when an auth-required route is hit without a valid session.
/// Renders as a redirect to the login flow, not as an error page.
#[derive(Debug)]
pub struct LoginRequired {
    pub next: String,
}

impl fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "login required to access {}", self.next)
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .append_header((header::LOCATION, login_url(&self.next)))
            .finish()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<AuthenticatedUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req).map_err(Error::from))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, LoginRequired> {
    let deny = || LoginRequired {
        next: req.path().to_string(),
    };

    let config = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or_else(deny)?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(deny)?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(deny)?.trim();

    let decoded = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        log::debug!("rejecting bearer token: {}", e);
        deny()
    })?;

    let user_id = Uuid::parse_str(&decoded.claims.sub).map_err(|_| deny())?;

    Ok(AuthenticatedUser {
        user_id,
        username: decoded.claims.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn mint_token(user_id: Uuid, username: &str, secret: &str) -> String {
        let claims = JwtClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: (chrono::Utc::now().timestamp() as u64) + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn auth_config() -> web::Data<AuthConfig> {
        web::Data::new(AuthConfig {
            jwt_secret: SECRET.to_string(),
        })
    }

    #[test]
    fn valid_token_yields_identity() {
        let user_id = Uuid::new_v4();
        let token = mint_token(user_id, "leo", SECRET);
        let req = TestRequest::default()
            .uri("/new/")
            .app_data(auth_config())
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let user = extract_user(&req).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.username, "leo");
    }

    #[test]
    fn missing_header_redirects_to_login_with_next() {
        let req = TestRequest::default()
            .uri("/new/")
            .app_data(auth_config())
            .to_http_request();

        let err = extract_user(&req).unwrap_err();
        assert_eq!(err.next, "/new/");

        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(location, "/auth/login/?next=/new/");
    }

    #[test]
    fn token_with_wrong_signature_is_rejected() {
        let token = mint_token(Uuid::new_v4(), "leo", "another-secret");
        let req = TestRequest::default()
            .uri("/follow/")
            .app_data(auth_config())
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let err = extract_user(&req).unwrap_err();
        assert_eq!(err.next, "/follow/");
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let req = TestRequest::default()
            .uri("/new/")
            .app_data(auth_config())
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();

        assert!(extract_user(&req).is_err());
    }

    #[test]
    fn login_url_keeps_slashes_literal() {
        assert_eq!(
            login_url("/test/5/comment/"),
            "/auth/login/?next=/test/5/comment/"
        );
    }

    #[test]
    fn login_url_still_escapes_query_characters() {
        let url = login_url("/group/rust/?page=2");
        let encoded = url.strip_prefix("/auth/login/?next=").unwrap();
        assert_eq!(encoded, "/group/rust/%3Fpage%3D2");
        assert_eq!(urlencoding::decode(encoded).unwrap(), "/group/rust/?page=2");
    }
}
