use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::auth::jwt;

/// Verified caller identity, extracted from the `Authorization: Bearer`
/// header. Handlers that take this parameter are authenticated routes.
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_caller(req).map(AuthenticatedUser))
    }
}

fn extract_caller(req: &HttpRequest) -> Result<Uuid, Error> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Missing Authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
    })?;

    let secret = req
        .app_data::<web::Data<JwtSecret>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("JWT secret not configured"))?;

    let claims = jwt::validate_token(token, &secret.0)
        .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

    claims.user_id().map_err(actix_web::error::ErrorUnauthorized)
}

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);
