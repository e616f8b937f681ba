use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims issued by the external identity provider.
///
/// The provider signs tokens with HS256 using the shared `JWT_SECRET`.
/// `sub` carries the caller's stable UUID; this service only validates,
/// it never issues.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The caller's UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// Caller's email, if the provider includes it.
    pub email: Option<String>,
}

impl Claims {
    /// Extract the caller UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }
}

/// Validate a token's signature and expiry and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("{:?}", e.kind()))
}
