use serde::{Deserialize, Serialize};

/// Claims carried by the admin bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user id.
    pub sub: String,
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}
