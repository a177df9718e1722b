use jsonwebtoken::TokenData;

use crate::entities::admin_user::AdminUser;
use crate::entities::token::Claims;
use crate::errors::AuthError;

pub trait TokenService: Send + Sync {
    fn create_token(&self, admin: &AdminUser) -> Result<String, AuthError>;
    fn decode_token(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;
}
