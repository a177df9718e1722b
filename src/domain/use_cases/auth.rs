use chrono::{Duration, Utc};
use rand::RngCore;
use validator::Validate;

use crate::constants::RESET_TOKEN_TTL_SECS;
use crate::entities::admin_user::{
    ForgotPasswordRequest, LoggedInAdmin, LoginRequest, LoginResponse, ResetPasswordRequest,
};
use crate::errors::AppError;
use crate::infrastructure::auth::password::{hash_password, verify_password};
use crate::infrastructure::email::mailer::Mailer;
use crate::repositories::admin_user::AdminUserRepository;
use crate::repositories::token::TokenService;

/// Message returned by forgot-password whether or not the account exists.
const FORGOT_PASSWORD_MESSAGE: &str =
    "Eğer bu kullanıcı adı mevcut ve e-posta adresi tanımlıysa, şifre sıfırlama linki gönderildi.";

pub struct AuthHandler<R, T, M>
where
    R: AdminUserRepository,
    T: TokenService,
    M: Mailer,
{
    pub user_repo: R,
    pub token_service: T,
    pub mailer: M,
    pub public_base_url: String,
}

impl<R, T, M> AuthHandler<R, T, M>
where
    R: AdminUserRepository,
    T: TokenService,
    M: Mailer,
{
    pub fn new(user_repo: R, token_service: T, mailer: M, public_base_url: String) -> Self {
        AuthHandler {
            user_repo,
            token_service,
            mailer,
            public_base_url,
        }
    }

    /// Logs an admin in. Unknown usernames and wrong passwords fail with the
    /// same error so the two cases are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let username = request.username.trim().to_lowercase();

        let admin = self
            .user_repo
            .find_active_by_username(&username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_ok = verify_password(&request.password, &admin.password_hash)
            .map_err(|_| AppError::InvalidCredentials)?;
        if !password_ok {
            return Err(AppError::InvalidCredentials);
        }

        self.user_repo.touch_last_login(&admin.id).await?;

        let token = self
            .token_service
            .create_token(&admin)
            .map_err(|e| AppError::Internal(format!("token creation failed: {}", e)))?;

        tracing::info!(username = %admin.username, "admin logged in");

        Ok(LoginResponse {
            token,
            admin: LoggedInAdmin {
                id: admin.id,
                username: admin.username,
                email: admin.email,
                last_login: Some(Utc::now()),
            },
        })
    }

    /// Issues a reset token and mails the reset link. Responds with the same
    /// message whether the user exists or not (anti-enumeration).
    pub async fn forgot_password(
        &self,
        request: ForgotPasswordRequest,
    ) -> Result<String, AppError> {
        request.validate()?;

        let username = request.username.trim().to_lowercase();

        let admin = match self.user_repo.find_active_by_username(&username).await? {
            Some(admin) if admin.email.is_some() => admin,
            _ => return Ok(FORGOT_PASSWORD_MESSAGE.to_string()),
        };
        let email = admin.email.as_deref().unwrap_or_default().to_string();

        let token = generate_reset_token();
        let expiry = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECS);

        self.user_repo
            .store_reset_token(&admin.id, &token, expiry)
            .await?;

        let reset_url = format!(
            "{}/admin/reset-password?token={}",
            self.public_base_url.trim_end_matches('/'),
            token
        );

        let body = format!(
            "Merhaba {},\n\n\
             Admin paneli şifrenizi sıfırlamak için bir talepte bulundunuz.\n\
             Şifrenizi sıfırlamak için aşağıdaki bağlantıyı kullanın:\n\n\
             {}\n\n\
             Bu bağlantı 1 saat süreyle geçerlidir. Eğer bu talebi siz yapmadıysanız, \
             bu e-postayı görmezden gelin.\n",
            admin.username, reset_url
        );

        self.mailer
            .send(&email, "Admin Şifre Sıfırlama", body)
            .await
            .map_err(|e| AppError::Internal(format!("reset mail failed: {}", e)))?;

        // Same message as the unknown-user path.
        Ok(FORGOT_PASSWORD_MESSAGE.to_string())
    }

    /// Redeems a reset token. The token is cleared in the same statement
    /// that replaces the password, so it is single-use.
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> Result<String, AppError> {
        request.validate()?;

        let admin = self
            .user_repo
            .find_by_valid_reset_token(&request.token)
            .await?
            .ok_or_else(|| AppError::Validation("Geçersiz veya süresi dolmuş token".into()))?;

        let password_hash = hash_password(&request.new_password)?;

        self.user_repo
            .redeem_reset_token(&admin.id, &password_hash)
            .await?;

        tracing::info!(username = %admin.username, "admin password reset");

        Ok("Şifreniz başarıyla sıfırlandı. Artık yeni şifrenizle giriş yapabilirsiniz.".to_string())
    }
}

/// 32 random bytes, hex-encoded.
fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
