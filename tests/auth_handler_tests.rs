use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::TokenData;
use mockall::mock;
use uuid::Uuid;

use construction_backend::{
    auth::password::hash_password,
    email::mailer::{EmailError, Mailer},
    entities::admin_user::{
        AdminUser, AdminUserInsert, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
    },
    entities::token::Claims,
    errors::{AppError, AuthError},
    use_cases::auth::AuthHandler,
};

mock! {
    pub AdminRepo {}

    #[async_trait]
    impl construction_backend::repositories::admin_user::AdminUserRepository for AdminRepo {
        async fn check_connection(&self) -> Result<(), AppError>;
        async fn list(&self) -> Result<Vec<AdminUser>, AppError>;
        async fn count(&self) -> Result<i64, AppError>;
        async fn count_active(&self) -> Result<i64, AppError>;
        async fn find_by_id(&self, id: &Uuid) -> Result<Option<AdminUser>, AppError>;
        async fn find_active_by_username(&self, username: &str)
            -> Result<Option<AdminUser>, AppError>;
        async fn find_by_valid_reset_token(&self, token: &str)
            -> Result<Option<AdminUser>, AppError>;
        async fn username_exists(&self, username: &str, exclude: Option<Uuid>)
            -> Result<bool, AppError>;
        async fn create(&self, user: &AdminUserInsert) -> Result<AdminUser, AppError>;
        async fn update(
            &self,
            id: &Uuid,
            username: Option<String>,
            password_hash: Option<String>,
            email: Option<Option<String>>,
            is_active: Option<bool>,
        ) -> Result<Option<AdminUser>, AppError>;
        async fn delete(&self, id: &Uuid) -> Result<bool, AppError>;
        async fn touch_last_login(&self, id: &Uuid) -> Result<(), AppError>;
        async fn store_reset_token(
            &self,
            id: &Uuid,
            token: &str,
            expiry: DateTime<Utc>,
        ) -> Result<(), AppError>;
        async fn redeem_reset_token(&self, id: &Uuid, password_hash: &str)
            -> Result<(), AppError>;
    }
}

mock! {
    pub Tokens {}

    impl construction_backend::repositories::token::TokenService for Tokens {
        fn create_token(&self, admin: &AdminUser) -> Result<String, AuthError>;
        fn decode_token(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;
    }
}

#[derive(Clone, Default)]
struct CapturingMailer {
    sent: Arc<Mutex<Vec<(String, String, String)>>>,
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), EmailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body));
        Ok(())
    }
}

fn admin_with_password(password: &str) -> AdminUser {
    AdminUser {
        id: Uuid::new_v4(),
        username: "yonetici".to_string(),
        password_hash: hash_password(password).unwrap(),
        email: Some("yonetici@example.com".to_string()),
        is_active: true,
        last_login: None,
        reset_password_token: None,
        reset_password_expiry: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn handler(
    repo: MockAdminRepo,
    tokens: MockTokens,
    mailer: CapturingMailer,
) -> AuthHandler<MockAdminRepo, MockTokens, CapturingMailer> {
    AuthHandler::new(repo, tokens, mailer, "https://example.com".to_string())
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials() {
    let admin = admin_with_password("parola123");
    let admin_id = admin.id;

    let mut repo = MockAdminRepo::new();
    repo.expect_find_active_by_username()
        .withf(|username| username == "yonetici")
        .returning(move |_| Ok(Some(admin.clone())));
    repo.expect_touch_last_login()
        .withf(move |id| *id == admin_id)
        .returning(|_| Ok(()));

    let mut tokens = MockTokens::new();
    tokens
        .expect_create_token()
        .returning(|_| Ok("signed-token".to_string()));

    let handler = handler(repo, tokens, CapturingMailer::default());

    let response = handler
        .login(LoginRequest {
            username: "  Yonetici ".to_string(),
            password: "parola123".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.token, "signed-token");
    assert_eq!(response.admin.username, "yonetici");
}

#[tokio::test]
async fn unknown_user_and_wrong_password_fail_identically() {
    let admin = admin_with_password("parola123");

    let mut repo = MockAdminRepo::new();
    repo.expect_find_active_by_username()
        .returning(move |username| {
            if username == "yonetici" {
                Ok(Some(admin.clone()))
            } else {
                Ok(None)
            }
        });

    let handler = handler(repo, MockTokens::new(), CapturingMailer::default());

    let unknown = handler
        .login(LoginRequest {
            username: "kimse".to_string(),
            password: "parola123".to_string(),
        })
        .await
        .unwrap_err();
    let wrong = handler
        .login(LoginRequest {
            username: "yonetici".to_string(),
            password: "yanlis-parola".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(unknown.to_string(), wrong.to_string());
    assert_eq!(unknown.to_string(), "Kullanıcı adı veya şifre hatalı");
}

#[tokio::test]
async fn forgot_password_mails_a_reset_link() {
    let admin = admin_with_password("parola123");

    let mut repo = MockAdminRepo::new();
    repo.expect_find_active_by_username()
        .returning(move |_| Ok(Some(admin.clone())));
    let stored_token: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let stored = stored_token.clone();
    repo.expect_store_reset_token()
        .withf(|_, token, expiry| {
            token.len() == 64
                && token.chars().all(|c| c.is_ascii_hexdigit())
                && *expiry > Utc::now() + Duration::minutes(55)
                && *expiry <= Utc::now() + Duration::minutes(61)
        })
        .returning(move |_, token, _| {
            *stored.lock().unwrap() = Some(token.to_string());
            Ok(())
        });

    let mailer = CapturingMailer::default();
    let handler = handler(repo, MockTokens::new(), mailer.clone());

    handler
        .forgot_password(ForgotPasswordRequest {
            username: "yonetici".to_string(),
        })
        .await
        .unwrap();

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (to, _, body) = &sent[0];
    assert_eq!(to, "yonetici@example.com");

    let token = stored_token.lock().unwrap().clone().unwrap();
    assert!(body.contains(&format!(
        "https://example.com/admin/reset-password?token={}",
        token
    )));
}

#[tokio::test]
async fn forgot_password_does_not_reveal_unknown_usernames() {
    let mut repo = MockAdminRepo::new();
    repo.expect_find_active_by_username().returning(|_| Ok(None));

    let mailer = CapturingMailer::default();
    let handler = handler(repo, MockTokens::new(), mailer.clone());

    let message = handler
        .forgot_password(ForgotPasswordRequest {
            username: "kimse".to_string(),
        })
        .await
        .unwrap();

    assert!(message.contains("şifre sıfırlama linki gönderildi"));
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn reset_password_redeems_a_valid_token() {
    let admin = admin_with_password("eski-parola");
    let admin_id = admin.id;

    let mut repo = MockAdminRepo::new();
    repo.expect_find_by_valid_reset_token()
        .withf(|token| token == "abc123")
        .returning(move |_| Ok(Some(admin.clone())));
    repo.expect_redeem_reset_token()
        .withf(move |id, hash| *id == admin_id && hash.starts_with("$argon2"))
        .returning(|_, _| Ok(()));

    let handler = handler(repo, MockTokens::new(), CapturingMailer::default());

    handler
        .reset_password(ResetPasswordRequest {
            token: "abc123".to_string(),
            new_password: "yeni-parola".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn reset_password_rejects_expired_or_unknown_tokens() {
    let mut repo = MockAdminRepo::new();
    repo.expect_find_by_valid_reset_token().returning(|_| Ok(None));

    let handler = handler(repo, MockTokens::new(), CapturingMailer::default());

    let err = handler
        .reset_password(ResetPasswordRequest {
            token: "suresi-dolmus".to_string(),
            new_password: "yeni-parola".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.to_string(), "Geçersiz veya süresi dolmuş token");
}

#[tokio::test]
async fn short_new_password_is_rejected_before_lookup() {
    let handler = handler(
        MockAdminRepo::new(),
        MockTokens::new(),
        CapturingMailer::default(),
    );

    let err = handler
        .reset_password(ResetPasswordRequest {
            token: "abc123".to_string(),
            new_password: "kisa".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Şifre en az 6 karakter olmalı"));
}
