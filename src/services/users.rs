//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{AuthResponse, LoginRequest, NewUser, Principal, RegisterUser, User, UserClaims, UserProfile},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Create an account and log it in
    pub async fn register(&self, data: RegisterUser) -> AppResult<AuthResponse> {
        data.validate()?;

        let (name, email, password, role) = match (
            non_blank(data.name),
            non_blank(data.email),
            data.password.filter(|p| !p.is_empty()),
            non_blank(data.role),
        ) {
            (Some(name), Some(email), Some(password), Some(role)) => (name, email, password, role),
            _ => return Err(AppError::Validation("Please add all fields".to_string())),
        };

        let role = Role::parse_loose(&role)
            .ok_or_else(|| AppError::Validation(format!("Invalid role: {}", role)))?;

        let user = self
            .repository
            .users
            .create(NewUser {
                name,
                email: email.to_lowercase(),
                password_hash: self.hash_password(&password)?,
                role,
                department: non_blank(data.department),
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        self.auth_response(user)
    }

    /// Check credentials and issue a token
    pub async fn login(&self, data: LoginRequest) -> AppResult<AuthResponse> {
        let user = self
            .repository
            .users
            .get_by_email(data.email.trim().to_lowercase())
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, &data.password)? {
            tracing::warn!(user_id = %user.id, "Failed login attempt");
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        self.auth_response(user)
    }

    /// Resolve a bearer token to the current state of its user
    pub async fn authenticate(&self, token: &str) -> AppResult<Principal> {
        let claims = UserClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Not authorized, token failed".to_string()))?;

        let user = self
            .repository
            .users
            .get_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Authentication("Not authorized, user not found".to_string()))?;

        Ok(Principal::from(user))
    }

    /// Look up a user (administrators only)
    pub async fn get_by_id(&self, principal: &Principal, id: Uuid) -> AppResult<UserProfile> {
        principal.require_admin()?;

        self.repository
            .users
            .get_by_id(id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    fn auth_response(&self, user: User) -> AppResult<AuthResponse> {
        let token = self.create_token(&user)?;
        Ok(AuthResponse {
            user: UserProfile::from(user),
            token,
            token_type: "Bearer".to_string(),
        })
    }

    /// Create JWT token for a user
    fn create_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

/// Trimmed value, or `None` when missing or blank
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Mocks;
    use mockall::predicate::eq;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-of-sufficient-length".to_string(),
            jwt_expiration_hours: 1,
        }
    }

    fn stored_user(service: &UsersService, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Dana Reyes".to_string(),
            email: "dana@example.com".to_string(),
            password_hash: service.hash_password(password).unwrap(),
            role: Role::Employee,
            department: Some("Finance".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        let service = UsersService::new(Mocks::new().into_repository(), config());
        let result = service
            .register(RegisterUser {
                name: Some("Dana".into()),
                email: Some("dana@example.com".into()),
                password: Some("secret1".into()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role() {
        let service = UsersService::new(Mocks::new().into_repository(), config());
        let result = service
            .register(RegisterUser {
                name: Some("Dana".into()),
                email: Some("dana@example.com".into()),
                password: Some("secret1".into()),
                role: Some("manager".into()),
                department: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("role")));
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_role() {
        let mut mocks = Mocks::new();
        mocks
            .users
            .expect_create()
            .withf(|u| u.email == "dana@example.com" && u.role == Role::Admin && u.password_hash.starts_with("$argon2"))
            .times(1)
            .returning(|u| {
                Ok(User {
                    id: Uuid::new_v4(),
                    name: u.name,
                    email: u.email,
                    password_hash: u.password_hash,
                    role: u.role,
                    department: u.department,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });
        let service = UsersService::new(mocks.into_repository(), config());

        let response = service
            .register(RegisterUser {
                name: Some("Dana".into()),
                email: Some("Dana@Example.com".into()),
                password: Some("secret1".into()),
                role: Some("admin".into()),
                department: None,
            })
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        let claims = UserClaims::from_token(&response.token, &config().jwt_secret).unwrap();
        assert_eq!(claims.sub, response.user.id);
        assert_eq!(claims.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_login_checks_password() {
        let service = UsersService::new(Mocks::new().into_repository(), config());
        let user = stored_user(&service, "correct-horse");

        let mut mocks = Mocks::new();
        let found = user.clone();
        mocks
            .users
            .expect_get_by_email()
            .with(eq("dana@example.com".to_string()))
            .returning(move |_| Ok(Some(found.clone())));
        let service = UsersService::new(mocks.into_repository(), config());

        let ok = service
            .login(LoginRequest { email: " DANA@example.com".into(), password: "correct-horse".into() })
            .await
            .unwrap();
        assert_eq!(ok.user.id, user.id);

        let wrong = service
            .login(LoginRequest { email: "dana@example.com".into(), password: "nope".into() })
            .await;
        assert!(matches!(wrong, Err(AppError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_authenticate_reloads_user() {
        let seed = UsersService::new(Mocks::new().into_repository(), config());
        let mut user = stored_user(&seed, "pw1234");
        let token = seed.create_token(&user).unwrap();

        // Role changed since the token was issued
        user.role = Role::Admin;
        let mut mocks = Mocks::new();
        let id = user.id;
        mocks
            .users
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(user.clone())));
        let service = UsersService::new(mocks.into_repository(), config());

        let principal = service.authenticate(&token).await.unwrap();
        assert_eq!(principal.id, id);
        assert!(principal.is_admin());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_deleted_user_and_bad_token() {
        let seed = UsersService::new(Mocks::new().into_repository(), config());
        let user = stored_user(&seed, "pw1234");
        let token = seed.create_token(&user).unwrap();

        let mut mocks = Mocks::new();
        mocks.users.expect_get_by_id().returning(|_| Ok(None));
        let service = UsersService::new(mocks.into_repository(), config());

        assert!(matches!(service.authenticate(&token).await, Err(AppError::Authentication(_))));
        assert!(matches!(service.authenticate("garbage").await, Err(AppError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_get_by_id_is_admin_only() {
        let service = UsersService::new(Mocks::new().into_repository(), config());
        let employee = Principal {
            id: Uuid::new_v4(),
            name: "Dana".into(),
            email: "dana@example.com".into(),
            role: Role::Employee,
            department: None,
        };
        let result = service.get_by_id(&employee, Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::Authorization(_))));
    }
}
