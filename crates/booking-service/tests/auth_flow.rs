//! Session lifecycle: register, login, refresh rotation, logout, resolution

mod common;

use std::sync::Arc;

use booking_common::{AppError, JwtService};
use booking_core::DomainError;
use booking_service::{
    AuthService, ChangePasswordRequest, LoginRequest, RefreshTokenRequest, ServiceError,
    UserService,
};

use common::{harness, register, register_request, PASSWORD};

fn login_request(login: &str, password: &str) -> LoginRequest {
    LoginRequest {
        login: login.to_string(),
        password: password.to_string(),
    }
}

fn refresh_request(token: &str) -> RefreshTokenRequest {
    RefreshTokenRequest {
        refresh_token: token.to_string(),
    }
}

fn is_app(err: &ServiceError, check: impl FnOnce(&AppError) -> bool) -> bool {
    matches!(err, ServiceError::App(e) if check(e))
}

#[tokio::test]
async fn test_register_and_login() {
    let h = harness();
    let auth = AuthService::new(&h.ctx);
    let user_id = register(&h.ctx, "alice").await;

    let tokens = auth.login(login_request("alice", PASSWORD)).await.unwrap();
    assert_eq!(tokens.token_type, "bearer");
    assert_eq!(tokens.expires_in, 900);
    assert!(!tokens.refresh_token.is_empty());

    let me = auth.me(&tokens.access_token).await.unwrap();
    assert_eq!(me.id, user_id);
    assert_eq!(me.login, "alice");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = harness();
    let auth = AuthService::new(&h.ctx);
    register(&h.ctx, "alice").await;

    let wrong_password = auth
        .login(login_request("alice", "not the password"))
        .await
        .unwrap_err();
    let unknown_login = auth.login(login_request("nobody", PASSWORD)).await.unwrap_err();

    assert!(is_app(&wrong_password, |e| matches!(e, AppError::InvalidCredentials)));
    assert!(is_app(&unknown_login, |e| matches!(e, AppError::InvalidCredentials)));
    assert_eq!(wrong_password.to_string(), unknown_login.to_string());
    assert_eq!(wrong_password.status_code(), 401);
}

#[tokio::test]
async fn test_duplicate_login_and_email_are_distinguished() {
    let h = harness();
    let auth = AuthService::new(&h.ctx);
    register(&h.ctx, "alice").await;

    let mut same_login = register_request("alice");
    same_login.email = "other@example.com".to_string();
    let err = auth.register(same_login).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::DuplicateLogin)));

    let mut same_email = register_request("bob");
    same_email.email = "alice@example.com".to_string();
    let err = auth.register(same_email).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::DuplicateEmail)));
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_refresh_rotates_and_old_token_dies() {
    let h = harness();
    let auth = AuthService::new(&h.ctx);
    register(&h.ctx, "alice").await;
    let first = auth.login(login_request("alice", PASSWORD)).await.unwrap();

    let second = auth.refresh(refresh_request(&first.refresh_token)).await.unwrap();
    assert_ne!(second.refresh_token, first.refresh_token);
    auth.me(&second.access_token).await.unwrap();

    // The rotated token can't be used again
    let err = auth
        .refresh(refresh_request(&first.refresh_token))
        .await
        .unwrap_err();
    assert!(is_app(&err, |e| matches!(e, AppError::InvalidToken | AppError::TokenRevoked)));
    assert_eq!(err.status_code(), 401);

    // The successor still works
    auth.refresh(refresh_request(&second.refresh_token)).await.unwrap();
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let h = harness();
    let auth = AuthService::new(&h.ctx);
    register(&h.ctx, "alice").await;
    let tokens = auth.login(login_request("alice", PASSWORD)).await.unwrap();

    let first = auth.logout(refresh_request(&tokens.refresh_token)).await.unwrap();
    assert_eq!(first.msg, "ok");
    auth.logout(refresh_request(&tokens.refresh_token)).await.unwrap();
    auth.logout(refresh_request("never-issued")).await.unwrap();

    assert!(auth.refresh(refresh_request(&tokens.refresh_token)).await.is_err());
}

#[tokio::test]
async fn test_logout_all_revokes_every_session() {
    let h = harness();
    let auth = AuthService::new(&h.ctx);
    let user_id = register(&h.ctx, "alice").await;
    let phone = auth.login(login_request("alice", PASSWORD)).await.unwrap();
    let laptop = auth.login(login_request("alice", PASSWORD)).await.unwrap();

    auth.logout_all(user_id).await.unwrap();

    assert!(auth.refresh(refresh_request(&phone.refresh_token)).await.is_err());
    assert!(auth.refresh(refresh_request(&laptop.refresh_token)).await.is_err());
}

#[tokio::test]
async fn test_resolve_user_collapses_failures() {
    let h = harness();
    let auth = AuthService::new(&h.ctx);
    let user_id = register(&h.ctx, "alice").await;

    // Garbage token
    let err = auth.resolve_user("not-a-jwt").await.unwrap_err();
    assert!(is_app(&err, |e| matches!(e, AppError::Unauthorized)));

    // Expired token
    let expired = JwtService::new(common::JWT_SECRET, -3600)
        .issue_access_token(user_id)
        .unwrap();
    let err = auth.resolve_user(&expired).await.unwrap_err();
    assert!(is_app(&err, |e| matches!(e, AppError::Unauthorized)));

    // Signed with another secret
    let forged = JwtService::new("another-secret", 900)
        .issue_access_token(user_id)
        .unwrap();
    let err = auth.resolve_user(&forged).await.unwrap_err();
    assert!(is_app(&err, |e| matches!(e, AppError::Unauthorized)));

    // Valid token whose user is gone
    let token = h.ctx.jwt_service().issue_access_token(user_id).unwrap();
    UserService::new(&h.ctx).delete_user(user_id).await.unwrap();
    let err = auth.resolve_user(&token).await.unwrap_err();
    assert!(is_app(&err, |e| matches!(e, AppError::Unauthorized)));
    assert_eq!(err.to_string(), "Could not validate credentials");
}

#[tokio::test]
async fn test_change_password_revokes_sessions() {
    let h = harness();
    let auth = AuthService::new(&h.ctx);
    let users = UserService::new(&h.ctx);
    let user_id = register(&h.ctx, "alice").await;
    let tokens = auth.login(login_request("alice", PASSWORD)).await.unwrap();

    let err = users
        .change_password(
            user_id,
            ChangePasswordRequest {
                current_password: "wrong".to_string(),
                new_password: "brand new password".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(is_app(&err, |e| matches!(e, AppError::InvalidCredentials)));

    users
        .change_password(
            user_id,
            ChangePasswordRequest {
                current_password: PASSWORD.to_string(),
                new_password: "brand new password".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(auth.refresh(refresh_request(&tokens.refresh_token)).await.is_err());
    assert!(auth.login(login_request("alice", PASSWORD)).await.is_err());
    auth.login(login_request("alice", "brand new password"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_context_builder_requires_dependencies() {
    let err = booking_service::ServiceContextBuilder::new()
        .store(Arc::new(booking_db::MemoryStore::new()))
        .build()
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(err.to_string().contains("blob_store is required"));
}
