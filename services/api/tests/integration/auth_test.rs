use snapchef_api::error::ApiError;
use snapchef_api::usecase::auth::{
    LoginInput, LoginUseCase, RefreshUseCase, SignupInput, SignupUseCase,
};
use snapchef_auth_types::token::{TokenType, validate_access_token, validate_token};
use snapchef_testing::auth::{MockAuth, TEST_JWT_SECRET};

use crate::helpers::{MockUserRepo, TEST_PASSWORD, test_issuer, test_user};

fn signup_input(email: &str, username: &str) -> SignupInput {
    SignupInput {
        email: email.to_owned(),
        username: username.to_owned(),
        password: TEST_PASSWORD.to_owned(),
    }
}

// ── Signup ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_up_with_lowercased_email_and_user_role() {
    let users = MockUserRepo::default();
    let uc = SignupUseCase {
        users: users.clone(),
        issuer: test_issuer(),
    };

    let out = uc
        .execute(signup_input("  Julia@Example.COM ", "julia_c"))
        .await
        .unwrap();

    assert_eq!(out.user.email, "julia@example.com");
    assert!(out.user.is_active);
    assert_ne!(out.user.password_hash, TEST_PASSWORD);
    assert_eq!(users.users.lock().unwrap().len(), 1);

    let info = validate_access_token(&out.tokens.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, out.user.id);
    assert_eq!(out.tokens.expires_in, 900);
}

#[tokio::test]
async fn should_reject_taken_email() {
    let existing = test_user("julia");
    let uc = SignupUseCase {
        users: MockUserRepo::new(vec![existing.clone()]),
        issuer: test_issuer(),
    };

    let result = uc
        .execute(signup_input(&existing.email.to_uppercase(), "someone_else"))
        .await;
    assert!(
        matches!(result, Err(ApiError::EmailTaken)),
        "expected EmailTaken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_taken_username() {
    let existing = test_user("julia");
    let uc = SignupUseCase {
        users: MockUserRepo::new(vec![existing]),
        issuer: test_issuer(),
    };

    let result = uc.execute(signup_input("other@example.com", "julia")).await;
    assert!(matches!(result, Err(ApiError::UsernameTaken)));
}

#[tokio::test]
async fn should_reject_short_password_before_touching_repo() {
    let users = MockUserRepo::default();
    let uc = SignupUseCase {
        users: users.clone(),
        issuer: test_issuer(),
    };

    let result = uc
        .execute(SignupInput {
            password: "short".to_owned(),
            ..signup_input("a@example.com", "cook")
        })
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
    assert!(users.users.lock().unwrap().is_empty());
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_log_in_with_correct_password() {
    let user = test_user("marco");
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        issuer: test_issuer(),
    };

    let out = uc
        .execute(LoginInput {
            email: user.email.to_uppercase(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(out.user.id, user.id);
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_email_alike() {
    let user = test_user("marco");
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        issuer: test_issuer(),
    };

    let wrong_password = uc
        .execute(LoginInput {
            email: user.email.clone(),
            password: "not the password".to_owned(),
        })
        .await;
    let unknown_email = uc
        .execute(LoginInput {
            email: "ghost@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await;

    assert!(matches!(wrong_password, Err(ApiError::InvalidCredentials)));
    assert!(matches!(unknown_email, Err(ApiError::InvalidCredentials)));
}

#[tokio::test]
async fn should_not_accept_stand_in_password_for_unknown_email() {
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![test_user("marco")]),
        issuer: test_issuer(),
    };

    let result = uc
        .execute(LoginInput {
            email: "ghost@example.com".to_owned(),
            password: "snapchef-dummy-password".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(ApiError::InvalidCredentials)));
}

#[tokio::test]
async fn should_refuse_login_for_banned_user() {
    let mut user = test_user("banned_cook");
    user.is_active = false;
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        issuer: test_issuer(),
    };

    let result = uc
        .execute(LoginInput {
            email: user.email.clone(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(ApiError::UserBanned)),
        "expected UserBanned, got {result:?}"
    );
}

// ── Tokens ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_distinct_jti_for_every_token() {
    let user = test_user("marco");
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        issuer: test_issuer(),
    };
    let login = || {
        uc.execute(LoginInput {
            email: user.email.clone(),
            password: TEST_PASSWORD.to_owned(),
        })
    };

    let first = login().await.unwrap().tokens;
    let second = login().await.unwrap().tokens;

    let jtis = [
        validate_token(&first.access_token, TEST_JWT_SECRET, TokenType::Access)
            .unwrap()
            .jti,
        validate_token(&first.refresh_token, TEST_JWT_SECRET, TokenType::Refresh)
            .unwrap()
            .jti,
        validate_token(&second.access_token, TEST_JWT_SECRET, TokenType::Access)
            .unwrap()
            .jti,
        validate_token(&second.refresh_token, TEST_JWT_SECRET, TokenType::Refresh)
            .unwrap()
            .jti,
    ];
    let unique: std::collections::HashSet<_> = jtis.iter().collect();
    assert_eq!(unique.len(), jtis.len());
}

#[tokio::test]
async fn should_rotate_pair_on_refresh() {
    let user = test_user("marco");
    let issued = test_issuer().issue(&user).unwrap();
    let uc = RefreshUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        issuer: test_issuer(),
    };

    let out = uc.execute(&issued.refresh_token).await.unwrap();
    assert_eq!(out.user.id, user.id);
    assert_ne!(out.tokens.refresh_token, issued.refresh_token);
}

#[tokio::test]
async fn should_reject_access_token_on_refresh() {
    let user = test_user("marco");
    let issued = test_issuer().issue(&user).unwrap();
    let uc = RefreshUseCase {
        users: MockUserRepo::new(vec![user]),
        issuer: test_issuer(),
    };

    let result = uc.execute(&issued.access_token).await;
    assert!(matches!(result, Err(ApiError::InvalidRefreshToken)));
}

#[tokio::test]
async fn should_reject_refresh_for_deleted_user() {
    let ghost = MockAuth::user();
    let uc = RefreshUseCase {
        users: MockUserRepo::default(),
        issuer: test_issuer(),
    };

    let result = uc
        .execute(&ghost.token(TokenType::Refresh, TEST_JWT_SECRET))
        .await;
    assert!(matches!(result, Err(ApiError::InvalidRefreshToken)));
}

#[tokio::test]
async fn should_refuse_refresh_for_banned_user() {
    let mut user = test_user("banned_cook");
    let issued = test_issuer().issue(&user).unwrap();
    user.is_active = false;
    let uc = RefreshUseCase {
        users: MockUserRepo::new(vec![user]),
        issuer: test_issuer(),
    };

    let result = uc.execute(&issued.refresh_token).await;
    assert!(matches!(result, Err(ApiError::UserBanned)));
}
