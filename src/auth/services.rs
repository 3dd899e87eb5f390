use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{
    dto::{Credentials, NewAccount, SessionUser},
    jwt::JwtKeys,
    password::{hash_password_blocking, verify_password_blocking},
    repo::{UserStore, DUPLICATE_EMAIL},
    repo_types::User,
};
use crate::errors::AppError;

fn session(user: User, keys: &JwtKeys) -> Result<SessionUser, AppError> {
    let token = keys.sign(user.id, &user.email)?;
    Ok(SessionUser {
        id: user.id,
        email: user.email,
        name: user.name,
        token,
    })
}

pub async fn register(
    users: &dyn UserStore,
    keys: &JwtKeys,
    account: NewAccount,
) -> Result<SessionUser, AppError> {
    if users.find_by_email(&account.email).await?.is_some() {
        warn!(email = %account.email, "email already registered");
        return Err(AppError::Conflict(DUPLICATE_EMAIL.into()));
    }

    let hash = hash_password_blocking(account.password).await?;
    // The unique index still catches a concurrent registration that slipped
    // past the lookup above.
    let user = users.create(&account.name, &account.email, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    session(user, keys)
}

pub async fn login(
    users: &dyn UserStore,
    keys: &JwtKeys,
    creds: Credentials,
) -> Result<SessionUser, AppError> {
    let user = users.find_by_email(&creds.email).await?.ok_or_else(|| {
        warn!(email = %creds.email, "login unknown email");
        AppError::NotFound("User with this email does not exist".into())
    })?;

    if !verify_password_blocking(creds.password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Incorrect password".into()));
    }

    info!(user_id = %user.id, "user logged in");
    session(user, keys)
}

pub async fn me(users: &dyn UserStore, user_id: Uuid) -> Result<User, AppError> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Lenient;
    use crate::auth::dto::RegisterRequest;
    use crate::testing::{test_jwt_keys, MemoryUserStore};

    fn account(name: &str, email: &str, password: &str) -> NewAccount {
        RegisterRequest {
            name: Some(Lenient::Valid(name.into())),
            email: Some(Lenient::Valid(email.into())),
            password: Some(Lenient::Valid(password.into())),
        }
        .validate()
        .unwrap()
    }

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn stored_password_is_hashed_and_login_succeeds() {
        let users = MemoryUserStore::default();
        let keys = test_jwt_keys();

        let registered = register(&users, &keys, account("Alice", "alice@example.com", "s3cret!"))
            .await
            .unwrap();
        let stored = users.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "s3cret!");

        let logged_in = login(&users, &keys, creds("alice@example.com", "s3cret!"))
            .await
            .unwrap();
        assert_eq!(logged_in.id, registered.id);
        assert_eq!(keys.verify(&logged_in.token).unwrap().sub, registered.id);
        assert_eq!(keys.verify(&registered.token).unwrap().sub, registered.id);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_regardless_of_other_fields() {
        let users = MemoryUserStore::default();
        let keys = test_jwt_keys();
        register(&users, &keys, account("Alice", "alice@example.com", "first-pass"))
            .await
            .unwrap();

        let err = register(&users, &keys, account("Mallory", " ALICE@example.com ", "other-pass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn login_unknown_email_is_not_found() {
        let users = MemoryUserStore::default();
        let err = login(&users, &test_jwt_keys(), creds("ghost@example.com", "whatever"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn login_wrong_password_is_unauthorized() {
        let users = MemoryUserStore::default();
        let keys = test_jwt_keys();
        register(&users, &keys, account("Alice", "alice@example.com", "right-pass"))
            .await
            .unwrap();
        let err = login(&users, &keys, creds("alice@example.com", "wrong-pass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn me_returns_profile_or_not_found() {
        let users = MemoryUserStore::default();
        let keys = test_jwt_keys();
        let s = register(&users, &keys, account("Alice", "alice@example.com", "s3cret!"))
            .await
            .unwrap();
        assert_eq!(me(&users, s.id).await.unwrap().name, "Alice");
        assert!(matches!(
            me(&users, Uuid::new_v4()).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
