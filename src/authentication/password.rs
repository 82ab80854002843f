use anyhow::{anyhow, Context};
use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    Version,
};
use secrecy::{ExposeSecret, Secret};

use crate::store::UserStore;
use crate::telemetry::spawn_blocking_with_tracing;

pub struct Credentials {
    pub email: String,
    pub password: Secret<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials(#[source] anyhow::Error),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

/// Checks an email/password pair against the stored argon2 hash and returns
/// the id of the matching user.
#[tracing::instrument(name = "validate credentials", skip(credentials, store))]
pub async fn validate_credentials<S>(
    credentials: Credentials,
    store: &S,
) -> Result<uuid::Uuid, AuthError>
where
    S: UserStore + ?Sized,
{
    let mut user_id = None;

    // prevent timing attack with a default hash to be calculated.
    let mut expected_password_hash = Secret::new(
        "$argon2id$v=19$m=15000,t=2,p=1$\
        gZiV/M1gPc22ElAH/Jh1Hw$\
        CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTwllSAxT0zRno"
            .to_string(),
    );

    let email = credentials.email.trim().to_lowercase();
    if let Some((stored_user_id, stored_pwd_hash)) = store
        .find_credentials(&email)
        .await
        .context("failed to retrieve stored credentials")?
    {
        user_id = Some(stored_user_id);
        expected_password_hash = stored_pwd_hash;
    };

    // calculating hashes is CPU intensive (order of 10ms to hash), therefore
    // launch in a separate thread pool.
    spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, credentials.password)
    })
    .await
    .context("failed to spawn blocking task.")??;

    user_id
        .ok_or_else(|| anyhow!("unknown email."))
        .map_err(AuthError::InvalidCredentials)
}

#[tracing::instrument(
    name = "verify password hash",
    skip(expected_password_hash, password_candidate)
)]
fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<(), AuthError> {
    let expected_password_hash =
        PasswordHash::new(expected_password_hash.expose_secret())
            .context("failed to parse hash to PHC string format.")?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .context("invalid password")
        .map_err(AuthError::InvalidCredentials)
}

/// Hashes a new password with argon2id on the blocking pool.
#[tracing::instrument(name = "compute password hash", skip(password))]
pub async fn compute_password_hash(
    password: Secret<String>,
) -> Result<Secret<String>, anyhow::Error> {
    spawn_blocking_with_tracing(move || hash_password(password))
        .await
        .context("failed to spawn blocking task.")?
}

fn hash_password(
    password: Secret<String>,
) -> Result<Secret<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| anyhow!("invalid argon2 parameters: {e}"))?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {e}"))?
        .to_string();
    Ok(Secret::new(password_hash))
}
