mod context;
mod middleware;
mod password;

pub use context::PageContext;
pub use middleware::{reject_anonymous_users, UserId};
pub use password::{
    compute_password_hash, validate_credentials, AuthError, Credentials,
};
