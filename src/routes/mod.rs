pub mod courses;
mod errors;
mod health;
mod home;
mod http_utils;
pub mod subscribers;
pub mod users;

pub use errors::*;
pub use health::*;
pub use home::*;
pub use http_utils::*;
