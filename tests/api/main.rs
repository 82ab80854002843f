mod errors;
mod health;
mod helpers;
mod login;
mod subscribers;
mod users;
