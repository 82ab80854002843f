mod course;
mod subscriber;
mod user;

pub use course::Course;
pub use subscriber::Subscriber;
pub use user::User;
