mod course_details;
mod email_address;
mod new_course;
mod new_subscriber;
mod new_user;
mod person_name;
mod validation;
mod zip_code;

pub use course_details::{CourseDescription, CourseTitle, NonNegative};
pub use email_address::EmailAddress;
pub use new_course::NewCourse;
pub use new_subscriber::NewSubscriber;
pub use new_user::{NewUser, UserChanges};
pub use person_name::PersonName;
pub use validation::ValidationErrors;
pub use zip_code::ZipCode;
