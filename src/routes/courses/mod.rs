//! `/courses` controller.

mod delete;
mod get;
mod post;
mod put;

pub use delete::delete;
pub use get::{edit, index, new, show};
pub use post::{create, join};
pub use put::update;

use crate::domain::{NewCourse, ValidationErrors};

#[derive(serde::Deserialize)]
pub struct CourseForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "maxStudents", alias = "max_students")]
    max_students: Option<String>,
    cost: Option<String>,
}

impl TryFrom<CourseForm> for NewCourse {
    type Error = ValidationErrors;

    fn try_from(form: CourseForm) -> Result<Self, Self::Error> {
        NewCourse::parse(
            form.title,
            form.description,
            form.max_students,
            form.cost,
        )
    }
}
