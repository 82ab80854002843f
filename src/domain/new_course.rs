use crate::domain::{
    CourseDescription, CourseTitle, NonNegative, ValidationErrors,
};

#[derive(Debug)]
pub struct NewCourse {
    pub title: CourseTitle,
    pub description: CourseDescription,
    pub max_students: NonNegative,
    pub cost: NonNegative,
}

impl NewCourse {
    pub fn parse(
        title: String,
        description: String,
        max_students: Option<String>,
        cost: Option<String>,
    ) -> Result<NewCourse, ValidationErrors> {
        match (
            CourseTitle::parse(title),
            CourseDescription::parse(description),
            NonNegative::parse_or_zero(max_students, "Max students"),
            NonNegative::parse_or_zero(cost, "Cost"),
        ) {
            (Ok(title), Ok(description), Ok(max_students), Ok(cost)) => {
                Ok(Self {
                    title,
                    description,
                    max_students,
                    cost,
                })
            }
            (title, description, max_students, cost) => Err([
                title.err(),
                description.err(),
                max_students.err(),
                cost.err(),
            ]
            .into_iter()
            .collect()),
        }
    }
}
