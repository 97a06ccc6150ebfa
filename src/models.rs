use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::err::FieldError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Teacher {
    pub teacher_id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub portfolio: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Icon {
    pub icon_id: i32,
    pub icon_name: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Course {
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: i32,
    pub icon_id: Option<i32>,
}

/// A course together with its eagerly loaded icon. Serializes as the
/// course's scalar columns plus a nested `icon` object when one is linked.
#[derive(Debug, Clone, Serialize)]
pub struct CourseWithIcon {
    #[serde(flatten)]
    pub course: Course,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

// Built from the LEFT JOIN in `routes::get_courses`, which aliases the
// icon columns as `icon_icon_id`, `icon_icon_name` and `icon_link`.
impl<'r> FromRow<'r, PgRow> for CourseWithIcon {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let course = Course::from_row(row)?;
        let icon = match row.try_get::<Option<i32>, _>("icon_icon_id")? {
            Some(icon_id) => Some(Icon {
                icon_id,
                icon_name: row.try_get("icon_icon_name")?,
                link: row.try_get("icon_link")?,
            }),
            None => None,
        };
        Ok(CourseWithIcon { course, icon })
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subject {
    pub subject_id: i32,
    pub name: String,
    pub course_id: i32,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Class {
    pub class_id: i32,
    pub title: String,
    pub subject_id: i32,
    pub teacher_id: i32,
    pub class_time: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Student {
    pub student_id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub birthday: String,
}

/// Course creation payload. All fields are optional at the deserialization
/// layer so that `validate` can report every missing or out-of-constraint
/// field at once.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i32>,
    pub icon_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: i32,
    pub icon_id: Option<i32>,
}

impl CourseInput {
    pub fn validate(self) -> Result<NewCourse, Vec<FieldError>> {
        let mut errors = Vec::new();
        let title = required_string(self.title, "title", 100, &mut errors);
        let description = optional_string(self.description, "description", 255, &mut errors);
        let teacher_id = required_id(self.teacher_id, "teacher_id", &mut errors);
        let icon_id = optional_id(self.icon_id, "icon_id", &mut errors);

        match (title, teacher_id) {
            (Some(title), Some(teacher_id)) if errors.is_empty() => Ok(NewCourse {
                title,
                description,
                teacher_id,
                icon_id,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassInput {
    pub title: Option<String>,
    pub subject_id: Option<i32>,
    pub teacher_id: Option<i32>,
    pub class_time: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewClass {
    pub title: String,
    pub subject_id: i32,
    pub teacher_id: i32,
    pub class_time: String,
}

impl ClassInput {
    pub fn validate(self) -> Result<NewClass, Vec<FieldError>> {
        let mut errors = Vec::new();
        let title = required_string(self.title, "title", 100, &mut errors);
        let subject_id = required_id(self.subject_id, "subject_id", &mut errors);
        let teacher_id = required_id(self.teacher_id, "teacher_id", &mut errors);
        let class_time = match self.class_time {
            Some(value) => Some(value),
            None => {
                errors.push(FieldError::new("class_time", "field required"));
                None
            }
        };

        match (title, subject_id, teacher_id, class_time) {
            (Some(title), Some(subject_id), Some(teacher_id), Some(class_time))
                if errors.is_empty() =>
            {
                Ok(NewClass {
                    title,
                    subject_id,
                    teacher_id,
                    class_time,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required_string(
    value: Option<String>,
    field: &'static str,
    max_len: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(value) => checked_string(value, field, max_len, errors),
        None => {
            errors.push(FieldError::new(field, "field required"));
            None
        }
    }
}

fn optional_string(
    value: Option<String>,
    field: &'static str,
    max_len: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    value.and_then(|value| checked_string(value, field, max_len, errors))
}

fn checked_string(
    value: String,
    field: &'static str,
    max_len: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    if value.chars().count() > max_len {
        errors.push(FieldError::new(
            field,
            format!("ensure this value has at most {} characters", max_len),
        ));
        None
    } else {
        Some(value)
    }
}

fn required_id(
    value: Option<i32>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<i32> {
    match value {
        Some(value) => checked_id(value, field, errors),
        None => {
            errors.push(FieldError::new(field, "field required"));
            None
        }
    }
}

fn optional_id(
    value: Option<i32>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<i32> {
    value.and_then(|value| checked_id(value, field, errors))
}

fn checked_id(value: i32, field: &'static str, errors: &mut Vec<FieldError>) -> Option<i32> {
    if value <= 0 {
        errors.push(FieldError::new(
            field,
            "ensure this value is greater than 0",
        ));
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course_input(body: serde_json::Value) -> CourseInput {
        serde_json::from_value(body).unwrap()
    }

    fn class_input(body: serde_json::Value) -> ClassInput {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn valid_course_input_passes() {
        let input = course_input(json!({
            "title": "Algebra I",
            "description": "Intro",
            "teacher_id": 1,
            "icon_id": null,
        }));
        let new_course = input.validate().unwrap();
        assert_eq!(new_course.title, "Algebra I");
        assert_eq!(new_course.description.as_deref(), Some("Intro"));
        assert_eq!(new_course.teacher_id, 1);
        assert_eq!(new_course.icon_id, None);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = course_input(json!({})).validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "teacher_id"]);
        assert!(errors.iter().all(|e| e.message == "field required"));
    }

    #[test]
    fn non_positive_teacher_id_is_rejected() {
        let errors = course_input(json!({"title": "Algebra I", "teacher_id": 0}))
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "teacher_id");
        assert_eq!(errors[0].message, "ensure this value is greater than 0");
    }

    #[test]
    fn overlong_title_and_description_are_rejected() {
        let errors = course_input(json!({
            "title": "t".repeat(101),
            "description": "d".repeat(256),
            "teacher_id": 1,
        }))
        .validate()
        .unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "description"]);
    }

    #[test]
    fn title_at_limit_is_accepted() {
        let input = course_input(json!({"title": "t".repeat(100), "teacher_id": 1}));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn negative_icon_id_is_rejected() {
        let errors = course_input(json!({"title": "Algebra I", "teacher_id": 1, "icon_id": -3}))
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "icon_id");
    }

    #[test]
    fn valid_class_input_passes() {
        let input = class_input(json!({
            "title": "Monday lecture",
            "subject_id": 2,
            "teacher_id": 1,
            "class_time": "Mon 10:00",
        }));
        let new_class = input.validate().unwrap();
        assert_eq!(new_class.class_time, "Mon 10:00");
        assert_eq!(new_class.subject_id, 2);
    }

    #[test]
    fn class_input_requires_class_time() {
        let errors = class_input(json!({"title": "X", "subject_id": 1, "teacher_id": 1}))
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "class_time");
    }

    #[test]
    fn course_without_icon_serializes_without_icon_key() {
        let record = CourseWithIcon {
            course: Course {
                course_id: 1,
                title: "Algebra I".to_string(),
                description: None,
                teacher_id: 1,
                icon_id: None,
            },
            icon: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "course_id": 1,
                "title": "Algebra I",
                "description": null,
                "teacher_id": 1,
                "icon_id": null,
            })
        );
    }

    #[test]
    fn course_with_icon_nests_the_icon() {
        let record = CourseWithIcon {
            course: Course {
                course_id: 7,
                title: "Geometry".to_string(),
                description: Some("Shapes".to_string()),
                teacher_id: 2,
                icon_id: Some(3),
            },
            icon: Some(Icon {
                icon_id: 3,
                icon_name: "triangle".to_string(),
                link: None,
            }),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["icon"]["icon_name"], "triangle");
        assert_eq!(value["icon"]["icon_id"], 3);
        assert_eq!(value["icon_id"], 3);
    }
}
