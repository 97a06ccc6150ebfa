use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use sqlx::PgPool;

use crate::err::Error;
use crate::models::{Class, ClassInput, Course, CourseInput, CourseWithIcon, Icon, Teacher};
use crate::Payload;

// Icon columns are aliased so they never collide with the course's own
// `icon_id` when `CourseWithIcon` reads the joined row.
const SELECT_COURSES_WITH_ICONS: &str =
    "SELECT c.course_id, c.title, c.description, c.teacher_id, c.icon_id, \
            i.icon_id AS icon_icon_id, i.icon_name AS icon_icon_name, i.link AS icon_link \
     FROM courses c LEFT JOIN icons i ON i.icon_id = c.icon_id";

pub async fn get_courses(Extension(pg): Extension<PgPool>) -> Payload<Json<Vec<CourseWithIcon>>> {
    let courses = sqlx::query_as::<_, CourseWithIcon>(SELECT_COURSES_WITH_ICONS)
        .fetch_all(&pg)
        .await?;
    Ok(Json(courses))
}

pub async fn create_course(
    Json(body): Json<CourseInput>,
    Extension(pg): Extension<PgPool>,
) -> Payload<(StatusCode, Json<CourseWithIcon>)> {
    let input = body.validate().map_err(|errors| {
        log::error!("ValidationError: {:?}", errors);
        Error::from(errors)
    })?;

    let teacher = sqlx::query_as::<_, Teacher>(
        "SELECT * FROM teachers WHERE teacher_id = $1 LIMIT 1",
    )
    .bind(input.teacher_id)
    .fetch_optional(&pg)
    .await?;
    if teacher.is_none() {
        return Err(Error::not_found("Teacher not found"));
    }

    let mut icon = None;
    if let Some(icon_id) = input.icon_id {
        icon = match sqlx::query_as::<_, Icon>("SELECT * FROM icons WHERE icon_id = $1 LIMIT 1")
            .bind(icon_id)
            .fetch_optional(&pg)
            .await?
        {
            Some(icon) => Some(icon),
            None => return Err(Error::bad_request("Icon with given ID does not exist")),
        };
    }

    let course = sqlx::query_as::<_, Course>(
        "INSERT INTO courses (title, description, teacher_id, icon_id) \
         VALUES ($1, $2, $3, $4) \
         RETURNING course_id, title, description, teacher_id, icon_id",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.teacher_id)
    .bind(input.icon_id)
    .fetch_one(&pg)
    .await?;

    Ok((StatusCode::CREATED, Json(CourseWithIcon { course, icon })))
}

pub async fn create_class(
    Json(body): Json<ClassInput>,
    Extension(pg): Extension<PgPool>,
) -> Payload<(StatusCode, Json<Class>)> {
    let input = body.validate()?;

    // No existence checks against subjects/teachers here; an invalid id
    // surfaces as a foreign key violation, translated to 400 in err.rs.
    let class = sqlx::query_as::<_, Class>(
        "INSERT INTO classes (title, subject_id, teacher_id, class_time) \
         VALUES ($1, $2, $3, $4) \
         RETURNING class_id, title, subject_id, teacher_id, class_time",
    )
    .bind(&input.title)
    .bind(input.subject_id)
    .bind(input.teacher_id)
    .bind(&input.class_time)
    .fetch_one(&pg)
    .await?;

    Ok((StatusCode::CREATED, Json(class)))
}

pub async fn get_icons(Extension(pg): Extension<PgPool>) -> Payload<Json<Vec<Icon>>> {
    let icons = sqlx::query_as::<_, Icon>("SELECT * FROM icons")
        .fetch_all(&pg)
        .await?;
    Ok(Json(icons))
}

pub async fn get_courses_by_teacher(
    Path(teacher_id): Path<i32>,
    Extension(pg): Extension<PgPool>,
) -> Payload<Json<Vec<Course>>> {
    let courses = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE teacher_id = $1")
        .bind(teacher_id)
        .fetch_all(&pg)
        .await?;
    Ok(Json(courses))
}
