use sqlx::PgPool;

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS teachers (
        teacher_id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        surname TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        portfolio TEXT,
        password TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS icons (
        icon_id SERIAL PRIMARY KEY,
        icon_name TEXT NOT NULL UNIQUE,
        link TEXT
    )",
    "CREATE TABLE IF NOT EXISTS courses (
        course_id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        teacher_id INTEGER NOT NULL REFERENCES teachers (teacher_id),
        icon_id INTEGER REFERENCES icons (icon_id)
    )",
    "CREATE TABLE IF NOT EXISTS subjects (
        subject_id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        course_id INTEGER NOT NULL REFERENCES courses (course_id)
    )",
    "CREATE TABLE IF NOT EXISTS classes (
        class_id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        subject_id INTEGER NOT NULL REFERENCES subjects (subject_id),
        teacher_id INTEGER NOT NULL REFERENCES teachers (teacher_id),
        class_time TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS students (
        student_id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        surname TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        birthday TEXT NOT NULL
    )",
];

/// Creates every table if it does not already exist. Runs once at startup;
/// there is no migration mechanism beyond this.
pub async fn create_tables(pg: &PgPool) -> Result<(), sqlx::Error> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pg).await?;
    }
    Ok(())
}
