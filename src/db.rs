use log::{debug, error, info, warn};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::error::DbError;
use crate::model::{NewStudent, Student};

pub async fn connect_with_retry(database_url: &str) -> Result<PgPool, DbError> {
    let mut retry_count = 0;
    const MAX_RETRIES: u32 = 5;
    const RETRY_DELAY_MS: u64 = 1000;

    loop {
        // One statement per invocation, so a single connection suffices.
        match PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!("Successfully connected to PostgreSQL database");
                return Ok(pool);
            }
            Err(e) => {
                retry_count += 1;
                if retry_count >= MAX_RETRIES {
                    error!("Failed to connect to database after {MAX_RETRIES} retries: {e}");
                    return Err(DbError::ConnectionError(e));
                }
                warn!("Database connection failed (attempt {retry_count}/{MAX_RETRIES}): {e}");
                info!("Retrying in {RETRY_DELAY_MS}ms...");
                tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
            }
        }
    }
}

/// Fetches every student row, ordered ascending by id. Unbounded.
pub async fn list_students(pool: &PgPool) -> Result<Vec<Student>, DbError> {
    debug!("Fetching all student records");
    let students = sqlx::query_as::<_, Student>(
        "SELECT student_id, first_name, last_name, email, enrollment_date
         FROM students
         ORDER BY student_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(students)
}

/// Inserts a student and returns the database-generated id.
pub async fn insert_student(pool: &PgPool, student: &NewStudent) -> Result<i32, DbError> {
    debug!("Inserting student record for {}", student.email);
    let new_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO students (first_name, last_name, email, enrollment_date)
         VALUES ($1, $2, $3, $4)
         RETURNING student_id",
    )
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(&student.email)
    .bind(student.enrollment_date)
    .fetch_one(pool)
    .await?;
    Ok(new_id)
}

/// Updates the email for the given id, returning the number of rows
/// matched (0 when no such student exists).
pub async fn update_student_email(
    pool: &PgPool,
    student_id: i32,
    new_email: &str,
) -> Result<u64, DbError> {
    debug!("Updating email for student_id={student_id}");
    let result = sqlx::query("UPDATE students SET email = $1 WHERE student_id = $2")
        .bind(new_email)
        .bind(student_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Deletes the row for the given id, returning the number of rows
/// matched.
pub async fn delete_student(pool: &PgPool, student_id: i32) -> Result<u64, DbError> {
    debug!("Deleting student_id={student_id}");
    let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
        .bind(student_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
