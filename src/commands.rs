use log::info;
use sqlx::PgPool;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::db;
use crate::error::DbError;
use crate::model::{self, NewStudent, Student};

/// Connects, runs the selected operation, and releases the connection.
///
/// Recoverable database failures are printed by the operation itself and
/// terminate the process normally. Connection failures and local input
/// validation failures propagate out of here uncaught.
pub async fn run(cli: Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Connecting to {}", config.redacted_url());
    let pool = db::connect_with_retry(&config.database_url()).await?;

    // The pool is scoped to this one operation: close it on every exit
    // path before surfacing an uncontained error.
    let outcome = dispatch(cli.command, &pool).await;
    pool.close().await;
    outcome?;
    Ok(())
}

async fn dispatch(command: Command, pool: &PgPool) -> Result<(), DbError> {
    match command {
        Command::GetAll { json } => get_all(pool, json).await,
        Command::Add {
            first,
            last,
            email,
            date,
        } => add(pool, first, last, email, &date).await,
        Command::UpdateEmail { id, email } => update_email(pool, id, &email).await,
        Command::Delete { id } => delete(pool, id).await,
    }
}

async fn get_all(pool: &PgPool, json: bool) -> Result<(), DbError> {
    let students = db::list_students(pool).await?;
    if json {
        println!("{}", render_json(&students));
        return Ok(());
    }
    if students.is_empty() {
        println!("No students found.");
        return Ok(());
    }
    print!("{}", render_table(&students));
    Ok(())
}

async fn add(
    pool: &PgPool,
    first: String,
    last: String,
    email: String,
    date: &str,
) -> Result<(), DbError> {
    // Validated locally; a malformed date never reaches the database.
    let enrollment_date = model::parse_enrollment_date(date)?;
    let student = NewStudent {
        first_name: first,
        last_name: last,
        email,
        enrollment_date,
    };
    match db::insert_student(pool, &student).await {
        Ok(new_id) => println!("Inserted student_id={new_id}"),
        Err(DbError::UniqueViolation) => {
            println!("Error: email must be unique. That email already exists.")
        }
        Err(e) => println!("Insert failed: {e}"),
    }
    Ok(())
}

async fn update_email(pool: &PgPool, id: i32, email: &str) -> Result<(), DbError> {
    match db::update_student_email(pool, id, email).await {
        Ok(0) => println!("No student found with id {id}."),
        Ok(_) => println!("Updated student_id={id} email -> {email}"),
        Err(DbError::UniqueViolation) => {
            println!("Error: email must be unique. That email already exists.")
        }
        Err(e) => println!("Update failed: {e}"),
    }
    Ok(())
}

async fn delete(pool: &PgPool, id: i32) -> Result<(), DbError> {
    match db::delete_student(pool, id).await {
        Ok(0) => println!("No student found with id {id}."),
        Ok(_) => println!("Deleted student_id={id}"),
        Err(e) => println!("Delete failed: {e}"),
    }
    Ok(())
}

fn render_table(students: &[Student]) -> String {
    let mut out = String::new();
    out.push_str(
        "student_id | first_name | last_name | email                     | enrollment_date\n",
    );
    out.push_str(
        "-----------+------------+-----------+---------------------------+----------------\n",
    );
    for s in students {
        let date_str = s
            .enrollment_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{:>10} | {:<10} | {:<9} | {:<25} | {}\n",
            s.student_id, s.first_name, s.last_name, s.email, date_str
        ));
    }
    out
}

fn render_json(students: &[Student]) -> String {
    serde_json::to_string_pretty(students)
        .unwrap_or_else(|_| "Error formatting results".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_students() -> Vec<Student> {
        vec![
            Student {
                student_id: 1,
                first_name: "Alice".into(),
                last_name: "Wong".into(),
                email: "alice@example.com".into(),
                enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1),
            },
            Student {
                student_id: 2,
                first_name: "Bo".into(),
                last_name: "Li".into(),
                email: "bo@example.com".into(),
                enrollment_date: None,
            },
        ]
    }

    #[test]
    fn test_render_table_alignment() {
        let rendered = render_table(&sample_students());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "student_id | first_name | last_name | email                     | enrollment_date"
        );
        assert_eq!(
            lines[1],
            "-----------+------------+-----------+---------------------------+----------------"
        );
        assert_eq!(
            lines[2],
            "         1 | Alice      | Wong      | alice@example.com         | 2024-09-01"
        );
        // Unset enrollment dates render as an empty string.
        assert_eq!(
            lines[3],
            "         2 | Bo         | Li        | bo@example.com            | "
        );
    }

    #[test]
    fn test_render_json() {
        let rendered = render_json(&sample_students());
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "student_id": 1,
                    "first_name": "Alice",
                    "last_name": "Wong",
                    "email": "alice@example.com",
                    "enrollment_date": "2024-09-01"
                },
                {
                    "student_id": 2,
                    "first_name": "Bo",
                    "last_name": "Li",
                    "email": "bo@example.com",
                    "enrollment_date": null
                }
            ])
        );
    }

    #[test]
    fn test_render_json_empty() {
        assert_eq!(render_json(&[]), "[]");
    }
}
