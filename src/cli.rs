use clap::{Parser, Subcommand};

/// Students CRUD client for PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "students-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all students
    GetAll {
        /// Print rows as a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a student
    Add {
        /// First name
        #[arg(long)]
        first: String,

        /// Last name
        #[arg(long)]
        last: String,

        /// Email address (must be unique)
        #[arg(long)]
        email: String,

        /// Enrollment date, YYYY-MM-DD (optional)
        #[arg(long, default_value = "")]
        date: String,
    },

    /// Update a student's email
    UpdateEmail {
        /// Student id
        #[arg(long)]
        id: i32,

        /// New email address
        #[arg(long)]
        email: String,
    },

    /// Delete a student by id
    Delete {
        /// Student id
        #[arg(long)]
        id: i32,
    },
}
