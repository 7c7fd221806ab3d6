//! CLI module for Fresh Grad Jobs
//!
//! - `serve`: run the HTTP API
//! - `hash-password`: print an Argon2 hash for seeding the users table

pub mod hash_password;
pub mod serve;

use clap::{Parser, Subcommand};

/// Fresh Grad Jobs API server
#[derive(Parser)]
#[command(name = "fresh-grad-jobs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server (default)
    Serve,

    /// Hash a password for insertion into the users table
    HashPassword(hash_password::HashPasswordArgs),
}
