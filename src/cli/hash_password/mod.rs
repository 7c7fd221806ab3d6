//! Hash-password command - prints an Argon2id hash to stdout

use clap::Args;

use crate::infrastructure::auth::{Argon2Hasher, PasswordHasher};

#[derive(Args, Debug)]
pub struct HashPasswordArgs {
    /// Plain-text password to hash
    pub password: String,
}

pub fn run(args: HashPasswordArgs) -> anyhow::Result<()> {
    let hash = Argon2Hasher::new().hash(&args.password)?;
    println!("{}", hash);

    Ok(())
}
