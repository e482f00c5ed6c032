//! Interactive password prompt via dialoguer.
//!
//! Used only when `--password` is not given on the command line; input is
//! hidden and never logged.

use anyhow::{Context, Result};
use dialoguer::Password;

/// Prompt for `user`'s bastion password on the terminal.
pub fn password(user: &str) -> Result<String> {
    Password::new()
        .with_prompt(format!("{user}'s password"))
        .interact()
        .context("failed to read password")
}
