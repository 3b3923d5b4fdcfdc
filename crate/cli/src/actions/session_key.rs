use clap::Parser;
use secure_session_crypto::crypto::session_key::generate_session_key;

use crate::error::result::CliResult;

/// Generate a fresh 24-byte session key and print it base64 encoded.
#[derive(Parser, Debug)]
pub struct SessionKeyAction {}

impl SessionKeyAction {
    pub fn run(&self) -> CliResult<()> {
        println!("{}", generate_session_key());
        Ok(())
    }
}
