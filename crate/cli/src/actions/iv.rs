use clap::Parser;
use secure_session_crypto::crypto::{encoding::b64_encode, session_key::generate_iv};

use crate::error::result::CliResult;

/// Generate a fresh 16-byte initialization vector and print it base64 encoded.
///
/// Never encrypt twice with the same IV under the same session key.
#[derive(Parser, Debug)]
#[clap(verbatim_doc_comment)]
pub struct IvAction {}

impl IvAction {
    pub fn run(&self) -> CliResult<()> {
        println!("{}", b64_encode(&generate_iv()));
        Ok(())
    }
}
