use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secure_session_logger::{debug, log_init, trace};

use crate::{
    actions::{
        DecryptAction, EncryptAction, IvAction, SessionKeyAction, UnwrapAction, WrapAction,
    },
    config::CliConf,
    error::result::CliResult,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file location
    ///
    /// This is an alternative to the env variable `SECURE_SESSION_CONF`.
    /// Takes precedence over `SECURE_SESSION_CONF` env variable.
    #[arg(short, long)]
    conf: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommands,
}

#[derive(Subcommand)]
pub enum CliCommands {
    SessionKey(SessionKeyAction),
    Iv(IvAction),
    Wrap(WrapAction),
    Unwrap(UnwrapAction),
    Encrypt(EncryptAction),
    Decrypt(DecryptAction),
}

/// Main function of the `ssession` CLI.
///
/// # Errors
///
/// This function will return an error if:
/// - The configuration file cannot be read or parsed.
/// - A key, a payload or an output file cannot be read or written.
/// - The requested cryptographic operation fails.
pub fn ssession_main() -> CliResult<()> {
    let cli = Cli::parse();

    let conf_path = CliConf::location(cli.conf);
    let conf = CliConf::load(conf_path.as_deref())?;
    log_init(conf.log_level.as_deref());
    debug!("Starting the secure session CLI");
    trace!("Configuration: {conf:?}");

    match cli.command {
        CliCommands::SessionKey(action) => action.run(),
        CliCommands::Iv(action) => action.run(),
        CliCommands::Wrap(action) => action.run(&conf),
        CliCommands::Unwrap(action) => action.run(&conf),
        CliCommands::Encrypt(action) => action.run(&conf),
        CliCommands::Decrypt(action) => action.run(&conf),
    }
}
