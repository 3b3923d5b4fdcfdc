use std::process;

use secure_session_cli::ssession_main;

fn main() {
    if let Some(err) = ssession_main().err() {
        eprintln!("ERROR: {err}");
        process::exit(1);
    }
}
