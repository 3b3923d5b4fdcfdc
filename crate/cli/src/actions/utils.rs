use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use zeroize::Zeroizing;

use crate::{
    config::CliConf,
    error::{
        CliError,
        result::{CliResult, CliResultHelper},
    },
};

/// Read the whole content of a file
pub(crate) fn read_bytes_from_file(file: &impl AsRef<Path>) -> CliResult<Vec<u8>> {
    let mut buffer = Vec::new();
    File::open(file)
        .with_context(|| format!("could not open the file {}", file.as_ref().display()))?
        .read_to_end(&mut buffer)
        .with_context(|| format!("could not read the file {}", file.as_ref().display()))?;

    Ok(buffer)
}

/// Read a PEM key from the file given on the command line or, failing that,
/// from the configuration.
pub(crate) fn read_pem(
    file: Option<&PathBuf>,
    conf_file: Option<&PathBuf>,
    what: &str,
) -> CliResult<String> {
    let file = file.or(conf_file).ok_or_else(|| {
        CliError::UserError(format!(
            "no {what} file: use the command line option or set it in the configuration"
        ))
    })?;
    Ok(String::from_utf8(read_bytes_from_file(file)?)?)
}

/// The session key given on the command line or in the configuration.
pub(crate) fn session_key(
    session_key: Option<&String>,
    conf: &CliConf,
) -> CliResult<Zeroizing<String>> {
    session_key
        .or(conf.session_key.as_ref())
        .filter(|key| !key.is_empty())
        .map(|key| Zeroizing::new(key.clone()))
        .ok_or_else(|| {
            CliError::UserError(
                "no session key: use `--session-key` or set `session_key` in the configuration"
                    .to_owned(),
            )
        })
}

/// The payload to encrypt, from a file or inline.
pub(crate) fn read_payload(
    input_file: Option<&PathBuf>,
    data: Option<&String>,
) -> CliResult<Vec<u8>> {
    match (input_file, data) {
        (Some(file), _) => read_bytes_from_file(file),
        (None, Some(data)) => Ok(data.as_bytes().to_vec()),
        (None, None) => Err(CliError::UserError(
            "either a FILE or `--data` must be specified".to_owned(),
        )),
    }
}

#[expect(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{read_payload, read_pem, session_key};
    use crate::{config::CliConf, error::CliError};

    #[test]
    fn test_command_line_wins_over_configuration() {
        let conf = CliConf {
            session_key: Some("from-conf".to_owned()),
            ..CliConf::default()
        };
        let flag = "from-flag".to_owned();
        assert_eq!(session_key(Some(&flag), &conf).unwrap().as_str(), "from-flag");
        assert_eq!(session_key(None, &conf).unwrap().as_str(), "from-conf");

        let err = session_key(None, &CliConf::default()).unwrap_err();
        assert!(matches!(err, CliError::UserError(_)));
    }

    #[test]
    fn test_read_pem_and_payload() {
        let tmp_dir = TempDir::new().unwrap();
        let pem = tmp_dir.path().join("key.pem");
        fs::write(&pem, "-----BEGIN PUBLIC KEY-----").unwrap();

        assert_eq!(
            read_pem(None, Some(&pem), "public key").unwrap(),
            "-----BEGIN PUBLIC KEY-----"
        );
        let err = read_pem(None, None, "public key").unwrap_err();
        assert!(err.to_string().contains("no public key file"));

        assert_eq!(read_payload(Some(&pem), None).unwrap().len(), 26);
        let data = "inline".to_owned();
        assert_eq!(read_payload(None, Some(&data)).unwrap(), b"inline");
        read_payload(None, None).unwrap_err();
    }
}
