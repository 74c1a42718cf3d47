//! Loading the API credential from disk.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Reads the whole credential file.
///
/// The contents are returned untouched.  A missing file is reported as
/// [`Error::CredentialNotFound`] so callers can fail before any request is
/// made.
pub fn load_credential(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::credential_not_found(path));
    }
    fs::read_to_string(path).map_err(|err| {
        Error::io(
            format!("failed to read credential file {}", path.display()),
            err,
        )
    })
}
