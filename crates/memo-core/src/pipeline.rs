use std::io::Write;

use crate::error::{MaskedError, MemoError, Result};

/// Result of one toolbox step: the bytes for the next step, or the error
/// the front end should report.
#[derive(Debug)]
pub struct Pipeline {
    result: std::result::Result<Vec<u8>, MaskedError>,
}

impl Pipeline {
    pub fn ok(bytes: Vec<u8>) -> Self {
        Self { result: Ok(bytes) }
    }

    pub fn fail(error: MemoError) -> Self {
        Self {
            result: Err(MaskedError::new(error)),
        }
    }

    pub fn error(&self) -> Option<&MaskedError> {
        self.result.as_ref().err()
    }

    pub fn into_result(self) -> std::result::Result<Vec<u8>, MaskedError> {
        self.result
    }

    /// Copy the bytes to `out` followed by one newline. Writes nothing on error.
    pub fn emit<W: Write>(self, mut out: W) -> std::result::Result<(), MaskedError> {
        let bytes = self.result?;
        out.write_all(&bytes)
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush())
            .map_err(|e| MaskedError::new(MemoError::io("<output>", e)))
    }
}

impl From<Result<Vec<u8>>> for Pipeline {
    fn from(result: Result<Vec<u8>>) -> Self {
        match result {
            Ok(bytes) => Pipeline::ok(bytes),
            Err(e) => Pipeline::fail(e),
        }
    }
}
