// Chain Forum
// Copyright (C) 2026 Chain Forum Developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use serde_json::Value;

/// Error that may be returned by any of the [crate::ClientT] methods
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Decoding the received data failed
    #[error("decoding the received data failed: {0}")]
    BadPayload(#[from] PayloadError),
    /// The underlying contract read failed
    #[error("contract read failed: {0}")]
    Fetch(String),
    /// Other error
    #[error("other error: {0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Other(error)
    }
}

impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error::Other(error.into())
    }
}

/// A resolved response failed a structural check.
///
/// Carries the offending payload rendered as JSON so the journal shows what the contract
/// actually returned. Treated like any fetch error for retry purposes.
#[derive(Clone, Debug, thiserror::Error)]
#[error("unexpected shape for {query} payload: {payload}")]
pub struct PayloadError {
    /// Name of the contract read that produced the payload.
    pub query: &'static str,
    /// The malformed payload, rendered as JSON.
    pub payload: String,
}

impl PayloadError {
    pub fn new(query: &'static str, payload: &Value) -> Self {
        PayloadError {
            query,
            payload: payload.to_string(),
        }
    }
}
