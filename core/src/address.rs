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

//! `Address` is the identifier for every account the forum contracts know about: the connected
//! wallet, the contract administrator and each member directory entry.

use std::convert::TryFrom;

/// A wallet address: `0x` followed by exactly 40 hexadecimal characters.
///
/// Addresses are normalized to lowercase on construction so that two addresses differing only in
/// hex digit case compare equal. Directory entries that do not pass this validation are dropped
/// before any contract call is made with them.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String")]
pub struct Address(String);

impl Address {
    fn from_string(input: String) -> Result<Self, InvalidAddressError> {
        if !input.starts_with("0x") {
            return Err(InvalidAddressError("must start with 0x"));
        }
        if input.len() != 42 {
            return Err(InvalidAddressError("must be 42 characters long"));
        }
        if !input[2..].chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidAddressError(
                "must only include hexadecimal characters after 0x",
            ));
        }

        Ok(Self(input.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form used in journal lines and member tables: `0x1234...cdef`.
    pub fn shortened(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[38..])
    }
}

impl From<Address> for String {
    fn from(address: Address) -> String {
        address.0
    }
}

impl TryFrom<String> for Address {
    type Error = InvalidAddressError;

    fn try_from(input: String) -> Result<Self, Self::Error> {
        Self::from_string(input)
    }
}

impl TryFrom<&str> for Address {
    type Error = InvalidAddressError;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        Self::from_string(input.into())
    }
}

impl std::str::FromStr for Address {
    type Err = InvalidAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s.to_string())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type when address validation fails.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid address: {0}")]
pub struct InvalidAddressError(&'static str);

impl InvalidAddressError {
    /// Error description
    pub fn what(&self) -> &'static str {
        self.0
    }
}
