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

//! Define the trait for contract read backends and provide the in-memory emulator.

use async_trait::async_trait;
use serde_json::Value;

use chainforum_core::Address;

use crate::error::Error;

mod emulator;

pub use emulator::Emulator;

/// Backend for raw reads against the deployed member and post manager contracts.
///
/// The interface is low-level: responses come back in the loosely-typed shapes the contracts
/// produce and must pass through [crate::decode] before they reach typed code. Backends perform
/// reads only; everything that requires transaction signing lives outside this library.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Administrator of the member manager contract. A JSON string.
    async fn admin(&self) -> Result<Value, Error>;

    /// The raw member directory. A JSON array whose entries are not guaranteed to be valid
    /// addresses.
    async fn all_members(&self) -> Result<Value, Error>;

    /// Extended attributes of one member. A 5-element JSON array in contract field order:
    /// registration flag, post count, level string, join time, display name.
    async fn member_info(&self, address: &Address) -> Result<Value, Error>;

    /// All posts, as four parallel column arrays: ids, authors, contents, creation times.
    async fn all_posts(&self) -> Result<Value, Error>;

    /// Total number of posts ever created. A JSON number.
    async fn post_total(&self) -> Result<Value, Error>;
}
