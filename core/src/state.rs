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

//! Type definitions for the entities read from the forum contracts.

use crate::{Address, Level, PostId, Timestamp};

/// Extended member attributes resolved by a single detail query against the member manager.
///
/// # Invariants
///
/// * `level` is always within `1..=5`; out-of-range contract values are clamped when the raw
///   payload is decoded.
/// * `display_name` is [None] when the member never set a name (empty string on chain).
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MemberInfo {
    pub is_registered: bool,
    pub post_count: u64,
    pub level: Level,
    /// Registration time.
    pub joined_at: Timestamp,
    pub display_name: Option<String>,
}

/// A member directory entry joined with its resolved [MemberInfo].
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Member {
    pub address: Address,
    pub is_registered: bool,
    pub post_count: u64,
    pub level: Level,
    /// Registration time.
    pub joined_at: Timestamp,
    pub display_name: Option<String>,
}

impl Member {
    pub fn new(address: Address, info: MemberInfo) -> Self {
        Member {
            address,
            is_registered: info.is_registered,
            post_count: info.post_count,
            level: info.level,
            joined_at: info.joined_at,
            display_name: info.display_name,
        }
    }
}

/// A forum post as stored by the post manager contract.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Post {
    pub id: PostId,
    pub author: Address,
    pub content: String,
    /// Publication time.
    pub created_at: Timestamp,
}
