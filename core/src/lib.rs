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

//! Basic types used in the Chain Forum.
//!
//! The forum's state lives in two externally deployed contracts, a member manager and a post
//! manager. This crate defines the validated primitive types the client reads that state into.

pub mod state;
pub use state::{Member, MemberInfo, Post};

mod address;
pub use address::{Address, InvalidAddressError};

mod level;
pub use level::{Level, LevelProgress};

/// Unix timestamp in seconds, as the contracts store time.
pub type Timestamp = u64;

/// Identifier of a post in the post manager contract.
pub type PostId = u64;
