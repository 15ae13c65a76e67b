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

//! Read-only clients for the Chain Forum contracts.
//!
//! This crate provides [Client], a typed reader for the member and post manager contracts that
//! validates every raw payload at the [Backend] boundary, and [Emulator], a backend that runs
//! the contracts in memory. The emulator is useful for developing and testing.
//!
//! On top of the client sits [AdminLoader], the pipeline behind the member management view: it
//! gates the member directory behind the administrator check, fans out one detail query per
//! directory entry and aggregates their completion into observable state.

pub use chainforum_core::*;

mod backend;
pub mod decode;
mod error;
mod interface;
mod loader;

pub use crate::backend::{Backend, Emulator};
pub use crate::decode::Directory;
pub use crate::error::{Error, PayloadError};
pub use crate::interface::{Client, ClientT};
pub use crate::loader::{Access, AdminLoader, DetailStatus, Session, Stage};
