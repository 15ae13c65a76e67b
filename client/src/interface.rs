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

//! Provide the typed read interface over a raw [Backend].
//!
//! The [ClientT] trait defines one method for each contract read the forum pages need. [Client]
//! implements it by fetching the raw payload from its backend and running it through
//! [crate::decode].

use std::sync::Arc;

use async_trait::async_trait;

use chainforum_core::{Address, MemberInfo, Post};

use crate::backend::{Backend, Emulator};
use crate::decode::{self, Directory};
use crate::error::Error;

/// Trait for typed, validated reads of the forum contract state.
#[async_trait]
pub trait ClientT: Send + Sync {
    /// Fetch the administrator of the member manager contract.
    async fn admin(&self) -> Result<Address, Error>;

    /// Fetch the member directory, filtered to syntactically valid addresses.
    async fn member_directory(&self) -> Result<Directory, Error>;

    /// Fetch the extended attributes of one member.
    ///
    /// The member manager returns the zero value for addresses it has never seen; callers decide
    /// what an unregistered result means for them.
    async fn member_info(&self, address: &Address) -> Result<MemberInfo, Error>;

    /// Fetch all posts stored by the post manager.
    async fn all_posts(&self) -> Result<Vec<Post>, Error>;

    /// Fetch the total number of posts ever created.
    async fn post_total(&self) -> Result<u64, Error>;
}

/// [ClientT] implementation that validates every payload read from a [Backend].
#[derive(Clone)]
pub struct Client {
    backend: Arc<dyn Backend>,
}

impl Client {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Client { backend }
    }

    /// Create a client running against an in-memory [Emulator] with the given administrator.
    ///
    /// Returns the emulator alongside the client so tests can seed contract state and inject
    /// failures.
    pub fn new_emulator(admin: Address) -> (Self, Emulator) {
        let emulator = Emulator::new(admin);
        (Client::new(Arc::new(emulator.clone())), emulator)
    }
}

#[async_trait]
impl ClientT for Client {
    async fn admin(&self) -> Result<Address, Error> {
        let value = self.backend.admin().await?;
        Ok(decode::admin(&value)?)
    }

    async fn member_directory(&self) -> Result<Directory, Error> {
        let value = self.backend.all_members().await?;
        Ok(decode::directory(&value)?)
    }

    async fn member_info(&self, address: &Address) -> Result<MemberInfo, Error> {
        let value = self.backend.member_info(address).await?;
        Ok(decode::member_info(&value)?)
    }

    async fn all_posts(&self) -> Result<Vec<Post>, Error> {
        let value = self.backend.all_posts().await?;
        Ok(decode::posts(&value)?)
    }

    async fn post_total(&self) -> Result<u64, Error> {
        let value = self.backend.post_total().await?;
        Ok(decode::post_total(&value)?)
    }
}
