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

//! Provides the [Emulator] backend that runs the forum contracts in memory.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::{json, Value};

use chainforum_core::{Address, Timestamp};

use crate::backend::Backend;
use crate::error::Error;

/// [Backend] implementation that emulates the member and post manager contracts in memory.
///
/// Payloads are produced in exactly the raw shapes the deployed contracts return, so everything
/// downstream of the backend behaves as it would against a real chain.
///
/// # Differences from the deployed contracts
///
/// * Reads resolve immediately unless a gate installed with [Emulator::hold_member_info] keeps
///   them in flight.
/// * Reads only fail when a failure has been injected with one of the `fail_next_*` methods.
///
/// Cloning shares the underlying contract state.
#[derive(Clone)]
pub struct Emulator {
    state: Arc<Mutex<EmulatorState>>,
}

/// Mutable state of the emulator.
struct EmulatorState {
    admin: Address,
    /// Raw directory entries, in registration order. Not guaranteed to be valid addresses since
    /// tests may inject malformed entries.
    directory: Vec<Value>,
    members: HashMap<Address, MemberEntry>,
    posts: Vec<PostEntry>,

    fail_next_admin: usize,
    fail_next_members: usize,
    fail_next_member_info: HashMap<Address, usize>,
    corrupt_next_member_info: HashSet<Address>,
    all_members_calls: usize,
    member_info_calls: HashMap<Address, usize>,
    member_info_calls_total: usize,
    held: HashSet<Address>,
    gates: HashMap<Address, Vec<oneshot::Sender<()>>>,
}

struct MemberEntry {
    is_registered: bool,
    post_count: u64,
    /// Stored as the raw contract encoding so tests can seed out-of-range levels.
    level: String,
    joined_at: Timestamp,
    name: String,
}

struct PostEntry {
    id: u64,
    author: Address,
    content: String,
    created_at: Timestamp,
}

impl Emulator {
    pub fn new(admin: Address) -> Self {
        Emulator {
            state: Arc::new(Mutex::new(EmulatorState {
                admin,
                directory: Vec::new(),
                members: HashMap::new(),
                posts: Vec::new(),
                fail_next_admin: 0,
                fail_next_members: 0,
                fail_next_member_info: HashMap::new(),
                corrupt_next_member_info: HashSet::new(),
                all_members_calls: 0,
                member_info_calls: HashMap::new(),
                member_info_calls_total: 0,
                held: HashSet::new(),
                gates: HashMap::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<EmulatorState> {
        self.state.lock().unwrap()
    }

    pub fn admin_address(&self) -> Address {
        self.lock().admin.clone()
    }

    /// Register a member and append it to the directory.
    ///
    /// `level` takes the raw contract encoding so out-of-range values can be seeded; `name` is
    /// the on-chain display name, empty when the member never set one.
    pub fn register_member(
        &self,
        address: &Address,
        level: &str,
        post_count: u64,
        joined_at: Timestamp,
        name: &str,
    ) {
        let mut state = self.lock();
        state.directory.push(json!(address.as_str()));
        state.members.insert(
            address.clone(),
            MemberEntry {
                is_registered: true,
                post_count,
                level: level.to_string(),
                joined_at,
                name: name.to_string(),
            },
        );
    }

    /// Remove a member from both the directory and the detail store.
    pub fn remove_member(&self, address: &Address) {
        let mut state = self.lock();
        state
            .directory
            .retain(|entry| entry.as_str() != Some(address.as_str()));
        state.members.remove(address);
    }

    /// Append a raw entry to the directory without registering a member. Used to emulate
    /// malformed directory data.
    pub fn push_raw_directory_entry(&self, entry: Value) {
        self.lock().directory.push(entry);
    }

    /// Store a post and return its id.
    pub fn create_post(&self, author: &Address, content: &str, created_at: Timestamp) -> u64 {
        let mut state = self.lock();
        let id = state.posts.len() as u64 + 1;
        state.posts.push(PostEntry {
            id,
            author: author.clone(),
            content: content.to_string(),
            created_at,
        });
        id
    }

    /// Make the next administrator read fail.
    pub fn fail_next_admin(&self) {
        self.lock().fail_next_admin += 1;
    }

    /// Make the next directory read fail.
    pub fn fail_next_members(&self) {
        self.lock().fail_next_members += 1;
    }

    /// Make the next detail read for `address` fail.
    pub fn fail_next_member_info(&self, address: &Address) {
        *self
            .lock()
            .fail_next_member_info
            .entry(address.clone())
            .or_insert(0) += 1;
    }

    /// Make the next detail read for `address` resolve with a structurally invalid payload.
    pub fn corrupt_next_member_info(&self, address: &Address) {
        self.lock().corrupt_next_member_info.insert(address.clone());
    }

    /// Number of directory reads issued so far.
    pub fn all_members_calls(&self) -> usize {
        self.lock().all_members_calls
    }

    /// Number of detail reads issued for `address` so far.
    pub fn member_info_calls(&self, address: &Address) -> usize {
        self.lock()
            .member_info_calls
            .get(address)
            .copied()
            .unwrap_or(0)
    }

    /// Number of detail reads issued in total.
    pub fn member_info_calls_total(&self) -> usize {
        self.lock().member_info_calls_total
    }

    /// Keep detail reads for `address` in flight until [Emulator::release_member_info] is
    /// called. The reads are still counted when they are issued.
    pub fn hold_member_info(&self, address: &Address) {
        self.lock().held.insert(address.clone());
    }

    /// Release every detail read held for `address` and stop holding new ones.
    pub fn release_member_info(&self, address: &Address) {
        let mut state = self.lock();
        state.held.remove(address);
        for gate in state.gates.remove(address).unwrap_or_default() {
            let _ = gate.send(());
        }
    }
}

fn consume(counter: &mut usize) -> bool {
    if *counter > 0 {
        *counter -= 1;
        true
    } else {
        false
    }
}

#[async_trait]
impl Backend for Emulator {
    async fn admin(&self) -> Result<Value, Error> {
        let mut state = self.lock();
        if consume(&mut state.fail_next_admin) {
            return Err(Error::Fetch("injected administrator read failure".into()));
        }
        Ok(json!(state.admin.as_str()))
    }

    async fn all_members(&self) -> Result<Value, Error> {
        let mut state = self.lock();
        state.all_members_calls += 1;
        if consume(&mut state.fail_next_members) {
            return Err(Error::Fetch("injected directory read failure".into()));
        }
        Ok(Value::Array(state.directory.clone()))
    }

    async fn member_info(&self, address: &Address) -> Result<Value, Error> {
        let gate = {
            let mut state = self.lock();
            *state
                .member_info_calls
                .entry(address.clone())
                .or_insert(0) += 1;
            state.member_info_calls_total += 1;
            if state.held.contains(address) {
                let (sender, receiver) = oneshot::channel();
                state.gates.entry(address.clone()).or_default().push(sender);
                Some(receiver)
            } else {
                None
            }
        };
        if let Some(receiver) = gate {
            let _ = receiver.await;
        }

        let mut state = self.lock();
        if let Some(counter) = state.fail_next_member_info.get_mut(address) {
            if consume(counter) {
                return Err(Error::Fetch(format!(
                    "injected detail read failure for {}",
                    address
                )));
            }
        }
        if state.corrupt_next_member_info.remove(address) {
            return Ok(json!(["corrupted"]));
        }
        match state.members.get(address) {
            Some(entry) => Ok(json!([
                entry.is_registered,
                entry.post_count,
                entry.level,
                entry.joined_at,
                entry.name
            ])),
            // The contract returns the zero value for unknown addresses.
            None => Ok(json!([false, 0, "1", 0, ""])),
        }
    }

    async fn all_posts(&self) -> Result<Value, Error> {
        let state = self.lock();
        let ids: Vec<Value> = state.posts.iter().map(|post| json!(post.id)).collect();
        let authors: Vec<Value> = state
            .posts
            .iter()
            .map(|post| json!(post.author.as_str()))
            .collect();
        let contents: Vec<Value> = state
            .posts
            .iter()
            .map(|post| json!(post.content))
            .collect();
        let times: Vec<Value> = state
            .posts
            .iter()
            .map(|post| json!(post.created_at))
            .collect();
        Ok(json!([ids, authors, contents, times]))
    }

    async fn post_total(&self) -> Result<Value, Error> {
        Ok(json!(self.lock().posts.len() as u64))
    }
}
