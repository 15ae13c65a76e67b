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

//! The authorization-gated loading pipeline behind the member management view.
//!
//! [AdminLoader] sequences three dependent reads: the administrator address, the member
//! directory, and one detail query per directory entry. The directory is only fetched once the
//! connected identity has been confirmed as the administrator, and the detail queries fan out
//! concurrently once the directory is known. Progress is tracked through the ordered [Stage]s.
//!
//! Errors never escape the loader: every fetch failure is captured as observable state and the
//! stage it occurred in is kept, so the view can offer a retry. Each pipeline run is tagged with
//! a generation; a reset bumps it and results arriving for a stale generation are discarded.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt as _;

use chainforum_core::{Address, Member, MemberInfo};

use crate::interface::ClientT;

/// Number of journal lines the loader retains.
const JOURNAL_CAPACITY: usize = 10;

/// Position of the pipeline in its ordered progression.
///
/// The stage only moves forwards, except on an explicit reset (session change or
/// [AdminLoader::retry_all]) which starts a new generation at [Stage::Init].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Stage {
    Init,
    AdminCheck,
    MemberList,
    MemberDetail,
    Done,
}

/// Authorization verdict for the connected identity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    /// No identity connected or wrong network; nothing is fetched.
    Blocked,
    /// The administrator address has not been resolved yet.
    Pending,
    /// The connected identity is the contract administrator.
    Granted,
    /// The connected identity is not the administrator. Terminal until the session changes.
    Denied,
}

/// Completion state of one detail query, independent of the global [Stage].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DetailStatus {
    Loading,
    Error(String),
    Success,
}

/// Connection context the loader derives all of its state from.
///
/// Replacing the session through [AdminLoader::set_session] rebuilds the pipeline from scratch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    /// The connected wallet, if any.
    pub identity: Option<Address>,
    /// Whether the wallet is connected to the chain the contracts are deployed on.
    pub correct_network: bool,
}

impl Session {
    pub fn new(identity: Option<Address>, correct_network: bool) -> Self {
        Session {
            identity,
            correct_network,
        }
    }

    fn blocked(&self) -> bool {
        self.identity.is_none() || !self.correct_network
    }
}

/// A detail fetch that can be awaited by several callers at once.
type DetailFuture = Shared<BoxFuture<'static, ()>>;

struct LoaderState {
    session: Session,
    /// Tag for the current pipeline run. Bumped on every reset; results carrying an older tag
    /// are discarded instead of applied.
    generation: u64,
    stage: Stage,
    access: Access,
    admin: Option<Address>,
    directory: Vec<Address>,
    details: HashMap<Address, DetailStatus>,
    records: HashMap<Address, MemberInfo>,
    admin_error: Option<String>,
    directory_error: Option<String>,
    /// In-flight detail fetches, keyed by address. A second request for the same address awaits
    /// the entry here instead of issuing a duplicate.
    pending: HashMap<Address, DetailFuture>,
    journal: VecDeque<String>,
}

impl LoaderState {
    fn new(session: Session) -> Self {
        let access = if session.blocked() {
            Access::Blocked
        } else {
            Access::Pending
        };
        LoaderState {
            session,
            generation: 0,
            stage: Stage::Init,
            access,
            admin: None,
            directory: Vec::new(),
            details: HashMap::new(),
            records: HashMap::new(),
            admin_error: None,
            directory_error: None,
            pending: HashMap::new(),
            journal: VecDeque::new(),
        }
    }

    /// Start a new generation for the given session. The journal survives resets so operators
    /// can see what led up to them.
    fn reset(&mut self, session: Session) {
        self.generation += 1;
        self.access = if session.blocked() {
            Access::Blocked
        } else {
            Access::Pending
        };
        self.session = session;
        self.stage = Stage::Init;
        self.admin = None;
        self.directory.clear();
        self.details.clear();
        self.records.clear();
        self.admin_error = None;
        self.directory_error = None;
        self.pending.clear();
    }

    fn journal_push(&mut self, line: String) {
        log::debug!("{}", line);
        if self.journal.len() == JOURNAL_CAPACITY {
            self.journal.pop_front();
        }
        self.journal.push_back(line);
    }

    fn all_details_succeeded(&self) -> bool {
        self.directory
            .iter()
            .all(|address| matches!(self.details.get(address), Some(DetailStatus::Success)))
    }
}

struct Inner {
    client: Arc<dyn ClientT>,
    state: Mutex<LoaderState>,
}

/// Drives the member management pipeline and exposes its aggregate state.
///
/// The loader owns no tasks and spawns none: all work happens inside the futures returned by
/// [AdminLoader::load], [AdminLoader::retry_one] and [AdminLoader::retry_all], which interleave
/// cooperatively. Cloning is cheap and shares the pipeline state, so a view layer can keep one
/// handle for rendering and another for retry actions.
#[derive(Clone)]
pub struct AdminLoader {
    inner: Arc<Inner>,
}

impl AdminLoader {
    pub fn new(client: Arc<dyn ClientT>, session: Session) -> Self {
        let mut state = LoaderState::new(session);
        state.journal_push("loader initialized".to_string());
        AdminLoader {
            inner: Arc::new(Inner {
                client,
                state: Mutex::new(state),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<LoaderState> {
        self.inner.state.lock().unwrap()
    }

    /// Run the pipeline as far as the current session allows.
    ///
    /// Resolves once every issued fetch has settled. On a fetch error the stage is kept and the
    /// error surfaces through [AdminLoader::has_error]; a later [AdminLoader::retry_all] restarts
    /// from the administrator check.
    pub async fn load(&self) {
        let generation = {
            let mut state = self.lock();
            if state.session.blocked() {
                state.access = Access::Blocked;
                state.journal_push("blocked: no identity connected or wrong network".to_string());
                return;
            }
            state.stage = Stage::AdminCheck;
            state.journal_push("verifying administrator".to_string());
            state.generation
        };

        let admin = self.inner.client.admin().await;
        {
            let mut state = self.lock();
            if state.generation != generation {
                state.journal_push("discarding stale administrator response".to_string());
                return;
            }
            let admin = match admin {
                Ok(admin) => admin,
                Err(err) => {
                    state.admin_error = Some(err.to_string());
                    state.journal_push(format!("administrator fetch failed: {}", err));
                    return;
                }
            };
            state.admin_error = None;
            state.journal_push(format!("administrator is {}", admin.shortened()));

            let identity = match &state.session.identity {
                Some(identity) => identity.clone(),
                None => return,
            };
            if identity != admin {
                state.admin = Some(admin);
                state.access = Access::Denied;
                state.journal_push(
                    "access denied: connected identity is not the administrator".to_string(),
                );
                return;
            }
            state.admin = Some(admin);
            state.access = Access::Granted;
            state.stage = Stage::MemberList;
            state.journal_push("access granted, fetching member directory".to_string());
        }

        let directory = self.inner.client.member_directory().await;
        let targets = {
            let mut state = self.lock();
            if state.generation != generation {
                state.journal_push("discarding stale directory response".to_string());
                return;
            }
            let directory = match directory {
                Ok(directory) => directory,
                Err(err) => {
                    state.directory_error = Some(err.to_string());
                    state.journal_push(format!("member directory fetch failed: {}", err));
                    return;
                }
            };
            state.directory_error = None;
            for raw in &directory.rejected {
                state.journal_push(format!("dropped invalid directory entry: {}", raw));
            }
            // Entries that disappeared from the refreshed directory are purged so the status
            // map cannot grow without bound.
            state
                .details
                .retain(|address, _| directory.members.contains(address));
            state
                .records
                .retain(|address, _| directory.members.contains(address));
            state.directory = directory.members.clone();
            state.stage = Stage::MemberDetail;
            state.journal_push(format!(
                "member directory has {} valid entries",
                directory.members.len()
            ));
            directory.members
        };

        let fetches: Vec<DetailFuture> = targets
            .into_iter()
            .map(|address| self.detail_future(address, generation))
            .collect();
        futures::future::join_all(fetches).await;

        self.finalize(generation);
    }

    /// Re-issue the detail fetch for a single member and await it.
    ///
    /// If a fetch for this address is already in flight, this call awaits it instead of issuing
    /// a duplicate. Advances the stage to [Stage::Done] when this was the last missing entry.
    pub async fn retry_one(&self, address: &Address) {
        let generation = {
            let mut state = self.lock();
            if !state.directory.contains(address) {
                state.journal_push(format!(
                    "ignoring retry for unknown member {}",
                    address.shortened()
                ));
                return;
            }
            state.generation
        };

        let fetch = self.detail_future(address.clone(), generation);
        fetch.await;
        self.finalize(generation);
    }

    /// Restart the whole pipeline from the administrator check.
    ///
    /// Starts a new generation so responses from the previous run are discarded, clears every
    /// cached result and runs [AdminLoader::load] again.
    pub async fn retry_all(&self) {
        {
            let mut state = self.lock();
            let session = state.session.clone();
            state.reset(session);
            state.journal_push("retrying all data".to_string());
        }
        self.load().await;
    }

    /// Replace the connection context.
    ///
    /// An identity or network change abandons all in-flight work and resets the pipeline to
    /// [Stage::Init]. The caller decides when to run [AdminLoader::load] again. A session equal
    /// to the current one is a no-op.
    pub fn set_session(&self, session: Session) {
        let mut state = self.lock();
        if state.session == session {
            return;
        }
        state.reset(session);
        state.journal_push("session changed, pipeline reset".to_string());
    }

    /// A detail fetch for `address`, collapsed with any fetch already in flight for it.
    ///
    /// The returned future applies the result itself, under the state lock and only after
    /// checking that `generation` is still current, so awaiting it from several places cannot
    /// apply the result twice.
    fn detail_future(&self, address: Address, generation: u64) -> DetailFuture {
        let mut state = self.lock();
        if let Some(existing) = state.pending.get(&address) {
            return existing.clone();
        }

        state.details.insert(address.clone(), DetailStatus::Loading);
        state.journal_push(format!("fetching details for {}", address.shortened()));

        let inner = Arc::clone(&self.inner);
        let key = address.clone();
        let future = async move {
            let result = inner.client.member_info(&key).await;
            let mut state = inner.state.lock().unwrap();
            if state.generation != generation {
                // The reset that bumped the generation already cleared `pending`; an entry
                // found there now belongs to the new generation and must stay.
                state.journal_push(format!("discarding stale details for {}", key.shortened()));
                return;
            }
            state.pending.remove(&key);
            match result {
                Ok(info) => {
                    state.records.insert(key.clone(), info);
                    state.details.insert(key.clone(), DetailStatus::Success);
                    state.journal_push(format!("details loaded for {}", key.shortened()));
                }
                Err(err) => {
                    state
                        .details
                        .insert(key.clone(), DetailStatus::Error(err.to_string()));
                    state.journal_push(format!("details failed for {}: {}", key.shortened(), err));
                }
            }
        }
        .boxed()
        .shared();

        state.pending.insert(address, future.clone());
        future
    }

    /// Advance to [Stage::Done] if every directory entry has settled successfully.
    fn finalize(&self, generation: u64) {
        let mut state = self.lock();
        if state.generation != generation || state.stage != Stage::MemberDetail {
            return;
        }
        if state.all_details_succeeded() {
            state.stage = Stage::Done;
            let count = state.directory.len();
            state.journal_push(format!("member data complete: {} members", count));
        } else {
            let failed = state
                .details
                .values()
                .filter(|status| matches!(status, DetailStatus::Error(_)))
                .count();
            if failed > 0 {
                state.journal_push(format!("member details incomplete: {} failed", failed));
            }
        }
    }

    pub fn stage(&self) -> Stage {
        self.lock().stage
    }

    pub fn access(&self) -> Access {
        self.lock().access
    }

    /// The administrator address, once resolved.
    pub fn admin(&self) -> Option<Address> {
        self.lock().admin.clone()
    }

    /// The validated member directory of the current generation, in contract order.
    pub fn directory(&self) -> Vec<Address> {
        self.lock().directory.clone()
    }

    pub fn detail_status(&self, address: &Address) -> Option<DetailStatus> {
        self.lock().details.get(address).cloned()
    }

    pub fn detail_statuses(&self) -> HashMap<Address, DetailStatus> {
        self.lock().details.clone()
    }

    /// Aggregate error flag: administrator error, directory error or any failed detail entry.
    pub fn has_error(&self) -> bool {
        let state = self.lock();
        state.admin_error.is_some()
            || state.directory_error.is_some()
            || state
                .details
                .values()
                .any(|status| matches!(status, DetailStatus::Error(_)))
    }

    /// True while the current stage has outstanding work.
    pub fn is_loading(&self) -> bool {
        let state = self.lock();
        match state.stage {
            Stage::Init | Stage::Done => false,
            Stage::AdminCheck => state.admin_error.is_none() && state.access == Access::Pending,
            Stage::MemberList => state.directory_error.is_none(),
            Stage::MemberDetail => state
                .details
                .values()
                .any(|status| matches!(status, DetailStatus::Loading)),
        }
    }

    /// Successfully resolved members, most recent join first.
    ///
    /// Partial data is always available: entries that are still loading or failed are simply
    /// absent until they resolve.
    pub fn members(&self) -> Vec<Member> {
        let state = self.lock();
        let mut members: Vec<Member> = state
            .directory
            .iter()
            .filter_map(|address| {
                state
                    .records
                    .get(address)
                    .map(|info| Member::new(address.clone(), info.clone()))
            })
            .collect();
        members.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
        members
    }

    /// The most recent journal lines, oldest first. Bounded to the last ten.
    pub fn journal(&self) -> Vec<String> {
        self.lock().journal.iter().cloned().collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn journal_retains_most_recent_lines() {
        let mut state = LoaderState::new(Session::new(None, false));
        for index in 0..25 {
            state.journal_push(format!("line {}", index));
        }
        assert_eq!(state.journal.len(), JOURNAL_CAPACITY);
        assert_eq!(state.journal.front().unwrap(), "line 15");
        assert_eq!(state.journal.back().unwrap(), "line 24");
    }

    #[test]
    fn reset_starts_a_new_generation_and_keeps_the_journal() {
        let mut state = LoaderState::new(Session::new(None, false));
        state.journal_push("before reset".to_string());
        state.stage = Stage::Done;
        state.reset(Session::new(None, true));
        assert_eq!(state.generation, 1);
        assert_eq!(state.stage, Stage::Init);
        assert_eq!(state.journal.len(), 1);
    }
}
