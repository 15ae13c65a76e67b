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

//! Miscellaneous helpers used throughout Chain Forum tests.

use std::convert::TryFrom;
use std::sync::Arc;

use rand::Rng;

use chainforum_client::*;

/// Create a random, syntactically valid wallet address.
pub fn random_address() -> Address {
    let mut rng = rand::thread_rng();
    let hex: String = (0..40)
        .map(|_| std::char::from_digit(rng.gen_range(0, 16), 16).unwrap())
        .collect();
    Address::try_from(format!("0x{}", hex)).unwrap()
}

/// Register a member with the given attributes and return its address.
///
/// `level` takes the raw contract encoding so tests can seed out-of-range values.
pub fn seed_member(
    emulator: &Emulator,
    level: &str,
    post_count: u64,
    joined_at: Timestamp,
    name: &str,
) -> Address {
    let address = random_address();
    emulator.register_member(&address, level, post_count, joined_at, name);
    address
}

/// A loader connected as the administrator, with its emulator and the administrator address.
pub fn admin_loader() -> (AdminLoader, Emulator, Address) {
    init_logger();
    let admin = random_address();
    let (client, emulator) = Client::new_emulator(admin.clone());
    let session = Session::new(Some(admin.clone()), true);
    (AdminLoader::new(Arc::new(client), session), emulator, admin)
}

/// A loader for the given session, with its emulator and the administrator address.
pub fn loader_with_session(session: Session) -> (AdminLoader, Emulator, Address) {
    init_logger();
    let admin = random_address();
    let (client, emulator) = Client::new_emulator(admin.clone());
    (AdminLoader::new(Arc::new(client), session), emulator, admin)
}

/// Initialize logging for test output. Safe to call more than once.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
