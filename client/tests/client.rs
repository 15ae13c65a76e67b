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

//! Tests for the typed contract reads, run against the in-memory emulator.

use serde_json::json;

use chainforum_client::*;
use chainforum_test_utils::*;

#[async_std::test]
async fn reads_the_administrator() {
    let admin = random_address();
    let (client, _) = Client::new_emulator(admin.clone());

    assert_eq!(client.admin().await.unwrap(), admin);
}

#[async_std::test]
async fn member_directory_drops_malformed_entries() {
    let (client, emulator) = Client::new_emulator(random_address());
    let member = seed_member(&emulator, "1", 0, 100, "");
    emulator.push_raw_directory_entry(json!("0xshort"));
    emulator.push_raw_directory_entry(json!(42));

    let directory = client.member_directory().await.unwrap();

    assert_eq!(directory.members, vec![member]);
    assert_eq!(directory.rejected.len(), 2);
}

#[async_std::test]
async fn member_info_resolves_registered_members() {
    let (client, emulator) = Client::new_emulator(random_address());
    let member = seed_member(&emulator, "4", 25, 1000, "dora");

    let info = client.member_info(&member).await.unwrap();

    assert!(info.is_registered);
    assert_eq!(info.post_count, 25);
    assert_eq!(info.level, Level::Expert);
    assert_eq!(info.joined_at, 1000);
    assert_eq!(info.display_name, Some("dora".to_string()));
}

#[async_std::test]
async fn member_info_defaults_for_unknown_addresses() {
    let (client, _) = Client::new_emulator(random_address());

    let info = client.member_info(&random_address()).await.unwrap();

    assert!(!info.is_registered);
    assert_eq!(info.post_count, 0);
    assert_eq!(info.level, Level::Newcomer);
    assert_eq!(info.display_name, None);
}

#[async_std::test]
async fn member_info_surfaces_corrupt_payloads() {
    let (client, emulator) = Client::new_emulator(random_address());
    let member = seed_member(&emulator, "1", 0, 100, "");
    emulator.corrupt_next_member_info(&member);

    match client.member_info(&member).await {
        Err(Error::BadPayload(err)) => assert_eq!(err.query, "member_info"),
        other => panic!("expected a payload error, got {:?}", other),
    }
    // The corruption is one-shot; the next read succeeds.
    assert!(client.member_info(&member).await.is_ok());
}

#[async_std::test]
async fn reads_posts_in_contract_order() {
    let (client, emulator) = Client::new_emulator(random_address());
    let alice = random_address();
    let bob = random_address();
    emulator.create_post(&alice, "hello forum", 100);
    emulator.create_post(&bob, "second post", 200);

    let posts = client.all_posts().await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(
        posts[0],
        Post {
            id: 1,
            author: alice,
            content: "hello forum".to_string(),
            created_at: 100,
        }
    );
    assert_eq!(posts[1].id, 2);
    assert_eq!(posts[1].author, bob);
    assert_eq!(client.post_total().await.unwrap(), 2);
}

#[async_std::test]
async fn fetch_errors_pass_through() {
    let (client, emulator) = Client::new_emulator(random_address());
    emulator.fail_next_admin();

    assert!(matches!(client.admin().await, Err(Error::Fetch(_))));
    // Injected failures are one-shot.
    assert!(client.admin().await.is_ok());
}
