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

//! Validated decoding of raw backend payloads.
//!
//! Every [crate::Backend] response passes through exactly one function here before it reaches
//! typed code. A response that fails its structural check becomes a [PayloadError] carrying the
//! malformed payload; loosely-typed values never propagate past this module.

use std::convert::TryFrom;

use serde_json::Value;

use chainforum_core::{Address, Level, MemberInfo, Post};

use crate::error::PayloadError;

/// Decode the administrator address returned by the member manager.
pub fn admin(value: &Value) -> Result<Address, PayloadError> {
    value
        .as_str()
        .and_then(|raw| Address::try_from(raw).ok())
        .ok_or_else(|| PayloadError::new("admin", value))
}

/// A raw member directory split into valid addresses and rejected entries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Directory {
    /// Syntactically valid entries, in contract order.
    pub members: Vec<Address>,
    /// Raw entries that failed address validation, rendered as JSON.
    pub rejected: Vec<String>,
}

/// Decode the member directory, dropping malformed entries.
///
/// Only syntactically valid addresses may ever reach a detail query. Rejected raw entries are
/// returned alongside the valid ones so the caller can journal them.
pub fn directory(value: &Value) -> Result<Directory, PayloadError> {
    let entries = value
        .as_array()
        .ok_or_else(|| PayloadError::new("directory", value))?;

    let mut members = Vec::new();
    let mut rejected = Vec::new();
    for entry in entries {
        match entry.as_str().and_then(|raw| Address::try_from(raw).ok()) {
            Some(address) => members.push(address),
            None => {
                log::warn!("dropping malformed directory entry: {}", entry);
                rejected.push(entry.to_string());
            }
        }
    }
    Ok(Directory { members, rejected })
}

/// Decode a member detail payload: exactly five fields in contract order.
///
/// The level string is clamp-normalized via [Level::normalize]; an empty display name becomes
/// [None].
pub fn member_info(value: &Value) -> Result<MemberInfo, PayloadError> {
    let bad = || PayloadError::new("member_info", value);
    let fields = value.as_array().filter(|fields| fields.len() == 5).ok_or_else(bad)?;

    let is_registered = fields[0].as_bool().ok_or_else(bad)?;
    let post_count = fields[1].as_u64().ok_or_else(bad)?;
    let level = fields[2].as_str().ok_or_else(bad)?;
    let joined_at = fields[3].as_u64().ok_or_else(bad)?;
    let name = fields[4].as_str().ok_or_else(bad)?;

    Ok(MemberInfo {
        is_registered,
        post_count,
        level: Level::normalize(level),
        joined_at,
        display_name: if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        },
    })
}

/// Decode the post manager's column-array payload into rows.
pub fn posts(value: &Value) -> Result<Vec<Post>, PayloadError> {
    let bad = || PayloadError::new("posts", value);
    let columns = value.as_array().filter(|columns| columns.len() == 4).ok_or_else(bad)?;

    let ids = columns[0].as_array().ok_or_else(bad)?;
    let authors = columns[1].as_array().ok_or_else(bad)?;
    let contents = columns[2].as_array().ok_or_else(bad)?;
    let times = columns[3].as_array().ok_or_else(bad)?;
    if authors.len() != ids.len() || contents.len() != ids.len() || times.len() != ids.len() {
        return Err(bad());
    }

    let mut posts = Vec::with_capacity(ids.len());
    for index in 0..ids.len() {
        posts.push(Post {
            id: ids[index].as_u64().ok_or_else(bad)?,
            author: authors[index]
                .as_str()
                .and_then(|raw| Address::try_from(raw).ok())
                .ok_or_else(bad)?,
            content: contents[index].as_str().ok_or_else(bad)?.to_string(),
            created_at: times[index].as_u64().ok_or_else(bad)?,
        });
    }
    Ok(posts)
}

/// Decode the total post count.
pub fn post_total(value: &Value) -> Result<u64, PayloadError> {
    value
        .as_u64()
        .ok_or_else(|| PayloadError::new("post_total", value))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn address(raw: &str) -> Address {
        Address::try_from(raw).unwrap()
    }

    #[test]
    fn admin_valid() {
        let value = json!("0x00112233445566778899aabbccddeeff00112233");
        assert_eq!(
            admin(&value).unwrap(),
            address("0x00112233445566778899aabbccddeeff00112233")
        );
    }

    #[test]
    fn admin_rejects_non_string() {
        assert!(admin(&json!(42)).is_err());
    }

    #[test]
    fn admin_rejects_invalid_address() {
        assert!(admin(&json!("not-an-address")).is_err());
    }

    #[test]
    fn directory_rejects_non_array() {
        assert!(directory(&json!({"members": []})).is_err());
    }

    #[test]
    fn directory_splits_valid_and_malformed() {
        let value = json!([
            "0x00112233445566778899aabbccddeeff00112233",
            "not-an-address",
            7,
            "0xffeeddccbbaa99887766554433221100ffeeddcc"
        ]);
        let directory = directory(&value).unwrap();
        assert_eq!(
            directory.members,
            vec![
                address("0x00112233445566778899aabbccddeeff00112233"),
                address("0xffeeddccbbaa99887766554433221100ffeeddcc"),
            ]
        );
        assert_eq!(directory.rejected, vec!["\"not-an-address\"", "7"]);
    }

    #[test]
    fn member_info_valid() {
        let value = json!([true, 12, "3", 1700000000u64, "satoshi"]);
        let info = member_info(&value).unwrap();
        assert!(info.is_registered);
        assert_eq!(info.post_count, 12);
        assert_eq!(info.level, Level::Aficionado);
        assert_eq!(info.joined_at, 1700000000);
        assert_eq!(info.display_name, Some("satoshi".to_string()));
    }

    #[test]
    fn member_info_empty_name_is_none() {
        let value = json!([true, 0, "1", 0, ""]);
        assert_eq!(member_info(&value).unwrap().display_name, None);
    }

    #[test]
    fn member_info_clamps_out_of_range_level() {
        let value = json!([true, 0, "42", 0, ""]);
        assert_eq!(member_info(&value).unwrap().level, Level::Newcomer);
    }

    #[test]
    fn member_info_rejects_wrong_field_count() {
        assert!(member_info(&json!([true, 0, "1", 0])).is_err());
        assert!(member_info(&json!([true, 0, "1", 0, "", "extra"])).is_err());
    }

    #[test]
    fn member_info_rejects_wrong_field_types() {
        assert!(member_info(&json!(["yes", 0, "1", 0, ""])).is_err());
        assert!(member_info(&json!([true, "0", "1", 0, ""])).is_err());
        assert!(member_info(&json!([true, 0, 1, 0, ""])).is_err());
    }

    #[test]
    fn posts_valid() {
        let value = json!([
            [1, 2],
            [
                "0x00112233445566778899aabbccddeeff00112233",
                "0xffeeddccbbaa99887766554433221100ffeeddcc"
            ],
            ["hello", "world"],
            [100, 200]
        ]);
        let posts = posts(&value).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, 2);
        assert_eq!(posts[1].content, "world");
        assert_eq!(posts[1].created_at, 200);
    }

    #[test]
    fn posts_rejects_ragged_columns() {
        let value = json!([
            [1, 2],
            ["0x00112233445566778899aabbccddeeff00112233"],
            ["hello", "world"],
            [100, 200]
        ]);
        assert!(posts(&value).is_err());
    }

    #[test]
    fn posts_rejects_invalid_author() {
        let value = json!([[1], ["not-an-address"], ["hello"], [100]]);
        assert!(posts(&value).is_err());
    }

    #[test]
    fn post_total_valid() {
        assert_eq!(post_total(&json!(7)).unwrap(), 7);
        assert!(post_total(&json!("7")).is_err());
    }
}
