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

//! Member levels and the post-count windows for advancing them.

/// Forum member level.
///
/// The member manager contract encodes the level as the decimal string `"1"` through `"5"`.
/// The contract is trusted but not blindly: anything outside that range is clamped to
/// [Level::Newcomer] by [Level::normalize] when a member detail payload is decoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum Level {
    Newcomer = 1,
    Enthusiast = 2,
    Aficionado = 3,
    Expert = 4,
    Master = 5,
}

impl Level {
    /// Parse the contract's string encoding. Returns [None] for anything outside `"1"`..`"5"`.
    pub fn from_raw(raw: &str) -> Option<Level> {
        match raw {
            "1" => Some(Level::Newcomer),
            "2" => Some(Level::Enthusiast),
            "3" => Some(Level::Aficionado),
            "4" => Some(Level::Expert),
            "5" => Some(Level::Master),
            _ => None,
        }
    }

    /// Parse the contract's string encoding, clamping out-of-range values to level one.
    pub fn normalize(raw: &str) -> Level {
        Level::from_raw(raw).unwrap_or(Level::Newcomer)
    }

    /// Numeric rank, `1` through `5`.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Human-readable level name.
    pub fn name(self) -> &'static str {
        match self {
            Level::Newcomer => "Newcomer",
            Level::Enthusiast => "Blockchain Enthusiast",
            Level::Aficionado => "Blockchain Aficionado",
            Level::Expert => "Blockchain Expert",
            Level::Master => "Blockchain Master",
        }
    }

    /// Progress through this level's post-count window.
    ///
    /// The windows match the contract's level thresholds: five posts to leave level one, then
    /// five, ten and ten more for the following levels. Level five has no successor.
    pub fn progress(self, post_count: u64) -> LevelProgress {
        let (start, end) = match self {
            Level::Newcomer => (0, 5),
            Level::Enthusiast => (5, 10),
            Level::Aficionado => (10, 20),
            Level::Expert => (20, 30),
            Level::Master => return LevelProgress::Complete,
        };
        let needed = end - start;
        LevelProgress::Advancing {
            posts: post_count.saturating_sub(start).min(needed),
            needed,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.rank())
    }
}

/// Progress towards the next [Level], derived from a member's post count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LevelProgress {
    /// `posts` of the `needed` posts within the current level's window.
    Advancing { posts: u64, needed: u64 },
    /// The highest level has been reached.
    Complete,
}
