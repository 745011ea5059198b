//! Role categories and their fixed capacity limits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discord role snowflake
pub type RoleId = u64;

/// Maximum autoroles applied to human members
pub const HUMAN_ROLE_LIMIT: usize = 5;

/// Maximum autoroles applied to bot accounts
pub const BOT_ROLE_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleCategory {
    #[serde(rename = "humans")]
    Human,
    #[serde(rename = "bots")]
    Automated,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 2] = [RoleCategory::Human, RoleCategory::Automated];

    /// Category for a joining member, by its bot flag
    pub fn for_member(is_bot: bool) -> Self {
        if is_bot {
            RoleCategory::Automated
        } else {
            RoleCategory::Human
        }
    }

    pub fn max_roles(self) -> usize {
        match self {
            RoleCategory::Human => HUMAN_ROLE_LIMIT,
            RoleCategory::Automated => BOT_ROLE_LIMIT,
        }
    }

    /// Key used for this category in persisted documents
    pub fn as_str(self) -> &'static str {
        match self {
            RoleCategory::Human => "humans",
            RoleCategory::Automated => "bots",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
