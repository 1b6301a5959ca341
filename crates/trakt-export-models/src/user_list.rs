use serde::{Deserialize, Serialize};

use crate::item::TraktIds;

/// Metadata of one of a user's named lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserList {
    pub name: String,
    #[serde(default)]
    pub item_count: u64,
    pub ids: TraktIds,
    #[serde(default)]
    pub user: Option<ListOwner>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListOwner {
    pub username: String,
}

impl UserList {
    /// Identifier to pass as `--listid`: the numeric trakt id, or the slug
    pub fn list_id(&self) -> Option<String> {
        self.ids
            .trakt
            .map(|id| id.to_string())
            .or_else(|| self.ids.slug.clone())
    }

    pub fn owner(&self) -> &str {
        self.user.as_ref().map(|u| u.username.as_str()).unwrap_or("")
    }
}
