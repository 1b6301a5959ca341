use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Page size requested from every paginated list endpoint
pub const PAGE_LIMIT: u32 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("you can only fetch {0} from the history or watchlist list")]
    EpisodesFromCollection(ItemKind),
    #[error("a named user list needs both a user handle and a list id")]
    IncompleteUserList,
    #[error("invalid {kind} '{value}'")]
    InvalidValue { kind: &'static str, value: String },
}

/// Which collection on the service is targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Watchlist,
    Collection,
    History,
    UserList,
}

impl ListKind {
    /// Path segment used by the `/sync/{list}` endpoints
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Watchlist => "watchlist",
            ListKind::Collection => "collection",
            ListKind::History => "history",
            ListKind::UserList => "userlist",
        }
    }

    /// Name of the per-entry timestamp field for this list
    pub fn timestamp_field(&self) -> &'static str {
        match self {
            ListKind::History => "watched_at",
            ListKind::Watchlist | ListKind::UserList => "listed_at",
            ListKind::Collection => "collected_at",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListKind {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "watchlist" => Ok(ListKind::Watchlist),
            "collection" => Ok(ListKind::Collection),
            "history" => Ok(ListKind::History),
            _ => Err(ContextError::InvalidValue {
                kind: "list",
                value: s.to_string(),
            }),
        }
    }
}

/// Category of tracked entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Movies,
    Shows,
    Episodes,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Movies => "movies",
            ItemKind::Shows => "shows",
            ItemKind::Episodes => "episodes",
        }
    }

    /// Key of the entity object inside a list entry (`movie`, `show`, `episode`)
    pub fn entity_key(&self) -> &'static str {
        match self {
            ItemKind::Movies => "movie",
            ItemKind::Shows => "show",
            ItemKind::Episodes => "episode",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movies" => Ok(ItemKind::Movies),
            "shows" => Ok(ItemKind::Shows),
            "episodes" => Ok(ItemKind::Episodes),
            _ => Err(ContextError::InvalidValue {
                kind: "type",
                value: s.to_string(),
            }),
        }
    }
}

/// External catalog whose identifier is exported per row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdFormat {
    Imdb,
    Tmdb,
    Tvdb,
    Tvrage,
    Trakt,
}

impl IdFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdFormat::Imdb => "imdb",
            IdFormat::Tmdb => "tmdb",
            IdFormat::Tvdb => "tvdb",
            IdFormat::Tvrage => "tvrage",
            IdFormat::Trakt => "trakt",
        }
    }
}

impl fmt::Display for IdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdFormat {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "imdb" => Ok(IdFormat::Imdb),
            "tmdb" => Ok(IdFormat::Tmdb),
            "tvdb" => Ok(IdFormat::Tvdb),
            "tvrage" => Ok(IdFormat::Tvrage),
            "trakt" => Ok(IdFormat::Trakt),
            _ => Err(ContextError::InvalidValue {
                kind: "format",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ContextError::InvalidValue {
                kind: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

/// Everything one export run needs to address the service.
///
/// Built once per run through [`RequestContext::new`] or
/// [`RequestContext::user_list`]; both reject combinations the service cannot
/// serve, so a constructed context is always valid to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    list_kind: ListKind,
    item_kind: ItemKind,
    id_format: IdFormat,
    requested_format: IdFormat,
    page_size: u32,
    user: Option<String>,
    list_id: Option<String>,
}

impl RequestContext {
    /// Context for one of the predefined sync lists (watchlist, collection, history)
    pub fn new(list_kind: ListKind, item_kind: ItemKind, id_format: IdFormat) -> Result<Self, ContextError> {
        if list_kind == ListKind::UserList {
            return Err(ContextError::IncompleteUserList);
        }
        Self::build(list_kind, item_kind, id_format, None, None)
    }

    /// Context for a named custom list owned by `user`
    pub fn user_list(
        user: impl Into<String>,
        list_id: impl Into<String>,
        item_kind: ItemKind,
        id_format: IdFormat,
    ) -> Result<Self, ContextError> {
        let user = user.into();
        let list_id = list_id.into();
        if user.trim().is_empty() || list_id.trim().is_empty() {
            return Err(ContextError::IncompleteUserList);
        }
        Self::build(ListKind::UserList, item_kind, id_format, Some(user), Some(list_id))
    }

    fn build(
        list_kind: ListKind,
        item_kind: ItemKind,
        requested_format: IdFormat,
        user: Option<String>,
        list_id: Option<String>,
    ) -> Result<Self, ContextError> {
        if item_kind == ItemKind::Episodes && list_kind == ListKind::Collection {
            return Err(ContextError::EpisodesFromCollection(item_kind));
        }

        // imdb has no episode-level identifier
        let id_format = if item_kind == ItemKind::Episodes {
            IdFormat::Tmdb
        } else {
            requested_format
        };

        Ok(Self {
            list_kind,
            item_kind,
            id_format,
            requested_format,
            page_size: PAGE_LIMIT,
            user,
            list_id,
        })
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn list_kind(&self) -> ListKind {
        self.list_kind
    }

    pub fn item_kind(&self) -> ItemKind {
        self.item_kind
    }

    /// The identifier namespace in effect for this run
    pub fn id_format(&self) -> IdFormat {
        self.id_format
    }

    /// True when the requested format was overridden (episodes always use tmdb)
    pub fn format_forced(&self) -> bool {
        self.id_format != self.requested_format
    }

    pub fn requested_format(&self) -> IdFormat {
        self.requested_format
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn list_id(&self) -> Option<&str> {
        self.list_id.as_deref()
    }

    pub fn timestamp_field(&self) -> &'static str {
        self.list_kind.timestamp_field()
    }

    /// Human label of the target list: the sync list name, or the user handle
    /// for a named list
    pub fn list_label(&self) -> &str {
        match (&self.list_kind, &self.user) {
            (ListKind::UserList, Some(user)) => user,
            _ => self.list_kind.as_str(),
        }
    }

    /// Default CSV output filename, `export_{type}_{list}.csv`
    pub fn default_output_name(&self) -> String {
        format!("export_{}_{}.csv", self.item_kind, self.list_label())
    }
}
