use serde::{Deserialize, Serialize};

use crate::context::{IdFormat, ItemKind, ListKind};

/// Title reported for episodes that the service returns without one
pub const EPISODE_TITLE_PLACEHOLDER: &str = "no episode title";

/// Identifier set attached to every movie, show, episode and list
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraktIds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trakt: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvdb: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvrage: Option<u64>,
}

impl TraktIds {
    /// Identifier in the given namespace, rendered as text. Empty imdb strings
    /// count as absent.
    pub fn get(&self, format: IdFormat) -> Option<String> {
        match format {
            IdFormat::Imdb => self.imdb.clone().filter(|id| !id.is_empty()),
            IdFormat::Tmdb => self.tmdb.map(|id| id.to_string()),
            IdFormat::Tvdb => self.tvdb.map(|id| id.to_string()),
            IdFormat::Tvrage => self.tvrage.map(|id| id.to_string()),
            IdFormat::Trakt => self.trakt.map(|id| id.to_string()),
        }
    }

    pub fn has(&self, format: IdFormat) -> bool {
        self.get(format).is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub ids: TraktIds,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Show {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub ids: TraktIds,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ids: TraktIds,
}

impl Episode {
    pub fn title_or_placeholder(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => EPISODE_TITLE_PLACEHOLDER,
        }
    }
}

/// One entry of a fetched list, exactly as the service returns it.
///
/// Which entity is populated depends on the item kind that was requested:
/// `movie` for movies, `show` for shows, `episode` plus `show` for episodes.
/// Only the timestamp matching the list kind is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawItem {
    /// Service-assigned id of the list entry (history id, list item id)
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watched_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie: Option<Movie>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<Show>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<Episode>,
}

impl RawItem {
    pub fn timestamp(&self, list: ListKind) -> Option<&str> {
        match list {
            ListKind::History => self.watched_at.as_deref(),
            ListKind::Watchlist | ListKind::UserList => self.listed_at.as_deref(),
            ListKind::Collection => self.collected_at.as_deref(),
        }
    }

    /// Ids of the entity addressed by `kind`
    pub fn ids(&self, kind: ItemKind) -> Option<&TraktIds> {
        match kind {
            ItemKind::Movies => self.movie.as_ref().map(|m| &m.ids),
            ItemKind::Shows => self.show.as_ref().map(|s| &s.ids),
            ItemKind::Episodes => self.episode.as_ref().map(|e| &e.ids),
        }
    }

    pub fn external_id(&self, kind: ItemKind, format: IdFormat) -> Option<String> {
        self.ids(kind).and_then(|ids| ids.get(format))
    }

    /// Title of the movie or show entity; episodes have no row-level title
    pub fn title(&self, kind: ItemKind) -> Option<&str> {
        match kind {
            ItemKind::Movies => self.movie.as_ref().and_then(|m| m.title.as_deref()),
            ItemKind::Shows => self.show.as_ref().and_then(|s| s.title.as_deref()),
            ItemKind::Episodes => None,
        }
    }

    pub fn show_title(&self) -> Option<&str> {
        self.show.as_ref().and_then(|s| s.title.as_deref())
    }
}
