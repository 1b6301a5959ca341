use async_trait::async_trait;
use std::sync::Mutex;
use trakt_export_models::{
    Episode, Movie, RawItem, RemovalOutcome, RemovalRef, RequestContext, Show, TraktIds, UserList,
};
use trakt_export_source::{ListSource, TraktError};

fn stamped(id: u64, timestamp: &str) -> RawItem {
    RawItem {
        id: Some(id),
        watched_at: Some(timestamp.to_string()),
        listed_at: Some(timestamp.to_string()),
        collected_at: Some(timestamp.to_string()),
        ..RawItem::default()
    }
}

pub fn movie_item(id: u64, imdb: Option<&str>, tmdb: Option<u64>, title: &str, timestamp: &str) -> RawItem {
    RawItem {
        item_type: Some("movie".to_string()),
        movie: Some(Movie {
            title: Some(title.to_string()),
            year: Some(2000),
            ids: TraktIds {
                trakt: Some(id),
                imdb: imdb.map(str::to_string),
                tmdb,
                ..TraktIds::default()
            },
        }),
        ..stamped(id, timestamp)
    }
}

pub fn show_item(id: u64, tvdb: Option<u64>, title: &str, timestamp: &str) -> RawItem {
    RawItem {
        item_type: Some("show".to_string()),
        show: Some(Show {
            title: Some(title.to_string()),
            year: Some(2008),
            ids: TraktIds {
                trakt: Some(id),
                tvdb,
                ..TraktIds::default()
            },
        }),
        ..stamped(id, timestamp)
    }
}

#[allow(clippy::too_many_arguments)]
pub fn episode_item(
    id: u64,
    tmdb: Option<u64>,
    tvdb: Option<u64>,
    season: u32,
    number: u32,
    title: Option<&str>,
    show_title: &str,
    timestamp: &str,
) -> RawItem {
    RawItem {
        item_type: Some("episode".to_string()),
        episode: Some(Episode {
            season: Some(season),
            number: Some(number),
            title: title.map(str::to_string),
            ids: TraktIds {
                trakt: Some(id),
                tmdb,
                tvdb,
                ..TraktIds::default()
            },
        }),
        show: Some(Show {
            title: Some(show_title.to_string()),
            year: None,
            ids: TraktIds::default(),
        }),
        ..stamped(id, timestamp)
    }
}

/// One recorded remove call
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveCall {
    pub refs: Vec<RemovalRef>,
    pub by_id: bool,
}

/// In-memory list source that serves fixed items and records remove calls.
///
/// Each remove call reports every ref as deleted, except calls whose index is
/// listed in `failing_calls`, which answer with a removal error.
#[derive(Default)]
pub struct RecordingSource {
    pub items: Vec<RawItem>,
    pub failing_calls: Vec<usize>,
    pub fail_fetch: bool,
    pub calls: Mutex<Vec<RemoveCall>>,
}

impl RecordingSource {
    pub fn with_items(items: Vec<RawItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RemoveCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls().iter().map(|c| c.refs.len()).collect()
    }
}

#[async_trait]
impl ListSource for RecordingSource {
    fn source_name(&self) -> &str {
        "recording"
    }

    async fn fetch_all(&self, _ctx: &RequestContext) -> Result<Vec<RawItem>, TraktError> {
        if self.fail_fetch {
            return Err(TraktError::Fetch {
                target: "history movies".to_string(),
                status: 503,
                body: String::new(),
            });
        }
        Ok(self.items.clone())
    }

    async fn fetch_userlists(&self, _user: &str) -> Result<Vec<UserList>, TraktError> {
        Ok(Vec::new())
    }

    async fn remove_batch(
        &self,
        ctx: &RequestContext,
        refs: &[RemovalRef],
        by_id: bool,
    ) -> Result<RemovalOutcome, TraktError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RemoveCall {
                refs: refs.to_vec(),
                by_id,
            });
            calls.len() - 1
        };

        if self.failing_calls.contains(&index) {
            return Err(TraktError::Removal {
                target: ctx.list_label().to_string(),
                status: 500,
                body: "boom".to_string(),
            });
        }

        Ok(RemovalOutcome {
            deleted: refs.len() as u64,
            not_found: 0,
        })
    }
}
