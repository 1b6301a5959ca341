use async_trait::async_trait;
use trakt_export_models::{RawItem, RemovalOutcome, RemovalRef, RequestContext, UserList};

use crate::error::TraktError;

/// Remote collection that can be read page by page and pruned in batches
#[async_trait]
pub trait ListSource: Send + Sync {
    fn source_name(&self) -> &str {
        "trakt"
    }

    /// Every entry of the list addressed by `ctx`, in service order.
    ///
    /// Fails only when the first page cannot be fetched; a failure on a later
    /// page ends pagination and yields what was already collected.
    async fn fetch_all(&self, ctx: &RequestContext) -> Result<Vec<RawItem>, TraktError>;

    /// Named lists owned by `user`
    async fn fetch_userlists(&self, user: &str) -> Result<Vec<UserList>, TraktError>;

    /// Remove one batch from the list addressed by `ctx`. With `by_id` the refs
    /// are service-assigned entry ids rather than entity identifier sets.
    async fn remove_batch(
        &self,
        ctx: &RequestContext,
        refs: &[RemovalRef],
        by_id: bool,
    ) -> Result<RemovalOutcome, TraktError>;
}
