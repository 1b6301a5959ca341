// Batched removal of list entries

use tracing::{debug, error, info, warn};
use trakt_export_models::{CleanupTally, RawItem, RemovalRef, RequestContext};
use trakt_export_source::ListSource;

/// Largest number of refs sent in one remove call
pub const REMOVAL_BATCH_SIZE: usize = 10;

/// Collects refs and sends them in batches of [`REMOVAL_BATCH_SIZE`].
///
/// A batch is cleared after its call whatever the outcome. A failed call is
/// logged and counted as sent; the pass goes on with the next batch.
pub struct RemovalQueue<'a> {
    source: &'a dyn ListSource,
    ctx: &'a RequestContext,
    by_id: bool,
    pending: Vec<RemovalRef>,
    tally: CleanupTally,
}

impl<'a> RemovalQueue<'a> {
    pub fn new(source: &'a dyn ListSource, ctx: &'a RequestContext, by_id: bool) -> Self {
        Self {
            source,
            ctx,
            by_id,
            pending: Vec::with_capacity(REMOVAL_BATCH_SIZE),
            tally: CleanupTally::default(),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub async fn push(&mut self, removal: RemovalRef) {
        self.pending.push(removal);
        if self.pending.len() >= REMOVAL_BATCH_SIZE {
            self.flush().await;
        }
    }

    async fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let batch = std::mem::take(&mut self.pending);
        self.tally.record_sent(batch.len());

        match self.source.remove_batch(self.ctx, &batch, self.by_id).await {
            Ok(outcome) => {
                debug!(
                    batch = self.tally.batches,
                    size = batch.len(),
                    deleted = outcome.deleted,
                    not_found = outcome.not_found,
                    "Removal batch done"
                );
                self.tally.record_outcome(&outcome);
            }
            Err(e) => {
                error!(batch = self.tally.batches, size = batch.len(), "{}", e);
            }
        }
    }

    /// Send the remaining partial batch and return the pass totals
    pub async fn finish(mut self) -> CleanupTally {
        self.flush().await;
        self.tally
    }
}

/// Remove every fetched entry from the list, addressing each by the ids of
/// its entity
pub async fn clean_list(source: &dyn ListSource, ctx: &RequestContext, items: &[RawItem]) -> CleanupTally {
    let mut queue = RemovalQueue::new(source, ctx, false);

    for item in items {
        match item.ids(ctx.item_kind()) {
            Some(ids) => queue.push(RemovalRef::Entity { ids: ids.clone() }).await,
            None => warn!(entry = ?item.id, "Entry without {} payload skipped", ctx.item_kind().entity_key()),
        }
    }

    let tally = queue.finish().await;
    info!(
        operation = "cleanup",
        "Overall cleanup {} {}, results deleted:{}, not_found:{}",
        tally.sent,
        ctx.item_kind(),
        tally.deleted,
        tally.not_found
    );
    tally
}

/// Remove the given duplicate entries by their list entry id
pub async fn remove_duplicates(
    source: &dyn ListSource,
    ctx: &RequestContext,
    refs: Vec<RemovalRef>,
    duplicate_count: usize,
) -> CleanupTally {
    let mut queue = RemovalQueue::new(source, ctx, true);
    for removal in refs {
        queue.push(removal).await;
    }

    let tally = queue.finish().await;
    info!(
        operation = "dedupe",
        "Overall {} duplicate {} {}, results deleted:{}, not_found:{}",
        duplicate_count,
        tally.sent,
        ctx.item_kind(),
        tally.deleted,
        tally.not_found
    );
    tally
}
