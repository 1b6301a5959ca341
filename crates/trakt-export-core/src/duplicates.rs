use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};
use trakt_export_models::{RawItem, RemovalRef, RequestContext};

/// Identifiers occurring more than once, each reported once, in order of
/// first appearance
pub fn find_duplicates(ids: &[String]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in ids {
        *counts.entry(id.as_str()).or_insert(0) += 1;
    }

    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| counts.get(id.as_str()).copied().unwrap_or(0) > 1)
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Pick the entries to delete so that each duplicated identifier keeps only
/// its first occurrence in fetch order.
///
/// Entries are matched on the identifier of the active format and referenced
/// by their service-assigned entry id.
pub fn select_for_removal(items: &[RawItem], duplicates: &[String], ctx: &RequestContext) -> Vec<RemovalRef> {
    let wanted: HashSet<&str> = duplicates.iter().map(String::as_str).collect();
    let mut kept: HashSet<String> = HashSet::new();
    let mut refs = Vec::new();

    for item in items {
        let Some(external_id) = item.external_id(ctx.item_kind(), ctx.id_format()) else {
            continue;
        };
        if !wanted.contains(external_id.as_str()) {
            continue;
        }
        if kept.insert(external_id.clone()) {
            debug!(id = %external_id, entry = ?item.id, "Keeping first occurrence");
            continue;
        }

        match item.id {
            Some(entry_id) => {
                info!("Removing {} {}", external_id, entry_id);
                refs.push(RemovalRef::ItemId(entry_id));
            }
            None => warn!(id = %external_id, "Duplicate entry has no list id, it cannot be removed"),
        }
    }

    refs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::movie_item;
    use trakt_export_models::{IdFormat, ItemKind, ListKind};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_find_duplicates_reports_each_value_once() {
        let found = find_duplicates(&ids(&["tt3", "tt1", "tt2", "tt1", "tt3", "tt1"]));
        assert_eq!(found, ids(&["tt3", "tt1"]));
    }

    #[test]
    fn test_find_duplicates_on_deduplicated_input_is_empty() {
        let input = ids(&["tt1", "tt2", "tt1", "tt3"]);
        let mut deduped: Vec<String> = Vec::new();
        for id in &input {
            if !deduped.contains(id) {
                deduped.push(id.clone());
            }
        }
        assert!(find_duplicates(&deduped).is_empty());
        assert!(find_duplicates(&[]).is_empty());
    }

    #[test]
    fn test_select_keeps_first_occurrence() {
        let ctx = RequestContext::new(ListKind::History, ItemKind::Movies, IdFormat::Imdb).unwrap();
        let items = vec![
            movie_item(10, Some("tt1"), None, "One", "2020-01-01T00:00:00.000Z"),
            movie_item(11, Some("tt2"), None, "Two", "2020-01-02T00:00:00.000Z"),
            movie_item(12, Some("tt1"), None, "One", "2020-01-03T00:00:00.000Z"),
            movie_item(13, Some("tt1"), None, "One", "2020-01-04T00:00:00.000Z"),
        ];
        let normalized = crate::normalize::normalize_all(&items, &ctx);
        let duplicates = find_duplicates(&normalized.ids);

        let refs = select_for_removal(&items, &duplicates, &ctx);
        assert_eq!(refs, vec![RemovalRef::ItemId(12), RemovalRef::ItemId(13)]);
    }

    #[test]
    fn test_select_matches_on_active_format() {
        let ctx = RequestContext::new(ListKind::Watchlist, ItemKind::Movies, IdFormat::Tmdb).unwrap();
        let items = vec![
            movie_item(1, Some("tt1"), Some(500), "A", "2020-01-01T00:00:00.000Z"),
            movie_item(2, Some("tt2"), Some(500), "A (dup)", "2020-01-02T00:00:00.000Z"),
        ];
        let refs = select_for_removal(&items, &ids(&["500"]), &ctx);
        assert_eq!(refs, vec![RemovalRef::ItemId(2)]);
    }

    #[test]
    fn test_select_skips_entries_without_list_id() {
        let ctx = RequestContext::new(ListKind::History, ItemKind::Movies, IdFormat::Imdb).unwrap();
        let mut second = movie_item(2, Some("tt1"), None, "A", "2020-01-02T00:00:00.000Z");
        second.id = None;
        let items = vec![movie_item(1, Some("tt1"), None, "A", "2020-01-01T00:00:00.000Z"), second];

        assert!(select_for_removal(&items, &ids(&["tt1"]), &ctx).is_empty());
    }
}
