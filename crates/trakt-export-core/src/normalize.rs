// Flattening of raw list entries into export rows

use tracing::{debug, trace};
use trakt_export_models::{ExportRow, IdFormat, ItemKind, RawItem, RequestContext, RowDetail};

/// Output of a normalization pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub rows: Vec<ExportRow>,
    /// External id of every emitted row, in fetch order. Input of duplicate
    /// detection.
    pub ids: Vec<String>,
}

/// Map one raw entry to an export row, or `None` when the entity has no
/// identifier in the active format.
///
/// Rules, first match wins:
/// 1. movies/shows with an imdb id, format imdb: titled row
/// 2. movies/shows with a tmdb id, format tmdb: titled row
/// 3. episodes with a tmdb id, format tmdb: episode row
/// 4. a tvdb id, format tvdb: episode row (titled for movies/shows)
/// 5. anything else: dropped
pub fn normalize(raw: &RawItem, ctx: &RequestContext) -> Option<ExportRow> {
    let kind = ctx.item_kind();
    let format = ctx.id_format();
    let ids = raw.ids(kind)?;

    let external_id = match format {
        IdFormat::Imdb if kind != ItemKind::Episodes => ids.get(IdFormat::Imdb)?,
        IdFormat::Tmdb | IdFormat::Tvdb => ids.get(format)?,
        _ => return None,
    };

    let detail = match kind {
        ItemKind::Movies | ItemKind::Shows => RowDetail::Titled {
            title: raw.title(kind).unwrap_or_default().to_string(),
        },
        ItemKind::Episodes => {
            let episode = raw.episode.as_ref()?;
            if episode.title.as_deref().map_or(true, str::is_empty) {
                trace!(id = %external_id, "Episode without title: {}", episode.title_or_placeholder());
            }
            RowDetail::Episode {
                season: episode.season,
                episode: episode.number,
                show_title: raw.show_title().unwrap_or_default().to_string(),
            }
        }
    };

    Some(ExportRow {
        format,
        external_id,
        timestamp_field: ctx.timestamp_field(),
        timestamp: raw.timestamp(ctx.list_kind()).unwrap_or_default().to_string(),
        detail,
    })
}

/// Normalize every entry, keeping fetch order
pub fn normalize_all(items: &[RawItem], ctx: &RequestContext) -> Normalized {
    let mut out = Normalized::default();
    let mut dropped = 0usize;

    for raw in items {
        match normalize(raw, ctx) {
            Some(row) => {
                out.ids.push(row.external_id.clone());
                out.rows.push(row);
            }
            None => dropped += 1,
        }
    }

    debug!(
        operation = "normalize",
        format = %ctx.id_format(),
        rows = out.rows.len(),
        dropped,
        "Normalized {} {}",
        items.len(),
        ctx.item_kind()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{episode_item, movie_item, show_item};
    use trakt_export_models::ListKind;

    fn ctx(list: ListKind, kind: ItemKind, format: IdFormat) -> RequestContext {
        RequestContext::new(list, kind, format).unwrap()
    }

    #[test]
    fn test_movie_imdb_row_keeps_source_fields() {
        let raw = movie_item(1, Some("tt0111161"), Some(278), "The Shawshank Redemption", "2019-01-01T10:00:00.000Z");
        let row = normalize(&raw, &ctx(ListKind::History, ItemKind::Movies, IdFormat::Imdb)).unwrap();

        assert_eq!(row.format, IdFormat::Imdb);
        assert_eq!(row.external_id, "tt0111161");
        assert_eq!(row.timestamp_field, "watched_at");
        assert_eq!(row.timestamp, "2019-01-01T10:00:00.000Z");
        assert_eq!(
            row.detail,
            RowDetail::Titled {
                title: "The Shawshank Redemption".to_string()
            }
        );
    }

    #[test]
    fn test_movie_tmdb_row() {
        let raw = movie_item(1, Some("tt0111161"), Some(278), "The Shawshank Redemption", "2019-01-01T10:00:00.000Z");
        let row = normalize(&raw, &ctx(ListKind::History, ItemKind::Movies, IdFormat::Tmdb)).unwrap();
        assert_eq!(row.external_id, "278");
        assert_eq!(row.field_names(), vec!["tmdb", "watched_at", "title"]);
    }

    #[test]
    fn test_missing_namespace_is_dropped() {
        let raw = movie_item(1, None, Some(278), "No Imdb", "2019-01-01T10:00:00.000Z");
        assert!(normalize(&raw, &ctx(ListKind::History, ItemKind::Movies, IdFormat::Imdb)).is_none());

        let empty_imdb = movie_item(2, Some(""), None, "Empty Imdb", "2019-01-01T10:00:00.000Z");
        assert!(normalize(&empty_imdb, &ctx(ListKind::History, ItemKind::Movies, IdFormat::Imdb)).is_none());
    }

    #[test]
    fn test_episode_row_uses_tmdb_even_when_imdb_requested() {
        let context = ctx(ListKind::History, ItemKind::Episodes, IdFormat::Imdb);
        assert!(context.format_forced());

        let raw = episode_item(9, Some(62085), Some(349232), 1, 1, None, "Breaking Bad", "2020-02-02T20:00:00.000Z");
        let row = normalize(&raw, &context).unwrap();

        assert_eq!(row.external_id, "62085");
        assert_eq!(row.field_names(), vec!["tmdb", "watched_at", "season", "episode", "show_title"]);
        assert_eq!(
            row.detail,
            RowDetail::Episode {
                season: Some(1),
                episode: Some(1),
                show_title: "Breaking Bad".to_string()
            }
        );
    }

    #[test]
    fn test_show_tvdb_row_is_titled() {
        let raw = show_item(3, Some(81189), "Breaking Bad", "2021-03-03T00:00:00.000Z");
        let row = normalize(&raw, &ctx(ListKind::Watchlist, ItemKind::Shows, IdFormat::Tvdb)).unwrap();
        assert_eq!(row.external_id, "81189");
        assert_eq!(row.timestamp_field, "listed_at");
        assert_eq!(row.field_names(), vec!["tvdb", "listed_at", "title"]);
    }

    #[test]
    fn test_formats_without_a_rule_emit_nothing() {
        let raw = movie_item(1, Some("tt0111161"), Some(278), "Movie", "2019-01-01T10:00:00.000Z");
        for format in [IdFormat::Tvrage, IdFormat::Trakt] {
            assert!(normalize(&raw, &ctx(ListKind::History, ItemKind::Movies, format)).is_none());
        }
    }

    #[test]
    fn test_normalize_all_collects_ids_of_emitted_rows() {
        let items = vec![
            movie_item(1, Some("tt01"), None, "A", "2019-01-01T00:00:00.000Z"),
            movie_item(2, None, Some(5), "B", "2019-01-02T00:00:00.000Z"),
            movie_item(3, Some("tt01"), None, "A again", "2019-01-03T00:00:00.000Z"),
        ];
        let normalized = normalize_all(&items, &ctx(ListKind::History, ItemKind::Movies, IdFormat::Imdb));
        assert_eq!(normalized.rows.len(), 2);
        assert_eq!(normalized.ids, vec!["tt01", "tt01"]);
    }
}
