use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use trakt_export_models::{ItemKind, ListKind, RemovalOutcome, RemovalRef, RequestContext};
use urlencoding::encode;

use crate::error::TraktError;
use crate::trakt::auth::AuthHeaders;
use crate::trakt::pagination::{PageCursor, PAGE_COUNT_HEADER};

/// One decoded page plus the page count header, if the service sent one
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_count: Option<u32>,
}

/// `GET /sync/{list}/{type}`
pub fn sync_list_url(base: &str, list: ListKind, kind: ItemKind, page: u32, limit: u32) -> String {
    format!(
        "{}/sync/{}/{}?page={}&limit={}",
        base, list, kind, page, limit
    )
}

/// `GET /users/{user}/lists/{list_id}/items/{type}`
pub fn user_list_items_url(base: &str, user: &str, list_id: &str, kind: ItemKind, page: u32, limit: u32) -> String {
    format!(
        "{}/users/{}/lists/{}/items/{}?page={}&limit={}",
        base,
        encode(user),
        encode(list_id),
        kind,
        page,
        limit
    )
}

/// `GET /users/{user}/lists`
pub fn user_lists_url(base: &str, user: &str, page: u32, limit: u32) -> String {
    format!("{}/users/{}/lists?page={}&limit={}", base, encode(user), page, limit)
}

/// Remove endpoint of the list addressed by `ctx`
pub fn remove_url(base: &str, ctx: &RequestContext) -> String {
    match (ctx.list_kind(), ctx.user(), ctx.list_id()) {
        (ListKind::UserList, Some(user), Some(list_id)) => format!(
            "{}/users/{}/lists/{}/items/remove",
            base,
            encode(user),
            encode(list_id)
        ),
        (list, _, _) => format!("{}/sync/{}/remove", base, list),
    }
}

/// Body of a remove call: refs keyed by item kind, or by `ids` when the refs
/// are service-assigned entry ids
pub fn removal_body(ctx: &RequestContext, refs: &[RemovalRef], by_id: bool) -> Result<Value, TraktError> {
    let key = if by_id { "ids" } else { ctx.item_kind().as_str() };
    let mut body = Map::new();
    body.insert(key.to_string(), serde_json::to_value(refs)?);
    Ok(Value::Object(body))
}

/// Fetch and decode a single page
pub async fn get_page<T: DeserializeOwned>(
    http: &Client,
    headers: &AuthHeaders,
    url: &str,
    target: &str,
) -> Result<Page<T>, TraktError> {
    debug!(url = %url, "GET");
    let response = headers.apply(http.get(url)).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(TraktError::Fetch {
            target: target.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let page_count = response
        .headers()
        .get(PAGE_COUNT_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u32>().ok());

    let text = response.text().await?;
    let items: Vec<T> = serde_json::from_str(&text)?;

    Ok(Page { items, page_count })
}

/// Follow pages 1..N of a paginated endpoint and return every item in order.
///
/// `route` builds the URL for a page number. A failed first page is an
/// error; a failure further on stops pagination and keeps what was
/// collected so far.
pub async fn fetch_paginated<T, F>(
    http: &Client,
    headers: &AuthHeaders,
    target: &str,
    route: F,
) -> Result<Vec<T>, TraktError>
where
    T: DeserializeOwned,
    F: Fn(u32) -> String,
{
    let mut cursor = PageCursor::new();
    let mut items = Vec::new();

    loop {
        let url = route(cursor.current());
        let page = match get_page::<T>(http, headers, &url, target).await {
            Ok(page) => page,
            Err(e) if cursor.is_first() => return Err(e),
            Err(e) => {
                warn!(
                    page = cursor.current(),
                    kept = items.len(),
                    "{}; keeping the items fetched so far",
                    e
                );
                return Ok(items);
            }
        };

        let page_len = page.items.len();
        items.extend(page.items);
        cursor.record_page_count(page.page_count);

        match cursor.total() {
            Some(total) if total > 0 => {
                info!(
                    page = cursor.current(),
                    total_pages = total,
                    items_on_page = page_len,
                    "Fetched page {} of {} pages for {}",
                    cursor.current(),
                    total,
                    target
                );
            }
            _ => {
                info!("No pages found after API call, {} may be empty", target);
                break;
            }
        }

        if !cursor.advance() {
            break;
        }
    }

    Ok(items)
}

/// Send one remove batch and read back the counts
pub async fn post_removal(
    http: &Client,
    headers: &AuthHeaders,
    base: &str,
    ctx: &RequestContext,
    refs: &[RemovalRef],
    by_id: bool,
) -> Result<RemovalOutcome, TraktError> {
    let url = remove_url(base, ctx);
    let body = removal_body(ctx, refs, by_id)?;
    debug!(url = %url, body = %body, "POST");

    let response = headers.apply(http.post(&url)).json(&body).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        let text = response.text().await.unwrap_or_default();
        return Err(TraktError::Removal {
            target: ctx.list_label().to_string(),
            status: status.as_u16(),
            body: text,
        });
    }

    let result: Value = response.json().await?;
    debug!("Result: {}", result);
    Ok(RemovalOutcome::from_response(&result, ctx.item_kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trakt_export_models::{IdFormat, TraktIds};

    const BASE: &str = "https://api.trakt.tv";

    #[test]
    fn test_list_urls() {
        assert_eq!(
            sync_list_url(BASE, ListKind::History, ItemKind::Movies, 2, 1000),
            "https://api.trakt.tv/sync/history/movies?page=2&limit=1000"
        );
        assert_eq!(
            user_list_items_url(BASE, "sean rudford", "my-list", ItemKind::Shows, 1, 1000),
            "https://api.trakt.tv/users/sean%20rudford/lists/my-list/items/shows?page=1&limit=1000"
        );
        assert_eq!(
            user_lists_url(BASE, "sean", 1, 1000),
            "https://api.trakt.tv/users/sean/lists?page=1&limit=1000"
        );
    }

    #[test]
    fn test_remove_urls() {
        let ctx = RequestContext::new(ListKind::Watchlist, ItemKind::Movies, IdFormat::Imdb).unwrap();
        assert_eq!(remove_url(BASE, &ctx), "https://api.trakt.tv/sync/watchlist/remove");

        let ctx = RequestContext::user_list("sean", "123", ItemKind::Movies, IdFormat::Imdb).unwrap();
        assert_eq!(remove_url(BASE, &ctx), "https://api.trakt.tv/users/sean/lists/123/items/remove");
    }

    #[test]
    fn test_removal_body_keys() {
        let ctx = RequestContext::new(ListKind::History, ItemKind::Episodes, IdFormat::Tmdb).unwrap();
        let refs = vec![RemovalRef::Entity {
            ids: TraktIds {
                tmdb: Some(62085),
                ..TraktIds::default()
            },
        }];
        assert_eq!(
            removal_body(&ctx, &refs, false).unwrap(),
            json!({ "episodes": [ { "ids": { "tmdb": 62085 } } ] })
        );

        let refs = vec![RemovalRef::ItemId(11), RemovalRef::ItemId(12)];
        assert_eq!(removal_body(&ctx, &refs, true).unwrap(), json!({ "ids": [11, 12] }));
    }
}
