use async_trait::async_trait;
use reqwest::Client;
use tracing::info;
use trakt_export_config::HttpSettings;
use trakt_export_models::{ListKind, RawItem, RemovalOutcome, RemovalRef, RequestContext, UserList, PAGE_LIMIT};

use crate::error::TraktError;
use crate::traits::ListSource;
use crate::trakt::api;
use crate::trakt::auth::AuthHeaders;

const USER_AGENT: &str = "trakt-export";

/// Build the HTTP client shared by the token exchange and every data call
pub fn create_trakt_client(settings: &HttpSettings) -> Result<Client, TraktError> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.timeout);

    if let Some(proxy_url) = &settings.proxy_url {
        info!("Using proxy {}", proxy_url);
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }

    Ok(builder.build()?)
}

#[derive(Clone)]
pub struct TraktClient {
    http: Client,
    base_url: String,
    headers: AuthHeaders,
}

impl TraktClient {
    pub fn new(http: Client, base_url: impl Into<String>, headers: AuthHeaders) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            headers,
        }
    }

    async fn fetch_sync_list(&self, ctx: &RequestContext) -> Result<Vec<RawItem>, TraktError> {
        let target = format!("{} {}", ctx.list_kind(), ctx.item_kind());
        api::fetch_paginated(&self.http, &self.headers, &target, |page| {
            api::sync_list_url(&self.base_url, ctx.list_kind(), ctx.item_kind(), page, ctx.page_size())
        })
        .await
    }

    async fn fetch_user_list_items(
        &self,
        ctx: &RequestContext,
        user: &str,
        list_id: &str,
    ) -> Result<Vec<RawItem>, TraktError> {
        let target = format!("{} list {} {}", user, list_id, ctx.item_kind());
        api::fetch_paginated(&self.http, &self.headers, &target, |page| {
            api::user_list_items_url(&self.base_url, user, list_id, ctx.item_kind(), page, ctx.page_size())
        })
        .await
    }
}

impl std::fmt::Debug for TraktClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraktClient")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .finish()
    }
}

#[async_trait]
impl ListSource for TraktClient {
    async fn fetch_all(&self, ctx: &RequestContext) -> Result<Vec<RawItem>, TraktError> {
        match (ctx.list_kind(), ctx.user(), ctx.list_id()) {
            (ListKind::UserList, Some(user), Some(list_id)) => {
                self.fetch_user_list_items(ctx, user, list_id).await
            }
            (ListKind::UserList, _, _) => Err(TraktError::Configuration(
                "a named user list needs a user handle and a list id".to_string(),
            )),
            _ => self.fetch_sync_list(ctx).await,
        }
    }

    async fn fetch_userlists(&self, user: &str) -> Result<Vec<UserList>, TraktError> {
        let target = format!("{} lists", user);
        api::fetch_paginated(&self.http, &self.headers, &target, |page| {
            api::user_lists_url(&self.base_url, user, page, PAGE_LIMIT)
        })
        .await
    }

    async fn remove_batch(
        &self,
        ctx: &RequestContext,
        refs: &[RemovalRef],
        by_id: bool,
    ) -> Result<RemovalOutcome, TraktError> {
        api::post_removal(&self.http, &self.headers, &self.base_url, ctx, refs, by_id).await
    }
}
