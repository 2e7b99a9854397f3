use anyhow::Context;
use futures::future::try_join_all;

use crate::{
    api::{ChatApi, User},
    ChatState, FeedUpdate,
};

/// One tick of the user poller. The caller replaces its list wholesale with
/// whatever comes back.
pub async fn refresh_online_users(api: &impl ChatApi) -> anyhow::Result<Vec<User>> {
    api.fetch_online_users()
        .await
        .context("fetching online user list")
}

/// One tick of the message poller.
///
/// Returns `None` when the fetched feed is judged unchanged, in which case no
/// author lookup is issued at all. Otherwise every author missing from the
/// cache snapshot is resolved concurrently; a single failed lookup fails the
/// whole tick, so the caller never applies a partially-enriched feed.
pub async fn refresh_feed(
    api: &impl ChatApi,
    state: &ChatState,
) -> anyhow::Result<Option<FeedUpdate>> {
    let fetched = api.fetch_messages().await.context("fetching message feed")?;
    if state.feed_unchanged(&fetched) {
        return Ok(None);
    }
    let authors = try_join_all(
        state
            .authors_to_fetch(&fetched)
            .into_iter()
            .map(|id| api.fetch_user(id)),
    )
    .await
    .context("resolving message authors")?;
    Ok(Some(state.enrich(fetched, authors)))
}
