use std::{collections::HashMap, sync::Arc};

use crate::api::{Message, MessageId, Time, User, UserId};

/// A message joined with its author's cached display name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostedMessage {
    pub id: MessageId,
    pub author_id: UserId,
    pub username: String,
    pub body: String,
    pub sent_at: Time,
}

/// Everything the chat page renders from. Updates swap whole `Arc`s, so a
/// clone taken at the start of a poll tick stays a consistent snapshot no
/// matter what lands while the tick's fetches are in flight.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChatState {
    /// Author id to display name. Grows for the lifetime of the page, never
    /// evicted, populated the first time a message by that author shows up.
    pub usernames: Arc<HashMap<UserId, String>>,
    pub online: Arc<Vec<User>>,
    pub messages: Arc<Vec<PostedMessage>>,
}

/// Replacement values for the message half of the state, applied in one step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeedUpdate {
    pub usernames: HashMap<UserId, String>,
    pub messages: Vec<PostedMessage>,
}

impl ChatState {
    pub fn stub() -> ChatState {
        ChatState {
            usernames: Arc::new(HashMap::new()),
            online: Arc::new(Vec::new()),
            messages: Arc::new(Vec::new()),
        }
    }

    pub fn set_online_users(&mut self, users: Vec<User>) {
        self.online = Arc::new(users);
    }

    /// Head id plus length stands in for content equality here: an in-place
    /// edit that keeps both stable goes unnoticed until the feed changes
    /// shape again.
    pub fn feed_unchanged(&self, fetched: &[Message]) -> bool {
        match (self.messages.first(), fetched.first()) {
            (Some(cur), Some(new)) => cur.id == new.id && self.messages.len() == fetched.len(),
            _ => false,
        }
    }

    /// One lookup per message, each checked against the pre-tick snapshot of
    /// the cache: several messages by a not-yet-cached author all get their
    /// own fetch on that tick.
    pub fn authors_to_fetch(&self, fetched: &[Message]) -> Vec<UserId> {
        fetched
            .iter()
            .map(|m| m.author_id)
            .filter(|id| !self.usernames.contains_key(id))
            .collect()
    }

    /// Builds the replacement snapshot for a changed feed: the freshly
    /// resolved authors extend the cache, then every message is joined with
    /// its cached name, in server order.
    pub fn enrich(&self, fetched: Vec<Message>, authors: Vec<User>) -> FeedUpdate {
        let mut usernames = (*self.usernames).clone();
        usernames.extend(authors.into_iter().map(|u| (u.id, u.username)));
        let messages = fetched
            .into_iter()
            .map(|m| {
                let username = match usernames.get(&m.author_id) {
                    Some(name) => name.clone(),
                    None => {
                        tracing::warn!(author=?m.author_id, "message author missing from username cache");
                        String::new()
                    }
                };
                PostedMessage {
                    id: m.id,
                    author_id: m.author_id,
                    username,
                    body: m.body,
                    sent_at: m.sent_at,
                }
            })
            .collect();
        FeedUpdate {
            usernames,
            messages,
        }
    }

    pub fn apply_feed(&mut self, update: FeedUpdate) {
        self.usernames = Arc::new(update.usernames);
        self.messages = Arc::new(update.messages);
    }
}
