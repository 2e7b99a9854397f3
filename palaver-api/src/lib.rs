use async_trait::async_trait;
use chrono::Utc;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod auth;
pub use auth::{AuthToken, NewSession};

mod error;
pub use error::Error;

mod message;
pub use message::{Message, MessageFeed, MessageId, NewMessage};

mod user;
pub use user::{NewUser, OnlineUsers, User, UserId};

pub(crate) fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(s.to_string())),
        false => Ok(()),
    }
}

/// The four operations the chat backend exposes to a client.
///
/// `?Send` because the browser implementation runs its futures on the
/// single-threaded wasm event loop.
#[async_trait(?Send)]
pub trait ChatApi {
    async fn fetch_online_users(&self) -> anyhow::Result<Vec<User>>;

    /// The full message feed, newest first.
    async fn fetch_messages(&self) -> anyhow::Result<Vec<Message>>;

    async fn fetch_user(&self, id: UserId) -> anyhow::Result<User>;

    /// The server acknowledgement carries nothing the client uses.
    async fn send_message(&self, msg: NewMessage) -> anyhow::Result<()>;
}
