use crate::{validate_string, Error, Time, UserId, STUB_UUID, Uuid};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn stub() -> MessageId {
        MessageId(STUB_UUID)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Message {
    pub id: MessageId,
    pub author_id: UserId,
    pub body: String,
    pub sent_at: Time,
}

/// Body of the "list messages" response.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MessageFeed {
    pub messages: Vec<Message>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewMessage {
    pub body: String,
}

impl NewMessage {
    pub fn validate(&self) -> Result<(), Error> {
        validate_string(&self.body)
    }
}
