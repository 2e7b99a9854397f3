use anyhow::{ensure, Context};
use async_trait::async_trait;
use palaver_client::api::{
    AuthToken, ChatApi, Message, MessageFeed, NewMessage, NewSession, OnlineUsers, User, UserId,
};

use crate::LoginInfo;

pub async fn auth(host: &str, session: &NewSession) -> anyhow::Result<AuthToken> {
    let resp = crate::CLIENT
        .post(format!("{}/api/auth", host))
        .json(session)
        .send()
        .await
        .context("sending authentication request")?;
    ensure!(
        resp.status().is_success(),
        "authentication refused: {}",
        resp.status()
    );
    resp.json()
        .await
        .context("parsing authentication response")
}

pub async fn unauth(login: LoginInfo) {
    let resp = crate::CLIENT
        .post(format!("{}/api/unauth", login.host))
        .bearer_auth(login.token.0)
        .send()
        .await;
    match resp {
        Err(e) => tracing::error!("failed to unauth: {:?}", e),
        Ok(resp) if !resp.status().is_success() => {
            tracing::error!("failed to unauth: response is not success {:?}", resp)
        }
        Ok(_) => (),
    }
}

/// The live backend, reached over REST with the session's bearer token.
pub struct HttpApi {
    login: LoginInfo,
}

impl HttpApi {
    pub fn new(login: LoginInfo) -> HttpApi {
        HttpApi { login }
    }

    async fn get<R>(&self, path: &str) -> anyhow::Result<R>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let resp = crate::CLIENT
            .get(format!("{}/api/{}", self.login.host, path))
            .bearer_auth(self.login.token.0)
            .send()
            .await
            .with_context(|| format!("fetching /api/{path}"))?;
        ensure!(
            resp.status().is_success(),
            "/api/{} returned {}",
            path,
            resp.status()
        );
        resp.json()
            .await
            .with_context(|| format!("parsing /api/{path} response"))
    }
}

#[async_trait(?Send)]
impl ChatApi for HttpApi {
    async fn fetch_online_users(&self) -> anyhow::Result<Vec<User>> {
        let resp: OnlineUsers = self.get("users/online").await?;
        Ok(resp.users)
    }

    async fn fetch_messages(&self) -> anyhow::Result<Vec<Message>> {
        let resp: MessageFeed = self.get("messages").await?;
        Ok(resp.messages)
    }

    async fn fetch_user(&self, id: UserId) -> anyhow::Result<User> {
        self.get(&format!("users/{}", id.0)).await
    }

    async fn send_message(&self, msg: NewMessage) -> anyhow::Result<()> {
        let resp = crate::CLIENT
            .post(format!("{}/api/messages", self.login.host))
            .bearer_auth(self.login.token.0)
            .json(&msg)
            .send()
            .await
            .context("submitting message")?;
        ensure!(
            resp.status().is_success(),
            "message submission returned {}",
            resp.status()
        );
        Ok(())
    }
}
