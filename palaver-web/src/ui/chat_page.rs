use std::time::Duration;

use futures::channel::oneshot;
use palaver_client::{
    api::{ChatApi, NewMessage, User},
    refresh_feed, refresh_online_users, run_poller, stop_pollers_then, ChatState, FeedUpdate,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{api, ui, LoginInfo};

const APP_NAME: &str = "Palaver";
const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, PartialEq, Properties)]
pub struct ChatPageProps {
    pub login: LoginInfo,
    pub on_logout: Callback<()>,
}

pub enum ChatPageMsg {
    UsersTick,
    FeedTick,
    UsersRefreshed(Vec<User>),
    FeedRefreshed(FeedUpdate),
    PostMessage(String),
    Logout,
    Nothing,
}

pub struct ChatPage {
    state: ChatState,
    users_canceller: oneshot::Receiver<()>,
    feed_canceller: oneshot::Receiver<()>,
}

impl Component for ChatPage {
    type Message = ChatPageMsg;
    type Properties = ChatPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        // One poller per resource, independent phase, immediate first tick.
        // The cancellers close on drop, so unmounting stops both timers;
        // fetches already in flight are left to resolve into a dead scope.
        let (users_cancel, users_canceller) = oneshot::channel();
        let link = ctx.link().clone();
        spawn_local(run_poller(POLL_INTERVAL, users_cancel, move || {
            link.send_message(ChatPageMsg::UsersTick)
        }));

        let (feed_cancel, feed_canceller) = oneshot::channel();
        let link = ctx.link().clone();
        spawn_local(run_poller(POLL_INTERVAL, feed_cancel, move || {
            link.send_message(ChatPageMsg::FeedTick)
        }));

        ChatPage {
            state: ChatState::stub(),
            users_canceller,
            feed_canceller,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ChatPageMsg::UsersTick => {
                let api = api::HttpApi::new(ctx.props().login.clone());
                ctx.link().send_future(async move {
                    match refresh_online_users(&api).await {
                        Ok(users) => ChatPageMsg::UsersRefreshed(users),
                        Err(e) => {
                            tracing::error!("failed to refresh online users: {e:#}");
                            ChatPageMsg::Nothing
                        }
                    }
                });
                false
            }
            ChatPageMsg::FeedTick => {
                let api = api::HttpApi::new(ctx.props().login.clone());
                let snapshot = self.state.clone();
                ctx.link().send_future(async move {
                    match refresh_feed(&api, &snapshot).await {
                        Ok(Some(update)) => ChatPageMsg::FeedRefreshed(update),
                        Ok(None) => ChatPageMsg::Nothing,
                        Err(e) => {
                            tracing::error!("failed to refresh message feed: {e:#}");
                            ChatPageMsg::Nothing
                        }
                    }
                });
                false
            }
            ChatPageMsg::UsersRefreshed(users) => {
                self.state.set_online_users(users);
                true
            }
            ChatPageMsg::FeedRefreshed(update) => {
                self.state.apply_feed(update);
                true
            }
            ChatPageMsg::PostMessage(body) => {
                // No local echo: the message shows up on the next feed tick
                // that sees it.
                let api = api::HttpApi::new(ctx.props().login.clone());
                ctx.link().send_future(async move {
                    match api.send_message(NewMessage { body }).await {
                        Ok(()) => tracing::debug!("message sent"),
                        Err(e) => tracing::error!("failed to send message: {e:#}"),
                    }
                    ChatPageMsg::Nothing
                });
                false
            }
            ChatPageMsg::Logout => {
                let on_logout = ctx.props().on_logout.clone();
                stop_pollers_then(&mut self.users_canceller, &mut self.feed_canceller, move || {
                    on_logout.emit(())
                });
                false
            }
            ChatPageMsg::Nothing => false,
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="chat-page vh-100 d-flex flex-column">
                <header class="chat-header d-flex align-items-center justify-content-between border-bottom p-2">
                    <h1 class="m-0 fs-4">{ APP_NAME }</h1>
                    <button
                        type="button"
                        class="btn btn-outline-secondary"
                        onclick={ctx.link().callback(|_| ChatPageMsg::Logout)}
                    >
                        { "Log out" }
                    </button>
                </header>
                <div class="row flex-fill overflow-hidden g-0">
                    <nav class="col-md-2 h-100 overflow-auto border-end">
                        <ui::UserList users={self.state.online.clone()} />
                    </nav>
                    <main class="col-md-10 h-100 d-flex flex-column">
                        <div class="flex-fill overflow-auto">
                            <ui::MessageList messages={self.state.messages.clone()} />
                        </div>
                        <ui::MessageInput on_send={ctx.link().callback(ChatPageMsg::PostMessage)} />
                    </main>
                </div>
            </div>
        }
    }
}
