use gloo_storage::{LocalStorage, Storage};
use palaver_client::api::{AuthToken, NewSession};
use yew::prelude::*;

mod api;
mod ui;

const KEY_LOGIN: &str = "login";

lazy_static::lazy_static! {
    pub static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<App>::new().render();
}

/// Credentials as typed into the login form.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginCredentials {
    pub host: String,
    pub user: String,
    pub pass: String,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoginInfo {
    pub host: String,
    pub user: String,
    pub token: AuthToken,
}

enum AppMsg {
    UserLogin(LoginCredentials),
    LoginComplete(Option<LoginInfo>),
    UserLogout,
}

struct App {
    login: Option<LoginInfo>,
    logout: Option<LoginCredentials>, // host and user saved for form prefill
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        App {
            login: LocalStorage::get(KEY_LOGIN).ok(),
            logout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::UserLogin(creds) => {
                ctx.link().send_future(async move {
                    let session = NewSession {
                        user: creds.user.clone(),
                        password: creds.pass.clone(),
                        device: String::from("palaver-web"),
                    };
                    match api::auth(&creds.host, &session).await {
                        Ok(token) => AppMsg::LoginComplete(Some(LoginInfo {
                            host: creds.host,
                            user: creds.user,
                            token,
                        })),
                        // TODO: surface the failure in the login form
                        Err(e) => {
                            tracing::error!("failed to authenticate: {e:#}");
                            AppMsg::LoginComplete(None)
                        }
                    }
                });
                false
            }
            AppMsg::LoginComplete(Some(login)) => {
                LocalStorage::set(KEY_LOGIN, &login)
                    .expect("failed saving login info to LocalStorage");
                self.login = Some(login);
                true
            }
            AppMsg::LoginComplete(None) => false,
            AppMsg::UserLogout => {
                LocalStorage::delete(KEY_LOGIN);
                if let Some(login) = self.login.take() {
                    self.logout = Some(LoginCredentials {
                        host: login.host.clone(),
                        user: login.user.clone(),
                        pass: String::new(),
                    });
                    wasm_bindgen_futures::spawn_local(api::unauth(login));
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.login {
            None => html! {
                <div class="container">
                    <ui::Login
                        info={self.logout.clone()}
                        on_submit={ctx.link().callback(AppMsg::UserLogin)}
                    />
                </div>
            },
            Some(login) => html! {
                <ui::ChatPage
                    login={login.clone()}
                    on_logout={ctx.link().callback(|()| AppMsg::UserLogout)}
                />
            },
        }
    }
}
