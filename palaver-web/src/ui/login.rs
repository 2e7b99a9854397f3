use yew::prelude::*;

use crate::LoginCredentials;

#[derive(Clone, PartialEq, Properties)]
pub struct LoginProps {
    /// Prefill from the previous session, so signing back in only asks for
    /// the password again.
    pub info: Option<LoginCredentials>,
    pub on_submit: Callback<LoginCredentials>,
}

#[function_component(Login)]
pub fn login(p: &LoginProps) -> Html {
    let host_ref = use_node_ref();
    let user_ref = use_node_ref();
    let pass_ref = use_node_ref();

    let (host, user) = match &p.info {
        Some(i) => (i.host.clone(), i.user.clone()),
        None => (String::new(), String::new()),
    };

    let onsubmit = {
        let host_ref = host_ref.clone();
        let user_ref = user_ref.clone();
        let pass_ref = pass_ref.clone();
        let on_submit = p.on_submit.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            let value = |r: &NodeRef| {
                r.cast::<web_sys::HtmlInputElement>()
                    .expect("login field is not an html input element")
                    .value()
            };
            on_submit.emit(LoginCredentials {
                host: value(&host_ref),
                user: value(&user_ref),
                pass: value(&pass_ref),
            });
        })
    };

    html! {
        <form class="login-form mx-auto my-5" {onsubmit}>
            <h1 class="text-center mb-4">{ "Palaver" }</h1>
            <div class="mb-3">
                <label class="form-label" for="host">{ "Server" }</label>
                <input
                    ref={ host_ref }
                    type="url"
                    class="form-control"
                    id="host"
                    placeholder="https://palaver.example.org"
                    value={ host }
                />
            </div>
            <div class="mb-3">
                <label class="form-label" for="user">{ "Username" }</label>
                <input
                    ref={ user_ref }
                    type="text"
                    class="form-control"
                    id="user"
                    autocomplete="username"
                    value={ user }
                />
            </div>
            <div class="mb-3">
                <label class="form-label" for="pass">{ "Password" }</label>
                <input
                    ref={ pass_ref }
                    type="password"
                    class="form-control"
                    id="pass"
                    autocomplete="current-password"
                />
            </div>
            <button type="submit" class="btn btn-primary w-100">
                { "Sign in" }
            </button>
        </form>
    }
}
