use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct MessageInputProps {
    pub on_send: Callback<String>,
}

#[function_component(MessageInput)]
pub fn message_input(p: &MessageInputProps) -> Html {
    let input_ref = use_node_ref();

    let submit = {
        let input_ref = input_ref.clone();
        let on_send = p.on_send.clone();
        Callback::from(move |()| {
            let elt: web_sys::HtmlInputElement = input_ref
                .cast()
                .expect("message input is not an html input element");
            let body = elt.value();
            if body.is_empty() {
                return;
            }
            elt.set_value("");
            on_send.emit(body);
        })
    };

    let onkeydown = {
        let submit = submit.clone();
        Callback::from(move |e: web_sys::KeyboardEvent| {
            if &e.key() as &str == "Enter" {
                submit.emit(());
            }
        })
    };

    html! {
        <div class="message-input d-flex border-top p-2">
            <input
                ref={ input_ref }
                type="text"
                class="form-control me-2"
                placeholder="Say something"
                aria-label="Message"
                {onkeydown}
            />
            <button
                type="button"
                class="btn btn-primary"
                onclick={submit.reform(|_| ())}
            >
                { "Send" }
            </button>
        </div>
    }
}
