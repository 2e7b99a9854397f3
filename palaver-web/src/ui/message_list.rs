use std::sync::Arc;

use palaver_client::PostedMessage;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct MessageListProps {
    pub messages: Arc<Vec<PostedMessage>>,
}

#[function_component(MessageList)]
pub fn message_list(p: &MessageListProps) -> Html {
    html! {
        <ul class="message-list list-unstyled p-2 mb-0">
            { for p.messages.iter().map(|m| html! {
                <li class="mb-1">
                    <span class="text-muted me-2">{ m.sent_at.format("%H:%M").to_string() }</span>
                    <strong class="me-2">{ &m.username }</strong>
                    { &m.body }
                </li>
            }) }
        </ul>
    }
}
