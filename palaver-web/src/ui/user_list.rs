use std::sync::Arc;

use palaver_client::api::User;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct UserListProps {
    pub users: Arc<Vec<User>>,
}

#[function_component(UserList)]
pub fn user_list(p: &UserListProps) -> Html {
    html! {
        <ul class="user-list list-group list-group-flush">
            { for p.users.iter().map(|u| html! {
                <li class="list-group-item d-flex align-items-center">
                    <span class="online-dot me-2"></span>
                    { &u.username }
                </li>
            }) }
        </ul>
    }
}
