mod chat_page;
pub use chat_page::ChatPage;

mod login;
pub use login::Login;

mod message_input;
pub use message_input::MessageInput;

mod message_list;
pub use message_list::MessageList;

mod user_list;
pub use user_list::UserList;
