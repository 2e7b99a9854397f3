mod poll;
pub use poll::{run_poller, stop_pollers_then};

mod refresh;
pub use refresh::{refresh_feed, refresh_online_users};

mod state;
pub use state::{ChatState, FeedUpdate, PostedMessage};

pub mod api {
    pub use palaver_api::*;
}
