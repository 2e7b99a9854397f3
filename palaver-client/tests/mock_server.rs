use std::{cell::RefCell, rc::Rc};

use futures::executor::block_on;
use palaver_client::{
    api::{ChatApi, NewMessage, NewSession, NewUser, UserId, Uuid},
    refresh_feed, refresh_online_users, ChatState,
};
use palaver_mock_server::{MockConn, MockServer};

fn uid(n: u128) -> UserId {
    UserId(Uuid::from_u128(n))
}

fn server_with_users(users: &[(u128, &str)]) -> Rc<RefCell<MockServer>> {
    let mut server = MockServer::new();
    for (n, name) in users {
        server
            .admin_create_user(NewUser {
                id: uid(*n),
                name: String::from(*name),
                initial_password_hash: format!("{name}-hash"),
            })
            .expect("creating user");
    }
    server.into_shared()
}

fn login(server: &Rc<RefCell<MockServer>>, name: &str) -> MockConn {
    let token = server
        .borrow_mut()
        .auth(NewSession {
            user: String::from(name),
            password: format!("{name}-hash"),
            device: String::from("tests"),
        })
        .expect("authenticating");
    MockConn::new(server.clone(), token)
}

#[test]
fn auth_resolves_to_the_right_user() {
    let server = server_with_users(&[(1, "alice"), (2, "bob")]);
    let token = server
        .borrow_mut()
        .auth(NewSession {
            user: String::from("bob"),
            password: String::from("bob-hash"),
            device: String::from("tests"),
        })
        .expect("authenticating");
    assert_eq!(server.borrow().whoami(token), Ok(uid(2)));

    let rejected = server.borrow_mut().auth(NewSession {
        user: String::from("bob"),
        password: String::from("wrong"),
        device: String::from("tests"),
    });
    assert!(rejected.is_err());
}

#[test]
fn mount_tick_enriches_the_feed() {
    let server = server_with_users(&[(1, "alice"), (2, "bob")]);
    let conn = login(&server, "alice");
    block_on(conn.send_message(NewMessage {
        body: String::from("hi"),
    }))
    .expect("posting message");

    let mut state = ChatState::stub();
    let users = block_on(refresh_online_users(&conn)).expect("refreshing users");
    state.set_online_users(users);
    let update = block_on(refresh_feed(&conn, &state))
        .expect("refreshing feed")
        .expect("first tick should update");
    state.apply_feed(update);

    // bob never authenticated, so only alice shows up online
    assert_eq!(state.online.len(), 1);
    assert_eq!(state.online[0].username, "alice");

    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].username, "alice");
    assert_eq!(state.messages[0].body, "hi");
    assert_eq!(server.borrow().test_num_user_fetches(), 1);
}

#[test]
fn identical_second_tick_is_a_no_op() {
    let server = server_with_users(&[(1, "alice")]);
    let conn = login(&server, "alice");
    block_on(conn.send_message(NewMessage {
        body: String::from("hi"),
    }))
    .expect("posting message");

    let mut state = ChatState::stub();
    let update = block_on(refresh_feed(&conn, &state))
        .expect("refreshing feed")
        .expect("first tick should update");
    state.apply_feed(update);
    let before = state.clone();

    let second = block_on(refresh_feed(&conn, &state)).expect("refreshing feed");
    assert_eq!(second, None);
    assert_eq!(state, before);
    assert_eq!(server.borrow().test_num_message_lists(), 2);
    assert_eq!(server.borrow().test_num_user_fetches(), 1);
}

#[test]
fn only_new_authors_cost_a_lookup() {
    let server = server_with_users(&[(1, "alice"), (2, "bob")]);
    let alice = login(&server, "alice");
    block_on(alice.send_message(NewMessage {
        body: String::from("hi"),
    }))
    .expect("posting message");

    let mut state = ChatState::stub();
    let update = block_on(refresh_feed(&alice, &state))
        .expect("refreshing feed")
        .expect("first tick should update");
    state.apply_feed(update);
    assert_eq!(server.borrow().test_num_user_fetches(), 1);

    let bob = login(&server, "bob");
    block_on(bob.send_message(NewMessage {
        body: String::from("hello"),
    }))
    .expect("posting message");

    let update = block_on(refresh_feed(&alice, &state))
        .expect("refreshing feed")
        .expect("new message should update");
    state.apply_feed(update);

    // Newest first: bob's message leads the feed, and only bob needed a fetch.
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[0].username, "bob");
    assert_eq!(state.messages[1].username, "alice");
    assert_eq!(server.borrow().test_num_user_fetches(), 2);
}

#[test]
fn online_list_follows_sessions() {
    let server = server_with_users(&[(1, "alice"), (2, "bob")]);
    let alice = login(&server, "alice");

    let users = block_on(refresh_online_users(&alice)).expect("refreshing users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "alice");

    let _bob = login(&server, "bob");
    let users = block_on(refresh_online_users(&alice)).expect("refreshing users");
    assert_eq!(users.len(), 2);

    let bob_token = server
        .borrow_mut()
        .auth(NewSession {
            user: String::from("bob"),
            password: String::from("bob-hash"),
            device: String::from("second device"),
        })
        .expect("authenticating");
    server.borrow_mut().unauth(bob_token).expect("logging out");
    // bob still holds his first session, so he stays online
    let users = block_on(refresh_online_users(&alice)).expect("refreshing users");
    assert_eq!(users.len(), 2);
}
