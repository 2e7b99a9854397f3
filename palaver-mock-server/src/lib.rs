use std::{
    cell::RefCell,
    collections::{btree_map, BTreeMap, HashMap},
    rc::Rc,
};

use async_trait::async_trait;
use chrono::Utc;
use palaver_api::{
    AuthToken, ChatApi, Error, Message, MessageId, NewMessage, NewSession, NewUser, User, UserId,
    Uuid,
};

/// In-memory stand-in for the chat backend, for tests.
pub struct MockServer {
    users: BTreeMap<UserId, DbUser>,
    messages: Vec<Message>,
    counters: CallCounters,
}

#[derive(Debug)]
struct DbUser {
    // uid is the map key
    name: String,
    pass_hash: String,
    sessions: HashMap<AuthToken, Device>,
}

#[derive(Debug)]
struct Device(String);

#[derive(Debug, Default)]
struct CallCounters {
    online_lists: usize,
    message_lists: usize,
    user_fetches: usize,
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            users: BTreeMap::new(),
            messages: Vec::new(),
            counters: CallCounters::default(),
        }
    }

    /// Number of "list online users" calls served so far
    pub fn test_num_online_lists(&self) -> usize {
        self.counters.online_lists
    }

    /// Number of "list messages" calls served so far
    pub fn test_num_message_lists(&self) -> usize {
        self.counters.message_lists
    }

    /// Number of "get user" calls served so far
    pub fn test_num_user_fetches(&self) -> usize {
        self.counters.user_fetches
    }

    pub fn admin_create_user(&mut self, u: NewUser) -> Result<(), Error> {
        u.validate()?;

        if self.users.values().any(|db| db.name == u.name) {
            return Err(Error::NameAlreadyUsed(u.name));
        }

        match self.users.entry(u.id) {
            btree_map::Entry::Occupied(_) => Err(Error::UuidAlreadyUsed(u.id.0)),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(DbUser {
                    name: u.name,
                    pass_hash: u.initial_password_hash,
                    sessions: HashMap::new(),
                });
                Ok(())
            }
        }
    }

    pub fn auth(&mut self, s: NewSession) -> Result<AuthToken, Error> {
        s.validate()?;
        for u in self.users.values_mut() {
            if u.name == s.user {
                // tests don't actually hash passwords
                if s.password != u.pass_hash {
                    return Err(Error::PermissionDenied);
                }
                let tok = AuthToken(Uuid::new_v4());
                u.sessions.insert(tok, Device(s.device));
                return Ok(tok);
            }
        }
        Err(Error::PermissionDenied)
    }

    fn resolve(&self, tok: AuthToken) -> Result<UserId, Error> {
        for (id, u) in self.users.iter() {
            if u.sessions.contains_key(&tok) {
                return Ok(*id);
            }
        }
        Err(Error::PermissionDenied)
    }

    pub fn unauth(&mut self, tok: AuthToken) -> Result<(), Error> {
        let id = self.resolve(tok)?;
        self.users
            .get_mut(&id)
            .expect("resolved token for user not in db")
            .sessions
            .remove(&tok);
        Ok(())
    }

    pub fn whoami(&self, tok: AuthToken) -> Result<UserId, Error> {
        self.resolve(tok)
    }

    /// A user counts as online while they hold at least one live session.
    pub fn fetch_online_users(&mut self, tok: AuthToken) -> Result<Vec<User>, Error> {
        self.resolve(tok)?;
        self.counters.online_lists += 1;
        Ok(self
            .users
            .iter()
            .filter(|(_, u)| !u.sessions.is_empty())
            .map(|(id, u)| User {
                id: *id,
                username: u.name.clone(),
            })
            .collect())
    }

    pub fn fetch_user(&mut self, tok: AuthToken, id: UserId) -> Result<User, Error> {
        self.resolve(tok)?;
        self.counters.user_fetches += 1;
        self.users
            .get(&id)
            .map(|u| User {
                id,
                username: u.name.clone(),
            })
            .ok_or(Error::UnknownUser(id))
    }

    /// Newest first, so the feed's head changes whenever anything is posted.
    pub fn list_messages(&mut self, tok: AuthToken) -> Result<Vec<Message>, Error> {
        self.resolve(tok)?;
        self.counters.message_lists += 1;
        Ok(self.messages.iter().rev().cloned().collect())
    }

    pub fn create_message(&mut self, tok: AuthToken, msg: NewMessage) -> Result<Message, Error> {
        msg.validate()?;
        let author_id = self.resolve(tok)?;
        let message = Message {
            id: MessageId(Uuid::new_v4()),
            author_id,
            body: msg.body,
            sent_at: Utc::now(),
        };
        self.messages.push(message.clone());
        Ok(message)
    }

    pub fn into_shared(self) -> Rc<RefCell<MockServer>> {
        Rc::new(RefCell::new(self))
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

/// One authenticated client connection to a shared mock server.
pub struct MockConn {
    server: Rc<RefCell<MockServer>>,
    token: AuthToken,
}

impl MockConn {
    pub fn new(server: Rc<RefCell<MockServer>>, token: AuthToken) -> MockConn {
        MockConn { server, token }
    }
}

#[async_trait(?Send)]
impl ChatApi for MockConn {
    async fn fetch_online_users(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.server.borrow_mut().fetch_online_users(self.token)?)
    }

    async fn fetch_messages(&self) -> anyhow::Result<Vec<Message>> {
        Ok(self.server.borrow_mut().list_messages(self.token)?)
    }

    async fn fetch_user(&self, id: UserId) -> anyhow::Result<User> {
        Ok(self.server.borrow_mut().fetch_user(self.token, id)?)
    }

    async fn send_message(&self, msg: NewMessage) -> anyhow::Result<()> {
        self.server.borrow_mut().create_message(self.token, msg)?;
        Ok(())
    }
}
