use crate::{validate_string, Error, STUB_UUID, Uuid};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn stub() -> UserId {
        UserId(STUB_UUID)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// Body of the "list online users" response.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct OnlineUsers {
    pub users: Vec<User>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewUser {
    pub id: UserId,
    pub name: String,
    pub initial_password_hash: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), Error> {
        validate_string(&self.initial_password_hash)?;
        if self.name.is_empty() {
            return Err(Error::InvalidName(self.name.clone()));
        }
        if self.name.chars().any(|c| c.is_control()) {
            return Err(Error::InvalidName(self.name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            id: UserId::stub(),
            name: String::from(name),
            initial_password_hash: String::from("hash"),
        }
    }

    #[test]
    fn accepts_regular_names() {
        assert_eq!(new_user("alice").validate(), Ok(()));
        assert_eq!(new_user("Alice Liddell").validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_and_control_names() {
        assert_eq!(
            new_user("").validate(),
            Err(Error::InvalidName(String::new()))
        );
        assert_eq!(
            new_user("al\nice").validate(),
            Err(Error::InvalidName(String::from("al\nice")))
        );
        assert_eq!(
            new_user("al\0ice").validate(),
            Err(Error::InvalidName(String::from("al\0ice")))
        );
    }

    #[test]
    fn rejects_null_byte_in_password_hash() {
        let mut u = new_user("alice");
        u.initial_password_hash = String::from("ha\0sh");
        assert_eq!(
            u.validate(),
            Err(Error::NullByteInString(String::from("ha\0sh")))
        );
    }
}
