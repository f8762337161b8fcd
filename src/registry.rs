//! The ordered, in-memory collection of registered users.

use crate::validation::MaritalStatus;

/// Domain appended to every derived email address.
pub const EMAIL_DOMAIN: &str = "gmail.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub birth_date: String,
    pub sex: String,
    /// `None` only for the sample records the server may start with.
    pub marital_status: Option<MaritalStatus>,
    pub monthly_income: String,
    pub street: String,
    pub state: String,
    pub city: String,
    pub number: String,
    pub complement: String,
}

/// A validated submission, before it is given an id and an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub birth_date: String,
    pub sex: String,
    pub marital_status: MaritalStatus,
    pub monthly_income: String,
    pub street: String,
    pub state: String,
    pub city: String,
    pub number: String,
    pub complement: String,
}

/// Lowercases the name, drops all whitespace and appends [`EMAIL_DOMAIN`].
pub fn derive_email(name: &str) -> String {
    let local: String = name
        .chars()
        .filter(|&c| !is_name_space(c))
        .flat_map(char::to_lowercase)
        .collect();
    format!("{}@{}", local, EMAIL_DOMAIN)
}

/// Unicode whitespace plus the byte-order mark, minus NEL (U+0085), which
/// form submissions keep.
fn is_name_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Users in insertion order.
///
/// Ids always cover `1..=len()` with no gaps: they are handed out as
/// `len() + 1` and reassigned by position after every removal.
#[derive(Debug, Default, Clone)]
pub struct UserRegistry {
    users: Vec<UserRecord>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the two sample users the service ships with.
    pub fn seeded() -> Self {
        let sample = |id: u32, name: &str, email: &str, birth_date: &str, sex: &str| UserRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
            birth_date: birth_date.to_string(),
            sex: sex.to_string(),
            marital_status: None,
            monthly_income: String::new(),
            street: String::new(),
            state: String::new(),
            city: String::new(),
            number: String::new(),
            complement: String::new(),
        };

        Self {
            users: vec![
                sample(1, "Usuário 1", "usuario1@gmail.com", "1990-01-01", "Masculino"),
                sample(2, "Usuário 2", "usuario2@gmail.com", "1995-05-05", "Feminino"),
            ],
        }
    }

    pub fn list(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Appends the draft and returns the stored record. Duplicate emails are
    /// allowed.
    pub fn append(&mut self, draft: UserDraft) -> &UserRecord {
        let email = derive_email(&draft.name);
        let id = self.next_id();

        self.users.push(UserRecord {
            id,
            name: draft.name,
            email,
            birth_date: draft.birth_date,
            sex: draft.sex,
            marital_status: Some(draft.marital_status),
            monthly_income: draft.monthly_income,
            street: draft.street,
            state: draft.state,
            city: draft.city,
            number: draft.number,
            complement: draft.complement,
        });

        &self.users[self.users.len() - 1]
    }

    /// Removes the user with `id`, if any, then renumbers everyone left.
    pub fn remove_by_id(&mut self, id: u32) -> Option<UserRecord> {
        let removed = self
            .users
            .iter()
            .position(|user| user.id == id)
            .map(|index| self.users.remove(index));

        self.reassign_ids();
        removed
    }

    fn next_id(&self) -> u32 {
        u32::try_from(self.users.len() + 1).unwrap_or(u32::MAX)
    }

    fn reassign_ids(&mut self) {
        for (id, user) in (1..).zip(self.users.iter_mut()) {
            user.id = id;
        }
    }
}
