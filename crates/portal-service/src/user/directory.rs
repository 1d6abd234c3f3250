//! In-memory user directory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use portal_auth::directory::UserStore;
use portal_core::error::AppError;
use portal_entity::user::User;

/// In-memory user registry with an email index.
///
/// Stand-in for the excluded persistence layer; implements the auth
/// crate's [`UserStore`] seam so the session lifecycle never knows the
/// difference.
#[derive(Debug, Default)]
pub struct UserDirectory {
    /// Users by ID.
    users: DashMap<Uuid, User>,
    /// Email (lowercased) → user ID index.
    by_email: DashMap<String, Uuid>,
}

impl UserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            by_email: DashMap::new(),
        }
    }

    /// Registers a new user. Fails with a conflict when the email is
    /// already taken.
    pub fn insert(&self, user: User) -> Result<User, AppError> {
        let email_key = user.email.to_lowercase();

        // entry() holds the index lock, so two concurrent inserts of the
        // same email cannot both win.
        match self.by_email.entry(email_key) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "A user with email '{}' already exists",
                user.email
            ))),
            Entry::Vacant(vacant) => {
                vacant.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    /// Look up a user by ID.
    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|entry| entry.clone())
    }

    /// Look up a user by email, case-insensitive.
    pub fn get_by_email(&self, email: &str) -> Option<User> {
        let id = *self.by_email.get(&email.to_lowercase())?;
        self.get(id)
    }

    /// All registered users.
    pub fn list(&self) -> Vec<User> {
        self.users.iter().map(|entry| entry.clone()).collect()
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory has no users yet.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for UserDirectory {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.get_by_email(email)
    }

    async fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.get(id)
    }

    async fn touch_last_login(&self, id: Uuid, at: DateTime<Utc>) {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.last_login_at = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_entity::user::{Role, UserStatus};

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            display_name: "Test".to_string(),
            password_hash: String::new(),
            role: Role::Student,
            region: None,
            accessible_regions: Default::default(),
            email_verified: false,
            totp_enabled: false,
            status: UserStatus::Active,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_email_lookup_is_case_insensitive() {
        let dir = UserDirectory::new();
        dir.insert(user("Student@Kizuna.example")).unwrap();
        assert!(dir.get_by_email("student@kizuna.example").is_some());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let dir = UserDirectory::new();
        dir.insert(user("a@kizuna.example")).unwrap();
        assert!(dir.insert(user("A@kizuna.example")).is_err());
        assert_eq!(dir.len(), 1);
    }
}
