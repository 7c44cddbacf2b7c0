#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Account flags applied when a user is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountFlags {
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl AccountFlags {
    pub const REGULAR: AccountFlags = AccountFlags {
        is_active: true,
        is_staff: false,
        is_superuser: false,
    };

    pub const SUPERUSER: AccountFlags = AccountFlags {
        is_active: true,
        is_staff: true,
        is_superuser: true,
    };
}

/// Lookup applied when listing users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    All,
    /// Case-insensitive exact match on the email address.
    EmailIs(String),
    /// Case-insensitive substring match on the display name.
    NameContains(String),
}

impl UserFilter {
    /// Queries containing `@` are treated as an email lookup, anything else
    /// searches names.
    pub fn from_search(query: &str) -> Self {
        if query.contains('@') {
            UserFilter::EmailIs(query.to_string())
        } else if query.is_empty() {
            UserFilter::All
        } else {
            UserFilter::NameContains(query.to_string())
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::EmailIs(email) => user.email.to_lowercase() == email.to_lowercase(),
            UserFilter::NameContains(part) => {
                user.name.to_lowercase().contains(&part.to_lowercase())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, name: &str) -> User {
        User {
            id: 1,
            email: email.into(),
            name: name.into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn search_with_at_sign_matches_whole_email() {
        let filter = UserFilter::from_search("Alice@Example.com");
        assert!(filter.matches(&user("alice@example.com", "Alice")));
        assert!(!filter.matches(&user("malice@example.com", "Alice")));
    }

    #[test]
    fn search_without_at_sign_matches_name_fragment() {
        let filter = UserFilter::from_search("lic");
        assert!(filter.matches(&user("a@example.com", "Alice")));
        assert!(!filter.matches(&user("lic@example.com", "Bob")));
    }

    #[test]
    fn empty_search_matches_everyone() {
        assert_eq!(UserFilter::from_search(""), UserFilter::All);
    }
}
