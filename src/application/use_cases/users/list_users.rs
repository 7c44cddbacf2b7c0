use crate::application::dto::pagination::{InvalidPage, Page, PageRequest};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{User, UserFilter};

#[derive(thiserror::Error, Debug)]
pub enum ListUsersError {
    #[error(transparent)]
    InvalidPage(#[from] InvalidPage),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Paginated user listing, shared by the plain list and the search endpoint.
pub struct ListUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListUsers<'a, R> {
    pub async fn execute(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<User>, ListUsersError> {
        let total = self.repo.count_users(filter).await?;
        let window = page.window(total)?;
        let items = self
            .repo
            .list_users(filter, window.limit, window.offset)
            .await?;
        Ok(Page {
            items,
            total,
            number: window.number,
            num_pages: window.num_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::pagination::PageNumber;
    use crate::test_support::InMemoryStore;

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        for (email, name) in [
            ("ann@example.com", "Ann Lee"),
            ("ben@example.com", "Ben Annis"),
            ("cy@example.com", "Cy Young"),
        ] {
            store.seed_user(email, name, "pw").await;
        }
        store
    }

    fn page(n: u64, size: u32) -> PageRequest {
        PageRequest {
            page: PageNumber::Number(n),
            page_size: size,
        }
    }

    #[tokio::test]
    async fn pages_through_users_in_id_order() {
        let store = seeded().await;
        let uc = ListUsers { repo: &store };

        let first = uc.execute(&UserFilter::All, page(1, 2)).await.unwrap();
        assert_eq!(first.total, 3);
        assert_eq!(first.num_pages, 2);
        assert!(first.has_next() && !first.has_previous());
        let names: Vec<_> = first.items.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Ann Lee", "Ben Annis"]);

        let second = uc.execute(&UserFilter::All, page(2, 2)).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert!(!second.has_next() && second.has_previous());
    }

    #[tokio::test]
    async fn search_filters_by_name_or_email() {
        let store = seeded().await;
        let uc = ListUsers { repo: &store };

        let by_name = uc
            .execute(&UserFilter::from_search("ann"), page(1, 10))
            .await
            .unwrap();
        assert_eq!(by_name.total, 2);

        let by_email = uc
            .execute(&UserFilter::from_search("CY@example.com"), page(1, 10))
            .await
            .unwrap();
        assert_eq!(by_email.items.len(), 1);
        assert_eq!(by_email.items[0].name, "Cy Young");
    }

    #[tokio::test]
    async fn out_of_range_page_is_rejected() {
        let store = seeded().await;
        let uc = ListUsers { repo: &store };
        let err = uc.execute(&UserFilter::All, page(3, 2)).await.unwrap_err();
        assert!(matches!(err, ListUsersError::InvalidPage(_)));
    }
}
