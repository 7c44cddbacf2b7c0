use crate::application::dto::pagination::{InvalidPage, Page, PageRequest};
use crate::application::ports::friend_request_repository::FriendRequestRepository;
use crate::domain::friend_requests::friend_request::FriendRequest;

#[derive(thiserror::Error, Debug)]
pub enum ListFriendRequestsError {
    #[error(transparent)]
    InvalidPage(#[from] InvalidPage),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Requests the actor sent or received, one page at a time.
pub struct ListFriendRequests<'a, F: FriendRequestRepository + ?Sized> {
    pub requests: &'a F,
}

impl<'a, F: FriendRequestRepository + ?Sized> ListFriendRequests<'a, F> {
    pub async fn execute(
        &self,
        actor_id: i64,
        page: PageRequest,
    ) -> Result<Page<FriendRequest>, ListFriendRequestsError> {
        let total = self.requests.count_involving(actor_id).await?;
        let window = page.window(total)?;
        let items = self
            .requests
            .list_involving(actor_id, window.limit, window.offset)
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

    fn page(n: u64) -> PageRequest {
        PageRequest {
            page: PageNumber::Number(n),
            page_size: 2,
        }
    }

    #[tokio::test]
    async fn pages_through_requests_involving_the_actor() {
        let store = InMemoryStore::new();
        let a = store.seed_user("a@example.com", "A", "pw").await;
        let b = store.seed_user("b@example.com", "B", "pw").await;
        let c = store.seed_user("c@example.com", "C", "pw").await;
        let d = store.seed_user("d@example.com", "D", "pw").await;
        let r1 = store.create(a.id, b.id).await.unwrap().unwrap();
        let r2 = store.create(c.id, a.id).await.unwrap().unwrap();
        store.create(c.id, d.id).await.unwrap();
        let r4 = store.create(a.id, d.id).await.unwrap().unwrap();

        let uc = ListFriendRequests { requests: &store };
        let first = uc.execute(a.id, page(1)).await.unwrap();
        assert_eq!((first.total, first.num_pages), (3, 2));
        let ids: Vec<i64> = first.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, [r1.id, r2.id]);

        let second = uc.execute(a.id, page(2)).await.unwrap();
        let ids: Vec<i64> = second.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, [r4.id]);

        let err = uc.execute(a.id, page(3)).await.unwrap_err();
        assert!(matches!(err, ListFriendRequestsError::InvalidPage(_)));
    }
}
