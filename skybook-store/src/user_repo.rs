use async_trait::async_trait;
use skybook_core::repository::{Mutation, UserRepository};
use skybook_core::user::User;
use skybook_core::{CoreError, CoreResult};
use std::sync::Arc;

use crate::collection::JsonCollection;
use crate::record_store::RecordStore;

pub struct JsonUserRepository {
    users: JsonCollection<User>,
}

impl JsonUserRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            users: JsonCollection::new(store),
        }
    }
}

#[async_trait]
impl UserRepository for JsonUserRepository {
    async fn create(&self, user: User) -> CoreResult<User> {
        self.users
            .insert(user, |existing, new| {
                if existing.iter().any(|u| u.email == new.email) {
                    return Err(CoreError::Conflict("Email already registered".to_string()));
                }
                Ok(())
            })
            .await
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<User>> {
        self.users.find(|u| u.id == id).await
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>> {
        self.users.find(|u| u.email == email).await
    }

    async fn list(&self) -> CoreResult<Vec<User>> {
        self.users.all().await
    }

    async fn update(&self, id: i64, mutation: Mutation<User>) -> CoreResult<User> {
        let guarded: Mutation<User> = Box::new(move |user: &mut User| {
            let email = user.email.clone();
            let role = user.role();
            mutation(user)?;
            if user.email != email || user.role() != role {
                return Err(CoreError::ValidationFailed(
                    "email and account type cannot be changed".to_string(),
                ));
            }
            Ok(())
        });
        self.users.update(id, "User", guarded).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_store::MemoryRecordStore;
    use skybook_core::user::AdminProfile;

    fn repo() -> JsonUserRepository {
        JsonUserRepository::new(Arc::new(MemoryRecordStore::new()))
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = repo();
        let a = repo
            .create(User::new_passenger("a@test.com", "pw", "A", "One"))
            .await
            .unwrap();
        let b = repo
            .create(User::new_admin("b@test.com", "pw", "B", AdminProfile::default()))
            .await
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.list().await.unwrap().len(), 2);
        assert_eq!(
            repo.find_by_email("b@test.com").await.unwrap().unwrap().id,
            2
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_across_variants() {
        let repo = repo();
        repo.create(User::new_passenger("a@test.com", "pw", "A", "One"))
            .await
            .unwrap();

        let err = repo
            .create(User::new_admin("a@test.com", "pw", "A", AdminProfile::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_cannot_change_email() {
        let repo = repo();
        let user = repo
            .create(User::new_passenger("a@test.com", "pw", "A", "One"))
            .await
            .unwrap();

        let err = repo
            .update(
                user.id,
                Box::new(|u: &mut User| {
                    u.email = "other@test.com".to_string();
                    Ok(())
                }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed(_)));

        let updated = repo
            .update(
                user.id,
                Box::new(|u: &mut User| {
                    u.location = Some("Pune".to_string());
                    Ok(())
                }),
            )
            .await
            .unwrap();
        assert_eq!(updated.location.as_deref(), Some("Pune"));
        assert_eq!(
            repo.find_by_id(user.id).await.unwrap().unwrap().email,
            "a@test.com"
        );
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let err = repo()
            .update(42, Box::new(|_: &mut User| Ok(())))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }
}
