use skybook_core::repository::UserRepository;
use skybook_core::user::User;
use skybook_core::{CoreError, CoreResult};
use std::sync::Arc;
use tracing::info;

use crate::models::ProfileUpdate;
use crate::views::ProfileView;

pub struct ProfileService {
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    async fn user_by_email(&self, email: &str) -> CoreResult<User> {
        self.users
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| CoreError::NotFound("User".to_string()))
    }

    pub async fn get_profile(&self, email: &str) -> CoreResult<ProfileView> {
        Ok(ProfileView::from(&self.user_by_email(email).await?))
    }

    /// Apply a partial edit. Passenger-only fields are ignored for admins and the
    /// admin fields are never touched here.
    pub async fn update_profile(&self, email: &str, update: ProfileUpdate) -> CoreResult<ProfileView> {
        let user = self.user_by_email(email).await?;

        let updated = self
            .users
            .update(
                user.id,
                Box::new(move |u: &mut User| {
                    apply(u, update);
                    Ok(())
                }),
            )
            .await?;

        info!("Profile updated for {}", updated.email);
        Ok(ProfileView::from(&updated))
    }

    pub async fn update_location(&self, email: &str, location: &str) -> CoreResult<String> {
        let user = self.user_by_email(email).await?;
        let location = location.trim().to_string();

        let stored = location.clone();
        self.users
            .update(
                user.id,
                Box::new(move |u: &mut User| {
                    u.location = Some(stored);
                    u.updated_at = chrono::Utc::now();
                    Ok(())
                }),
            )
            .await?;

        Ok(location)
    }

    pub async fn list_users(&self) -> CoreResult<Vec<ProfileView>> {
        Ok(self
            .users
            .list()
            .await?
            .iter()
            .map(ProfileView::from)
            .collect())
    }
}

fn apply(user: &mut User, update: ProfileUpdate) {
    if let Some(phone) = update.phone {
        user.phone = Some(phone);
    }
    if let Some(location) = update.location {
        user.location = Some(location);
    }

    let mut renamed = false;
    if let Some(p) = user.as_passenger_mut() {
        if let Some(first_name) = update.first_name {
            p.first_name = first_name;
            renamed = true;
        }
        if let Some(last_name) = update.last_name {
            p.last_name = last_name;
            renamed = true;
        }
        if let Some(address) = update.address {
            p.address = Some(address);
        }
        if let Some(dob) = update.date_of_birth {
            p.date_of_birth = Some(dob);
        }
    }
    if renamed {
        user.name = user.display_name();
    }
    user.updated_at = chrono::Utc::now();
}
