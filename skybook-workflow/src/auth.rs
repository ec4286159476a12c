use skybook_core::repository::UserRepository;
use skybook_core::user::{split_name, User, DEFAULT_LOCATION};
use skybook_core::{CoreError, CoreResult};
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{LoginRequest, RegisterRequest};
use crate::views::UserView;

/// A successful login: the account view plus the permissions to put in its token
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user: UserView,
    pub permissions: Vec<String>,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create a passenger account. The name is split on its first space.
    pub async fn register(&self, request: RegisterRequest) -> CoreResult<UserView> {
        request.validate()?;

        let (first_name, last_name) = split_name(&request.name);
        let mut user = User::new_passenger(
            request.email.trim(),
            request.password.into_inner(),
            first_name,
            last_name,
        );
        user.name = request.name.trim().to_string();
        user.location = Some(DEFAULT_LOCATION.to_string());

        let created = self.users.create(user).await?;
        info!("Registered passenger {}", created.email);
        Ok(UserView::from(&created))
    }

    pub async fn login(&self, request: LoginRequest) -> CoreResult<Authenticated> {
        let email = request.email.trim();
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| CoreError::NotFound("User".to_string()))?;

        if !user.check_password(request.password.expose()) {
            warn!("Failed login for {}", email);
            return Err(CoreError::InvalidCredentials);
        }

        let user = self
            .users
            .update(
                user.id,
                Box::new(|u: &mut User| {
                    u.touch_login();
                    Ok(())
                }),
            )
            .await?;

        info!("{} logged in as {}", user.email, user.role());
        Ok(Authenticated {
            permissions: user.permissions(),
            user: UserView::from(&user),
        })
    }
}
