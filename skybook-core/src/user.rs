use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use skybook_shared::Masked;
use std::fmt;
use std::str::FromStr;

/// Location given to accounts that never picked one
pub const DEFAULT_LOCATION: &str = "All India";

/// Discriminator for the two user variants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Passenger,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Passenger => "PASSENGER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASSENGER" => Ok(UserRole::Passenger),
            "ADMIN" => Ok(UserRole::Admin),
            other => Err(format!("unknown user type: {}", other)),
        }
    }
}

/// Admin capabilities checked by the admin endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ManageFlights,
    ManageUsers,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageFlights => "MANAGE_FLIGHTS",
            Permission::ManageUsers => "MANAGE_USERS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PassengerProfile {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub loyalty_points: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminProfile {
    pub department: Option<String>,
    pub admin_level: u32,
    pub can_manage_flights: bool,
    pub can_manage_users: bool,
}

impl Default for AdminProfile {
    fn default() -> Self {
        Self {
            department: None,
            admin_level: 1,
            can_manage_flights: true,
            can_manage_users: false,
        }
    }
}

/// Variant-specific part of a user. Fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub enum UserProfile {
    Passenger(PassengerProfile),
    Admin(AdminProfile),
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Assigned by the store; 0 until persisted.
    pub id: i64,
    pub email: String,
    pub password: Masked<String>,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub profile: UserProfile,
}

impl User {
    /// New, unsaved passenger account
    pub fn new_passenger(
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let name = format!("{} {}", first_name, last_name).trim().to_string();
        let now = Utc::now();

        Self {
            id: 0,
            email: email.into(),
            password: Masked::new(password.into()),
            name,
            phone: None,
            location: None,
            created_at: now,
            updated_at: now,
            profile: UserProfile::Passenger(PassengerProfile {
                first_name,
                last_name,
                ..Default::default()
            }),
        }
    }

    /// New, unsaved admin account with default permissions
    pub fn new_admin(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        profile: AdminProfile,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email: email.into(),
            password: Masked::new(password.into()),
            name: name.into(),
            phone: None,
            location: None,
            created_at: now,
            updated_at: now,
            profile: UserProfile::Admin(profile),
        }
    }

    pub fn role(&self) -> UserRole {
        match self.profile {
            UserProfile::Passenger(_) => UserRole::Passenger,
            UserProfile::Admin(_) => UserRole::Admin,
        }
    }

    pub fn display_name(&self) -> String {
        match &self.profile {
            UserProfile::Passenger(p) => format!("{} {}", p.first_name, p.last_name)
                .trim()
                .to_string(),
            UserProfile::Admin(_) => format!("{} (Admin)", self.name),
        }
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        self.password.expose() == candidate
    }

    /// Record a successful login
    pub fn touch_login(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn as_passenger(&self) -> Option<&PassengerProfile> {
        match &self.profile {
            UserProfile::Passenger(p) => Some(p),
            UserProfile::Admin(_) => None,
        }
    }

    pub fn as_passenger_mut(&mut self) -> Option<&mut PassengerProfile> {
        match &mut self.profile {
            UserProfile::Passenger(p) => Some(p),
            UserProfile::Admin(_) => None,
        }
    }

    pub fn as_admin(&self) -> Option<&AdminProfile> {
        match &self.profile {
            UserProfile::Admin(a) => Some(a),
            UserProfile::Passenger(_) => None,
        }
    }

    /// Passengers accrue points; admins ignore the call.
    pub fn add_loyalty_points(&mut self, points: u32) {
        if let Some(p) = self.as_passenger_mut() {
            p.loyalty_points = p.loyalty_points.saturating_add(points);
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        match (&self.profile, permission) {
            (UserProfile::Admin(a), Permission::ManageFlights) => a.can_manage_flights,
            (UserProfile::Admin(a), Permission::ManageUsers) => a.can_manage_users,
            (UserProfile::Passenger(_), _) => false,
        }
    }

    /// Permission names carried in an admin's access token
    pub fn permissions(&self) -> Vec<String> {
        [Permission::ManageFlights, Permission::ManageUsers]
            .into_iter()
            .filter(|p| self.has_permission(*p))
            .map(|p| p.as_str().to_string())
            .collect()
    }
}

/// Split a full name on its first space: `"Asha Rani Verma"` -> `("Asha", "Rani Verma")`
pub fn split_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passenger_role_and_name() {
        let user = User::new_passenger("john@test.com", "pw", "John", "Doe");
        assert_eq!(user.role(), UserRole::Passenger);
        assert_eq!(user.display_name(), "John Doe");
        assert_eq!(user.name, "John Doe");
        assert!(user.check_password("pw"));
        assert!(!user.check_password("PW"));
    }

    #[test]
    fn test_admin_permissions() {
        let admin = User::new_admin(
            "admin@skybook.com",
            "admin123",
            "Admin User",
            AdminProfile {
                department: Some("Operations".to_string()),
                admin_level: 2,
                can_manage_flights: true,
                can_manage_users: false,
            },
        );
        assert_eq!(admin.display_name(), "Admin User (Admin)");
        assert!(admin.has_permission(Permission::ManageFlights));
        assert!(!admin.has_permission(Permission::ManageUsers));
        assert_eq!(admin.permissions(), vec!["MANAGE_FLIGHTS".to_string()]);

        let passenger = User::new_passenger("p@test.com", "pw", "P", "Q");
        assert!(!passenger.has_permission(Permission::ManageFlights));
        assert!(passenger.permissions().is_empty());
    }

    #[test]
    fn test_loyalty_points_only_for_passengers() {
        let mut passenger = User::new_passenger("p@test.com", "pw", "P", "Q");
        passenger.add_loyalty_points(52);
        passenger.add_loyalty_points(3);
        assert_eq!(passenger.as_passenger().unwrap().loyalty_points, 55);

        let mut admin = User::new_admin("a@test.com", "pw", "A", AdminProfile::default());
        admin.add_loyalty_points(10);
        assert!(admin.as_passenger().is_none());
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("John Doe"), ("John".to_string(), "Doe".to_string()));
        assert_eq!(
            split_name("Asha Rani Verma"),
            ("Asha".to_string(), "Rani Verma".to_string())
        );
        assert_eq!(split_name("Madonna"), ("Madonna".to_string(), String::new()));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("GUEST".parse::<UserRole>().is_err());
    }
}
