use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use skybook_core::user::{AdminProfile, PassengerProfile, User, UserProfile, UserRole};
use skybook_shared::Masked;

use super::{discriminator, from_value, raw_id, to_value, CodecError, RecordCodec};
use crate::record_store::USERS;

const ENTITY: &str = "user";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: i64,
    email: String,
    password: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    role: String,

    // PASSENGER
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    loyalty_points: Option<u32>,

    // ADMIN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    can_manage_flights: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    can_manage_users: Option<bool>,
}

impl RecordCodec for User {
    const COLLECTION: &'static str = USERS;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn encode(&self) -> Result<Value, CodecError> {
        let mut record = UserRecord {
            id: self.id,
            email: self.email.clone(),
            password: self.password.expose().clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            location: self.location.clone(),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
            role: self.role().as_str().to_string(),
            first_name: None,
            last_name: None,
            date_of_birth: None,
            address: None,
            loyalty_points: None,
            department: None,
            admin_level: None,
            can_manage_flights: None,
            can_manage_users: None,
        };

        match &self.profile {
            UserProfile::Passenger(p) => {
                record.first_name = Some(p.first_name.clone());
                record.last_name = Some(p.last_name.clone());
                record.date_of_birth = p.date_of_birth;
                record.address = p.address.clone();
                record.loyalty_points = Some(p.loyalty_points);
            }
            UserProfile::Admin(a) => {
                record.department = a.department.clone();
                record.admin_level = Some(a.admin_level);
                record.can_manage_flights = Some(a.can_manage_flights);
                record.can_manage_users = Some(a.can_manage_users);
            }
        }

        to_value(ENTITY, &record)
    }

    fn decode(record: Value) -> Result<Self, CodecError> {
        let tag = discriminator(ENTITY, &record)?;
        let role: UserRole = tag.parse().map_err(|_| CodecError::UnknownDiscriminator {
            entity: ENTITY,
            id: raw_id(&record),
            value: tag.clone(),
        })?;

        let record: UserRecord = from_value(ENTITY, record)?;

        let profile = match role {
            UserRole::Passenger => UserProfile::Passenger(PassengerProfile {
                first_name: record.first_name.unwrap_or_default(),
                last_name: record.last_name.unwrap_or_default(),
                date_of_birth: record.date_of_birth,
                address: record.address,
                loyalty_points: record.loyalty_points.unwrap_or(0),
            }),
            UserRole::Admin => {
                let defaults = AdminProfile::default();
                UserProfile::Admin(AdminProfile {
                    department: record.department,
                    admin_level: record.admin_level.unwrap_or(defaults.admin_level),
                    can_manage_flights: record
                        .can_manage_flights
                        .unwrap_or(defaults.can_manage_flights),
                    can_manage_users: record
                        .can_manage_users
                        .unwrap_or(defaults.can_manage_users),
                })
            }
        };

        let created_at = record.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Ok(User {
            id: record.id,
            email: record.email,
            password: Masked::new(record.password),
            name: record.name,
            phone: record.phone,
            location: record.location,
            created_at,
            updated_at: record.updated_at.unwrap_or(created_at),
            profile,
        })
    }
}
