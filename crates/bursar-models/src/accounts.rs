//! Account domain models and DTOs.
//!
//! [`Account`] is the stored row and deliberately not `Serialize`: the only
//! way an account leaves the service is through [`AccountView`], which has no
//! digest field.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use bursar_db::entity::{get_int, get_text, get_timestamp};
use bursar_db::{Column, ColumnKind, Draft, Entity, Record, Value};

/// Trims and lower-cases an email so lookups and the unique index agree.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A registered account, as stored.
#[derive(FromRow, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password_digest", &"[redacted]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Values supplied when creating an account. Storage assigns the id and timestamps.
#[derive(Clone)]
pub struct NewAccount {
    pub full_name: String,
    pub email: String,
    pub password_digest: String,
}

impl Draft for NewAccount {
    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("full_name", Value::from(self.full_name.clone())),
            ("email", Value::from(self.email.clone())),
            ("password_digest", Value::from(self.password_digest.clone())),
        ]
    }
}

// `password_digest` is stored but not listed in COLUMNS, so no filter or
// order spec can reference it.
impl Entity for Account {
    const NAME: &'static str = "Account";
    const TABLE: &'static str = "accounts";
    const COLUMNS: &'static [Column] = &[
        Column::new("id", ColumnKind::Int),
        Column::new("full_name", ColumnKind::Text),
        Column::new("email", ColumnKind::Text),
        Column::new("created_at", ColumnKind::Timestamp),
        Column::new("updated_at", ColumnKind::Timestamp),
    ];
    const UNIQUE: &'static [&'static str] = &["email"];

    type Draft = NewAccount;

    fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            id: get_int(record, "id")?,
            full_name: get_text(record, "full_name")?,
            email: get_text(record, "email")?,
            password_digest: get_text(record, "password_digest")?,
            created_at: get_timestamp(record, "created_at")?,
            updated_at: get_timestamp(record, "updated_at")?,
        })
    }
}

/// The outward representation of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccountView {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            full_name: account.full_name,
            email: account.email,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// DTO for registering a new account.
#[derive(Deserialize, Clone, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "full_name must not be empty"))]
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "john@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    #[schema(example = "topsecret")]
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// DTO for exchanging credentials for an access token.
#[derive(Deserialize, Clone, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "john@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "topsecret")]
    pub password: String,
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub user: AccountView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_account() -> Account {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        Account {
            id: 3,
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_digest: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.com "), "a@x.com");
    }

    #[test]
    fn test_view_has_no_digest() {
        let json = serde_json::to_value(AccountView::from(sample_account())).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("password_digest"));
        assert!(!json.to_string().contains("$2b$"));
        assert_eq!(object["email"], "ada@example.com");
        assert_eq!(object["id"], 3);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        assert!(!format!("{:?}", sample_account()).contains("$2b$"));

        let request = RegisterRequest {
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(!format!("{request:?}").contains("hunter2"));
    }

    #[test]
    fn test_record_round_trip() {
        let account = sample_account();
        let mut record: Record = NewAccount {
            full_name: account.full_name.clone(),
            email: account.email.clone(),
            password_digest: account.password_digest.clone(),
        }
        .values()
        .into_iter()
        .collect();
        record.insert("id", Value::from(account.id));
        record.insert("created_at", Value::from(account.created_at));
        record.insert("updated_at", Value::from(account.updated_at));

        assert_eq!(Account::from_record(&record), Some(account));
    }

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = RegisterRequest {
            full_name: String::new(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
