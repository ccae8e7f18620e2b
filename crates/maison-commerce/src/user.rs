//! Accounts and authentication payloads.

use crate::error::CommerceError;
use crate::ids::UserId;
use crate::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    #[default]
    Customer,
    /// Store administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    /// Check if this role has at least the given permission level.
    pub fn has_permission(&self, required: Role) -> bool {
        self.level() >= required.level()
    }

    /// Get permission level (higher = more permissions).
    pub fn level(&self) -> u8 {
        match self {
            Role::Customer => 0,
            Role::Admin => 1,
        }
    }
}

impl FromStr for Role {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(CommerceError::validation("role", format!("unknown role {:?}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.has_permission(Role::Admin)
    }

    /// First name for greetings, falling back to the email's local part.
    pub fn first_name(&self) -> &str {
        self.name
            .split_whitespace()
            .next()
            .or_else(|| self.email.split('@').next())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), Vec<CommerceError>> {
        validate::collect([
            validate::email("email", &self.email),
            validate::required("password", &self.password),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
    /// Not sent to the backend.
    #[serde(skip)]
    pub confirm_password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), Vec<CommerceError>> {
        validate::collect([
            validate::length("name", &self.name, 2, 80),
            validate::email("email", &self.email),
            validate::optional_phone("phone", self.phone.as_deref()),
            validate::password("password", &self.password),
            validate::matches("confirmPassword", &self.confirm_password, &self.password),
        ])
    }
}

/// Self-service profile edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), Vec<CommerceError>> {
        validate::collect([
            validate::length("name", &self.name, 2, 80),
            validate::optional_phone("phone", self.phone.as_deref()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPassword {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPassword {
    pub token: String,
    pub password: String,
}

impl ResetPassword {
    pub fn validate(&self) -> Result<(), Vec<CommerceError>> {
        validate::collect([
            validate::required("token", &self.token),
            validate::password("password", &self.password),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.has_permission(Role::Customer));
        assert!(!Role::Customer.has_permission(Role::Admin));
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_user_decode_defaults_to_customer() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u1", "email": "nisha@maison.in", "name": ""
        }))
        .unwrap();
        assert!(!user.is_admin());
        assert_eq!(user.first_name(), "nisha");
    }

    #[test]
    fn test_registration_validation() {
        let mut reg = Registration {
            name: "Nisha Rao".to_string(),
            email: "nisha@maison.in".to_string(),
            phone: None,
            password: "Drapes2024".to_string(),
            confirm_password: "Drapes2024".to_string(),
        };
        assert!(reg.validate().is_ok());

        reg.confirm_password = "drapes2024".to_string();
        let errors = reg.validate().unwrap_err();
        assert_eq!(errors[0].field(), Some("confirmPassword"));

        let json = serde_json::to_value(&reg).unwrap();
        assert!(json.get("confirmPassword").is_none());
    }

    #[test]
    fn test_credentials_validation() {
        let creds = Credentials {
            email: "bad".to_string(),
            password: String::new(),
        };
        assert_eq!(creds.validate().unwrap_err().len(), 2);
    }
}
