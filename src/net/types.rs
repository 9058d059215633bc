//! Wire DTOs for the `/auth/*` endpoints.
//!
//! DESIGN
//! ======
//! Only the identity fields the client acts on are typed. Seller and supplier
//! profiles stay opaque JSON so server-side schema changes do not break login.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Account role chosen at signup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses and buys products.
    #[default]
    Buyer,
    /// Resells supplier inventory.
    Seller,
    /// Manages inventory, sales and analytics.
    Supplier,
    /// A role this client does not know, such as a staff account.
    #[serde(other)]
    Other,
}

impl Role {
    /// Roles a visitor may pick for themselves on the signup form.
    pub const SELF_SERVICE: [Role; 2] = [Role::Buyer, Role::Supplier];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Supplier => "supplier",
            Role::Other => "other",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "buyer" => Some(Role::Buyer),
            "seller" => Some(Role::Seller),
            "supplier" => Some(Role::Supplier),
            _ => None,
        }
    }
}

/// An authenticated user as returned by login, signup and verify.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier; numeric ids are carried as their decimal string.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub whatsapp_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
    #[serde(rename = "sellerProfile", default, skip_serializing_if = "Option::is_none")]
    pub seller_profile: Option<serde_json::Value>,
    #[serde(rename = "supplierProfile", default, skip_serializing_if = "Option::is_none")]
    pub supplier_profile: Option<serde_json::Value>,
}

/// `POST /auth/login` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/signup` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub whatsapp_number: String,
    pub role: Role,
}

/// Successful login or signup: a fresh bearer token plus the account.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// `GET /auth/verify` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VerifyResponse {
    pub user: User,
}

/// `POST /auth/check-email` response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

/// `{message}` body used by forgot/reset success responses and by every
/// non-2xx response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /auth/reset-password` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(id) if !id.is_empty() => Ok(id),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int.to_string());
            }
            if let Some(uint) = number.as_u64() {
                return Ok(uint.to_string());
            }
            Err(D::Error::custom("expected integer id"))
        }
        _ => Err(D::Error::custom("expected non-empty string or integer id")),
    }
}

/// Explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
