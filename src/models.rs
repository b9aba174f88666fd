use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Default rating tier assigned to new customers.
///
/// `puan` is an open string field; no fixed enumeration exists beyond
/// this default.
pub const DEFAULT_PUAN: &str = "yesil";

// ============ Database Models ============

/// A dealership customer record.
///
/// This is the sole persisted entity: a single flat row with contact
/// information, vehicle details, and sale dates. Field names follow the
/// wire format consumed by the staff client.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier, generated by the store.
    pub id: i32,
    /// First name, required.
    pub ad: String,
    /// Last name, required.
    pub soyad: String,
    /// Phone number.
    pub telefon: Option<String>,
    /// Email address.
    pub mail: Option<String>,
    /// Postal address.
    pub adres: Option<String>,
    /// Occupation.
    pub meslek: Option<String>,
    /// Vehicle info, free text.
    pub arac_bilgileri: Option<String>,
    /// Acquisition date of the vehicle.
    pub alinan_tarih: Option<NaiveDate>,
    /// Sale date of the vehicle.
    pub satilan_tarih: Option<NaiveDate>,
    /// Referral source.
    pub referans: Option<String>,
    /// Free-text notes.
    pub notlar: Option<String>,
    /// Premium flag for priority treatment.
    pub premium: bool,
    /// National ID number.
    pub tc_kimlik: Option<String>,
    /// Rating tier, defaults to [`DEFAULT_PUAN`].
    pub puan: String,
    /// Timestamp of creation, server-managed.
    pub created_at: DateTime<Utc>,
    /// Timestamp of last update, refreshed on every mutation.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A staff user row backing the login endpoint.
///
/// Passwords are stored as Argon2id PHC strings, never plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    /// Unique identifier.
    pub id: i32,
    /// Login name.
    pub username: String,
    /// Display name shown in the client after login.
    pub ad: String,
    /// Argon2id PHC-formatted password hash.
    pub password_hash: String,
}

// ============ API Request/Response Models ============

/// Caller-supplied fields for creating or fully replacing a customer.
///
/// `ad` and `soyad` are the only required fields; everything else
/// defaults to null / false / the default rating tier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerInput {
    pub ad: String,
    pub soyad: String,
    #[serde(default)]
    pub telefon: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub adres: Option<String>,
    #[serde(default)]
    pub meslek: Option<String>,
    #[serde(default)]
    pub arac_bilgileri: Option<String>,
    #[serde(default)]
    pub alinan_tarih: Option<NaiveDate>,
    #[serde(default)]
    pub satilan_tarih: Option<NaiveDate>,
    #[serde(default)]
    pub referans: Option<String>,
    #[serde(default)]
    pub notlar: Option<String>,
    #[serde(default)]
    pub premium: Option<bool>,
    #[serde(default)]
    pub tc_kimlik: Option<String>,
    #[serde(default)]
    pub puan: Option<String>,
}

/// Login request payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The authenticated user as returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    /// Display name.
    pub ad: String,
}

/// Login response: the user plus a signed access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: AuthUser,
    pub token: String,
}

/// Dashboard statistics: aggregate counts over the customer table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Total number of customers.
    pub total: i64,
    /// Customers flagged premium.
    pub premium: i64,
    /// Customers whose sale date falls in the current calendar month.
    #[serde(rename = "thisMonth")]
    pub this_month: i64,
}

/// Confirmation message returned after a successful delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
