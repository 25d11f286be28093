//! User record domain model.
//!
//! # Responsibility
//! - Define the canonical record shape shared by the remote wire format and
//!   the durable local slot.
//! - Build locally-created records with their placeholder defaults.
//! - Provide creation/edit boundary validation for presentation callers.
//!
//! # Invariants
//! - `id` is unique within any in-memory collection; uniqueness is enforced
//!   by id assignment (remote ids are small, local ids are epoch-ms), never
//!   by content comparison.
//! - `username` is derived from `name` once at creation and is never
//!   editable afterwards.
//! - Origin (local vs remote) is not stored on the record; it is derived
//!   from `id` by [`crate::identity::is_local`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));

/// Sentinel for optional contact fields the create flow leaves blank.
pub const NOT_PROVIDED: &str = "Not provided";

/// Canonical user record.
///
/// Remote records carry this shape verbatim from the wire; locally-created
/// records fill `website`, `address` and `company` with fixed placeholders.
/// Unknown or missing wire fields are decode errors by contract, hence
/// `deny_unknown_fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserRecord {
    /// Integer identity. Local records use epoch milliseconds at creation.
    pub id: i64,
    pub name: String,
    /// Derived at creation for local records; verbatim for remote ones.
    pub username: String,
    pub email: String,
    pub phone: String,
    /// Not settable through create/edit flows.
    pub website: String,
    pub address: Address,
    pub company: Company,
}

/// Postal sub-record, kept verbatim from the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Coordinates are decimal strings on the wire; kept untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

/// Company sub-record, kept verbatim from the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Company {
    pub name: String,
    /// Serialized as `catchPhrase` to match the wire naming.
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

impl Address {
    /// Fixed placeholder used for every locally-created record.
    pub fn placeholder() -> Self {
        Self {
            street: "123 Main St".to_string(),
            suite: "Apt 1".to_string(),
            city: "Your City".to_string(),
            zipcode: "12345".to_string(),
            geo: Geo {
                lat: "0.0000".to_string(),
                lng: "0.0000".to_string(),
            },
        }
    }
}

impl Company {
    /// Fixed placeholder used for every locally-created record.
    pub fn placeholder() -> Self {
        Self {
            name: "Personal".to_string(),
            catch_phrase: "Making the world more connected!".to_string(),
            bs: "personal services".to_string(),
        }
    }
}

impl UserRecord {
    /// Builds a locally-created record from boundary input.
    ///
    /// # Invariants
    /// - `username` is the lowercase of `name` with whitespace runs removed.
    /// - Absent `phone` becomes the [`NOT_PROVIDED`] sentinel.
    /// - `website`, `address` and `company` take their fixed placeholders.
    ///
    /// The caller supplies `id` (normally [`crate::identity::generate_id`])
    /// so record construction stays clock-free and testable.
    pub fn new_local(id: i64, input: &NewUser) -> Self {
        Self {
            id,
            username: derive_username(&input.name),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input
                .phone
                .clone()
                .unwrap_or_else(|| NOT_PROVIDED.to_string()),
            website: NOT_PROVIDED.to_string(),
            address: Address::placeholder(),
            company: Company::placeholder(),
        }
    }

    /// Applies a shallow field merge; absent patch fields keep their value.
    ///
    /// `username`, `website`, `address` and `company` are never touched by
    /// edits, matching the edit-boundary contract.
    pub fn apply_patch(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
    }
}

/// Lowercases `name` and strips every whitespace run.
///
/// `"Jane  Doe"` becomes `"janedoe"`. Unicode-aware on both steps.
pub fn derive_username(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(&name.to_lowercase(), "")
        .into_owned()
}

/// Creation-boundary input for a new local record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// `None` falls back to the [`NOT_PROVIDED`] sentinel.
    pub phone: Option<String>,
}

/// Edit-boundary patch; `None` fields are left unchanged by the merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Boundary validation failure for create/edit input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    EmptyEmail,
    InvalidEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is required"),
            Self::EmptyEmail => write!(f, "email is required"),
            Self::InvalidEmail(value) => write!(f, "email address is not valid: `{value}`"),
        }
    }
}

impl Error for UserValidationError {}

impl NewUser {
    /// Validates creation input the way the add-user boundary must.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is blank after trimming.
    /// - `EmptyEmail` when `email` is blank after trimming.
    /// - `InvalidEmail` when `email` does not match the simple
    ///   `local@domain.tld` shape.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_name(&self.name)?;
        validate_email(&self.email)
    }
}

impl UserPatch {
    /// Validates edit input; absent fields are not constrained.
    ///
    /// # Errors
    /// Same taxonomy as [`NewUser::validate`], applied per present field.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}
