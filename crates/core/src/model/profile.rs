use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").expect("tag pattern is valid"));
static LETTERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]{2,}$").expect("letters pattern is valid"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

/// Removes anything that looks like an HTML tag and trims the result.
#[must_use]
pub fn strip_html(input: &str) -> String {
    TAG_RE.replace_all(input, "").trim().to_string()
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Company,
    Phone,
    HostName,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,

    #[error("Enter a valid full name (letters only)")]
    NameInvalid,

    #[error("Company name is required")]
    CompanyRequired,

    #[error("Enter a valid full company name (letters only)")]
    CompanyInvalid,

    #[error("Phone number is required")]
    PhoneRequired,

    #[error("Phone number must be 10 digits")]
    PhoneInvalid,

    #[error("Host name is required")]
    HostRequired,

    #[error("Host name is too short")]
    HostTooShort,
}

impl FieldError {
    #[must_use]
    pub fn field(self) -> ProfileField {
        match self {
            Self::NameRequired | Self::NameInvalid => ProfileField::Name,
            Self::CompanyRequired | Self::CompanyInvalid => ProfileField::Company,
            Self::PhoneRequired | Self::PhoneInvalid => ProfileField::Phone,
            Self::HostRequired | Self::HostTooShort => ProfileField::HostName,
        }
    }
}

/// All field errors found while validating a [`ProfileDraft`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("profile has {} invalid field(s)", .errors.len())]
pub struct ProfileError {
    errors: Vec<FieldError>,
}

impl ProfileError {
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    #[must_use]
    pub fn for_field(&self, field: ProfileField) -> Option<FieldError> {
        self.errors.iter().copied().find(|err| err.field() == field)
    }
}

//
// ─── NAME ──────────────────────────────────────────────────────────────────────
//

/// Sanitizes and validates a visitor's full name.
///
/// # Errors
///
/// Returns `FieldError::NameRequired` when nothing is left after sanitizing,
/// or `FieldError::NameInvalid` when the name is not letters and spaces.
pub fn validate_visitor_name(raw: &str) -> Result<String, FieldError> {
    let name = strip_html(raw);
    if name.is_empty() {
        return Err(FieldError::NameRequired);
    }
    if !LETTERS_RE.is_match(&name) {
        return Err(FieldError::NameInvalid);
    }
    Ok(name)
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// Raw registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub host_name: String,
}

impl ProfileDraft {
    /// Sanitize every field and check the registration rules.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` listing one error per invalid field.
    pub fn validate(&self) -> Result<VisitorProfile, ProfileError> {
        let mut errors = Vec::new();

        let name = validate_visitor_name(&self.name).map_err(|err| errors.push(err)).ok();

        let company = strip_html(&self.company);
        if company.is_empty() {
            errors.push(FieldError::CompanyRequired);
        } else if !LETTERS_RE.is_match(&company) {
            errors.push(FieldError::CompanyInvalid);
        }

        let phone = strip_html(&self.phone);
        if phone.is_empty() {
            errors.push(FieldError::PhoneRequired);
        } else if !PHONE_RE.is_match(&phone) {
            errors.push(FieldError::PhoneInvalid);
        }

        let host_name = strip_html(&self.host_name);
        if host_name.is_empty() {
            errors.push(FieldError::HostRequired);
        } else if host_name.chars().count() < 2 {
            errors.push(FieldError::HostTooShort);
        }

        match name {
            Some(name) if errors.is_empty() => Ok(VisitorProfile {
                name,
                company,
                phone,
                host_name,
            }),
            _ => Err(ProfileError { errors }),
        }
    }
}

/// A validated visitor profile, captured by the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorProfile {
    name: String,
    company: String,
    phone: String,
    host_name: String,
}

impl VisitorProfile {
    /// Rebuild a profile from a stored attempt without re-running the form rules.
    #[must_use]
    pub fn from_persisted(
        name: impl Into<String>,
        company: impl Into<String>,
        phone: impl Into<String>,
        host_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            phone: phone.into(),
            host_name: host_name.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn company(&self) -> &str {
        &self.company
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.host_name
    }
}
