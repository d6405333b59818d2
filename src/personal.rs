//! Personal information supplied alongside a password, and leet-speak normalization.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Leet-speak substitutions applied after lowercasing.
pub const LEET_MAP: [(char, char); 13] = [
    ('@', 'a'),
    ('4', 'a'),
    ('3', 'e'),
    ('1', 'i'),
    ('!', 'i'),
    ('|', 'i'),
    ('0', 'o'),
    ('5', 's'),
    ('$', 's'),
    ('7', 't'),
    ('8', 'b'),
    ('9', 'g'),
    ('2', 'z'),
];

/// Lowercases `s` and folds leet-speak characters onto the letters they stand for.
pub fn leet_normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| {
            LEET_MAP
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect()
}

/// The seven pieces of personal information checked against a password.
///
/// The email address only ever participates through its username part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonalField {
    Name,
    DateOfBirth,
    Location,
    PhoneNumber,
    EmailUsername,
    Company,
    Address,
}

impl PersonalField {
    /// Order used when reporting leakage.
    pub const REPORT_ORDER: [PersonalField; 7] = [
        PersonalField::Name,
        PersonalField::EmailUsername,
        PersonalField::DateOfBirth,
        PersonalField::Location,
        PersonalField::PhoneNumber,
        PersonalField::Company,
        PersonalField::Address,
    ];

    /// Order used when building suggestions and replaying attacks.
    pub const ENUMERATION_ORDER: [PersonalField; 7] = [
        PersonalField::Name,
        PersonalField::DateOfBirth,
        PersonalField::Location,
        PersonalField::PhoneNumber,
        PersonalField::EmailUsername,
        PersonalField::Company,
        PersonalField::Address,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PersonalField::Name => "name",
            PersonalField::DateOfBirth => "date of birth",
            PersonalField::Location => "location",
            PersonalField::PhoneNumber => "phone number",
            PersonalField::EmailUsername => "email username",
            PersonalField::Company => "company",
            PersonalField::Address => "address",
        }
    }
}

impl fmt::Display for PersonalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Free-text personal data. Empty fields are valid and carry no signal.
///
/// Deserializes from the request record shape
/// `{name, dob, location, phone, email, company, address}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "dob", deserialize_with = "null_as_empty")]
    pub date_of_birth: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(rename = "phone", deserialize_with = "null_as_empty")]
    pub phone_number: String,
    #[serde(rename = "email", deserialize_with = "null_as_empty")]
    pub email_address: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub address: String,
}

impl PersonalInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_date_of_birth(mut self, dob: impl Into<String>) -> Self {
        self.date_of_birth = dob.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = phone.into();
        self
    }

    pub fn with_email_address(mut self, email: impl Into<String>) -> Self {
        self.email_address = email.into();
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Lowercased, trimmed value of `field`; empty when absent.
    pub fn normalized(&self, field: PersonalField) -> String {
        let raw = match field {
            PersonalField::Name => &self.name,
            PersonalField::DateOfBirth => &self.date_of_birth,
            PersonalField::Location => &self.location,
            PersonalField::PhoneNumber => &self.phone_number,
            PersonalField::EmailUsername => {
                return email_username(&self.email_address).trim().to_lowercase();
            }
            PersonalField::Company => &self.company,
            PersonalField::Address => &self.address,
        };
        raw.trim().to_lowercase()
    }

    /// Non-empty normalized values in enumeration order.
    pub fn tokens(&self) -> Vec<(PersonalField, String)> {
        PersonalField::ENUMERATION_ORDER
            .iter()
            .map(|&field| (field, self.normalized(field)))
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }
}

/// The part of an email address before `@`, or the whole string without one.
pub fn email_username(email: &str) -> &str {
    email.split_once('@').map(|(user, _)| user).unwrap_or(email)
}
