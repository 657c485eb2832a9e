//! Participant profile record.
//!
//! # Responsibility
//! - Define the profile shape edited on the profile screen.
//! - Expose field-level access for the edit controller.
//!
//! # Invariants
//! - Field order is fixed: first name, last name, date of birth, email,
//!   phone number, current region.
//! - A profile is complete when no text field is empty and both optional
//!   fields are set. Whitespace-only text counts as populated.

use crate::editor::record::{EditableRecord, RecordField, ValueKind};
use crate::model::region::RegionCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Profile data shared with enrolled studies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub phone_number: String,
    pub current_region: Option<RegionCode>,
}

impl ProfileRecord {
    /// Whether every profile field is populated.
    pub fn is_complete(&self) -> bool {
        ProfileField::ALL
            .iter()
            .all(|field| self.is_populated(*field))
    }

    /// Reads one field as a value.
    pub fn get(&self, field: ProfileField) -> FieldValue {
        match field {
            ProfileField::FirstName => FieldValue::Text(self.first_name.clone()),
            ProfileField::LastName => FieldValue::Text(self.last_name.clone()),
            ProfileField::BirthDate => FieldValue::Date(self.birth_date),
            ProfileField::Email => FieldValue::Text(self.email.clone()),
            ProfileField::PhoneNumber => FieldValue::Text(self.phone_number.clone()),
            ProfileField::CurrentRegion => FieldValue::Region(self.current_region.clone()),
        }
    }
}

/// Named attribute of `ProfileRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FirstName,
    LastName,
    BirthDate,
    Email,
    PhoneNumber,
    CurrentRegion,
}

impl ProfileField {
    /// All fields in display order.
    pub const ALL: [ProfileField; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::BirthDate,
        Self::Email,
        Self::PhoneNumber,
        Self::CurrentRegion,
    ];

    /// Parses the stable snake_case field name.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name() == value.trim())
    }

    /// Row title shown by presentation hosts.
    pub fn title(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::BirthDate => "Date of Birth",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone Number",
            Self::CurrentRegion => "Current Region",
        }
    }

    /// Value kind accepted by `set_field`.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::BirthDate => ValueKind::Date,
            Self::CurrentRegion => ValueKind::Region,
            _ => ValueKind::Text,
        }
    }
}

impl RecordField for ProfileField {
    fn name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::BirthDate => "birth_date",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::CurrentRegion => "current_region",
        }
    }
}

/// Raw field edit supplied by a presentation host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Empty string clears a text field.
    Text(String),
    Date(Option<NaiveDate>),
    Region(Option<RegionCode>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Date(_) => ValueKind::Date,
            Self::Region(_) => ValueKind::Region,
        }
    }
}

impl EditableRecord for ProfileRecord {
    type Field = ProfileField;
    type Value = FieldValue;

    fn fields() -> &'static [ProfileField] {
        &ProfileField::ALL
    }

    fn is_populated(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::FirstName => !self.first_name.is_empty(),
            ProfileField::LastName => !self.last_name.is_empty(),
            ProfileField::BirthDate => self.birth_date.is_some(),
            ProfileField::Email => !self.email.is_empty(),
            ProfileField::PhoneNumber => !self.phone_number.is_empty(),
            ProfileField::CurrentRegion => self.current_region.is_some(),
        }
    }

    fn apply(&mut self, field: ProfileField, value: FieldValue) -> Result<(), ValueKind> {
        match (field, value) {
            (ProfileField::FirstName, FieldValue::Text(text)) => self.first_name = text,
            (ProfileField::LastName, FieldValue::Text(text)) => self.last_name = text,
            (ProfileField::Email, FieldValue::Text(text)) => self.email = text,
            (ProfileField::PhoneNumber, FieldValue::Text(text)) => self.phone_number = text,
            (ProfileField::BirthDate, FieldValue::Date(date)) => self.birth_date = date,
            (ProfileField::CurrentRegion, FieldValue::Region(region)) => {
                self.current_region = region
            }
            (field, _) => return Err(field.kind()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldValue, ProfileField};
    use crate::editor::record::{RecordField, ValueKind};

    #[test]
    fn field_names_round_trip_through_parse() {
        for field in ProfileField::ALL {
            assert_eq!(ProfileField::parse(field.name()), Some(field));
        }
        assert_eq!(ProfileField::parse("nickname"), None);
    }

    #[test]
    fn value_kinds_match_field_kinds() {
        assert_eq!(ProfileField::BirthDate.kind(), ValueKind::Date);
        assert_eq!(ProfileField::CurrentRegion.kind(), ValueKind::Region);
        assert_eq!(ProfileField::Email.kind(), ValueKind::Text);
        assert_eq!(FieldValue::text("x").kind(), ValueKind::Text);
    }
}
