//! Core types for the cadence tracker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a company.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompanyId(pub u64);

impl fmt::Debug for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompanyId({})", self.0)
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a communication method.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodId(pub u64);

impl fmt::Debug for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodId({})", self.0)
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a logged communication.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommunicationId(pub u64);

impl fmt::Debug for CommunicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommunicationId({})", self.0)
    }
}

impl fmt::Display for CommunicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An organizational contact with a periodic communication obligation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique identifier (assigned by the store).
    pub id: CompanyId,

    /// Display name.
    pub name: String,

    /// Days after a communication before the next one becomes due.
    /// Always at least 1; calendar days, not working days.
    pub communication_periodicity: u32,

    /// Contact fields, opaque to the tracker.
    #[serde(default)]
    pub linkedin_profile: String,

    #[serde(default)]
    pub emails: String,

    #[serde(default)]
    pub phone_numbers: String,

    #[serde(default)]
    pub comments: String,
}

/// A named channel label usable when logging a communication.
///
/// Methods are independent of companies: communications snapshot the method
/// name as a free string, so deleting a method never invalidates history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationMethod {
    /// Unique identifier (assigned by the store).
    pub id: MethodId,

    pub name: String,

    pub description: String,

    /// Display order. Not required to be unique.
    pub sequence: i64,

    /// Whether the method is part of the mandatory outreach sequence.
    pub mandatory: bool,
}

/// A logged (or scheduled) contact event tied to a company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    /// Unique identifier (assigned by the store).
    pub id: CommunicationId,

    /// Owning company.
    pub company_id: CompanyId,

    /// Event date. The anchor for due-date math; not necessarily the day
    /// the entry was recorded.
    pub date: NaiveDate,

    /// Method name snapshot, not a foreign key.
    pub method: String,

    #[serde(default)]
    pub notes: String,

    /// Free-form workflow marker ("completed", "scheduled", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Resolution date feeding response-time statistics. Absent means
    /// "no response tracked", not an error state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_date: Option<NaiveDate>,
}

/// User settings carried in the snapshot.
///
/// `working_days` is configuration only: due-date math runs on calendar
/// days and never consults it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub notifications_enabled: bool,

    pub email_reminders: bool,

    /// Default periodicity (days) for newly added companies.
    pub default_communication_period: u32,

    /// Weekday names the user considers working days.
    pub working_days: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            email_reminders: false,
            default_communication_period: 14,
            working_days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// The whole store value: three entity collections plus settings.
///
/// This is both the in-memory state and the persistence snapshot, so the
/// export/import round trip is serde identity. Insertion order within each
/// collection is preserved and acts as the default secondary sort key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub companies: Vec<Company>,

    pub communication_methods: Vec<CommunicationMethod>,

    pub communications: Vec<Communication>,

    #[serde(default)]
    pub settings: Settings,
}

impl StoreState {
    /// Look up a company. Unknown ids are data absence, not an error.
    pub fn company(&self, id: CompanyId) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    /// Look up a communication method.
    pub fn method(&self, id: MethodId) -> Option<&CommunicationMethod> {
        self.communication_methods.iter().find(|m| m.id == id)
    }

    /// Look up a communication.
    pub fn communication(&self, id: CommunicationId) -> Option<&Communication> {
        self.communications.iter().find(|c| c.id == id)
    }

    /// Methods in display order (by `sequence`, insertion order on ties).
    pub fn methods_by_sequence(&self) -> Vec<&CommunicationMethod> {
        let mut methods: Vec<&CommunicationMethod> = self.communication_methods.iter().collect();
        methods.sort_by_key(|m| m.sequence);
        methods
    }
}

/// Input for adding a company (before the store assigns an id).
#[derive(Clone, Debug, Default)]
pub struct NewCompany {
    pub name: String,
    /// Defaults to `Settings::default_communication_period` when absent.
    pub periodicity: Option<u32>,
    pub linkedin_profile: String,
    pub emails: String,
    pub phone_numbers: String,
    pub comments: String,
}

impl NewCompany {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_periodicity(mut self, days: u32) -> Self {
        self.periodicity = Some(days);
        self
    }

    pub fn with_linkedin_profile(mut self, profile: impl Into<String>) -> Self {
        self.linkedin_profile = profile.into();
        self
    }

    pub fn with_emails(mut self, emails: impl Into<String>) -> Self {
        self.emails = emails.into();
        self
    }

    pub fn with_phone_numbers(mut self, numbers: impl Into<String>) -> Self {
        self.phone_numbers = numbers.into();
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }
}

/// Input for adding a communication method.
#[derive(Clone, Debug, Default)]
pub struct NewMethod {
    pub name: String,
    pub description: String,
    /// Defaults to one past the current method count.
    pub sequence: Option<i64>,
    pub mandatory: bool,
}

impl NewMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }
}

/// Input for logging a communication.
#[derive(Clone, Debug)]
pub struct NewCommunication {
    pub company_id: CompanyId,
    pub date: NaiveDate,
    pub method: String,
    pub notes: String,
    pub status: Option<String>,
    pub response_date: Option<NaiveDate>,
}

impl NewCommunication {
    pub fn new(company_id: CompanyId, date: NaiveDate, method: impl Into<String>) -> Self {
        Self {
            company_id,
            date,
            method: method.into(),
            notes: String::new(),
            status: None,
            response_date: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_response_date(mut self, date: NaiveDate) -> Self {
        self.response_date = Some(date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(CompanyId(7).to_string(), "7");
        assert_eq!(format!("{:?}", MethodId(2)), "MethodId(2)");
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.notifications_enabled);
        assert_eq!(settings.default_communication_period, 14);
        assert_eq!(settings.working_days.len(), 5);
    }

    #[test]
    fn test_new_company_builder() {
        let new = NewCompany::new("Acme Corp")
            .with_periodicity(30)
            .with_emails("hello@acme.example");
        assert_eq!(new.name, "Acme Corp");
        assert_eq!(new.periodicity, Some(30));
        assert_eq!(new.emails, "hello@acme.example");
        assert!(new.comments.is_empty());
    }

    #[test]
    fn test_state_serde_field_names() {
        let state = StoreState::default();
        let value = serde_json::to_value(&state).unwrap();
        assert!(value.get("communicationMethods").is_some());
        assert!(value.get("companies").is_some());
        assert!(value.get("settings").is_some());
    }

    #[test]
    fn test_methods_by_sequence() {
        let state = StoreState {
            communication_methods: vec![
                CommunicationMethod {
                    id: MethodId(1),
                    name: "Email".into(),
                    description: String::new(),
                    sequence: 3,
                    mandatory: false,
                },
                CommunicationMethod {
                    id: MethodId(2),
                    name: "Phone Call".into(),
                    description: String::new(),
                    sequence: 1,
                    mandatory: true,
                },
            ],
            ..Default::default()
        };

        let ordered = state.methods_by_sequence();
        assert_eq!(ordered[0].name, "Phone Call");
        assert_eq!(ordered[1].name, "Email");
    }
}
