//! # Lead Form
//!
//! The working field set a user edits before submitting, plus the edit
//! target when an existing lead is being changed.
//!
//! A successful submit resets the form to defaults and leaves edit mode.
//! A rejected submit (blank name or company) leaves everything as it was so
//! the input can be corrected.

use crate::reminder::parse_reminder_strict;
use crate::store::LeadStore;
use crate::{Lead, LeadError, LeadFields, LeadId};

/// A single editable field, addressed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Company,
    Contact,
    Source,
    Stage,
    Notes,
    Reminder,
    Activity,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Name,
        FormField::Company,
        FormField::Contact,
        FormField::Source,
        FormField::Stage,
        FormField::Notes,
        FormField::Reminder,
        FormField::Activity,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Company => "company",
            FormField::Contact => "contact",
            FormField::Source => "source",
            FormField::Stage => "stage",
            FormField::Notes => "notes",
            FormField::Reminder => "reminder",
            FormField::Activity => "activity",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for FormField {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FormField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                LeadError::CommandError(format!(
                    "Unknown field: {}. Use: name, company, contact, source, stage, notes, reminder, activity",
                    wanted
                ))
            })
    }
}

/// Working form state for creating or editing one lead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    /// Field values as currently entered.
    pub fields: LeadFields,
    /// Lead being edited, if any.
    editing: Option<LeadId>,
}

impl LeadForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The lead under edit, or `None` when the form will create.
    #[must_use]
    pub fn editing(&self) -> Option<LeadId> {
        self.editing
    }

    /// Load `lead` into the form and enter edit mode.
    pub fn edit(&mut self, lead: &Lead) {
        self.fields = lead.fields.clone();
        self.editing = Some(lead.id);
    }

    /// Load the lead with `id` from `store` into the form.
    pub fn edit_by_id(&mut self, store: &LeadStore, id: LeadId) -> Result<(), LeadError> {
        let lead = store.get(id).ok_or(LeadError::LeadNotFound(id))?;
        self.edit(lead);
        Ok(())
    }

    /// Set one field from text. Stage and reminder are parsed strictly.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), LeadError> {
        match field {
            FormField::Name => self.fields.name = value.to_string(),
            FormField::Company => self.fields.company = value.to_string(),
            FormField::Contact => self.fields.contact = value.to_string(),
            FormField::Source => self.fields.source = value.to_string(),
            FormField::Stage => self.fields.stage = value.parse()?,
            FormField::Notes => self.fields.notes = value.to_string(),
            FormField::Reminder => self.fields.reminder = parse_reminder_strict(value)?,
            FormField::Activity => self.fields.activity = value.to_string(),
        }
        Ok(())
    }

    /// Write the form into `store`.
    ///
    /// On success the form resets and the written id is returned. On a
    /// rejected write the form is left untouched and `None` is returned.
    pub fn submit(&mut self, store: &mut LeadStore) -> Option<LeadId> {
        let id = store.create_or_update(self.fields.clone(), self.editing)?;
        self.cancel();
        Some(id)
    }

    /// Reset to defaults and leave edit mode without writing.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::FixedClock;
    use crate::system::Stage;
    use chrono::NaiveDate;

    fn store() -> LeadStore {
        LeadStore::with_clock(FixedClock(
            NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
        ))
    }

    #[test]
    fn submit_creates_and_resets() {
        let mut store = store();
        let mut form = LeadForm::new();
        form.set(FormField::Name, "Alice").expect("set");
        form.set(FormField::Company, "Acme").expect("set");
        form.set(FormField::Stage, "meeting").expect("set");

        let id = form.submit(&mut store).expect("submit");

        assert_eq!(store.get(id).map(Lead::stage), Some(Stage::Meeting));
        assert_eq!(form, LeadForm::default());
    }

    #[test]
    fn rejected_submit_keeps_form() {
        let mut store = store();
        let mut form = LeadForm::new();
        form.set(FormField::Name, "Alice").expect("set");
        form.set(FormField::Notes, "met at expo").expect("set");

        assert_eq!(form.submit(&mut store), None);
        assert!(store.is_empty());
        assert_eq!(form.fields.name, "Alice");
        assert_eq!(form.fields.notes, "met at expo");
    }

    #[test]
    fn edit_then_submit_updates_in_place() {
        let mut store = store();
        let id = store
            .create_or_update(LeadFields::new("Alice", "Acme"), None)
            .expect("create");

        let mut form = LeadForm::new();
        form.edit_by_id(&store, id).expect("edit");
        assert_eq!(form.editing(), Some(id));
        assert_eq!(form.fields.company, "Acme");

        form.set(FormField::Notes, "second call booked").expect("set");
        assert_eq!(form.submit(&mut store), Some(id));

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(id).map(|l| l.fields.notes.as_str()),
            Some("second call booked")
        );
        assert_eq!(form.editing(), None);
    }

    #[test]
    fn edit_unknown_id_fails() {
        let store = store();
        let mut form = LeadForm::new();
        assert!(matches!(
            form.edit_by_id(&store, LeadId(3)),
            Err(LeadError::LeadNotFound(LeadId(3)))
        ));
    }

    #[test]
    fn invalid_stage_or_date_is_reported() {
        let mut form = LeadForm::new();
        assert!(matches!(
            form.set(FormField::Stage, "Won"),
            Err(LeadError::UnknownStage(_))
        ));
        assert!(matches!(
            form.set(FormField::Reminder, "next week"),
            Err(LeadError::InvalidDate(_))
        ));
        form.set(FormField::Reminder, "").expect("clear");
        assert_eq!(form.fields.reminder, None);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("Company".parse::<FormField>().expect("parse"), FormField::Company);
        assert!("email".parse::<FormField>().is_err());
    }
}
