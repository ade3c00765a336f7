//! Text and JSON rendering for shell output.

use chrono::NaiveDate;
use leadtrack_core::{Lead, LeadError, LeadForm, StageCounts, format_reminder, is_due};
use serde_json::{Value, json};

/// A lead as a text card. The activity line is omitted when empty.
pub fn lead_card(lead: &Lead, today: NaiveDate) -> String {
    let due = is_due(lead.reminder(), today);
    let fields = &lead.fields;

    let mut card = format!("#{} {} ({})", lead.id, fields.name, fields.company);
    if due {
        card.push_str("  [DUE]");
    }
    card.push('\n');
    card.push_str(&format!("   {} | Source: {}\n", fields.contact, fields.source));
    card.push_str(&format!(
        "   Reminder: {}{}\n",
        format_reminder(fields.reminder),
        if due { " (due)" } else { "" }
    ));
    card.push_str(&format!("   Stage: {}\n", fields.stage));
    if !fields.notes.trim().is_empty() {
        card.push_str(&format!("   {}\n", fields.notes));
    }
    if lead.has_activity() {
        card.push_str(&format!("   Activity: {}\n", fields.activity));
    }
    card
}

/// A lead as a JSON object with an extra `due` flag.
pub fn lead_json(lead: &Lead, today: NaiveDate) -> Result<Value, LeadError> {
    let mut value =
        serde_json::to_value(lead).map_err(|e| LeadError::SerializationError(e.to_string()))?;
    if let Value::Object(map) = &mut value {
        map.insert("due".to_string(), json!(is_due(lead.reminder(), today)));
    }
    Ok(value)
}

pub fn leads_json(leads: &[&Lead], today: NaiveDate) -> Result<Value, LeadError> {
    leads
        .iter()
        .map(|lead| lead_json(lead, today))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

pub fn counts_text(counts: &StageCounts) -> String {
    let mut text = String::new();
    for (stage, count) in counts.iter() {
        text.push_str(&format!("{:<11} {} leads\n", stage.name(), count));
    }
    text.push_str(&format!("{:<11} {} leads\n", "Total", counts.total()));
    text
}

pub fn counts_json(counts: &StageCounts) -> Value {
    let mut map = serde_json::Map::new();
    for (stage, count) in counts.iter() {
        map.insert(stage.name().to_string(), json!(count));
    }
    Value::Object(map)
}

pub fn form_text(form: &LeadForm) -> String {
    let fields = &form.fields;
    let mode = match form.editing() {
        Some(id) => format!("Editing lead #{}", id),
        None => "New lead".to_string(),
    };
    format!(
        "{}\n  name:     {}\n  company:  {}\n  contact:  {}\n  source:   {}\n  stage:    {}\n  reminder: {}\n  notes:    {}\n  activity: {}\n",
        mode,
        fields.name,
        fields.company,
        fields.contact,
        fields.source,
        fields.stage,
        format_reminder(fields.reminder),
        fields.notes,
        fields.activity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadtrack_core::{FixedClock, LeadFields, LeadStore, Stage};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("date")
    }

    fn one_lead(fields: LeadFields) -> LeadStore {
        let mut store = LeadStore::with_clock(FixedClock(today()));
        store.create_or_update(fields, None);
        store
    }

    #[test]
    fn card_marks_due_and_skips_empty_activity() {
        let store = one_lead(
            LeadFields::new("Alice", "Acme").with_reminder(today()),
        );
        let card = lead_card(&store.leads()[0], today());

        assert!(card.starts_with("#1 Alice (Acme)  [DUE]"));
        assert!(card.contains("Reminder: 2024-06-01 (due)"));
        assert!(!card.contains("Activity:"));
    }

    #[test]
    fn card_shows_activity_when_present() {
        let mut fields = LeadFields::new("Bob", "Initech").with_stage(Stage::Meeting);
        fields.activity = "Called on 27 Mar".to_string();
        let store = one_lead(fields);
        let card = lead_card(&store.leads()[0], today());

        assert!(card.contains("Stage: Meeting"));
        assert!(card.contains("Activity: Called on 27 Mar"));
        assert!(card.contains("Reminder: -"));
        assert!(!card.contains("[DUE]"));
    }

    #[test]
    fn json_carries_due_flag() {
        let store = one_lead(LeadFields::new("Alice", "Acme"));
        let value = lead_json(&store.leads()[0], today()).expect("serialize");
        assert_eq!(value["due"], json!(false));
        assert_eq!(value["company"], json!("Acme"));
    }

    #[test]
    fn counts_keep_pipeline_order() {
        let store = one_lead(LeadFields::new("Alice", "Acme"));
        let text = counts_text(&store.counts_by_stage());
        let first = text.lines().next().unwrap_or_default();
        assert!(first.starts_with("Messaging"));
        assert!(text.contains("Total       1 leads"));
    }
}
