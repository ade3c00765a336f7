//! # Interactive Shell
//!
//! A line-oriented session over one in-memory register. Each input line is
//! split into words and parsed by clap as one [`ShellCommand`].
//!
//! ## Commands
//!
//! - `add [--name ..] [--company ..] ...` - create a lead directly
//! - `update <id> [--name ..] ...` - replace every field of a lead
//! - `edit <id>` / `set <field> <value>` / `form` / `save` / `cancel` - form workflow
//! - `stage <id> <stage>` - move a lead to another stage
//! - `list [--stage <Stage|All>] [--search <text>]` - filtered view
//! - `show <id>`, `counts`, `overdue`, `stages`
//! - `quit` / `exit`
//!
//! Command mistakes are reported on the output and the session continues.
//! Only output I/O failures end the session with an error.

mod render;

pub use render::{counts_json, counts_text, form_text, lead_card, lead_json, leads_json};

use crate::alert::OverdueAlert;
use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use leadtrack_core::{
    FormField, LeadError, LeadFields, LeadForm, LeadId, LeadQuery, LeadStore, Stage, StageFilter,
    parse_reminder_strict,
};
use std::io::{BufRead, Write};

// =============================================================================
// COMMAND GRAMMAR
// =============================================================================

/// One shell input line.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "leads")]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands accepted by the shell.
#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Create a lead from flags
    Add(FieldArgs),

    /// Replace every field of an existing lead
    Update {
        /// Lead id
        id: LeadId,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Load a lead into the form for editing
    Edit {
        /// Lead id
        id: LeadId,
    },

    /// Set one form field
    Set {
        /// Field name (name, company, contact, source, stage, notes, reminder, activity)
        field: FormField,

        /// New value (may be several words; empty clears the field)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },

    /// Show the form
    Form,

    /// Submit the form (create, or update the lead under edit)
    Save,

    /// Discard the form and leave edit mode
    Cancel,

    /// Move a lead to another stage
    Stage {
        /// Lead id
        id: LeadId,

        /// Target stage
        stage: Stage,
    },

    /// List leads
    List {
        /// Stage filter (All or a stage name)
        #[arg(short, long, default_value = "All")]
        stage: StageFilter,

        /// Case-insensitive text matched against name and company
        #[arg(short = 'q', long, default_value = "")]
        search: String,
    },

    /// Show one lead
    Show {
        /// Lead id
        id: LeadId,
    },

    /// Lead count per stage
    Counts,

    /// Leads whose reminder is due
    Overdue,

    /// Print the pipeline stages
    Stages,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Lead fields given as flags. Omitted flags are empty.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub contact: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    /// Pipeline stage (defaults to Messaging)
    #[arg(long)]
    pub stage: Option<Stage>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Follow-up date, YYYY-MM-DD
    #[arg(long)]
    pub reminder: Option<String>,

    #[arg(long)]
    pub activity: Option<String>,
}

impl FieldArgs {
    /// Build a complete field set. Only the reminder can fail to parse.
    pub fn into_fields(self) -> Result<LeadFields, LeadError> {
        let reminder = match self.reminder.as_deref() {
            Some(text) => parse_reminder_strict(text)?,
            None => None,
        };
        Ok(LeadFields {
            name: self.name.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            contact: self.contact.unwrap_or_default(),
            source: self.source.unwrap_or_default(),
            stage: self.stage.unwrap_or_else(Stage::first),
            notes: self.notes.unwrap_or_default(),
            reminder,
            activity: self.activity.unwrap_or_default(),
        })
    }
}

/// Split a command line into words. Single or double quotes group words;
/// `\n` inside quotes becomes a newline.
pub fn split_words(line: &str) -> Result<Vec<String>, LeadError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), '\\') if chars.peek() == Some(&'n') => {
                chars.next();
                current.push('\n');
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(LeadError::CommandError(format!("Unclosed quote: {}", q)));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

// =============================================================================
// SHELL
// =============================================================================

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session state: the register and the working form.
#[derive(Debug)]
pub struct Shell {
    store: LeadStore,
    form: LeadForm,
    config: Config,
    json_mode: bool,
}

impl Shell {
    /// Create a shell over `store`. Subscribes the overdue alert hook when
    /// enabled in `config`.
    #[must_use]
    pub fn new(mut store: LeadStore, config: Config, json_mode: bool) -> Self {
        if config.overdue_alerts {
            store.subscribe(OverdueAlert::new());
        }
        Self {
            store,
            form: LeadForm::new(),
            config,
            json_mode,
        }
    }

    #[must_use]
    pub fn store(&self) -> &LeadStore {
        &self.store
    }

    #[must_use]
    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// JSON mode writes no prompt so `out` stays a stream of JSON documents.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), LeadError> {
        self.prompt(out)?;
        for line in input.lines() {
            let line = line.map_err(|e| LeadError::IoError(format!("Read input: {}", e)))?;
            if self.execute_line(&line, out)? == Flow::Quit {
                return Ok(());
            }
            self.prompt(out)?;
        }
        if self.json_mode {
            return Ok(());
        }
        writeln_out(out, "")
    }

    fn prompt<W: Write>(&self, out: &mut W) -> Result<(), LeadError> {
        if self.json_mode {
            return Ok(());
        }
        write_out(out, &self.config.prompt)
    }

    /// Execute one input line. Command errors are written to `out`.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, LeadError> {
        let words = match split_words(line) {
            Ok(words) if words.is_empty() => return Ok(Flow::Continue),
            Ok(words) => words,
            Err(e) => {
                writeln_out(out, &format!("error: {}", e))?;
                return Ok(Flow::Continue);
            }
        };

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write_out(out, &e.to_string())?;
                return Ok(Flow::Continue);
            }
        };

        tracing::debug!(?command, "Shell command");

        match self.execute(command, out) {
            Ok(flow) => Ok(flow),
            Err(e @ LeadError::IoError(_)) => Err(e),
            Err(e) => {
                writeln_out(out, &format!("error: {}", e))?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Execute a parsed command.
    pub fn execute<W: Write>(
        &mut self,
        command: ShellCommand,
        out: &mut W,
    ) -> Result<Flow, LeadError> {
        match command {
            ShellCommand::Add(args) => {
                let fields = args.into_fields()?;
                self.write_lead(fields, None, out)?;
            }

            ShellCommand::Update { id, fields } => {
                if self.store.get(id).is_none() {
                    return Err(LeadError::LeadNotFound(id));
                }
                let fields = fields.into_fields()?;
                self.write_lead(fields, Some(id), out)?;
            }

            ShellCommand::Edit { id } => {
                self.form.edit_by_id(&self.store, id)?;
                write_out(out, &form_text(&self.form))?;
            }

            ShellCommand::Set { field, value } => {
                self.form.set(field, &value.join(" "))?;
                writeln_out(out, &format!("{} set", field))?;
            }

            ShellCommand::Form => write_out(out, &form_text(&self.form))?,

            ShellCommand::Save => {
                let editing = self.form.editing();
                let complete = self.form.fields.is_valid();
                match self.form.submit(&mut self.store) {
                    Some(id) if editing.is_some() => {
                        tracing::info!(id = %id, "Lead updated");
                        writeln_out(out, &format!("Updated lead #{}", id))?;
                    }
                    Some(id) => {
                        tracing::info!(id = %id, "Lead created");
                        writeln_out(out, &format!("Added lead #{}", id))?;
                    }
                    None if complete => writeln_out(out, NO_IDS_LEFT)?,
                    None => writeln_out(out, REQUIRED_FIELDS)?,
                }
            }

            ShellCommand::Cancel => {
                self.form.cancel();
                writeln_out(out, "Form cleared")?;
            }

            ShellCommand::Stage { id, stage } => {
                if self.store.set_stage(id, stage) {
                    tracing::info!(id = %id, stage = %stage, "Stage changed");
                    writeln_out(out, &format!("Lead #{} -> {}", id, stage))?;
                } else {
                    writeln_out(out, &format!("No lead #{}", id))?;
                }
            }

            ShellCommand::List { stage, search } => {
                let query = LeadQuery::new(stage, search);
                self.list(&query, out)?;
            }

            ShellCommand::Show { id } => {
                let lead = self.store.get(id).ok_or(LeadError::LeadNotFound(id))?;
                let today = self.store.today();
                if self.json_mode {
                    write_json(out, &lead_json(lead, today)?)?;
                } else {
                    write_out(out, &lead_card(lead, today))?;
                }
            }

            ShellCommand::Counts => {
                let counts = self.store.counts_by_stage();
                if self.json_mode {
                    write_json(out, &counts_json(&counts))?;
                } else {
                    write_out(out, &counts_text(&counts))?;
                }
            }

            ShellCommand::Overdue => {
                let today = self.store.today();
                let overdue = self.store.overdue_leads();
                if self.json_mode {
                    write_json(out, &leads_json(&overdue, today)?)?;
                } else if overdue.is_empty() {
                    writeln_out(out, &format!("No reminders due as of {}", today))?;
                } else {
                    for lead in overdue {
                        write_out(out, &lead_card(lead, today))?;
                    }
                }
            }

            ShellCommand::Stages => {
                let names: Vec<&str> = Stage::ALL.iter().map(Stage::name).collect();
                writeln_out(out, &names.join(" > "))?;
            }

            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn write_lead<W: Write>(
        &mut self,
        fields: LeadFields,
        target: Option<LeadId>,
        out: &mut W,
    ) -> Result<(), LeadError> {
        let complete = fields.is_valid();
        match self.store.create_or_update(fields, target) {
            Some(id) if target.is_some() => {
                tracing::info!(id = %id, "Lead updated");
                writeln_out(out, &format!("Updated lead #{}", id))
            }
            Some(id) => {
                tracing::info!(id = %id, "Lead created");
                writeln_out(out, &format!("Added lead #{}", id))
            }
            None if complete => writeln_out(out, NO_IDS_LEFT),
            None => writeln_out(out, REQUIRED_FIELDS),
        }
    }

    fn list<W: Write>(&self, query: &LeadQuery, out: &mut W) -> Result<(), LeadError> {
        let today = self.store.today();
        let leads = self.store.filtered_leads(query);

        if self.json_mode {
            return write_json(out, &leads_json(&leads, today)?);
        }
        if leads.is_empty() {
            return writeln_out(out, "No leads");
        }
        for lead in &leads {
            write_out(out, &lead_card(lead, today))?;
        }
        writeln_out(
            out,
            &format!("{} of {} leads", leads.len(), self.store.len()),
        )
    }
}

const REQUIRED_FIELDS: &str = "Lead not saved: name and company are required";
const NO_IDS_LEFT: &str = "Lead not saved: no unused lead ids left";

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn write_out<W: Write>(out: &mut W, text: &str) -> Result<(), LeadError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| LeadError::IoError(format!("Write output: {}", e)))
}

fn writeln_out<W: Write>(out: &mut W, text: &str) -> Result<(), LeadError> {
    write_out(out, text)?;
    write_out(out, "\n")
}

fn write_json<W: Write>(out: &mut W, value: &serde_json::Value) -> Result<(), LeadError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| LeadError::SerializationError(e.to_string()))?;
    writeln_out(out, &text)
}
