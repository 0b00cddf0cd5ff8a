//! Terminal presentation of the record list.
//!
//! The screen owns the input policy the store deliberately lacks: a
//! submission with an empty name or email is ignored rather than stored.
//! Every accepted submission is followed by a fresh render of the full list.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::record::Record;
use crate::storage::KeyValueStore;
use crate::store::RecordStore;

/// How the record list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// One decorated row per record.
    #[default]
    Plain,
    /// Aligned name/email columns with a header.
    Table,
    /// Pretty-printed JSON array.
    Json,
}

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit {
    /// The record was appended; holds the refreshed rendering.
    Accepted(String),
    /// A field was empty and nothing was stored.
    Ignored,
}

/// The single screen: input fields, a submit action, and the record list.
#[derive(Debug)]
pub struct Screen<S> {
    store: RecordStore<S>,
    format: ListFormat,
}

impl<S: KeyValueStore> Screen<S> {
    /// Create a screen over the given store.
    pub fn new(store: RecordStore<S>, format: ListFormat) -> Self {
        Self { store, format }
    }

    /// Render every stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record list cannot be loaded.
    pub fn render(&self) -> Result<String> {
        let records = self.store.load_all()?;
        render_records(&records, self.format)
    }

    /// Submit the form.
    ///
    /// Fields are stored exactly as given. Only a completely empty field is
    /// rejected; whitespace counts as content.
    ///
    /// # Errors
    ///
    /// Returns an error if the append or the follow-up render fails.
    pub fn submit(&mut self, name: &str, email: &str) -> Result<Submit> {
        if name.is_empty() || email.is_empty() {
            debug!("Ignoring submission with an empty field");
            return Ok(Submit::Ignored);
        }

        self.store.append(Record::new(name, email))?;
        let records = self.store.load_all()?;
        debug!("Saved entry; list now holds {} records", records.len());
        Ok(Submit::Accepted(render_records(&records, self.format)?))
    }

    /// Run an interactive form session until `input` is exhausted.
    ///
    /// Renders the list once at startup, then repeatedly prompts for a name
    /// and an email. Returns the number of accepted submissions.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or if the store fails.
    pub fn run_form<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<usize> {
        let mut lines = input.lines();
        let mut accepted = 0;

        write_list(&mut output, &self.render()?)?;

        loop {
            write!(output, "Name: ")?;
            output.flush()?;
            let Some(name) = lines.next().transpose()? else {
                break;
            };

            write!(output, "Email: ")?;
            output.flush()?;
            let Some(email) = lines.next().transpose()? else {
                break;
            };

            match self.submit(&name, &email)? {
                Submit::Accepted(rendered) => {
                    accepted += 1;
                    write_list(&mut output, &rendered)?;
                }
                Submit::Ignored => writeln!(output, "Both name and email are required.")?,
            }
        }

        writeln!(output)?;
        Ok(accepted)
    }

    /// Borrow the underlying record store.
    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }
}

fn write_list<W: Write>(output: &mut W, rendered: &str) -> Result<()> {
    if rendered.is_empty() {
        writeln!(output, "No entries yet.")?;
    } else {
        writeln!(output, "{rendered}")?;
    }
    Ok(())
}

/// Render records in the given format.
///
/// An empty list renders as an empty string in plain and table formats, and
/// as `[]` in JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_records(records: &[Record], format: ListFormat) -> Result<String> {
    let rendered = match format {
        ListFormat::Plain => records
            .iter()
            .map(|r| format!("👤 {}  |  📧 {}", r.name, r.email))
            .collect::<Vec<_>>()
            .join("\n"),
        ListFormat::Table => render_table(records),
        ListFormat::Json => serde_json::to_string_pretty(records)?,
    };
    Ok(rendered)
}

fn render_table(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let name_width = records
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once("NAME".len()))
        .max()
        .unwrap_or(0);
    let email_width = records
        .iter()
        .map(|r| r.email.chars().count())
        .chain(std::iter::once("EMAIL".len()))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(format!("{:<name_width$}  {}", "NAME", "EMAIL"));
    lines.push(format!("{}  {}", "-".repeat(name_width), "-".repeat(email_width)));
    for record in records {
        lines.push(format!("{:<name_width$}  {}", record.name, record.email));
    }
    lines.join("\n")
}
