use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{TimetableError, TimetableResult},
    schedule::model::{ActivityEntry, ActivityKind, Palette, Timetable},
    schedule::time::to_minutes,
};

const DAY_PREFIX: &str = "# ";
const PERSON_PREFIX: &str = "## ";
const ENTRY_PREFIX: &str = "* ";
const COLOR_PREFIX: &str = "h2.";
const NOTE_PREFIX: &str = "###### /";
const SECTION_BREAK: &str = "---";
const PROVISIONAL_MARK: &str = "?";

/// Everything a timetable source file declares.
#[derive(Clone, Debug, Default)]
pub struct SourceDocument {
    pub timetable: Timetable,
    /// Persons in first-seen order; this is the header order.
    pub persons: Vec<String>,
    pub palette: Palette,
    pub notes: Vec<String>,
}

impl SourceDocument {
    pub fn from_path(path: impl AsRef<Path>) -> TimetableResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read timetable source '{}'", path.display()))?;
        Self::parse(&text)
    }

    /// Parse the line-oriented source format.
    ///
    /// - `# Day` opens a day, `## Person` a person within it, `* ...` adds an entry.
    /// - `---` closes the current day.
    /// - `h2.Person: #RRGGBB` defines a color, `###### /...` a note.
    ///
    /// Unrecognized lines are ignored.
    pub fn parse(text: &str) -> TimetableResult<Self> {
        let mut doc = Self::default();
        let mut day: Option<String> = None;
        let mut person: Option<String> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;

            if let Some(rest) = line.strip_prefix(COLOR_PREFIX) {
                let (name, hex) = rest.split_once(':').ok_or_else(|| {
                    TimetableError::parse(format!("line {line_no}: color needs 'name: #RRGGBB'"))
                })?;
                doc.palette.insert_hex(name.trim(), hex.trim())?;
                continue;
            }

            if line.starts_with(NOTE_PREFIX) {
                doc.notes.push(line["######".len()..].trim().to_owned());
                continue;
            }

            if let Some(rest) = line.strip_prefix(DAY_PREFIX) {
                let label = rest.trim().to_owned();
                // Re-declaring a day starts it over but keeps its column.
                doc.timetable.day_mut(&label).clear();
                day = Some(label);
                person = None;
                continue;
            }

            if let Some(rest) = line.strip_prefix(PERSON_PREFIX) {
                let name = rest.trim().to_owned();
                let Some(day) = day.as_deref() else {
                    return Err(TimetableError::parse(format!(
                        "line {line_no}: person '{name}' outside of a day"
                    )));
                };
                doc.timetable.day_mut(day).person_mut(&name).clear();
                if !doc.persons.contains(&name) {
                    doc.persons.push(name.clone());
                }
                person = Some(name);
                continue;
            }

            if let Some(rest) = line.strip_prefix(ENTRY_PREFIX) {
                let (Some(day), Some(person)) = (day.as_deref(), person.as_deref()) else {
                    return Err(TimetableError::parse(format!(
                        "line {line_no}: entry outside of a day and person"
                    )));
                };
                let entry = parse_entry(rest).map_err(|e| at_line(line_no, e))?;
                doc.timetable.push(day, person, entry);
                continue;
            }

            if line.starts_with(SECTION_BREAK) {
                day = None;
                person = None;
            }
        }

        tracing::debug!(
            days = doc.timetable.len(),
            persons = doc.persons.len(),
            colors = doc.palette.len(),
            notes = doc.notes.len(),
            "parsed timetable source"
        );
        Ok(doc)
    }
}

fn at_line(line_no: usize, err: TimetableError) -> TimetableError {
    match err {
        TimetableError::Parse(msg) => TimetableError::Parse(format!("line {line_no}: {msg}")),
        TimetableError::MalformedTime(msg) => {
            TimetableError::MalformedTime(format!("line {line_no}: {msg}"))
        }
        TimetableError::Validation(msg) => {
            TimetableError::Validation(format!("line {line_no}: {msg}"))
        }
        other => other,
    }
}

/// Parse the text of one entry line (without the leading `* `).
///
/// Shape: `[? ][[kind] ]HH:MM-HH:MM[ name[ | component]*]`.
pub fn parse_entry(text: &str) -> TimetableResult<ActivityEntry> {
    let mut rest = text.trim();

    let mut mode = None;
    if let Some(after) = rest.strip_prefix("? ") {
        mode = Some(PROVISIONAL_MARK);
        rest = after.trim_start();
    }

    let mut kind = ActivityKind::Normal;
    if let Some(after) = rest.strip_prefix('[') {
        let (tag, after) = after
            .split_once(']')
            .ok_or_else(|| TimetableError::parse(format!("unclosed kind tag in \"{text}\"")))?;
        kind = ActivityKind::from_tag(tag).unwrap_or_else(|| {
            tracing::warn!(tag = tag.trim(), "unknown activity kind, drawing as normal");
            ActivityKind::Normal
        });
        rest = after.trim_start();
    }

    let (from, rest) = rest
        .split_once('-')
        .ok_or_else(|| TimetableError::parse(format!("missing time range in \"{text}\"")))?;
    let rest = rest.trim();
    let (to, label) = match rest.split_once(char::is_whitespace) {
        Some((to, label)) => (to, label.trim()),
        None => (rest, ""),
    };

    let mut entry = ActivityEntry::new(to_minutes(from)?, to_minutes(to)?)?.with_kind(kind);
    if let Some(mode) = mode {
        entry = entry.with_mode(mode);
    }

    let mut segments = label.split('|').map(str::trim);
    if let Some(name) = segments.next().filter(|s| !s.is_empty()) {
        entry = entry.with_name(name);
    }
    let components: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
    if !components.is_empty() {
        entry = entry.with_components(components);
    }
    Ok(entry)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/source.rs"]
mod tests;
