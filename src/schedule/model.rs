use std::collections::HashMap;

use crate::{
    foundation::core::Rgb8,
    foundation::error::{TimetableError, TimetableResult},
    schedule::time::{minutes_to_time, to_minutes},
};

/// Decorative overlay selected for an activity block.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    #[default]
    Normal,
    DiagonalHatched,
    DoubleCorner,
    EmptyCorner,
}

impl ActivityKind {
    /// Map a bracketed source tag (`~`, `d`, `e`, `N`) to a kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "" | "N" | "n" => Some(Self::Normal),
            "~" => Some(Self::DiagonalHatched),
            "d" | "D" => Some(Self::DoubleCorner),
            "e" | "E" => Some(Self::EmptyCorner),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Normal => "N",
            Self::DiagonalHatched => "~",
            Self::DoubleCorner => "d",
            Self::EmptyCorner => "e",
        }
    }
}

/// One schedule item for one person on one day.
///
/// Construction validates `from < to`; afterwards the entry is read-only.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ActivityEntry {
    mode: Option<String>,
    kind: ActivityKind,
    from: u32,
    to: u32,
    name: Option<String>,
    components: Vec<String>,
}

impl ActivityEntry {
    /// Create an entry spanning `from..to` minutes-of-day.
    pub fn new(from: u32, to: u32) -> TimetableResult<Self> {
        if from >= to {
            return Err(TimetableError::validation(format!(
                "activity must end after it starts ({}-{})",
                minutes_to_time(from),
                minutes_to_time(to)
            )));
        }
        Ok(Self {
            mode: None,
            kind: ActivityKind::Normal,
            from,
            to,
            name: None,
            components: Vec::new(),
        })
    }

    /// Create an entry from two `HH:MM` strings.
    pub fn from_times(from: &str, to: &str) -> TimetableResult<Self> {
        Self::new(to_minutes(from)?, to_minutes(to)?)
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_kind(mut self, kind: ActivityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    /// Start, in minutes-of-day.
    pub fn from(&self) -> u32 {
        self.from
    }

    /// End, in minutes-of-day (exclusive).
    pub fn to(&self) -> u32 {
        self.to
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }
}

/// Entries of one person within one day, in chronological order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PersonSchedule {
    pub person: String,
    pub entries: Vec<ActivityEntry>,
}

/// Ordered person → entries mapping for a single day.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DaySchedule {
    label: String,
    persons: Vec<PersonSchedule>,
}

impl DaySchedule {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            persons: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Persons in insertion order; this order is the lane order.
    pub fn persons(&self) -> &[PersonSchedule] {
        &self.persons
    }

    pub fn entries_for(&self, person: &str) -> Option<&[ActivityEntry]> {
        self.persons
            .iter()
            .find(|p| p.person == person)
            .map(|p| p.entries.as_slice())
    }

    /// Entry list of `person`, appending an empty lane the first time the person is seen.
    pub fn person_mut(&mut self, person: &str) -> &mut Vec<ActivityEntry> {
        let idx = match self.persons.iter().position(|p| p.person == person) {
            Some(idx) => idx,
            None => {
                self.persons.push(PersonSchedule {
                    person: person.to_owned(),
                    entries: Vec::new(),
                });
                self.persons.len() - 1
            }
        };
        &mut self.persons[idx].entries
    }

    pub fn push(&mut self, person: &str, entry: ActivityEntry) {
        self.person_mut(person).push(entry);
    }

    pub fn clear(&mut self) {
        self.persons.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.persons.iter().flat_map(|p| p.entries.iter())
    }
}

/// Ordered day label → [`DaySchedule`] mapping. Day order is column order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Timetable {
    days: Vec<DaySchedule>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, label: &str) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.label == label)
    }

    /// Schedule for `label`, appended at the end when the day is new.
    pub fn day_mut(&mut self, label: &str) -> &mut DaySchedule {
        let idx = match self.days.iter().position(|d| d.label == label) {
            Some(idx) => idx,
            None => {
                self.days.push(DaySchedule::new(label));
                self.days.len() - 1
            }
        };
        &mut self.days[idx]
    }

    pub fn push(&mut self, day: &str, person: &str, entry: ActivityEntry) {
        self.day_mut(day).push(person, entry);
    }

    /// Every entry of every day and person.
    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.days.iter().flat_map(DaySchedule::entries)
    }

    /// Distinct persons in first-seen order across all days.
    pub fn persons(&self) -> Vec<String> {
        let mut out = Vec::<String>::new();
        for day in &self.days {
            for p in &day.persons {
                if !out.contains(&p.person) {
                    out.push(p.person.clone());
                }
            }
        }
        out
    }
}

/// Person → color mapping. Keys are case-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    colors: HashMap<String, Rgb8>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, person: &str, color: Rgb8) {
        self.colors.insert(person.to_lowercase(), color);
    }

    /// Parse `#RRGGBB` and insert it for `person`.
    pub fn insert_hex(&mut self, person: &str, hex: &str) -> TimetableResult<()> {
        let color = Rgb8::from_hex(hex)
            .map_err(|e| TimetableError::validation(format!("color for '{person}': {e}")))?;
        self.insert(person, color);
        Ok(())
    }

    pub fn get(&self, person: &str) -> Option<Rgb8> {
        self.colors.get(&person.to_lowercase()).copied()
    }

    /// Like [`Palette::get`], failing with [`TimetableError::PaletteLookup`].
    pub fn lookup(&self, person: &str) -> TimetableResult<Rgb8> {
        self.get(person)
            .ok_or_else(|| TimetableError::palette_lookup(person))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/model.rs"]
mod tests;
