//! Dispatch records, the record-form draft, and the session's record list.
//!
//! DESIGN
//! ======
//! `DispatchRecord` doubles as the form draft: the form edits one record in
//! place and submission moves a copy into `RecordCollection`. Stored document
//! keys keep the Spanish names already present in the `registros` collection.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One courier-dispatch log entry. All fields are free text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "prioridad", default)]
    pub priority: String,
    #[serde(rename = "destino", default)]
    pub destination: String,
    #[serde(rename = "mensajero", default)]
    pub courier: String,
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "hora", default)]
    pub time: String,
    #[serde(rename = "observaciones", default)]
    pub notes: String,
}

/// Named field of a `DispatchRecord`, in export column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordField {
    Id,
    Type,
    Priority,
    Destination,
    Courier,
    Date,
    Time,
    Notes,
}

impl RecordField {
    pub const ALL: [RecordField; 8] = [
        RecordField::Id,
        RecordField::Type,
        RecordField::Priority,
        RecordField::Destination,
        RecordField::Courier,
        RecordField::Date,
        RecordField::Time,
        RecordField::Notes,
    ];

    /// Fields that must be non-empty before a record may be submitted.
    pub const REQUIRED: [RecordField; 4] = [RecordField::Id, RecordField::Type, RecordField::Date, RecordField::Time];

    /// Form input name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Type => "type",
            Self::Priority => "priority",
            Self::Destination => "destination",
            Self::Courier => "courier",
            Self::Date => "date",
            Self::Time => "time",
            Self::Notes => "notes",
        }
    }

    /// Column header and card label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Type => "Type",
            Self::Priority => "Priority",
            Self::Destination => "Destination",
            Self::Courier => "Courier",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Notes => "Notes",
        }
    }

    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Type => "Document type (Legal, General, ...)",
            Self::Priority => "Priority (High, Medium, Low)",
            Self::Destination => "Destination or action",
            Self::Courier => "Assigned courier",
            Self::Notes => "Notes",
            Self::Date | Self::Time => "",
        }
    }

    /// HTML input type used by the record form.
    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            _ => "text",
        }
    }
}

impl FromStr for RecordField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == raw)
            .ok_or_else(|| format!("unknown record field: {raw}"))
    }
}

impl DispatchRecord {
    #[must_use]
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Id => &self.id,
            RecordField::Type => &self.kind,
            RecordField::Priority => &self.priority,
            RecordField::Destination => &self.destination,
            RecordField::Courier => &self.courier,
            RecordField::Date => &self.date,
            RecordField::Time => &self.time,
            RecordField::Notes => &self.notes,
        }
    }

    /// Set one field; no cross-field validation.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let slot = match field {
            RecordField::Id => &mut self.id,
            RecordField::Type => &mut self.kind,
            RecordField::Priority => &mut self.priority,
            RecordField::Destination => &mut self.destination,
            RecordField::Courier => &mut self.courier,
            RecordField::Date => &mut self.date,
            RecordField::Time => &mut self.time,
            RecordField::Notes => &mut self.notes,
        };
        *slot = value.into();
    }

    /// Required fields that are still empty, in column order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<RecordField> {
        RecordField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// Values in export column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        RecordField::ALL.into_iter().map(|field| self.get(field))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Records created during the current session, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordCollection {
    items: Vec<DispatchRecord>,
}

impl RecordCollection {
    pub fn push(&mut self, record: DispatchRecord) {
        self.items.push(record);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DispatchRecord> {
        self.items.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&DispatchRecord> {
        self.items.last()
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a DispatchRecord;
    type IntoIter = std::slice::Iter<'a, DispatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
