// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Submittable values and the entry list a form builds from them.

use alloc::string::String;
use alloc::vec::Vec;

/// An opaque reference to a user-selected file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHandle {
    /// Host-assigned identity.
    pub id: u64,
    /// File name as shown to the user.
    pub name: String,
}

impl FileHandle {
    /// A handle for file `id` named `name`.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The value half of one form entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormEntryValue {
    /// A string.
    Text(String),
    /// A file.
    File(FileHandle),
}

/// A named form entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormEntry {
    /// Entry name.
    pub name: String,
    /// Entry value.
    pub value: FormEntryValue,
}

impl FormEntry {
    /// A text entry.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FormEntryValue::Text(value.into()),
        }
    }
}

/// What a control submits or saves for restoration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormValue {
    /// A string submitted under the control's name.
    Text(String),
    /// A file submitted under the control's name.
    File(FileHandle),
    /// Several entries, each with its own name.
    Entries(Vec<FormEntry>),
}

impl FormValue {
    /// A text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Which shape this value has.
    pub fn shape(&self) -> StateShape {
        match self {
            Self::Text(_) => StateShape::Text,
            Self::File(_) => StateShape::File,
            Self::Entries(_) => StateShape::Entries,
        }
    }

    /// The text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Shape of a [`FormValue`], used in errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateShape {
    /// [`FormValue::Text`].
    Text,
    /// [`FormValue::File`].
    File,
    /// [`FormValue::Entries`].
    Entries,
}

/// The entry list of a form, in submission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<FormEntry>,
}

impl FormData {
    /// An empty entry list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, name: impl Into<String>, value: FormEntryValue) {
        self.entries.push(FormEntry {
            name: name.into(),
            value,
        });
    }

    /// The first value named `name`.
    pub fn get(&self, name: &str) -> Option<&FormEntryValue> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.value)
    }

    /// Every value named `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FormEntryValue> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.name == name)
            .map(|entry| &entry.value)
    }

    /// All entries, in order.
    pub fn entries(&self) -> &[FormEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
