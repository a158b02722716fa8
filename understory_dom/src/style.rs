// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computed style storage.

use alloc::string::{String, ToString};
use hashbrown::HashMap;

/// Computed style properties of an element, keyed by lowercase property name.
///
/// Values are stored as the host reported them (for example `"10"`, `"auto"`,
/// `"12px"`). Interpretation is left to consumers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    properties: HashMap<String, String>,
}

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Set a property, returning the previous value.
    pub fn set(&mut self, name: &str, value: &str) -> Option<String> {
        self.properties
            .insert(name.to_ascii_lowercase(), value.to_string())
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.properties.remove(name)
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if no property is set.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
