/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! gNMI-style paths built alongside the configuration tree.
//!
//! A [`Path`] is only ever extended by a [`Cursor`](super::Cursor) descent,
//! one [`PathSegment`] per call, so it always mirrors the descent sequence
//! that produced the current tree position.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved key carrying the YANG namespace of a segment.
pub const NAMESPACE_KEY: &str = "namespace";

// ── PathSegment ───────────────────────────────────────────────────────────────

/// One element of a path: a name plus its list keys.
///
/// Keys are unique within a segment.  They are kept in insertion order so
/// that rendering is stable; lookups ignore order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    name: String,
    keys: Vec<(String, String)>,
}

impl PathSegment {
    /// A segment with no keys.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: Vec::new(),
        }
    }

    /// Adds (or replaces) the key `key`.
    pub fn with_key(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.keys.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.keys.push((key, value)),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key/value pairs in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn key(&self, key: &str) -> Option<&str> {
        self.keys
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The namespace carried under the reserved [`NAMESPACE_KEY`].
    pub fn namespace(&self) -> Option<&str> {
        self.key(NAMESPACE_KEY)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (k, v) in &self.keys {
            write!(f, "[{}={}]", k, v)?;
        }
        Ok(())
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Ordered sequence of [`PathSegment`]s from the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, i.e. the leaf an update writes to.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
