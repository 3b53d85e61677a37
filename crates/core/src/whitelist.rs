// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path prefixes the daemon has enabled features for.
//!
//! Matching is case-sensitive and separator-aware: `/a/b` authorizes
//! `/a/b` and `/a/b/c` but not `/a/bc`. Both sides are lexically
//! normalized first, so `/a/b/../c` is checked as `/a/c`.

use serde::{Deserialize, Serialize};

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Ordered set of whitelisted path prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhitelistSet {
    paths: Vec<String>,
}

impl WhitelistSet {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// Parse the daemon's JSON array of path strings.
    ///
    /// Anything other than an array of strings yields the empty set, so a
    /// malformed response never authorizes a path.
    pub fn from_json(body: &str) -> Self {
        Self::try_from_json(body).unwrap_or_default()
    }

    /// Strict parse, for callers that want to report why a body was rejected.
    pub fn try_from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Vec<String>>(body).map(Self::new)
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.paths
            .iter()
            .any(|prefix| is_prefix_on_boundary(path, prefix))
    }
}

/// Whether `path` falls under any prefix in `set`.
pub fn is_path_whitelisted(path: &str, set: &WhitelistSet) -> bool {
    set.contains_path(path)
}

fn is_prefix_on_boundary(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    let path = normalize(path);
    let prefix = normalize(prefix);
    let trimmed = prefix.trim_end_matches(SEPARATORS);
    if trimmed.is_empty() {
        // Filesystem root authorizes every absolute path; `.` authorizes nothing
        return prefix.starts_with(SEPARATORS) && path.starts_with(SEPARATORS);
    }
    match path.strip_prefix(trimmed) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATORS),
        None => false,
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the root or a drive (`C:`); on a relative path
/// a leading `..` is kept. Repeated and trailing separators collapse.
pub fn normalize(path: &str) -> String {
    let separator = path
        .chars()
        .find(|c| SEPARATORS.contains(c))
        .unwrap_or('/');
    let absolute = path.starts_with(SEPARATORS);
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(SEPARATORS) {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if is_drive(last) => {}
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                None if absolute => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }
    let joined = parts.join(&separator.to_string());
    if absolute {
        format!("{}{}", separator, joined)
    } else {
        joined
    }
}

fn is_drive(part: &str) -> bool {
    part.len() == 2 && part.ends_with(':')
}

#[cfg(test)]
#[path = "whitelist_tests.rs"]
mod tests;
