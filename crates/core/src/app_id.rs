// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application identity.
//!
//! Two shapes are accepted:
//! - click apps: `package_application` or `package_application_version`
//! - legacy apps: `_application` (no package, no version)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppIdError {
    #[error("invalid application id: {0:?}")]
    Invalid(String),
}

/// A parsed application id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId {
    package: String,
    application: String,
    version: String,
    click: bool,
    original: String,
}

impl AppId {
    pub fn parse(s: &str) -> Result<Self, AppIdError> {
        let invalid = || AppIdError::Invalid(s.to_string());

        if let Some(application) = s.strip_prefix('_') {
            if !valid_component(application) || application.starts_with('.') {
                return Err(invalid());
            }
            return Ok(Self {
                package: String::new(),
                application: application.to_string(),
                version: String::new(),
                click: false,
                original: s.to_string(),
            });
        }

        let parts: Vec<&str> = s.split('_').collect();
        if !(2..=3).contains(&parts.len()) || !parts.iter().all(|p| valid_component(p)) {
            return Err(invalid());
        }
        Ok(Self {
            package: parts[0].to_string(),
            application: parts[1].to_string(),
            version: parts.get(2).map(|v| v.to_string()).unwrap_or_default(),
            click: true,
            original: s.to_string(),
        })
    }

    /// Package name; empty for legacy apps.
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    /// Version; empty when the id carried none.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_click(&self) -> bool {
        self.click
    }

    /// The id without its version: `package_application`, or
    /// `_application` for legacy apps.
    pub fn base(&self) -> String {
        format!("{}_{}", self.package, self.application)
    }

    /// The string this id was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }
}

fn valid_component(s: &str) -> bool {
    !s.is_empty() && !s.contains('/')
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for AppId {
    type Err = AppIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for AppId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for AppId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "app_id_tests.rs"]
mod tests;
