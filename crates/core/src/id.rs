// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier newtypes for helper bookkeeping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Define a newtype ID wrapper around `String`.
///
/// Generates `new()`, `as_str()`, `Display`, `From<String>`, `From<&str>`,
/// `PartialEq<str>`, `PartialEq<&str>`, and `Borrow<str>` implementations.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct MyId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Tag selecting which launcher backend handles a job (e.g. "click", "legacy").
    pub struct HelperKind;
}

define_id! {
    /// Instance id assigned by a launcher backend when a helper starts.
    pub struct InstanceId;
}

impl HelperKind {
    pub fn click() -> Self {
        Self::new("click")
    }

    pub fn legacy() -> Self {
        Self::new("legacy")
    }
}

/// Unique key of an in-flight helper: `kind:instance-id`.
///
/// Instance ids are only unique within one launcher, so the kind prefix keeps
/// ids from different backends apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HelperUid {
    kind: HelperKind,
    instance: InstanceId,
}

impl HelperUid {
    pub fn new(kind: HelperKind, instance: InstanceId) -> Self {
        Self { kind, instance }
    }

    pub fn kind(&self) -> &HelperKind {
        &self.kind
    }

    pub fn instance(&self) -> &InstanceId {
        &self.instance
    }
}

impl fmt::Display for HelperUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.instance)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
