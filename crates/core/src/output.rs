// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helper output document.
//!
//! A helper writes one JSON document to its output file:
//!
//! ```text
//! { "message": <any JSON>, "notification": { "card": {...}, "sound": "...", ... } }
//! ```
//!
//! Both top-level fields are optional. `message` is passed through untouched
//! as raw bytes; `notification` describes what to present to the user.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// The usual visual presentation of a notification (bubble and/or
/// notification centre entry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    /// Required for the card to be presented
    pub summary: String,
    pub body: String,
    /// Empty means the bubble is not clickable
    pub actions: Vec<String>,
    pub icon: String,
    /// Seconds since epoch; see [`Card::timestamp`]
    #[serde(rename = "timestamp", skip_serializing_if = "Option::is_none")]
    pub raw_timestamp: Option<i64>,
    /// Show in the notification centre
    pub persist: bool,
    /// Show as a bubble
    pub popup: bool,
}

impl Card {
    /// The card timestamp, or now when the helper left it out.
    pub fn timestamp(&self) -> i64 {
        match self.raw_timestamp {
            Some(ts) if ts != 0 => ts,
            _ => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or_default(),
        }
    }
}

/// A number shown on an emblem over the app's launcher icon
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmblemCounter {
    pub count: i32,
    pub visible: bool,
}

/// A vibration pattern of on/off durations, repeated.
///
/// A non-zero `duration` means a pattern of `[duration]` repeated once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vibration {
    pub duration: u32,
    pub pattern: Vec<u32>,
    pub repeat: u32,
}

/// Presentation intent for one notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrate: Option<Vibration>,
    #[serde(rename = "emblem-counter", skip_serializing_if = "Option::is_none")]
    pub emblem_counter: Option<EmblemCounter>,
    /// Dedup tag: a later notification with the same tag replaces this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// What a helper produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperOutput {
    /// Opaque payload for the app's message queue
    #[serde(with = "raw_message", skip_serializing_if = "Option::is_none")]
    pub message: Option<Vec<u8>>,
    /// What to present to the user; `None` means deliver the message only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl HelperOutput {
    /// Parse a helper's output file contents.
    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Output carrying only an unparsed payload.
    pub fn opaque(payload: Vec<u8>) -> Self {
        Self {
            message: Some(payload),
            notification: None,
        }
    }
}

/// Serde adapter keeping `message` as the raw JSON bytes it was written as.
mod raw_message {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::value::RawValue;

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let Some(bytes) = value else {
            return serializer.serialize_none();
        };
        // Payloads that fail over from a broken helper need not be JSON
        match std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| RawValue::from_string(s.to_string()).ok())
        {
            Some(raw) => raw.serialize(serializer),
            None => serializer.serialize_str(&String::from_utf8_lossy(bytes)),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let raw: Option<Box<RawValue>> = Option::deserialize(deserializer)?;
        Ok(raw.map(|r| r.get().as_bytes().to_vec()))
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
