//! Inbox and customer profile records
//!
//! These are served as-is by the read-only routes; nothing in the engine
//! interprets their contents beyond ownership filtering.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Notice,
    Alert,
    Conversation,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageIcon {
    Mail,
    Alert,
}

/// A message shown in the dashboard inbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub title: String,
    pub body: String,
    /// Display time, kept as the fixture's free-form string
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<MessageIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Customer profile
///
/// Only `id` is interpreted (it is matched against the caller's id); every
/// other field is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}
