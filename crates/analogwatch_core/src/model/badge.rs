//! Icon identifiers and badge notifications.
//!
//! # Invariants
//! - `IconId` raw values follow declaration order (`0` missed calls, `1` unread messages).
//! - Badge counts are carried as delivered; no clamping happens here.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Tappable badge region on the watch face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconId {
    /// Call history icon with the missed-calls counter.
    MissedCalls,
    /// Messaging icon with the unread-messages counter.
    UnreadMessages,
}

impl IconId {
    /// Both icons in layout order.
    pub const ALL: [IconId; 2] = [IconId::MissedCalls, IconId::UnreadMessages];

    /// Resolves a raw host-side icon index.
    ///
    /// Returns `None` for indexes outside the closed enumeration.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::MissedCalls),
            1 => Some(Self::UnreadMessages),
            _ => None,
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            Self::MissedCalls => 0,
            Self::UnreadMessages => 1,
        }
    }

    /// Stable label used in log events.
    pub fn label(self) -> &'static str {
        match self {
            Self::MissedCalls => "missed_calls",
            Self::UnreadMessages => "unread_messages",
        }
    }
}

impl Display for IconId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of change reported by the badge subsystem.
///
/// Routing ignores the action; it is kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeAction {
    Create,
    Remove,
    Update,
    DisplayChanged,
    ServiceReady,
    Other(u32),
}

impl BadgeAction {
    /// Maps the host's action code.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Create,
            1 => Self::Remove,
            2 => Self::Update,
            3 => Self::DisplayChanged,
            4 => Self::ServiceReady,
            other => Self::Other(other),
        }
    }
}

/// One badge counter change delivered by the badge subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeChangeEvent {
    pub action: BadgeAction,
    /// Application whose badge changed.
    pub source_app_id: String,
    pub count: i32,
}

impl BadgeChangeEvent {
    pub fn new(action: BadgeAction, source_app_id: impl Into<String>, count: i32) -> Self {
        Self {
            action,
            source_app_id: source_app_id.into(),
            count,
        }
    }

    /// Builds an event from raw host callback arguments.
    ///
    /// Returns `None` when the host passes no application id. Counts above
    /// `i32::MAX` saturate.
    pub fn from_host(action: u32, app_id: Option<&str>, count: u32) -> Option<Self> {
        let app_id = app_id?;
        Some(Self::new(
            BadgeAction::from_raw(action),
            app_id,
            i32::try_from(count).unwrap_or(i32::MAX),
        ))
    }
}
