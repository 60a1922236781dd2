//! Badge-change routing.
//!
//! Maps the application id carried by a badge notification to the icon whose
//! counter it drives.

use crate::config::ConfigError;
use crate::launch::{APP_ID_CALL, APP_ID_MESSAGES};
use crate::model::badge::IconId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Comparison between an incoming app id and a companion app id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppIdMatch {
    /// Full string equality.
    #[default]
    Exact,
    /// The incoming id only has to be a prefix of the companion id, so
    /// `com.samsung` (and the empty string) match the call app.
    Prefix,
}

impl AppIdMatch {
    pub fn matches(self, incoming: &str, target: &str) -> bool {
        match self {
            Self::Exact => incoming == target,
            Self::Prefix => target.starts_with(incoming),
        }
    }
}

impl FromStr for AppIdMatch {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "prefix" => Ok(Self::Prefix),
            _ => Err(ConfigError::InvalidBadgeMatch(value.to_string())),
        }
    }
}

/// Icon driven by badges of `source_app_id`; call app wins over messages.
pub fn route_badge(source_app_id: &str, mode: AppIdMatch) -> Option<IconId> {
    if mode.matches(source_app_id, APP_ID_CALL) {
        Some(IconId::MissedCalls)
    } else if mode.matches(source_app_id, APP_ID_MESSAGES) {
        Some(IconId::UnreadMessages)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{route_badge, AppIdMatch};
    use crate::model::badge::IconId;

    #[test]
    fn exact_mode_requires_full_app_id() {
        assert_eq!(
            route_badge("com.samsung.call", AppIdMatch::Exact),
            Some(IconId::MissedCalls)
        );
        assert_eq!(
            route_badge("com.samsung.message", AppIdMatch::Exact),
            Some(IconId::UnreadMessages)
        );
        assert_eq!(route_badge("com.samsung", AppIdMatch::Exact), None);
        assert_eq!(route_badge("com.samsung.call.extra", AppIdMatch::Exact), None);
    }

    #[test]
    fn prefix_mode_accepts_truncated_ids() {
        assert_eq!(
            route_badge("com.samsung", AppIdMatch::Prefix),
            Some(IconId::MissedCalls)
        );
        assert_eq!(
            route_badge("com.samsung.mess", AppIdMatch::Prefix),
            Some(IconId::UnreadMessages)
        );
        assert_eq!(route_badge("", AppIdMatch::Prefix), Some(IconId::MissedCalls));
        assert_eq!(route_badge("com.samsung.callx", AppIdMatch::Prefix), None);
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!(" Prefix ".parse::<AppIdMatch>().unwrap(), AppIdMatch::Prefix);
        assert!("regex".parse::<AppIdMatch>().is_err());
    }
}
