//! Identifiers shared with the compiled layout resource.
//!
//! These names and codes are part of the resource contract; renaming any of
//! them breaks the watch face silently.

use crate::model::badge::IconId;
use crate::platform::MessageId;

pub const PART_MISSED_CALLS: &str = "missed_calls";
pub const PART_UNREAD_MESSAGES: &str = "unread_messages";

pub const SIGNAL_MISSED_CALLS_PRESS: &str = "signal_missed_calls_press";
pub const SIGNAL_MISSED_CALLS_UNPRESS: &str = "signal_missed_calls_unpress";
pub const SIGNAL_UNREAD_MESSAGES_PRESS: &str = "signal_unread_messages_press";
pub const SIGNAL_UNREAD_MESSAGES_UNPRESS: &str = "signal_unread_messages_unpress";

/// Primary button pressed over a part.
pub const EMISSION_PRESS: &str = "mouse,down,1";
/// Primary button released over a part.
pub const EMISSION_RELEASE: &str = "mouse,up,1";

/// Layout resource, relative to the package resource directory.
pub const MAIN_LAYOUT_FILE: &str = "edje/main.edj";
pub const MAIN_LAYOUT_GROUP: &str = "main";
/// Window part that receives the main layout.
pub const WINDOW_CONTENT_PART: &str = "default";

/// Everything the view needs to drive one tappable icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconBinding {
    pub icon: IconId,
    /// Tappable region raising press/release emissions.
    pub part: &'static str,
    pub press_signal: &'static str,
    pub unpress_signal: &'static str,
    pub badge_message: MessageId,
}

pub const ICON_BINDINGS: [IconBinding; 2] = [
    IconBinding {
        icon: IconId::MissedCalls,
        part: PART_MISSED_CALLS,
        press_signal: SIGNAL_MISSED_CALLS_PRESS,
        unpress_signal: SIGNAL_MISSED_CALLS_UNPRESS,
        badge_message: MessageId::SetBadgeMissedCalls,
    },
    IconBinding {
        icon: IconId::UnreadMessages,
        part: PART_UNREAD_MESSAGES,
        press_signal: SIGNAL_UNREAD_MESSAGES_PRESS,
        unpress_signal: SIGNAL_UNREAD_MESSAGES_UNPRESS,
        badge_message: MessageId::SetBadgeUnreadMessages,
    },
];

pub fn binding(icon: IconId) -> &'static IconBinding {
    match icon {
        IconId::MissedCalls => &ICON_BINDINGS[0],
        IconId::UnreadMessages => &ICON_BINDINGS[1],
    }
}

/// Looks up the icon owning a tappable part.
pub fn binding_for_part(part: &str) -> Option<&'static IconBinding> {
    ICON_BINDINGS.iter().find(|binding| binding.part == part)
}

#[cfg(test)]
mod tests {
    use super::{binding, binding_for_part, ICON_BINDINGS};
    use crate::model::badge::IconId;

    #[test]
    fn bindings_are_indexed_by_icon() {
        for icon in IconId::ALL {
            assert_eq!(binding(icon).icon, icon);
        }
        assert_eq!(ICON_BINDINGS.len(), IconId::ALL.len());
    }

    #[test]
    fn badge_parts_are_not_tappable() {
        assert_eq!(
            binding_for_part("unread_messages").map(|b| b.icon),
            Some(IconId::UnreadMessages)
        );
        assert!(binding_for_part("unread_messages_badge").is_none());
        assert!(binding_for_part("hand_second").is_none());
    }
}
