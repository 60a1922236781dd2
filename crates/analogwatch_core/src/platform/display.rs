//! Declarative UI renderer contracts.

use super::PlatformError;
use std::path::PathBuf;

/// Integer message ids understood by the layout script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    SetTime,
    AmbientMode,
    SetBadgeMissedCalls,
    SetBadgeUnreadMessages,
}

impl MessageId {
    /// Wire value shared with the layout resource.
    pub fn code(self) -> i32 {
        match self {
            Self::SetTime => 1,
            Self::AmbientMode => 2,
            Self::SetBadgeMissedCalls => 3,
            Self::SetBadgeUnreadMessages => 4,
        }
    }
}

/// Message body sent to the layout script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePayload {
    Int(i32),
    IntSet(Vec<i32>),
}

/// Window policy applied when the watch window is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub borderless: bool,
    pub alpha: bool,
    pub indicator_visible: bool,
    pub indicator_transparent: bool,
    pub focus_skip: bool,
    pub role: &'static str,
}

impl WindowOptions {
    /// Standard watch-face window: borderless, opaque, no indicator.
    pub fn watch_face(title: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            borderless: true,
            alpha: false,
            indicator_visible: false,
            indicator_transparent: true,
            focus_skip: true,
            role: "no-effect",
        }
    }
}

/// Layout instantiation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSpec {
    /// Compiled layout resource file.
    pub file: PathBuf,
    /// Group inside the resource.
    pub group: &'static str,
    /// Window part the layout is placed into.
    pub part: &'static str,
    pub min_width: i32,
    pub min_height: i32,
    pub width: i32,
    pub height: i32,
}

/// Window surface. Dropping it releases the window.
pub trait WatchWindow {
    fn show(&mut self);
}

/// Instantiated layout. Dropping it releases the layout.
pub trait WatchLayout {
    /// Forwards `emission` raised on part `source` back to the watch face.
    fn add_signal_route(&mut self, emission: &str, source: &str);

    fn send_message(&mut self, id: MessageId, payload: MessagePayload);

    fn emit_signal(&mut self, signal: &str, part: &str);
}

/// Toolkit entry point that builds windows and layouts.
pub trait DisplayBackend {
    type Window: WatchWindow;
    type Layout: WatchLayout;

    fn create_window(&mut self, options: &WindowOptions) -> Result<Self::Window, PlatformError>;

    fn create_layout(
        &mut self,
        window: &mut Self::Window,
        spec: &LayoutSpec,
    ) -> Result<Self::Layout, PlatformError>;

    /// Applies a new UI language to translatable texts.
    fn set_language(&mut self, locale: &str);
}

#[cfg(test)]
mod tests {
    use super::{MessageId, WindowOptions};

    #[test]
    fn message_codes_match_layout_script() {
        assert_eq!(MessageId::SetTime.code(), 1);
        assert_eq!(MessageId::AmbientMode.code(), 2);
        assert_eq!(MessageId::SetBadgeMissedCalls.code(), 3);
        assert_eq!(MessageId::SetBadgeUnreadMessages.code(), 4);
    }

    #[test]
    fn watch_face_window_hides_indicator() {
        let options = WindowOptions::watch_face("org.example.analogwatch", 360, 360);
        assert!(options.borderless);
        assert!(!options.alpha);
        assert!(!options.indicator_visible);
        assert_eq!(options.role, "no-effect");
    }
}
