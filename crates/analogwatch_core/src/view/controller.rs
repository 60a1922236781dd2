//! Watch-face view state and layout synchronization.

use super::defines::{
    binding, binding_for_part, EMISSION_PRESS, EMISSION_RELEASE, ICON_BINDINGS,
    MAIN_LAYOUT_FILE, MAIN_LAYOUT_GROUP, WINDOW_CONTENT_PART,
};
use super::tap::{IconTapListener, TapSubscription};
use super::ViewError;
use crate::model::badge::IconId;
use crate::model::time::WallClockTime;
use crate::platform::{
    DisplayBackend, LayoutSpec, MessageId, MessagePayload, WatchLayout, WatchWindow,
    WindowOptions,
};
use log::{debug, error, info, warn};
use std::path::PathBuf;

/// Renderer attachment of the view.
///
/// `Uninitialized -> Created -> Destroyed`; `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Uninitialized,
    Created,
    Destroyed,
}

/// Inputs resolved by the lifecycle adapter before the view is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSetup {
    /// Window title, normally the package name.
    pub title: String,
    /// Directory holding `edje/main.edj`.
    pub resource_dir: Option<PathBuf>,
}

/// Single authority over the on-screen representation.
pub struct ViewController<D: DisplayBackend> {
    window: Option<D::Window>,
    layout: Option<D::Layout>,
    width: i32,
    height: i32,
    ambient: bool,
    missed_calls: i32,
    unread_messages: i32,
    tap: TapSubscription,
    phase: ViewPhase,
}

impl<D: DisplayBackend> Default for ViewController<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum Gesture {
    Press,
    Release,
}

impl<D: DisplayBackend> ViewController<D> {
    pub fn new() -> Self {
        Self {
            window: None,
            layout: None,
            width: 0,
            height: 0,
            ambient: false,
            missed_calls: 0,
            unread_messages: 0,
            tap: TapSubscription::new(),
            phase: ViewPhase::Uninitialized,
        }
    }

    /// Builds the window and main layout sized to `width x height`.
    ///
    /// A window that was created before the layout failed is kept so that
    /// `destroy_view` still releases it; the view then stays inert.
    ///
    /// # Errors
    /// - `InvalidPhase` when a window already exists or the view was destroyed.
    /// - `WindowUnavailable`, `ResourcePathUnavailable`, `LayoutUnavailable`
    ///   for the construction step that failed.
    pub fn create_view(
        &mut self,
        backend: &mut D,
        setup: &ViewSetup,
        width: i32,
        height: i32,
    ) -> Result<(), ViewError> {
        if self.phase != ViewPhase::Uninitialized || self.window.is_some() {
            warn!(
                "event=view_create module=view status=skip phase={:?}",
                self.phase
            );
            return Err(ViewError::InvalidPhase(self.phase));
        }

        self.width = width;
        self.height = height;

        let options = WindowOptions::watch_face(setup.title.as_str(), width, height);
        let window = match backend.create_window(&options) {
            Ok(window) => self.window.insert(window),
            Err(err) => {
                error!(
                    "event=view_create module=view status=error stage=window error={}",
                    err
                );
                return Err(ViewError::WindowUnavailable(err));
            }
        };

        let Some(spec) = main_layout_spec(setup, width, height) else {
            error!("event=view_create module=view status=error stage=resource_path");
            return Err(ViewError::ResourcePathUnavailable);
        };

        let mut layout = match backend.create_layout(window, &spec) {
            Ok(layout) => layout,
            Err(err) => {
                error!(
                    "event=view_create module=view status=error stage=layout file={} error={}",
                    spec.file.display(),
                    err
                );
                return Err(ViewError::LayoutUnavailable(err));
            }
        };

        for icon in &ICON_BINDINGS {
            layout.add_signal_route(EMISSION_PRESS, icon.part);
            layout.add_signal_route(EMISSION_RELEASE, icon.part);
        }

        window.show();
        self.layout = Some(layout);
        self.phase = ViewPhase::Created;
        info!(
            "event=view_create module=view status=ok width={} height={}",
            width, height
        );
        Ok(())
    }

    /// Pushes hour/minute/second to the clock hands in one batched message.
    pub fn set_display_time(&mut self, time: WallClockTime) {
        let Some(layout) = self.attached_layout("set_display_time") else {
            return;
        };
        layout.send_message(
            MessageId::SetTime,
            MessagePayload::IntSet(time.components().to_vec()),
        );
    }

    /// Shows (`false`) or hides (`true`) the seconds hand.
    pub fn toggle_ambient_mode(&mut self, enabled: bool) {
        let Some(layout) = self.attached_layout("toggle_ambient_mode") else {
            return;
        };
        layout.send_message(MessageId::AmbientMode, MessagePayload::Int(i32::from(enabled)));
        self.ambient = enabled;
    }

    /// Stores `count` for `icon` and pushes it to the badge. Negative values
    /// are passed through.
    pub fn set_badge(&mut self, icon: IconId, count: i32) {
        let target = binding(icon);
        let Some(layout) = self.attached_layout("set_badge") else {
            return;
        };
        layout.send_message(target.badge_message, MessagePayload::Int(count));
        match icon {
            IconId::MissedCalls => self.missed_calls = count,
            IconId::UnreadMessages => self.unread_messages = count,
        }
        debug!(
            "event=badge_set module=view status=ok icon={} count={}",
            icon, count
        );
    }

    /// Replaces the icon tap listener.
    pub fn register_icon_tap_callback(&mut self, listener: Box<dyn IconTapListener>) {
        if self.tap.register(listener) {
            debug!("event=tap_listener module=view status=replaced");
        }
    }

    /// Releases the layout, window and tap listener, then moves to
    /// `Destroyed`. Safe to call repeatedly and after a failed creation.
    pub fn destroy_view(&mut self) {
        if self.phase == ViewPhase::Destroyed {
            debug!("event=view_destroy module=view status=skip reason=already_destroyed");
            return;
        }
        let had_window = self.window.is_some();
        drop(self.layout.take());
        drop(self.window.take());
        self.tap.clear();
        self.phase = ViewPhase::Destroyed;
        info!(
            "event=view_destroy module=view status=ok window_released={}",
            had_window
        );
    }

    /// Handles an emission routed from the layout.
    ///
    /// Press emits the press feedback only. Release emits the unpress
    /// feedback and then notifies the tap listener.
    pub fn handle_signal(&mut self, emission: &str, source: &str) {
        let Some(target) = binding_for_part(source) else {
            warn!(
                "event=view_signal module=view status=skip reason=unknown_part source={}",
                source
            );
            return;
        };
        let gesture = match emission {
            EMISSION_PRESS => Gesture::Press,
            EMISSION_RELEASE => Gesture::Release,
            _ => {
                debug!(
                    "event=view_signal module=view status=skip reason=unhandled_emission emission={}",
                    emission
                );
                return;
            }
        };

        if self.phase != ViewPhase::Created {
            error!(
                "event=view_signal module=view status=error reason=invalid_layout phase={:?}",
                self.phase
            );
            return;
        }
        let Some(layout) = self.layout.as_mut() else {
            return;
        };

        match gesture {
            Gesture::Press => layout.emit_signal(target.press_signal, target.part),
            Gesture::Release => {
                layout.emit_signal(target.unpress_signal, target.part);
                if !self.tap.invoke(target.icon) {
                    debug!(
                        "event=icon_tap module=view status=skip reason=no_listener icon={}",
                        target.icon
                    );
                }
            }
        }
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn is_created(&self) -> bool {
        self.phase == ViewPhase::Created
    }

    /// Requested window size as `(width, height)`.
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    /// Last counter pushed for `icon`.
    pub fn badge(&self, icon: IconId) -> i32 {
        match icon {
            IconId::MissedCalls => self.missed_calls,
            IconId::UnreadMessages => self.unread_messages,
        }
    }

    pub fn has_icon_tap_callback(&self) -> bool {
        self.tap.is_registered()
    }

    fn attached_layout(&mut self, operation: &'static str) -> Option<&mut D::Layout> {
        if self.phase != ViewPhase::Created {
            error!(
                "event={} module=view status=error reason=invalid_layout phase={:?}",
                operation, self.phase
            );
            return None;
        }
        self.layout.as_mut()
    }
}

fn main_layout_spec(setup: &ViewSetup, width: i32, height: i32) -> Option<LayoutSpec> {
    let resource_dir = setup.resource_dir.as_ref()?;
    Some(LayoutSpec {
        file: resource_dir.join(MAIN_LAYOUT_FILE),
        group: MAIN_LAYOUT_GROUP,
        part: WINDOW_CONTENT_PART,
        min_width: width,
        min_height: height,
        width,
        height,
    })
}
