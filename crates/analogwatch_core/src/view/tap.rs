//! Single-slot icon tap subscription.
//!
//! # Invariants
//! - At most one listener is registered; registering replaces the previous one.

use crate::model::badge::IconId;

/// Receives completed taps (press followed by release) on an icon.
pub trait IconTapListener {
    fn on_icon_tapped(&mut self, icon: IconId);
}

impl<F> IconTapListener for F
where
    F: FnMut(IconId),
{
    fn on_icon_tapped(&mut self, icon: IconId) {
        self(icon)
    }
}

#[derive(Default)]
pub struct TapSubscription {
    listener: Option<Box<dyn IconTapListener>>,
}

impl TapSubscription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `listener`, returning `true` when one was replaced.
    pub fn register(&mut self, listener: Box<dyn IconTapListener>) -> bool {
        self.listener.replace(listener).is_some()
    }

    pub fn clear(&mut self) {
        self.listener = None;
    }

    pub fn is_registered(&self) -> bool {
        self.listener.is_some()
    }

    /// Notifies the registered listener. Returns `false` when the slot is empty.
    pub fn invoke(&mut self, icon: IconId) -> bool {
        match self.listener.as_mut() {
            Some(listener) => {
                listener.on_icon_tapped(icon);
                true
            }
            None => false,
        }
    }
}
