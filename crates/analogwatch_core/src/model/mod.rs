//! Value types exchanged between the host, the view and the dispatcher.
//!
//! # Responsibility
//! - Define the time, icon and badge values that flow through the watch face.
//! - Keep every value copyable or cheaply cloned; nothing here owns host state.
//!
//! # Invariants
//! - `WallClockTime` components are always within 24-hour clock ranges.
//! - `IconId` is a closed enumeration of the two tappable regions.

pub mod badge;
pub mod time;
