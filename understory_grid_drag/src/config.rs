// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for pointer and keyboard drags.

/// Configuration for the drag session and pointer activation.
#[derive(Clone, Debug, PartialEq)]
pub struct DragConfig {
    /// How long the pointer must be held on a cell before a drag starts (default: 250 ms).
    pub activation_delay_ms: u64,
    /// How far the pointer may wander, in pixels, while the hold delay runs (default: 5).
    ///
    /// Moving further than this before the delay elapses aborts the gesture so
    /// that scrolling and clicking keep working.
    pub activation_tolerance: f64,
    /// Whether several selected items may be moved in one gesture (default: true).
    ///
    /// Containers that cannot keep a relative arrangement (image containers)
    /// refuse multi-item moves regardless of this flag.
    pub allow_multi_move: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_delay_ms: 250,
            activation_tolerance: 5.0,
            allow_multi_move: true,
        }
    }
}

impl DragConfig {
    /// Sets the hold delay.
    #[must_use]
    pub fn with_delay(mut self, ms: u64) -> Self {
        self.activation_delay_ms = ms;
        self
    }

    /// Sets the movement tolerance during the hold delay.
    #[must_use]
    pub fn with_tolerance(mut self, pixels: f64) -> Self {
        self.activation_tolerance = pixels;
        self
    }

    /// Restricts every gesture to a single item.
    #[must_use]
    pub fn single_item_only(mut self) -> Self {
        self.allow_multi_move = false;
        self
    }
}

/// Configuration for keyboard drag mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardDragConfig {
    /// Whether the cancel key ends a keyboard drag (default: true).
    pub cancel_on_escape: bool,
    /// Whether screen-reader announcements are queued (default: true).
    pub announce: bool,
}

impl Default for KeyboardDragConfig {
    fn default() -> Self {
        Self {
            cancel_on_escape: true,
            announce: true,
        }
    }
}

impl KeyboardDragConfig {
    /// Disables cancelling with the cancel key.
    #[must_use]
    pub fn no_escape_cancel(mut self) -> Self {
        self.cancel_on_escape = false;
        self
    }

    /// Disables announcements.
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.announce = false;
        self
    }
}
