// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DEFAULT_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH, MIN_SIDEBAR_WIDTH};

/// Tracks divider drags and keeps the sidebar width inside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeController {
    width: i64,
    resizing: bool,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIDEBAR_WIDTH,
            resizing: false,
        }
    }
}

impl ResizeController {
    /// Starts from a persisted width, clamped into range. `None` keeps the
    /// default.
    pub fn restore(persisted: Option<i64>) -> Self {
        let width = persisted
            .map(|value| value.clamp(MIN_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH))
            .unwrap_or(DEFAULT_SIDEBAR_WIDTH);
        Self {
            width,
            resizing: false,
        }
    }

    pub const fn width(&self) -> i64 {
        self.width
    }

    pub const fn is_resizing(&self) -> bool {
        self.resizing
    }

    pub fn begin(&mut self) {
        self.resizing = true;
    }

    /// Applies `pointer_x - container_left` when it is in range. Returns
    /// whether the width changed. Out-of-range positions and moves outside a
    /// drag leave the width alone.
    pub fn drag_to(&mut self, pointer_x: i64, container_left: i64) -> bool {
        if !self.resizing {
            return false;
        }
        let candidate = pointer_x - container_left;
        if !(MIN_SIDEBAR_WIDTH..=MAX_SIDEBAR_WIDTH).contains(&candidate) {
            return false;
        }
        let changed = candidate != self.width;
        self.width = candidate;
        changed
    }

    /// Finishes a drag. Returns the width to persist, which is only present
    /// when it differs from the default.
    pub fn end(&mut self) -> Option<i64> {
        if !self.resizing {
            return None;
        }
        self.resizing = false;
        (self.width != DEFAULT_SIDEBAR_WIDTH).then_some(self.width)
    }

    /// A whole drag in one step, relative to the current width.
    pub fn nudge(&mut self, delta: i64) -> Option<i64> {
        self.begin();
        let target = self.width.saturating_add(delta);
        self.drag_to(target, 0);
        self.end()
    }
}
