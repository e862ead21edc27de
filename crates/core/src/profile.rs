// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display profile: the physical frame the layout writer budgets against

use serde::{Deserialize, Serialize};

/// Minimum accepted frame width in pixels.
pub const MIN_WIDTH_PX: u32 = 320;
/// Minimum accepted frame height in pixels.
pub const MIN_HEIGHT_PX: u32 = 240;

/// Frame geometry passed to the external writer as scalar parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayProfile {
    pub width_px: u32,
    pub height_px: u32,
    pub safe_top_px: u32,
    pub safe_bottom_px: u32,
    pub safe_side_px: u32,
    pub layout_safety_margin_px: u32,
}

impl Default for DisplayProfile {
    fn default() -> Self {
        Self {
            width_px: 1920,
            height_px: 1080,
            safe_top_px: 96,
            safe_bottom_px: 106,
            safe_side_px: 28,
            layout_safety_margin_px: 24,
        }
    }
}

impl DisplayProfile {
    /// Apply a partial update, clamping width/height to their minimums.
    pub fn apply(&self, patch: &DisplayProfilePatch) -> Self {
        Self {
            width_px: patch.width_px.unwrap_or(self.width_px).max(MIN_WIDTH_PX),
            height_px: patch.height_px.unwrap_or(self.height_px).max(MIN_HEIGHT_PX),
            safe_top_px: patch.safe_top_px.unwrap_or(self.safe_top_px),
            safe_bottom_px: patch.safe_bottom_px.unwrap_or(self.safe_bottom_px),
            safe_side_px: patch.safe_side_px.unwrap_or(self.safe_side_px),
            layout_safety_margin_px: patch
                .layout_safety_margin_px
                .unwrap_or(self.layout_safety_margin_px),
        }
    }
}

/// Partial display-profile update; absent keys keep their current value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DisplayProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_px: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_px: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_top_px: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_bottom_px: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_side_px: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_safety_margin_px: Option<u32>,
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
