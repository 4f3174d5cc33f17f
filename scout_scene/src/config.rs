// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration of the headless [`Scene`](crate::Scene).

use kurbo::Size;

use crate::types::Color;

/// Settings of a [`Scene`](crate::Scene).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    /// Viewport size in pixels.
    pub viewport: Size,
    /// Background color.
    pub background: Color,
    /// Display segments per curved cell direction. Linear directions always use one.
    pub segments_per_cell: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1024.0, 768.0),
            background: Color::from_rgb8(0xcc, 0xcc, 0xcc),
            segments_per_cell: 8,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: SceneConfig = serde_json::from_str(r#"{ "segments_per_cell": 2 }"#).unwrap();
        assert_eq!(config.segments_per_cell, 2);
        assert_eq!(config.viewport, SceneConfig::default().viewport);
    }
}
