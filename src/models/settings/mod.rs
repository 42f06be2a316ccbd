// Grid configuration
// Layout and interaction tunables for the week grid

use serde::Deserialize;

/// Tunables for layout geometry and pointer interactions.
///
/// Loaded from the host's TOML configuration (see
/// `services::settings`); every constant the geometry mapper or the
/// interaction translator needs lives here rather than at the call sites.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Pixel height of one hour row
    pub hour_height: f32,
    /// Visual stacking cap for simultaneous columns
    pub max_visible_columns: usize,
    /// Vertical trim per spanned hour, px
    pub hour_seam: f32,
    /// Bottom gutter between stacked segments, px
    pub segment_gutter: f32,
    /// Pointer time snapping granularity, minutes
    pub snap_minutes: u32,
    /// Block length substituted for a missing end, minutes
    pub default_block_minutes: i64,
    /// Hold delay before a press becomes a drag, ms
    pub hold_before_drag_ms: u64,
    /// Debounce window for intermediate range writes, ms
    pub write_debounce_ms: u64,
    /// Distance from the viewport edge that triggers auto-scroll, px
    pub autoscroll_margin: f32,
    /// Auto-scroll nudge per pointer-move event, px
    pub autoscroll_step: f32,
    /// 0 = Monday .. 6 = Sunday
    pub first_day_of_week: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            hour_height: 52.0,
            max_visible_columns: 3,
            hour_seam: 1.0,
            segment_gutter: 5.0,
            snap_minutes: 15,
            default_block_minutes: 59,
            hold_before_drag_ms: 200,
            write_debounce_ms: 500,
            autoscroll_margin: 20.0,
            autoscroll_step: 16.0,
            first_day_of_week: 0,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.hour_height <= 0.0 {
            return Err("hour_height must be positive".to_string());
        }
        if self.max_visible_columns == 0 {
            return Err("max_visible_columns must be at least 1".to_string());
        }
        if self.snap_minutes == 0 || 60 % self.snap_minutes != 0 {
            return Err("snap_minutes must evenly divide an hour".to_string());
        }
        if self.default_block_minutes < 0 {
            return Err("default_block_minutes cannot be negative".to_string());
        }
        if self.first_day_of_week > 6 {
            return Err("first_day_of_week must be 0-6".to_string());
        }
        Ok(())
    }

    /// Pixel height of one minute row.
    pub fn minute_height(&self) -> f32 {
        self.hour_height / 60.0
    }
}
