//! Icon lookup by pixel density.

use strum::{Display, EnumIter};
use tictac_protocol::Mark;

/// Icon families shipped with the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Icon {
    /// Player mark.
    Tick,
    /// Opponent mark.
    Eyeball,
}

impl Icon {
    /// Icon family for a mark; empty cells have none.
    pub fn for_mark(mark: Mark) -> Option<Self> {
        match mark {
            Mark::Player => Some(Icon::Tick),
            Mark::Opponent => Some(Icon::Eyeball),
            Mark::Empty => None,
        }
    }
}

/// Path of the icon asset for a display's device pixel ratio.
///
/// Ratios are rounded up; anything at or above 2 gets the `2x` asset.
/// Non-finite or non-positive ratios count as 1.
pub fn icon_path(icon: Icon, device_pixel_ratio: f64) -> String {
    let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.ceil()
    } else {
        1.0
    };
    let scale = if ratio >= 2.0 { "2x" } else { "1x" };
    format!("/icons/{}-{}.png", icon, scale)
}
