use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Rectangle draw payload.
///
/// `rect` is the unrotated rectangle; `angle` (degrees) rotates it about its center.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub angle: f32,
    pub fill: Option<Color>,
    pub border: Option<Border>,
}

impl DrawList {
    /// Records a rectangle draw command.
    #[inline]
    pub fn push_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        angle: f32,
        fill: Option<Color>,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::Rect(RectCmd { rect, angle, fill, border }));
    }

    /// Records an unfilled outline, used for debug overlays.
    #[inline]
    pub fn push_outline(&mut self, z: ZIndex, rect: Rect, border: Border) {
        self.push_rect(z, rect, 0.0, None, Some(border));
    }
}
