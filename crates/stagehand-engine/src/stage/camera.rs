use crate::coords::Vec2;
use crate::paint::Color;

/// Main camera: background fill and the screen → world mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Clear colour. `None` leaves the renderer's default.
    pub background: Option<Color>,
    /// World position shown at the screen's top-left corner.
    pub scroll: Vec2,
    /// Screen pixels per world unit.
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self { background: None, scroll: Vec2::zero(), zoom: 1.0 }
    }
}

impl Camera {
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        p / self.zoom + self.scroll
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        (p - self.scroll) * self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_is_identity() {
        let cam = Camera::default();
        assert_eq!(cam.screen_to_world(Vec2::new(12.0, 34.0)), Vec2::new(12.0, 34.0));
    }

    #[test]
    fn scroll_and_zoom_round_trip() {
        let cam = Camera { background: None, scroll: Vec2::new(100.0, 50.0), zoom: 2.0 };
        let world = cam.screen_to_world(Vec2::new(20.0, 10.0));
        assert_eq!(world, Vec2::new(110.0, 55.0));
        assert_eq!(cam.world_to_screen(world), Vec2::new(20.0, 10.0));
    }
}
