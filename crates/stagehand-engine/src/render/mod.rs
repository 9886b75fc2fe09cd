//! Renderer seam.
//!
//! The runtime records the stage into a `DrawList` every frame and hands it to a
//! `Renderer` together with the camera. Geometry in the list is in world units;
//! renderers map it to their surface with [`Camera::world_to_screen`].

use anyhow::Result;

use crate::scene::DrawList;
use crate::stage::Camera;

/// Consumer of per-frame draw streams.
pub trait Renderer {
    fn render(&mut self, camera: &Camera, list: &mut DrawList) -> Result<()>;
}

/// Renderer that discards every frame. Used for headless simulation.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _camera: &Camera, list: &mut DrawList) -> Result<()> {
        log::trace!("discarding {} draw items", list.len());
        Ok(())
    }
}
