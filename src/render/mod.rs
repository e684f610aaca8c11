mod null_renderer;
mod primitives;
mod scene;

pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, TextHAlign, TextPrimitive};
pub use scene::{AxisPrimitives, CellKey, CellScene, GridScene};

use crate::error::HorizonResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `GridScene` so
/// drawing code remains isolated from aggregation and interaction logic.
pub trait Renderer {
    fn render(&mut self, scene: &GridScene) -> HorizonResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
