use crate::error::HorizonResult;
use crate::render::{GridScene, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates scene content so tests can catch invalid geometry
/// before a real backend draws it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_cell_count: usize,
    pub last_band_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &GridScene) -> HorizonResult<()> {
        scene.validate()?;
        self.render_count += 1;
        self.last_cell_count = scene.cells.len();
        self.last_band_count = scene.band_drawable_count();
        self.last_text_count = scene.row_labels.len()
            + scene.column_labels.len()
            + scene
                .cells
                .iter()
                .map(|cell| cell.axis.texts.len())
                .sum::<usize>();
        Ok(())
    }
}
