use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::SeriesIndex;
use crate::error::HorizonResult;
use crate::interaction::{
    CellOverlay, CrosshairState, HoverHit, InteractionState, overlays_for_scene,
};
use crate::render::{GridScene, Renderer};

use super::{GridConfig, RenderSelection, build_grid_scene};

/// Headless grid engine.
///
/// Owns the shared immutable index, the grid configuration, the current
/// selection and the last built scene. Every `render` rebuilds the scene from
/// scratch and hands it to the renderer.
pub struct HorizonGridEngine<R: Renderer> {
    renderer: R,
    index: Arc<SeriesIndex>,
    config: GridConfig,
    selection: RenderSelection,
    scene: Option<GridScene>,
    overlays: Vec<CellOverlay>,
    interaction: InteractionState,
}

impl<R: Renderer> HorizonGridEngine<R> {
    pub fn new(renderer: R, index: Arc<SeriesIndex>, config: GridConfig) -> HorizonResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            index,
            config,
            selection: RenderSelection::default(),
            scene: None,
            overlays: Vec::new(),
            interaction: InteractionState::default(),
        })
    }

    #[must_use]
    pub fn index(&self) -> &SeriesIndex {
        &self.index
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub fn selection(&self) -> &RenderSelection {
        &self.selection
    }

    /// Replaces the selection. Takes effect on the next `render`.
    pub fn set_selection(&mut self, selection: RenderSelection) -> HorizonResult<()> {
        selection.validate(&self.config)?;
        self.selection = selection;
        Ok(())
    }

    /// Rebuilds the whole grid for the current selection and renders it.
    ///
    /// The previous scene, overlays and pointer state are discarded.
    pub fn render(&mut self) -> HorizonResult<()> {
        let scene = build_grid_scene(&self.index, &self.selection, &self.config)?;
        self.renderer.render(&scene)?;

        self.overlays = overlays_for_scene(&scene, &self.index);
        self.interaction.on_pointer_leave();
        debug!(
            cells = scene.cells.len(),
            overlays = self.overlays.len(),
            "rendered grid"
        );
        self.scene = Some(scene);
        Ok(())
    }

    /// Sets the selection and renders in one step.
    pub fn render_selection(&mut self, selection: RenderSelection) -> HorizonResult<()> {
        self.set_selection(selection)?;
        self.render()
    }

    /// Last rendered scene, if any.
    #[must_use]
    pub fn scene(&self) -> Option<&GridScene> {
        self.scene.as_ref()
    }

    #[must_use]
    pub fn overlays(&self) -> &[CellOverlay] {
        &self.overlays
    }

    /// Pretty JSON of the last rendered scene.
    pub fn snapshot_json_pretty(&self) -> HorizonResult<Option<String>> {
        self.scene.as_ref().map(GridScene::to_json_pretty).transpose()
    }

    /// Hit-tests a canvas point against the rendered cells.
    ///
    /// Inside a cell the crosshair follows the pointer; a hit is reported
    /// only when the series has a measurement on the hovered day. Outside
    /// every cell, pointer state is cleared.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<HoverHit> {
        let Some(cell) = self.scene.as_ref().and_then(|scene| scene.cell_at(x, y)) else {
            self.interaction.on_pointer_leave();
            return None;
        };

        let key = cell.key;
        let local_x = x - cell.origin_x;
        let hover = self
            .overlays
            .iter()
            .find(|overlay| overlay.cell() == key)
            .and_then(|overlay| overlay.on_hover(local_x));
        trace!(row = key.row, col = key.col, local_x, hit = hover.is_some(), "pointer move");

        self.interaction.on_pointer_move(
            CrosshairState {
                visible: true,
                cell: Some(key),
                x,
                local_x,
            },
            hover.clone(),
        );
        hover
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    #[must_use]
    pub fn crosshair_state(&self) -> CrosshairState {
        self.interaction.crosshair()
    }

    /// Tooltip for the current hover, if the pointer is over a data point.
    #[must_use]
    pub fn tooltip(&self) -> Option<String> {
        self.interaction.hover().map(HoverHit::tooltip_text)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
