use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{HorizonError, HorizonResult};
use crate::render::{
    CellScene, Color, GridScene, LinePrimitive, Renderer, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub cells_drawn: usize,
    pub bands_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        scene: &GridScene,
    ) -> HorizonResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Band layers are composited with native clip regions: each band is drawn
/// inside `save`/`clip`/`restore`, so clip state never leaks between cells.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> HorizonResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(HorizonError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> HorizonResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the current surface as PNG.
    pub fn write_png(&self, path: impl AsRef<Path>) -> HorizonResult<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|err| {
            HorizonError::InvalidData(format!("failed to create `{}`: {err}", path.display()))
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| HorizonError::InvalidData(format!("failed to write png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, scene: &GridScene) -> HorizonResult<()> {
        scene.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for cell in &scene.cells {
            draw_cell(context, cell, &mut stats)?;
        }
        for text in scene.row_labels.iter().chain(&scene.column_labels) {
            draw_text(context, text)?;
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, scene: &GridScene) -> HorizonResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, scene)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        scene: &GridScene,
    ) -> HorizonResult<()> {
        self.render_with_context(context, scene)
    }
}

fn draw_cell(
    context: &Context,
    cell: &CellScene,
    stats: &mut CairoRenderStats,
) -> HorizonResult<()> {
    save(context)?;
    context.translate(cell.origin_x, cell.origin_y);

    for band in &cell.horizon.bands {
        save(context)?;
        context.rectangle(band.clip.x, band.clip.y, band.clip.width, band.clip.height);
        context.clip();
        context.translate(0.0, band.translate_y);
        for segment in &cell.horizon.segments {
            let mut vertices = segment.polygon.iter();
            let Some(first) = vertices.next() else {
                continue;
            };
            context.move_to(first.x, first.y);
            for vertex in vertices {
                context.line_to(vertex.x, vertex.y);
            }
            context.close_path();
        }
        apply_color(context, band.fill);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill band", err))?;
        restore(context)?;
        stats.bands_drawn += 1;
    }

    for line in &cell.axis.lines {
        draw_line(context, *line)?;
        stats.lines_drawn += 1;
    }
    for text in &cell.axis.texts {
        draw_text(context, text)?;
        stats.texts_drawn += 1;
    }

    restore(context)?;
    stats.cells_drawn += 1;
    Ok(())
}

fn draw_line(context: &Context, line: LinePrimitive) -> HorizonResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn draw_text(context: &Context, text: &TextPrimitive) -> HorizonResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let weight = if text.bold { "Bold " } else { "" };
    let font_description =
        FontDescription::from_string(&format!("Sans {weight}{}px", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let offset_x = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };

    save(context)?;
    context.translate(text.x, text.y);
    context.rotate(text.rotation_deg.to_radians());
    apply_color(context, text.color);
    context.move_to(offset_x, 0.0);
    pangocairo::functions::show_layout(context, &layout);
    restore(context)
}

fn save(context: &Context) -> HorizonResult<()> {
    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))
}

fn restore(context: &Context) -> HorizonResult<()> {
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> HorizonError {
    HorizonError::InvalidData(format!("{prefix}: {err}"))
}
