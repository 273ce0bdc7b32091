use std::path::Path;

use kurbo::Shape as _;

use crate::color::Color;
use crate::error::{PlateMapError, PlateMapResult};
use crate::plate::{NUM_COLS, NUM_ROWS, PlateLayout, ROW_LETTERS, WellId};
use crate::scene::PlateScene;
use crate::text::{TextBrushRgba8, TextLayoutEngine};

/// Top edge of the title block.
const HEADING_TOP: f64 = 60.0;
/// Vertical gap between the title and the subtitle block.
const HEADING_GAP: f64 = 30.0;
/// Auto-shrink floor for well labels.
const MIN_LABEL_FONT_SIZE: f32 = 6.0;

/// Rendered frame pixels in row-major RGBA8 (premultiplied alpha; all plate
/// content is opaque, so this is identical to straight alpha).
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Renderer-level settings.
#[derive(Clone, Copy, Debug)]
pub struct RenderSettings {
    /// Canvas background color, also used for unfilled well interiors.
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
        }
    }
}

/// CPU plate-map rasterizer powered by `vello_cpu`.
pub struct PlateRenderer {
    text: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
    settings: RenderSettings,
}

impl PlateRenderer {
    /// Build a renderer around raw TTF/OTF bytes.
    pub fn new(font_bytes: Vec<u8>, settings: RenderSettings) -> PlateMapResult<Self> {
        let text = TextLayoutEngine::new(&font_bytes)?;
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            text,
            font,
            settings,
        })
    }

    /// Render `scene` into a fixed 3300x2550 RGBA8 frame.
    #[tracing::instrument(skip(self, scene))]
    pub fn render(&mut self, scene: &PlateScene) -> PlateMapResult<FrameRgba> {
        let width: u16 = PlateLayout::WIDTH
            .try_into()
            .map_err(|_| PlateMapError::render("canvas width exceeds u16"))?;
        let height: u16 = PlateLayout::HEIGHT
            .try_into()
            .map_err(|_| PlateMapError::render("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        self.draw_background(&mut ctx);
        self.draw_wells(&mut ctx, scene);
        self.draw_grid_labels(&mut ctx)?;
        self.draw_well_labels(&mut ctx, scene)?;
        self.draw_headings(&mut ctx, scene)?;

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRgba {
            width: PlateLayout::WIDTH,
            height: PlateLayout::HEIGHT,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }

    fn draw_background(&self, ctx: &mut vello_cpu::RenderContext) {
        let bg = self.settings.background;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(PlateLayout::WIDTH),
            f64::from(PlateLayout::HEIGHT),
        ));
    }

    /// Outline ring plus interior disc for each of the 96 wells. Unannotated
    /// wells keep the background color inside the ring.
    fn draw_wells(&self, ctx: &mut vello_cpu::RenderContext, scene: &PlateScene) {
        for well in WellId::all() {
            let center = PlateLayout::well_center(well);
            let fill = scene
                .annotations
                .get(&well)
                .and_then(|a| a.fill)
                .unwrap_or(self.settings.background);

            let outer = PlateLayout::WELL_DIAMETER / 2.0;
            fill_circle(ctx, center, outer, Color::BLACK);
            fill_circle(ctx, center, outer - PlateLayout::OUTLINE_WIDTH, fill);
        }
    }

    /// Row letters left of the grid, column numbers above it.
    fn draw_grid_labels(&mut self, ctx: &mut vello_cpu::RenderContext) -> PlateMapResult<()> {
        let brush = brush_for(Color::BLACK);

        for row in 0..NUM_ROWS {
            let label = ROW_LETTERS[row as usize].to_string();
            let layout = self
                .text
                .layout_line(&label, PlateLayout::INDEX_FONT_SIZE, brush)?;
            let center = PlateLayout::well_center(WellId::new(row, 0)?);
            let x = PlateLayout::X_START - PlateLayout::WELL_PADDING - f64::from(layout.width());
            let y = center.y - f64::from(layout.height()) / 2.0;
            draw_layout(ctx, &layout, &self.font, x, y);
        }

        for col in 0..NUM_COLS {
            let label = (col + 1).to_string();
            let layout = self
                .text
                .layout_line(&label, PlateLayout::INDEX_FONT_SIZE, brush)?;
            let center = PlateLayout::well_center(WellId::new(0, col)?);
            let x = center.x - f64::from(layout.width()) / 2.0;
            let y = PlateLayout::Y_START - PlateLayout::WELL_PADDING - f64::from(layout.height());
            draw_layout(ctx, &layout, &self.font, x, y);
        }

        Ok(())
    }

    /// Annotation text centered in each annotated well, shrunk to fit.
    fn draw_well_labels(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        scene: &PlateScene,
    ) -> PlateMapResult<()> {
        for (well, annotation) in &scene.annotations {
            if annotation.label.is_empty() {
                continue;
            }
            let brush = brush_for(annotation.label_color.unwrap_or(Color::BLACK));
            let lines = self.fit_label(&annotation.label, brush)?;
            let center = PlateLayout::well_center(*well);
            let block_height: f64 = lines.iter().map(|l| f64::from(l.height())).sum();
            draw_block_centered(ctx, &lines, &self.font, center.x, center.y - block_height / 2.0);
        }
        Ok(())
    }

    /// Lay the label out at the annotation size, shrinking by 30% steps until
    /// the widest line fits inside the well diameter.
    fn fit_label(
        &mut self,
        label: &str,
        brush: TextBrushRgba8,
    ) -> PlateMapResult<Vec<parley::Layout<TextBrushRgba8>>> {
        let mut size = PlateLayout::ANNOTATION_FONT_SIZE;
        loop {
            let lines = self.layout_block(label, size, brush)?;
            let widest = lines.iter().map(|l| f64::from(l.width())).fold(0.0, f64::max);
            if widest <= PlateLayout::WELL_DIAMETER || size <= MIN_LABEL_FONT_SIZE {
                return Ok(lines);
            }
            size *= 0.7;
        }
    }

    /// Title centered at the top, subtitle beneath it, date stamp top-right.
    fn draw_headings(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        scene: &PlateScene,
    ) -> PlateMapResult<()> {
        let brush = brush_for(Color::BLACK);
        let center_x = f64::from(PlateLayout::WIDTH) / 2.0;
        let mut y = HEADING_TOP;

        if let Some(title) = &scene.title {
            let lines = self.layout_block(title, PlateLayout::TITLE_FONT_SIZE, brush)?;
            y += draw_block_centered(ctx, &lines, &self.font, center_x, y) + HEADING_GAP;
        }

        if let Some(subtitle) = &scene.subtitle {
            let lines = self.layout_block(subtitle, PlateLayout::SMALL_FONT_SIZE, brush)?;
            draw_block_centered(ctx, &lines, &self.font, center_x, y);
        }

        if !scene.date_text.is_empty() {
            let layout =
                self.text
                    .layout_line(&scene.date_text, PlateLayout::SMALL_FONT_SIZE, brush)?;
            let x = f64::from(PlateLayout::WIDTH)
                - PlateLayout::X_START
                - PlateLayout::WELL_PADDING
                - f64::from(layout.width());
            draw_layout(ctx, &layout, &self.font, x, HEADING_TOP);
        }

        Ok(())
    }

    /// One layout per text line. Blank lines are laid out as a single space so
    /// they still advance the vertical cursor.
    fn layout_block(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> PlateMapResult<Vec<parley::Layout<TextBrushRgba8>>> {
        text.split('\n')
            .map(|line| {
                let line = if line.is_empty() { " " } else { line };
                self.text.layout_line(line, size_px, brush)
            })
            .collect()
    }
}

/// Write `frame` as a PNG.
pub fn save_png(frame: &FrameRgba, path: &Path) -> PlateMapResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| PlateMapError::io(format!("write png '{}': {e}", path.display())))
}

fn brush_for(color: Color) -> TextBrushRgba8 {
    TextBrushRgba8 {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

fn fill_circle(
    ctx: &mut vello_cpu::RenderContext,
    center: kurbo::Point,
    radius: f64,
    color: Color,
) {
    let circle = kurbo::Circle::new(center, radius);
    let mut path = vello_cpu::kurbo::BezPath::new();
    for el in circle.path_elements(0.1) {
        path.push(el);
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(&path);
}

/// Draw an already-shaped layout with its top-left corner at `(x, y)`.
fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
    x: f64,
    y: f64,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

/// Stack `lines` vertically starting at `top_y`, each line centered on
/// `center_x`. Returns the total block height.
fn draw_block_centered(
    ctx: &mut vello_cpu::RenderContext,
    lines: &[parley::Layout<TextBrushRgba8>],
    font: &vello_cpu::peniko::FontData,
    center_x: f64,
    top_y: f64,
) -> f64 {
    let mut y = top_y;
    for layout in lines {
        let x = center_x - f64::from(layout.width()) / 2.0;
        draw_layout(ctx, layout, font, x, y);
        y += f64::from(layout.height());
    }
    y - top_y
}
