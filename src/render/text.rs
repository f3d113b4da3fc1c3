use std::path::{Path, PathBuf};
use std::sync::Arc;

use kurbo::Rect;
use sha2::Digest as _;

use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// Where a title font was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// Loaded from a font file.
    File(PathBuf),
    /// Discovered among the installed system fonts.
    System,
}

impl std::fmt::Display for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(p) => write!(f, "file '{}'", p.display()),
            Self::System => f.write_str("system"),
        }
    }
}

/// Font bytes used to draw frame titles.
#[derive(Clone)]
pub struct TitleFont {
    bytes: Arc<Vec<u8>>,
    index: u32,
    family: String,
    source: FontSource,
}

impl std::fmt::Debug for TitleFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleFont")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .field("source", &self.source)
            .finish()
    }
}

impl TitleFont {
    /// Load a TrueType/OpenType font file.
    pub fn from_file(path: &Path) -> ReelResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            ReelError::load(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes, FontSource::File(path.to_path_buf()))
    }

    /// Wrap raw font bytes; the first face is used.
    pub fn from_bytes(bytes: Vec<u8>, source: FontSource) -> ReelResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes.clone());
        let face = db
            .faces()
            .next()
            .ok_or_else(|| ReelError::load(format!("no font face found in {source}")))?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        let index = face.index;
        Ok(Self {
            bytes: Arc::new(bytes),
            index,
            family,
            source,
        })
    }

    /// First sans-serif system font, falling back to any installed face.
    pub fn system_sans() -> Option<Self> {
        use usvg::fontdb::{Database, Family, Query};

        let mut db = Database::new();
        db.load_system_fonts();
        let families = [Family::SansSerif, Family::Serif, Family::Monospace];
        let query = Query {
            families: &families,
            ..Query::default()
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))?;
        let family = db
            .face(id)?
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        Some(Self {
            bytes: Arc::new(bytes),
            index,
            family,
            source: FontSource::System,
        })
    }

    /// Primary family name reported by the font.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Where the font came from.
    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Hex SHA-256 of the font bytes.
    pub fn sha256_hex(&self) -> String {
        let digest = sha2::Sha256::digest(self.bytes.as_slice());
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{b:02x}"));
        }
        out
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Parley contexts bound to one registered font family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
}

impl TextLayoutEngine {
    pub(crate) fn new(font_bytes: &[u8]) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ReelError::render("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
        })
    }

    /// Shape and lay out a single line of plain text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> ReelResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::validation(
                "title size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

struct ShapedFont {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

/// Draws a centered single-line title into the top band of a frame.
///
/// Without a font the band is still cleared to the background, and a warning is logged once.
pub struct TitleRenderer {
    shaped: Option<ShapedFont>,
    size_px: f32,
    color: [u8; 4],
    ctx: Option<vello_cpu::RenderContext>,
    warned_missing_font: bool,
}

impl TitleRenderer {
    /// Create a renderer for `font` at `size_px`, painting glyphs in straight-alpha `color`.
    pub fn new(font: Option<&TitleFont>, size_px: f32, color: [u8; 4]) -> ReelResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::validation(
                "title size_px must be finite and > 0",
            ));
        }
        let shaped = match font {
            Some(f) => Some(ShapedFont {
                engine: TextLayoutEngine::new(&f.bytes)?,
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(f.bytes.as_ref().clone()),
                    f.index,
                ),
            }),
            None => None,
        };
        Ok(Self {
            shaped,
            size_px,
            color,
            ctx: None,
            warned_missing_font: false,
        })
    }

    /// Whether titles are actually rasterized.
    pub fn has_font(&self) -> bool {
        self.shaped.is_some()
    }

    /// Clear `band` (anchored at the top-left of `dst`) to `bg` and draw `text` centered in it.
    pub fn draw(
        &mut self,
        text: &str,
        band: Rect,
        bg: [u8; 4],
        dst: &mut FrameRGBA,
    ) -> ReelResult<()> {
        let w = (band.width().max(0.0) as u32).min(dst.width);
        let h = (band.height().max(0.0) as u32).min(dst.height);
        if w == 0 || h == 0 {
            return Ok(());
        }

        let Some(shaped) = self.shaped.as_mut() else {
            if !self.warned_missing_font {
                tracing::warn!("no font available; frame titles will not be drawn");
                self.warned_missing_font = true;
            }
            for y in 0..h {
                for px in dst.row_mut(y)[..(w as usize) * 4].chunks_exact_mut(4) {
                    px.copy_from_slice(&bg);
                }
            }
            return Ok(());
        };

        let [r, g, b, a] = self.color;
        let layout = shaped
            .engine
            .layout_line(text, self.size_px, TextBrushRgba8 { r, g, b, a })?;

        let w16: u16 = w
            .try_into()
            .map_err(|_| ReelError::render("title band width exceeds u16"))?;
        let h16: u16 = h
            .try_into()
            .map_err(|_| ReelError::render("title band height exceeds u16"))?;
        let x = ((f64::from(w) - f64::from(layout.width())) / 2.0).max(0.0);
        let y = ((f64::from(h) - f64::from(layout.height())) / 2.0).max(0.0);

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w16 && ctx.height() == h16 => ctx,
            _ => vello_cpu::RenderContext::new(w16, h16),
        };
        ctx.reset();

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            bg[0], bg[1], bg[2], bg[3],
        ));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((x.round(), y.round())));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&shaped.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        let src = pixmap.data_as_u8_slice();
        let stride = (w as usize) * 4;
        for row in 0..h {
            let s = (row as usize) * stride;
            dst.row_mut(row)[..stride].copy_from_slice(&src[s..s + stride]);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
