use {
    std::{fs, path::Path},
    ab_glyph::{Font, FontVec, PxScale},
    font8x8::{UnicodeFonts, BASIC_FONTS},
    image::{Rgba, RgbaImage},
    imageproc::drawing::{draw_text_mut, text_size},
};

/// Where a label font may come from. Sources are tried in order until one resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A font file with exactly this name somewhere in the system font directories.
    File(&'static str),
    /// The 8x8 bitmap font compiled into the binary. Always resolves.
    BuiltIn,
}

pub enum LabelFont {
    Outline { font: FontVec, scale: PxScale },
    Bitmap,
}

const BITMAP_GLYPH: u32 = 8;

impl LabelFont {
    /// Width and height of the rendered text, in pixels.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            Self::Outline { font, scale } => text_size(*scale, font, text),
            Self::Bitmap => (BITMAP_GLYPH * text.chars().count() as u32, BITMAP_GLYPH),
        }
    }

    #[inline]
    pub fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
        match self {
            Self::Outline { font, scale } => draw_text_mut(canvas, color, x, y, *scale, font, text),
            Self::Bitmap => draw_bitmap_text(canvas, color, x, y, text),
        }
    }
}

fn draw_bitmap_text(canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
    let (width, height) = canvas.dimensions();
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = BASIC_FONTS.get(ch) else { continue };
        let origin = x + (i as u32 * BITMAP_GLYPH) as i32;
        for (dy, row) in rows.iter().enumerate() {
            for bit in 0..8 {
                if row & (1 << bit) == 0 {
                    continue
                }
                let (px, py) = (origin + bit, y + dy as i32);
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}

/// Ordered font resolution, stopping at the first source that loads.
pub struct FontChain {
    sources: Vec<FontSource>,
    db: fontdb::Database,
}

impl Default for FontChain {
    fn default() -> Self {
        Self::new(vec![
            FontSource::File("arial.ttf"),
            FontSource::File("Arial.ttf"),
            FontSource::BuiltIn,
        ])
    }
}

impl FontChain {
    pub fn new(sources: Vec::<FontSource>) -> Self {
        let mut db = fontdb::Database::new();
        if sources.iter().any(|s| matches!(s, FontSource::File(..))) {
            db.load_system_fonts();
        }
        Self::with_database(sources, db)
    }

    /// Looks `FontSource::File` names up in `db` instead of the system font directories.
    pub fn with_database(sources: Vec::<FontSource>, db: fontdb::Database) -> Self {
        Self { sources, db }
    }

    /// Chain that skips system lookup entirely. Output is identical on every machine.
    pub fn builtin_only() -> Self {
        Self::with_database(vec![FontSource::BuiltIn], fontdb::Database::new())
    }

    #[inline]
    pub fn sources(&self) -> &[FontSource] {
        &self.sources
    }

    /// Falls back to the bitmap font when the chain runs dry, so this never fails.
    #[inline]
    pub fn resolve(&self, point_size: u32) -> LabelFont {
        self.resolve_source(point_size).1
    }

    /// Like [`Self::resolve`], also naming the source that won.
    pub fn resolve_source(&self, point_size: u32) -> (&FontSource, LabelFont) {
        for source in &self.sources {
            match source {
                FontSource::File(name) => match self.load_file(name) {
                    Some(font) => {
                        let scale = em_scale(&font, point_size as f32);
                        return (source, LabelFont::Outline { font, scale })
                    }
                    None => tracing::debug!("font {name} not available"),
                },
                FontSource::BuiltIn => return (source, LabelFont::Bitmap),
            }
        }
        (&FontSource::BuiltIn, LabelFont::Bitmap)
    }

    fn load_file(&self, name: &str) -> Option::<FontVec> {
        self.db.faces().find_map(|face| {
            let path = match &face.source {
                fontdb::Source::File(path) | fontdb::Source::SharedFile(path, ..) => path,
                fontdb::Source::Binary(..) => return None,
            };
            if path.file_name().and_then(|n| n.to_str()) != Some(name) {
                return None
            }
            load_face(path, face.index)
        })
    }
}

fn load_face(path: &Path, index: u32) -> Option::<FontVec> {
    let data = fs::read(path).ok()?;
    match FontVec::try_from_vec_and_index(data, index) {
        Ok(font) => Some(font),
        Err(e) => {
            tracing::debug!("skipping {}: {e}", path.display());
            None
        }
    }
}

/// Point sizes mean em size; ab_glyph scales by ascent-to-descent height.
fn em_scale(font: &FontVec, point_size: f32) -> PxScale {
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(point_size * font.height_unscaled() / upem),
        _ => PxScale::from(point_size),
    }
}
