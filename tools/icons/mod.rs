//! Placeholder icon synthesis for the web app manifest.
//!
//! Every icon is the same drawing scaled to its size: a green disc inset by a tenth of the
//! side, the "MTG" label centered on it and, from 96px up, a small darker dot near the
//! top-right corner.

mod font;
mod svg;

use {
    std::{fs, path::{Path, PathBuf}},
    image::{ImageFormat, Rgba, RgbaImage},
    imageproc::drawing::draw_filled_ellipse_mut,
    crate::{error::IconError, paths::icon_file_name},
};

pub use font::{FontChain, FontSource, LabelFont};
pub use svg::render_svg;

pub const LABEL: &str = "MTG";
pub const BACKGROUND: Rgba<u8> = Rgba([102, 187, 106, 255]);
pub const TEXT: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const DECORATION: Rgba<u8> = Rgba([76, 175, 80, 255]);

/// Smallest size that gets the corner dot.
pub const DECORATION_THRESHOLD: u32 = 96;
const DECORATION_INSET: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IconFormat {
    #[default]
    Png,
    Svg,
}

impl IconFormat {
    #[inline]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Geometry shared by the raster and vector renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub size: u32,
    pub margin: u32,
    pub font_size: u32,
    /// Top-left corner and side of the decoration's bounding box.
    pub decoration: Option<(u32, u32, u32)>,
}

impl Layout {
    pub fn for_size(size: u32) -> Self {
        let margin = size / 10;
        let font_size = match size {
            s if s >= 128 => s / 6,
            s if s >= 72 => s / 5,
            s => s / 4,
        };
        let decoration = (size >= DECORATION_THRESHOLD).then(|| {
            let side = size / 8;
            let x = size.saturating_sub(side + margin + DECORATION_INSET);
            (x, margin + DECORATION_INSET, side)
        });
        Self { size, margin, font_size, decoration }
    }
}

/// Fills the ellipse inscribed in the inclusive box `[x0, x1] x [y0, y1]`.
fn fill_box(canvas: &mut RgbaImage, (x0, y0): (u32, u32), (x1, y1): (u32, u32), color: Rgba<u8>) {
    let (x0, y0, x1, y1) = (x0 as i32, y0 as i32, x1 as i32, y1 as i32);
    let center = ((x0 + x1) / 2, (y0 + y1) / 2);
    draw_filled_ellipse_mut(canvas, center, (x1 - x0) / 2, (y1 - y0) / 2, color);
}

pub fn render_icon(size: u32, fonts: &FontChain) -> RgbaImage {
    let layout = Layout::for_size(size);
    let mut canvas = RgbaImage::new(size, size);

    let far = size - layout.margin;
    fill_box(&mut canvas, (layout.margin, layout.margin), (far, far), BACKGROUND);

    let (source, font) = fonts.resolve_source(layout.font_size);
    tracing::debug!(size, ?source, "label font");
    let (w, h) = font.measure(LABEL);
    let x = (size as i32 - w as i32) / 2;
    let y = (size as i32 - h as i32) / 2;
    font.draw(&mut canvas, TEXT, x, y, LABEL);

    if let Some((x, y, side)) = layout.decoration {
        fill_box(&mut canvas, (x, y), (x + side, y + side), DECORATION);
    }

    canvas
}

/// Renders and writes one icon per size into `output_dir`, replacing existing files.
///
/// Returns the written paths in the order of `sizes`.
pub fn generate(
    sizes: &[u32],
    output_dir: impl AsRef<Path>,
    format: IconFormat,
    fonts: &FontChain,
) -> Result::<Vec::<PathBuf>, IconError> {
    let output_dir = output_dir.as_ref();
    if let Some(&bad) = sizes.iter().find(|&&s| s == 0) {
        return Err(IconError::InvalidSize(bad))
    }

    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let path = output_dir.join(icon_file_name(size, format.extension()));
        println!("Creating {}...", path.display());

        match format {
            IconFormat::Png => render_icon(size, fonts)
                .save_with_format(&path, ImageFormat::Png)
                .map_err(|source| IconError::Encode { path: path.clone(), source })?,
            IconFormat::Svg => fs::write(&path, render_svg(size))
                .map_err(|source| IconError::Write { path: path.clone(), source })?,
        }

        tracing::debug!(size, path = %path.display(), "icon written");
        println!("✓ Created {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub path: PathBuf,
    /// `None` when the file is missing.
    pub bytes: Option<u64>,
}

impl Verification {
    #[inline]
    pub fn is_present(&self) -> bool {
        self.bytes.is_some()
    }
}

pub fn verify<P: AsRef<Path>>(paths: &[P]) -> Vec::<Verification> {
    paths
        .iter()
        .map(|p| {
            let path = p.as_ref().to_path_buf();
            let bytes = fs::metadata(&path).ok().filter(|m| m.is_file()).map(|m| m.len());
            Verification { path, bytes }
        })
        .collect()
}
