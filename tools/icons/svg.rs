use std::fmt::Write;

use super::{Layout, LABEL};

fn hex(color: image::Rgba<u8>) -> String {
    let [r, g, b, _] = color.0;
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Vector twin of [`super::render_icon`]: the label is left to the browser's font stack.
pub fn render_svg(size: u32) -> String {
    let layout = Layout::for_size(size);
    let half = size as f32 / 2.0;
    let radius = half - size as f32 / 10.0;

    let mut svg = String::new();
    _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    _ = writeln!(svg, r#"<svg width="{size}" height="{size}" viewBox="0 0 {size} {size}" xmlns="http://www.w3.org/2000/svg">"#);
    _ = writeln!(svg, "  <defs>\n    <style>");
    _ = writeln!(svg, "      .bg {{ fill: {}; }}", hex(super::BACKGROUND));
    _ = writeln!(svg, "      .text {{ fill: white; font-family: Arial, sans-serif; font-weight: bold; text-anchor: middle; dominant-baseline: central; }}");
    _ = writeln!(svg, "      .symbol {{ fill: {}; }}", hex(super::DECORATION));
    _ = writeln!(svg, "    </style>\n  </defs>");
    _ = writeln!(svg, r#"  <circle cx="{half}" cy="{half}" r="{radius}" class="bg"/>"#);
    _ = writeln!(svg, r#"  <text x="{half}" y="{half}" font-size="{}" class="text">{LABEL}</text>"#, size / 5);

    if layout.decoration.is_some() {
        let eighth = size as f32 / 8.0;
        let tenth = size as f32 / 10.0;
        _ = writeln!(
            svg,
            r#"  <circle cx="{}" cy="{}" r="{}" class="symbol"/>"#,
            size as f32 - eighth - tenth,
            eighth + tenth,
            size as f32 / 16.0
        );
    }

    svg.push_str("</svg>\n");
    svg
}
