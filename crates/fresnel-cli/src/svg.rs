//! SVG preview of a composed page.
//!
//! The page description uses millimetres with the origin at the bottom-left
//! corner; SVG puts the origin at the top-left, so every y coordinate is
//! flipped against the page height. The `viewBox` stays in millimetres.

use std::path::Path;

use anyhow::{Context, Result};
use fresnel_core::types::PageDescription;
use fresnel_geometry::primitives::{Ink, Primitive};

fn colour(ink: Ink) -> &'static str {
    match ink {
        Ink::Black => "#000000",
        Ink::White => "#ffffff",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a page as a standalone SVG document.
pub fn to_svg(page: &PageDescription) -> String {
    let (w, h) = (page.width, page.height);
    let flip = |y: f64| h - y;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg viewBox="0 0 {w} {h}" width="{w}mm" height="{h}mm" xmlns="http://www.w3.org/2000/svg">"#
    ));
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        colour(Ink::White)
    ));

    for primitive in &page.primitives {
        match primitive {
            Primitive::StrokeCircle(c) => svg.push_str(&format!(
                r#"<circle cx="{:.4}" cy="{:.4}" r="{:.5}" fill="none" stroke="{}" stroke-width="{:.5}"/>"#,
                c.centre[0],
                flip(c.centre[1]),
                c.radius,
                colour(c.ink),
                c.stroke_width
            )),
            Primitive::FillCircle(c) => svg.push_str(&format!(
                r#"<circle cx="{:.4}" cy="{:.4}" r="{:.5}" fill="{}"/>"#,
                c.centre[0],
                flip(c.centre[1]),
                c.radius,
                colour(c.ink)
            )),
            Primitive::StrokeRect(r) => svg.push_str(&format!(
                r#"<rect x="{:.4}" y="{:.4}" width="{:.4}" height="{:.4}" fill="none" stroke="{}" stroke-width="{:.5}"/>"#,
                r.origin[0],
                flip(r.origin[1] + r.size[1]),
                r.size[0],
                r.size[1],
                colour(r.ink),
                r.stroke_width
            )),
            Primitive::FillRect(r) => svg.push_str(&format!(
                r#"<rect x="{:.4}" y="{:.4}" width="{:.4}" height="{:.4}" fill="{}"/>"#,
                r.origin[0],
                flip(r.origin[1] + r.size[1]),
                r.size[0],
                r.size[1],
                colour(r.ink)
            )),
            Primitive::Text(t) => svg.push_str(&format!(
                r#"<text x="{:.4}" y="{:.4}" font-size="{}" font-family="{}" fill="{}">{}</text>"#,
                t.origin[0],
                flip(t.origin[1]),
                t.size,
                escape(&t.font),
                colour(t.ink),
                escape(&t.content)
            )),
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the SVG preview, creating parent directories as needed.
pub fn write_svg(page: &PageDescription, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_svg(page))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("SVG preview written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresnel_geometry::primitives::{FillRect, StrokeCircle, TextRun};

    fn page(primitives: Vec<Primitive>) -> PageDescription {
        PageDescription {
            width: 216.0,
            height: 279.0,
            primitives,
        }
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let svg = to_svg(&page(vec![Primitive::StrokeCircle(StrokeCircle {
            centre: [108.0, 29.0],
            radius: 10.0,
            stroke_width: 0.1,
            ink: Ink::Black,
        })]));
        assert!(svg.starts_with("<svg viewBox=\"0 0 216 279\""));
        assert!(svg.contains(r#"cx="108.0000" cy="250.0000""#), "{svg}");
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_rect_uses_top_edge() {
        let svg = to_svg(&page(vec![Primitive::FillRect(FillRect {
            origin: [0.0, 0.0],
            size: [216.0, 279.0],
            ink: Ink::Black,
        })]));
        assert!(svg.contains(r##"<rect x="0.0000" y="0.0000" width="216.0000" height="279.0000" fill="#000000"/>"##));
    }

    #[test]
    fn test_text_is_escaped() {
        let svg = to_svg(&page(vec![Primitive::Text(TextRun {
            origin: [10.0, 10.0],
            content: "Unknown type '<X>' - showing GRID".into(),
            font: "Helvetica".into(),
            size: 5.0,
            ink: Ink::White,
        })]));
        assert!(svg.contains("Unknown type '&lt;X&gt;' - showing GRID"));
        assert!(svg.contains(r##"fill="#ffffff">"##));
    }
}
