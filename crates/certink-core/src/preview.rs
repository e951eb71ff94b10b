//! Read-only SVG rendering of a certificate page.

use crate::element::{Element, ElementKind, ObjectFit, TextAlign};
use kurbo::Size;
use std::fmt::Write;

/// Render elements onto a page of `page` size as a standalone SVG document.
pub fn render_svg(elements: &[Element], page: Size) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = page.width,
        h = page.height
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="{}" height="{}" fill="white"/>"#,
        page.width, page.height
    );

    for element in elements {
        match element.kind() {
            ElementKind::Text => write_text(&mut svg, element),
            ElementKind::Image => write_image(&mut svg, element),
        }
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_text(svg: &mut String, element: &Element) {
    let g = element.geometry;
    let style = &element.style;
    let font_size = style.font_size_px();
    let line_advance = font_size * style.line_height();

    // Justify has no SVG equivalent for single lines; lay it out like left.
    let (anchor, x) = match style.text_align() {
        TextAlign::Left | TextAlign::Justify => ("start", g.x),
        TextAlign::Center => ("middle", g.x + g.width / 2.0),
        TextAlign::Right => ("end", g.x + g.width),
    };
    let weight = style.font_weight().as_str();

    let _ = writeln!(
        svg,
        r#"  <text id="{}" x="{}" y="{}" font-size="{}" font-weight="{}" text-anchor="{}">"#,
        escape(element.id()),
        x,
        g.y + font_size,
        font_size,
        weight,
        anchor
    );
    for (i, line) in element.content.split('\n').enumerate() {
        let dy = if i == 0 { 0.0 } else { line_advance };
        let _ = writeln!(
            svg,
            r#"    <tspan x="{}" dy="{}">{}</tspan>"#,
            x,
            dy,
            escape(line)
        );
    }
    svg.push_str("  </text>\n");
}

fn write_image(svg: &mut String, element: &Element) {
    let g = element.geometry;
    let aspect = match element.style.object_fit() {
        ObjectFit::Contain => "xMidYMid meet",
        ObjectFit::Cover => "xMidYMid slice",
        ObjectFit::Fill => "none",
    };
    let _ = writeln!(
        svg,
        r#"  <image id="{}" href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="{}"/>"#,
        escape(element.id()),
        escape(&element.content),
        g.x,
        g.y,
        g.width,
        g.height,
        aspect
    );
}

/// Escape text for XML content and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Geometry, Style, page_size};

    #[test]
    fn test_empty_page() {
        let svg = render_svg(&[], page_size());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 595 842""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_multiline_text() {
        let element = Element::text("body", "first\nsecond", Geometry::new(10.0, 20.0, 200.0, 40.0))
            .with_style(Style::FONT_SIZE, "10px")
            .with_style(Style::LINE_HEIGHT, "2");
        let svg = render_svg(&[element], page_size());

        assert!(svg.contains(r#"y="30""#));
        assert!(svg.contains(r#"<tspan x="10" dy="0">first</tspan>"#));
        assert!(svg.contains(r#"<tspan x="10" dy="20">second</tspan>"#));
    }

    #[test]
    fn test_alignment_anchor() {
        let element = Element::text("t", "x", Geometry::new(100.0, 0.0, 200.0, 20.0))
            .with_style(Style::TEXT_ALIGN, "center");
        let svg = render_svg(&[element], page_size());
        assert!(svg.contains(r#"x="200""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_escapes_content() {
        let element = Element::text("t", "Smith & <Sons>", Geometry::default());
        let svg = render_svg(&[element], page_size());
        assert!(svg.contains("Smith &amp; &lt;Sons&gt;"));
    }

    #[test]
    fn test_image_fit() {
        let element = Element::image("logo", "/logo.png", Geometry::new(0.0, 0.0, 50.0, 50.0))
            .with_style(Style::OBJECT_FIT, "fill");
        let svg = render_svg(&[element], page_size());
        assert!(svg.contains(r#"href="/logo.png""#));
        assert!(svg.contains(r#"preserveAspectRatio="none""#));
    }
}
