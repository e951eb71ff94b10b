//! Default certificate template.

use crate::binding::{BoundKey, CertificateData};
use crate::element::{Element, Geometry, PAGE_HEIGHT, PAGE_WIDTH, Style};

/// Horizontal page margin used by the starter layout.
const MARGIN: f64 = 40.0;
/// Used in the boilerplate when the record names no certification body.
const FALLBACK_CERTIFICATION_BODY: &str = "the certification body";

const HEADER_IMAGE: &str = "/images/certificate-header.png";
const FOOTER_IMAGE: &str = "/images/certificate-footer.png";

fn bound(key: BoundKey, data: &CertificateData, geometry: Geometry) -> Element {
    Element::text(key.element_id(), key.derive(data), geometry)
}

fn full_width(y: f64, height: f64) -> Geometry {
    Geometry::new(MARGIN, y, PAGE_WIDTH - 2.0 * MARGIN, height)
}

fn meta_line(y: f64) -> Geometry {
    Geometry::new(MARGIN, y, 300.0, 16.0)
}

/// Build the starter element set, with bound content derived from `data`.
pub fn default_elements(data: &CertificateData) -> Vec<Element> {
    let body = data
        .certification_body
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or(FALLBACK_CERTIFICATION_BODY);

    vec![
        Element::image("header-image", HEADER_IMAGE, Geometry::new(0.0, 0.0, PAGE_WIDTH, 110.0))
            .with_style(Style::OBJECT_FIT, "cover"),
        Element::text("title", "CERTIFICATE OF REGISTRATION", full_width(130.0, 36.0))
            .with_style(Style::FONT_SIZE, "26px")
            .with_style(Style::FONT_WEIGHT, "bold")
            .with_style(Style::TEXT_ALIGN, "center"),
        Element::text("certify-statement", "This is to certify that", full_width(180.0, 20.0))
            .with_style(Style::FONT_SIZE, "14px")
            .with_style(Style::TEXT_ALIGN, "center"),
        bound(BoundKey::ClientName, data, full_width(205.0, 32.0))
            .with_style(Style::FONT_SIZE, "22px")
            .with_style(Style::FONT_WEIGHT, "bold")
            .with_style(Style::TEXT_ALIGN, "center"),
        Element::text(
            "issuing-body",
            format!(
                "has been assessed by {body} and found to operate a management system\n\
                 that complies with the requirements of"
            ),
            full_width(250.0, 40.0),
        )
        .with_style(Style::TEXT_ALIGN, "center")
        .with_style(Style::LINE_HEIGHT, "1.4"),
        bound(BoundKey::Standard, data, full_width(300.0, 24.0))
            .with_style(Style::FONT_SIZE, "16px")
            .with_style(Style::FONT_WEIGHT, "bold")
            .with_style(Style::TEXT_ALIGN, "center"),
        Element::text("scope-heading", "Scope of registration:", full_width(340.0, 18.0))
            .with_style(Style::FONT_WEIGHT, "bold")
            .with_style(Style::TEXT_ALIGN, "center"),
        bound(BoundKey::ScopePrimary, data, full_width(362.0, 60.0))
            .with_style(Style::TEXT_ALIGN, "center")
            .with_style(Style::LINE_HEIGHT, "1.4"),
        bound(BoundKey::ScopeSecondary, data, full_width(430.0, 60.0))
            .with_style(Style::TEXT_ALIGN, "center")
            .with_style(Style::LINE_HEIGHT, "1.4"),
        bound(BoundKey::CertificateNumber, data, meta_line(520.0))
            .with_style(Style::FONT_SIZE, "11px"),
        bound(BoundKey::OriginalRegistrationDate, data, meta_line(540.0))
            .with_style(Style::FONT_SIZE, "11px"),
        bound(BoundKey::IssueDate, data, meta_line(560.0)).with_style(Style::FONT_SIZE, "11px"),
        bound(BoundKey::ExpiryDate, data, meta_line(580.0)).with_style(Style::FONT_SIZE, "11px"),
        Element::image(
            "footer-image",
            FOOTER_IMAGE,
            Geometry::new(0.0, PAGE_HEIGHT - 80.0, PAGE_WIDTH, 80.0),
        )
        .with_style(Style::OBJECT_FIT, "cover"),
    ]
}
