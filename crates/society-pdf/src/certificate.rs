//! Single-page landscape compliance certificate

use shared_types::{find_certificate, Society};
use tracing::instrument;

use crate::document::{certificate_file_name, display_date, GeneratedDocument, RenderOptions};
use crate::error::RenderError;
use crate::layout::text::{Font, TextStyle};
use crate::layout::{Canvas, PageGeometry, Rect, WatermarkStamp};
use crate::palette::{ACCENT, BODY_TEXT, BRAND, NEUTRAL_GRAY};
use crate::report::checked_level;
use crate::watermark::WatermarkImage;
use crate::writer::{write_pdf, DocumentInfo};

const GEOMETRY: PageGeometry = PageGeometry::A4_LANDSCAPE;

const WATERMARK_SIZE: f64 = 70.0;
const WATERMARK_OPACITY: f32 = 0.06;

const SIGNATURE_Y: f64 = 175.0;
const SIGNATURE_INSET: f64 = 50.0;
const SIGNATURE_WIDTH: f64 = 80.0;

/// Render a certificate for `certificate_name`, issued to `society`
#[instrument(skip_all, fields(society = %society.name, certificate = %certificate_name))]
pub fn render_certificate(
    society: &Society,
    certificate_name: &str,
    watermark: Option<&WatermarkImage>,
    options: &RenderOptions,
) -> Result<GeneratedDocument, RenderError> {
    let level = checked_level(society)?;
    if find_certificate(certificate_name).is_none() {
        tracing::warn!("Certificate name is not in the catalog");
    }

    let width = GEOMETRY.width;
    let height = GEOMETRY.height;
    let center = width / 2.0;

    let stamp = watermark.map(|image| WatermarkStamp {
        image,
        frame: Rect::centered_on(center, height / 2.0, WATERMARK_SIZE, WATERMARK_SIZE),
        opacity: WATERMARK_OPACITY,
    });
    let mut canvas = Canvas::new(GEOMETRY, stamp);
    let branding = &options.branding;
    let page = canvas.page(0);

    // double rule
    page.stroke_rect(Rect::new(10.0, 10.0, width - 20.0, height - 20.0), BRAND, 3.0);
    page.stroke_rect(Rect::new(14.0, 14.0, width - 28.0, height - 28.0), BRAND, 1.0);

    page.text(
        center,
        45.0,
        &branding.certificate_title,
        &TextStyle::new(Font::HelveticaBold, 28.0, BRAND).centered(),
    );
    page.line((center - 60.0, 52.0), (center + 60.0, 52.0), ACCENT, 2.0);

    let body = TextStyle::new(Font::Helvetica, 12.0, BODY_TEXT).centered();
    page.text(center, 70.0, "This is to certify that", &body);
    page.text(
        center,
        85.0,
        &society.name,
        &TextStyle::new(Font::HelveticaBold, 20.0, BRAND).centered(),
    );

    let detail = TextStyle::new(Font::Helvetica, 11.0, BODY_TEXT).centered();
    page.text(
        center,
        95.0,
        &format!("{}, {}", society.address, society.city),
        &detail,
    );
    page.text(
        center,
        110.0,
        "has been assessed and found compliant with",
        &detail,
    );
    page.text(
        center,
        125.0,
        certificate_name,
        &TextStyle::new(Font::HelveticaBold, 16.0, ACCENT).centered(),
    );

    let small = TextStyle::new(Font::Helvetica, 10.0, BODY_TEXT).centered();
    page.text(
        center,
        145.0,
        &format!("Certificate Date: {}", display_date(options.generated_on)),
        &small,
    );
    page.text(
        center,
        153.0,
        &format!(
            "Rating Level: {} \u{2013} {}",
            society.overall_level, level.name
        ),
        &small,
    );

    let label = TextStyle::new(Font::Helvetica, 9.0, BODY_TEXT).centered();
    let left = SIGNATURE_INSET;
    let right = width - SIGNATURE_INSET - SIGNATURE_WIDTH;
    for (x, caption) in [(left, &branding.signatory), (right, &branding.inspector)] {
        page.line(
            (x, SIGNATURE_Y),
            (x + SIGNATURE_WIDTH, SIGNATURE_Y),
            NEUTRAL_GRAY,
            0.2,
        );
        page.text(x + SIGNATURE_WIDTH / 2.0, SIGNATURE_Y + 7.0, caption, &label);
    }

    let page_count = canvas.page_count();
    let title = format!("{certificate_name} - {}", society.name);
    let bytes = write_pdf(
        canvas,
        DocumentInfo {
            title: &title,
            subject: &branding.certificate_title,
            creator: &branding.report_subtitle,
        },
    )?;

    let document = GeneratedDocument {
        file_name: certificate_file_name(certificate_name, &society.name),
        bytes,
        page_count,
    };
    tracing::info!(file = %document.file_name, bytes = document.bytes.len(), "Generated certificate");
    Ok(document)
}
