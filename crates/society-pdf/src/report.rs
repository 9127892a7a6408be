//! Multi-page assessment report for one society

use rating_engine::{derive, level_info};
use shared_types::{CertStatus, RatingLevel, Society};
use tracing::instrument;

use crate::document::{display_date, report_file_name, GeneratedDocument, RenderOptions};
use crate::error::RenderError;
use crate::layout::text::{truncate_to_width, Font, TextStyle};
use crate::layout::{Canvas, Cursor, PageGeometry, Rect, WatermarkStamp};
use crate::palette::{
    color_for_level, color_for_status, BODY_TEXT, BRAND, ROW_TEXT, TRACK, WHITE,
};
use crate::watermark::WatermarkImage;
use crate::writer::{write_pdf, DocumentInfo};

const GEOMETRY: PageGeometry = PageGeometry::A4_PORTRAIT;

const WATERMARK_SIZE: f64 = 80.0;
const WATERMARK_OPACITY: f32 = 0.08;

const HEADER_HEIGHT: f64 = 40.0;
const FOOTER_HEIGHT: f64 = 15.0;

const SCORE_ROW_HEIGHT: f64 = 8.0;
const SCORE_VALUE_X: f64 = 120.0;
const TRACK_X: f64 = 130.0;
const TRACK_WIDTH: f64 = 60.0;
const TRACK_HEIGHT: f64 = 4.0;

const CERT_ROW_HEIGHT: f64 = 6.0;
const CERT_NAME_X: f64 = 19.0;
const CERT_STATUS_X: f64 = 160.0;
const SECTION_HEADING_HEIGHT: f64 = 8.0;

/// Validate a society before drawing and resolve its cached level.
///
/// Score problems surface as `InvalidScores` and a level outside 1-5 as
/// `UnknownLevel`. Cached values that disagree with the scores are drawn
/// as stored, with a warning.
pub(crate) fn checked_level(society: &Society) -> Result<&'static RatingLevel, RenderError> {
    let derived = derive(&society.scores)?;
    let info = level_info(society.overall_level)?;

    if i64::from(derived.level) != society.overall_level {
        tracing::warn!(
            society = %society.name,
            cached = society.overall_level,
            derived = derived.level,
            "Cached overall level disagrees with scores"
        );
    }
    if derived.leed_score != society.leed_score {
        tracing::warn!(
            society = %society.name,
            cached = society.leed_score,
            derived = derived.leed_score,
            "Cached LEED score disagrees with scores"
        );
    }
    Ok(info)
}

/// Render the assessment report.
///
/// Score and certificate rows flow onto extra pages when they reach the
/// bottom margin. The watermark, when given, is drawn on every page.
#[instrument(skip_all, fields(society = %society.name))]
pub fn render_report(
    society: &Society,
    watermark: Option<&WatermarkImage>,
    options: &RenderOptions,
) -> Result<GeneratedDocument, RenderError> {
    let level = checked_level(society)?;

    let stamp = watermark.map(|image| WatermarkStamp {
        image,
        frame: Rect::centered_on(
            GEOMETRY.width / 2.0,
            GEOMETRY.height / 2.0,
            WATERMARK_SIZE,
            WATERMARK_SIZE,
        ),
        opacity: WATERMARK_OPACITY,
    });
    let mut canvas = Canvas::new(GEOMETRY, stamp);

    draw_header(&mut canvas, options);
    draw_identity(&mut canvas, society);
    draw_rating_panel(&mut canvas, society, level);
    let cursor = draw_scores(&mut canvas, society);
    draw_compliance(&mut canvas, society, cursor.advance(5.0));
    draw_footers(&mut canvas, &options.branding.footer);

    let page_count = canvas.page_count();
    let title = format!("{} - Assessment Report", society.name);
    let bytes = write_pdf(
        canvas,
        DocumentInfo {
            title: &title,
            subject: &options.branding.report_title,
            creator: &options.branding.report_subtitle,
        },
    )?;

    let document = GeneratedDocument {
        file_name: report_file_name(&society.name),
        bytes,
        page_count,
    };
    tracing::info!(
        file = %document.file_name,
        pages = document.page_count,
        bytes = document.bytes.len(),
        "Generated report"
    );
    Ok(document)
}

fn draw_header(canvas: &mut Canvas<'_>, options: &RenderOptions) {
    let center = GEOMETRY.width / 2.0;
    let branding = &options.branding;
    let page = canvas.page(0);

    page.fill_rect(Rect::new(0.0, 0.0, GEOMETRY.width, HEADER_HEIGHT), BRAND);
    page.text(
        center,
        18.0,
        &branding.report_title,
        &TextStyle::new(Font::HelveticaBold, 22.0, WHITE).centered(),
    );
    page.text(
        center,
        28.0,
        &branding.report_subtitle,
        &TextStyle::new(Font::HelveticaBold, 10.0, WHITE).centered(),
    );
    page.text(
        center,
        35.0,
        &format!("Generated: {}", display_date(options.generated_on)),
        &TextStyle::new(Font::HelveticaBold, 8.0, WHITE).centered(),
    );
}

fn draw_identity(canvas: &mut Canvas<'_>, society: &Society) {
    let x = GEOMETRY.margin;
    let body = TextStyle::new(Font::Helvetica, 10.0, BODY_TEXT);
    let page = canvas.page(0);

    page.text(
        x,
        55.0,
        &society.name,
        &TextStyle::new(Font::HelveticaBold, 16.0, BRAND),
    );
    page.text(
        x,
        63.0,
        &format!("Address: {}, {}", society.address, society.city),
        &body,
    );
    page.text(
        x,
        70.0,
        &format!(
            "Total Units: {} | Year Built: {}",
            society.total_units, society.year_built
        ),
        &body,
    );
    page.text(
        x,
        77.0,
        &format!("Last Assessed: {}", society.last_assessed.format("%Y-%m-%d")),
        &body,
    );
}

fn draw_rating_panel(canvas: &mut Canvas<'_>, society: &Society, level: &RatingLevel) {
    let center = GEOMETRY.width / 2.0;
    let page = canvas.page(0);

    page.fill_rounded_rect(
        Rect::new(GEOMETRY.margin, 83.0, GEOMETRY.content_width(), 22.0),
        3.0,
        color_for_level(society.overall_level),
    );
    page.text(
        center,
        95.0,
        &format!(
            "Overall Rating: Level {} \u{2013} {}",
            society.overall_level, level.name
        ),
        &TextStyle::new(Font::HelveticaBold, 14.0, WHITE).centered(),
    );
    page.text(
        center,
        102.0,
        &format!("LEED Score: {}/100", society.leed_score),
        &TextStyle::new(Font::HelveticaBold, 9.0, WHITE).centered(),
    );
}

/// Draw the ten score rows; returns the cursor below the last row
fn draw_scores(canvas: &mut Canvas<'_>, society: &Society) -> Cursor {
    canvas.page(0).text(
        GEOMETRY.margin,
        120.0,
        "Assessment Scores",
        &TextStyle::new(Font::HelveticaBold, 13.0, BRAND),
    );

    let label_style = TextStyle::new(Font::Helvetica, 9.0, BODY_TEXT);
    let mut cursor = canvas.start().at(128.0);

    for (category, score) in society.scores.iter() {
        cursor = canvas.ensure_room(cursor, SCORE_ROW_HEIGHT);
        let color = color_for_level(i64::from(score));
        let filled = f64::from(score) / 5.0 * TRACK_WIDTH;
        let bar_top = cursor.y - 3.0;
        let page = canvas.page(cursor.page);

        page.text(GEOMETRY.margin, cursor.y, category.label(), &label_style);
        page.text(
            SCORE_VALUE_X,
            cursor.y,
            &format!("{score}/5"),
            &TextStyle::new(Font::HelveticaBold, 9.0, color),
        );
        page.fill_rounded_rect(
            Rect::new(TRACK_X, bar_top, TRACK_WIDTH, TRACK_HEIGHT),
            1.0,
            TRACK,
        );
        page.fill_rounded_rect(Rect::new(TRACK_X, bar_top, filled, TRACK_HEIGHT), 1.0, color);

        cursor = cursor.advance(SCORE_ROW_HEIGHT);
    }
    cursor
}

/// One row per recorded certificate, in recorded order
fn draw_compliance(canvas: &mut Canvas<'_>, society: &Society, cursor: Cursor) {
    let mut cursor = canvas.ensure_room(cursor, SECTION_HEADING_HEIGHT + CERT_ROW_HEIGHT);
    canvas.page(cursor.page).text(
        GEOMETRY.margin,
        cursor.y,
        "Compliance Certificates",
        &TextStyle::new(Font::HelveticaBold, 13.0, BRAND),
    );
    cursor = cursor.advance(SECTION_HEADING_HEIGHT);

    let name_style = TextStyle::new(Font::Helvetica, 8.0, ROW_TEXT);
    if society.compliance.is_empty() {
        canvas.page(cursor.page).text(
            GEOMETRY.margin,
            cursor.y,
            "No compliance certificates recorded yet.",
            &name_style,
        );
        return;
    }

    let name_width = CERT_STATUS_X - CERT_NAME_X - 4.0;
    for cert in &society.compliance {
        cursor = canvas.ensure_room(cursor, CERT_ROW_HEIGHT);
        let status = status_label(&cert.status);
        let page = canvas.page(cursor.page);

        page.circle(
            GEOMETRY.margin + 1.5,
            cursor.y - 1.0,
            1.2,
            ROW_TEXT,
            cert.mandatory,
        );
        page.text(
            CERT_NAME_X,
            cursor.y,
            &truncate_to_width(&cert.name, &name_style, name_width),
            &name_style,
        );
        page.text(
            CERT_STATUS_X,
            cursor.y,
            &status,
            &TextStyle::new(Font::HelveticaBold, 8.0, color_for_status(cert.status.as_str())),
        );

        cursor = cursor.advance(CERT_ROW_HEIGHT);
    }
    tracing::debug!(
        rows = society.compliance.len(),
        pages = canvas.page_count(),
        "Laid out compliance rows"
    );
}

fn status_label(status: &CertStatus) -> String {
    status.as_str().to_uppercase()
}

fn draw_footers(canvas: &mut Canvas<'_>, footer: &str) {
    let style = TextStyle::new(Font::Helvetica, 7.0, WHITE).centered();
    for index in 0..canvas.page_count() {
        let page = canvas.page(index);
        page.fill_rect(
            Rect::new(
                0.0,
                GEOMETRY.height - FOOTER_HEIGHT,
                GEOMETRY.width,
                FOOTER_HEIGHT,
            ),
            BRAND,
        );
        page.text(
            GEOMETRY.width / 2.0,
            GEOMETRY.height - 7.0,
            footer,
            &style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared_types::{AssessmentScores, ComplianceCert, ScoreCategory};

    fn society(certs: usize) -> Society {
        Society {
            id: "s-1".to_string(),
            name: "Green Valley CHS".to_string(),
            address: "12 Link Road".to_string(),
            city: "Pune".to_string(),
            total_units: 120,
            year_built: 2004,
            overall_level: 3,
            scores: AssessmentScores::uniform(3),
            compliance: (0..certs)
                .map(|i| ComplianceCert {
                    id: format!("c-{i}"),
                    name: format!("Certificate {i}"),
                    status: CertStatus::Valid,
                    issued_date: None,
                    expiry_date: None,
                    mandatory: i % 2 == 0,
                    category: "Legal".to_string(),
                })
                .collect(),
            leed_score: 60,
            last_assessed: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        }
    }

    fn options() -> RenderOptions {
        RenderOptions::on(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap())
    }

    #[test]
    fn test_checked_level_resolves_cached_level() {
        let level = checked_level(&society(0)).unwrap();
        assert_eq!(level.name, "Established");
    }

    #[test]
    fn test_checked_level_rejects_unknown_level() {
        let mut corrupt = society(0);
        corrupt.overall_level = 7;
        assert!(matches!(
            checked_level(&corrupt),
            Err(RenderError::UnknownLevel(7))
        ));
    }

    #[test]
    fn test_checked_level_rejects_bad_scores_first() {
        let mut corrupt = society(0);
        corrupt.overall_level = 0;
        corrupt.scores.set(ScoreCategory::FireSafety, 9);
        assert!(matches!(
            checked_level(&corrupt),
            Err(RenderError::InvalidScores(_))
        ));
    }

    #[test]
    fn test_stale_cache_still_renders() {
        let mut stale = society(0);
        stale.overall_level = 5;
        stale.leed_score = 99;
        let document = render_report(&stale, None, &options()).unwrap();
        assert_eq!(document.page_count, 1);
    }

    #[test]
    fn test_short_report_fits_one_page() {
        let document = render_report(&society(5), None, &options()).unwrap();
        assert_eq!(document.page_count, 1);
        assert_eq!(document.file_name, "Green_Valley_CHS_Report.pdf");
        assert!(document.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_many_certificates_overflow() {
        let document = render_report(&society(40), None, &options()).unwrap();
        assert!(document.page_count >= 2);
    }

    #[test]
    fn test_status_label_uppercases() {
        assert_eq!(status_label(&CertStatus::NotApplicable), "NOT_APPLICABLE");
        assert_eq!(status_label(&CertStatus::from("lapsed")), "LAPSED");
    }
}
