//! PDF documents for rated societies
//!
//! - [`render_report`]: multi-page assessment report (A4 portrait)
//! - [`render_certificate`]: single-page compliance certificate (A4 landscape)
//!
//! Both draw through the [`layout`] module, which handles millimetre
//! geometry, page overflow and the optional watermark, and are serialized
//! with lopdf using the standard Helvetica fonts.

pub mod certificate;
pub mod command;
pub mod document;
pub mod error;
pub mod layout;
pub mod palette;
pub mod report;
pub mod watermark;
pub mod writer;

pub use certificate::render_certificate;
pub use command::{execute, RenderCommand, RenderMetrics, RenderOutcome};
pub use document::{
    certificate_file_name, report_file_name, Branding, GeneratedDocument, RenderOptions,
};
pub use error::RenderError;
pub use palette::{color_for_level, color_for_status, Rgb};
pub use report::render_report;
pub use watermark::WatermarkImage;
