use std::time::Instant;

use serde::{Deserialize, Serialize};
use shared_types::Society;

use crate::certificate::render_certificate;
use crate::document::{GeneratedDocument, RenderOptions};
use crate::error::RenderError;
use crate::report::render_report;
use crate::watermark::WatermarkImage;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum RenderCommand {
    Report {
        society: Society,
    },
    Certificate {
        society: Society,
        certificate: String,
    },
}

impl RenderCommand {
    pub fn society(&self) -> &Society {
        match self {
            RenderCommand::Report { society } => society,
            RenderCommand::Certificate { society, .. } => society,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub document: GeneratedDocument,
    pub metrics: RenderMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderMetrics {
    pub page_count: usize,
    pub output_size_bytes: usize,
    pub processing_time_ms: u64,
}

/// Run one command with a shared watermark and options
pub fn execute(
    command: &RenderCommand,
    watermark: Option<&WatermarkImage>,
    options: &RenderOptions,
) -> Result<RenderOutcome, RenderError> {
    let started = Instant::now();
    let document = match command {
        RenderCommand::Report { society } => render_report(society, watermark, options)?,
        RenderCommand::Certificate {
            society,
            certificate,
        } => render_certificate(society, certificate, watermark, options)?,
    };
    let metrics = RenderMetrics {
        page_count: document.page_count,
        output_size_bytes: document.bytes.len(),
        processing_time_ms: started.elapsed().as_millis() as u64,
    };
    Ok(RenderOutcome { document, metrics })
}
