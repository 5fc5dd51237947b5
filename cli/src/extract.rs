use crate::commands::{ExtractCmd, OutputFormat};
use plotline::algorithms::{total_length, Diagnostic};
use plotline::geom::Size;
use plotline::outline::{
    DeviceMetric, Event, ExtractionError, Outline, OutlineDevice, OutlineOptions,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use thiserror::Error;

/// Used when neither the document nor the command line specify a page size.
const A4: Size = Size::new(210.0, 297.0);

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid density {0}, expected a positive number of pixels per millimeter")]
    InvalidDensity(f64),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// The input document: drawing events in backend pixels.
#[derive(Clone, Debug, Deserialize)]
pub struct Document {
    /// Page size in millimeters.
    #[serde(default)]
    pub page_size: Option<Size>,
    pub events: Vec<Event>,
}

#[derive(Serialize)]
struct Output<'l> {
    page_size: Size,
    outlines: &'l [Outline],
    diagnostics: &'l [Diagnostic],
}

pub fn extract(mut cmd: ExtractCmd) -> Result<(), ExtractError> {
    if !(cmd.pixels_per_mm > 0.0 && cmd.pixels_per_mm.is_finite()) {
        return Err(ExtractError::InvalidDensity(cmd.pixels_per_mm));
    }

    let document: Document = serde_json::from_str(&cmd.input)?;

    let mut options = OutlineOptions::pixels_per_mm(cmd.pixels_per_mm);
    if let Some(page_size) = cmd.page_size {
        options = options.with_page_size(page_size);
    }
    let page_size = options.resolve_page_size(|| document.page_size.unwrap_or(A4));

    let mut device = OutlineDevice::new(page_size, &options);
    log::info!(
        "page {}x{} mm, {} dpi",
        page_size.width,
        page_size.height,
        device.metric(DeviceMetric::DpiX)
    );

    device.replay(&document.events)?;

    let outlines = device.outlines();
    let diagnostics = device.diagnostics();

    if cmd.count {
        let length = total_length(outlines.iter().map(|outline| &outline.points));
        writeln!(&mut *cmd.output, "outlines: {}", outlines.len())?;
        writeln!(&mut *cmd.output, "length: {} mm", length)?;
        writeln!(&mut *cmd.output, "diagnostics: {}", diagnostics.len())?;

        return Ok(());
    }

    match cmd.format {
        OutputFormat::Json => {
            let output = Output {
                page_size,
                outlines: &outlines,
                diagnostics,
            };
            serde_json::to_writer_pretty(&mut *cmd.output, &output)?;
            writeln!(&mut *cmd.output)?;
        }
        OutputFormat::Path => write_paths(&outlines, &mut *cmd.output)?,
    }

    Ok(())
}

/// Writes one `M x y L x y ...` line per outline.
fn write_paths(outlines: &[Outline], output: &mut dyn io::Write) -> io::Result<()> {
    for outline in outlines {
        for (i, p) in outline.points.iter().enumerate() {
            let command = if i == 0 { "M" } else { " L" };
            write!(output, "{} {} {}", command, p.x, p.y)?;
        }
        writeln!(output)?;
    }

    Ok(())
}
