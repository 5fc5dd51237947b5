use plotline::geom::Size;
use std::io;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Path,
}

pub struct ExtractCmd {
    pub input: String,
    pub output: Box<dyn io::Write>,
    pub pixels_per_mm: f64,
    pub page_size: Option<Size>,
    pub format: OutputFormat,
    pub count: bool,
}
