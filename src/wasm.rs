//! WASM bindings for mcgtable
//!
//! This module provides JavaScript-accessible functions for grid table
//! conversion.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::{ContentFormat, GridTableError, GridTableOptions, GridTableResult, Report, Target};

/// Grid table conversion options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct GridTableConvertOptions {
    /// `html`, `docbook`, anything else echoes the table
    #[serde(default = "default_target")]
    pub target: String,
    /// Render cell text as Markdown
    #[serde(default = "default_true")]
    pub markdown: bool,
    /// Use `<th>` for header cells
    #[serde(default = "default_true")]
    pub header_cells: bool,
}

#[cfg(feature = "wasm")]
impl Default for GridTableConvertOptions {
    fn default() -> Self {
        Self {
            target: default_target(),
            markdown: true,
            header_cells: true,
        }
    }
}

#[cfg(feature = "wasm")]
impl GridTableConvertOptions {
    fn to_options(&self) -> GridTableOptions {
        GridTableOptions {
            target: Target::from_name(&self.target),
            content: if self.markdown {
                ContentFormat::Markdown
            } else {
                ContentFormat::Plain
            },
            header_cells: self.header_cells,
        }
    }
}

/// Missing options mean defaults; malformed ones are an error
#[cfg(feature = "wasm")]
fn parse_options(options: JsValue) -> GridTableResult<GridTableConvertOptions> {
    if options.is_undefined() || options.is_null() {
        return Ok(GridTableConvertOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| GridTableError::invalid(format!("conversion options: {}", e)))
}

#[cfg(feature = "wasm")]
fn default_target() -> String {
    "html".to_string()
}

#[cfg(feature = "wasm")]
fn default_true() -> bool {
    true
}

/// Conversion result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted output, followed by any unconsumed input lines
    pub output: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// First error message if conversion failed
    pub error: Option<String>,
    /// Warnings during conversion
    pub warnings: Vec<String>,
}

#[cfg(feature = "wasm")]
impl ConvertResult {
    fn from_report(output: String, report: &Report) -> Self {
        use crate::DiagnosticLevel;

        let error = report
            .diagnostics
            .iter()
            .find(|d| d.level == DiagnosticLevel::Error)
            .map(|d| d.to_string());
        let warnings = report
            .diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .map(|d| d.to_string())
            .collect();
        ConvertResult {
            output,
            success: error.is_none(),
            error,
            warnings,
        }
    }

    fn from_error(err: GridTableError) -> Self {
        ConvertResult {
            output: String::new(),
            success: false,
            error: Some(err.to_string()),
            warnings: Vec::new(),
        }
    }
}

/// Summary of grid table check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert a grid table with options
///
/// # Arguments
/// * `input` - Grid table source, optionally with `Table:` captions
/// * `options` - `{ target, markdown, header_cells }`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "convertGridTable")]
pub fn convert_grid_table_wasm(input: &str, options: JsValue) -> JsValue {
    let result = match parse_options(options) {
        Ok(opts) => {
            let output = crate::convert_grid_table_text(input, &opts.to_options());
            ConvertResult::from_report(output.to_text(), &output.report)
        }
        Err(err) => ConvertResult::from_error(err),
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Render the `mcgtable` fenced blocks of a Markdown document
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "filterMarkdown")]
pub fn filter_markdown_wasm(input: &str, options: JsValue) -> JsValue {
    let result = match parse_options(options) {
        Ok(opts) => {
            let output = crate::filter_markdown(input, &opts.to_options());
            ConvertResult::from_report(output.text, &output.report)
        }
        Err(err) => ConvertResult::from_error(err),
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Check a grid table for problems
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkGridTable")]
pub fn check_grid_table_wasm(input: &str) -> JsValue {
    use crate::DiagnosticLevel;

    let report = crate::check_grid_table(input);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &report.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.to_string()),
            DiagnosticLevel::Warning => warnings.push(d.to_string()),
            DiagnosticLevel::Info => infos.push(d.to_string()),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: report.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    crate::version().to_string()
}
