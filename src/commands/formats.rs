use std::fmt::Write as _;
use crate::utils::SupportedFormats;

pub fn render_formats(formats: &SupportedFormats) -> String {
    let mut out = String::from("Supported input formats:\n");
    for format in &formats.input {
        let _ = writeln!(out, "  • {format}");
    }
    out.push_str("Supported output formats:\n");
    for format in &formats.output {
        let _ = writeln!(out, "  • {format}");
    }
    out
}
