pub mod blocks;
pub mod context;
pub mod extract;
pub mod normalize;
pub mod platform;
pub mod sections;
pub mod table;

use std::path::Path;

use crate::report::{RawReport, ReportError};
use context::{ParsedReport, SizingContext};

/// Parser over one loaded report. Parsing is a pure function of the text:
/// nothing is cached, and every call rebuilds its output from scratch.
#[derive(Debug, Clone)]
pub struct SizingReportParser {
    report: RawReport,
}

impl SizingReportParser {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        RawReport::from_file(path).map(Self::from_report)
    }

    pub fn from_text(content: impl Into<String>) -> Self {
        Self::from_report(RawReport::from_text(content))
    }

    pub fn from_report(report: RawReport) -> Self {
        Self { report }
    }

    /// Three-pass pipeline: markdown → blocks → sections → extracted data.
    pub fn parse(&self) -> ParsedReport {
        let text = &self.report.content;
        let blocks = blocks::classify_lines(text);
        let sections = sections::scan_sections(&blocks);
        let mut parsed = extract::extract_all(text, &blocks, &sections);
        parsed.source_path.clone_from(&self.report.source_path);
        parsed
    }

    pub fn to_sizing_context(&self) -> SizingContext {
        SizingContext::from(self.parse())
    }
}

/// Load and parse a report file straight into its sizing context.
pub fn parse_sizing_file(path: impl AsRef<Path>) -> Result<SizingContext, ReportError> {
    Ok(SizingReportParser::from_file(path)?.to_sizing_context())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_deterministic() {
        let md = std::fs::read_to_string("tests/fixtures/aks_eck.md").unwrap();
        let parser = SizingReportParser::from_text(md);
        assert_eq!(parser.parse(), parser.parse());
        assert_eq!(parser.to_sizing_context(), parser.to_sizing_context());
    }

    #[test]
    fn from_file_keeps_source_path() {
        let parser = SizingReportParser::from_file("tests/fixtures/minimal.md").unwrap();
        let parsed = parser.parse();
        assert_eq!(
            parsed.source_path.as_deref(),
            Some(Path::new("tests/fixtures/minimal.md"))
        );
    }

    #[test]
    fn garbage_input_never_panics() {
        for md in ["", "|", "| a |\n|", "##\n## \n###", "**:** x", "| **Total** |\n|---|\n| ** |"] {
            let ctx = SizingReportParser::from_text(md).to_sizing_context();
            assert_eq!(ctx.source, "sizing_report");
        }
    }
}
