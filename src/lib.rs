//! Parser for Markdown capacity-planning reports ("elastic-sizing-format").
//!
//! The parser turns a loosely formatted report into a [`SizingContext`],
//! the normalized record that downstream manifest generators consume.
//! Content anomalies never fail a parse; the only error is being unable
//! to read the report.

pub mod parser;
pub mod report;

pub use parser::context::{
    AksSizing, Diagnostics, NodePool, NumericFailure, OpenShiftSizing, ParsedReport, Platform,
    SizingContext, SnapshotStorage, TierCalculation, TierNodes, WorkerConfig, WorkerPool,
};
pub use parser::{parse_sizing_file, SizingReportParser};
pub use report::{RawReport, ReportError};
