//! Chart tools: each tool computes a result from bars and may render it.

pub mod chart;
pub mod range_tool;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::RangeConfig;
use crate::domain::Bar;

pub use chart::ChartElement;
pub use range_tool::{RangeReport, RangeTool};

pub trait Tool {
    type Output;

    fn historical(&self, bars: &[Bar]) -> Result<Self::Output>;

    /// Chart elements for a previously computed result. Tools without a visual return nothing.
    fn render(&self, _bars: &[Bar], _output: &Self::Output) -> Vec<ChartElement> {
        Vec::new()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ToolName {
    Range,
}

/// A configured tool, dispatched by variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool")]
pub enum ChartTool {
    Range(RangeTool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool")]
pub enum ToolResult {
    Range(RangeReport),
}

impl ChartTool {
    pub fn new(name: ToolName, config: RangeConfig) -> Self {
        match name {
            ToolName::Range => ChartTool::Range(RangeTool::new(config)),
        }
    }

    pub fn name(&self) -> ToolName {
        match self {
            ChartTool::Range(_) => ToolName::Range,
        }
    }

    pub fn historical(&self, bars: &[Bar]) -> Result<ToolResult> {
        match self {
            ChartTool::Range(tool) => tool.historical(bars).map(ToolResult::Range),
        }
    }

    pub fn render(&self, bars: &[Bar], result: &ToolResult) -> Vec<ChartElement> {
        match (self, result) {
            (ChartTool::Range(tool), ToolResult::Range(report)) => tool.render(bars, report),
        }
    }
}
