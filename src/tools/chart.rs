//! Pie chart renderer for financial breakdowns
//!
//! Renders a circular proportion chart with percentage labels to a PNG
//! artifact named after the chart title (spaces replaced by underscores).

use crate::error::AdvisorError;
use crate::reports::{ChartOutput, NO_DATA_SENTINEL};
use crate::tools::{Tool, ToolInput, ToolOutput};
use crate::Result;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// Slice palette, cycled when there are more categories than colors
const PALETTE: &[RGBColor] = &[
    RGBColor(255, 107, 107),
    RGBColor(78, 205, 196),
    RGBColor(69, 183, 209),
    RGBColor(150, 206, 180),
    RGBColor(254, 202, 87),
    RGBColor(255, 159, 243),
];

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 600;

/// Renders pie charts into a target directory
pub struct ChartRenderer {
    output_dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn artifact_path(&self, chart_title: &str) -> PathBuf {
        let file_name = format!("{}.png", chart_title.replace(' ', "_"));
        if self.output_dir.as_os_str().is_empty() {
            PathBuf::from(file_name)
        } else {
            self.output_dir.join(file_name)
        }
    }

    /// Create a pie chart from the given category -> value mapping.
    ///
    /// An empty mapping yields the no-data sentinel and writes no artifact.
    pub fn render(
        &self,
        data: &BTreeMap<String, f64>,
        chart_title: &str,
    ) -> Result<ChartOutput> {
        if data.is_empty() {
            return Ok(ChartOutput {
                chart_title: chart_title.to_string(),
                chart_path: NO_DATA_SENTINEL.to_string(),
            });
        }

        for (label, value) in data {
            if *value < 0.0 {
                return Err(AdvisorError::InvalidInput(format!(
                    "pie chart value for '{}' must be non-negative, got {}",
                    label, value
                )));
            }
        }
        if data.values().sum::<f64>() <= 0.0 {
            return Err(AdvisorError::InvalidInput(
                "pie chart requires at least one positive value".to_string(),
            ));
        }

        let path = self.artifact_path(chart_title);
        let labels: Vec<String> = data.keys().cloned().collect();
        let sizes: Vec<f64> = data.values().cloned().collect();
        let colors: Vec<RGBColor> = (0..sizes.len())
            .map(|i| PALETTE[i % PALETTE.len()])
            .collect();

        let draw_err =
            |e: &dyn std::fmt::Display| AdvisorError::ToolError(format!("chart rendering failed: {}", e));

        {
            let root = BitMapBackend::new(&path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
            root.fill(&WHITE).map_err(|e| draw_err(&e))?;

            let root = root
                .titled(chart_title, ("sans-serif", 28))
                .map_err(|e| draw_err(&e))?;

            let (width, height) = root.dim_in_pixel();
            let center = (width as i32 / 2, height as i32 / 2);
            let radius = f64::from(width.min(height)) * 0.35;

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(90.0);
            pie.label_style(("sans-serif", 18));
            pie.percentages(("sans-serif", 15));

            root.draw(&pie).map_err(|e| draw_err(&e))?;
            root.present().map_err(|e| draw_err(&e))?;
        }

        info!(path = %path.display(), "Chart artifact written");

        Ok(ChartOutput {
            chart_title: chart_title.to_string(),
            chart_path: path.display().to_string(),
        })
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(PathBuf::new())
    }
}

pub struct CreateChartTool {
    renderer: ChartRenderer,
}

impl CreateChartTool {
    pub fn new(renderer: ChartRenderer) -> Self {
        Self { renderer }
    }
}

impl Default for CreateChartTool {
    fn default() -> Self {
        Self::new(ChartRenderer::default())
    }
}

#[async_trait::async_trait]
impl Tool for CreateChartTool {
    fn name(&self) -> &'static str {
        "create_chart"
    }

    fn description(&self) -> &'static str {
        "Generate a pie chart image from a mapping of category name to value"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let data: BTreeMap<String, f64> = input
            .parameters
            .get("data")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                AdvisorError::InvalidToolInput(format!(
                    "Expected 'data' map of category -> value: {}",
                    e
                ))
            })?
            .unwrap_or_default();

        let chart_title = input
            .parameters
            .get("chart_title")
            .and_then(|v| v.as_str())
            .unwrap_or("Chart");

        let output = self.renderer.render(&data, chart_title)?;

        Ok(ToolOutput {
            success: true,
            data: serde_json::to_value(&output)?,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("Needs".to_string(), 3000.0),
            ("Wants".to_string(), 1800.0),
            ("Savings".to_string(), 1200.0),
        ])
    }

    #[test]
    fn test_empty_data_returns_sentinel_without_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());

        let output = renderer.render(&BTreeMap::new(), "Monthly Budget Breakdown").unwrap();
        assert_eq!(output.chart_path, NO_DATA_SENTINEL);
        assert_eq!(output.chart_title, "Monthly Budget Breakdown");

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_artifact_written_at_derived_path() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());

        let output = renderer.render(&sample_data(), "Monthly Budget Breakdown").unwrap();
        assert_eq!(output.chart_title, "Monthly Budget Breakdown");
        assert!(output.chart_path.ends_with("Monthly_Budget_Breakdown.png"));
        assert!(std::path::Path::new(&output.chart_path).exists());
    }

    #[test]
    fn test_negative_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());

        let data = BTreeMap::from([("Refund".to_string(), -50.0)]);
        assert!(matches!(
            renderer.render(&data, "Bad Chart"),
            Err(AdvisorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_title_without_spaces_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());

        let output = renderer.render(&sample_data(), "Spend").unwrap();
        assert!(output.chart_path.ends_with("Spend.png"));
    }

    #[tokio::test]
    async fn test_tool_defaults_title_and_handles_missing_data() {
        let dir = tempfile::tempdir().unwrap();
        let tool = CreateChartTool::new(ChartRenderer::new(dir.path()));

        let input = ToolInput {
            tool_name: "create_chart".to_string(),
            parameters: serde_json::json!({}),
        };
        let output = tool.execute(&input).await.unwrap();
        assert_eq!(output.data["chart_title"], "Chart");
        assert_eq!(output.data["chart_path"], NO_DATA_SENTINEL);
    }
}
