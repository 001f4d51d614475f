use crate::report::summary::MetricsRow;
use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const CANVAS_WIDTH: u32 = 640;
const CANVAS_HEIGHT: u32 = 420;
const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 40;
const MARGIN_BOTTOM: u32 = 50;

const METRIC_NAMES: [&str; 3] = ["Recall", "Precision", "F1"];
const METRIC_COLORS: [&str; 3] = ["#004488", "#bb5500", "#007700"];

struct SvgTag {
    name: &'static str,
    attributes: HashMap<&'static str, String>,
}

impl SvgTag {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: HashMap::new(),
        }
    }

    fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.insert(key, value.to_string());
        self
    }

    fn render(&self, self_closing: bool) -> String {
        let attrs: String = self
            .attributes
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_xml(v)))
            .collect::<Vec<_>>()
            .join(" ");

        if self_closing {
            format!("<{} {}/>", self.name, attrs)
        } else {
            format!("<{} {}>", self.name, attrs)
        }
    }

    fn render_with_text(&self, text: &str) -> String {
        format!("{}{}</{}>", self.render(false), escape_xml(text), self.name)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Scores live in [0, 1]; clamp defensively so a malformed summary cannot
/// draw outside the canvas.
fn y_for(score: f64) -> f64 {
    let plot_height = (CANVAS_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) as f64;
    MARGIN_TOP as f64 + (1.0 - score.clamp(0.0, 1.0)) * plot_height
}

/// Render a grouped bar chart of Recall/Precision/F1 per variant type as
/// a standalone SVG document.
pub fn render_svg(rows: &[MetricsRow]) -> String {
    let plot_width = (CANVAS_WIDTH - MARGIN_LEFT - MARGIN_RIGHT) as f64;
    let baseline = y_for(0.0);

    let mut svg = String::new();
    svg.push_str(
        &SvgTag::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", CANVAS_WIDTH)
            .attr("height", CANVAS_HEIGHT)
            .attr("viewBox", format!("0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}"))
            .render(false),
    );
    svg.push('\n');

    svg.push_str(
        &SvgTag::new("rect")
            .attr("x", 0)
            .attr("y", 0)
            .attr("width", CANVAS_WIDTH)
            .attr("height", CANVAS_HEIGHT)
            .attr("fill", "#ffffff")
            .render(true),
    );
    svg.push('\n');

    svg.push_str(
        &SvgTag::new("text")
            .attr("x", CANVAS_WIDTH / 2)
            .attr("y", MARGIN_TOP / 2)
            .attr("text-anchor", "middle")
            .attr("font-family", "sans-serif")
            .attr("font-size", 16)
            .render_with_text("hap.py Evaluation Metrics"),
    );
    svg.push('\n');

    // Horizontal gridlines and y axis labels every 0.2
    for step in 0..=5 {
        let score = step as f64 * 0.2;
        let y = y_for(score);
        svg.push_str(
            &SvgTag::new("line")
                .attr("x1", MARGIN_LEFT)
                .attr("y1", format!("{y:.1}"))
                .attr("x2", CANVAS_WIDTH - MARGIN_RIGHT)
                .attr("y2", format!("{y:.1}"))
                .attr("stroke", "#dddddd")
                .attr("stroke-width", 1)
                .render(true),
        );
        svg.push('\n');
        svg.push_str(
            &SvgTag::new("text")
                .attr("x", MARGIN_LEFT - 8)
                .attr("y", format!("{:.1}", y + 4.0))
                .attr("text-anchor", "end")
                .attr("font-family", "sans-serif")
                .attr("font-size", 11)
                .render_with_text(&format!("{score:.1}")),
        );
        svg.push('\n');
    }

    // Y axis label
    svg.push_str(
        &SvgTag::new("text")
            .attr("x", 16)
            .attr("y", CANVAS_HEIGHT / 2)
            .attr("text-anchor", "middle")
            .attr("font-family", "sans-serif")
            .attr("font-size", 12)
            .attr(
                "transform",
                format!("rotate(-90 16 {})", CANVAS_HEIGHT / 2),
            )
            .render_with_text("Score"),
    );
    svg.push('\n');

    // One group of three bars per row
    let group_width = plot_width / rows.len() as f64;
    let bar_width = group_width / 4.0;
    for (group_idx, row) in rows.iter().enumerate() {
        let group_left = MARGIN_LEFT as f64 + group_idx as f64 * group_width;
        let (recall, precision, f1) = match row.metrics() {
            Some(metrics) => metrics,
            None => continue,
        };

        for (bar_idx, score) in [recall, precision, f1].into_iter().enumerate() {
            let x = group_left + group_width / 8.0 + bar_idx as f64 * bar_width;
            let y = y_for(score);
            svg.push_str(
                &SvgTag::new("rect")
                    .attr("x", format!("{x:.1}"))
                    .attr("y", format!("{y:.1}"))
                    .attr("width", format!("{:.1}", bar_width * 0.9))
                    .attr("height", format!("{:.1}", baseline - y))
                    .attr("fill", METRIC_COLORS[bar_idx])
                    .render(true),
            );
            svg.push('\n');
        }

        svg.push_str(
            &SvgTag::new("text")
                .attr("x", format!("{:.1}", group_left + group_width / 2.0))
                .attr("y", CANVAS_HEIGHT - MARGIN_BOTTOM + 20)
                .attr("text-anchor", "middle")
                .attr("font-family", "sans-serif")
                .attr("font-size", 12)
                .render_with_text(&row.variant_type),
        );
        svg.push('\n');
    }

    // Axis line along the baseline
    svg.push_str(
        &SvgTag::new("line")
            .attr("x1", MARGIN_LEFT)
            .attr("y1", format!("{baseline:.1}"))
            .attr("x2", CANVAS_WIDTH - MARGIN_RIGHT)
            .attr("y2", format!("{baseline:.1}"))
            .attr("stroke", "#000000")
            .attr("stroke-width", 1)
            .render(true),
    );
    svg.push('\n');

    // Legend, top right
    for (idx, name) in METRIC_NAMES.iter().enumerate() {
        let y = MARGIN_TOP + 10 + idx as u32 * 18;
        svg.push_str(
            &SvgTag::new("rect")
                .attr("x", CANVAS_WIDTH - MARGIN_RIGHT - 90)
                .attr("y", y)
                .attr("width", 12)
                .attr("height", 12)
                .attr("fill", METRIC_COLORS[idx])
                .render(true),
        );
        svg.push('\n');
        svg.push_str(
            &SvgTag::new("text")
                .attr("x", CANVAS_WIDTH - MARGIN_RIGHT - 72)
                .attr("y", y + 10)
                .attr("font-family", "sans-serif")
                .attr("font-size", 12)
                .render_with_text(name),
        );
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the metrics chart to `output`.
pub fn plot_metrics(rows: &[MetricsRow], output: &Path) -> Result<()> {
    fs::write(output, render_svg(rows))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(variant_type: &str, recall: f64, precision: f64, f1: f64) -> MetricsRow {
        MetricsRow {
            variant_type: variant_type.to_string(),
            recall: Some(recall),
            precision: Some(precision),
            f1_score: Some(f1),
        }
    }

    #[test]
    fn renders_one_bar_per_metric_per_row() {
        let svg = render_svg(&[row("SNP", 0.99, 0.98, 0.985), row("INDEL", 0.9, 0.92, 0.91)]);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        for color in METRIC_COLORS {
            // two groups -> each metric color appears twice as a bar, once in the legend
            assert_eq!(svg.matches(color).count(), 3);
        }
        assert!(svg.contains(">SNP</text>"));
        assert!(svg.contains(">INDEL</text>"));
    }

    #[test]
    fn scores_are_clamped_to_the_axis() {
        let y_over = y_for(1.5);
        let y_top = y_for(1.0);
        assert_eq!(y_over, y_top);
    }
}
