use std::fmt::Write;

use crate::{escape, truncate_label};

const BAR_FILL: &str = "#6baed6";
const FONT: &str = "font-family=\"sans-serif\"";

/// Render a horizontal bar chart, one row per entry, bars scaled to the
/// largest value. Suited to ranked file listings where labels are long.
///
/// # Examples
///
/// ```
/// use tidemark_chart::horizontal_bar_chart;
///
/// let entries = vec![("src/main.rs".to_string(), 120.0), ("src/lib.rs".to_string(), 45.0)];
/// let svg = horizontal_bar_chart("Top Files by Code Churn", "Total Churn", &entries);
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains("src/main.rs"));
/// ```
pub fn horizontal_bar_chart(title: &str, axis_label: &str, entries: &[(String, f64)]) -> String {
    let label_gutter = 320.0;
    let bar_area = 560.0;
    let row_height = 26.0;
    let top = 48.0;
    let width = label_gutter + bar_area + 80.0;
    let height = top + entries.len().max(1) as f64 * row_height + 40.0;

    let mut svg = svg_open(width, height, title);

    if entries.is_empty() {
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"{}\" {FONT} font-size=\"13\" fill=\"#666\">no data</text>",
            width / 2.0 - 20.0,
            height / 2.0
        );
        svg.push_str("</svg>\n");
        return svg;
    }

    let max = entries.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
    for (i, (label, value)) in entries.iter().enumerate() {
        let y = top + i as f64 * row_height;
        let bar_w = if max > 0.0 { value / max * bar_area } else { 0.0 };
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" {FONT} font-size=\"12\" text-anchor=\"end\">{}</text>",
            label_gutter - 8.0,
            y + row_height * 0.65,
            escape(&truncate_label(label, 44)),
        );
        let _ = write!(
            svg,
            "<rect x=\"{label_gutter:.1}\" y=\"{:.1}\" width=\"{bar_w:.1}\" height=\"{:.1}\" fill=\"{BAR_FILL}\"/>",
            y + 4.0,
            row_height - 8.0,
        );
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" {FONT} font-size=\"11\" fill=\"#333\">{}</text>",
            label_gutter + bar_w + 6.0,
            y + row_height * 0.65,
            value.round() as i64,
        );
    }

    let _ = write!(
        svg,
        "<text x=\"{:.1}\" y=\"{:.1}\" {FONT} font-size=\"12\" fill=\"#333\" text-anchor=\"middle\">{}</text>",
        label_gutter + bar_area / 2.0,
        height - 12.0,
        escape(axis_label),
    );
    svg.push_str("</svg>\n");
    svg
}

/// Render a vertical bar chart with rotated category labels, suited to
/// module rankings where every entry should be visible.
///
/// # Examples
///
/// ```
/// use tidemark_chart::vertical_bar_chart;
///
/// let entries = vec![("src".to_string(), 300.0), (".".to_string(), 12.0)];
/// let svg = vertical_bar_chart("Code Churn per Module", "Total Churn", &entries);
/// assert!(svg.contains("</svg>"));
/// ```
pub fn vertical_bar_chart(title: &str, axis_label: &str, entries: &[(String, f64)]) -> String {
    let col_width = 36.0;
    let plot_height = 280.0;
    let left = 70.0;
    let top = 48.0;
    let label_room = 120.0;
    let width = (left + entries.len() as f64 * col_width + 40.0).max(480.0);
    let height = top + plot_height + label_room;

    let mut svg = svg_open(width, height, title);

    if entries.is_empty() {
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"{}\" {FONT} font-size=\"13\" fill=\"#666\">no data</text>",
            width / 2.0 - 20.0,
            height / 2.0
        );
        svg.push_str("</svg>\n");
        return svg;
    }

    let max = entries.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
    for (i, (label, value)) in entries.iter().enumerate() {
        let x = left + i as f64 * col_width;
        let bar_h = if max > 0.0 { value / max * plot_height } else { 0.0 };
        let y = top + plot_height - bar_h;
        let _ = write!(
            svg,
            "<rect x=\"{:.1}\" y=\"{y:.1}\" width=\"{:.1}\" height=\"{bar_h:.1}\" fill=\"{BAR_FILL}\"/>",
            x + 4.0,
            col_width - 8.0,
        );
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" {FONT} font-size=\"11\" text-anchor=\"end\" \
             transform=\"rotate(-60 {:.1} {:.1})\">{}</text>",
            x + col_width / 2.0,
            top + plot_height + 14.0,
            x + col_width / 2.0,
            top + plot_height + 14.0,
            escape(&truncate_label(label, 26)),
        );
    }

    // Baseline and axis label
    let _ = write!(
        svg,
        "<line x1=\"{left:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#999\"/>",
        top + plot_height,
        left + entries.len() as f64 * col_width,
        top + plot_height,
    );
    let _ = write!(
        svg,
        "<text x=\"16\" y=\"{:.1}\" {FONT} font-size=\"12\" fill=\"#333\" \
         transform=\"rotate(-90 16 {:.1})\" text-anchor=\"middle\">{}</text>",
        top + plot_height / 2.0,
        top + plot_height / 2.0,
        escape(axis_label),
    );
    svg.push_str("</svg>\n");
    svg
}

fn svg_open(width: f64, height: f64, title: &str) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" \
         viewBox=\"0 0 {width:.0} {height:.0}\">",
    );
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>");
    let _ = write!(
        svg,
        "<text x=\"{:.1}\" y=\"24\" {FONT} font-size=\"15\" font-weight=\"bold\" \
         text-anchor=\"middle\">{}</text>",
        width / 2.0,
        escape(title),
    );
    svg
}
