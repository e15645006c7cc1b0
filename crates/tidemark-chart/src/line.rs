use std::fmt::Write;

use crate::escape;

const PALETTE: [&str; 2] = ["#4878a8", "#d0604a"];
const FONT: &str = "font-family=\"sans-serif\"";

/// One polyline on a shared weekly x axis.
#[derive(Debug, Clone)]
pub struct LineSeries {
    /// Legend label.
    pub label: String,
    /// Index of the first point on the shared x axis.
    pub start: usize,
    /// Y values, one per consecutive x position.
    pub values: Vec<f64>,
}

/// Render a line chart over a shared categorical x axis.
///
/// `x_labels` spans the full axis; each series occupies the index range
/// `start..start + values.len()`. Used to plot historical defect counts and
/// the forecast continuation on one chart.
///
/// # Examples
///
/// ```
/// use tidemark_chart::{line_chart, LineSeries};
///
/// let labels: Vec<String> = vec!["2026-01-05".into(), "2026-01-12".into(), "2026-01-19".into()];
/// let series = vec![
///     LineSeries { label: "Historical".into(), start: 0, values: vec![4.0, 6.0] },
///     LineSeries { label: "Forecast".into(), start: 2, values: vec![5.0] },
/// ];
/// let svg = line_chart("Defect Inflow", &labels, &series);
/// assert!(svg.contains("polyline"));
/// assert!(svg.contains("Forecast"));
/// ```
pub fn line_chart(title: &str, x_labels: &[String], series: &[LineSeries]) -> String {
    let left = 60.0;
    let top = 48.0;
    let plot_w = 640.0;
    let plot_h = 300.0;
    let width = left + plot_w + 160.0;
    let height = top + plot_h + 90.0;

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
        left + plot_w / 2.0,
        escape(title),
    );

    let all: Vec<f64> = series.iter().flat_map(|s| s.values.iter().copied()).collect();
    if x_labels.is_empty() || all.is_empty() {
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" {FONT} font-size=\"13\" fill=\"#666\">no data</text>",
            left + plot_w / 2.0 - 20.0,
            top + plot_h / 2.0,
        );
        svg.push_str("</svg>\n");
        return svg;
    }

    let min = all.iter().copied().fold(f64::INFINITY, f64::min).min(0.0);
    let mut max = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        max = min + 1.0;
    }
    let x_step = if x_labels.len() > 1 {
        plot_w / (x_labels.len() - 1) as f64
    } else {
        0.0
    };
    let x_at = |i: usize| left + i as f64 * x_step;
    let y_at = |v: f64| top + plot_h - (v - min) / (max - min) * plot_h;

    // Axes
    let _ = write!(
        svg,
        "<line x1=\"{left:.1}\" y1=\"{top:.1}\" x2=\"{left:.1}\" y2=\"{:.1}\" stroke=\"#999\"/>",
        top + plot_h,
    );
    let _ = write!(
        svg,
        "<line x1=\"{left:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#999\"/>",
        top + plot_h,
        left + plot_w,
        top + plot_h,
    );

    // Thin every label so roughly a dozen fit
    let stride = x_labels.len().div_ceil(12).max(1);
    for (i, label) in x_labels.iter().enumerate() {
        if i % stride != 0 && i != x_labels.len() - 1 {
            continue;
        }
        let x = x_at(i);
        let y = top + plot_h + 16.0;
        let _ = write!(
            svg,
            "<text x=\"{x:.1}\" y=\"{y:.1}\" {FONT} font-size=\"10\" text-anchor=\"end\" \
             transform=\"rotate(-45 {x:.1} {y:.1})\">{}</text>",
            escape(label),
        );
    }

    for (s_idx, s) in series.iter().enumerate() {
        let color = PALETTE[s_idx % PALETTE.len()];
        let points: Vec<String> = s
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:.1},{:.1}", x_at(s.start + i), y_at(*v)))
            .collect();
        let _ = write!(
            svg,
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"/>",
            points.join(" "),
        );
        for (i, v) in s.values.iter().enumerate() {
            let _ = write!(
                svg,
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"{color}\"/>",
                x_at(s.start + i),
                y_at(*v),
            );
        }
        // Legend entry
        let ly = top + 10.0 + s_idx as f64 * 18.0;
        let _ = write!(
            svg,
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{color}\"/>",
            left + plot_w + 16.0,
            ly - 10.0,
        );
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{ly:.1}\" {FONT} font-size=\"12\">{}</text>",
            left + plot_w + 34.0,
            escape(&s.label),
        );
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{i}")).collect()
    }

    #[test]
    fn renders_one_polyline_per_series() {
        let series = vec![
            LineSeries {
                label: "Historical".into(),
                start: 0,
                values: vec![1.0, 2.0, 3.0],
            },
            LineSeries {
                label: "Forecast".into(),
                start: 3,
                values: vec![3.0, 3.0],
            },
        ];
        let svg = line_chart("t", &labels(5), &series);
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 5);
    }

    #[test]
    fn forecast_series_starts_after_history() {
        let series = vec![LineSeries {
            label: "Forecast".into(),
            start: 2,
            values: vec![5.0],
        }];
        let svg = line_chart("t", &labels(3), &series);
        // Single point at the rightmost x position (left + plot_w = 700)
        assert!(svg.contains("cx=\"700.0\""));
    }

    #[test]
    fn empty_input_renders_placeholder() {
        let svg = line_chart("t", &[], &[]);
        assert!(svg.contains("no data"));
    }

    #[test]
    fn flat_series_does_not_divide_by_zero() {
        let series = vec![LineSeries {
            label: "h".into(),
            start: 0,
            values: vec![2.0, 2.0],
        }];
        let svg = line_chart("t", &labels(2), &series);
        assert!(!svg.contains("NaN"));
    }
}
