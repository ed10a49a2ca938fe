use serde::Serialize;

use crate::html::escape_html;
use crate::symbology::{Color, depth_color};

/// Lower bound of each legend row, km. The last row is open-ended.
pub const DEPTH_LEGEND_GRADES: [f64; 6] = [-10.0, 10.0, 30.0, 50.0, 70.0, 90.0];
pub const DEPTH_LEGEND_TITLE: &str = "Depth (km)";

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub lower: f64,
    pub upper: Option<f64>,
    pub color: Color,
}

/// One row per grade; each swatch takes the color of a depth just inside
/// its row so the inclusive upper bound of the previous bin is never used.
pub fn legend_entries(grades: &[f64]) -> Vec<LegendEntry> {
    grades
        .iter()
        .enumerate()
        .map(|(i, &lower)| LegendEntry {
            lower,
            upper: grades.get(i + 1).copied(),
            color: depth_color(lower + 1.0),
        })
        .collect()
}

pub fn legend_html(title: &str, entries: &[LegendEntry]) -> String {
    let mut html = format!("<h3>{}</h3>", escape_html(title));
    for entry in entries {
        html.push_str(&format!(
            "<i style=\"background:{}\"></i> {}",
            entry.color, entry.lower
        ));
        match entry.upper {
            Some(upper) => html.push_str(&format!("&ndash;{upper}<br>")),
            None => html.push('+'),
        }
    }
    html
}

pub fn depth_legend_html() -> String {
    legend_html(DEPTH_LEGEND_TITLE, &legend_entries(&DEPTH_LEGEND_GRADES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbology::DepthCategory;

    #[test]
    fn six_rows_last_one_open_ended() {
        let entries = legend_entries(&DEPTH_LEGEND_GRADES);
        assert_eq!(entries.len(), 6);
        assert!(entries[..5].iter().all(|e| e.upper.is_some()));
        assert_eq!(entries[5].lower, 90.0);
        assert_eq!(entries[5].upper, None);
    }

    #[test]
    fn swatches_follow_the_classifier() {
        let colors: Vec<Color> = legend_entries(&DEPTH_LEGEND_GRADES)
            .iter()
            .map(|e| e.color)
            .collect();
        let expected: Vec<Color> = DepthCategory::ALL.iter().map(|c| c.color()).collect();
        assert_eq!(colors, expected);
    }

    #[test]
    fn renders_expected_fragment() {
        let html = depth_legend_html();
        assert!(html.starts_with("<h3>Depth (km)</h3>"));
        assert_eq!(html.matches("<i style=").count(), 6);
        assert!(html.contains("<i style=\"background:#1E90FF\"></i> -10&ndash;10<br>"));
        assert!(html.contains("<i style=\"background:#B22222\"></i> 70&ndash;90<br>"));
        assert!(html.ends_with("<i style=\"background:#8B0000\"></i> 90+"));
        assert!(!html.contains("90&ndash;"));
    }
}
