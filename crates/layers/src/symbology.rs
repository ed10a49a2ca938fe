use serde::Serialize;

/// CSS color as understood by the renderer (hex or named).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    pub const DODGER_BLUE: Color = Color("#1E90FF");
    pub const LIME_GREEN: Color = Color("#32CD32");
    pub const GOLD: Color = Color("#FFD700");
    pub const DARK_ORANGE: Color = Color("#FF8C00");
    pub const FIREBRICK: Color = Color("#B22222");
    pub const DARK_RED: Color = Color("#8B0000");
    pub const ORANGE: Color = Color("orange");

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Depth bins, shallowest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepthCategory {
    UpTo10,
    UpTo30,
    UpTo50,
    UpTo70,
    UpTo90,
    Over90,
}

impl DepthCategory {
    pub const ALL: [DepthCategory; 6] = [
        DepthCategory::UpTo10,
        DepthCategory::UpTo30,
        DepthCategory::UpTo50,
        DepthCategory::UpTo70,
        DepthCategory::UpTo90,
        DepthCategory::Over90,
    ];

    pub const fn color(self) -> Color {
        match self {
            DepthCategory::UpTo10 => Color::DODGER_BLUE,
            DepthCategory::UpTo30 => Color::LIME_GREEN,
            DepthCategory::UpTo50 => Color::GOLD,
            DepthCategory::UpTo70 => Color::DARK_ORANGE,
            DepthCategory::UpTo90 => Color::FIREBRICK,
            DepthCategory::Over90 => Color::DARK_RED,
        }
    }
}

/// Inclusive upper bounds (km), ascending. Anything above the last bound is
/// [`DepthCategory::Over90`].
pub const DEPTH_BINS: [(f64, DepthCategory); 5] = [
    (10.0, DepthCategory::UpTo10),
    (30.0, DepthCategory::UpTo30),
    (50.0, DepthCategory::UpTo50),
    (70.0, DepthCategory::UpTo70),
    (90.0, DepthCategory::UpTo90),
];

/// Total over `f64`: NaN compares false against every bound and lands in the
/// open-ended bin.
pub fn classify_depth(depth_km: f64) -> DepthCategory {
    DEPTH_BINS
        .iter()
        .find(|(upper, _)| depth_km <= *upper)
        .map(|(_, category)| *category)
        .unwrap_or(DepthCategory::Over90)
}

pub fn depth_color(depth_km: f64) -> Color {
    classify_depth(depth_km).color()
}

/// Stroke/fill style for vector shapes, mirroring Leaflet path options.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub color: Color,
    pub weight: f64,
    pub opacity: f64,
    pub fill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    pub fill_opacity: f64,
}

impl PathStyle {
    pub const fn stroke(color: Color, weight: f64) -> Self {
        Self {
            color,
            weight,
            opacity: 1.0,
            fill: false,
            fill_color: None,
            fill_opacity: 0.0,
        }
    }

    pub const fn filled(color: Color, weight: f64, opacity: f64, fill_opacity: f64) -> Self {
        Self {
            color,
            weight,
            opacity,
            fill: true,
            fill_color: Some(color),
            fill_opacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_use_inclusive_upper_bounds() {
        let cases = [
            (-35.0, DepthCategory::UpTo10),
            (0.0, DepthCategory::UpTo10),
            (10.0, DepthCategory::UpTo10),
            (10.01, DepthCategory::UpTo30),
            (30.0, DepthCategory::UpTo30),
            (50.0, DepthCategory::UpTo50),
            (50.5, DepthCategory::UpTo70),
            (70.0, DepthCategory::UpTo70),
            (90.0, DepthCategory::UpTo90),
            (90.000_001, DepthCategory::Over90),
            (650.0, DepthCategory::Over90),
        ];
        for (depth, expected) in cases {
            assert_eq!(classify_depth(depth), expected, "depth {depth}");
        }
    }

    #[test]
    fn classifier_is_total() {
        for depth in [f64::NEG_INFINITY, f64::MIN, -0.0, f64::MAX, f64::INFINITY] {
            let _ = classify_depth(depth);
        }
        assert_eq!(classify_depth(f64::NAN), DepthCategory::Over90);
        assert_eq!(classify_depth(f64::NEG_INFINITY), DepthCategory::UpTo10);
    }

    #[test]
    fn bins_are_ascending_and_cover_every_category_once() {
        assert!(DEPTH_BINS.windows(2).all(|w| w[0].0 < w[1].0));
        let mut seen: Vec<DepthCategory> = DEPTH_BINS.iter().map(|(_, c)| *c).collect();
        seen.push(DepthCategory::Over90);
        assert_eq!(seen, DepthCategory::ALL.to_vec());
    }

    #[test]
    fn each_category_has_a_distinct_color() {
        let colors: std::collections::HashSet<Color> =
            DepthCategory::ALL.iter().map(|c| c.color()).collect();
        assert_eq!(colors.len(), 6);
        assert_eq!(depth_color(5.0), Color::DODGER_BLUE);
        assert_eq!(depth_color(95.0), Color::DARK_RED);
    }
}
