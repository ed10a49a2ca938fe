/// A selectable background tile provider.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileSource {
    pub name: &'static str,
    pub url_template: &'static str,
    pub max_zoom: u8,
    pub attribution: &'static str,
}

const OSM_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

pub const SATELLITE: TileSource = TileSource {
    name: "Satellite",
    url_template: "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png",
    max_zoom: 19,
    attribution: OSM_ATTRIBUTION,
};

pub const GRAYSCALE: TileSource = TileSource {
    name: "Grayscale",
    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    max_zoom: 19,
    attribution: OSM_ATTRIBUTION,
};

pub const OUTDOORS: TileSource = TileSource {
    name: "Outdoors",
    url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
    max_zoom: 17,
    attribution: "&copy; OpenTopoMap, &copy; OpenStreetMap contributors",
};

pub const DEFAULT_BASE_LAYERS: [TileSource; 3] = [SATELLITE, GRAYSCALE, OUTDOORS];

pub fn find_base_layer<'a>(sources: &'a [TileSource], name: &str) -> Option<&'a TileSource> {
    sources.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sources_are_distinct() {
        let names: Vec<&str> = DEFAULT_BASE_LAYERS.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Satellite", "Grayscale", "Outdoors"]);
        let mut urls: Vec<&str> = DEFAULT_BASE_LAYERS.iter().map(|s| s.url_template).collect();
        urls.sort_unstable();
        urls.dedup();
        assert_eq!(urls.len(), 3);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find_base_layer(&DEFAULT_BASE_LAYERS, "outdoors"), Some(&OUTDOORS));
        assert_eq!(find_base_layer(&DEFAULT_BASE_LAYERS, "Terrain"), None);
    }
}
