use std::fmt::Write as _;

use log::debug;

use crate::config::MapConfig;
use crate::domain::Location;

use super::geometry::{load_boundary, Boundary};
use super::html::{
    js_points, js_string, popup_html, tooltip_html, DOCUMENT_HEAD, DOCUMENT_TAIL, TILE_LAYER,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub position: [f64; 2],
    /// Popup markup, only set on the focused view
    pub popup: Option<String>,
}

/// Everything needed to emit a map document, without the markup.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPlan {
    pub center: [f64; 2],
    pub zoom: u8,
    pub icon_size: (u32, u32),
    pub markers: Vec<Marker>,
    pub focused: Option<String>,
    pub boundary: Option<Boundary>,
}

impl MapPlan {
    pub const fn is_focused(&self) -> bool {
        self.focused.is_some()
    }
}

/// Builds Leaflet documents for the full location list or a single location.
#[derive(Debug, Clone)]
pub struct MapRenderer {
    config: MapConfig,
}

impl MapRenderer {
    pub const fn new(config: MapConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Renders the map document.
    ///
    /// `filter` naming a known location focuses the view on it; any other
    /// value produces the same document as no filter at all.
    pub fn render(&self, locations: &[Location], filter: Option<&str>) -> String {
        let plan = self.plan(locations, filter);
        self.to_html(&plan)
    }

    pub fn plan(&self, locations: &[Location], filter: Option<&str>) -> MapPlan {
        let focused = filter.and_then(|name| locations.iter().find(|l| l.name == name));

        match focused {
            Some(location) => self.focused_plan(location),
            None => {
                if let Some(name) = filter {
                    debug!("Unknown map filter {name:?}, showing default view");
                }
                self.default_plan(locations)
            }
        }
    }

    fn default_plan(&self, locations: &[Location]) -> MapPlan {
        let (lat, lon) = self.config.default_center;
        MapPlan {
            center: [lat, lon],
            zoom: self.config.initial_zoom,
            icon_size: self.config.icon_size,
            markers: locations
                .iter()
                .map(|location| Marker {
                    name: location.name.clone(),
                    position: location.coords.as_array(),
                    popup: None,
                })
                .collect(),
            focused: None,
            boundary: None,
        }
    }

    fn focused_plan(&self, location: &Location) -> MapPlan {
        let popup = popup_html(
            &location.name,
            &location.description,
            self.config.popup_width,
            &self.config.palette,
        );
        MapPlan {
            center: location.coords.as_array(),
            zoom: self.config.focus_zoom,
            icon_size: self.config.focus_icon_size,
            markers: vec![Marker {
                name: location.name.clone(),
                position: location.coords.as_array(),
                popup: Some(popup),
            }],
            focused: Some(location.name.clone()),
            boundary: load_boundary(&self.config.boundary_dir, &location.name),
        }
    }

    pub fn to_html(&self, plan: &MapPlan) -> String {
        let palette = &self.config.palette;
        let mut doc = String::from(DOCUMENT_HEAD);

        let [lat, lon] = plan.center;
        let _ = writeln!(
            doc,
            "var map = L.map(\"map\").setView([{lat}, {lon}], {});",
            plan.zoom
        );
        doc.push_str(TILE_LAYER);

        let (width, height) = plan.icon_size;
        let _ = writeln!(
            doc,
            "var wine_icon = L.icon({{iconUrl: {}, iconSize: [{width}, {height}]}});",
            js_string(&self.config.icon_url)
        );

        for (index, marker) in plan.markers.iter().enumerate() {
            let [lat, lon] = marker.position;
            let _ = write!(
                doc,
                "var marker_{index} = L.marker([{lat}, {lon}], {{icon: wine_icon}}).addTo(map);\n\
                 marker_{index}.bindTooltip({});\n",
                js_string(&tooltip_html(&marker.name, palette))
            );
            if let Some(popup) = &marker.popup {
                let _ = writeln!(
                    doc,
                    "marker_{index}.bindPopup({}, {{maxWidth: {}}});",
                    js_string(popup),
                    self.config.popup_width
                );
            }
        }

        if let Some(boundary) = &plan.boundary {
            let _ = writeln!(
                doc,
                "var boundary = L.polygon({}, {{color: {primary}, fill: true, fillColor: {primary}, \
                 fillOpacity: 0.4, weight: 3}}).addTo(map);",
                js_points(&boundary.points),
                primary = js_string(&palette.primary)
            );
            if let Some(bounds) = boundary.bounds() {
                let _ = writeln!(doc, "map.fitBounds({});", js_points(&bounds));
            }
        }

        doc.push_str(DOCUMENT_TAIL);
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use std::fs;
    use tempfile::tempdir;

    fn renderer_with_boundaries(dir: &std::path::Path) -> MapRenderer {
        MapRenderer::new(MapConfig {
            icon_url: "tinto.png".to_string(),
            boundary_dir: dir.to_path_buf(),
            ..MapConfig::default()
        })
    }

    fn renderer() -> MapRenderer {
        renderer_with_boundaries(std::path::Path::new("does-not-exist"))
    }

    fn vineyards() -> Vec<Location> {
        vec![
            Location::new(
                "Vinedo Uno",
                Coordinates::new(40.0, -3.3),
                "Premier vignoble test",
                "uno.jpg",
            ),
            Location::new(
                "Vinedo Dos",
                Coordinates::new(41.0, -3.7),
                "Second vignoble test",
                "dos.jpg",
            ),
        ]
    }

    fn sample() -> Vec<Location> {
        vec![
            Location::new("A", Coordinates::new(1.0, 2.0), "d", "a.png"),
            Location::new("B", Coordinates::new(3.0, 4.0), "e", "b.png"),
        ]
    }

    #[test]
    fn default_view_contains_every_name_once() {
        let html = renderer().render(&vineyards(), None);
        assert!(!html.trim().is_empty());
        for location in vineyards() {
            assert_eq!(html.matches(&location.name).count(), 1, "{}", location.name);
        }
    }

    #[test]
    fn focused_view_isolates_the_location() {
        let html = renderer().render(&vineyards(), Some("Vinedo Uno"));
        assert!(html.contains("Vinedo Uno"));
        assert!(html.contains("Premier vignoble test"));
        assert!(!html.contains("Vinedo Dos"));
        assert!(html.contains("setView([40, -3.3], 10)"));
        assert!(html.contains("iconSize: [60, 60]"));
    }

    #[test]
    fn unknown_filter_falls_back_to_default_view() {
        let renderer = renderer();
        assert_eq!(
            renderer.render(&vineyards(), Some("Inexistant")),
            renderer.render(&vineyards(), None)
        );
    }

    #[test]
    fn single_letter_names_follow_the_same_laws() {
        let renderer = renderer();
        let default = renderer.render(&sample(), None);
        assert!(default.contains('A') && default.contains('B'));

        let focused = renderer.render(&sample(), Some("A"));
        assert!(focused.contains('A'));
        assert!(!focused.contains('B'));

        assert_eq!(renderer.render(&sample(), Some("Z")), default);
    }

    #[test]
    fn default_plan_uses_configured_viewpoint() {
        let plan = renderer().plan(&vineyards(), None);
        assert_eq!(plan.center, [40.0, -3.3]);
        assert_eq!(plan.zoom, 7);
        assert_eq!(plan.markers.len(), 2);
        assert!(!plan.is_focused());
        assert!(plan.markers.iter().all(|m| m.popup.is_none()));
    }

    #[test]
    fn focused_plan_overlays_boundary_when_present() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("vinedo_uno.geojson"),
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{},
                "geometry":{"type":"Polygon","coordinates":[[[-3.5,39.5],[-3.0,39.5],[-3.0,40.5],[-3.5,39.5]]]}}]}"#,
        )?;
        let renderer = renderer_with_boundaries(dir.path());

        let plan = renderer.plan(&vineyards(), Some("Vinedo Uno"));
        assert!(plan.boundary.is_some());

        let html = renderer.to_html(&plan);
        assert!(html.contains("L.polygon([[39.5, -3.5]"));
        assert!(html.contains("map.fitBounds([[39.5, -3.5], [40.5, -3]]);"));

        let other = renderer.plan(&vineyards(), Some("Vinedo Dos"));
        assert!(other.boundary.is_none());
        Ok(())
    }

    #[test]
    fn malformed_boundary_is_omitted() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("vinedo_uno.geojson"), r#"{"features": []}"#)?;

        let html = renderer_with_boundaries(dir.path()).render(&vineyards(), Some("Vinedo Uno"));
        assert!(html.contains("Vinedo Uno"));
        assert!(!html.contains("L.polygon"));
        Ok(())
    }

    #[test]
    fn names_are_escaped_in_markup() {
        let locations = vec![Location::new(
            "<Bodega>",
            Coordinates::new(0.0, 0.0),
            "",
            "",
        )];
        let html = renderer().render(&locations, None);
        assert!(html.contains("&lt;Bodega&gt;"));
        assert!(!html.contains("<Bodega>"));
    }

    #[test]
    fn apostrophes_survive_in_default_view() {
        let locations = vec![
            Location::new("L'Empordà", Coordinates::new(42.27, 3.03), "", ""),
            Location::new("Toro", Coordinates::new(41.52, -5.39), "", ""),
        ];
        let html = renderer().render(&locations, None);
        assert_eq!(html.matches("L'Empordà").count(), 1);
        assert_eq!(html.matches("Toro").count(), 1);
    }
}
