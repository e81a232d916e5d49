use html_escape::encode_text;

use crate::config::Palette;

/// Encodes `text` as a JavaScript string literal that is safe inside a
/// `<script>` element.
pub fn js_string(text: &str) -> String {
    serde_json::Value::from(text)
        .to_string()
        .replace("</", "<\\/")
}

/// Formats a `[lat, lon]` list as a JavaScript array literal.
pub fn js_points(points: &[[f64; 2]]) -> String {
    let items: Vec<String> = points
        .iter()
        .map(|[lat, lon]| format!("[{lat}, {lon}]"))
        .collect();
    format!("[{}]", items.join(", "))
}

pub fn tooltip_html(name: &str, palette: &Palette) -> String {
    format!(
        "<div style=\"font-size:18px; font-weight:bold; color:{}; background-color:{}; \
         padding:2px 4px; border-radius:3px; border:2px solid {};\">{}</div>",
        palette.parchment,
        palette.primary,
        palette.dark,
        encode_text(name)
    )
}

/// Popup body: escaped name as heading, description kept as markup.
pub fn popup_html(name: &str, description: &str, width: u32, palette: &Palette) -> String {
    format!(
        "<div style=\"font-size:16px; line-height:1.4; color:#333; background-color:#f0f0f0; \
         padding:8px; border-radius:6px; width:{width}px;\">\
         <strong style=\"font-size:20px; color:{};\">{}</strong><br>{description}</div>",
        palette.primary,
        encode_text(name)
    )
}

pub const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; width: 100%; margin: 0; padding: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
"#;

pub const DOCUMENT_TAIL: &str = "</script>\n</body>\n</html>\n";

pub const TILE_LAYER: &str = "L.tileLayer(\"https://tile.openstreetmap.org/{z}/{x}/{y}.png\", \
{maxZoom: 19, attribution: \"&copy; openstreetmap contributors\"}).addTo(map);\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_escapes_markup_but_keeps_quotes() {
        let palette = Palette::default();
        let html = tooltip_html("<b>L'Empordà & \"Alella\"</b>", &palette);
        assert!(html.contains(">&lt;b&gt;L'Empordà &amp; \"Alella\"&lt;/b&gt;</div>"));
    }

    #[test]
    fn js_string_cannot_close_script() {
        let encoded = js_string("a\"b</script>");
        assert_eq!(encoded, r#""a\"b<\/script>""#);
    }

    #[test]
    fn js_points_formats_pairs() {
        assert_eq!(js_points(&[[40.0, -3.5], [41.25, 2.0]]), "[[40, -3.5], [41.25, 2]]");
    }
}
