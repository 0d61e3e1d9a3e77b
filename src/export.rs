//! Report export
//!
//! Writes an assembled [`Document`] to disk as a standalone HTML report:
//! the map snapshot becomes an embedded interactive map, text blocks are
//! rendered verbatim.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::report::{DocBlock, Document};
use crate::Result;

/// Consumer of assembled documents
pub trait DocumentSink {
    fn write_document(&self, document: &Document, path: &Path) -> Result<()>;
}

/// Timestamp-derived report filename
#[must_use]
pub fn export_filename(timestamp: DateTime<Utc>) -> String {
    format!(
        "playground_analysis_{}.html",
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Renders documents as self-contained HTML files with a Leaflet map
pub struct HtmlReportWriter;

impl DocumentSink for HtmlReportWriter {
    fn write_document(&self, document: &Document, path: &Path) -> Result<()> {
        fs::write(path, render_html(document)?)?;
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render a document to a standalone HTML page
pub fn render_html(document: &Document) -> Result<String> {
    let mut body = String::new();
    let mut map_payload: Option<String> = None;

    for block in &document.blocks {
        match block {
            DocBlock::Text(text) => {
                body.push_str(&format!("<pre>{}</pre>\n", escape_html(text)));
            }
            DocBlock::MapSnapshot(layers) => {
                body.push_str("<div id=\"map\"></div>\n");
                map_payload =
                    Some(serde_json::to_string(layers).map_err(std::io::Error::other)?);
            }
        }
    }

    let map_script = map_payload.map_or_else(String::new, |payload| {
        format!(
            r#"<script>
const layers = {payload};
const map = L.map("map");
L.tileLayer("https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
const rendered = L.geoJSON(layers, {{
  style: (feature) => ({{
    color: feature.properties.outline_color || feature.properties.color || "blue",
    weight: feature.properties.outline_width || feature.properties.width || 2,
    dashArray: feature.properties.line_style === "dash" ? "8 6" : null,
  }}),
  pointToLayer: (feature, latlng) => L.circleMarker(latlng, {{
    radius: feature.properties.size || 6,
    color: feature.properties.outline_color || "black",
    fillColor: feature.properties.color || "gray",
    fillOpacity: 0.9,
  }}),
}}).addTo(map);
map.fitBounds(rendered.getBounds(), {{ padding: [20, 20] }});
</script>"#
        )
    });

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
body {{ font-family: sans-serif; max-width: 800px; margin: 2em auto; }}
#map {{ height: 420px; margin: 1em 0; }}
pre {{ background: #f0f0f0; padding: 1em; white-space: pre-wrap; }}
</style>
</head>
<body>
<h1>{title}</h1>
{body}{map_script}
</body>
</html>
"#,
        title = escape_html(&document.title),
        body = body,
        map_script = map_script,
    ))
}
