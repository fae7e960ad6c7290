//! Declarative paint rules for the game map.
//!
//! The document follows the Mapbox GL style layout (version 8) so it can be
//! handed to the engine as-is. Water is painted saturated over muted land so
//! water-body outlines read clearly during play.

use serde::Serialize;
use std::collections::BTreeMap;

pub const STREETS_SOURCE: &str = "mapbox-streets";
const STREETS_URL: &str = "mapbox://mapbox.mapbox-streets-v8";

/// Immutable style document: named sources plus layers in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDocument {
    version: u32,
    sources: BTreeMap<String, StyleSource>,
    layers: Vec<StyleLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleSource {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Vector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Background,
    Fill,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "source-layer", skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    pub paint: Paint,
}

/// Paint parameters; only the keys relevant to the layer kind are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paint {
    #[serde(rename = "background-color", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(rename = "fill-color", skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(rename = "fill-opacity", skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(rename = "line-color", skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,
    #[serde(rename = "line-width", skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

impl StyleLayer {
    fn background(id: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: LayerKind::Background,
            source: None,
            source_layer: None,
            paint: Paint {
                background_color: Some(color.to_string()),
                ..Default::default()
            },
        }
    }

    fn fill(id: &str, source_layer: &str, color: &str, opacity: f64) -> Self {
        Self {
            id: id.to_string(),
            kind: LayerKind::Fill,
            source: Some(STREETS_SOURCE.to_string()),
            source_layer: Some(source_layer.to_string()),
            paint: Paint {
                fill_color: Some(color.to_string()),
                fill_opacity: Some(opacity),
                ..Default::default()
            },
        }
    }

    fn line(id: &str, source_layer: &str, color: &str, width: f64) -> Self {
        Self {
            id: id.to_string(),
            kind: LayerKind::Line,
            source: Some(STREETS_SOURCE.to_string()),
            source_layer: Some(source_layer.to_string()),
            paint: Paint {
                line_color: Some(color.to_string()),
                line_width: Some(width),
                ..Default::default()
            },
        }
    }
}

impl StyleDocument {
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn sources(&self) -> &BTreeMap<String, StyleSource> {
        &self.sources
    }

    /// Layers in paint order; later entries draw over earlier ones.
    pub fn layers(&self) -> &[StyleLayer] {
        &self.layers
    }

    pub fn layer(&self, id: &str) -> Option<&StyleLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Index of a layer in the paint order.
    pub fn paint_position(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }
}

/// The game's map style: neutral background, muted land cover, strong water.
pub fn water_emphasis_style() -> StyleDocument {
    let mut sources = BTreeMap::new();
    sources.insert(
        STREETS_SOURCE.to_string(),
        StyleSource {
            kind: SourceKind::Vector,
            url: STREETS_URL.to_string(),
        },
    );
    StyleDocument {
        version: 8,
        sources,
        layers: vec![
            StyleLayer::background("background", "#f8f9fa"),
            StyleLayer::fill("landcover", "landcover", "#e9ecef", 0.8),
            StyleLayer::fill("water", "water", "#4A90E2", 0.9),
            StyleLayer::line("water-outline", "water", "#2E5BBA", 1.0),
        ],
    }
}
