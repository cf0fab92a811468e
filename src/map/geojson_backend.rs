//! GeoJSON backend: renders into a `FeatureCollection` any web map can load.
//!
//! Markers and popups become `Point` features, polylines become `LineString`
//! features. Each feature carries a `kind` property plus its styling. The
//! last camera move is stored as a `camera` foreign member on the collection.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value, feature::Id};
use serde_json::json;

use super::{Camera, LatLng, Marker, Polyline, Popup, RenderBackend};

/// Collects rendered primitives as GeoJSON features.
#[derive(Debug, Default)]
pub struct GeoJsonBackend {
    features: Vec<Feature>,
    camera: Option<Camera>,
}

impl GeoJsonBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn into_feature_collection(self) -> FeatureCollection {
        let foreign_members = self.camera.map(|camera| {
            let mut members = JsonObject::new();
            members.insert(
                "camera".to_string(),
                json!({
                    "center": position(camera.center),
                    "zoom": camera.zoom,
                }),
            );
            members
        });
        FeatureCollection {
            bbox: None,
            features: self.features,
            foreign_members,
        }
    }

    fn push(&mut self, id: &str, value: Value, properties: JsonValue) {
        let properties = match properties {
            JsonValue::Object(map) => Some(map),
            _ => None,
        };
        self.features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(value)),
            id: Some(Id::String(id.to_string())),
            properties,
            foreign_members: None,
        });
    }
}

/// GeoJSON positions are longitude first.
fn position(p: LatLng) -> Vec<f64> {
    vec![p.lng, p.lat]
}

impl RenderBackend for GeoJsonBackend {
    fn render_markers(&mut self, markers: &[Marker]) {
        for m in markers {
            self.push(
                &m.entry_id,
                Value::Point(position(m.position)),
                json!({
                    "kind": "marker",
                    "number": m.number,
                    "title": m.title,
                    "color": m.color,
                    "selected": m.selected,
                }),
            );
        }
    }

    fn render_polylines(&mut self, polylines: &[Polyline]) {
        for p in polylines {
            self.push(
                &p.entry_id,
                Value::LineString(p.path.iter().copied().map(position).collect()),
                json!({
                    "kind": "route",
                    "transport": p.transport,
                    "travelMode": p.travel_mode,
                    "color": p.color,
                }),
            );
        }
    }

    fn fly_to(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    fn show_popup(&mut self, popup: &Popup) {
        self.push(
            &popup.entry_id,
            Value::Point(position(popup.position)),
            json!({
                "kind": "popup",
                "title": popup.title,
                "lines": popup.lines,
                "link": popup.link,
            }),
        );
    }
}
