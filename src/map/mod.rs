//! Map view: turning an itinerary into map primitives.
//!
//! The view knows how an itinerary looks on a map (numbered markers for
//! places, coloured lines for travel legs, a popup for the selection). A
//! [`RenderBackend`] knows how to draw those primitives with a particular
//! mapping library. Swapping the backend never changes what gets drawn.

mod distance;
mod geojson_backend;

use serde::{Deserialize, Serialize};

use crate::clock::format_minutes;
use crate::model::{Entry, Itinerary, Place, TransportMode, Travel};

pub use distance::{distance_meters, format_distance, walking_minutes};
pub use geojson_backend::GeoJsonBackend;

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<&crate::model::Location> for LatLng {
    fn from(l: &crate::model::Location) -> Self {
        Self {
            lat: l.lat,
            lng: l.lng,
        }
    }
}

/// How a routing provider should be asked to route a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Transit,
}

/// The one mapping from transport mode to routing mode.
///
/// Buses and trains both route as transit.
#[must_use]
pub fn routing_mode(mode: TransportMode) -> TravelMode {
    match mode {
        TransportMode::Walk => TravelMode::Walking,
        TransportMode::Bus | TransportMode::Train => TravelMode::Transit,
    }
}

/// Route colours per transport mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteColors {
    pub walk: String,
    pub bus: String,
    pub train: String,
}

impl Default for RouteColors {
    fn default() -> Self {
        Self {
            walk: "#27ae60".to_string(),
            bus: "#f39c12".to_string(),
            train: "#e74c3c".to_string(),
        }
    }
}

/// Styling for a map view, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MapStyle {
    /// Zoom for the whole-trip overview.
    pub zoom: f64,

    /// Zoom when flying to a selected entry.
    pub focus_zoom: f64,

    pub marker_color: String,

    pub selected_marker_color: String,

    pub route_colors: RouteColors,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            zoom: 13.0,
            focus_zoom: 15.0,
            marker_color: "#3498db".to_string(),
            selected_marker_color: "#e74c3c".to_string(),
            route_colors: RouteColors::default(),
        }
    }
}

impl MapStyle {
    #[must_use]
    pub fn route_color(&self, mode: TransportMode) -> &str {
        match mode {
            TransportMode::Walk => &self.route_colors.walk,
            TransportMode::Bus => &self.route_colors.bus,
            TransportMode::Train => &self.route_colors.train,
        }
    }
}

/// A numbered place marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub entry_id: String,
    /// 1-based, counting places only.
    pub number: usize,
    pub position: LatLng,
    pub title: String,
    pub color: String,
    pub selected: bool,
}

/// A travel leg drawn between the places on either side of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub entry_id: String,
    pub path: Vec<LatLng>,
    pub transport: TransportMode,
    pub travel_mode: TravelMode,
    pub color: String,
}

/// An info window anchored to a point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub entry_id: String,
    pub position: LatLng,
    pub title: String,
    pub lines: Vec<String>,
    /// External link, shown below the lines.
    pub link: Option<String>,
}

/// Where the map is looking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub center: LatLng,
    pub zoom: f64,
}

/// The drawing capabilities a mapping library has to provide.
pub trait RenderBackend {
    fn render_markers(&mut self, markers: &[Marker]);

    fn render_polylines(&mut self, polylines: &[Polyline]);

    /// Pan or fly the camera.
    fn fly_to(&mut self, camera: Camera);

    fn show_popup(&mut self, popup: &Popup);
}

/// Translates itineraries into calls on a rendering backend.
pub struct MapView<B> {
    backend: B,
    style: MapStyle,
}

impl<B: RenderBackend> MapView<B> {
    #[must_use]
    pub fn new(backend: B, style: MapStyle) -> Self {
        Self { backend, style }
    }

    /// Hands the backend back, with whatever it has drawn.
    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Draw a whole itinerary, optionally highlighting one entry.
    ///
    /// An unknown `selected` id is drawn as no selection.
    pub fn render(&mut self, itinerary: &Itinerary, selected: Option<&str>) {
        let selected = selected.and_then(|id| {
            let found = itinerary.find(id);
            if found.is_none() {
                log::warn!("selected entry {id} is not in the itinerary");
            }
            found
        });
        let selected_id = selected.map(Entry::id);

        let markers = self.markers(itinerary, selected_id);
        let polylines = self.polylines(itinerary);
        log::debug!(
            "rendering {} markers and {} polylines",
            markers.len(),
            polylines.len()
        );
        self.backend.render_markers(&markers);
        self.backend.render_polylines(&polylines);

        match selected {
            Some(Entry::Place(place)) => {
                let position = LatLng::from(&place.location);
                self.backend.fly_to(Camera {
                    center: position,
                    zoom: self.style.focus_zoom,
                });
                self.backend.show_popup(&place_popup(place, position));
            }
            Some(Entry::Travel(travel)) => {
                match polylines.iter().find(|p| p.entry_id == travel.id) {
                    Some(line) => {
                        let center = midpoint(line.path[0], line.path[1]);
                        self.backend.fly_to(Camera {
                            center,
                            zoom: self.style.focus_zoom,
                        });
                        self.backend.show_popup(&travel_popup(travel, line, center));
                    }
                    None => {
                        log::warn!("travel leg {} has no place on one side", travel.id);
                        self.overview(itinerary);
                    }
                }
            }
            None => self.overview(itinerary),
        }
    }

    fn markers(&self, itinerary: &Itinerary, selected: Option<&str>) -> Vec<Marker> {
        itinerary
            .places()
            .enumerate()
            .map(|(i, place)| {
                let is_selected = selected == Some(place.id.as_str());
                let color = if is_selected {
                    &self.style.selected_marker_color
                } else {
                    &self.style.marker_color
                };
                Marker {
                    entry_id: place.id.clone(),
                    number: i + 1,
                    position: LatLng::from(&place.location),
                    title: place.title.clone(),
                    color: color.clone(),
                    selected: is_selected,
                }
            })
            .collect()
    }

    fn polylines(&self, itinerary: &Itinerary) -> Vec<Polyline> {
        let entries = &itinerary.entries;
        entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                let Entry::Travel(travel) = entry else {
                    return None;
                };
                let (before, after) = leg_endpoints(entries, i)?;
                Some(Polyline {
                    entry_id: travel.id.clone(),
                    path: vec![
                        LatLng::from(&before.location),
                        LatLng::from(&after.location),
                    ],
                    transport: travel.transport,
                    travel_mode: routing_mode(travel.transport),
                    color: self.style.route_color(travel.transport).to_string(),
                })
            })
            .collect()
    }

    /// Fly to the centre of all places. Nothing to look at means no move.
    fn overview(&mut self, itinerary: &Itinerary) {
        let Some(center) = centroid(itinerary.places().map(|p| LatLng::from(&p.location)))
        else {
            log::debug!("no places to center on");
            return;
        };
        self.backend.fly_to(Camera {
            center,
            zoom: self.style.zoom,
        });
    }
}

/// The nearest places before and after the entry at `index`.
///
/// A travel leg is drawn between these. `None` when either side has no place.
#[must_use]
pub fn leg_endpoints(entries: &[Entry], index: usize) -> Option<(&Place, &Place)> {
    let before = entries.get(..index)?.iter().rev().find_map(as_place)?;
    let after = entries.get(index + 1..)?.iter().find_map(as_place)?;
    Some((before, after))
}

fn as_place(entry: &Entry) -> Option<&Place> {
    match entry {
        Entry::Place(p) => Some(p),
        Entry::Travel(_) => None,
    }
}

fn place_popup(place: &Place, position: LatLng) -> Popup {
    let mut lines = vec![place.location.name.clone()];
    lines.extend(place.description.clone());
    Popup {
        entry_id: place.id.clone(),
        position,
        title: place.title.clone(),
        lines,
        link: Some(place.location.maps_url()),
    }
}

fn travel_popup(travel: &Travel, line: &Polyline, position: LatLng) -> Popup {
    let mut lines = vec![format!(
        "{} • {}",
        travel.transport.label(),
        format_minutes(travel.duration)
    )];
    if travel.transport == TransportMode::Walk {
        let (a, b) = (line.path[0], line.path[1]);
        lines.push(format!(
            "~{} min walk • {}",
            walking_minutes(a, b),
            format_distance(distance_meters(a, b))
        ));
    }
    lines.extend(travel.description.clone());
    Popup {
        entry_id: travel.id.clone(),
        position,
        title: format!("{} → {}", travel.from, travel.to),
        lines,
        link: None,
    }
}

fn midpoint(a: LatLng, b: LatLng) -> LatLng {
    LatLng {
        lat: f64::midpoint(a.lat, b.lat),
        lng: f64::midpoint(a.lng, b.lng),
    }
}

fn centroid(points: impl Iterator<Item = LatLng>) -> Option<LatLng> {
    let (n, lat, lng) = points.fold((0u32, 0.0, 0.0), |(n, lat, lng), p| {
        (n + 1, lat + p.lat, lng + p.lng)
    });
    (n > 0).then(|| LatLng {
        lat: lat / f64::from(n),
        lng: lng / f64::from(n),
    })
}
