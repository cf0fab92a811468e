//! Entry types: the places and travel legs that make up a trip.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Place search on Google Maps; the location name is appended.
const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// One item in an itinerary.
///
/// Tagged on `type` so each record in a data file is self-describing:
/// `{ "type": "place", ... }` or `{ "type": "travel", ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Entry {
    /// A location to visit.
    Place(Place),

    /// Movement between two places.
    Travel(Travel),
}

impl Entry {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Place(p) => &p.id,
            Self::Travel(t) => &t.id,
        }
    }

    /// Minutes this entry occupies on the running clock.
    ///
    /// Signed so that invalid input survives parsing and can be rejected
    /// with the offending entry named.
    #[must_use]
    pub fn duration(&self) -> i64 {
        match self {
            Self::Place(p) => p.duration,
            Self::Travel(t) => t.duration,
        }
    }

    /// The author-supplied clock time, if any. Only places carry one.
    #[must_use]
    pub fn fixed_time(&self) -> Option<&str> {
        match self {
            Self::Place(p) => p.start_time.as_deref(),
            Self::Travel(_) => None,
        }
    }
}

/// A location to visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Stable identifier, unique within the itinerary.
    pub id: String,

    pub title: String,

    pub location: Location,

    /// Minutes spent at the location.
    pub duration: i64,

    /// Fixed start time (`"8:00 AM"`). Overrides the accumulated clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A geocoordinate with a human-readable name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl Location {
    /// A Google Maps search link for this location's name.
    #[must_use]
    pub fn maps_url(&self) -> String {
        format!("{MAPS_SEARCH_URL}{}", urlencoding::encode(&self.name))
    }
}

/// Movement between two places.
///
/// `from` and `to` are display labels only. Positioning on a map comes from
/// the neighbouring places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Travel {
    /// Stable identifier, unique within the itinerary.
    pub id: String,

    pub from: String,

    pub to: String,

    pub transport: TransportMode,

    /// Minutes for the leg.
    pub duration: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// How a travel leg is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walk,
    Bus,
    Train,
}

impl TransportMode {
    /// Label shown next to a travel leg in the list view.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Walk => "Walk",
            Self::Bus => "Bus",
            Self::Train => "Train/Subway",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Walk => "walk",
            Self::Bus => "bus",
            Self::Train => "train",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_deserializes_from_tagged_json() {
        let json = r#"{
            "type": "place",
            "id": "1",
            "title": "Land at Boston Logan",
            "location": { "lat": 42.3656, "lng": -71.0096, "name": "Boston Logan Airport" },
            "duration": 30,
            "startTime": "8:00 AM"
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id(), "1");
        assert_eq!(entry.duration(), 30);
        assert_eq!(entry.fixed_time(), Some("8:00 AM"));
    }

    #[test]
    fn travel_deserializes_and_never_has_fixed_time() {
        let json = r#"{
            "type": "travel",
            "id": "2",
            "from": "Boston Logan Airport",
            "to": "Tatte Bakery",
            "transport": "bus",
            "duration": 45,
            "description": "Take Back Bay Logan Express bus"
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        let Entry::Travel(travel) = &entry else {
            panic!("expected travel entry");
        };
        assert_eq!(travel.transport, TransportMode::Bus);
        assert_eq!(entry.fixed_time(), None);
        assert_eq!(
            travel.description.as_deref(),
            Some("Take Back Bay Logan Express bus")
        );
    }

    #[test]
    fn unknown_transport_is_rejected() {
        let json = r#"{
            "type": "travel", "id": "2", "from": "a", "to": "b",
            "transport": "ferry", "duration": 10
        }"#;
        assert!(serde_json::from_str::<Entry>(json).is_err());
    }

    #[test]
    fn maps_url_encodes_the_name() {
        let location = Location {
            lat: 42.3497,
            lng: -71.0769,
            name: "Tatte Bakery & Cafe, Boston".to_string(),
        };
        assert_eq!(
            location.maps_url(),
            "https://www.google.com/maps/search/?api=1&query=Tatte%20Bakery%20%26%20Cafe%2C%20Boston"
        );
    }

    #[test]
    fn transport_labels() {
        assert_eq!(TransportMode::Walk.label(), "Walk");
        assert_eq!(TransportMode::Bus.label(), "Bus");
        assert_eq!(TransportMode::Train.label(), "Train/Subway");
        assert_eq!(TransportMode::Train.to_string(), "train");
    }
}
