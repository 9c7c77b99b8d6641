use super::*;

/// Mean earth radius in kilometres as used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometres
    pub fn haversine_distance(&self, other: &Coordinate) -> Weight {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

#[derive(Clone, Debug)]
pub struct Vertex {
    id: Node,
    position: Option<Coordinate>,
    pub(super) edges: Vec<DirectedEdge>,
}

impl Vertex {
    pub fn new(id: Node) -> Self {
        Self {
            id,
            position: None,
            edges: Vec::new(),
        }
    }

    pub fn with_position(id: Node, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            position: Some(Coordinate::new(latitude, longitude)),
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> Node {
        self.id
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    pub fn degree(&self) -> NumNodes {
        self.edges.len() as NumNodes
    }
}
