use super::Coordinate;

/// Span used when the view jumps to a search hit.
pub const FOCUS_DELTA: f64 = 0.01;

/// The map viewport: a center plus the visible span in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn new(center: Coordinate, latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            center,
            latitude_delta,
            longitude_delta,
        }
    }

    /// Recenter tightly on a single place.
    pub fn focus_on(&mut self, center: Coordinate) {
        self.center = center;
        self.latitude_delta = FOCUS_DELTA;
        self.longitude_delta = FOCUS_DELTA;
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        let half_lat = self.latitude_delta / 2.0;
        let half_lon = self.longitude_delta / 2.0;
        (coordinate.latitude - self.center.latitude).abs() <= half_lat
            && (coordinate.longitude - self.center.longitude).abs() <= half_lon
    }
}

#[test]
fn focus_sets_tight_deltas() {
    let seoul = Coordinate::new(37.5665, 126.9780).unwrap();
    let mut region = Region::new(seoul, 0.0922, 0.0421);

    let city_hall = Coordinate::new(37.5663, 126.9779).unwrap();
    region.focus_on(city_hall);

    assert_eq!(region.center, city_hall);
    assert_eq!(region.latitude_delta, FOCUS_DELTA);
    assert_eq!(region.longitude_delta, FOCUS_DELTA);
}

#[test]
fn contains_respects_the_span() {
    let seoul = Coordinate::new(37.5665, 126.9780).unwrap();
    let region = Region::new(seoul, 0.01, 0.01);

    assert!(region.contains(&Coordinate::new(37.5668, 126.9782).unwrap()));
    assert!(!region.contains(&Coordinate::new(37.58, 126.9780).unwrap()));
}
