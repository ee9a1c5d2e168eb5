use super::{Resolver, SearchError, SearchResult};
use crate::math::Coordinate;

/// Outcome of a foreground location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// The platform geocoding capability.
///
/// The platform hands back bare coordinates only, no display names, and it
/// must not be asked anything before the permission request succeeded.
pub trait PlatformGeocoder: Send + Sync {
    fn request_foreground_permission(&self) -> Result<Permission, SearchError>;
    fn geocode(&self, query: &str) -> Result<Vec<Coordinate>, SearchError>;
}

/// Resolves queries through the device geocoder.
pub struct DeviceGeocode<G> {
    platform: G,
}

impl<G> DeviceGeocode<G> {
    pub fn new(platform: G) -> Self {
        Self { platform }
    }
}

impl<G: PlatformGeocoder> Resolver for DeviceGeocode<G> {
    fn resolve(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        match self.platform.request_foreground_permission()? {
            Permission::Denied => return Err(SearchError::PermissionDenied),
            Permission::Granted => {}
        }

        let matches = self.platform.geocode(query)?;
        let first = matches.first().copied().ok_or(SearchError::NoResults)?;

        // The geocoder has no display names, so the query stands in for both.
        Ok(vec![SearchResult {
            coordinate: first,
            label: query.to_string(),
            address: query.to_string(),
        }])
    }
}

#[cfg(test)]
struct FakePlatform {
    permission: Permission,
    matches: Vec<Coordinate>,
    geocode_calls: std::sync::atomic::AtomicU32,
}

#[cfg(test)]
impl FakePlatform {
    fn new(permission: Permission, matches: Vec<Coordinate>) -> Self {
        Self {
            permission,
            matches,
            geocode_calls: std::sync::atomic::AtomicU32::new(0),
        }
    }
}

#[cfg(test)]
impl PlatformGeocoder for FakePlatform {
    fn request_foreground_permission(&self) -> Result<Permission, SearchError> {
        Ok(self.permission)
    }

    fn geocode(&self, _query: &str) -> Result<Vec<Coordinate>, SearchError> {
        self.geocode_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.matches.clone())
    }
}

#[test]
fn denied_permission_makes_no_geocode_call() {
    let geocode = DeviceGeocode::new(FakePlatform::new(Permission::Denied, vec![]));

    assert!(matches!(
        geocode.resolve("Seoul City Hall"),
        Err(SearchError::PermissionDenied)
    ));
    assert_eq!(
        geocode
            .platform
            .geocode_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        0
    );
}

#[test]
fn zero_matches_is_no_results() {
    let geocode = DeviceGeocode::new(FakePlatform::new(Permission::Granted, vec![]));

    assert!(matches!(
        geocode.resolve("Seoul City Hall"),
        Err(SearchError::NoResults)
    ));
}

#[test]
fn first_match_becomes_the_single_result() {
    let city_hall = Coordinate::new(37.5665, 126.9780).unwrap();
    let somewhere_else = Coordinate::new(35.1796, 129.0756).unwrap();
    let geocode = DeviceGeocode::new(FakePlatform::new(
        Permission::Granted,
        vec![city_hall, somewhere_else],
    ));

    let results = geocode.resolve("Seoul City Hall").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].coordinate, city_hall);
    assert_eq!(results[0].label, "Seoul City Hall");
    assert_eq!(results[0].address, "Seoul City Hall");
}
