//! # Catalog Store
//!
//! The immutable, ordered collection of rentable vehicles.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Lifecycle                               │
//! │                                                                         │
//! │  Catalog source (JSON file / built-in fleet)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::from_vehicles() ── checks unique ids, prices, ratings        │
//! │       │                     ── computes the popular listing once       │
//! │       ▼                                                                 │
//! │  Arc<Catalog> shared read-only by every view                           │
//! │       │                                                                 │
//! │       ├──► filter(&criteria)  (filter.rs)                              │
//! │       ├──► popular()                                                    │
//! │       └──► get(id)                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no mutation API. Readers on any thread can share one catalog
//! without synchronization.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::filter::{self, SearchCriteria};
use crate::types::{Category, Vehicle, VehicleId};
use crate::validation::{validate_price_cents, validate_rating};

/// Read-only vehicle catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    vehicles: Vec<Vehicle>,
    /// Positions of popular vehicles, in catalog order.
    popular: Vec<usize>,
}

impl Catalog {
    /// Builds a catalog, enforcing the data-model invariants.
    ///
    /// ## Errors
    /// - `DuplicateVehicleId` if two records share an id
    /// - `Validation` if a price is negative or a rating is outside 0..=5
    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(vehicles.len());
        for vehicle in &vehicles {
            if !seen.insert(vehicle.id) {
                return Err(CoreError::DuplicateVehicleId(vehicle.id));
            }
            validate_price_cents(vehicle.price_cents)?;
            validate_rating(vehicle.rating)?;
        }

        let popular = popular_positions(&vehicles);
        Ok(Catalog { vehicles, popular })
    }

    /// Parses a JSON array of vehicles.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::catalog::Catalog;
    ///
    /// let json = r#"[{
    ///     "id": 1, "name": "Kia Sportage", "image": "/autos/sportage.jpg",
    ///     "priceCents": 320000, "category": "SUV",
    ///     "features": ["5 pasajeros"], "rating": 4.6,
    ///     "available": true, "popular": false
    /// }]"#;
    /// let catalog = Catalog::from_json(json).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let vehicles: Vec<Vehicle> = serde_json::from_str(json)?;
        debug!(count = vehicles.len(), "Parsed catalog source");
        Self::from_vehicles(vehicles)
    }

    /// The built-in fleet.
    pub fn fleet() -> Self {
        let vehicles = fleet_vehicles();
        let popular = popular_positions(&vehicles);
        Catalog { vehicles, popular }
    }

    /// All vehicles in catalog order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Looks up a vehicle by id.
    pub fn get(&self, id: VehicleId) -> CoreResult<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.id == id)
            .ok_or(CoreError::VehicleNotFound(id))
    }

    /// The curated "most popular" listing, in catalog order.
    ///
    /// Computed when the catalog is built, so repeated calls return the
    /// same vehicles in the same order.
    pub fn popular(&self) -> Vec<&Vehicle> {
        self.popular.iter().map(|&i| &self.vehicles[i]).collect()
    }

    /// Vehicles matching `criteria`, in catalog order.
    pub fn filter(&self, criteria: &SearchCriteria) -> Vec<&Vehicle> {
        filter::filter(&self.vehicles, criteria)
    }
}

fn popular_positions(vehicles: &[Vehicle]) -> Vec<usize> {
    vehicles
        .iter()
        .enumerate()
        .filter(|(_, v)| v.popular)
        .map(|(i, _)| i)
        .collect()
}

// =============================================================================
// Built-in Fleet
// =============================================================================

fn vehicle(
    id: VehicleId,
    name: &str,
    image: &str,
    price_pesos: i64,
    category: Category,
    features: [&str; 3],
    rating: f32,
    available: bool,
    popular: bool,
) -> Vehicle {
    Vehicle {
        id,
        name: name.to_string(),
        image: image.to_string(),
        price_cents: price_pesos * 100,
        category: Some(category),
        features: features.iter().map(|f| f.to_string()).collect(),
        rating,
        available,
        popular,
    }
}

/// Fleet data. Ids are unique, prices non-negative, ratings within 0..=5.
fn fleet_vehicles() -> Vec<Vehicle> {
    use Category::*;

    vec![
        vehicle(1, "Toyota RAV4", "/autos/rav4.jpg", 4500, Suv,
            ["5 pasajeros", "Automático", "Gasolina"], 4.8, true, true),
        vehicle(2, "Hyundai Elantra", "/autos/elantra.jpg", 2800, Sedan,
            ["5 pasajeros", "Automático", "Gasolina"], 4.5, true, true),
        vehicle(3, "Toyota Hilux", "/autos/hilux.jpg", 5200, Pickup,
            ["5 pasajeros", "Manual", "Diésel"], 4.7, true, true),
        vehicle(4, "Kia Sportage", "/autos/sportage.jpg", 3900, Suv,
            ["5 pasajeros", "Automático", "Gasolina"], 4.6, false, false),
        vehicle(5, "Honda Civic", "/autos/civic.jpg", 3000, Sedan,
            ["5 pasajeros", "Automático", "Gasolina"], 4.7, true, false),
        vehicle(6, "Mitsubishi L200", "/autos/l200.jpg", 4800, Pickup,
            ["5 pasajeros", "Manual", "Diésel"], 4.3, true, false),
        vehicle(7, "Jeep Grand Cherokee", "/autos/cherokee.jpg", 7500, Suv,
            ["5 pasajeros", "Automático", "Gasolina"], 4.9, true, true),
        vehicle(8, "Kia Rio", "/autos/rio.jpg", 2200, Sedan,
            ["5 pasajeros", "Manual", "Gasolina"], 4.2, false, false),
        vehicle(9, "Nissan Frontier", "/autos/frontier.jpg", 4600, Pickup,
            ["5 pasajeros", "Automático", "Diésel"], 4.4, true, false),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_satisfies_invariants() {
        let fleet = Catalog::fleet();
        let rebuilt = Catalog::from_vehicles(fleet.vehicles().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), fleet.len());
        assert_eq!(rebuilt.popular(), fleet.popular());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut vehicles = fleet_vehicles();
        vehicles[1].id = vehicles[0].id;
        let err = Catalog::from_vehicles(vehicles).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateVehicleId(1)));
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        let mut vehicles = fleet_vehicles();
        vehicles[0].rating = 7.0;
        assert!(matches!(
            Catalog::from_vehicles(vehicles),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut vehicles = fleet_vehicles();
        vehicles[2].price_cents = -1;
        assert!(Catalog::from_vehicles(vehicles).is_err());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CoreError::CatalogParse(_))
        ));
        assert!(Catalog::from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_get() {
        let fleet = Catalog::fleet();
        assert_eq!(fleet.get(3).unwrap().name, "Toyota Hilux");
        assert!(matches!(fleet.get(99), Err(CoreError::VehicleNotFound(99))));
    }

    #[test]
    fn test_popular_listing_is_stable() {
        let fleet = Catalog::fleet();
        let first: Vec<VehicleId> = fleet.popular().iter().map(|v| v.id).collect();
        assert_eq!(first, vec![1, 2, 3, 7]);
        for _ in 0..3 {
            let again: Vec<VehicleId> = fleet.popular().iter().map(|v| v.id).collect();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_from_json_uncategorized_vehicle() {
        let json = r#"[{
            "id": 1, "name": "Fiat Panda", "image": "/autos/panda.jpg",
            "priceCents": 150000, "category": "",
            "features": ["4 pasajeros"], "rating": 4.1,
            "available": true, "popular": false
        }, {
            "id": 2, "name": "Kia Sportage", "image": "/autos/sportage.jpg",
            "priceCents": 320000, "category": "SUV",
            "features": ["5 pasajeros"], "rating": 4.6,
            "available": true, "popular": false
        }]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.get(1).unwrap().category, None);

        let all: Vec<VehicleId> = catalog.filter(&SearchCriteria::default()).iter().map(|v| v.id).collect();
        assert_eq!(all, vec![1, 2]);

        for category in Category::ALL {
            let criteria = SearchCriteria {
                category: Some(category.as_str().to_string()),
                ..Default::default()
            };
            assert!(catalog.filter(&criteria).iter().all(|v| v.id != 1));
        }
    }

    #[test]
    fn test_from_json_price_above_limit() {
        let json = r#"[{
            "id": 1, "name": "Bugatti", "image": "/autos/b.jpg",
            "priceCents": 5000000000000000000, "category": "Sedán",
            "features": [], "rating": 5.0, "available": true, "popular": false
        }]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.popular().is_empty());
        assert!(catalog.filter(&SearchCriteria::default()).is_empty());
    }
}
