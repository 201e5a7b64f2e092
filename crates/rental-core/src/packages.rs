//! # Rental Packages
//!
//! The three packages offered alongside individual vehicles.

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;

/// One line of a package's feature list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PackageFeature {
    pub label: String,
    /// `false` renders the line greyed out as "not included".
    pub included: bool,
}

/// A rental package with a flat daily rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RentalPackage {
    pub name: String,
    pub price_per_day: Money,
    pub description: String,
    pub features: Vec<PackageFeature>,
    /// Highlighted as "Más Popular".
    pub featured: bool,
}

impl RentalPackage {
    /// Labels of the services this package includes.
    pub fn inclusions(&self) -> impl Iterator<Item = &str> {
        self.features.iter().filter(|f| f.included).map(|f| f.label.as_str())
    }
}

fn feature(label: &str, included: bool) -> PackageFeature {
    PackageFeature {
        label: label.to_string(),
        included,
    }
}

/// All packages, cheapest first.
pub fn packages() -> Vec<RentalPackage> {
    vec![
        RentalPackage {
            name: "Básico".to_string(),
            price_per_day: Money::from_pesos(2500),
            description: "Perfecto para viajes cortos en la ciudad y alrededores.".to_string(),
            features: vec![
                feature("Kilometraje ilimitado", true),
                feature("Seguro básico", true),
                feature("Asistencia en carretera", true),
                feature("GPS incluido", false),
            ],
            featured: false,
        },
        RentalPackage {
            name: "Turista".to_string(),
            price_per_day: Money::from_pesos(3800),
            description: "Ideal para explorar la isla con todas las comodidades.".to_string(),
            features: vec![
                feature("Kilometraje ilimitado", true),
                feature("Seguro completo", true),
                feature("Asistencia en carretera", true),
                feature("GPS incluido", true),
            ],
            featured: true,
        },
        RentalPackage {
            name: "Premium".to_string(),
            price_per_day: Money::from_pesos(5200),
            description: "La experiencia más lujosa para tu viaje en República Dominicana.".to_string(),
            features: vec![
                feature("Kilometraje ilimitado", true),
                feature("Seguro todo riesgo", true),
                feature("Asistencia VIP", true),
                feature("GPS y WiFi móvil", true),
            ],
            featured: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packages_sorted_by_price() {
        let all = packages();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].price_per_day < w[1].price_per_day));
        assert_eq!(all[0].price_per_day.to_string(), "RD$ 2,500.00");
    }

    #[test]
    fn test_exactly_one_featured() {
        let featured: Vec<_> = packages().into_iter().filter(|p| p.featured).collect();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].name, "Turista");
    }

    #[test]
    fn test_basic_package_excludes_gps() {
        let basic = &packages()[0];
        let included: Vec<&str> = basic.inclusions().collect();
        assert_eq!(included.len(), 3);
        assert!(!included.contains(&"GPS incluido"));
    }
}
