use thiserror::Error;
use tracing::{debug, warn};
use ulid::Ulid;

use crate::good::{Color, Good, GoodSeed, Unit};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("good name must not be empty")]
    EmptyName,
    #[error("price must be a positive number")]
    InvalidPrice,
}

type Result<T> = ::std::result::Result<T, CatalogError>;

fn valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// The goods available for conversion, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    goods: Vec<Good>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from seeds. Seeds that fail validation are skipped.
    pub fn with_goods<I: IntoIterator<Item = GoodSeed>>(seeds: I) -> Self {
        let mut catalog = Self::new();

        for seed in seeds {
            if let Err(e) = catalog.add(&seed.name, seed.price_per_unit, seed.unit, seed.color) {
                warn!("Skipping seed good {:?}: {}.", seed.name, e);
            }
        }

        catalog
    }

    pub fn add(&mut self, name: &str, price_per_unit: f64, unit: Unit, color: Color) -> Result<Good> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        if !valid_price(price_per_unit) {
            return Err(CatalogError::InvalidPrice);
        }

        let good = Good {
            id: Ulid::new(),
            name: name.to_string(),
            price_per_unit,
            unit,
            color,
        };
        debug!(id = %good.id, name = %good.name, "added good");
        self.goods.push(good.clone());

        Ok(good)
    }

    /// Changes the price of a good, leaving every other field untouched.
    ///
    /// Returns `Ok(false)` if no good has the given id.
    pub fn update_price(&mut self, id: Ulid, new_price: f64) -> Result<bool> {
        if !valid_price(new_price) {
            return Err(CatalogError::InvalidPrice);
        }

        match self.goods.iter_mut().find(|good| good.id == id) {
            Some(good) => {
                debug!(%id, old = good.price_per_unit, new = new_price, "updated price");
                good.price_per_unit = new_price;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove(&mut self, id: Ulid) -> Option<Good> {
        let pos = self.goods.iter().position(|good| good.id == id)?;
        let good = self.goods.remove(pos);
        debug!(%id, name = %good.name, "removed good");

        Some(good)
    }

    pub fn list(&self) -> &[Good] {
        &self.goods
    }

    pub fn get(&self, id: Ulid) -> Option<&Good> {
        self.goods.iter().find(|good| good.id == id)
    }

    /// Looks a good up by 1-based position, id or case-insensitive name.
    pub fn find(&self, query: &str) -> Option<&Good> {
        let query = query.trim();

        if let Ok(pos) = query.parse::<usize>() {
            return pos.checked_sub(1).and_then(|i| self.goods.get(i));
        }

        if let Ok(id) = query.parse::<Ulid>() {
            if let Some(good) = self.get(id) {
                return Some(good);
            }
        }

        self.goods
            .iter()
            .find(|good| good.name.eq_ignore_ascii_case(query))
    }

    pub fn first(&self) -> Option<&Good> {
        self.goods.first()
    }

    pub fn len(&self) -> usize {
        self.goods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::good::starter_goods;

    fn salt(catalog: &mut Catalog) -> Good {
        catalog
            .add("Salt", 20.0, Unit::Kilogram, Color::Gray)
            .unwrap()
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut catalog = Catalog::new();
        salt(&mut catalog);
        catalog.add("Ghee", 650.0, Unit::Liter, Color::Amber).unwrap();

        let names: Vec<&str> = catalog.list().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Salt", "Ghee"]);
    }

    #[test]
    fn add_assigns_unique_ids() {
        let catalog = Catalog::with_goods(starter_goods());
        let mut ids: Vec<Ulid> = catalog.list().iter().map(|g| g.id).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn add_rejects_invalid_goods_without_mutation() {
        let mut catalog = Catalog::with_goods(starter_goods());
        let before = catalog.list().to_vec();

        let tests = vec![
            ("", 100.0, CatalogError::EmptyName),
            ("   ", 100.0, CatalogError::EmptyName),
            ("Salt", -1.0, CatalogError::InvalidPrice),
            ("Salt", 0.0, CatalogError::InvalidPrice),
            ("Salt", f64::NAN, CatalogError::InvalidPrice),
            ("Salt", f64::INFINITY, CatalogError::InvalidPrice),
        ];

        for t in tests {
            assert_eq!(
                catalog.add(t.0, t.1, Unit::Kilogram, Color::Red).unwrap_err(),
                t.2
            );
        }

        assert_eq!(catalog.list(), before.as_slice());
    }

    #[test]
    fn add_trims_names() {
        let mut catalog = Catalog::new();
        let good = catalog
            .add("  Rock Salt ", 40.0, Unit::Kilogram, Color::Pink)
            .unwrap();

        assert_eq!(good.name, "Rock Salt");
    }

    #[test]
    fn update_price_changes_only_the_price() {
        let mut catalog = Catalog::new();
        let good = salt(&mut catalog);

        assert_eq!(catalog.update_price(good.id, 25.0), Ok(true));

        let updated = catalog.get(good.id).unwrap();
        assert_eq!(updated.price_per_unit, 25.0);
        assert_eq!(
            updated,
            &Good {
                price_per_unit: 25.0,
                ..good
            }
        );
    }

    #[test]
    fn update_price_rejects_invalid_prices() {
        let mut catalog = Catalog::new();
        let good = salt(&mut catalog);

        for price in [0.0, -3.0, f64::NAN] {
            assert_eq!(
                catalog.update_price(good.id, price),
                Err(CatalogError::InvalidPrice)
            );
        }
        assert_eq!(catalog.get(good.id).unwrap().price_per_unit, 20.0);
    }

    #[test]
    fn update_price_of_unknown_good_is_a_noop() {
        let mut catalog = Catalog::with_goods(starter_goods());
        let before = catalog.list().to_vec();

        assert_eq!(catalog.update_price(Ulid::new(), 10.0), Ok(false));
        assert_eq!(catalog.list(), before.as_slice());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut catalog = Catalog::new();
        let good = salt(&mut catalog);

        assert_eq!(catalog.remove(good.id), Some(good.clone()));
        assert_eq!(catalog.remove(good.id), None);
        assert!(catalog.is_empty());
    }

    #[test]
    fn find_by_position_id_or_name() {
        let catalog = Catalog::with_goods(starter_goods());
        let cumin = &catalog.list()[3];

        assert_eq!(catalog.find("4"), Some(cumin));
        assert_eq!(catalog.find(&cumin.id.to_string()), Some(cumin));
        assert_eq!(catalog.find("cumin seeds"), Some(cumin));
        assert_eq!(catalog.find("0"), None);
        assert_eq!(catalog.find("11"), None);
        assert_eq!(catalog.find("saffron"), None);
    }

    #[test]
    fn with_goods_skips_invalid_seeds() {
        let catalog = Catalog::with_goods(vec![
            GoodSeed::new("Saffron", 250_000.0, Unit::Kilogram, Color::Red),
            GoodSeed::new("", 10.0, Unit::Kilogram, Color::Red),
            GoodSeed::new("Vinegar", -2.0, Unit::Liter, Color::Lime),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.first().unwrap().name, "Saffron");
    }
}
