//! Read-only boat catalog.
//!
//! Serves the built-in inventory with the location and free-text filters the
//! browse page uses.

pub mod models;
mod seed;

use serde::Deserialize;

pub use models::{Boat, BoatType, Location};

/// Location value meaning "no location filter"
pub const ALL_LOCATIONS: &str = "All Locations";

/// Filters for a boat listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoatQuery {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

impl BoatQuery {
    /// The location to filter on, if any
    pub fn location_filter(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty() && *l != ALL_LOCATIONS)
    }

    /// The lowercased search needle, if any
    pub fn needle(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

/// In-memory boat catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    locations: Vec<Location>,
    boats: Vec<Boat>,
}

impl Catalog {
    /// Catalog preloaded with the built-in fleet
    pub fn seeded() -> Self {
        Self::new(seed::locations(), seed::boats())
    }

    fn new(locations: Vec<Location>, boats: Vec<Boat>) -> Self {
        Self { locations, boats }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Boats matching the query, in catalog order
    pub fn boats(&self, query: &BoatQuery) -> Vec<Boat> {
        let location = query.location_filter();
        let needle = query.needle();

        self.boats
            .iter()
            .filter(|b| location.map_or(true, |l| b.location == l))
            .filter(|b| needle.as_deref().map_or(true, |n| b.matches_query(n)))
            .cloned()
            .collect()
    }

    pub fn boat(&self, id: &str) -> Option<&Boat> {
        self.boats.iter().find(|b| b.id == id)
    }

    pub fn fleet_size(&self) -> usize {
        self.boats.len()
    }
}
