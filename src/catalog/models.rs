//! Catalog models: boats and the locations they sail from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of vessel offered for rent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoatType {
    #[serde(rename = "Speed Boat")]
    SpeedBoat,
    #[serde(rename = "Fibre Boat")]
    FibreBoat,
    #[serde(rename = "Houseboat")]
    Houseboat,
    #[serde(rename = "Fishing Boat")]
    FishingBoat,
    #[serde(rename = "Small Yacht")]
    Yacht,
    #[serde(rename = "Motor Boat")]
    MotorBoat,
}

impl BoatType {
    /// Human-readable label, also used for free-text search
    pub fn label(self) -> &'static str {
        match self {
            BoatType::SpeedBoat => "Speed Boat",
            BoatType::FibreBoat => "Fibre Boat",
            BoatType::Houseboat => "Houseboat",
            BoatType::FishingBoat => "Fishing Boat",
            BoatType::Yacht => "Small Yacht",
            BoatType::MotorBoat => "Motor Boat",
        }
    }
}

impl std::fmt::Display for BoatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A boat listed on the marketplace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Boat {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub boat_type: BoatType,
    pub location: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_hour: Decimal,
    pub capacity: u32,
    pub image: String,
    pub captain_included: bool,
    pub features: Vec<String>,
    /// Whether the Sea-to-Plate dining add-on can be booked on this boat
    pub sea_to_plate_available: bool,
    pub rating: f32,
}

impl Boat {
    /// Case-insensitive match against the boat name or type label.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.boat_type.label().to_lowercase().contains(needle)
    }
}

/// A departure location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub state: String,
}
