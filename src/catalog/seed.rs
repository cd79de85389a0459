//! Built-in catalog data served until a real inventory backend exists.

use rust_decimal_macros::dec;

use super::models::{Boat, BoatType, Location};

pub(super) fn locations() -> Vec<Location> {
    [
        ("goa", "Goa", "North/South"),
        ("alleppey", "Alleppey", "Kerala"),
        ("mumbai", "Gateway of India", "Mumbai"),
        ("andaman", "Havelock Island", "Andaman"),
        ("vizag", "Visakhapatnam", "Andhra"),
    ]
    .into_iter()
    .map(|(id, name, state)| Location {
        id: id.to_string(),
        name: name.to_string(),
        state: state.to_string(),
    })
    .collect()
}

fn features(list: &[&str]) -> Vec<String> {
    list.iter().map(|f| f.to_string()).collect()
}

pub(super) fn boats() -> Vec<Boat> {
    vec![
        Boat {
            id: "1".to_string(),
            name: "Blue Pearl".to_string(),
            boat_type: BoatType::SpeedBoat,
            location: "Goa".to_string(),
            price_per_hour: dec!(2500),
            capacity: 6,
            image: "https://picsum.photos/seed/boat1/600/400".to_string(),
            captain_included: true,
            features: features(&["Life Jackets", "Music System", "Safety Kit"]),
            sea_to_plate_available: false,
            rating: 4.8,
        },
        Boat {
            id: "2".to_string(),
            name: "Kerala Queen".to_string(),
            boat_type: BoatType::Houseboat,
            location: "Alleppey".to_string(),
            price_per_hour: dec!(4500),
            capacity: 12,
            image: "https://picsum.photos/seed/boat2/600/400".to_string(),
            captain_included: true,
            features: features(&["Bedroom", "Chef Onboard", "AC", "Fresh Lunch"]),
            sea_to_plate_available: true,
            rating: 4.9,
        },
        Boat {
            id: "3".to_string(),
            name: "Wave Rider".to_string(),
            boat_type: BoatType::FishingBoat,
            location: "Andaman".to_string(),
            price_per_hour: dec!(1800),
            capacity: 4,
            image: "https://picsum.photos/seed/boat3/600/400".to_string(),
            captain_included: true,
            features: features(&["Fishing Gear", "Safety Vest", "Local Guide"]),
            sea_to_plate_available: true,
            rating: 4.5,
        },
        Boat {
            id: "4".to_string(),
            name: "Royal Harbor".to_string(),
            boat_type: BoatType::Yacht,
            location: "Mumbai".to_string(),
            price_per_hour: dec!(8000),
            capacity: 10,
            image: "https://picsum.photos/seed/boat4/600/400".to_string(),
            captain_included: true,
            features: features(&["Luxury Seating", "Refreshments", "Photography"]),
            sea_to_plate_available: false,
            rating: 5.0,
        },
        Boat {
            id: "5".to_string(),
            name: "Sunset Voyager".to_string(),
            boat_type: BoatType::MotorBoat,
            location: "Goa".to_string(),
            price_per_hour: dec!(1500),
            capacity: 8,
            image: "https://picsum.photos/seed/boat5/600/400".to_string(),
            captain_included: true,
            features: features(&["Cool Box", "Life Jackets"]),
            sea_to_plate_available: true,
            rating: 4.2,
        },
    ]
}
