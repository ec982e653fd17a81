use serde::{Deserialize, Serialize};

use crate::room_taxonomy::RoomCategory;
use crate::svg_parser::Room;

/// Per-category room counts for one drawing. Derived once by
/// [`tally_rooms`] and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTally {
    pub bedrooms: usize,
    pub bathrooms: usize,
    pub bathrooms_shower: usize,
    pub kitchens: usize,
    pub living_rooms: usize,
    pub dining_rooms: usize,
    pub corridors: usize,
    pub storage: usize,
    pub outdoor: usize,
}

impl RoomTally {
    pub fn count(&self, category: RoomCategory) -> usize {
        match category {
            RoomCategory::Bedrooms => self.bedrooms,
            RoomCategory::Bathrooms => self.bathrooms,
            RoomCategory::BathroomsShower => self.bathrooms_shower,
            RoomCategory::Kitchens => self.kitchens,
            RoomCategory::LivingRooms => self.living_rooms,
            RoomCategory::DiningRooms => self.dining_rooms,
            RoomCategory::Corridors => self.corridors,
            RoomCategory::Storage => self.storage,
            RoomCategory::Outdoor => self.outdoor,
        }
    }

    fn increment(&mut self, category: RoomCategory) {
        match category {
            RoomCategory::Bedrooms => self.bedrooms += 1,
            RoomCategory::Bathrooms => self.bathrooms += 1,
            RoomCategory::BathroomsShower => self.bathrooms_shower += 1,
            RoomCategory::Kitchens => self.kitchens += 1,
            RoomCategory::LivingRooms => self.living_rooms += 1,
            RoomCategory::DiningRooms => self.dining_rooms += 1,
            RoomCategory::Corridors => self.corridors += 1,
            RoomCategory::Storage => self.storage += 1,
            RoomCategory::Outdoor => self.outdoor += 1,
        }
    }

    /// Normal bathrooms plus shower bathrooms, the figure captions quote.
    pub fn total_bathrooms(&self) -> usize {
        self.bathrooms + self.bathrooms_shower
    }
}

/// Fold rooms into a tally. Rooms whose raw type is not in the taxonomy
/// table contribute nothing. Pure function of the room list.
pub fn tally_rooms(rooms: &[Room]) -> RoomTally {
    let mut tally = RoomTally::default();

    for room in rooms {
        if let Some(category) = RoomCategory::from_raw_type(&room.raw_type) {
            tally.increment(category);
        }
    }

    tally
}
