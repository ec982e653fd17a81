use serde::{Deserialize, Serialize};

/// Closed set of semantic room categories used for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCategory {
    Bedrooms,
    Bathrooms,
    BathroomsShower,
    Kitchens,
    LivingRooms,
    DiningRooms,
    Corridors,
    Storage,
    Outdoor,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 9] = [
        RoomCategory::Bedrooms,
        RoomCategory::Bathrooms,
        RoomCategory::BathroomsShower,
        RoomCategory::Kitchens,
        RoomCategory::LivingRooms,
        RoomCategory::DiningRooms,
        RoomCategory::Corridors,
        RoomCategory::Storage,
        RoomCategory::Outdoor,
    ];

    /// Map a raw room-type label onto its category.
    ///
    /// Exact match only, after trimming and lowercasing. Labels not in
    /// [`RAW_TYPE_TABLE`] map to `None` and are dropped from
    /// aggregation; adjacency detection matches on substrings and does
    /// not consult this table.
    pub fn from_raw_type(raw_type: &str) -> Option<RoomCategory> {
        let needle = raw_type.trim().to_lowercase();

        RAW_TYPE_TABLE
            .iter()
            .find(|(label, _)| *label == needle)
            .map(|&(_, category)| category)
    }
}

/// Static raw-type lookup table. Several raw labels collapse into
/// `Corridors`; anything not listed here is ignored by the tally.
pub const RAW_TYPE_TABLE: [(&str, RoomCategory); 12] = [
    ("bedroom", RoomCategory::Bedrooms),
    ("bath", RoomCategory::Bathrooms),
    ("bath shower", RoomCategory::BathroomsShower),
    ("kitchen", RoomCategory::Kitchens),
    ("livingroom", RoomCategory::LivingRooms),
    ("diningroom", RoomCategory::DiningRooms),
    ("entry lobby", RoomCategory::Corridors),
    ("draughtlobby", RoomCategory::Corridors),
    ("corridor", RoomCategory::Corridors),
    ("hall", RoomCategory::Corridors),
    ("storage", RoomCategory::Storage),
    ("outdoor", RoomCategory::Outdoor),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_maps_to_its_category() {
        for (label, category) in RAW_TYPE_TABLE {
            assert_eq!(
                RoomCategory::from_raw_type(label),
                Some(category),
                "table entry '{}' should map to {:?}",
                label,
                category
            );
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(
            RoomCategory::from_raw_type("  Bath Shower  "),
            Some(RoomCategory::BathroomsShower)
        );
    }

    #[test]
    fn test_no_partial_matching() {
        assert_eq!(RoomCategory::from_raw_type("open kitchen"), None);
        assert_eq!(RoomCategory::from_raw_type("bathroom"), None);
    }

    #[test]
    fn test_unknown_label_is_unmapped() {
        assert_eq!(RoomCategory::from_raw_type("sauna"), None);
    }
}
