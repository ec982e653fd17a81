use tracing::debug;

use crate::svg_parser::Room;

/// True when any kitchen-labeled room shares a boundary with any
/// living-labeled room.
///
/// Labels are matched by case-insensitive substring on the raw type,
/// independent of the taxonomy table, so a room typed "open kitchen"
/// participates here even though it aggregates to no category. The scan
/// short-circuits on the first touching pair; which pair is found first
/// carries no meaning.
pub fn has_open_plan_kitchen(rooms: &[Room]) -> bool {
    let kitchens: Vec<&Room> = rooms
        .iter()
        .filter(|r| r.raw_type.to_lowercase().contains("kitchen"))
        .collect();
    let living_rooms: Vec<&Room> = rooms
        .iter()
        .filter(|r| r.raw_type.to_lowercase().contains("living"))
        .collect();

    for kitchen in &kitchens {
        for living in &living_rooms {
            if kitchen.polygon.touches(&living.polygon) {
                debug!(
                    "open-plan contact between '{}' and '{}'",
                    kitchen.raw_type, living.raw_type
                );
                return true;
            }
        }
    }

    false
}
