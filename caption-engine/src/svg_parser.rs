use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::geometry::RoomPolygon;

/// Class prefix marking a room group in a CubiCasa-style drawing,
/// e.g. `class="Space Bedroom"`.
const SPACE_PREFIX: &str = "Space ";

/// One labeled room extracted from a drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Lowercased, trimmed room-type label with the `Space ` prefix
    /// stripped, e.g. "bath shower" or "entry lobby".
    pub raw_type: String,
    pub polygon: RoomPolygon,
}

/// Door and window marker counts for one drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningCounts {
    pub doors: usize,
    pub windows: usize,
}

/// Everything the caption engine needs from one drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorPlan {
    pub rooms: Vec<Room>,
    pub openings: OpeningCounts,
}

/// A structurally malformed drawing. Fatal for that drawing only; the
/// batch driver catches these and skips the item.
#[derive(Debug)]
pub enum ParseError {
    Xml(roxmltree::Error),
    BadPointPair { group: String, pair: String },
    BadCoordinate { group: String, token: String },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Xml(e) => write!(f, "malformed SVG document: {}", e),
            ParseError::BadPointPair { group, pair } => {
                write!(f, "group '{}' has a malformed point pair '{}'", group, pair)
            }
            ParseError::BadCoordinate { group, token } => {
                write!(f, "group '{}' has a non-numeric coordinate '{}'", group, token)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<roxmltree::Error> for ParseError {
    fn from(err: roxmltree::Error) -> Self {
        ParseError::Xml(err)
    }
}

impl FloorPlan {
    /// Parse one SVG drawing into rooms and opening counts.
    pub fn from_svg_str(svg: &str) -> Result<Self, ParseError> {
        let doc = Document::parse(svg)?;
        let rooms = extract_rooms(&doc)?;
        let openings = count_openings(&doc);

        Ok(Self { rooms, openings })
    }
}

/// Extract one [`Room`] per `Space `-prefixed group that carries at
/// least one polygon with a non-empty point list.
///
/// A group may contain several polygons; only the first one with points
/// becomes the room outline. Groups without any polygon contribute no
/// room and are not an error.
fn extract_rooms(doc: &Document) -> Result<Vec<Room>, ParseError> {
    let mut rooms = Vec::new();

    for group in doc.descendants().filter(is_group) {
        let class = group.attribute("class").unwrap_or("");
        let Some(label) = class.strip_prefix(SPACE_PREFIX) else {
            continue;
        };

        let raw_type = label.to_lowercase().trim().to_string();

        for polygon in group
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "polygon")
        {
            let Some(points) = polygon.attribute("points") else {
                continue;
            };
            if points.trim().is_empty() {
                continue;
            }

            let corners = parse_points(points, class)?;
            rooms.push(Room {
                raw_type,
                polygon: RoomPolygon::new(corners),
            });
            break;
        }
    }

    Ok(rooms)
}

/// Count door and window markers by substring match on every group's
/// class attribute. A label containing both substrings increments both
/// counts. Marker counting is independent of room extraction.
fn count_openings(doc: &Document) -> OpeningCounts {
    let mut counts = OpeningCounts::default();

    for group in doc.descendants().filter(is_group) {
        let class = group.attribute("class").unwrap_or("").to_lowercase();
        if class.contains("door") {
            counts.doors += 1;
        }
        if class.contains("window") {
            counts.windows += 1;
        }
    }

    counts
}

/// Parse a `points` attribute of whitespace-separated "x,y" pairs.
fn parse_points(points: &str, group: &str) -> Result<Vec<(f64, f64)>, ParseError> {
    let mut corners = Vec::new();

    for pair in points.split_whitespace() {
        let mut components = pair.split(',');
        let (Some(x), Some(y), None) = (components.next(), components.next(), components.next())
        else {
            return Err(ParseError::BadPointPair {
                group: group.to_string(),
                pair: pair.to_string(),
            });
        };

        let x: f64 = x.trim().parse().map_err(|_| ParseError::BadCoordinate {
            group: group.to_string(),
            token: x.to_string(),
        })?;
        let y: f64 = y.trim().parse().map_err(|_| ParseError::BadCoordinate {
            group: group.to_string(),
            token: y.to_string(),
        })?;

        corners.push((x, y));
    }

    Ok(corners)
}

// CubiCasa drawings live in the SVG namespace; matching on the local tag
// name keeps the parser indifferent to how (or whether) it is declared.
fn is_group(node: &Node) -> bool {
    node.is_element() && node.tag_name().name() == "g"
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG_HEADER: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">"#;

    fn plan(body: &str) -> FloorPlan {
        let svg = format!("{}{}</svg>", SVG_HEADER, body);
        FloorPlan::from_svg_str(&svg).expect("fixture drawing should parse")
    }

    #[test]
    fn test_room_label_is_normalized() {
        let plan = plan(r#"<g class="Space Bath Shower"><polygon points="0,0 1,0 1,1 0,1"/></g>"#);

        assert_eq!(plan.rooms.len(), 1);
        assert_eq!(plan.rooms[0].raw_type, "bath shower");
    }

    #[test]
    fn test_group_without_polygon_is_not_a_room() {
        let plan = plan(r#"<g class="Space Bedroom"></g>"#);

        assert!(plan.rooms.is_empty());
    }

    #[test]
    fn test_only_first_polygon_is_kept() {
        let plan = plan(
            r#"<g class="Space Bedroom">
                 <polygon points="0,0 10,0 10,10 0,10"/>
                 <polygon points="100,100 200,100 200,200 100,200"/>
               </g>"#,
        );

        assert_eq!(plan.rooms.len(), 1);
        assert!((plan.rooms[0].polygon.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_points_polygon_is_skipped() {
        let plan = plan(
            r#"<g class="Space Kitchen">
                 <polygon points=""/>
                 <polygon points="0,0 10,0 10,10 0,10"/>
               </g>"#,
        );

        assert_eq!(plan.rooms.len(), 1);
        assert!((plan.rooms[0].polygon.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_space_groups_are_ignored() {
        let plan = plan(r#"<g class="Wall"><polygon points="0,0 1,0 1,1 0,1"/></g>"#);

        assert!(plan.rooms.is_empty());
    }

    #[test]
    fn test_openings_counted_by_substring() {
        let plan = plan(
            r#"<g class="Door Swing"/>
               <g class="door sliding"/>
               <g class="Window"/>"#,
        );

        assert_eq!(plan.openings, OpeningCounts { doors: 2, windows: 1 });
    }

    #[test]
    fn test_label_with_both_substrings_counts_twice() {
        let plan = plan(r#"<g class="Window Door Combo"/>"#);

        assert_eq!(plan.openings, OpeningCounts { doors: 1, windows: 1 });
    }

    #[test]
    fn test_malformed_pair_names_the_group() {
        let svg = format!(
            "{}{}</svg>",
            SVG_HEADER, r#"<g class="Space Bedroom"><polygon points="0,0 1,2,3"/></g>"#
        );

        match FloorPlan::from_svg_str(&svg) {
            Err(ParseError::BadPointPair { group, pair }) => {
                assert_eq!(group, "Space Bedroom");
                assert_eq!(pair, "1,2,3");
            }
            other => panic!("expected BadPointPair, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_coordinate_names_the_group() {
        let svg = format!(
            "{}{}</svg>",
            SVG_HEADER, r#"<g class="Space Bedroom"><polygon points="0,0 x,2"/></g>"#
        );

        match FloorPlan::from_svg_str(&svg) {
            Err(ParseError::BadCoordinate { group, token }) => {
                assert_eq!(group, "Space Bedroom");
                assert_eq!(token, "x");
            }
            other => panic!("expected BadCoordinate, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_xml_is_a_parse_error() {
        assert!(matches!(
            FloorPlan::from_svg_str("<svg><g"),
            Err(ParseError::Xml(_))
        ));
    }
}
