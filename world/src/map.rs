//! Parsing of textual map descriptions.
//!
//! A description holds four `#`-separated fields: the outer boundary polygon,
//! the robot's initial position, `;`-separated obstacle polygons and
//! `;`-separated booster declarations such as `B(3,4)`.

use std::str::FromStr;

use wrapper_core::{Booster, BoosterType, Cell, Point, PointParseError, Polygon};

use crate::grid::GridTooLarge;

const FIELD_DELIMITER: char = '#';
const LIST_DELIMITER: char = ';';

/// Errors that reject a map description before any state is built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The description did not split into exactly four fields.
    #[error("map description has {0} `#`-separated fields, expected 4")]
    FieldCount(usize),
    /// A point literal could not be parsed.
    #[error(transparent)]
    Point(#[from] PointParseError),
    /// A polygon declared fewer than three vertices.
    #[error("polygon `{0}` needs at least three vertices")]
    DegeneratePolygon(String),
    /// A booster declaration was malformed.
    #[error("malformed booster `{0}`")]
    Booster(String),
    /// The outer boundary's bounding box does not start at the origin.
    #[error("map bounding box starts at ({}, {}), expected the origin", .0.x, .0.y)]
    NotAnchored(Point),
    /// The outer boundary encloses no cells.
    #[error("map boundary encloses no cells")]
    EmptyMap,
    /// The outer boundary spans more cells than can be allocated.
    #[error("map boundary of {} x {} cells is too large", .0.cols, .0.rows)]
    MapTooLarge(#[from] GridTooLarge),
    /// A booster was declared outside the grid.
    #[error("booster {} at ({}, {}) lies outside the map", .0.kind, .0.location.x, .0.location.y)]
    BoosterOutOfBounds(Booster),
    /// A booster was declared on a cell the robot can never enter.
    #[error(
        "booster {} at ({}, {}) is placed on {cell:?}",
        .booster.kind, .booster.location.x, .booster.location.y
    )]
    BoosterBlocked {
        /// Offending declaration.
        booster: Booster,
        /// Cell rasterized under the booster.
        cell: Cell,
    },
    /// The initial position is outside the grid or not traversable.
    #[error("initial position ({}, {}) is not a traversable cell", .0.x, .0.y)]
    InvalidStart(Point),
}

/// Parsed, not yet rasterized, map description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapDescription {
    /// Outer boundary of the playable area.
    pub outer: Polygon,
    /// Initial robot position.
    pub start: Point,
    /// Obstacle outlines carved out of the playable area.
    pub obstacles: Vec<Polygon>,
    /// Boosters placed on the map.
    pub boosters: Vec<Booster>,
}

impl FromStr for MapDescription {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = value.trim().split(FIELD_DELIMITER).collect();
        let [outer, start, obstacles, boosters] = fields[..] else {
            return Err(ParseError::FieldCount(fields.len()));
        };

        Ok(Self {
            outer: parse_polygon(outer)?,
            start: start.parse()?,
            obstacles: split_list(obstacles)
                .map(parse_polygon)
                .collect::<Result<_, _>>()?,
            boosters: split_list(boosters)
                .map(parse_booster)
                .collect::<Result<_, _>>()?,
        })
    }
}

fn split_list(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Parses a `(x,y),(x,y),...` vertex list.
pub fn parse_polygon(value: &str) -> Result<Polygon, ParseError> {
    let mut vertices = Vec::new();
    let mut rest = value.trim();

    while !rest.is_empty() {
        let end = rest
            .find(')')
            .ok_or_else(|| PointParseError(rest.to_owned()))?;
        vertices.push(rest[..=end].parse::<Point>()?);
        rest = rest[end + 1..].trim_start();
        if let Some(tail) = rest.strip_prefix(',') {
            rest = tail.trim_start();
        }
    }

    if vertices.len() < 3 {
        return Err(ParseError::DegeneratePolygon(value.to_owned()));
    }
    Ok(Polygon::new(vertices))
}

/// Parses a `<letter>(x,y)` booster declaration.
pub fn parse_booster(value: &str) -> Result<Booster, ParseError> {
    let value = value.trim();
    let mut chars = value.chars();
    let kind = chars
        .next()
        .and_then(BoosterType::from_letter)
        .ok_or_else(|| ParseError::Booster(value.to_owned()))?;
    let location = chars
        .as_str()
        .parse::<Point>()
        .map_err(|_| ParseError::Booster(value.to_owned()))?;
    Ok(Booster::new(kind, location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_four_fields() {
        let description: MapDescription =
            "(0,0),(6,0),(6,4),(0,4)#(1,1)#(2,2),(3,2),(3,3);(4,1),(5,1),(5,2),(4,2)#B(0,3);X(5,3)"
                .parse()
                .expect("description parses");

        assert_eq!(description.outer.vertices().len(), 4);
        assert_eq!(description.start, Point::new(1, 1));
        assert_eq!(description.obstacles.len(), 2);
        assert_eq!(description.obstacles[0].vertices().len(), 3);
        assert_eq!(
            description.boosters,
            vec![
                Booster::new(BoosterType::B, Point::new(0, 3)),
                Booster::new(BoosterType::X, Point::new(5, 3)),
            ]
        );
    }

    #[test]
    fn empty_obstacle_and_booster_fields_are_allowed() {
        let description: MapDescription = "(0,0),(3,0),(3,3),(0,3)#(1,1)##\n"
            .parse()
            .expect("description parses");
        assert!(description.obstacles.is_empty());
        assert!(description.boosters.is_empty());
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            "(0,0),(3,0),(3,3)#(1,1)#".parse::<MapDescription>(),
            Err(ParseError::FieldCount(3))
        );
        assert_eq!(
            "a#b#c#d#e".parse::<MapDescription>(),
            Err(ParseError::FieldCount(5))
        );
    }

    #[test]
    fn rejects_malformed_points() {
        assert!(matches!(
            "(0,0),(3,0),(3,3)#(1;1)##".parse::<MapDescription>(),
            Err(ParseError::Point(_))
        ));
        assert!(matches!(
            parse_polygon("(0,0),(3,0),(3,3"),
            Err(ParseError::Point(_))
        ));
    }

    #[test]
    fn rejects_degenerate_polygons() {
        assert_eq!(
            parse_polygon("(0,0),(3,0)"),
            Err(ParseError::DegeneratePolygon("(0,0),(3,0)".to_owned()))
        );
    }

    #[test]
    fn rejects_unknown_booster_letters() {
        assert_eq!(
            parse_booster("Z(1,1)"),
            Err(ParseError::Booster("Z(1,1)".to_owned()))
        );
        assert_eq!(
            parse_booster("B1,1"),
            Err(ParseError::Booster("B1,1".to_owned()))
        );
    }
}
