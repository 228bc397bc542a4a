//! Robot footprint, inventory and movement rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wrapper_core::{BoosterType, Cell, Orientation, Point, Rotation};

use crate::grid::Grid;

/// Tentacle offsets every robot starts with unless configured otherwise.
pub const DEFAULT_TENTACLES: [Point; 3] = [Point::new(1, 0), Point::new(1, 1), Point::new(1, -1)];

/// Initial body configuration applied to a freshly placed robot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotLoadout {
    /// Tentacle offsets expressed in the robot's unrotated frame.
    pub tentacles: Vec<Point>,
    /// Orientation the robot faces after placement.
    pub orientation: Orientation,
}

impl Default for RobotLoadout {
    fn default() -> Self {
        Self {
            tentacles: DEFAULT_TENTACLES.to_vec(),
            orientation: Orientation::Right,
        }
    }
}

/// Per-kind counts of collected boosters.
///
/// Every collectible kind is always present, including those never collected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoosterInventory {
    counts: BTreeMap<BoosterType, u32>,
}

impl BoosterInventory {
    fn empty() -> Self {
        Self {
            counts: BoosterType::COLLECTIBLE
                .into_iter()
                .map(|kind| (kind, 0))
                .collect(),
        }
    }

    /// Number of boosters of `kind` held.
    #[must_use]
    pub fn count(&self, kind: BoosterType) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Iterates the counts of every collectible kind in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (BoosterType, u32)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

    fn add(&mut self, kind: BoosterType) {
        let count = self.counts.entry(kind).or_insert(0);
        *count = count.saturating_add(1);
    }
}

/// Reasons a robot refuses to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The destination lies outside the grid.
    #[error("destination ({}, {}) lies outside the grid", .destination.x, .destination.y)]
    OutOfBounds {
        /// Requested destination.
        destination: Point,
    },
    /// The destination holds an obstacle or lies outside the map.
    #[error("destination ({}, {}) is blocked by {cell:?}", .destination.x, .destination.y)]
    Blocked {
        /// Requested destination.
        destination: Point,
        /// Contents of the blocked cell.
        cell: Cell,
    },
    /// The destination is not a single orthogonal step away.
    #[error(
        "destination ({}, {}) is not adjacent to ({}, {})",
        .destination.x, .destination.y, .from.x, .from.y
    )]
    NotAdjacent {
        /// Position the robot occupies.
        from: Point,
        /// Requested destination.
        destination: Point,
    },
}

/// Robot body moving across the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Robot {
    position: Point,
    tentacles: Vec<Point>,
    orientation: Orientation,
    boosters: BoosterInventory,
}

impl Robot {
    /// Places a robot at `position` using the provided loadout.
    #[must_use]
    pub fn new(position: Point, loadout: &RobotLoadout) -> Self {
        Self {
            position,
            tentacles: loadout.tentacles.clone(),
            orientation: loadout.orientation,
            boosters: BoosterInventory::empty(),
        }
    }

    /// Cell the robot body occupies.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Tentacle offsets in the robot's unrotated frame, in attachment order.
    #[must_use]
    pub fn tentacles(&self) -> &[Point] {
        &self.tentacles
    }

    /// Orientation the robot faces.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Boosters collected so far.
    #[must_use]
    pub const fn boosters(&self) -> &BoosterInventory {
        &self.boosters
    }

    /// Cells currently covered by the robot: its body followed by each
    /// tentacle rotated into the current orientation.
    ///
    /// Tentacles whose absolute cell does not fit in `i32` lie outside any
    /// grid and are omitted.
    #[must_use]
    pub fn parts(&self) -> Vec<Point> {
        std::iter::once(self.position)
            .chain(self.tentacles.iter().filter_map(|tentacle| {
                tentacle
                    .checked_rotate(self.orientation)?
                    .checked_add(self.position)
            }))
            .collect()
    }

    /// Steps onto an orthogonally adjacent, traversable cell.
    ///
    /// A booster found at the destination is collected and its cell reverts
    /// to [`Cell::Free`]. Nothing is mutated when the move is rejected.
    pub fn move_to(
        &mut self,
        grid: &mut Grid,
        destination: Point,
    ) -> Result<Option<BoosterType>, MoveError> {
        let cell = grid
            .get(destination)
            .ok_or(MoveError::OutOfBounds { destination })?;
        if cell.is_obstacle() {
            return Err(MoveError::Blocked { destination, cell });
        }
        if !self.position.is_adjacent(destination) {
            return Err(MoveError::NotAdjacent {
                from: self.position,
                destination,
            });
        }

        self.position = destination;

        let Ok(kind) = BoosterType::try_from(cell) else {
            return Ok(None);
        };
        self.boosters.add(kind);
        let _ = grid.set(destination, Cell::Free);
        Ok(Some(kind))
    }

    /// Paints every in-bounds, wrapable cell under the robot.
    ///
    /// Returns the cells that changed; parts outside the grid are skipped.
    pub fn wrap(&self, grid: &mut Grid) -> Vec<Point> {
        let mut wrapped = Vec::new();
        for part in self.parts() {
            let Some(cell) = grid.get(part) else {
                continue;
            };
            if cell.is_wrapable() && grid.set(part, Cell::Wrapped).is_ok() {
                wrapped.push(part);
            }
        }
        wrapped
    }

    /// Turns the robot a quarter turn; tentacle offsets are left untouched.
    pub fn rotate(&mut self, rotation: Rotation) {
        self.orientation = self.orientation.rotated(rotation);
    }

    /// Appends a tentacle at `offset`.
    pub fn attach(&mut self, offset: Point) {
        self.tentacles.push(offset);
    }
}
