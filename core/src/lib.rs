#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the wrapping simulation.
//!
//! This crate defines the value vocabulary that connects adapters and the
//! authoritative simulation state. Adapters submit [`Action`] values describing
//! what the robot should do, the world executes them through its `apply`
//! entry point, and then reports the outcome as [`Event`] values. Geometry and
//! cell types live in their own modules and are re-exported here.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod cell;
pub mod geometry;
pub mod script;

pub use cell::{Booster, BoosterType, Cell, InvalidCellError};
pub use geometry::{BoundingBox, Orientation, Point, PointParseError, Polygon, Rotation};
pub use script::{parse_actions, ActionParseError};

/// Actions that express every permissible robot mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Steps the robot by a unit delta along one axis.
    Move {
        /// Horizontal component of the step.
        dx: i32,
        /// Vertical component of the step.
        dy: i32,
    },
    /// Rotates the robot a quarter turn clockwise.
    TurnClockwise,
    /// Rotates the robot a quarter turn counterclockwise.
    TurnCounter,
    /// Appends a tentacle at the provided offset relative to the robot.
    Attach {
        /// Offset expressed in the robot's unrotated frame.
        location: Point,
    },
}

impl Action {
    /// Step towards increasing `y`.
    pub const MOVE_UP: Action = Action::Move { dx: 0, dy: 1 };
    /// Step towards decreasing `y`.
    pub const MOVE_DOWN: Action = Action::Move { dx: 0, dy: -1 };
    /// Step towards decreasing `x`.
    pub const MOVE_LEFT: Action = Action::Move { dx: -1, dy: 0 };
    /// Step towards increasing `x`.
    pub const MOVE_RIGHT: Action = Action::Move { dx: 1, dy: 0 };
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Move { dx: 0, dy: 1 } => write!(f, "W"),
            Action::Move { dx: 0, dy: -1 } => write!(f, "S"),
            Action::Move { dx: -1, dy: 0 } => write!(f, "A"),
            Action::Move { dx: 1, dy: 0 } => write!(f, "D"),
            Action::Move { dx, dy } => write!(f, "M({dx},{dy})"),
            Action::TurnClockwise => write!(f, "E"),
            Action::TurnCounter => write!(f, "Q"),
            Action::Attach { location } => write!(f, "B({},{})", location.x, location.y),
        }
    }
}

/// Events reported by the world after processing actions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the robot stepped between two cells.
    RobotMoved {
        /// Cell the robot occupied before moving.
        from: Point,
        /// Cell the robot occupies after the move.
        to: Point,
    },
    /// Announces the orientation reached after a turn.
    RobotTurned {
        /// Orientation the robot now faces.
        orientation: Orientation,
    },
    /// Confirms that a tentacle was appended to the robot.
    TentacleAttached {
        /// Offset of the new tentacle in the robot's unrotated frame.
        offset: Point,
    },
    /// Reports that a booster was picked up.
    BoosterCollected {
        /// Kind of booster added to the inventory.
        kind: BoosterType,
        /// Cell the booster was collected from.
        cell: Point,
    },
    /// Lists the cells newly painted by a wrap pass.
    CellsWrapped {
        /// Cells that changed to [`Cell::Wrapped`], in footprint order.
        cells: Vec<Point>,
    },
}
