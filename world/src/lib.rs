#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for the wrapping game.
//!
//! A [`State`] is built from a textual map description, after which adapters
//! drive it exclusively through [`apply`]. Every action that can expose new
//! cells under the robot finishes with a wrap pass, and all outcomes are
//! reported as [`Event`] values.

pub mod grid;
pub mod map;
pub mod robot;

use std::str::FromStr;

use tracing::{debug, trace};
use wrapper_core::{Action, Cell, Event, Point, Rotation};

pub use grid::{Grid, GridTooLarge, OutOfBounds};
pub use map::{MapDescription, ParseError};
pub use robot::{BoosterInventory, MoveError, Robot, RobotLoadout, DEFAULT_TENTACLES};

/// Reasons an action is rejected by [`apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The move delta is not a single orthogonal unit step.
    #[error("move delta ({dx}, {dy}) is not a single orthogonal step")]
    InvalidDelta {
        /// Requested horizontal delta.
        dx: i32,
        /// Requested vertical delta.
        dy: i32,
    },
    /// The robot refused the move.
    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Grid and robot evolving together under the action rules.
///
/// Cloning produces a fully independent copy suitable for speculative
/// simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    grid: Grid,
    robot: Robot,
    max_points: u64,
}

impl State {
    /// Builds a state from a map description using the default robot loadout.
    pub fn parse(description: &str) -> Result<Self, ParseError> {
        Self::parse_with_loadout(description, &RobotLoadout::default())
    }

    /// Builds a state from a map description and an explicit robot loadout.
    ///
    /// The map is rasterized, the robot placed at the declared position and a
    /// first wrap pass performed before the state is returned.
    pub fn parse_with_loadout(
        description: &str,
        loadout: &RobotLoadout,
    ) -> Result<Self, ParseError> {
        let description = MapDescription::from_str(description)?;
        Self::from_description(&description, loadout)
    }

    /// Rasterizes an already parsed map description.
    pub fn from_description(
        description: &MapDescription,
        loadout: &RobotLoadout,
    ) -> Result<Self, ParseError> {
        let bbox = description
            .outer
            .bounding_box()
            .ok_or(ParseError::EmptyMap)?;
        // TODO: translate maps whose bounding box is offset from the origin.
        if bbox.min != Point::new(0, 0) {
            return Err(ParseError::NotAnchored(bbox.min));
        }
        let rows = bbox.height();
        let cols = bbox.width();
        if rows == 0 || cols == 0 {
            return Err(ParseError::EmptyMap);
        }

        let mut grid = Grid::filled_void(rows, cols)?;
        grid.project([&description.outer], Cell::Free);
        grid.project(&description.obstacles, Cell::Obstacle);
        for booster in &description.boosters {
            let cell = grid
                .get(booster.location)
                .ok_or(ParseError::BoosterOutOfBounds(*booster))?;
            if cell.is_obstacle() {
                return Err(ParseError::BoosterBlocked {
                    booster: *booster,
                    cell,
                });
            }
            let _ = grid.set(booster.location, booster.kind.to_cell());
        }

        let start = description.start;
        if grid.get(start).map_or(true, Cell::is_obstacle) {
            return Err(ParseError::InvalidStart(start));
        }

        let mut state = Self {
            grid,
            robot: Robot::new(start, loadout),
            max_points: max_points(rows, cols),
        };
        let wrapped = state.wrap();
        debug!(
            rows,
            cols,
            obstacles = description.obstacles.len(),
            boosters = description.boosters.len(),
            wrapped = wrapped.len(),
            "map rasterized"
        );
        Ok(state)
    }

    /// Paints every wrapable cell under the robot, returning the changed cells.
    pub fn wrap(&mut self) -> Vec<Point> {
        self.robot.wrap(&mut self.grid)
    }

    /// Scoring budget derived from the grid area.
    #[must_use]
    pub const fn max_points(&self) -> u64 {
        self.max_points
    }
}

impl FromStr for State {
    type Err = ParseError;

    fn from_str(description: &str) -> Result<Self, Self::Err> {
        Self::parse(description)
    }
}

fn max_points(rows: u32, cols: u32) -> u64 {
    let area = f64::from(rows) * f64::from(cols);
    // Area is at least one cell, so the logarithm is finite and non-negative.
    (1000.0 * area.log2()).ceil() as u64
}

/// Applies the provided action to the state, mutating it deterministically.
///
/// Rejected actions leave the state untouched and emit no events.
pub fn apply(
    state: &mut State,
    action: Action,
    out_events: &mut Vec<Event>,
) -> Result<(), ActionError> {
    trace!(%action, "applying action");
    match action {
        Action::Move { dx, dy } => {
            let delta = Point::new(dx, dy);
            if delta.manhattan_distance(Point::new(0, 0)) != 1 {
                return Err(ActionError::InvalidDelta { dx, dy });
            }
            let from = state.robot.position();
            let to = from + delta;
            let collected = state.robot.move_to(&mut state.grid, to)?;
            out_events.push(Event::RobotMoved { from, to });
            if let Some(kind) = collected {
                debug!(%kind, x = to.x, y = to.y, "booster collected");
                out_events.push(Event::BoosterCollected { kind, cell: to });
            }
            wrap_into(state, out_events);
        }
        Action::TurnClockwise => turn(state, Rotation::Clockwise, out_events),
        Action::TurnCounter => turn(state, Rotation::Counterclockwise, out_events),
        Action::Attach { location } => {
            state.robot.attach(location);
            out_events.push(Event::TentacleAttached { offset: location });
        }
    }
    Ok(())
}

fn turn(state: &mut State, rotation: Rotation, out_events: &mut Vec<Event>) {
    state.robot.rotate(rotation);
    out_events.push(Event::RobotTurned {
        orientation: state.robot.orientation(),
    });
    wrap_into(state, out_events);
}

fn wrap_into(state: &mut State, out_events: &mut Vec<Event>) {
    let cells = state.wrap();
    if !cells.is_empty() {
        out_events.push(Event::CellsWrapped { cells });
    }
}

/// Query functions that provide read-only access to the state.
pub mod query {
    use serde::Serialize;
    use wrapper_core::Cell;

    use super::{Grid, Robot, State};

    /// Provides read-only access to the grid.
    #[must_use]
    pub fn grid(state: &State) -> &Grid {
        &state.grid
    }

    /// Provides read-only access to the robot.
    #[must_use]
    pub fn robot(state: &State) -> &Robot {
        &state.robot
    }

    /// Scoring budget derived from the grid area.
    #[must_use]
    pub fn max_points(state: &State) -> u64 {
        state.max_points
    }

    /// Counts wrapped cells and cells still awaiting a wrap.
    #[must_use]
    pub fn coverage(state: &State) -> Coverage {
        Coverage {
            wrapped: state.grid.count(|cell| cell == Cell::Wrapped),
            remaining: state.grid.count(Cell::is_wrapable),
        }
    }

    /// Reports whether no wrapable cell remains on the grid.
    #[must_use]
    pub fn is_complete(state: &State) -> bool {
        coverage(state).remaining == 0
    }

    /// Wrap progress over the whole grid.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
    pub struct Coverage {
        /// Cells already wrapped.
        pub wrapped: usize,
        /// Cells that a wrap pass would still paint.
        pub remaining: usize,
    }
}
