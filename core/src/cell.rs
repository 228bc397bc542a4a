//! Closed vocabulary of grid cell contents and booster kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Contents of a single grid cell.
///
/// Each variant is stored as its one-byte map tag so a grid row can be
/// rendered by copying bytes. Adding a variant requires updating
/// [`Cell::is_obstacle`], [`Cell::is_wrapable`] and [`Cell::is_booster`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    /// Traversable cell that has not been wrapped yet.
    Free = b' ',
    /// Traversable cell already covered by the robot.
    Wrapped = b'W',
    /// Obstacle carved out of the map interior.
    Obstacle = b'O',
    /// Area outside the playable map boundary.
    Void = b'V',
    /// Static spawn marker; not collectible.
    SpawnPoint = b'X',
    /// Manipulator extension booster.
    Extension = b'B',
    /// Fast wheels booster.
    FastWheels = b'F',
    /// Drill booster.
    Drill = b'L',
    /// Teleport booster.
    Teleport = b'T',
    /// Clone booster.
    Clone = b'C',
}

impl Cell {
    /// Every cell variant in declaration order.
    pub const ALL: [Cell; 10] = [
        Cell::Free,
        Cell::Wrapped,
        Cell::Obstacle,
        Cell::Void,
        Cell::SpawnPoint,
        Cell::Extension,
        Cell::FastWheels,
        Cell::Drill,
        Cell::Teleport,
        Cell::Clone,
    ];

    /// Reports whether the robot can never enter the cell.
    #[must_use]
    pub const fn is_obstacle(self) -> bool {
        match self {
            Cell::Obstacle | Cell::Void => true,
            Cell::Free
            | Cell::Wrapped
            | Cell::SpawnPoint
            | Cell::Extension
            | Cell::FastWheels
            | Cell::Drill
            | Cell::Teleport
            | Cell::Clone => false,
        }
    }

    /// Reports whether a wrap pass would paint the cell.
    #[must_use]
    pub const fn is_wrapable(self) -> bool {
        match self {
            Cell::Obstacle | Cell::Void | Cell::Wrapped => false,
            Cell::Free
            | Cell::SpawnPoint
            | Cell::Extension
            | Cell::FastWheels
            | Cell::Drill
            | Cell::Teleport
            | Cell::Clone => true,
        }
    }

    /// Reports whether the cell holds a collectible booster.
    #[must_use]
    pub const fn is_booster(self) -> bool {
        match self {
            Cell::Extension | Cell::FastWheels | Cell::Drill | Cell::Teleport | Cell::Clone => {
                true
            }
            Cell::Free | Cell::Wrapped | Cell::Obstacle | Cell::Void | Cell::SpawnPoint => false,
        }
    }

    /// One-byte map tag of the cell.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Decodes a map tag, returning `None` for unknown bytes.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Cell> {
        Cell::ALL.into_iter().find(|cell| cell.as_byte() == byte)
    }
}

/// Kinds of boosters that can appear in a map description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BoosterType {
    /// Manipulator extension.
    B,
    /// Fast wheels.
    F,
    /// Drill.
    L,
    /// Spawn point marker. Placed on the map but never collected.
    X,
    /// Teleport.
    R,
    /// Clone.
    C,
}

impl BoosterType {
    /// Booster kinds that a robot can hold in its inventory.
    pub const COLLECTIBLE: [BoosterType; 5] = [
        BoosterType::B,
        BoosterType::F,
        BoosterType::L,
        BoosterType::R,
        BoosterType::C,
    ];

    /// Cell written into the grid when the booster is placed.
    #[must_use]
    pub const fn to_cell(self) -> Cell {
        match self {
            BoosterType::B => Cell::Extension,
            BoosterType::F => Cell::FastWheels,
            BoosterType::L => Cell::Drill,
            BoosterType::X => Cell::SpawnPoint,
            BoosterType::R => Cell::Teleport,
            BoosterType::C => Cell::Clone,
        }
    }

    /// Letter used for the booster in map descriptions.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            BoosterType::B => 'B',
            BoosterType::F => 'F',
            BoosterType::L => 'L',
            BoosterType::X => 'X',
            BoosterType::R => 'R',
            BoosterType::C => 'C',
        }
    }

    /// Resolves a map description letter.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<BoosterType> {
        match letter {
            'B' => Some(BoosterType::B),
            'F' => Some(BoosterType::F),
            'L' => Some(BoosterType::L),
            'X' => Some(BoosterType::X),
            'R' => Some(BoosterType::R),
            'C' => Some(BoosterType::C),
            _ => None,
        }
    }
}

impl fmt::Display for BoosterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<Cell> for BoosterType {
    type Error = InvalidCellError;

    fn try_from(cell: Cell) -> Result<Self, Self::Error> {
        match cell {
            Cell::Extension => Ok(BoosterType::B),
            Cell::FastWheels => Ok(BoosterType::F),
            Cell::Drill => Ok(BoosterType::L),
            Cell::Teleport => Ok(BoosterType::R),
            Cell::Clone => Ok(BoosterType::C),
            Cell::Free | Cell::Wrapped | Cell::Obstacle | Cell::Void | Cell::SpawnPoint => {
                Err(InvalidCellError(cell))
            }
        }
    }
}

/// Raised when a non-booster cell is converted into a [`BoosterType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cell {0:?} does not hold a collectible booster")]
pub struct InvalidCellError(pub Cell);

/// Booster declared at a map location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Booster {
    /// Kind of booster.
    pub kind: BoosterType,
    /// Cell the booster occupies.
    pub location: Point,
}

impl Booster {
    /// Creates a booster declaration.
    #[must_use]
    pub const fn new(kind: BoosterType, location: Point) -> Self {
        Self { kind, location }
    }
}
