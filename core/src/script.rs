//! Text encoding of action sequences.
//!
//! Cardinal moves are `W`, `S`, `A`, `D`, turns are `E` (clockwise) and `Q`
//! (counterclockwise), and `B(dx,dy)` attaches a tentacle. Whitespace between
//! actions is ignored.

use crate::{geometry::Point, Action};

/// Reasons an action script may fail to parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    /// A letter outside the supported vocabulary was encountered.
    #[error("unsupported action `{letter}` at byte {offset}")]
    UnsupportedAction {
        /// Offending character.
        letter: char,
        /// Byte offset of the character within the script.
        offset: usize,
    },
    /// An attach action was not followed by a well-formed `(dx,dy)` offset.
    #[error("malformed attach offset at byte {offset}")]
    MalformedOffset {
        /// Byte offset of the attach letter within the script.
        offset: usize,
    },
}

/// Parses an action script into the actions it encodes.
pub fn parse_actions(script: &str) -> Result<Vec<Action>, ActionParseError> {
    let mut actions = Vec::new();
    let mut rest = script.char_indices().peekable();

    while let Some((offset, letter)) = rest.next() {
        let action = match letter {
            'W' => Action::MOVE_UP,
            'S' => Action::MOVE_DOWN,
            'A' => Action::MOVE_LEFT,
            'D' => Action::MOVE_RIGHT,
            'E' => Action::TurnClockwise,
            'Q' => Action::TurnCounter,
            'B' => {
                let start = offset + letter.len_utf8();
                let end = script[start..]
                    .find(')')
                    .map(|index| start + index + 1)
                    .ok_or(ActionParseError::MalformedOffset { offset })?;
                let location = script[start..end]
                    .parse::<Point>()
                    .map_err(|_| ActionParseError::MalformedOffset { offset })?;
                while rest.next_if(|&(index, _)| index < end).is_some() {}
                Action::Attach { location }
            }
            other if other.is_whitespace() => continue,
            other => {
                return Err(ActionParseError::UnsupportedAction {
                    letter: other,
                    offset,
                })
            }
        };
        actions.push(action);
    }

    Ok(actions)
}
