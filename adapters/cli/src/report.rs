use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use wrapper_core::{Orientation, Point};
use wrapper_world::{query, State};

/// Snapshot of a simulation printed once the action script finishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Summary {
    position: Point,
    orientation: Orientation,
    tentacles: usize,
    coverage: query::Coverage,
    complete: bool,
    max_points: u64,
    boosters: BTreeMap<String, u32>,
    actions_applied: usize,
}

impl Summary {
    /// Captures the observable outcome of `state` after `actions_applied` actions.
    pub(crate) fn capture(state: &State, actions_applied: usize) -> Self {
        let robot = query::robot(state);
        Self {
            position: robot.position(),
            orientation: robot.orientation(),
            tentacles: robot.tentacles().len(),
            coverage: query::coverage(state),
            complete: query::is_complete(state),
            max_points: query::max_points(state),
            boosters: robot
                .boosters()
                .iter()
                .map(|(kind, count)| (kind.to_string(), count))
                .collect(),
            actions_applied,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "actions applied: {}", self.actions_applied)?;
        writeln!(f, "position: ({}, {})", self.position.x, self.position.y)?;
        writeln!(f, "orientation: {:?}", self.orientation)?;
        writeln!(f, "tentacles: {}", self.tentacles)?;
        writeln!(
            f,
            "coverage: {} wrapped, {} remaining{}",
            self.coverage.wrapped,
            self.coverage.remaining,
            if self.complete { " (complete)" } else { "" }
        )?;
        writeln!(f, "max points: {}", self.max_points)?;
        write!(f, "boosters:")?;
        for (kind, count) in &self.boosters {
            write!(f, " {kind}={count}")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_summary_lists_every_collectible_kind() {
        let state = State::parse("(0,0),(3,0),(3,3),(0,3)#(1,1)##").expect("map parses");
        let summary = Summary::capture(&state, 0);
        let text = summary.to_string();

        assert!(text.contains("position: (1, 1)"), "{text}");
        assert!(text.contains("orientation: Right"), "{text}");
        assert!(text.contains("coverage: 4 wrapped, 5 remaining\n"), "{text}");
        assert!(text.ends_with("boosters: B=0 C=0 F=0 L=0 R=0\n"), "{text}");
    }

    #[test]
    fn json_summary_exposes_coverage_fields() {
        let state = State::parse("(0,0),(2,0),(2,1),(0,1)#(0,0)##").expect("map parses");
        let value = serde_json::to_value(Summary::capture(&state, 3)).expect("serializes");

        assert_eq!(value["position"]["x"], 0);
        assert_eq!(value["orientation"], "right");
        assert_eq!(value["coverage"]["wrapped"], 2);
        assert_eq!(value["coverage"]["remaining"], 0);
        assert_eq!(value["complete"], true);
        assert_eq!(value["actions_applied"], 3);
    }
}
