use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use wrapper_core::{parse_actions, Action, Event, Orientation, Point};
use wrapper_world::{self as world, query, State};

const MAP: &str = "(0,0),(8,0),(8,6),(0,6)#(1,1)#(3,2),(5,2),(5,4),(3,4)#B(1,4);F(6,1);L(7,5);X(0,5)";
const SCRIPT: &str = "WWWDDDDEB(1,2)SSSQAAAA";

#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let first = replay(State::parse(MAP).expect("map parses"), &scripted_actions());
    let second = replay(State::parse(MAP).expect("map parses"), &scripted_actions());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(
        first
            .events
            .iter()
            .any(|event| matches!(event, Event::BoosterCollected { .. })),
        "script should collect at least one booster"
    );
}

#[test]
fn replay_from_clone_matches_replay_from_parse() {
    let actions = scripted_actions();
    let (head, tail) = actions.split_at(6);

    let mut state = State::parse(MAP).expect("map parses");
    let mut events = Vec::new();
    for action in head {
        world::apply(&mut state, *action, &mut events).expect("scripted action is legal");
    }

    let branch = replay(state.clone(), tail);
    let trunk = replay(state, tail);
    assert_eq!(branch, trunk);
}

#[test]
fn replay_ends_in_expected_pose() {
    let outcome = replay(State::parse(MAP).expect("map parses"), &scripted_actions());
    assert_eq!(outcome.position, Point::new(1, 1));
    assert_eq!(outcome.orientation, Orientation::Right);
    assert_eq!(outcome.tentacles, 4);
}

fn scripted_actions() -> Vec<Action> {
    parse_actions(SCRIPT).expect("script parses")
}

fn replay(mut state: State, actions: &[Action]) -> ReplayOutcome {
    let mut events = Vec::new();
    for action in actions {
        world::apply(&mut state, *action, &mut events).expect("scripted action is legal");
    }

    let robot = query::robot(&state);
    ReplayOutcome {
        position: robot.position(),
        orientation: robot.orientation(),
        tentacles: robot.tentacles().len(),
        boosters: robot.boosters().iter().collect(),
        grid: query::grid(&state).to_string(),
        events,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    position: Point,
    orientation: Orientation,
    tentacles: usize,
    boosters: Vec<(wrapper_core::BoosterType, u32)>,
    grid: String,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
