//! Keystroke interpretation.
//!
//! ```text
//! key ──→ Command ──→ interpret(store) ──→ Transition ──→ console / publisher
//! ```
//!
//! [`Command::from_key`] is pure; [`interpret`] is the only place the joint
//! store is mutated in response to input. Whether a transition must be
//! published is a property of the transition, so the loop decides I/O
//! without re-inspecting the key.

use crate::joints::JointStore;

/// Direction of a position adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Decrease,
    Increase,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Decrease => -1.0,
            Direction::Increase => 1.0,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Decrease => '-',
            Direction::Increase => '+',
        }
    }
}

/// Operator command decoded from a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select the joint at this zero-based index. Only produced for indices
    /// that exist.
    Select(usize),
    Adjust(Direction),
    Quit,
    /// Unmapped key.
    Ignore,
}

impl Command {
    /// Decode `key` for a layout of `joint_count` joints.
    ///
    /// Digits `1..=9` select joints, but only up to `joint_count`; any other
    /// digit (including `0`) is ignored.
    pub fn from_key(key: char, joint_count: usize) -> Self {
        match key {
            'a' => Command::Adjust(Direction::Decrease),
            'd' => Command::Adjust(Direction::Increase),
            'q' => Command::Quit,
            '1'..='9' => {
                let index = key as usize - '1' as usize;
                if index < joint_count {
                    Command::Select(index)
                } else {
                    Command::Ignore
                }
            }
            _ => Command::Ignore,
        }
    }
}

/// What a command did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Selected {
        index: usize,
        name: String,
        position: f64,
    },
    Adjusted {
        direction: Direction,
        index: usize,
        name: String,
        position: f64,
    },
    Quit,
    NoOp,
}

impl Transition {
    /// True when the joint-position vector changed and must go out.
    pub fn publishes(&self) -> bool {
        matches!(self, Transition::Adjusted { .. })
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Transition::Quit)
    }
}

/// Apply `command` to `store`, stepping by `step` on adjustments.
pub fn interpret(store: &mut JointStore, command: Command, step: f64) -> Transition {
    match command {
        Command::Select(index) => match store.select(index) {
            Ok(joint) => Transition::Selected {
                index: joint.index,
                name: joint.name.to_string(),
                position: joint.position,
            },
            // from_key never yields an index past the layout; a hand-built
            // command that does is treated like any other unmapped key.
            Err(_) => Transition::NoOp,
        },
        Command::Adjust(direction) => {
            let position = store.adjust(direction.sign() * step);
            let joint = store.selected();
            Transition::Adjusted {
                direction,
                index: joint.index,
                name: joint.name.to_string(),
                position,
            }
        }
        Command::Quit => Transition::Quit,
        Command::Ignore => Transition::NoOp,
    }
}
