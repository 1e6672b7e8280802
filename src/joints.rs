//! Joint state store: names, target positions and the selection cursor.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::error::TeleopError;

/// Joint names of the default 8-axis arm layout.
pub const DEFAULT_JOINT_NAMES: [&str; 8] = [
    "right_j0", "head_pan", "right_j1", "right_j2", "right_j3", "right_j4", "right_j5", "right_j6",
];

/// Reasons a joint layout cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("at least one joint is required")]
    Empty,
    #[error("{names} joint names but {positions} initial positions")]
    LengthMismatch { names: usize, positions: usize },
    #[error("joint names must not be empty")]
    BlankName,
    #[error("duplicate joint name '{0}'")]
    DuplicateName(String),
}

/// Ordered joint names and positions plus the index adjustments apply to.
///
/// The number of joints and their names are fixed at construction. Positions
/// are unbounded: no clamping to physical limits happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct JointStore {
    names: Arc<[String]>,
    positions: Vec<f64>,
    cursor: usize,
}

/// Consistent copy of the store taken after one mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct JointSnapshot {
    pub names: Arc<[String]>,
    pub positions: Vec<f64>,
}

/// A joint as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointView<'a> {
    pub index: usize,
    pub name: &'a str,
    pub position: f64,
}

impl JointStore {
    /// Build a store with every joint at `0.0`.
    pub fn new<I, S>(names: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let positions = vec![0.0; names.len()];
        Self::with_positions(names, positions)
    }

    /// Build a store with explicit starting positions.
    pub fn with_positions(names: Vec<String>, positions: Vec<f64>) -> Result<Self, LayoutError> {
        if names.is_empty() {
            return Err(LayoutError::Empty);
        }
        if names.len() != positions.len() {
            return Err(LayoutError::LengthMismatch {
                names: names.len(),
                positions: positions.len(),
            });
        }
        let mut seen = HashSet::new();
        for name in &names {
            if name.trim().is_empty() {
                return Err(LayoutError::BlankName);
            }
            if !seen.insert(name.as_str()) {
                return Err(LayoutError::DuplicateName(name.clone()));
            }
        }

        Ok(Self {
            names: names.into(),
            positions,
            cursor: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The currently selected joint.
    pub fn selected(&self) -> JointView<'_> {
        self.view(self.cursor)
    }

    /// Move the cursor to `index` and return the joint now selected.
    pub fn select(&mut self, index: usize) -> Result<JointView<'_>, TeleopError> {
        if index >= self.len() {
            return Err(TeleopError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        self.cursor = index;
        Ok(self.view(index))
    }

    /// Add `delta` to the selected joint and return its new position.
    pub fn adjust(&mut self, delta: f64) -> f64 {
        let position = &mut self.positions[self.cursor];
        *position += delta;
        *position
    }

    pub fn snapshot(&self) -> JointSnapshot {
        JointSnapshot {
            names: Arc::clone(&self.names),
            positions: self.positions.clone(),
        }
    }

    fn view(&self, index: usize) -> JointView<'_> {
        JointView {
            index,
            name: &self.names[index],
            position: self.positions[index],
        }
    }
}

impl Default for JointStore {
    fn default() -> Self {
        Self {
            names: DEFAULT_JOINT_NAMES.iter().map(|n| n.to_string()).collect(),
            positions: vec![0.0; DEFAULT_JOINT_NAMES.len()],
            cursor: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_has_eight_joints_at_zero() {
        let store = JointStore::default();
        assert_eq!(store.len(), 8);
        assert_eq!(store.names()[1], "head_pan");
        assert!(store.positions().iter().all(|p| *p == 0.0));
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn select_moves_cursor_without_touching_positions() {
        let mut store = JointStore::default();
        store.adjust(0.5);
        let before = store.positions().to_vec();

        let joint = store.select(4).unwrap();
        assert_eq!(joint.index, 4);
        assert_eq!(joint.name, "right_j3");
        assert_eq!(store.cursor(), 4);
        assert_eq!(store.positions(), before.as_slice());
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut store = JointStore::new(["a", "b"]).unwrap();
        match store.select(2) {
            Err(TeleopError::OutOfRange { index, len }) => {
                assert_eq!(index, 2);
                assert_eq!(len, 2);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn adjust_is_unclamped() {
        let mut store = JointStore::new(["a"]).unwrap();
        assert_eq!(store.adjust(-1000.0), -1000.0);
        assert_eq!(store.adjust(1e9), 1e9 - 1000.0);
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let mut store = JointStore::new(["a", "b"]).unwrap();
        store.adjust(0.25);
        let snapshot = store.snapshot();
        store.adjust(0.25);

        assert_eq!(snapshot.positions, vec![0.25, 0.0]);
        assert_eq!(&*snapshot.names, &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn construction_validates_names_and_positions() {
        assert_eq!(
            JointStore::new(Vec::<String>::new()).unwrap_err(),
            LayoutError::Empty
        );
        assert_eq!(
            JointStore::new(["a", "a"]).unwrap_err(),
            LayoutError::DuplicateName("a".to_string())
        );
        assert_eq!(JointStore::new(["a", " "]).unwrap_err(), LayoutError::BlankName);
        assert_eq!(
            JointStore::with_positions(vec!["a".into()], vec![0.0, 1.0]).unwrap_err(),
            LayoutError::LengthMismatch {
                names: 1,
                positions: 2
            }
        );
    }
}
