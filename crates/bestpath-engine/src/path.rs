//! Path records: partial path states, emitted results, and input rows.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::topk::Weighted;

/// Number of positions in the path template (`a → b → c → d → e`).
pub const PATH_POSITIONS: usize = 5;

/// Number of weighted edges in the path template.
pub const PATH_EDGES: usize = PATH_POSITIONS - 1;

/// A partial or complete path.
///
/// Positions are filled strictly left to right: a state of depth `n` has
/// exactly `positions[..n]` set. `sum_w` is the exact sum of the weights of
/// the edges traversed so far. Extension always produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathState {
    positions: [Option<i32>; PATH_POSITIONS],
    sum_w: i64,
}

impl PathState {
    /// A depth-2 state from a seed row `(p0, p1, w1)`.
    pub fn seed(p0: i32, p1: i32, w1: i32) -> Self {
        let mut positions = [None; PATH_POSITIONS];
        positions[0] = Some(p0);
        positions[1] = Some(p1);
        Self {
            positions,
            sum_w: i64::from(w1),
        }
    }

    /// Number of populated positions.
    pub fn depth(&self) -> usize {
        self.positions.iter().take_while(|p| p.is_some()).count()
    }

    pub fn position(&self, index: usize) -> Option<i32> {
        self.positions.get(index).copied().flatten()
    }

    /// The last populated position: the value the next edge joins on.
    pub fn frontier(&self) -> Option<i32> {
        self.depth().checked_sub(1).and_then(|i| self.position(i))
    }

    pub fn sum_w(&self) -> i64 {
        self.sum_w
    }

    pub fn is_complete(&self) -> bool {
        self.depth() == PATH_POSITIONS
    }

    /// Copy of this state with the next position set to `value` and `weight`
    /// added. A complete state is returned unchanged.
    pub fn extended(&self, value: i32, weight: i32) -> Self {
        let mut next = *self;
        let depth = self.depth();
        debug_assert!(depth < PATH_POSITIONS, "extending a complete path");
        if let Some(slot) = next.positions.get_mut(depth) {
            *slot = Some(value);
            next.sum_w += i64::from(weight);
        }
        next
    }
}

impl Weighted for PathState {
    fn weight(&self) -> i64 {
        self.sum_w
    }
}

/// One complete result path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BestPath {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
    pub e: i32,
    #[serde(rename = "sumw")]
    pub sum_w: i64,
}

impl BestPath {
    pub fn positions(&self) -> [i32; PATH_POSITIONS] {
        [self.a, self.b, self.c, self.d, self.e]
    }
}

impl TryFrom<PathState> for BestPath {
    type Error = Error;

    fn try_from(state: PathState) -> Result<Self, Self::Error> {
        match state.positions {
            [Some(a), Some(b), Some(c), Some(d), Some(e)] => Ok(BestPath {
                a,
                b,
                c,
                d,
                e,
                sum_w: state.sum_w,
            }),
            _ => Err(Error::IncompletePath {
                depth: state.depth(),
            }),
        }
    }
}

/// One positional row as delivered by a relation reader.
///
/// For the seed relation this is `(p0, p1, w1)`; for the edge relations it
/// is `(join key, new position, weight)`. Nulls are carried through as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeRow {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub weight: Option<i32>,
}

impl EdgeRow {
    pub const fn new(from: Option<i32>, to: Option<i32>, weight: Option<i32>) -> Self {
        Self { from, to, weight }
    }

    /// A row with all three fields present.
    pub const fn of(from: i32, to: i32, weight: i32) -> Self {
        Self::new(Some(from), Some(to), Some(weight))
    }

    /// The `(from, to, weight)` triple, or `None` if any field is null.
    pub fn complete(&self) -> Option<(i32, i32, i32)> {
        Some((self.from?, self.to?, self.weight?))
    }
}
