//! Bestpath engine: the K heaviest paths through a fixed four-relation chain.
//!
//! Given a seed relation `R(a, b, w1)` and edge relations `S(b, c, w2)`,
//! `T(c, d, w3)`, `U(d, e, w4)`, find the K paths `a → b → c → d → e` with
//! the largest `w1 + w2 + w3 + w4`, without materializing the join.
//!
//! The engine is a layered dynamic program:
//!
//! 1. **Seed**: one path state per seed row, grouped by `b`
//! 2. **Rekey**: regroup a layer by the position the next relation joins on
//! 3. **Extend**: point-lookup each edge row's key, extend every surviving path
//! 4. **GlobalMerge**: reduce the last layer to the overall K best
//!
//! Every key keeps at most K states ([`BoundedTopK`]); later extensions only
//! depend on a state's frontier position, so this pruning never loses one of
//! the true top K.
//!
//! ## Boundary
//!
//! The engine never touches storage. Rows arrive through a [`RelationReader`]
//! (see `bestpath-ingest`), which also owns identifier validation. Rows with
//! a null key or weight are skipped, never reported as errors.

pub mod engine;
mod error;
pub mod key_index;
pub mod layer;
pub mod path;
pub mod query;
pub mod reference;
pub mod stage;
pub mod topk;

pub use engine::{BestPathEngine, ChainRows, RunReport, DEFAULT_JOIN_COLUMNS, DEFAULT_RELATIONS};
pub use error::{Error, Result};
pub use key_index::{KeyIndex, NodeEntry};
pub use layer::{Layer, LayerKind};
pub use path::{BestPath, EdgeRow, PathState, PATH_EDGES, PATH_POSITIONS};
pub use query::{ChainQuery, RelationReader, RelationRequest};
pub use stage::StageStats;
pub use topk::{BoundedTopK, Weighted};
