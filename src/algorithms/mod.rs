//! Subset construction, partition refinement and canonical renaming.

mod subset;
pub use subset::determinize;

mod partition_refinement;
pub use partition_refinement::{minimize, partition_refinement};

mod canonical;
pub use canonical::canonicalize;
