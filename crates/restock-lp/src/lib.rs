//! # Restock LP
//!
//! 線性規劃精確求解器（約束建構、可行性預檢、microlp 單純形法求解）

pub mod constraint;
pub mod solver;

// Re-export 主要類型
pub use constraint::{ConstraintKind, LinearConstraint, Relation};
pub use solver::ExactSolver;
