//! Bidirectional relation indices and set algebra for Quantitative Bipolar Argumentation Frameworks.
//!
//! The attack and support relations of a QBAF are sets of (agent, patient) couples of arguments.
//! A [`RelationIndex`] stores such a set and answers, for any argument, which arguments it acts upon and which arguments act upon it.
//! The [`set_algebra`](utils::set_algebra) module provides the set operations used to reason about sets of arguments or of relations.

#![warn(missing_docs)]

pub mod qbaf;
pub use qbaf::Argument;
pub use qbaf::ArgumentHandle;
pub use qbaf::ArgumentSet;
pub use qbaf::IntoRelation;
pub use qbaf::LabelType;
pub use qbaf::Relation;
pub use qbaf::RelationError;
pub use qbaf::RelationIndex;

pub mod utils;
