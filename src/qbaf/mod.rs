//! This module contains the material used to handle the relations between the arguments of a QBAF.

mod arguments;
pub use arguments::Argument;
pub use arguments::ArgumentHandle;
pub use arguments::ArgumentSet;
pub use arguments::LabelType;

mod error;
pub use error::RelationError;

mod relation;
pub use relation::IntoRelation;
pub use relation::Relation;

mod relation_index;
pub use relation_index::RelationIndex;
