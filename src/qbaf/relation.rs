use super::{ArgumentHandle, RelationError};
use std::fmt::Display;

/// A relation, represented as a couple of two arguments.
///
/// The first argument is the agent (the initiator of an action, like an attacker or a supporter),
/// the second one is the patient (the entity undergoing the effect of the action).
/// Two relations are equal iff their agents and their patients are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Relation<A>(A, A)
where
    A: ArgumentHandle;

impl<A> Relation<A>
where
    A: ArgumentHandle,
{
    /// Builds a relation from its agent and its patient.
    pub fn new(agent: A, patient: A) -> Self {
        Relation(agent, patient)
    }

    /// Returns the agent.
    ///
    /// Example
    ///
    /// ```
    /// # use qbaf_relations::{ArgumentHandle, Relation};
    /// # use std::fmt::Display;
    /// fn describe_relation<A: ArgumentHandle + Display>(relation: &Relation<A>) {
    ///     println!("{} acts upon {}", relation.agent(), relation.patient());
    /// }
    /// ```
    pub fn agent(&self) -> &A {
        &self.0
    }

    /// Returns the patient.
    pub fn patient(&self) -> &A {
        &self.1
    }

    /// Consumes the relation, returning the (agent, patient) couple.
    pub fn into_pair(self) -> (A, A) {
        (self.0, self.1)
    }
}

impl<A> From<(A, A)> for Relation<A>
where
    A: ArgumentHandle,
{
    fn from((agent, patient): (A, A)) -> Self {
        Relation(agent, patient)
    }
}

impl<A> Display for Relation<A>
where
    A: ArgumentHandle + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// A trait for the input items a relation index may be built from.
///
/// Couples and two-element arrays always make valid relations.
/// Vectors and slices are checked, and an [`RelationError::InvalidInput`] is returned if they do not hold exactly two arguments.
/// The position reported by the error is filled in by the caller iterating over the input.
pub trait IntoRelation<A>
where
    A: ArgumentHandle,
{
    /// Converts this item into a relation.
    fn into_relation(self) -> Result<Relation<A>, RelationError>;
}

impl<A> IntoRelation<A> for Relation<A>
where
    A: ArgumentHandle,
{
    fn into_relation(self) -> Result<Relation<A>, RelationError> {
        Ok(self)
    }
}

impl<A> IntoRelation<A> for (A, A)
where
    A: ArgumentHandle,
{
    fn into_relation(self) -> Result<Relation<A>, RelationError> {
        Ok(Relation::from(self))
    }
}

impl<A> IntoRelation<A> for [A; 2]
where
    A: ArgumentHandle,
{
    fn into_relation(self) -> Result<Relation<A>, RelationError> {
        let [agent, patient] = self;
        Ok(Relation(agent, patient))
    }
}

impl<A> IntoRelation<A> for Vec<A>
where
    A: ArgumentHandle,
{
    fn into_relation(self) -> Result<Relation<A>, RelationError> {
        let arity = self.len();
        let mut items = self.into_iter();
        match (items.next(), items.next(), items.next()) {
            (Some(agent), Some(patient), None) => Ok(Relation(agent, patient)),
            _ => Err(RelationError::InvalidInput { position: 0, arity }),
        }
    }
}

impl<A> IntoRelation<A> for &[A]
where
    A: ArgumentHandle,
{
    fn into_relation(self) -> Result<Relation<A>, RelationError> {
        match self {
            [agent, patient] => Ok(Relation(agent.clone(), patient.clone())),
            _ => Err(RelationError::InvalidInput {
                position: 0,
                arity: self.len(),
            }),
        }
    }
}
