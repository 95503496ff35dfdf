use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// The trait for argument labels.
///
/// Arguments may be labeled by any type implementing some traits.
/// This trait is used to combine them.
pub trait LabelType: Clone + Debug + Display + Eq + Hash {}
impl<T: Clone + Debug + Display + Eq + Hash> LabelType for T {}

/// The bound required from the elements of a [`RelationIndex`](crate::qbaf::RelationIndex).
///
/// Handles are cloned each time the index records them in one of its containers,
/// so cloning must be cheap and must preserve identity (a shared reference, an index into a registry...).
pub trait ArgumentHandle: Clone + Eq + Hash {}
impl<A: Clone + Eq + Hash> ArgumentHandle for A {}

#[derive(Debug)]
struct ArgumentData<T: LabelType> {
    id: usize,
    label: T,
    description: String,
}

/// Handles a single argument.
///
/// Each argument has a label, an optional description and an identifier which is unique in an argument set.
/// The label must be a [`LabelType`].
///
/// An `Argument` is a shared reference: cloning it does not duplicate the underlying entity.
/// Two arguments are equal iff their labels are equal, and hashing is consistent with this equality.
///
/// Arguments are built by [`ArgumentSet`] objects.
///
/// [`LabelType`]: trait.LabelType.html
/// [`ArgumentSet`]: struct.ArgumentSet.html
#[derive(Debug)]
pub struct Argument<T: LabelType>(Rc<ArgumentData<T>>);

impl<T> Argument<T>
where
    T: LabelType,
{
    /// Returns the label of the argument.
    ///
    /// Example
    ///
    /// ```
    /// # use qbaf_relations::{Argument, LabelType};
    /// fn describe_argument<T: LabelType>(a: &Argument<T>) {
    ///     println!("argument with id {} has the label {}", a.id(), a.label());
    /// }
    /// ```
    pub fn label(&self) -> &T {
        &self.0.label
    }

    /// Returns the id of the argument.
    pub fn id(&self) -> usize {
        self.0.id
    }

    /// Returns the textual description of the argument (empty if none was given).
    pub fn description(&self) -> &str {
        &self.0.description
    }

    /// Returns `true` iff both handles refer to the very same entity.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Argument<T>
where
    T: LabelType,
{
    fn clone(&self) -> Self {
        Argument(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for Argument<T>
where
    T: LabelType,
{
    fn eq(&self, other: &Self) -> bool {
        self.0.label == other.0.label
    }
}

impl<T> Eq for Argument<T> where T: LabelType {}

impl<T> Hash for Argument<T>
where
    T: LabelType,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.label.hash(state)
    }
}

impl<T> Display for Argument<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.label)
    }
}

/// Handles the set of arguments shared by the relations of a QBAF.
pub struct ArgumentSet<T>
where
    T: LabelType,
{
    arguments: Vec<Option<Argument<T>>>,
    label_to_id: HashMap<T, usize>,
    n_removed: usize,
}

impl<T> Default for ArgumentSet<T>
where
    T: LabelType,
{
    fn default() -> Self {
        ArgumentSet {
            arguments: Vec::new(),
            label_to_id: HashMap::new(),
            n_removed: 0,
        }
    }
}

impl<T> ArgumentSet<T>
where
    T: LabelType,
{
    /// Builds a new argument set given the labels of the arguments.
    ///
    /// Each argument will be assigned an id equal to its index in the provided slice of argument labels.
    /// If a label appears multiple times, the first occurrence is the only one that is considered.
    ///
    /// # Arguments
    ///
    /// * `labels` - the argument labels
    ///
    /// # Example
    ///
    /// ```
    /// # use qbaf_relations::ArgumentSet;
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// assert_eq!(3, arguments.len());
    /// ```
    pub fn new_with_labels(labels: &[T]) -> Self {
        let mut argument_set = ArgumentSet {
            arguments: Vec::with_capacity(labels.len()),
            label_to_id: HashMap::with_capacity(labels.len()),
            n_removed: 0,
        };
        labels.iter().for_each(|l| {
            argument_set.new_argument(l.clone());
        });
        argument_set.arguments.shrink_to_fit();
        argument_set.label_to_id.shrink_to_fit();
        argument_set
    }

    /// Adds a new argument to this set and returns a handle to it.
    ///
    /// The id of the new argument is the previous maximal id plus one.
    /// If an argument with the same label is already defined, no argument is added and the existing one is returned.
    pub fn new_argument(&mut self, label: T) -> Argument<T> {
        self.new_argument_with_description(label, String::new())
    }

    /// Adds a new argument with a description to this set and returns a handle to it.
    ///
    /// If an argument with the same label is already defined, it is returned unchanged.
    pub fn new_argument_with_description(&mut self, label: T, description: String) -> Argument<T> {
        let arguments = &mut self.arguments;
        let id = *self.label_to_id.entry(label.clone()).or_insert_with(|| {
            arguments.push(Some(Argument(Rc::new(ArgumentData {
                id: arguments.len(),
                label,
                description,
            }))));
            arguments.len() - 1
        });
        self.get_argument_by_id(id).clone()
    }

    /// Removes an argument from this set.
    ///
    /// The argument id will not be attributed to new arguments.
    /// Handles to the argument held elsewhere (in relation indices, for example) stay valid.
    pub fn remove_argument(&mut self, label: &T) -> Result<Argument<T>> {
        match self.label_to_id.remove(label) {
            Some(id) => {
                self.n_removed += 1;
                self.arguments[id]
                    .take()
                    .ok_or_else(|| anyhow!("no such argument: {}", label))
            }
            None => Err(anyhow!("no such argument: {}", label)),
        }
    }

    /// Returns the number of arguments in the set.
    pub fn len(&self) -> usize {
        self.arguments.len() - self.n_removed
    }

    /// Returns `true` iff the set has no argument.
    ///
    /// # Example
    ///
    /// ```
    /// # use qbaf_relations::ArgumentSet;
    /// let arguments = ArgumentSet::new_with_labels(&["a", "b", "c"]);
    /// assert!(!arguments.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.arguments.len() == self.n_removed
    }

    /// Returns the argument associated to an argument label.
    ///
    /// # Arguments
    ///
    /// * `label` - the argument label
    ///
    /// # Example
    ///
    /// ```
    /// # use qbaf_relations::ArgumentSet;
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// assert!(arguments.get_argument(&"a").is_ok());
    /// assert!(arguments.get_argument(&"d").is_err());
    /// ```
    pub fn get_argument(&self, label: &T) -> Result<&Argument<T>> {
        self.label_to_id
            .get(label)
            .and_then(|i| self.arguments[*i].as_ref())
            .ok_or_else(|| anyhow!("no such argument: {}", label))
    }

    /// Returns the argument with the corresponding id.
    ///
    /// # Panics
    ///
    /// Panics if no argument has such id.
    pub fn get_argument_by_id(&self, id: usize) -> &Argument<T> {
        self.arguments[id].as_ref().unwrap()
    }

    /// Returns an iterator to the arguments, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument<T>> + '_ {
        self.arguments.iter().filter_map(|o| o.as_ref())
    }
}
