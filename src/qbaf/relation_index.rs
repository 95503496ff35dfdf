use super::{ArgumentHandle, IntoRelation, Relation, RelationError};
use crate::utils::set_algebra;
use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;

/// A set of relations (agent, patient) indexed in both directions.
///
/// Besides the set of relations, the index maintains for each agent the set of its patients
/// and for each patient the set of its agents, so that both lookups are constant-time.
/// An argument is a key of the agent (resp. patient) index iff it is the agent (resp. patient) of at least one relation:
/// entries are created by the first relation they take part in and dropped with the last one.
///
/// The index never owns the arguments themselves; it only clones their handles.
///
/// # Example
///
/// ```
/// # use qbaf_relations::{ArgumentSet, RelationIndex};
/// let mut arguments = ArgumentSet::default();
/// let a = arguments.new_argument("a");
/// let b = arguments.new_argument("b");
/// let c = arguments.new_argument("c");
/// let mut attacks = RelationIndex::try_new(vec![(a.clone(), b.clone())]).unwrap();
/// attacks.add(c.clone(), b.clone()).unwrap();
/// assert!(attacks.contains(&a, &b));
/// assert_eq!(2, attacks.agents_of(&b).len());
/// assert!(attacks.patients_of(&b).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RelationIndex<A>
where
    A: ArgumentHandle,
{
    relations: HashSet<Relation<A>>,
    agent_patients: HashMap<A, HashSet<A>>,
    patient_agents: HashMap<A, HashSet<A>>,
}

impl<A> Default for RelationIndex<A>
where
    A: ArgumentHandle,
{
    fn default() -> Self {
        RelationIndex {
            relations: HashSet::new(),
            agent_patients: HashMap::new(),
            patient_agents: HashMap::new(),
        }
    }
}

impl<A> RelationIndex<A>
where
    A: ArgumentHandle,
{
    /// Builds an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from a collection of items describing relations.
    ///
    /// Every item is converted (see [`IntoRelation`]) before anything is built;
    /// if one of them is not a pair, an [`RelationError::InvalidInput`] giving its position is returned.
    /// Repeated relations are kept once.
    ///
    /// # Example
    ///
    /// ```
    /// # use qbaf_relations::RelationIndex;
    /// let index = RelationIndex::try_new(vec![vec!["a", "b"], vec!["a", "b"], vec!["b", "c"]]).unwrap();
    /// assert_eq!(2, index.len());
    /// let error = RelationIndex::try_new(vec![vec!["a", "b"], vec!["c"]]).unwrap_err();
    /// assert!(error.is_invalid_input());
    /// ```
    pub fn try_new<I, R>(items: I) -> Result<Self, RelationError>
    where
        I: IntoIterator<Item = R>,
        R: IntoRelation<A>,
    {
        let mut relations: HashSet<Relation<A>> = HashSet::new();
        for (i, item) in items.into_iter().enumerate() {
            let relation = item
                .into_relation()
                .map_err(|e| e.with_position(i))?;
            relations.try_reserve(1)?;
            relations.insert(relation);
        }
        Self::try_from_relation_set(relations)
    }

    // Builds both lookup indices by iterating once over the deduplicated relations.
    fn try_from_relation_set(relations: HashSet<Relation<A>>) -> Result<Self, RelationError> {
        let mut agent_patients: HashMap<A, HashSet<A>> = HashMap::new();
        let mut patient_agents: HashMap<A, HashSet<A>> = HashMap::new();
        agent_patients.try_reserve(relations.len())?;
        patient_agents.try_reserve(relations.len())?;
        for relation in relations.iter() {
            let patients = agent_patients.entry(relation.agent().clone()).or_default();
            patients.try_reserve(1)?;
            patients.insert(relation.patient().clone());
            let agents = patient_agents
                .entry(relation.patient().clone())
                .or_default();
            agents.try_reserve(1)?;
            agents.insert(relation.agent().clone());
        }
        debug!(
            "built a relation index with {} relation(s), {} agent(s) and {} patient(s)",
            relations.len(),
            agent_patients.len(),
            patient_agents.len()
        );
        Ok(RelationIndex {
            relations,
            agent_patients,
            patient_agents,
        })
    }

    /// Returns `true` iff the relation (agent, patient) belongs to this index.
    pub fn contains(&self, agent: &A, patient: &A) -> bool {
        self.agent_patients
            .get(agent)
            .map(|patients| patients.contains(patient))
            .unwrap_or(false)
    }

    /// Returns `true` iff the relation belongs to this index.
    pub fn contains_relation(&self, relation: &Relation<A>) -> bool {
        self.relations.contains(relation)
    }

    /// Returns the patients that undergo the effect of the action (e.g. attack, support) initiated by the agent.
    ///
    /// The returned vector is a copy; it is empty if the agent is not involved in any relation.
    pub fn patients_of(&self, agent: &A) -> Vec<A> {
        Self::snapshot(&self.agent_patients, agent)
    }

    /// Returns the agents that initiate an action (e.g. attack, support) whose effects are undergone by the patient.
    ///
    /// The returned vector is a copy; it is empty if the patient is not involved in any relation.
    pub fn agents_of(&self, patient: &A) -> Vec<A> {
        Self::snapshot(&self.patient_agents, patient)
    }

    fn snapshot(index: &HashMap<A, HashSet<A>>, key: &A) -> Vec<A> {
        index
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Adds the relation (agent, patient) to this index.
    ///
    /// Adding a relation that already exists has no effect.
    ///
    /// The room needed by the three containers is reserved before any of them is modified,
    /// so that in case of an allocation failure the index is left as it was.
    pub fn add(&mut self, agent: A, patient: A) -> Result<(), RelationError> {
        if self.contains(&agent, &patient) {
            return Ok(());
        }
        self.relations.try_reserve(1)?;
        let new_patients = Self::stage_entry(&mut self.agent_patients, &agent, 1)?;
        let new_agents = Self::stage_entry(&mut self.patient_agents, &patient, 1)?;
        self.agent_patients
            .entry(agent.clone())
            .or_insert(new_patients)
            .insert(patient.clone());
        self.patient_agents
            .entry(patient.clone())
            .or_insert(new_agents)
            .insert(agent.clone());
        self.relations.insert(Relation::new(agent, patient));
        trace!("added a relation; index now has {} relation(s)", self.len());
        Ok(())
    }

    // Reserves room for `additional` more values under the key, leaving the contents untouched.
    // Returns the set to register if the key is new (an empty, unallocated set otherwise).
    fn stage_entry(
        index: &mut HashMap<A, HashSet<A>>,
        key: &A,
        additional: usize,
    ) -> Result<HashSet<A>, RelationError> {
        let mut new_set = HashSet::new();
        match index.get_mut(key) {
            Some(set) => set.try_reserve(additional)?,
            None => {
                index.try_reserve(1)?;
                new_set.try_reserve(additional)?;
            }
        }
        Ok(new_set)
    }

    /// Removes the relation (agent, patient) from this index.
    ///
    /// Removing a relation that does not exist has no effect.
    /// An agent (resp. patient) whose last relation is removed leaves the agent (resp. patient) index.
    pub fn remove(&mut self, agent: &A, patient: &A) {
        let relation = Relation::new(agent.clone(), patient.clone());
        if !self.relations.remove(&relation) {
            return;
        }
        Self::detach(&mut self.agent_patients, agent, patient);
        Self::detach(&mut self.patient_agents, patient, agent);
        trace!(
            "removed a relation; index now has {} relation(s)",
            self.len()
        );
    }

    fn detach(index: &mut HashMap<A, HashSet<A>>, key: &A, value: &A) {
        if let Some(set) = index.get_mut(key) {
            set.remove(value);
            if set.is_empty() {
                index.remove(key);
            }
        }
    }

    /// Returns the number of relations in this index.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Returns `true` iff this index has no relation.
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Returns `true` iff this index and the other one have no relation in common.
    pub fn is_disjoint_from(&self, other: &RelationIndex<A>) -> bool {
        set_algebra::is_disjoint(&self.relations, &other.relations)
    }

    /// Returns an independent copy of this index.
    ///
    /// The lookup indices of the copy are rebuilt from the relations;
    /// the argument handles are shared with this index.
    pub fn copy(&self) -> Result<Self, RelationError> {
        let mut relations: HashSet<Relation<A>> = HashSet::new();
        relations.try_reserve(self.relations.len())?;
        relations.extend(self.relations.iter().cloned());
        Self::try_from_relation_set(relations)
    }

    /// Returns a new set containing the relations of this index.
    pub fn relations(&self) -> HashSet<Relation<A>> {
        self.relations.clone()
    }

    /// Provides an iterator to the relations of this index, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Relation<A>> + '_ {
        self.relations.iter()
    }

    /// Provides an iterator to the arguments that are the agent of at least one relation.
    pub fn iter_agents(&self) -> impl Iterator<Item = &A> + '_ {
        self.agent_patients.keys()
    }

    /// Provides an iterator to the arguments that are the patient of at least one relation.
    pub fn iter_patients(&self) -> impl Iterator<Item = &A> + '_ {
        self.patient_agents.keys()
    }

    /// Provides an iterator to every argument handle held by this index.
    ///
    /// An argument is given once per place it is stored at, through the relation set and both lookup indices.
    /// This is intended for tools tracking the references held by the index.
    pub fn iter_held_arguments(&self) -> impl Iterator<Item = &A> + '_ {
        self.relations
            .iter()
            .flat_map(|r| [r.agent(), r.patient()])
            .chain(Self::iter_held_in(&self.agent_patients))
            .chain(Self::iter_held_in(&self.patient_agents))
    }

    fn iter_held_in(index: &HashMap<A, HashSet<A>>) -> impl Iterator<Item = &A> + '_ {
        index
            .iter()
            .flat_map(|(k, set)| std::iter::once(k).chain(set.iter()))
    }

    /// Removes every relation, releasing all the argument handles held by this index.
    pub fn clear(&mut self) {
        self.relations.clear();
        self.agent_patients.clear();
        self.patient_agents.clear();
    }
}

impl<A> PartialEq for RelationIndex<A>
where
    A: ArgumentHandle,
{
    fn eq(&self, other: &Self) -> bool {
        self.relations == other.relations
    }
}

impl<A> Eq for RelationIndex<A> where A: ArgumentHandle {}

impl<A> FromIterator<(A, A)> for RelationIndex<A>
where
    A: ArgumentHandle,
{
    fn from_iter<I: IntoIterator<Item = (A, A)>>(iter: I) -> Self {
        let mut index = RelationIndex::new();
        for (agent, patient) in iter {
            index.insert_unchecked(agent, patient);
        }
        index
    }
}

impl<A> FromIterator<Relation<A>> for RelationIndex<A>
where
    A: ArgumentHandle,
{
    fn from_iter<I: IntoIterator<Item = Relation<A>>>(iter: I) -> Self {
        iter.into_iter().map(Relation::into_pair).collect()
    }
}

impl<A> RelationIndex<A>
where
    A: ArgumentHandle,
{
    // Infallible insertion used when aborting on allocation failure is acceptable.
    fn insert_unchecked(&mut self, agent: A, patient: A) {
        if self.relations.insert(Relation::new(agent.clone(), patient.clone())) {
            self.agent_patients
                .entry(agent.clone())
                .or_default()
                .insert(patient.clone());
            self.patient_agents.entry(patient).or_default().insert(agent);
        }
    }
}

impl<A> Display for RelationIndex<A>
where
    A: ArgumentHandle + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut relations = self
            .relations
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<String>>();
        relations.sort_unstable();
        write!(f, "RelationIndex{{{}}}", relations.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Argument, ArgumentSet};

    fn arguments(labels: &[&'static str]) -> Vec<Argument<&'static str>> {
        let mut set = ArgumentSet::default();
        labels.iter().map(|l| set.new_argument(*l)).collect()
    }

    fn sorted_labels(args: Vec<Argument<&'static str>>) -> Vec<&'static str> {
        let mut labels = args.iter().map(|a| *a.label()).collect::<Vec<_>>();
        labels.sort_unstable();
        labels
    }

    fn assert_consistent<A: ArgumentHandle>(index: &RelationIndex<A>) {
        for r in index.iter() {
            assert!(index.patients_of(r.agent()).contains(r.patient()));
            assert!(index.agents_of(r.patient()).contains(r.agent()));
        }
        for agent in index.iter_agents() {
            let patients = index.patients_of(agent);
            assert!(!patients.is_empty());
            assert!(patients.iter().all(|p| index.contains(agent, p)));
        }
        for patient in index.iter_patients() {
            let agents = index.agents_of(patient);
            assert!(!agents.is_empty());
            assert!(agents.iter().all(|a| index.contains(a, patient)));
        }
    }

    #[test]
    fn test_scenario() {
        let args = arguments(&["a1", "a2", "a3"]);
        let (a1, a2, a3) = (&args[0], &args[1], &args[2]);
        let mut index =
            RelationIndex::try_new(vec![(a1.clone(), a2.clone()), (a1.clone(), a3.clone())])
                .unwrap();
        assert_eq!(vec!["a2", "a3"], sorted_labels(index.patients_of(a1)));
        assert_eq!(vec!["a1"], sorted_labels(index.agents_of(a2)));
        assert!(index.contains(a1, a3));
        assert!(!index.contains(a2, a1));
        index.add(a2.clone(), a3.clone()).unwrap();
        assert!(index.contains(a2, a3));
        assert_eq!(vec!["a1", "a2"], sorted_labels(index.agents_of(a3)));
        index.remove(a1, a2);
        assert!(!index.contains(a1, a2));
        assert_eq!(vec!["a3"], sorted_labels(index.patients_of(a1)));
        assert_consistent(&index);
    }

    #[test]
    fn test_try_new_deduplicates() {
        let index = RelationIndex::try_new(vec![("a", "b"), ("b", "a"), ("a", "b")]).unwrap();
        assert_eq!(2, index.len());
        assert_consistent(&index);
    }

    #[test]
    fn test_try_new_empty() {
        let index = RelationIndex::try_new(Vec::<(&str, &str)>::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.patients_of(&"a").is_empty());
        assert_eq!("RelationIndex{}", index.to_string());
    }

    #[test]
    fn test_try_new_invalid_item() {
        let error =
            RelationIndex::try_new(vec![vec!["a", "b"], vec!["b", "c"], vec!["a", "b", "c"]])
                .unwrap_err();
        assert_eq!(
            RelationError::InvalidInput {
                position: 2,
                arity: 3
            },
            error
        );
    }

    #[test]
    fn test_try_new_order_does_not_matter() {
        let pairs = vec![("a", "b"), ("b", "c"), ("c", "a"), ("a", "c")];
        let mut reversed = pairs.clone();
        reversed.reverse();
        assert_eq!(
            RelationIndex::try_new(pairs).unwrap(),
            RelationIndex::try_new(reversed).unwrap()
        );
    }

    #[test]
    fn test_unknown_argument_is_not_an_error() {
        let index = RelationIndex::try_new(vec![("a", "b")]).unwrap();
        assert!(index.patients_of(&"z").is_empty());
        assert!(index.agents_of(&"z").is_empty());
        assert!(index.agents_of(&"a").is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut index = RelationIndex::new();
        index.add("a", "b").unwrap();
        let once = index.copy().unwrap();
        index.add("a", "b").unwrap();
        assert_eq!(once, index);
        assert_eq!(1, index.len());
        assert_eq!(vec!["b"], index.patients_of(&"a"));
        assert_eq!(vec!["a"], index.agents_of(&"b"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut index = RelationIndex::try_new(vec![("a", "b"), ("a", "c")]).unwrap();
        index.remove(&"a", &"b");
        let once = index.copy().unwrap();
        index.remove(&"a", &"b");
        index.remove(&"z", &"b");
        assert_eq!(once, index);
        assert_consistent(&index);
    }

    #[test]
    fn test_add_remove_round_trip() {
        let mut index = RelationIndex::try_new(vec![("a", "c")]).unwrap();
        index.add("a", "b").unwrap();
        index.remove(&"a", &"b");
        assert!(!index.contains(&"a", &"b"));
        assert!(!index.patients_of(&"a").contains(&"b"));
        assert!(!index.agents_of(&"b").contains(&"a"));
        assert_eq!(vec!["c"], index.patients_of(&"a"));
    }

    #[test]
    fn test_remove_prunes_empty_entries() {
        let mut index = RelationIndex::try_new(vec![("a", "b")]).unwrap();
        index.remove(&"a", &"b");
        assert_eq!(0, index.iter_agents().count());
        assert_eq!(0, index.iter_patients().count());
        assert_eq!(0, index.iter_held_arguments().count());
    }

    #[test]
    fn test_self_relation() {
        let mut index = RelationIndex::new();
        index.add("a", "a").unwrap();
        assert!(index.contains(&"a", &"a"));
        assert_eq!(vec!["a"], index.patients_of(&"a"));
        assert_eq!(vec!["a"], index.agents_of(&"a"));
        index.remove(&"a", &"a");
        assert!(index.is_empty());
        assert_eq!(0, index.iter_held_arguments().count());
    }

    #[test]
    fn test_invariant_after_mutations() {
        let mut index = RelationIndex::new();
        let ops: &[(bool, u8, u8)] = &[
            (true, 0, 1),
            (true, 1, 2),
            (true, 0, 2),
            (false, 0, 1),
            (true, 2, 0),
            (true, 0, 1),
            (false, 1, 2),
            (false, 1, 2),
            (true, 3, 3),
            (false, 2, 0),
        ];
        for (is_add, a, p) in ops {
            if *is_add {
                index.add(*a, *p).unwrap();
            } else {
                index.remove(a, p);
            }
            assert_consistent(&index);
        }
        assert_eq!(3, index.len());
    }

    #[test]
    fn test_copy_is_independent() {
        let args = arguments(&["a", "b", "c"]);
        let mut original = RelationIndex::try_new(vec![
            (args[0].clone(), args[1].clone()),
            (args[1].clone(), args[2].clone()),
        ])
        .unwrap();
        let mut copy = original.copy().unwrap();
        assert_eq!(original, copy);
        assert!(original.iter().all(|r| copy.contains(r.agent(), r.patient())));
        copy.add(args[2].clone(), args[0].clone()).unwrap();
        copy.remove(&args[0], &args[1]);
        assert!(!original.contains(&args[2], &args[0]));
        assert!(original.contains(&args[0], &args[1]));
        original.remove(&args[1], &args[2]);
        assert!(copy.contains(&args[1], &args[2]));
        let shared = copy.patients_of(&args[1]);
        assert!(shared[0].ptr_eq(&args[2]));
    }

    #[test]
    fn test_clone_equals_copy() {
        let index = RelationIndex::try_new(vec![("a", "b"), ("c", "b")]).unwrap();
        let clone = index.clone();
        assert_eq!(index.copy().unwrap(), clone);
        assert_consistent(&clone);
    }

    #[test]
    fn test_stage_entry() {
        let mut index = RelationIndex::try_new(vec![("a", "b")]).unwrap();
        let staged = RelationIndex::stage_entry(&mut index.agent_patients, &"a", 1).unwrap();
        assert!(staged.is_empty());
        let staged = RelationIndex::stage_entry(&mut index.agent_patients, &"c", 1).unwrap();
        assert!(staged.is_empty());
        assert!(staged.capacity() >= 1);
        assert_eq!(1, index.agent_patients.len());
        assert_consistent(&index);
    }

    #[test]
    fn test_stage_entry_failure_leaves_index_untouched() {
        let mut index = RelationIndex::try_new(vec![("a", "b"), ("a", "c")]).unwrap();
        let before = index.clone();
        let error =
            RelationIndex::stage_entry(&mut index.agent_patients, &"a", usize::MAX).unwrap_err();
        assert!(!error.is_invalid_input());
        RelationIndex::stage_entry(&mut index.patient_agents, &"d", usize::MAX).unwrap_err();
        assert_eq!(before, index);
        assert_eq!(before.agent_patients, index.agent_patients);
        assert_eq!(before.patient_agents, index.patient_agents);
        assert_consistent(&index);
        index.add("d", "a").unwrap();
        assert!(index.contains(&"d", &"a"));
        assert_consistent(&index);
    }

    #[test]
    fn test_try_new_many_repeats() {
        let index = RelationIndex::try_new(std::iter::repeat(("a", "b")).take(10_000)).unwrap();
        assert_eq!(1, index.len());
        assert_consistent(&index);
    }

    #[test]
    fn test_is_disjoint_from() {
        let attacks = RelationIndex::try_new(vec![("a", "b"), ("b", "c")]).unwrap();
        let mut supports = RelationIndex::try_new(vec![("b", "a"), ("c", "b")]).unwrap();
        assert!(attacks.is_disjoint_from(&supports));
        assert!(supports.is_disjoint_from(&attacks));
        supports.add("b", "c").unwrap();
        assert!(!attacks.is_disjoint_from(&supports));
        assert!(!supports.is_disjoint_from(&attacks));
        assert!(RelationIndex::new().is_disjoint_from(&attacks));
    }

    #[test]
    fn test_relations_snapshot() {
        let mut index = RelationIndex::try_new(vec![("a", "b")]).unwrap();
        let snapshot = index.relations();
        index.add("b", "c").unwrap();
        assert_eq!(1, snapshot.len());
        assert!(snapshot.contains(&Relation::new("a", "b")));
        assert!(index.contains_relation(&Relation::new("b", "c")));
    }

    #[test]
    fn test_from_iterator() {
        let index = vec![("a", "b"), ("a", "b"), ("a", "c")]
            .into_iter()
            .collect::<RelationIndex<&str>>();
        assert_eq!(2, index.len());
        assert_consistent(&index);
    }

    #[test]
    fn test_display_is_sorted() {
        let index = RelationIndex::try_new(vec![("c", "a"), ("a", "c"), ("a", "b")]).unwrap();
        assert_eq!("RelationIndex{(a, b), (a, c), (c, a)}", index.to_string());
    }

    #[test]
    fn test_held_arguments() {
        let index = RelationIndex::try_new(vec![("a", "b"), ("a", "c")]).unwrap();
        let mut held = index.iter_held_arguments().copied().collect::<Vec<_>>();
        held.sort_unstable();
        assert_eq!(
            vec!["a", "a", "a", "a", "a", "b", "b", "b", "c", "c", "c"],
            held
        );
    }

    #[test]
    fn test_clear_releases_arguments() {
        let args = arguments(&["a", "b"]);
        let mut index = RelationIndex::try_new(vec![(args[0].clone(), args[1].clone())]).unwrap();
        index.clear();
        assert!(index.is_empty());
        assert!(!index.contains(&args[0], &args[1]));
        assert_eq!(0, index.iter_held_arguments().count());
    }
}
