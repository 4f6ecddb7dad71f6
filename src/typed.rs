use crate::error::SetError;
use crate::options::SetOptions;
use crate::set::Set;
use crate::sync::SyncSet;
use crate::value::{TypeTag, Value};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;
use tracing::{debug, trace};

/// A thread-safe set that partitions its elements by type
///
/// `TypedSetGroup` keeps one [`SyncSet`] per [`TypeTag`]. Each element is
/// routed to the sub-set for its tag, which is created the first time a value
/// of that tag shows up and kept for the lifetime of the group. Callers only
/// ever see one logical set: membership, length and set algebra are composed
/// across all sub-sets.
///
/// The routing table has its own lock, separate from the sub-set locks.
/// Looking up an existing sub-set takes a shared lock; creating a new one
/// re-checks under the exclusive lock, so two threads inserting the first
/// value of a new type end up in the same sub-set.
///
/// # Examples
///
/// ```
/// use sovran_set::{TypedSetGroup, Value};
///
/// #[derive(Debug, PartialEq, Eq, Hash)]
/// struct Empty;
///
/// let group = TypedSetGroup::new();
/// group.add([Value::from(1), Value::from("str"), Value::from(1.2), Value::any(Empty)]).unwrap();
///
/// assert_eq!(group.len(), 4);
/// assert!(group.contains_all(&[Value::from("str"), Value::from(1.2)]));
///
/// group.remove(&[Value::from(1), Value::any(Empty)]);
/// assert!(!group.contains_any(&[Value::from(1), Value::any(Empty)]));
/// ```
pub struct TypedSetGroup {
    options: SetOptions,
    stores: RwLock<HashMap<TypeTag, Arc<SyncSet>>>,
}

impl TypedSetGroup {
    /// Creates a new, empty group with default options
    pub fn new() -> Self {
        Self::with_options(SetOptions::default())
    }

    /// Creates a new, empty group whose sub-sets use the given options
    pub fn with_options(options: SetOptions) -> Self {
        Self {
            options,
            stores: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a group holding the given initial values
    ///
    /// Values that cannot be set elements are skipped.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::from_values_with_options(values, SetOptions::default())
    }

    /// Like [`TypedSetGroup::from_values`], with explicit options
    pub fn from_values_with_options<I, V>(values: I, options: SetOptions) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut partitions: HashMap<TypeTag, Vec<Value>> = HashMap::new();
        for value in values {
            let value = value.into();
            if value.is_admissible() {
                partitions.entry(value.type_tag()).or_default().push(value);
            } else {
                debug!(kind = value.kind(), "skipping inadmissible initial element");
            }
        }
        let stores = partitions
            .into_iter()
            .map(|(tag, values)| {
                let store = SyncSet::from_values_with_options(values, options);
                (tag, Arc::new(store))
            })
            .collect();
        Self {
            options,
            stores: RwLock::new(stores),
        }
    }

    fn from_sets(sets: HashMap<TypeTag, Set>, options: SetOptions) -> Self {
        let stores = sets
            .into_iter()
            .map(|(tag, set)| (tag, Arc::new(set.into_sync())))
            .collect();
        Self {
            options,
            stores: RwLock::new(stores),
        }
    }

    /// The options new sub-sets are created with
    pub fn options(&self) -> SetOptions {
        self.options
    }

    // The table is only ever written by inserting a fully built sub-set, so a
    // poisoned table is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<TypeTag, Arc<SyncSet>>> {
        self.stores.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TypeTag, Arc<SyncSet>>> {
        self.stores.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn store(&self, tag: TypeTag) -> Option<Arc<SyncSet>> {
        self.read().get(&tag).cloned()
    }

    fn store_or_create(&self, tag: TypeTag) -> Arc<SyncSet> {
        if let Some(store) = self.store(tag) {
            return store;
        }
        let mut stores = self.write();
        let options = self.options;
        Arc::clone(stores.entry(tag).or_insert_with(|| {
            trace!(%tag, "creating sub-set");
            Arc::new(SyncSet::with_options(options))
        }))
    }

    fn all_stores(&self) -> Vec<Arc<SyncSet>> {
        self.read().values().cloned().collect()
    }

    /// Copies every sub-set, one lock at a time
    fn snapshot(&self) -> HashMap<TypeTag, Set> {
        let stores: Vec<(TypeTag, Arc<SyncSet>)> = self
            .read()
            .iter()
            .map(|(tag, store)| (*tag, Arc::clone(store)))
            .collect();
        stores
            .into_iter()
            .map(|(tag, store)| (tag, store.copy().into_unsync()))
            .collect()
    }

    /// Adds each value to the sub-set for its type
    ///
    /// Every value is attempted, even after a failure.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a sub-set, such as
    /// `SetError::InadmissibleElement` or, in strict duplicate mode,
    /// `SetError::AlreadyExists`.
    pub fn add<I, V>(&self, values: I) -> Result<(), SetError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut first_error = None;
        for value in values {
            let value = value.into();
            let result = match value.check_admissible() {
                Ok(()) => self.store_or_create(value.type_tag()).add(value),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Adds the contents of a dynamically typed source
    ///
    /// # Errors
    ///
    /// - Returns `SetError::UnsupportedSource` unless the source is a `List` or `Nil`
    /// - Otherwise behaves like [`TypedSetGroup::add`]
    pub fn extend_from_value(&self, source: Value) -> Result<(), SetError> {
        match source {
            Value::Nil => Ok(()),
            Value::List(values) => self.add(values),
            other => Err(SetError::UnsupportedSource(other.kind().to_string())),
        }
    }

    /// Removes each value from the sub-set for its type
    pub fn remove(&self, values: &[Value]) {
        for value in values {
            if let Some(store) = self.store(value.type_tag()) {
                store.remove(value);
            }
        }
    }

    /// Removes every element, keeping the sub-sets
    pub fn clear(&self) {
        for store in self.all_stores() {
            store.clear();
        }
    }

    /// Returns true if the value is in the sub-set for its type
    pub fn contains(&self, value: &Value) -> bool {
        self.store(value.type_tag())
            .map_or(false, |store| store.contains(value))
    }

    /// Returns true if any of the values is present; false for an empty slice
    pub fn contains_any(&self, values: &[Value]) -> bool {
        values.iter().any(|value| self.contains(value))
    }

    /// Returns true if all of the values are present; true for an empty slice
    pub fn contains_all(&self, values: &[Value]) -> bool {
        values.iter().all(|value| self.contains(value))
    }

    /// Total number of elements across all sub-sets
    pub fn len(&self) -> usize {
        self.all_stores().iter().map(|store| store.len()).sum()
    }

    /// Returns true if no sub-set holds an element
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tags that have a sub-set, in tag order
    pub fn type_tags(&self) -> Vec<TypeTag> {
        let tags: BTreeSet<TypeTag> = self.read().keys().copied().collect();
        tags.into_iter().collect()
    }

    /// Returns the elements of every sub-set in no particular order
    pub fn elements(&self) -> Vec<Value> {
        self.all_stores()
            .iter()
            .flat_map(|store| store.elements())
            .collect()
    }

    /// Returns an independent group with copies of every sub-set
    pub fn copy(&self) -> Self {
        Self::from_sets(self.snapshot(), self.options)
    }

    /// Returns true if both groups hold the same elements
    ///
    /// Compared per type; a type only one side has counts as an empty set.
    pub fn equal(&self, other: &TypedSetGroup) -> bool {
        self.all_tags_match(other, |ours, theirs| ours.equal(theirs))
    }

    /// Returns true if every element of this group is in `other`
    pub fn is_subset_of(&self, other: &TypedSetGroup) -> bool {
        self.all_tags_match(other, |ours, theirs| ours.is_subset_of(theirs))
    }

    /// Returns true if every element of `other` is in this group
    pub fn is_superset_of(&self, other: &TypedSetGroup) -> bool {
        self.all_tags_match(other, |ours, theirs| ours.is_superset_of(theirs))
    }

    /// Elements of this group that are not in `other`
    pub fn diff(&self, other: &TypedSetGroup) -> Self {
        self.combine(other, |ours, theirs| ours.diff(theirs))
    }

    /// Elements in exactly one of the two groups
    pub fn symmetric_diff(&self, other: &TypedSetGroup) -> Self {
        self.combine(other, |ours, theirs| ours.symmetric_diff(theirs))
    }

    /// Elements in either group
    pub fn unite(&self, other: &TypedSetGroup) -> Self {
        self.combine(other, |ours, theirs| ours.unite(theirs))
    }

    /// Elements present in both groups
    pub fn intersect(&self, other: &TypedSetGroup) -> Self {
        self.combine(other, |ours, theirs| ours.intersect(theirs))
    }

    /// Pairs the sub-sets of both groups by tag, using an empty set for a
    /// tag that only one side has
    fn paired(&self, other: &TypedSetGroup) -> Vec<(TypeTag, Set, Set)> {
        let theirs = other.snapshot();
        let mut ours = self.snapshot();
        let tags: BTreeSet<TypeTag> = ours.keys().chain(theirs.keys()).copied().collect();
        tags.into_iter()
            .map(|tag| {
                let a = ours
                    .remove(&tag)
                    .unwrap_or_else(|| Set::with_options(self.options));
                let b = theirs
                    .get(&tag)
                    .cloned()
                    .unwrap_or_else(|| Set::with_options(other.options));
                (tag, a, b)
            })
            .collect()
    }

    fn all_tags_match<F>(&self, other: &TypedSetGroup, f: F) -> bool
    where
        F: Fn(&Set, &Set) -> bool,
    {
        self.paired(other).iter().all(|(_, a, b)| f(a, b))
    }

    fn combine<F>(&self, other: &TypedSetGroup, f: F) -> Self
    where
        F: Fn(&Set, &Set) -> Set,
    {
        let sets = self
            .paired(other)
            .into_iter()
            .map(|(tag, a, b)| (tag, f(&a, &b)))
            .collect();
        Self::from_sets(sets, self.options)
    }

    /// Calls `f` for each element with an index unique across the group
    ///
    /// Each sub-set is visited on its own thread, so `f` may be called
    /// concurrently and must synchronize any state it touches. Each sub-set
    /// is copied before it is visited, so `f` may call back into the group;
    /// changes it makes are not seen by the running visit. Indices are
    /// handed out from a shared counter: they are unique, and every index
    /// below the highest one handed out is visited. Once any call returns
    /// false, no further indices are handed out.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_set::{TypedSetGroup, Value};
    /// use std::sync::Mutex;
    ///
    /// let group = TypedSetGroup::from_values([Value::from(1), Value::from("a"), Value::from(2.5)]);
    /// let seen = Mutex::new(Vec::new());
    /// group.range(|index, _| {
    ///     seen.lock().unwrap().push(index);
    ///     true
    /// });
    ///
    /// let mut seen = seen.into_inner().unwrap();
    /// seen.sort();
    /// assert_eq!(seen, vec![0, 1, 2]);
    /// ```
    pub fn range<F>(&self, f: F)
    where
        F: Fn(usize, &Value) -> bool + Sync,
    {
        let stores = self.all_stores();
        let next = AtomicUsize::new(0);
        let stopped = AtomicBool::new(false);

        // No sub-set lock is held while `f` runs.
        let visit = |store: &SyncSet| {
            for value in store.elements() {
                if stopped.load(Ordering::SeqCst) {
                    return;
                }
                let index = next.fetch_add(1, Ordering::SeqCst);
                if !f(index, &value) {
                    stopped.store(true, Ordering::SeqCst);
                    return;
                }
            }
        };

        match stores.as_slice() {
            [] => {}
            [only] => visit(only.as_ref()),
            _ => thread::scope(|scope| {
                for store in &stores {
                    let visit = &visit;
                    scope.spawn(move || visit(store.as_ref()));
                }
            }),
        }
    }
}

impl Default for TypedSetGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TypedSetGroup {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl PartialEq for TypedSetGroup {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl fmt::Debug for TypedSetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sets: Vec<(TypeTag, Set)> = self.snapshot().into_iter().collect();
        sets.sort_by_key(|(tag, _)| *tag);
        f.debug_struct("TypedSetGroup")
            .field("options", &self.options)
            .field("stores", &sets)
            .finish()
    }
}

impl fmt::Display for TypedSetGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TypedSetGroup[")?;
        for (i, value) in self.elements().iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
