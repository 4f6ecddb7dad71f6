use crate::error::SetError;
use crate::options::SetOptions;
use crate::set::Set;
use crate::traits::ToUnsync;
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A thread-safe set of heterogeneous values
///
/// `SyncSet` wraps a [`Set`] in a mutex and exposes the same operations
/// through `&self`. Every operation holds the lock for its whole duration, so
/// operations on one `SyncSet` are linearizable.
///
/// When an operation takes a second set, that set is read through
/// [`ToUnsync`] *before* this set's lock is taken. Two `SyncSet` locks are
/// never held at once, so `a.diff(&b)` racing with `b.diff(&a)` cannot
/// deadlock. The price is that the second operand is a snapshot which may be
/// stale by the time the result is returned.
///
/// # Examples
///
/// ```
/// use sovran_set::{SyncSet, Value};
/// use std::sync::Arc;
/// use std::thread;
///
/// let set = Arc::new(SyncSet::new());
///
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let set = Arc::clone(&set);
///         thread::spawn(move || set.add(i))
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap().unwrap();
/// }
/// assert_eq!(set.len(), 4);
/// ```
#[derive(Default)]
pub struct SyncSet {
    inner: Mutex<Set>,
}

impl SyncSet {
    /// Creates a new, empty set with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty set with the given options
    pub fn with_options(options: SetOptions) -> Self {
        Set::with_options(options).into_sync()
    }

    /// Creates a set holding the given initial values
    ///
    /// Values that cannot be set elements are skipped.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Set::from_values(values).into_sync()
    }

    /// Like [`SyncSet::from_values`], with explicit options
    pub fn from_values_with_options<I, V>(values: I, options: SetOptions) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Set::from_values_with_options(values, options).into_sync()
    }

    // A visitor that panics inside `range` poisons the lock, but no operation
    // leaves the inner set half-updated, so the data is still sound.
    fn lock(&self) -> MutexGuard<'_, Set> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The options this set was created with
    pub fn options(&self) -> SetOptions {
        self.lock().options()
    }

    /// Inserts an element
    ///
    /// # Errors
    ///
    /// - Returns `SetError::InadmissibleElement` if the value holds a list or a map
    /// - Returns `SetError::AlreadyExists` if the value is present and the set
    ///   is in strict duplicate mode
    pub fn add(&self, elem: impl Into<Value>) -> Result<(), SetError> {
        self.lock().add(elem)
    }

    /// Adds every element of another set
    ///
    /// The source is read before this set is locked, so extending a set with
    /// itself is allowed.
    ///
    /// # Errors
    ///
    /// Stops at the first element that cannot be added, keeping the ones
    /// added before it.
    pub fn extend<S: ToUnsync + ?Sized>(&self, other: &S) -> Result<(), SetError> {
        let other = other.to_unsync();
        self.lock().extend(&*other)
    }

    /// Adds every element of an array-like sequence
    ///
    /// # Errors
    ///
    /// Stops at the first inadmissible element, keeping the ones added before it.
    pub fn extend_values<I, V>(&self, values: I) -> Result<(), SetError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.lock().extend_values(values)
    }

    /// Adds the contents of a dynamically typed source
    ///
    /// # Errors
    ///
    /// Returns `SetError::UnsupportedSource` unless the source is a `List` or `Nil`.
    pub fn extend_from_value(&self, source: Value) -> Result<(), SetError> {
        self.lock().extend_from_value(source)
    }

    /// Removes an element, returning whether it was present
    pub fn remove(&self, elem: &Value) -> bool {
        self.lock().remove(elem)
    }

    /// Removes every element
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns true if the element is present; always false for inadmissible values
    pub fn contains(&self, elem: &Value) -> bool {
        self.lock().contains(elem)
    }

    /// Number of elements in the set
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if the set holds no elements
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns an independent set holding the same elements
    pub fn copy(&self) -> Self {
        self.lock().copy().into_sync()
    }

    /// Returns a snapshot of the elements in no particular order
    pub fn elements(&self) -> Vec<Value> {
        self.lock().elements()
    }

    /// Returns true if both sets hold the same elements
    ///
    /// `other` is read through [`ToUnsync`] before this set is locked.
    pub fn equal<S: ToUnsync + ?Sized>(&self, other: &S) -> bool {
        let other = other.to_unsync();
        self.lock().equal(&*other)
    }

    /// Returns true if every element of this set is in `other`
    pub fn is_subset_of<S: ToUnsync + ?Sized>(&self, other: &S) -> bool {
        let other = other.to_unsync();
        self.lock().is_subset_of(&*other)
    }

    /// Returns true if every element of `other` is in this set
    pub fn is_superset_of<S: ToUnsync + ?Sized>(&self, other: &S) -> bool {
        let other = other.to_unsync();
        self.lock().is_superset_of(&*other)
    }

    /// Elements of this set that are not in `other`
    pub fn diff<S: ToUnsync + ?Sized>(&self, other: &S) -> Self {
        let other = other.to_unsync();
        self.lock().diff(&*other).into_sync()
    }

    /// Elements in exactly one of the two sets
    pub fn symmetric_diff<S: ToUnsync + ?Sized>(&self, other: &S) -> Self {
        let other = other.to_unsync();
        self.lock().symmetric_diff(&*other).into_sync()
    }

    /// Elements in either set
    ///
    /// `other` is read through [`ToUnsync`] before this set is locked.
    pub fn unite<S: ToUnsync + ?Sized>(&self, other: &S) -> Self {
        let other = other.to_unsync();
        self.lock().unite(&*other).into_sync()
    }

    /// Elements present in both sets
    pub fn intersect<S: ToUnsync + ?Sized>(&self, other: &S) -> Self {
        let other = other.to_unsync();
        self.lock().intersect(&*other).into_sync()
    }

    /// Calls `f` with a running index for each element until it returns false
    ///
    /// The lock is held while `f` runs, so `f` must not call back into this
    /// set.
    pub fn range<F>(&self, f: F)
    where
        F: FnMut(usize, &Value) -> bool,
    {
        self.lock().range(f);
    }

    /// Unwraps the inner set without copying it
    pub fn into_unsync(self) -> Set {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ToUnsync for SyncSet {
    fn to_unsync(&self) -> Cow<'_, Set> {
        Cow::Owned(self.lock().clone())
    }
}

impl From<Set> for SyncSet {
    fn from(set: Set) -> Self {
        Self {
            inner: Mutex::new(set),
        }
    }
}

impl From<SyncSet> for Set {
    fn from(set: SyncSet) -> Self {
        set.into_unsync()
    }
}

impl Clone for SyncSet {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl PartialEq for SyncSet {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl fmt::Debug for SyncSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncSet").field("inner", &*self.lock()).finish()
    }
}

impl fmt::Display for SyncSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self.lock())
    }
}
