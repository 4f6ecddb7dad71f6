use crate::error::SetError;
use crate::options::SetOptions;
use crate::sync::SyncSet;
use crate::traits::ToUnsync;
use crate::value::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// An unsynchronized set of heterogeneous values
///
/// `Set` is the engine behind every other container in this crate: it holds
/// admissible [`Value`]s and implements membership, set algebra and iteration.
/// It provides no locking of its own; mutation goes through `&mut self`, so
/// sharing one between threads requires an external lock, or converting it
/// with [`Set::into_sync`].
///
/// # Examples
///
/// ```
/// use sovran_set::{Set, Value};
///
/// let a = Set::from_values([Value::from(1), Value::from(2), Value::from("3")]);
/// let b = Set::from_values([Value::from("3"), Value::from(4.0)]);
///
/// assert_eq!(a.diff(&b), Set::from_values([1, 2]));
/// assert_eq!(a.intersect(&b), Set::from_values(["3"]));
/// assert_eq!(a.unite(&b).len(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Set {
    items: HashSet<Value>,
    options: SetOptions,
}

impl Set {
    /// Creates a new, empty set with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty set with the given options
    pub fn with_options(options: SetOptions) -> Self {
        Self {
            items: HashSet::new(),
            options,
        }
    }

    /// Creates a set holding the given initial values
    ///
    /// Values that cannot be set elements are skipped. Use [`Set::add`] to
    /// have them reported instead.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::from_values_with_options(values, SetOptions::default())
    }

    /// Like [`Set::from_values`], with explicit options
    pub fn from_values_with_options<I, V>(values: I, options: SetOptions) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut set = Self::with_options(options);
        for value in values {
            let value = value.into();
            if value.is_admissible() {
                set.items.insert(value);
            } else {
                debug!(kind = value.kind(), "skipping inadmissible initial element");
            }
        }
        set
    }

    fn derived(&self, items: HashSet<Value>) -> Self {
        Self {
            items,
            options: self.options,
        }
    }

    /// The options this set was created with
    pub fn options(&self) -> SetOptions {
        self.options
    }

    /// Inserts an element
    ///
    /// Adding an element that is already present succeeds without changing
    /// anything, unless strict duplicate mode is on.
    ///
    /// # Errors
    ///
    /// - Returns `SetError::InadmissibleElement` if the value holds a list or a map
    /// - Returns `SetError::AlreadyExists` if the value is present and the set
    ///   is in strict duplicate mode
    pub fn add(&mut self, elem: impl Into<Value>) -> Result<(), SetError> {
        let elem = elem.into();
        elem.check_admissible()?;

        if self.items.contains(&elem) {
            if self.options.is_strict() {
                return Err(SetError::AlreadyExists(elem.to_string()));
            }
            return Ok(());
        }

        self.items.insert(elem);
        Ok(())
    }

    /// Adds every element of another set
    ///
    /// # Errors
    ///
    /// Stops at the first element that cannot be added. Elements added
    /// before the failure stay in the set. `SetError::AlreadyExists` is never
    /// returned.
    pub fn extend<S: ToUnsync + ?Sized>(&mut self, other: &S) -> Result<(), SetError> {
        let other = other.to_unsync();
        self.extend_values(other.items.iter().cloned())
    }

    /// Adds every element of an array-like sequence
    ///
    /// # Errors
    ///
    /// Stops at the first inadmissible element. Elements added before it stay
    /// in the set. Duplicates are skipped even in strict duplicate mode.
    pub fn extend_values<I, V>(&mut self, values: I) -> Result<(), SetError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            match self.add(value) {
                Ok(()) | Err(SetError::AlreadyExists(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Adds the contents of a dynamically typed source
    ///
    /// A `List` is added element by element and `Nil` adds nothing.
    ///
    /// # Errors
    ///
    /// - Returns `SetError::UnsupportedSource` for any other kind of value
    /// - Otherwise behaves like [`Set::extend_values`]
    pub fn extend_from_value(&mut self, source: Value) -> Result<(), SetError> {
        match source {
            Value::Nil => Ok(()),
            Value::List(values) => self.extend_values(values),
            other => Err(SetError::UnsupportedSource(other.kind().to_string())),
        }
    }

    /// Removes an element, returning whether it was present
    pub fn remove(&mut self, elem: &Value) -> bool {
        self.items.remove(elem)
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns true if the element is present; always false for inadmissible values
    pub fn contains(&self, elem: &Value) -> bool {
        elem.is_admissible() && self.items.contains(elem)
    }

    /// Number of elements in the set
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set holds no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an independent set holding the same elements
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns the elements in no particular order
    pub fn elements(&self) -> Vec<Value> {
        self.items.iter().cloned().collect()
    }

    /// Iterates over the elements in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        self.items.iter()
    }

    /// Returns true if both sets hold the same elements
    ///
    /// `other` is read through [`ToUnsync`], so it may be any set type.
    pub fn equal<S: ToUnsync + ?Sized>(&self, other: &S) -> bool {
        let other = other.to_unsync();
        if self.len() != other.len() {
            return false;
        }
        self.items.iter().all(|elem| other.items.contains(elem))
    }

    /// Returns true if every element of this set is in `other`
    pub fn is_subset_of<S: ToUnsync + ?Sized>(&self, other: &S) -> bool {
        let other = other.to_unsync();
        if self.len() > other.len() {
            return false;
        }
        self.items.iter().all(|elem| other.items.contains(elem))
    }

    /// Returns true if every element of `other` is in this set
    pub fn is_superset_of<S: ToUnsync + ?Sized>(&self, other: &S) -> bool {
        let other = other.to_unsync();
        if self.len() < other.len() {
            return false;
        }
        other.items.iter().all(|elem| self.items.contains(elem))
    }

    /// Elements of this set that are not in `other`
    pub fn diff<S: ToUnsync + ?Sized>(&self, other: &S) -> Self {
        let other = other.to_unsync();
        let items = self
            .items
            .iter()
            .filter(|elem| !other.items.contains(*elem))
            .cloned()
            .collect();
        self.derived(items)
    }

    /// Elements in exactly one of the two sets
    pub fn symmetric_diff<S: ToUnsync + ?Sized>(&self, other: &S) -> Self {
        let other = other.to_unsync();
        let ours = self.diff(&*other);
        let theirs = other.diff(self);
        ours.unite(&theirs)
    }

    /// Elements in either set
    ///
    /// `other` is read through [`ToUnsync`]. The result keeps this set's options.
    pub fn unite<S: ToUnsync + ?Sized>(&self, other: &S) -> Self {
        let other = other.to_unsync();
        let mut items = self.items.clone();
        items.extend(other.items.iter().cloned());
        self.derived(items)
    }

    /// Elements present in both sets
    ///
    /// Walks the smaller of the two sets and probes the larger one.
    pub fn intersect<S: ToUnsync + ?Sized>(&self, other: &S) -> Self {
        let other = other.to_unsync();
        let (small, large) = if self.len() <= other.len() {
            (&self.items, &other.items)
        } else {
            (&other.items, &self.items)
        };
        let items = small
            .iter()
            .filter(|elem| large.contains(*elem))
            .cloned()
            .collect();
        self.derived(items)
    }

    /// Calls `f` with a running index for each element until it returns false
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_set::Set;
    ///
    /// let set = Set::from_values([1, 2, 3, 4]);
    /// let mut seen = Vec::new();
    /// set.range(|index, _| {
    ///     if index == 2 {
    ///         return false;
    ///     }
    ///     seen.push(index);
    ///     true
    /// });
    /// assert_eq!(seen, vec![0, 1]);
    /// ```
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(usize, &Value) -> bool,
    {
        for (index, elem) in self.items.iter().enumerate() {
            if !f(index, elem) {
                break;
            }
        }
    }

    /// Wraps this set for use from several threads without copying it
    pub fn into_sync(self) -> SyncSet {
        SyncSet::from(self)
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for Set {}

impl<V: Into<Value>> FromIterator<V> for Set {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Set[")?;
        for (i, elem) in self.items.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", elem)?;
        }
        write!(f, "]")
    }
}
