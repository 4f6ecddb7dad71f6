/// Behavior switches shared by every set type in this crate
///
/// Options are fixed when a set is built. Sets derived from another set
/// (copies and the results of set algebra) carry the options of the set the
/// operation was called on.
///
/// # Examples
///
/// ```
/// use sovran_set::{Set, SetError, SetOptions};
///
/// let mut set = Set::with_options(SetOptions::new().strict_duplicates(true));
/// set.add(1).unwrap();
/// assert!(matches!(set.add(1), Err(SetError::AlreadyExists(_))));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetOptions {
    strict_duplicates: bool,
}

impl SetOptions {
    /// Default options: re-adding an existing element silently succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with strict duplicate mode turned on
    pub fn strict() -> Self {
        Self::new().strict_duplicates(true)
    }

    /// When enabled, `add` reports `SetError::AlreadyExists` for an element
    /// that is already present instead of succeeding silently
    pub fn strict_duplicates(mut self, enabled: bool) -> Self {
        self.strict_duplicates = enabled;
        self
    }

    /// Returns true if re-adding a present element is an error
    pub fn is_strict(&self) -> bool {
        self.strict_duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lenient() {
        assert!(!SetOptions::default().is_strict());
        assert_eq!(SetOptions::new(), SetOptions::default());
    }

    #[test]
    fn test_builder() {
        assert!(SetOptions::strict().is_strict());
        assert!(!SetOptions::strict().strict_duplicates(false).is_strict());
    }
}
