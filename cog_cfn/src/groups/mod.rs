//! Presentation groups for the parameter input form.
//!
//! Every registered parameter is appended to a named group. Groups and their
//! members keep insertion order for the whole assembly run.
//!
//! # Aliasing contract
//!
//! A [`MemberList`] is a shared handle. Every handle obtained for the same
//! group key, including the one embedded in a [`PresentationGroup`], points at
//! the same backing sequence. Mutating any handle (for example with
//! [`MemberList::prepend`]) is visible through all of them and in whatever is
//! serialised afterwards. Cloning a `MemberList` clones the handle, not the
//! members; use [`MemberList::to_vec`] for a snapshot.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Symbolic key naming a presentation group, such as `required` or `host`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(String);

impl GroupKey {
    /// Creates a key from any string-like value.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared, ordered list of canonical ids belonging to one group.
#[derive(Debug, Clone, Default)]
pub struct MemberList(Rc<RefCell<Vec<String>>>);

impl MemberList {
    /// Creates a detached list holding `ids` in order.
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Rc::new(RefCell::new(ids.into_iter().map(Into::into).collect())))
    }

    /// Appends an id to the end of the list.
    pub fn push(&self, id: impl Into<String>) {
        self.0.borrow_mut().push(id.into());
    }

    /// Inserts an id at the front of the list.
    ///
    /// No check is made that `id` names a declared parameter; see
    /// [`crate::AssemblyContext::prepend_declared`] for the checked form.
    pub fn prepend(&self, id: impl Into<String>) {
        self.0.borrow_mut().insert(0, id.into());
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether the list has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Whether `id` is a member.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.borrow().iter().any(|member| member == id)
    }

    /// Copies the current members out of the shared list.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Whether both handles point at the same backing list.
    #[must_use]
    pub fn aliases(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for MemberList {
    fn eq(&self, other: &Self) -> bool {
        self.aliases(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl Eq for MemberList {}

impl Serialize for MemberList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.borrow().serialize(serializer)
    }
}

/// Label plus live member list, rendered into the template interface
/// metadata as `{"Label": {"default": label}, "Parameters": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationGroup {
    /// Human-facing label for the group.
    pub label: String,
    /// Members of the group; aliases the registry when built from one.
    pub members: MemberList,
}

impl PresentationGroup {
    /// Builds a group from a fixed list of ids that is not tracked by any
    /// registry.
    #[must_use]
    pub fn fixed<I, S>(label: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            members: MemberList::from_ids(ids),
        }
    }
}

impl Serialize for PresentationGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("Label", &Label { default: &self.label })?;
        map.serialize_entry("Parameters", &self.members)?;
        map.end()
    }
}

#[derive(Serialize)]
struct Label<'a> {
    default: &'a str,
}

/// Ordered mapping from group key to member list for one assembly run.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: IndexMap<GroupKey, MemberList>,
}

impl GroupRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` to the group, creating the group on first use.
    pub fn record(&mut self, key: &GroupKey, id: impl Into<String>) {
        self.members(key).push(id);
    }

    /// Returns the live member list for `key`, creating an empty group if
    /// none exists yet.
    pub fn members(&mut self, key: &GroupKey) -> MemberList {
        self.groups.entry(key.clone()).or_default().clone()
    }

    /// Returns the live member list for `key` without creating it.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<MemberList> {
        self.groups.get(key).cloned()
    }

    /// Builds the presentation record for `key`; the returned members alias
    /// the registry.
    pub fn presentation_group(
        &mut self,
        key: &GroupKey,
        label: impl Into<String>,
    ) -> PresentationGroup {
        PresentationGroup {
            label: label.into(),
            members: self.members(key),
        }
    }

    /// Group keys in first-use order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
