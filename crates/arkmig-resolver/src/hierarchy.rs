//! Type-hierarchy components.
//!
//! Two types belong to the same component when one is (transitively) a
//! supertype of the other, or both share a subtype. Overload renaming is
//! decided per component so that a method keeps one name across every
//! declaration, override and call site that can observe it.
//!
//! Components are computed with `ena`'s union-find table and then frozen
//! into a plain lookup map.

use ena::unify::{InPlaceUnificationTable, UnifyKey};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeKey(pub u32);

impl UnifyKey for TypeKey {
    type Value = ();

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        TypeKey(u)
    }

    fn tag() -> &'static str {
        "TypeKey"
    }
}

/// Builder collecting subtype links.
pub struct HierarchyComponents {
    keys: IndexMap<String, TypeKey>,
    table: InPlaceUnificationTable<TypeKey>,
}

impl HierarchyComponents {
    pub fn new() -> Self {
        HierarchyComponents {
            keys: IndexMap::new(),
            table: InPlaceUnificationTable::new(),
        }
    }

    /// Register a type, returning its key. Idempotent.
    pub fn add(&mut self, name: &str) -> TypeKey {
        if let Some(&key) = self.keys.get(name) {
            return key;
        }
        let key = self.table.new_key(());
        self.keys.insert(name.to_string(), key);
        key
    }

    /// Record that `sub` has `sup` as a direct supertype.
    pub fn link(&mut self, sub: &str, sup: &str) {
        let a = self.add(sub);
        let b = self.add(sup);
        self.table.union(a, b);
    }

    pub fn same_component(&mut self, a: &str, b: &str) -> bool {
        match (self.keys.get(a).copied(), self.keys.get(b).copied()) {
            (Some(a), Some(b)) => self.table.unioned(a, b),
            _ => a == b,
        }
    }

    /// Freeze into a map. Component ids are dense and follow the order in
    /// which each component's first type was added.
    pub fn finish(mut self) -> ComponentMap {
        let mut by_root: FxHashMap<TypeKey, u32> = FxHashMap::default();
        let mut id_of = FxHashMap::default();
        let mut members: Vec<Vec<String>> = Vec::new();
        let names: Vec<(String, TypeKey)> = self.keys.drain(..).collect();
        for (name, key) in names {
            let root = self.table.find(key);
            let id = *by_root.entry(root).or_insert_with(|| {
                members.push(Vec::new());
                (members.len() - 1) as u32
            });
            members[id as usize].push(name.clone());
            id_of.insert(name, id);
        }
        ComponentMap { id_of, members }
    }
}

impl Default for HierarchyComponents {
    fn default() -> Self {
        Self::new()
    }
}

/// Frozen component assignment.
#[derive(Debug, Clone, Default)]
pub struct ComponentMap {
    id_of: FxHashMap<String, u32>,
    members: Vec<Vec<String>>,
}

impl ComponentMap {
    pub fn component_of(&self, name: &str) -> Option<u32> {
        self.id_of.get(name).copied()
    }

    /// Types in the component, in registration order.
    pub fn members(&self, id: u32) -> &[String] {
        self.members.get(id as usize).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[String])> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, m)| (i as u32, m.as_slice()))
    }
}
