//! Named variable tables
//!
//! Formulas refer to variables as `$name`; the interpreter resolves them
//! through the [`VariableStore`] trait so callers can back the table with
//! whatever storage they already have. [`Variables`] is the in-memory
//! implementation.

use ahash::AHashMap;

use crate::value::{Constant, ScalarType};

/// Read-only access to named, typed values
pub trait VariableStore {
    /// Look up a variable by name (without the leading `$`)
    fn lookup(&self, name: &str) -> Option<Constant>;
}

/// An in-memory variable table
#[derive(Debug, Clone, Default)]
pub struct Variables {
    entries: AHashMap<String, Constant>,
}

impl Variables {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable, replacing any previous definition
    ///
    /// Date values are canonicalized on registration, so `2022-12-12`
    /// is stored as `2022-12-12 00:00:00`.
    pub fn insert<N, V>(&mut self, name: N, value: V, ty: ScalarType) -> Option<Constant>
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.entries.insert(name.into(), Constant::new(value, ty))
    }

    /// Register an already-built constant
    pub fn insert_constant<N: Into<String>>(&mut self, name: N, value: Constant) -> Option<Constant> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Constant> {
        self.entries.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Constant> {
        self.entries.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (name, value) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Constant)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl VariableStore for Variables {
    fn lookup(&self, name: &str) -> Option<Constant> {
        self.entries.get(name).cloned()
    }
}

impl<N, V> FromIterator<(N, V, ScalarType)> for Variables
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V, ScalarType)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        for (name, value, ty) in iter {
            vars.insert(name, value, ty);
        }
        vars
    }
}
