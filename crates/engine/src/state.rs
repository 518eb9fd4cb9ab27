use std::{
    collections::BTreeMap,
    fmt::Display,
    sync::{PoisonError, RwLock},
};

use log::debug;

use crate::{
    ast::Name,
    error::{ArborError, ArborResult},
};

pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

const BUILTIN_CONSTANTS: [(&str, f64); 3] = [
    ("pi", std::f64::consts::PI),
    ("e", std::f64::consts::E),
    ("fi", GOLDEN_RATIO),
];

/// Name resolution as seen by the evaluator.
pub trait Symbols {
    fn constant(&self, name: &str) -> Option<f64>;

    fn variable(&self, name: &str) -> Option<f64>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    constants: BTreeMap<String, f64>,
    variables: BTreeMap<String, f64>,
}

impl SymbolTable {
    /// A table holding the builtin constants and no variables.
    pub fn new() -> Self {
        let mut table = Self::empty();
        for (name, value) in BUILTIN_CONSTANTS {
            table.constants.insert(name.to_string(), value);
        }
        table
    }

    pub fn empty() -> Self {
        Self {
            constants: BTreeMap::new(),
            variables: BTreeMap::new(),
        }
    }

    pub fn register_constant(&mut self, name: &str, value: f64) -> ArborResult<()> {
        let name = Name::new("constant", name)?;
        if self.constants.contains_key(name.as_str()) {
            return Err(ArborError::duplicate_symbol(name.as_str()));
        }
        debug!("registering constant `{name}` = {value}");
        self.constants.insert(name.as_str().to_string(), value);
        Ok(())
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    pub fn constants(&self) -> impl Iterator<Item = (&str, f64)> {
        self.constants.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn number_of_constants(&self) -> usize {
        self.constants.len()
    }

    /// Creates a new variable, failing if the name is already taken.
    pub fn create_variable(&mut self, name: &str, value: f64) -> ArborResult<()> {
        let name = Name::new("variable", name)?;
        if self.variables.contains_key(name.as_str()) {
            return Err(ArborError::duplicate_symbol(name.as_str()));
        }
        debug!("creating variable `{name}` = {value}");
        self.variables.insert(name.as_str().to_string(), value);
        Ok(())
    }

    pub fn create_variable_default(&mut self, name: &str) -> ArborResult<()> {
        self.create_variable(name, 0.0)
    }

    /// Binds a variable, creating it if needed. Returns false if overwriting
    /// a previously stored value.
    pub fn set_variable(&mut self, name: &str, value: f64) -> ArborResult<bool> {
        let name = Name::new("variable", name)?;
        debug!("setting variable `{name}` = {value}");
        Ok(self
            .variables
            .insert(name.as_str().to_string(), value)
            .is_none())
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<f64> {
        let removed = self.variables.remove(name);
        if removed.is_some() {
            debug!("removed variable `{name}`");
        }
        removed
    }

    pub fn clear_variables(&mut self) {
        debug!("clearing {} variables", self.variables.len());
        self.variables.clear();
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, f64)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn number_of_variables(&self) -> usize {
        self.variables.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbols for SymbolTable {
    fn constant(&self, name: &str) -> Option<f64> {
        SymbolTable::constant(self, name)
    }

    fn variable(&self, name: &str) -> Option<f64> {
        SymbolTable::variable(self, name)
    }
}

/// Every lookup takes the read lock on its own, so writers may rebind
/// names between two lookups of the same evaluation.
impl<T> Symbols for RwLock<T>
where
    T: Symbols,
{
    fn constant(&self, name: &str) -> Option<f64> {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .constant(name)
    }

    fn variable(&self, name: &str) -> Option<f64> {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .variable(name)
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Constants: {}",
            self.constants
                .iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect::<Vec<_>>()
                .join(", ")
        )?;
        write!(
            f,
            "Variables: {}",
            self.variables
                .iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;
    use crate::error::ArborErrorKind;

    #[test]
    fn seeded_constants() {
        let table = SymbolTable::new();
        assert_eq!(Some(std::f64::consts::PI), table.constant("pi"));
        assert_eq!(Some(std::f64::consts::E), table.constant("e"));
        assert_eq!(Some(GOLDEN_RATIO), table.constant("fi"));
        assert_eq!(3, table.number_of_constants());
        assert_eq!(0, table.number_of_variables());
        assert_eq!(0, SymbolTable::empty().number_of_constants());
    }

    #[test]
    fn registering_constants() {
        let mut table = SymbolTable::new();
        table.register_constant("Euler", 0.5772156649).unwrap();
        assert_eq!(Some(0.5772156649), table.constant("Euler"));

        let err = table.register_constant("pi", 3.0).unwrap_err();
        assert_eq!(ArborErrorKind::DuplicateSymbol, err.kind);
        assert_eq!(Some(std::f64::consts::PI), table.constant("pi"));

        let err = table.register_constant("", 3.0).unwrap_err();
        assert_eq!(ArborErrorKind::InvalidName, err.kind);
    }

    #[test]
    fn variable_lifecycle() {
        let mut table = SymbolTable::new();
        table.create_variable("r", 10.0).unwrap();
        table.create_variable_default("z").unwrap();
        assert_eq!(Some(10.0), table.variable("r"));
        assert_eq!(Some(0.0), table.variable("z"));
        assert!(table.has_variable("r"));

        let err = table.create_variable("r", 1.0).unwrap_err();
        assert_eq!(ArborErrorKind::DuplicateSymbol, err.kind);

        assert!(!table.set_variable("r", 2.0).unwrap());
        assert_eq!(Some(2.0), table.variable("r"));
        assert!(table.set_variable("s", 5.0).unwrap());

        assert_eq!(Some(2.0), table.remove_variable("r"));
        assert_eq!(None, table.remove_variable("r"));
        assert!(!table.has_variable("r"));

        table.clear_variables();
        assert_eq!(0, table.variables().count());
        // Constants survive clearing variables
        assert_eq!(3, table.constants().count());
    }

    #[test]
    fn namespaces_are_separate() {
        let mut table = SymbolTable::new();
        table.set_variable("pi", 3.0).unwrap();
        assert_eq!(Some(3.0), table.variable("pi"));
        assert_eq!(Some(std::f64::consts::PI), table.constant("pi"));
        assert_eq!(None, table.variable("e"));
    }

    #[test]
    fn empty_variable_names() {
        let mut table = SymbolTable::new();
        let err = table.set_variable("", 1.0).unwrap_err();
        assert_eq!(ArborErrorKind::InvalidName, err.kind);
        assert_eq!(
            ArborErrorKind::InvalidName,
            table.create_variable_default("").unwrap_err().kind
        );
    }

    #[test]
    fn display_lists_both_namespaces() {
        let mut table = SymbolTable::empty();
        table.register_constant("c", 1.5).unwrap();
        table.set_variable("r", 10.0).unwrap();
        table.set_variable("s", 5.0).unwrap();
        assert_eq!("Constants: c = 1.5\nVariables: r = 10, s = 5", table.to_string());
    }

    #[test]
    fn shared_lookups() {
        let shared = Arc::new(RwLock::new(SymbolTable::new()));
        shared.write().unwrap().set_variable("r", 10.0).unwrap();

        let readers = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    (0..100)
                        .map(|_| Symbols::variable(shared.as_ref(), "r"))
                        .all(|value| matches!(value, Some(v) if v == 10.0 || v == 20.0))
                })
            })
            .collect::<Vec<_>>();
        shared.write().unwrap().set_variable("r", 20.0).unwrap();

        for reader in readers {
            assert!(reader.join().unwrap());
        }
        assert_eq!(Some(20.0), Symbols::variable(shared.as_ref(), "r"));
        assert_eq!(Some(std::f64::consts::E), Symbols::constant(shared.as_ref(), "e"));
    }
}
