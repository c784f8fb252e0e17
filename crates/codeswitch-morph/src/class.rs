// Suffix classes and class identifiers

use std::fmt;

use hashbrown::HashMap;

use crate::MorphError;

/// Interned suffix class identifier (index into the [`ClassTable`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u16);

impl ClassId {
    /// Id for the class at `index` in declaration order. Indices beyond the
    /// representable range saturate and never match a declared class.
    pub fn from_index(index: usize) -> Self {
        ClassId(u16::try_from(index).unwrap_or(u16::MAX))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A morphological suffix class such as `CASE` or `PLURAL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixClass {
    pub name: String,
    /// Gloss tag used for entries of this class that declare none.
    pub tag: Option<String>,
    /// Whether a token may end with a suffix of this class.
    pub accepting: bool,
    /// Whether this class may follow itself.
    pub repeatable: bool,
}

impl SuffixClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            accepting: false,
            repeatable: false,
        }
    }
}

/// Classes in declaration order, with name lookup.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: Vec<SuffixClass>,
    by_name: HashMap<String, ClassId>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class. Names are unique and non-empty.
    pub fn add(&mut self, class: SuffixClass) -> Result<ClassId, MorphError> {
        let name = class.name.trim().to_string();
        if name.is_empty() {
            return Err(MorphError::EmptyClassName);
        }
        if self.by_name.contains_key(&name) {
            return Err(MorphError::DuplicateClass(name));
        }
        let index = u16::try_from(self.classes.len())
            .map_err(|_| MorphError::TooManyClasses(self.classes.len() + 1))?;
        let id = ClassId(index);
        self.by_name.insert(name.clone(), id);
        self.classes.push(SuffixClass { name, ..class });
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name.trim()).copied()
    }

    pub fn get(&self, id: ClassId) -> Option<&SuffixClass> {
        self.classes.get(id.index())
    }

    /// Class name, or an empty string for an id from another table.
    pub fn name(&self, id: ClassId) -> &str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(ClassId::from_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &SuffixClass)> + '_ {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| (ClassId::from_index(i), c))
    }
}
