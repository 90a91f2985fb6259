use serde::{Deserialize, Serialize};

/// Identifier of an object within one `CodeModel` arena.
///
/// Ids are plain indices and are only meaningful for the arena that issued
/// them; they carry no identity across models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    /// Returns the raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Kinds of objects in the code model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Module,
    Class,
    Function,
    Attribute,
    Alias,
}

#[allow(clippy::should_implement_trait)]
impl ObjectKind {
    /// Returns the string representation of this object kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Module => "module",
            ObjectKind::Class => "class",
            ObjectKind::Function => "function",
            ObjectKind::Attribute => "attribute",
            ObjectKind::Alias => "alias",
        }
    }

    /// Parses a string into an `ObjectKind`, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<ObjectKind> {
        match s {
            "module" => Some(ObjectKind::Module),
            "class" => Some(ObjectKind::Class),
            "function" => Some(ObjectKind::Function),
            "attribute" => Some(ObjectKind::Attribute),
            "alias" => Some(ObjectKind::Alias),
            _ => None,
        }
    }
}

/// An immutable docstring value.
///
/// Constructed fresh whenever a docstring is inherited or merged; never
/// shared by reference with the ancestor it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Docstring {
    value: String,
}

impl Docstring {
    /// Creates a docstring wrapping the given text.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the docstring text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if the text is empty. An empty docstring is treated
    /// the same as a missing one at every comparison point.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Strategy used when inheriting docstrings from ancestor classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InheritStrategy {
    /// Take the first docstring found along the MRO, only for members that
    /// have none of their own.
    #[default]
    IfNotPresent,
    /// Merge all ancestor docstrings with the member's own, most general
    /// first, always overwriting.
    Merge,
}

#[allow(clippy::should_implement_trait)]
impl InheritStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InheritStrategy::IfNotPresent => "if_not_present",
            InheritStrategy::Merge => "merge",
        }
    }

    pub fn from_str(s: &str) -> Option<InheritStrategy> {
        match s {
            "if_not_present" => Some(InheritStrategy::IfNotPresent),
            "merge" => Some(InheritStrategy::Merge),
            _ => None,
        }
    }
}

/// Summary of one docstring-resolution pass over a package tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InheritResult {
    /// Number of classes visited during the traversal.
    pub classes_visited: usize,
    /// Number of class members considered for inheritance.
    pub members_considered: usize,
    /// Number of docstrings actually written back onto members.
    pub docstrings_assigned: usize,
    /// Number of alias members skipped outright.
    pub aliases_skipped: usize,
    /// Number of module members skipped because resolving them failed.
    pub members_skipped: usize,
    /// Time taken in milliseconds.
    pub duration_ms: u64,
}
