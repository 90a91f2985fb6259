use serde::{Deserialize, Serialize};

use crate::errors::{DocGraftError, Result};
use crate::types::{Docstring, ObjectId, ObjectKind};

/// State of a class's method-resolution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum MroState {
    /// No linearization supplied; the class has no ancestors.
    Empty,
    /// Externally computed linearization, most-direct ancestor first,
    /// excluding the class itself.
    Linearized(Vec<ObjectId>),
    /// Linearization unavailable because the named base is an alias whose
    /// target is not yet resolvable.
    Blocked { base: String },
}

/// A single object in the code model: a module, class, function, attribute,
/// or alias.
///
/// Ownership of the tree flows top-down through `CodeModel`; `parent` is a
/// non-owning back-reference (an arena index) used purely for lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeObject {
    pub name: String,
    pub kind: ObjectKind,
    pub parent: Option<ObjectId>,
    pub docstring: Option<Docstring>,
    /// Target of a resolved alias; `None` for unresolved aliases and for
    /// every non-alias object.
    pub alias_target: Option<ObjectId>,
    /// Member ids in insertion order. Names are unique within one object.
    members: Vec<ObjectId>,
    mro: MroState,
}

impl CodeObject {
    pub fn is_module(&self) -> bool {
        self.kind == ObjectKind::Module
    }

    pub fn is_class(&self) -> bool {
        self.kind == ObjectKind::Class
    }

    pub fn is_alias(&self) -> bool {
        self.kind == ObjectKind::Alias
    }

    /// Returns member ids in insertion order.
    pub fn members(&self) -> &[ObjectId] {
        &self.members
    }
}

/// Arena-owned object graph for one parsed package.
///
/// The model is built by an external loader (parsing and MRO computation
/// happen elsewhere); this crate only navigates it and writes docstrings
/// back onto members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeModel {
    objects: Vec<CodeObject>,
}

impl CodeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects in the arena.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Adds a module. Top-level modules pass `parent = None`; nested modules
    /// name their containing module.
    pub fn add_module(&mut self, name: &str, parent: Option<ObjectId>) -> Result<ObjectId> {
        self.insert(name, ObjectKind::Module, parent, None)
    }

    /// Adds a class under the given module or class.
    pub fn add_class(&mut self, name: &str, parent: ObjectId) -> Result<ObjectId> {
        self.insert(name, ObjectKind::Class, Some(parent), None)
    }

    /// Adds a function (method, when the parent is a class).
    pub fn add_function(&mut self, name: &str, parent: ObjectId) -> Result<ObjectId> {
        self.insert(name, ObjectKind::Function, Some(parent), None)
    }

    /// Adds an attribute under the given class or module.
    pub fn add_attribute(&mut self, name: &str, parent: ObjectId) -> Result<ObjectId> {
        self.insert(name, ObjectKind::Attribute, Some(parent), None)
    }

    /// Adds an alias (re-export). `target` is `None` while the aliased
    /// object has not been materialized yet.
    pub fn add_alias(
        &mut self,
        name: &str,
        parent: ObjectId,
        target: Option<ObjectId>,
    ) -> Result<ObjectId> {
        self.insert(name, ObjectKind::Alias, Some(parent), target)
    }

    fn insert(
        &mut self,
        name: &str,
        kind: ObjectKind,
        parent: Option<ObjectId>,
        alias_target: Option<ObjectId>,
    ) -> Result<ObjectId> {
        if let Some(parent_id) = parent {
            if self.member_named(parent_id, name).is_some() {
                return Err(DocGraftError::DuplicateMember {
                    name: name.to_string(),
                    parent: self.objects[parent_id.0].name.clone(),
                });
            }
        }

        let id = ObjectId(self.objects.len());
        self.objects.push(CodeObject {
            name: name.to_string(),
            kind,
            parent,
            docstring: None,
            alias_target,
            members: Vec::new(),
            mro: MroState::Empty,
        });

        if let Some(parent_id) = parent {
            self.objects[parent_id.0].members.push(id);
        }

        Ok(id)
    }

    /// Returns the object for an id issued by this arena.
    pub fn object(&self, id: ObjectId) -> &CodeObject {
        &self.objects[id.0]
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut CodeObject {
        &mut self.objects[id.0]
    }

    /// Looks up a member of `scope` by name.
    pub fn member_named(&self, scope: ObjectId, name: &str) -> Option<ObjectId> {
        self.objects[scope.0]
            .members
            .iter()
            .copied()
            .find(|m| self.objects[m.0].name == name)
    }

    /// Stores the externally computed MRO linearization for a class.
    ///
    /// The sequence must list ancestor classes only, most-direct first,
    /// excluding the class itself. Acyclicity and determinism are the
    /// loader's responsibility and are trusted here.
    pub fn set_mro(&mut self, class: ObjectId, linearization: Vec<ObjectId>) -> Result<()> {
        self.require_class(class)?;
        for ancestor in &linearization {
            self.require_class(*ancestor)?;
        }
        self.objects[class.0].mro = MroState::Linearized(linearization);
        Ok(())
    }

    /// Marks a class's MRO as unavailable because `base` is an alias whose
    /// target cannot be resolved yet. `mro()` will fail for this class until
    /// a linearization is supplied.
    pub fn block_mro(&mut self, class: ObjectId, base: &str) -> Result<()> {
        self.require_class(class)?;
        self.objects[class.0].mro = MroState::Blocked {
            base: base.to_string(),
        };
        Ok(())
    }

    /// Returns the ancestor linearization for a class, most-direct first.
    ///
    /// A class without a stored linearization has no ancestors. A class whose
    /// linearization is blocked on an unresolved alias base yields an
    /// `AliasResolution` error.
    pub fn mro(&self, class: ObjectId) -> Result<&[ObjectId]> {
        let obj = &self.objects[class.0];
        if !obj.is_class() {
            return Err(DocGraftError::NotAClass {
                name: obj.name.clone(),
            });
        }
        match &obj.mro {
            MroState::Empty => Ok(&[]),
            MroState::Linearized(ancestors) => Ok(ancestors),
            MroState::Blocked { base } => Err(DocGraftError::AliasResolution {
                name: base.clone(),
                scope: obj.name.clone(),
            }),
        }
    }

    /// Returns the docstring text of an object, or `None` when the docstring
    /// is absent or empty. Empty docstrings never contribute text and never
    /// block inheritance.
    pub fn docstring_text(&self, id: ObjectId) -> Option<&str> {
        match &self.objects[id.0].docstring {
            Some(docstring) if !docstring.is_empty() => Some(docstring.value()),
            _ => None,
        }
    }

    /// Writes a docstring onto an object.
    pub fn set_docstring(&mut self, id: ObjectId, docstring: Docstring) {
        self.objects[id.0].docstring = Some(docstring);
    }

    fn require_class(&self, id: ObjectId) -> Result<()> {
        let obj = &self.objects[id.0];
        if obj.is_class() {
            Ok(())
        } else {
            Err(DocGraftError::NotAClass {
                name: obj.name.clone(),
            })
        }
    }
}
