/// Docstring resolution module.
///
/// Walks a loaded code model and fills in missing or partial docstrings on
/// class members by inheriting them from ancestor classes along the MRO.
mod resolver;

pub use resolver::{DocstringResolver, MergeCache};
