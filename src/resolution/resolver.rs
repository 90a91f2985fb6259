use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, trace};

use crate::config::{ResolverConfig, DEFAULT_MERGE_SEPARATOR};
use crate::errors::Result;
use crate::model::CodeModel;
use crate::types::{Docstring, InheritResult, InheritStrategy, ObjectId};

/// Pass-scoped memo of merged docstrings, keyed by ancestor identity and
/// member name.
///
/// Within one pass a key is written at most once: member names are unique
/// within a class and each member is visited once. A merge that collects no
/// text is never cached, so an entry always holds a real merged result.
#[derive(Debug, Default)]
pub struct MergeCache {
    entries: HashMap<(ObjectId, String), String>,
}

impl MergeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn get(&self, scope: ObjectId, name: &str) -> Option<&str> {
        self.entries
            .get(&(scope, name.to_string()))
            .map(String::as_str)
    }

    fn insert(&mut self, scope: ObjectId, name: &str, merged: String) {
        self.entries.insert((scope, name.to_string()), merged);
    }
}

/// Resolves missing or partial docstrings on class members by inheriting
/// them from ancestor classes, following method-resolution order.
///
/// Strategy and separator are fixed at construction time. The merge cache is
/// scoped to one resolution pass: it is cleared when a pass starts and again
/// when it finishes, so sequential passes over different package trees never
/// see each other's merges. Passes must not run concurrently or reentrantly
/// on the same resolver.
pub struct DocstringResolver {
    strategy: InheritStrategy,
    merge_separator: String,
    merge_cache: MergeCache,
}

impl DocstringResolver {
    /// Creates a resolver from the host-supplied configuration.
    pub fn new(config: &ResolverConfig) -> Self {
        Self::with_strategy(config.strategy(), &config.merge_separator)
    }

    /// Creates a resolver with an explicit strategy and merge separator.
    pub fn with_strategy(strategy: InheritStrategy, merge_separator: &str) -> Self {
        Self {
            strategy,
            merge_separator: merge_separator.to_string(),
            merge_cache: MergeCache::new(),
        }
    }

    pub fn strategy(&self) -> InheritStrategy {
        self.strategy
    }

    /// Runs one resolution pass over the tree rooted at `root`, mutating
    /// docstrings in place.
    ///
    /// Intended to be invoked once per fully loaded package. The pass never
    /// fails: members that cannot be resolved are skipped and counted in the
    /// returned summary.
    pub fn resolve(&mut self, model: &mut CodeModel, root: ObjectId) -> InheritResult {
        let start = Instant::now();
        let separator = self.merge_separator.clone();
        let mut result = InheritResult::default();

        self.merge_cache.clear();
        if let Err(err) = self.inherit(model, root, self.strategy, &separator, &mut result) {
            debug!(root = %model.object(root).name, %err, "root object could not be resolved");
        }
        self.merge_cache.clear();

        result.duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            root = %model.object(root).name,
            classes = result.classes_visited,
            assigned = result.docstrings_assigned,
            "docstring resolution pass finished"
        );
        result
    }

    fn inherit(
        &mut self,
        model: &mut CodeModel,
        id: ObjectId,
        strategy: InheritStrategy,
        separator: &str,
        result: &mut InheritResult,
    ) -> Result<()> {
        if model.object(id).is_module() {
            for member in model.object(id).members().to_vec() {
                if model.object(member).is_alias() {
                    result.aliases_skipped += 1;
                    continue;
                }
                // A member that cannot be resolved (e.g. a class whose bases
                // are unresolved aliases) is skipped; siblings still resolve.
                if let Err(err) = self.inherit(model, member, strategy, separator, result) {
                    trace!(member = %model.object(member).name, %err, "skipping unresolvable module member");
                    result.members_skipped += 1;
                }
            }
        } else if model.object(id).is_class() {
            result.classes_visited += 1;
            for member in model.object(id).members().to_vec() {
                if model.object(member).is_alias() {
                    result.aliases_skipped += 1;
                    continue;
                }

                if model.object(member).is_class() {
                    // Nested classes resolve independently with the default
                    // strategy and separator, regardless of the outer
                    // configuration.
                    self.inherit(
                        model,
                        member,
                        InheritStrategy::IfNotPresent,
                        DEFAULT_MERGE_SEPARATOR,
                        result,
                    )?;
                }

                result.members_considered += 1;
                let Some(docstring) = self.construct(model, member, strategy, separator)? else {
                    continue;
                };

                match strategy {
                    InheritStrategy::IfNotPresent => {
                        if model.docstring_text(member).is_none() {
                            model.set_docstring(member, docstring);
                            result.docstrings_assigned += 1;
                        }
                    }
                    InheritStrategy::Merge => {
                        // The member's own docstring was already folded into
                        // the merge as its most specific fragment.
                        model.set_docstring(member, docstring);
                        result.docstrings_assigned += 1;
                    }
                }
            }
        }
        Ok(())
    }

    /// Builds the docstring a member should receive, or `None` when no
    /// ancestor (or, under merge, the member's own class) contributes text.
    fn construct(
        &mut self,
        model: &CodeModel,
        member: ObjectId,
        strategy: InheritStrategy,
        separator: &str,
    ) -> Result<Option<Docstring>> {
        // Without a parent there is no ancestor chain to inherit from.
        let Some(parent) = model.object(member).parent else {
            return Ok(None);
        };
        let name = model.object(member).name.clone();

        match strategy {
            InheritStrategy::IfNotPresent => {
                for ancestor in model.mro(parent)? {
                    if let Some(sibling) = model.member_named(*ancestor, &name) {
                        if let Some(text) = model.docstring_text(sibling) {
                            return Ok(Some(Docstring::new(text)));
                        }
                    }
                }
                Ok(None)
            }
            InheritStrategy::Merge => {
                // The direct container leads the walk so the member's own
                // (possibly already merged) docstring participates, followed
                // by the true ancestors in MRO order.
                let mut order = vec![parent];
                order.extend_from_slice(model.mro(parent)?);

                let mut fragments: Vec<String> = Vec::new();
                for entry in order {
                    if let Some(cached) = self.merge_cache.get(entry, &name) {
                        // The cached merge already covers everything further
                        // up the chain; walking past it would duplicate text.
                        fragments.push(cached.to_string());
                        break;
                    }
                    if let Some(sibling) = model.member_named(entry, &name) {
                        if let Some(text) = model.docstring_text(sibling) {
                            fragments.push(text.to_string());
                        }
                    }
                }

                if fragments.is_empty() {
                    // Absence is never cached; a descendant must not mistake
                    // it for a merged result.
                    return Ok(None);
                }

                // Most general text first, most specific last.
                fragments.reverse();
                let merged = fragments.join(separator);
                self.merge_cache.insert(parent, &name, merged.clone());
                Ok(Some(Docstring::new(merged)))
            }
        }
    }
}
