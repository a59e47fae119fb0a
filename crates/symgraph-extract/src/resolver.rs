//! Relationship resolution.
//!
//! Runs only after the builder has produced the complete symbol list for a
//! file, since references may point at symbols declared later. Re-walks the
//! tree collecting reference drafts from the front end, resolves names
//! against a last-wins lookup table, and emits typed edges with confidence
//! scores. Unresolved references are dropped silently; that is the expected
//! outcome for calls into imported or external code.

use std::collections::HashMap;

use symgraph_core::{Relationship, RelationshipKind, RelationshipTarget, Symbol, SymbolKind};
use tracing::debug;
use tree_sitter::{Node, Tree};

use crate::frontend::{LanguageFrontend, ReferenceDraft};

/// Resolves references into relationships for one file.
pub struct RelationshipResolver<'a> {
    frontend: &'a dyn LanguageFrontend,
    source: &'a [u8],
    symbols: &'a [Symbol],
    /// Simple name -> symbol index; last declaration wins on collision.
    by_name: HashMap<&'a str, usize>,
    /// Same keying, restricted to type-like symbols. Heritage lookups hit
    /// this table first so a constructor or function sharing its class's
    /// name cannot shadow the class itself.
    types_by_name: HashMap<&'a str, usize>,
}

impl<'a> RelationshipResolver<'a> {
    /// Resolve all references in a tree against a completed symbol list.
    pub fn resolve(
        frontend: &'a dyn LanguageFrontend,
        tree: &'a Tree,
        source: &'a [u8],
        symbols: &'a [Symbol],
    ) -> Vec<Relationship> {
        let mut by_name = HashMap::new();
        let mut types_by_name = HashMap::new();
        for (index, symbol) in symbols.iter().enumerate() {
            by_name.insert(symbol.name.as_str(), index);
            if symbol.kind.is_type_like() {
                types_by_name.insert(symbol.name.as_str(), index);
            }
        }

        let resolver = Self {
            frontend,
            source,
            symbols,
            by_name,
            types_by_name,
        };
        let mut relationships = Vec::new();
        resolver.walk(tree.root_node(), &mut relationships);
        relationships
    }

    fn walk(&self, node: Node, out: &mut Vec<Relationship>) {
        for draft in self.frontend.references(node, self.source) {
            match self.resolve_draft(&draft) {
                Some(relationship) => out.push(relationship),
                None => {
                    debug!(
                        target_name = draft.target.as_str(),
                        kind = %draft.kind,
                        line = draft.line,
                        "reference did not resolve; dropped"
                    );
                }
            }
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        drop(cursor);
        for child in children {
            self.walk(child, out);
        }
    }

    fn resolve_draft(&self, draft: &ReferenceDraft) -> Option<Relationship> {
        let from = self.source_symbol(draft)?;

        // Import edges always point outside the file; resolving them against
        // the file's own `Import` symbol would only produce self-edges.
        if draft.kind == RelationshipKind::Imports {
            return Some(Relationship {
                from: from.id.clone(),
                to: RelationshipTarget::External(draft.target.clone()),
                kind: draft.kind,
                line: draft.line,
                confidence: draft.confidence,
            });
        }

        match self.lookup_target(draft) {
            Some(target) => {
                let mut kind = draft.kind;
                // The grammar alone cannot always tell extension from
                // implementation; the resolved target's own kind decides.
                // An interface extending another interface stays Extends.
                if kind == RelationshipKind::Extends
                    && target.kind == SymbolKind::Interface
                    && from.kind != SymbolKind::Interface
                {
                    kind = RelationshipKind::Implements;
                }
                if !target_accepts(kind, target.kind) {
                    return None;
                }
                if target.id == from.id {
                    return None;
                }
                Some(Relationship {
                    from: from.id.clone(),
                    to: RelationshipTarget::Symbol(target.id.clone()),
                    kind,
                    line: draft.line,
                    confidence: draft.confidence,
                })
            }
            None if draft.keep_external => Some(Relationship {
                from: from.id.clone(),
                to: RelationshipTarget::External(draft.target.clone()),
                kind: draft.kind,
                line: draft.line,
                confidence: draft.confidence,
            }),
            None => None,
        }
    }

    /// The edge's source: an explicit from-name when the front end supplied
    /// one, otherwise the smallest symbol whose span encloses the reference.
    fn source_symbol(&self, draft: &ReferenceDraft) -> Option<&Symbol> {
        if let Some(name) = draft.from_name.as_deref() {
            if is_heritage(draft.kind) {
                if let Some(symbol) = self.lookup_in(&self.types_by_name, name) {
                    return Some(symbol);
                }
            }
            return self.lookup_in(&self.by_name, name);
        }
        self.symbols
            .iter()
            .filter(|symbol| {
                symbol.span.start_byte <= draft.byte && draft.byte < symbol.span.end_byte
            })
            .min_by_key(|symbol| symbol.span.len())
    }

    /// Heritage targets resolve against type-like symbols first; everything
    /// else goes through the flat table.
    fn lookup_target(&self, draft: &ReferenceDraft) -> Option<&Symbol> {
        if is_heritage(draft.kind) {
            if let Some(symbol) = self.lookup_in(&self.types_by_name, &draft.target) {
                return Some(symbol);
            }
        }
        self.lookup_in(&self.by_name, &draft.target)
    }

    /// Name lookup: exact first, then the last path segment (`a::b::c`,
    /// `pkg.Foo`) for qualified targets.
    fn lookup_in(&self, map: &HashMap<&'a str, usize>, name: &str) -> Option<&Symbol> {
        if let Some(&index) = map.get(name) {
            return Some(&self.symbols[index]);
        }
        let simple = name
            .rsplit("::")
            .next()
            .and_then(|segment| segment.rsplit('.').next())
            .unwrap_or(name);
        if simple == name {
            return None;
        }
        map.get(simple).map(|&index| &self.symbols[index])
    }
}

fn is_heritage(kind: RelationshipKind) -> bool {
    matches!(kind, RelationshipKind::Extends | RelationshipKind::Implements)
}

/// Whether a resolved target's kind is plausible for the edge kind.
fn target_accepts(kind: RelationshipKind, target: SymbolKind) -> bool {
    match kind {
        RelationshipKind::Calls => target.is_callable(),
        RelationshipKind::Extends | RelationshipKind::Implements => target.is_type_like(),
        RelationshipKind::Uses
        | RelationshipKind::Imports
        | RelationshipKind::References => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extends_accepts_only_type_like_targets() {
        assert!(target_accepts(RelationshipKind::Extends, SymbolKind::Class));
        assert!(target_accepts(
            RelationshipKind::Implements,
            SymbolKind::Interface
        ));
        assert!(!target_accepts(
            RelationshipKind::Extends,
            SymbolKind::Function
        ));
    }

    #[test]
    fn calls_accept_only_callable_targets() {
        assert!(target_accepts(RelationshipKind::Calls, SymbolKind::Function));
        assert!(target_accepts(RelationshipKind::Calls, SymbolKind::Method));
        assert!(!target_accepts(RelationshipKind::Calls, SymbolKind::Field));
    }
}
