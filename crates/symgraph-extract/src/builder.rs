//! Symbol table construction: one pre-order, depth-first walk per file.
//!
//! The walk is identical for every language front end. Parent identity is
//! threaded down as a traversal parameter, a call-scoped visited set keyed
//! on (line, column, node kind) prevents double extraction, grouped
//! declarations flatten into several symbols sharing one parent, and a
//! failure at any node is caught at that node's boundary so extraction
//! continues on its siblings.

use std::collections::HashSet;

use symgraph_core::{ExtractConfig, Symbol, SymbolId, SymbolKind, SymgraphError};
use tracing::{debug, warn};
use tree_sitter::{Node, Tree};

use crate::fallback;
use crate::frontend::{LanguageFrontend, SymbolDraft};
use crate::helpers::truncate;
use crate::prepass::AssociationTable;

/// Position key for the per-call visited set.
type PositionKey = (usize, usize, u16);

/// Builds the flat symbol list for one file.
pub struct SymbolTableBuilder<'a> {
    frontend: &'a dyn LanguageFrontend,
    config: &'a ExtractConfig,
    source: &'a [u8],
    file_path: &'a str,
    associations: AssociationTable,
    seen: HashSet<PositionKey>,
    symbols: Vec<Symbol>,
}

impl<'a> SymbolTableBuilder<'a> {
    /// Walk a parsed tree and return all symbols, in pre-order.
    pub fn build(
        frontend: &'a dyn LanguageFrontend,
        config: &'a ExtractConfig,
        tree: &'a Tree,
        source: &'a [u8],
        file_path: &'a str,
    ) -> Vec<Symbol> {
        let root = tree.root_node();
        let associations =
            AssociationTable::build(frontend, root, source, config.association_collision);
        if !associations.is_empty() {
            debug!(
                file = file_path,
                count = associations.len(),
                "association pre-pass recorded base types"
            );
        }

        let mut builder = Self {
            frontend,
            config,
            source,
            file_path,
            associations,
            seen: HashSet::new(),
            symbols: Vec::new(),
        };
        builder.walk(root, None, false);
        builder.symbols
    }

    fn walk(&mut self, node: Node, parent: Option<&SymbolId>, in_error: bool) {
        let position = node.start_position();
        let key: PositionKey = (position.row, position.column, node.kind_id());
        if !self.seen.insert(key) {
            return;
        }

        let is_error = node.is_error() || node.is_missing();
        let mut next_parent: Option<SymbolId> = parent.cloned();
        let mut error_container: Option<(usize, SymbolId)> = None;

        if is_error {
            if !in_error && self.config.fallback_extraction {
                error_container = self.recover_from_error(node, parent);
            }
        } else {
            match self.frontend.classify(node, self.source) {
                Ok(drafts) => {
                    let single = drafts.len() == 1;
                    for draft in drafts {
                        match self.materialize(draft, node, parent) {
                            Ok(symbol) => {
                                if single {
                                    next_parent = Some(symbol.id.clone());
                                }
                                self.symbols.push(symbol);
                            }
                            Err(error) => {
                                warn!(
                                    node_kind = node.kind(),
                                    line = position.row,
                                    column = position.column,
                                    %error,
                                    "symbol materialization failed; continuing with siblings"
                                );
                            }
                        }
                    }
                }
                Err(error) => {
                    warn!(
                        node_kind = node.kind(),
                        line = position.row,
                        column = position.column,
                        %error,
                        "classification failed; continuing with siblings"
                    );
                }
            }
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        drop(cursor);
        for child in children {
            // Grammar-shaped members inside an ERROR region attach to the
            // last declaration the fallback recovered before them.
            let parent_for_child = match &error_container {
                Some((start, id)) if child.start_byte() >= *start => Some(id),
                _ => next_parent.as_ref(),
            };
            self.walk(child, parent_for_child, in_error || is_error);
        }
    }

    /// Text-pattern recovery for an ERROR node (outermost only). Returns the
    /// last recovered declaration, which acts as parent for grammar nodes
    /// later in the same region.
    fn recover_from_error(
        &mut self,
        node: Node,
        parent: Option<&SymbolId>,
    ) -> Option<(usize, SymbolId)> {
        let drafts = fallback::recover(node, self.source);
        if drafts.is_empty() {
            return None;
        }
        debug!(
            file = self.file_path,
            line = node.start_position().row,
            count = drafts.len(),
            "recovered symbols from ERROR node via text fallback"
        );
        let mut recovered = Vec::new();
        for draft in drafts {
            match self.materialize(draft, node, parent) {
                Ok(symbol) => recovered.push(symbol),
                Err(error) => {
                    debug!(%error, "fallback draft rejected");
                }
            }
        }

        let container = recovered
            .iter()
            .enumerate()
            .max_by_key(|(_, symbol)| symbol.span.start_byte)
            .map(|(index, _)| index);
        let container_id = container.map(|index| {
            // Stretch the container's span to the region's end so parent
            // spans keep containing child spans. The id keys off the start
            // position and is unaffected.
            let end = node.end_position();
            let symbol = &mut recovered[index];
            symbol.span.end_byte = node.end_byte();
            symbol.span.end_line = end.row;
            symbol.span.end_column = end.column;
            (symbol.span.start_byte, symbol.id.clone())
        });
        self.symbols.extend(recovered);
        container_id
    }

    /// Turn a draft into a `Symbol`: resolve defaults through the front end,
    /// consult the association side table, and assign the deterministic id.
    fn materialize(
        &self,
        draft: SymbolDraft,
        node: Node,
        parent: Option<&SymbolId>,
    ) -> Result<Symbol, SymgraphError> {
        if draft.name.is_empty() {
            let position = node.start_position();
            return Err(SymgraphError::extraction(
                node.kind(),
                position.row,
                position.column,
                "draft has no name",
            ));
        }

        let mut kind = draft.kind;
        let base_class = draft.base_class.or_else(|| {
            self.associations
                .base_for(&draft.name)
                .map(str::to_string)
        });
        // A constructor function with a recorded base association is a class
        // in everything but grammar shape (ES5 prototype inheritance).
        if kind == SymbolKind::Function && base_class.is_some() {
            kind = SymbolKind::Class;
        }

        let visibility = draft
            .visibility
            .unwrap_or_else(|| self.frontend.visibility(&draft.name, node, self.source));
        let signature = truncate(
            draft
                .signature
                .unwrap_or_else(|| self.frontend.signature(node, self.source)),
            self.config.signature_max_len,
        );
        let documentation = draft
            .documentation
            .or_else(|| self.frontend.documentation(node, self.source));
        let data_type = draft
            .data_type
            .or_else(|| self.frontend.type_hint(node, self.source));

        let id = SymbolId::derive(self.file_path, &draft.name, kind, &draft.span);

        Ok(Symbol {
            id,
            name: draft.name,
            kind,
            signature,
            file_path: self.file_path.to_string(),
            span: draft.span,
            parent_id: parent.cloned(),
            visibility,
            documentation,
            base_class,
            data_type,
            flags: draft.flags,
            metadata: draft.metadata,
        })
    }
}
