//! Association pre-pass.
//!
//! Some grammars represent "declare name X" and "declare base type Y" as two
//! independent sibling statements rather than one nested declaration, and
//! their ordering varies. Before the main walk, this pass scans every
//! sibling group for the two statement shapes (in either order) and records
//! `name -> base` in a side table the builder consults while materializing
//! symbols. The pass is read-only and produces no symbols of its own.
//!
//! Known limitation: the table is keyed by raw name, so two same-named
//! declarations in different nested scopes of one file collide. The policy
//! for that case comes from `ExtractConfig::association_collision`.

use std::collections::{HashMap, HashSet};

use symgraph_core::CollisionPolicy;
use tree_sitter::Node;

use crate::frontend::{AssociationFact, LanguageFrontend};

/// Side table of `name -> base type` associations for one file.
#[derive(Debug, Default)]
pub struct AssociationTable {
    map: HashMap<String, String>,
    dropped: HashSet<String>,
}

impl AssociationTable {
    /// Scan the whole tree before the main walk.
    pub fn build(
        frontend: &dyn LanguageFrontend,
        root: Node,
        source: &[u8],
        policy: CollisionPolicy,
    ) -> Self {
        let mut table = Self::default();
        table.scan(frontend, root, source, policy);
        table
    }

    fn scan(
        &mut self,
        frontend: &dyn LanguageFrontend,
        node: Node,
        source: &[u8],
        policy: CollisionPolicy,
    ) {
        let mut cursor = node.walk();
        let facts: Vec<AssociationFact> = node
            .children(&mut cursor)
            .filter(|child| child.is_named() && !child.kind().contains("comment"))
            .filter_map(|child| frontend.association(child, source))
            .collect();
        self.pair_facts(&facts, policy);

        drop(cursor);
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in children {
            self.scan(frontend, child, source, policy);
        }
    }

    /// Pair facts gathered from one sibling group. A `DeclaresName` pairs
    /// with an adjacent `DeclaresBase` in either order; each base statement
    /// is consumed at most once. `Pair` facts record directly.
    pub(crate) fn pair_facts(&mut self, facts: &[AssociationFact], policy: CollisionPolicy) {
        let mut consumed = vec![false; facts.len()];
        for (i, fact) in facts.iter().enumerate() {
            match fact {
                AssociationFact::Pair { name, base } => {
                    self.record(name.clone(), base.clone(), policy);
                }
                AssociationFact::DeclaresName(name) => {
                    let neighbors = [i.checked_sub(1), Some(i + 1)];
                    for j in neighbors.into_iter().flatten() {
                        if consumed.get(j).copied().unwrap_or(true) {
                            continue;
                        }
                        if let Some(AssociationFact::DeclaresBase(base)) = facts.get(j) {
                            consumed[j] = true;
                            self.record(name.clone(), base.clone(), policy);
                            break;
                        }
                    }
                }
                AssociationFact::DeclaresBase(_) => {}
            }
        }
    }

    fn record(&mut self, name: String, base: String, policy: CollisionPolicy) {
        match policy {
            CollisionPolicy::LastWins => {
                self.map.insert(name, base);
            }
            CollisionPolicy::FirstWins => {
                self.map.entry(name).or_insert(base);
            }
            CollisionPolicy::Drop => {
                if self.dropped.contains(&name) {
                    return;
                }
                if self.map.contains_key(&name) {
                    self.map.remove(&name);
                    self.dropped.insert(name);
                } else {
                    self.map.insert(name, base);
                }
            }
        }
    }

    /// Base type recorded for a declaration name, if any.
    pub fn base_for(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
