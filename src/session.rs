//! Analyzer sessions.
//!
//! An [`Analyzer`] bundles a shared, read-only knowledge base with a model
//! oracle so front ends do not have to thread both through every call.
//! Many analyzers may share one `Arc<KnowledgeBase>`.

use std::sync::Arc;

use crate::chat;
use crate::knowledge::KnowledgeBase;
use crate::oracle::ModelOracle;
use crate::record::IngredientRecord;
use crate::resolver::{self, ResolutionResult};

/// Knowledge base + oracle pair exposing the two core operations.
pub struct Analyzer<O: ModelOracle> {
    kb: Arc<KnowledgeBase>,
    oracle: O,
}

impl<O: ModelOracle> Analyzer<O> {
    /// Creates an analyzer over an already-built knowledge base.
    pub fn new(kb: Arc<KnowledgeBase>, oracle: O) -> Self {
        Self { kb, oracle }
    }

    /// Resolves an ingredient list. See [`resolver::resolve`].
    pub fn analyze(&self, raw: &str) -> ResolutionResult {
        resolver::resolve(raw, &self.kb, &self.oracle)
    }

    /// Answers a chat question. See [`chat::answer`].
    pub fn chat(&self, question: &str) -> String {
        chat::answer(question, &self.kb, &self.oracle)
    }

    /// Looks up a single curated ingredient without consulting the oracle.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&IngredientRecord> {
        self.kb.lookup(name)
    }

    /// The shared knowledge base.
    #[must_use]
    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.kb
    }

    /// The oracle consulted for misses.
    #[must_use]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OracleError;
    use crate::record::Benefit;

    struct Fixed(&'static str);

    impl ModelOracle for Fixed {
        fn query(&self, _prompt: &str) -> Result<String, OracleError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_analyzers_share_knowledge_base() {
        let kb = Arc::new(
            KnowledgeBase::builder()
                .ingredient("water", true, "Solvent.", vec![])
                .build(),
        );
        let a = Analyzer::new(Arc::clone(&kb), Fixed("first"));
        let b = Analyzer::new(Arc::clone(&kb), Fixed("second"));

        assert_eq!(a.analyze("Retinol").get("Retinol").unwrap().description, "first");
        assert_eq!(b.analyze("Retinol").get("Retinol").unwrap().description, "second");
        assert_eq!(a.lookup("Water").unwrap().beneficial, Benefit::Beneficial);
        assert!(Arc::ptr_eq(a.knowledge_base(), b.knowledge_base()));
        assert_eq!(b.chat("hello?"), "second");
        assert_eq!(a.oracle().0, "first");
    }
}
