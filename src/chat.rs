//! Chatbot dispatch.
//!
//! A question is "about" a known ingredient when the ingredient's
//! normalized name occurs anywhere in the lower-cased question. The first
//! such name in knowledge base order wins. This is plain substring
//! containment: a short name can match inside an unrelated word.
//! Questions that mention no known ingredient go to the model unchanged.

use std::fmt::Write as _;

use tracing::debug;

use crate::knowledge::KnowledgeBase;
use crate::oracle::{ask, ModelOracle};
use crate::record::{Benefit, IngredientRecord};

/// Returns the first knowledge base key contained in the lower-cased
/// question, in stored iteration order.
#[must_use]
pub fn find_mentioned<'kb>(question: &str, kb: &'kb KnowledgeBase) -> Option<&'kb str> {
    let lowered = question.to_lowercase();
    kb.keys().find(|key| lowered.contains(key))
}

/// Title-cases a name: the first letter of every run of letters is
/// upper-cased and the rest lower-cased.
///
/// ```
/// use knowlabel::chat::title_case;
///
/// assert_eq!(title_case("hyaluronic acid"), "Hyaluronic Acid");
/// assert_eq!(title_case("peg-100 stearate"), "Peg-100 Stearate");
/// ```
#[must_use]
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Renders a curated record as a Markdown chat answer.
#[must_use]
pub fn format_answer(key: &str, record: &IngredientRecord) -> String {
    let mut response = format!("**{}**\n\n", title_case(key));
    // Knowledge base records are never `Unknown`; it shares the cautious badge.
    match record.beneficial {
        Benefit::Beneficial => response.push_str("✅ This ingredient is *beneficial*.\n"),
        Benefit::Harmful | Benefit::Unknown => {
            response.push_str("⚠ This ingredient may be *harmful or controversial*.\n");
        }
    }
    let _ = writeln!(response, "**Description:** {}", record.description);
    if !record.alternatives.is_empty() {
        let _ = writeln!(response, "**Alternatives:** {}", record.alternatives.join(", "));
    }
    response
}

/// Answers a free-text question.
///
/// Known ingredients are answered from the knowledge base; anything else
/// is forwarded verbatim to the oracle, whose answer (or error text) is
/// returned unmodified.
pub fn answer(question: &str, kb: &KnowledgeBase, oracle: &dyn ModelOracle) -> String {
    if let Some(key) = find_mentioned(question, kb) {
        if let Some(record) = kb.get(key) {
            debug!(ingredient = key, "answering from knowledge base");
            return format_answer(key, record);
        }
    }
    debug!("no known ingredient mentioned; forwarding question to model");
    ask(oracle, question)
}
