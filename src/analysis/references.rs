//! Textual reference matching
//!
//! A resource counts as "used" when its base name shows up in the corpus in
//! one of a fixed set of textual shapes. This is a deliberate proxy for a
//! real reference graph, biased toward false negatives on the "unused" side:
//! the quoted-name clause treats ANY same-named quoted string anywhere in the
//! corpus as a use, which covers dynamically built identifier lookups at the
//! cost of under-flagging resources that merely share a name with an
//! unrelated string literal. Do not tighten this without changing the
//! documented contract.

use crate::collect::{Corpus, ResourceFile};
use crate::config::Config;

/// Decides used/unused for resources against the evidence corpus
pub struct ReferenceMatcher<'a> {
    corpus: &'a Corpus,
    config: &'a Config,
}

impl<'a> ReferenceMatcher<'a> {
    pub fn new(corpus: &'a Corpus, config: &'a Config) -> Self {
        Self { corpus, config }
    }

    /// True when the corpus shows any textual reference to `base_name`
    pub fn is_name_referenced(&self, base_name: &str) -> bool {
        if base_name.is_empty() || self.config.should_retain(base_name) {
            return true;
        }
        self.corpus.contains(&format!("R.drawable.{base_name}"))
            || self.corpus.contains(&format!("@drawable/{base_name}"))
            || self.corpus.contains(&format!("\"{base_name}\""))
            || self.corpus.contains(&format!("'{base_name}'"))
    }

    pub fn is_referenced(&self, resource: &ResourceFile) -> bool {
        self.is_name_referenced(&resource.base_name())
    }

    /// Filter a resource list down to the unreferenced ones
    pub fn unused<'r>(&self, resources: &'r [ResourceFile]) -> Vec<&'r ResourceFile> {
        resources.iter().filter(|r| !self.is_referenced(r)).collect()
    }
}
