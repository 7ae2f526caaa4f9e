//! Random tag selection with an injected random source.
//!
//! The generator owns its RNG, so the same seed always yields the same tag
//! sequence. Tags are drawn from the catalogue's snippet tags only.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::catalogue::TagCatalogue;
use crate::tag::{Tag, TagKind};

/// Draws tags from a [`TagCatalogue`].
///
/// # Example
///
/// ```
/// use tag_catalogue::{TagGenerator, TagKind};
///
/// let mut first = TagGenerator::from_seed(7);
/// let mut second = TagGenerator::from_seed(7);
/// assert_eq!(first.generate_many(5), second.generate_many(5));
///
/// let feedback = first.generate_with(TagKind::Feedback).expect("feedback tags exist");
/// assert_eq!(feedback.kind(), TagKind::Feedback);
/// assert!(first.generate_with(TagKind::Language).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct TagGenerator<R = ChaCha8Rng> {
    catalogue: TagCatalogue,
    rng: R,
}

impl TagGenerator<ChaCha8Rng> {
    /// Generator over the default catalogue seeded from `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(TagCatalogue::default(), ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> TagGenerator<R> {
    /// Generator over `catalogue` drawing from `rng`.
    #[must_use]
    pub const fn new(catalogue: TagCatalogue, rng: R) -> Self {
        Self { catalogue, rng }
    }

    /// Catalogue the generator draws from.
    #[must_use]
    pub const fn catalogue(&self) -> &TagCatalogue {
        &self.catalogue
    }

    /// Draw one snippet tag.
    ///
    /// # Panics
    ///
    /// Never in practice: [`TagCatalogue::new`] refuses an empty snippet list.
    #[expect(
        clippy::expect_used,
        reason = "TagCatalogue::new rejects catalogues without snippet tags"
    )]
    pub fn generate(&mut self) -> Tag {
        self.catalogue
            .snippet_tags()
            .choose(&mut self.rng)
            .cloned()
            .expect("catalogue holds at least one snippet tag")
    }

    /// Draw `count` snippet tags. Repeats are allowed.
    pub fn generate_many(&mut self, count: usize) -> Vec<Tag> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// Draw a snippet tag of `kind`, or `None` when the catalogue has none.
    pub fn generate_with(&mut self, kind: TagKind) -> Option<Tag> {
        self.pick(|tag| tag.kind() == kind)
    }

    /// Draw a snippet tag of any kind but `kind`, or `None` when every tag
    /// has that kind.
    pub fn generate_without(&mut self, kind: TagKind) -> Option<Tag> {
        self.pick(|tag| tag.kind() != kind)
    }

    fn pick(&mut self, keep: impl Fn(&Tag) -> bool) -> Option<Tag> {
        let candidates: Vec<&Tag> = self
            .catalogue
            .snippet_tags()
            .iter()
            .filter(|tag| keep(tag))
            .collect();
        candidates.choose(&mut self.rng).map(|tag| (*tag).clone())
    }
}
