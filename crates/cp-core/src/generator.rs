//! Local random card generator.
//!
//! Rarity weights: Common 70, Uncommon 15, Rare 8, Epic 6, Legendary 1.

use cp_api_types::Rarity;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const CARD_BACK_IMAGE: &str = "assets/images/card-back.png";

pub const DEFAULT_CARD_IMAGES: &[&str] = &[
    "assets/images/generated_cards/generated_image_1.png",
    "assets/images/generated_cards/generated_image_1012.png",
    "assets/images/generated_cards/generated_image_1046.png",
    "assets/images/generated_cards/generated_image_1047.png",
    "assets/images/generated_cards/generated_image_1048.png",
    "assets/images/generated_cards/generated_image_1052.png",
    "assets/images/generated_cards/generated_image_1078.png",
    "assets/images/generated_cards/generated_image_109.png",
    "assets/images/generated_cards/generated_image_1106.png",
    "assets/images/generated_cards/generated_image_117.png",
    "assets/images/generated_cards/generated_image_122.png",
    "assets/images/generated_cards/generated_image_19.png",
    "assets/images/generated_cards/generated_image_224.png",
    "assets/images/generated_cards/generated_image_247.png",
    "assets/images/generated_cards/generated_image_256.png",
    "assets/images/generated_cards/generated_image_257.png",
    "assets/images/generated_cards/generated_image_27.png",
    "assets/images/generated_cards/generated_image_276.png",
    "assets/images/generated_cards/generated_image_279.png",
    "assets/images/generated_cards/generated_image_290.png",
    "assets/images/generated_cards/generated_image_291.png",
    "assets/images/generated_cards/generated_image_293.png",
    "assets/images/generated_cards/generated_image_301.png",
    "assets/images/generated_cards/generated_image_302.png",
    "assets/images/generated_cards/generated_image_305.png",
    "assets/images/generated_cards/generated_image_307.png",
    "assets/images/generated_cards/generated_image_319.png",
    "assets/images/generated_cards/generated_image_328.png",
    "assets/images/generated_cards/generated_image_336.png",
    "assets/images/generated_cards/generated_image_53.png",
    "assets/images/generated_cards/generated_image_63.png",
    "assets/images/generated_cards/generated_image_7.png",
    "assets/images/generated_cards/generated_image_78.png",
    "assets/images/generated_cards/generated_image_8.png",
    "assets/images/generated_cards/generated_image_83.png",
    "assets/images/generated_cards/generated_image_86.png",
    "assets/images/generated_cards/generated_image_95.png",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub image: String,
    pub rarity: Rarity,
}

pub struct CardGenerator<R = StdRng> {
    rng: R,
}

impl CardGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn pick_rarity(&mut self) -> Rarity {
        Rarity::from_roll(self.rng.gen_range(0.0..100.0))
    }

    /// `None` only for an empty pool.
    pub fn pick_card<S: AsRef<str>>(&mut self, pool: &[S]) -> Option<Card> {
        let image = pool.choose(&mut self.rng)?.as_ref().to_owned();
        Some(Card {
            image,
            rarity: self.pick_rarity(),
        })
    }

    pub fn generate_pack<S: AsRef<str>>(&mut self, pool: &[S], size: usize) -> Vec<Card> {
        (0..size).filter_map(|_| self.pick_card(pool)).collect()
    }
}
