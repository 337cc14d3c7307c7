//! Card renderer model.
//!
//! [`render_card`] describes the markup of one card; [`CardMotion`] holds
//! the per-card interaction state and produces the inline styles for
//! tilt, hover and flip. The DOM layer only copies these onto elements.

use crate::config::{HoverConfig, TiltConfig};
use crate::favorites::FavoriteEntry;
use crate::generator::{CARD_BACK_IMAGE, Card};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Favorites page: starts flipped, no click-to-flip.
    pub favorites_view: bool,
    pub favorite_icon: bool,
    pub favorited: bool,
}

impl RenderOptions {
    /// A pack card; `favorited` is whether its image is already saved.
    pub fn pack(favorited: bool) -> Self {
        Self {
            favorites_view: false,
            favorite_icon: true,
            favorited,
        }
    }

    pub fn favorites() -> Self {
        Self {
            favorites_view: true,
            favorite_icon: true,
            favorited: true,
        }
    }

    /// A single generated card: revealed, no favorite icon.
    pub fn generated() -> Self {
        Self {
            favorites_view: false,
            favorite_icon: false,
            favorited: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteIcon {
    pub favorited: bool,
    pub title: &'static str,
}

impl FavoriteIcon {
    pub fn new(favorited: bool) -> Self {
        Self {
            favorited,
            title: if favorited {
                "Unfavorite"
            } else {
                "Favorite this card"
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMarkup {
    pub back_image: &'static str,
    pub art_image: String,
    pub art_alt: &'static str,
    /// Shown on the rarity label.
    pub rarity_label: String,
    /// Value of `data-rarity`.
    pub data_rarity: String,
    pub flipped: bool,
    pub flippable: bool,
    pub favorite_icon: Option<FavoriteIcon>,
}

impl CardMarkup {
    pub fn class_list(&self) -> Vec<&'static str> {
        let mut classes = vec!["card"];
        if !self.flippable {
            classes.push("favorited-card");
        }
        if self.flipped {
            classes.push("flip");
        }
        classes
    }

    pub fn motion(&self, tilt: TiltConfig, hover: HoverConfig) -> CardMotion {
        CardMotion {
            flipped: self.flipped,
            flippable: self.flippable,
            favorited: self.favorite_icon.as_ref().is_some_and(|i| i.favorited),
            tilt,
            hover,
        }
    }
}

pub fn render_card(card: &Card, opts: RenderOptions) -> CardMarkup {
    render_parts(&card.image, card.rarity.label(), card.rarity.as_data_attr(), opts)
}

/// Favorites keep the rarity string they were stored with.
pub fn render_favorite(entry: &FavoriteEntry) -> CardMarkup {
    let data_rarity = entry.rarity.to_lowercase();
    render_parts(&entry.image_src, &entry.rarity, &data_rarity, RenderOptions::favorites())
}

fn render_parts(image: &str, label: &str, data_rarity: &str, opts: RenderOptions) -> CardMarkup {
    let generated_single = !opts.favorites_view && !opts.favorite_icon;
    CardMarkup {
        back_image: CARD_BACK_IMAGE,
        art_image: image.to_owned(),
        art_alt: if opts.favorites_view {
            "Favorited Card"
        } else if generated_single {
            "AI Generated Card"
        } else {
            "Generated Card"
        },
        rarity_label: label.to_owned(),
        data_rarity: data_rarity.to_owned(),
        flipped: opts.favorites_view || generated_single,
        flippable: !opts.favorites_view,
        favorite_icon: opts.favorite_icon.then(|| FavoriteIcon::new(opts.favorited)),
    }
}

/// Inline `transform` and `transition` values for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub transform: String,
    pub transition: String,
}

/// Bounding box of the card in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardMotion {
    flipped: bool,
    flippable: bool,
    favorited: bool,
    tilt: TiltConfig,
    hover: HoverConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardClick {
    /// Click landed on the favorite icon: toggle; never flips.
    Favorite { favorited: bool },
    Flip(Style),
    Ignored,
}

impl CardMotion {
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_favorited(&self) -> bool {
        self.favorited
    }

    /// Adopt the state the favorites store settled on.
    pub fn set_favorited(&mut self, favorited: bool) {
        self.favorited = favorited;
    }

    fn tilt_transition(&self) -> String {
        format!("transform {}s ease-out", self.tilt.transition_secs)
    }

    fn hover_transition(&self) -> String {
        format!("transform {}s ease", self.hover.transition_secs)
    }

    fn rest_transform(&self) -> String {
        if self.flipped {
            "rotateY(180deg)".to_owned()
        } else {
            "rotateX(0deg) rotateY(0deg)".to_owned()
        }
    }

    /// Style for the inner face while the pointer is at `(x, y)`.
    pub fn pointer_move(&self, x: f64, y: f64, rect: Rect) -> Style {
        let center_x = rect.width / 2.0;
        let center_y = rect.height / 2.0;
        if center_x <= 0.0 || center_y <= 0.0 {
            return Style {
                transform: self.rest_transform(),
                transition: self.tilt_transition(),
            };
        }

        let percent_x = ((x - rect.left - center_x) / center_x).clamp(-1.0, 1.0);
        let percent_y = ((y - rect.top - center_y) / center_y).clamp(-1.0, 1.0);
        let tilt_x = -percent_y * self.tilt.max_deg;
        let tilt_y = percent_x * self.tilt.max_deg;

        let prefix = if self.flipped { "rotateY(180deg) " } else { "" };
        Style {
            transform: format!("{prefix}rotateX({tilt_x}deg) rotateY({tilt_y}deg)"),
            transition: self.tilt_transition(),
        }
    }

    /// Style for the whole card on pointer enter.
    pub fn pointer_enter(&self) -> Style {
        Style {
            transform: format!("scale({})", self.hover.scale),
            transition: self.hover_transition(),
        }
    }

    /// Styles on pointer leave: `(inner face, whole card)`.
    pub fn pointer_leave(&self) -> (Style, Style) {
        let inner = Style {
            transform: self.rest_transform(),
            transition: self.tilt_transition(),
        };
        let outer = Style {
            transform: "scale(1)".to_owned(),
            transition: self.hover_transition(),
        };
        (inner, outer)
    }

    pub fn click(&mut self, on_favorite_icon: bool) -> CardClick {
        if on_favorite_icon {
            self.favorited = !self.favorited;
            return CardClick::Favorite {
                favorited: self.favorited,
            };
        }
        if !self.flippable {
            return CardClick::Ignored;
        }
        self.flipped = !self.flipped;
        CardClick::Flip(Style {
            transform: self.rest_transform(),
            transition: self.tilt_transition(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::{FavoritesStore, InMemoryStore};
    use cp_api_types::Rarity;

    fn card() -> Card {
        Card {
            image: "art.png".into(),
            rarity: Rarity::Epic,
        }
    }

    fn rect() -> Rect {
        Rect {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 300.0,
        }
    }

    fn motion(opts: RenderOptions) -> CardMotion {
        render_card(&card(), opts).motion(TiltConfig::default(), HoverConfig::default())
    }

    #[test]
    fn pack_card_starts_face_down_with_icon() {
        let markup = render_card(&card(), RenderOptions::pack(false));
        assert!(!markup.flipped);
        assert!(markup.flippable);
        assert_eq!(markup.rarity_label, "Epic");
        assert_eq!(markup.data_rarity, "epic");
        assert_eq!(markup.back_image, CARD_BACK_IMAGE);
        assert_eq!(markup.class_list(), vec!["card"]);
        assert_eq!(
            markup.favorite_icon,
            Some(FavoriteIcon {
                favorited: false,
                title: "Favorite this card"
            })
        );
    }

    #[test]
    fn favorite_card_is_preflipped_and_not_flippable() {
        let markup = render_favorite(&FavoriteEntry::new("x.png", "legendary"));
        assert!(markup.flipped);
        assert!(!markup.flippable);
        assert_eq!(markup.rarity_label, "legendary");
        assert_eq!(markup.class_list(), vec!["card", "favorited-card", "flip"]);
        assert!(markup.favorite_icon.unwrap().favorited);
    }

    #[test]
    fn generated_card_has_no_icon() {
        let markup = render_card(&card(), RenderOptions::generated());
        assert!(markup.favorite_icon.is_none());
        assert!(markup.flipped);
        assert!(markup.flippable);
    }

    #[test]
    fn tilt_at_corners_hits_max_angle() {
        let m = motion(RenderOptions::pack(false));
        let style = m.pointer_move(300.0, 50.0, rect());
        assert_eq!(style.transform, "rotateX(25deg) rotateY(25deg)");
        assert_eq!(style.transition, "transform 0.6s ease-out");

        let style = m.pointer_move(200.0, 200.0, rect());
        assert_eq!(style.transform, "rotateX(-0deg) rotateY(0deg)");
    }

    #[test]
    fn tilt_composes_with_flip() {
        let mut m = motion(RenderOptions::pack(false));
        assert!(matches!(m.click(false), CardClick::Flip(_)));
        let style = m.pointer_move(100.0, 350.0, rect());
        assert_eq!(style.transform, "rotateY(180deg) rotateX(-25deg) rotateY(-25deg)");
    }

    #[test]
    fn leave_returns_to_rest() {
        let mut m = motion(RenderOptions::pack(false));
        let (inner, outer) = m.pointer_leave();
        assert_eq!(inner.transform, "rotateX(0deg) rotateY(0deg)");
        assert_eq!(outer.transform, "scale(1)");
        assert_eq!(outer.transition, "transform 0.3s ease");

        m.click(false);
        let (inner, _) = m.pointer_leave();
        assert_eq!(inner.transform, "rotateY(180deg)");
    }

    #[test]
    fn hover_scales_up() {
        let m = motion(RenderOptions::favorites());
        assert_eq!(m.pointer_enter().transform, "scale(1.1)");
    }

    #[test]
    fn favorite_icon_click_never_flips() {
        let mut m = motion(RenderOptions::pack(false));
        assert_eq!(m.click(true), CardClick::Favorite { favorited: true });
        assert!(!m.is_flipped());
        assert_eq!(m.click(true), CardClick::Favorite { favorited: false });
    }

    #[test]
    fn saved_pack_card_starts_favorited_and_agrees_with_store() {
        let favorites = FavoritesStore::new(InMemoryStore::new(), "favorites");
        favorites.toggle(FavoriteEntry::new("art.png", "epic"));

        let markup = render_card(&card(), RenderOptions::pack(favorites.is_favorite("art.png")));
        assert_eq!(markup.favorite_icon, Some(FavoriteIcon::new(true)));
        assert_eq!(markup.favorite_icon.as_ref().map(|i| i.title), Some("Unfavorite"));

        let mut m = markup.motion(TiltConfig::default(), HoverConfig::default());
        let CardClick::Favorite { favorited } = m.click(true) else {
            panic!("icon click must toggle the favorite");
        };
        let toggle = favorites.toggle(FavoriteEntry::new("art.png", "epic"));
        assert_eq!(favorited, toggle.favorited);
        assert!(!toggle.favorited);
        assert!(toggle.entries.is_empty());
    }

    #[test]
    fn motion_follows_store_result() {
        let mut m = motion(RenderOptions::pack(false));
        m.set_favorited(true);
        assert!(m.is_favorited());
        assert_eq!(m.click(true), CardClick::Favorite { favorited: false });
    }

    #[test]
    fn favorites_view_ignores_flip_click() {
        let mut m = motion(RenderOptions::favorites());
        assert_eq!(m.click(false), CardClick::Ignored);
        assert!(m.is_flipped());
        assert_eq!(m.click(true), CardClick::Favorite { favorited: false });
    }

    #[test]
    fn zero_sized_card_rests() {
        let m = motion(RenderOptions::pack(false));
        let style = m.pointer_move(
            1.0,
            1.0,
            Rect {
                left: 0.0,
                top: 0.0,
                width: 0.0,
                height: 0.0,
            },
        );
        assert_eq!(style.transform, "rotateX(0deg) rotateY(0deg)");
    }
}
