use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    #[serde(alias = "common")]
    Common,
    #[serde(alias = "uncommon")]
    Uncommon,
    #[serde(alias = "rare")]
    Rare,
    #[serde(alias = "epic")]
    Epic,
    #[serde(alias = "legendary")]
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Map a roll in `[0, 100)` onto the cumulative thresholds
    /// 70 / 85 / 93 / 99. A roll sitting exactly on a threshold
    /// belongs to the next tier.
    pub fn from_roll(roll: f64) -> Rarity {
        if roll < 70.0 {
            Rarity::Common
        } else if roll < 85.0 {
            Rarity::Uncommon
        } else if roll < 93.0 {
            Rarity::Rare
        } else if roll < 99.0 {
            Rarity::Epic
        } else {
            Rarity::Legendary
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Lowercase form used for the `data-rarity` attribute.
    pub fn as_data_attr(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRarity(pub String);

impl fmt::Display for UnknownRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rarity: {}", self.0)
    }
}

impl std::error::Error for UnknownRarity {}

impl FromStr for Rarity {
    type Err = UnknownRarity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rarity::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRarity(s.to_owned()))
    }
}

/// Gallery card identifier. The service hands out integers; the client
/// never does arithmetic on them, so they are kept as text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub String);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        CardId(value.to_owned())
    }
}

impl From<u64> for CardId {
    fn from(value: u64) -> Self {
        CardId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => CardId(n.to_string()),
            RawId::Text(s) => CardId(s),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Popular,
    Recent,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Popular => "popular",
            SortKey::Recent => "recent",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VoteKind {
    Upvote,
    Downvote,
}

impl VoteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteKind::Upvote => "upvote",
            VoteKind::Downvote => "downvote",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GalleryQuery {
    pub sort_by: SortKey,
    pub page: u32,
    pub limit: u32,
}

impl GalleryQuery {
    /// Path and query string for `GET /api/gallery`.
    pub fn to_path(&self) -> String {
        format!(
            "/api/gallery?sort_by={}&page={}&limit={}",
            self.sort_by, self.page, self.limit
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GalleryCard {
    pub id: CardId,
    pub image: String,
    #[serde(default)]
    pub upvotes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GalleryPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub cards: Vec<GalleryCard>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteResponse {
    pub new_upvote_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareRequest {
    pub image_data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenerateStatus {
    Success,
    Failed,
    #[serde(other)]
    Other,
}

/// Body of `GET /api/card/generate`. Every field is optional on the wire:
/// a successful response may omit `status`, a failed one carries only
/// `status` and `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GenerateStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, Some(GenerateStatus::Failed))
    }
}
