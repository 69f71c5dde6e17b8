use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Item power tier as printed in the header, plus the catalog-only tags that
/// share the same slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rarity {
    Normal,
    Magic,
    Rare,
    Unique,
    Currency,
    Gem,
    DivinationCard,
    /// A header value no grammar recognizes, kept verbatim.
    Other(String),
    /// No rarity header inside the lookahead window.
    Unknown,
}

impl Rarity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "Normal",
            Self::Magic => "Magic",
            Self::Rare => "Rare",
            Self::Unique => "Unique",
            Self::Currency => "Currency",
            Self::Gem => "Gem",
            Self::DivinationCard => "Divination Card",
            Self::Other(raw) => raw,
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_) | Self::Unknown)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rarity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Locale of the export text, which decides the grammar used to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ja")]
    Japanese,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Japanese => "ja",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedItem {
    pub rarity: Rarity,
    pub item_name: String,
    pub base_type: Option<String>,
    pub item_class: Option<String>,
    pub mods: Vec<String>,
    pub language: Language,
    pub raw_text: String,
}

impl fmt::Display for ParsedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Language:  {}", self.language)?;
        writeln!(f, "Rarity:    {}", self.rarity)?;
        writeln!(f, "Item Name: {}", self.item_name)?;
        if let Some(base_type) = &self.base_type {
            writeln!(f, "Base Type: {}", base_type)?;
        }
        if let Some(item_class) = &self.item_class {
            writeln!(f, "Item Class: {}", item_class)?;
        }
        write!(f, "Mod Count: {}", self.mods.len())?;
        if !self.mods.is_empty() {
            write!(f, "\n\nMods:")?;
            for (i, m) in self.mods.iter().enumerate() {
                write!(f, "\n  {}. {}", i + 1, m)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseFailure {
    #[error("input is empty")]
    EmptyInput,
    #[error("item name not found")]
    NameNotFound,
}

/// Result of one parser invocation. There is no partially valid state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParseOutcome {
    Valid(ParsedItem),
    Invalid {
        reason: ParseFailure,
        raw_text: String,
    },
}

impl ParseOutcome {
    pub fn invalid(reason: ParseFailure, raw_text: &str) -> Self {
        Self::Invalid {
            reason,
            raw_text: raw_text.to_string(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn item(&self) -> Option<&ParsedItem> {
        match self {
            Self::Valid(item) => Some(item),
            Self::Invalid { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<ParseFailure> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid { reason, .. } => Some(*reason),
        }
    }

    pub fn raw_text(&self) -> &str {
        match self {
            Self::Valid(item) => &item.raw_text,
            Self::Invalid { raw_text, .. } => raw_text,
        }
    }
}

/// Dictionary entry for a tradeable item, keyed by its market id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    pub id: u32,
    pub canonical_name: String,
    pub item_type: String,
    pub category: String,
    pub icon_url: String,
}
