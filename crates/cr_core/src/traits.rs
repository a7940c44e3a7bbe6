//! Base-stat derivation from token traits, and rarity classes.
//!
//! This sits next to the core rather than inside it: base stats are derived
//! once per token and handed to the engine as plain numbers afterwards.
//! Parsing is deliberately lenient; one malformed token yields `None` and
//! must never break re-derivation for the rest of the collection.
//!
//! The catalog is an explicitly constructed, reloadable data source that
//! callers own and pass by reference. There is no process-wide lazily
//! loaded singleton on purpose.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stats::{StatBlock, StatKind};

/// One raw trait as delivered by the token metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTrait {
    pub trait_type: String,
    pub value: String,
}

/// All traits of one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTraits {
    pub token_id: String,
    pub traits: Vec<TokenTrait>,
}

impl TokenTraits {
    fn value_of(&self, trait_type: &str) -> Option<&str> {
        self.traits
            .iter()
            .find(|t| t.trait_type.eq_ignore_ascii_case(trait_type))
            .map(|t| t.value.as_str())
    }
}

/// Rarity tier, used for class-restricted entry and reward weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RarityClass {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl RarityClass {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => RarityClass::Legendary,
            s if s >= 70.0 => RarityClass::Epic,
            s if s >= 45.0 => RarityClass::Rare,
            s if s >= 20.0 => RarityClass::Uncommon,
            _ => RarityClass::Common,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RarityClass::Common => "common",
            RarityClass::Uncommon => "uncommon",
            RarityClass::Rare => "rare",
            RarityClass::Epic => "epic",
            RarityClass::Legendary => "legendary",
        }
    }
}

/// Entry check for class-restricted races: no restriction admits everyone,
/// otherwise the classes must match exactly.
pub fn class_allowed(entrant: RarityClass, restriction: Option<RarityClass>) -> bool {
    match restriction {
        None => true,
        Some(required) => entrant == required,
    }
}

/// Derive a token's base stats from its traits.
///
/// All six stat traits must be present and numeric; anything missing or
/// malformed yields `None` for this token. Base stats are allowed to exceed
/// the *training* cap; only trained stats are budgeted.
pub fn derive_base_stats(token: &TokenTraits) -> Option<StatBlock> {
    let mut block = StatBlock::zeroed();
    for kind in StatKind::ALL {
        let raw = token.value_of(kind.name())?;
        let value: f64 = raw.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        block.set(kind, value);
    }
    Some(block)
}

/// Derive a token's rarity class from its `rarity_score` trait, defaulting
/// to common when the trait is absent or malformed.
pub fn derive_rarity_class(token: &TokenTraits) -> RarityClass {
    token
        .value_of("rarity_score")
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .map(RarityClass::from_score)
        .unwrap_or(RarityClass::Common)
}

/// Injected token→traits data source with an explicit load/refresh
/// lifecycle.
#[derive(Debug, Clone, Default)]
pub struct TraitCatalog {
    records: HashMap<String, TokenTraits>,
}

impl TraitCatalog {
    /// Load a catalog from a JSON array of token trait records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<TokenTraits> = serde_json::from_str(json)?;
        Ok(Self {
            records: records.into_iter().map(|r| (r.token_id.clone(), r)).collect(),
        })
    }

    /// Replace the catalog contents wholesale, e.g. after a metadata
    /// refresh. Fails without touching the current contents.
    pub fn reload_from_json(&mut self, json: &str) -> Result<()> {
        let fresh = Self::from_json(json)?;
        self.records = fresh.records;
        Ok(())
    }

    pub fn token(&self, token_id: &str) -> Option<&TokenTraits> {
        self.records.get(token_id)
    }

    pub fn base_stats(&self, token_id: &str) -> Option<StatBlock> {
        self.token(token_id).and_then(derive_base_stats)
    }

    pub fn rarity_class(&self, token_id: &str) -> Option<RarityClass> {
        self.token(token_id).map(derive_rarity_class)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
