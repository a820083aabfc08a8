//! Card attributes: the small closed vocabularies every card is described by.
//!
//! - `LeaderClass`: leader archetype and card affiliation
//! - `Rarity`, `CardType`, `CraftTrait`
//! - `AttackStatus`: what a follower may attack right now
//! - `Keyword`: simple effects that can be granted to or revoked from followers
//!
//! Keywords are parsed from the upper-case names used in effect strings
//! (`STORM`, `WARD_PIERCE`, ...). Unknown names are a configuration error.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};

/// Leader archetype. `Neutral` only appears as a card affiliation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaderClass {
    Forestcraft,
    Swordcraft,
    Runecraft,
    Dragoncraft,
    Shadowcraft,
    Bloodcraft,
    Havencraft,
    Neutral,
}

impl LeaderClass {
    /// Human-readable class name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            LeaderClass::Forestcraft => "Forestcraft",
            LeaderClass::Swordcraft => "Swordcraft",
            LeaderClass::Runecraft => "Runecraft",
            LeaderClass::Dragoncraft => "Dragoncraft",
            LeaderClass::Shadowcraft => "Shadowcraft",
            LeaderClass::Bloodcraft => "Bloodcraft",
            LeaderClass::Havencraft => "Havencraft",
            LeaderClass::Neutral => "Neutral",
        }
    }

    /// Name of the leader character for this class.
    #[must_use]
    pub const fn leader_name(self) -> &'static str {
        match self {
            LeaderClass::Forestcraft => "Arisa",
            LeaderClass::Swordcraft => "Erika",
            LeaderClass::Runecraft => "Isabelle",
            LeaderClass::Dragoncraft => "Rowen",
            LeaderClass::Shadowcraft => "Luna",
            LeaderClass::Bloodcraft => "Urias",
            LeaderClass::Havencraft => "Eris",
            LeaderClass::Neutral => "Neutral",
        }
    }
}

/// Card rarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Bronze,
    Silver,
    Gold,
    Legendary,
}

/// The three playable card variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Follower,
    Spell,
    Amulet,
}

/// Swordcraft follower trait.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CraftTrait {
    Officer,
    Commander,
    #[default]
    Other,
}

/// What a follower is currently allowed to attack.
///
/// | Status   | Follower | Leader |
/// |----------|----------|--------|
/// | Entry    | no       | no     |
/// | Storm    | yes      | yes    |
/// | Rush     | yes      | no     |
/// | Attacked | no       | no     |
/// | Disabled | no       | no     |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackStatus {
    #[default]
    Entry,
    Storm,
    Rush,
    Attacked,
    Disabled,
}

impl AttackStatus {
    #[must_use]
    pub const fn can_attack_follower(self) -> bool {
        matches!(self, AttackStatus::Storm | AttackStatus::Rush)
    }

    #[must_use]
    pub const fn can_attack_leader(self) -> bool {
        matches!(self, AttackStatus::Storm)
    }
}

/// Simple effects that can be granted to a follower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Bane,
    Ward,
    Drain,
    Ambush,
    Rush,
    Storm,
    Untargetable,
    Attacked,
    DamageImmune,
    WardPierce,
    Disabled,
}

impl Keyword {
    /// Parse the upper-case keyword name used in effect strings.
    pub fn parse(name: &str) -> Result<Self> {
        Ok(match name {
            "BANE" => Keyword::Bane,
            "WARD" => Keyword::Ward,
            "DRAIN" => Keyword::Drain,
            "AMBUSH" => Keyword::Ambush,
            "RUSH" => Keyword::Rush,
            "STORM" => Keyword::Storm,
            "UNTARGETABLE" => Keyword::Untargetable,
            "ATTACKED" => Keyword::Attacked,
            "DAMAGE_IMMUNE" => Keyword::DamageImmune,
            "WARD_PIERCE" => Keyword::WardPierce,
            "DISABLED" => Keyword::Disabled,
            other => return Err(RulesError::UnknownKeyword(other.to_string())),
        })
    }

    /// Display name, as shown in card text.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Keyword::Bane => "Bane",
            Keyword::Ward => "Ward",
            Keyword::Drain => "Drain",
            Keyword::Ambush => "Ambush",
            Keyword::Rush => "Rush",
            Keyword::Storm => "Storm",
            Keyword::Untargetable => "Untargetable",
            Keyword::Attacked => "Attacked",
            Keyword::DamageImmune => "Damage immune",
            Keyword::WardPierce => "Ward pierce",
            Keyword::Disabled => "Disabled",
        }
    }
}
