//! Store Components
//!
//! Stores hold tenges that robots collect. Variants change who may collect
//! (fighter), how much is paid out (casino) and where they land (autonomous).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::capability::SiteCapability;
use crate::error::RoadError;
use crate::rng::RandomSource;

/// Unique identifier for a store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteId(pub String);

impl SiteId {
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("store_{:04}", sequence))
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Behavioral subtype of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteVariant {
    #[default]
    Normal,
    /// Only serves robots richer than itself
    Fighter,
    /// Pays out between 50% and 150% of the requested amount
    Casino,
    /// Picks its own cell on placement
    Autonomous,
}

impl SiteVariant {
    pub const NAMES: &'static str = "normal, fighter, casino, autonomous";

    pub fn name(&self) -> &'static str {
        match self {
            SiteVariant::Normal => "normal",
            SiteVariant::Fighter => "fighter",
            SiteVariant::Casino => "casino",
            SiteVariant::Autonomous => "autonomous",
        }
    }
}

impl FromStr for SiteVariant {
    type Err = RoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(SiteVariant::Normal),
            "fighter" => Ok(SiteVariant::Fighter),
            "casino" => Ok(SiteVariant::Casino),
            "autonomous" => Ok(SiteVariant::Autonomous),
            _ => Err(RoadError::UnknownVariant {
                entity: "store",
                name: s.to_string(),
                valid: Self::NAMES,
            }),
        }
    }
}

impl SiteCapability for SiteVariant {
    fn accepts_agent(&self, agent_balance: i64, site_balance: i64) -> bool {
        match self {
            SiteVariant::Fighter => agent_balance > site_balance,
            _ => true,
        }
    }

    fn rejection_message(&self, agent_balance: i64, site_balance: i64) -> Option<String> {
        match self {
            SiteVariant::Fighter => Some(format!(
                "This fighter store only serves robots with more tenges than it holds. \
                 Robot has {} tenges, store has {} tenges.",
                agent_balance, site_balance
            )),
            _ => None,
        }
    }

    fn process_transfer(&self, collected: i64, rng: &mut dyn RandomSource) -> i64 {
        match self {
            SiteVariant::Casino => {
                let luck = rng.below(100);
                let percentage = if luck < 50 {
                    50 + rng.below(26)
                } else {
                    100 + rng.below(51)
                };
                let paid = i128::from(collected) * percentage as i128 / 100;
                i64::try_from(paid).unwrap_or(if paid < 0 { i64::MIN } else { i64::MAX })
            }
            _ => collected,
        }
    }

    fn needs_random_position(&self) -> bool {
        matches!(self, SiteVariant::Autonomous)
    }
}

/// A store on the road
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub position: usize,
    /// Current balance. A casino payout may push it below zero.
    pub tenges: i64,
    /// Balance at placement, restored on reboot
    pub original: i64,
    pub variant: SiteVariant,
}

impl Site {
    pub fn new(id: SiteId, variant: SiteVariant, position: usize, tenges: i64) -> Self {
        Self {
            id,
            position,
            tenges,
            original: tenges,
            variant,
        }
    }

    pub fn is_active(&self) -> bool {
        self.tenges > 0
    }

    pub fn restore(&mut self) {
        self.tenges = self.original;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    #[test]
    fn test_parse_variants() {
        assert_eq!("Casino".parse::<SiteVariant>().unwrap(), SiteVariant::Casino);
        assert_eq!(
            "AUTONOMOUS".parse::<SiteVariant>().unwrap(),
            SiteVariant::Autonomous
        );
        let err = "bank".parse::<SiteVariant>().unwrap_err();
        assert!(err.to_string().contains(SiteVariant::NAMES));
    }

    #[test]
    fn test_fighter_requires_richer_robot() {
        let fighter = SiteVariant::Fighter;
        assert!(!fighter.accepts_agent(0, 100));
        assert!(!fighter.accepts_agent(100, 100));
        assert!(fighter.accepts_agent(101, 100));

        let message = fighter.rejection_message(0, 100).unwrap();
        assert!(message.contains("0 tenges"));
        assert!(message.contains("100 tenges"));
        assert!(SiteVariant::Normal.rejection_message(0, 100).is_none());
    }

    #[test]
    fn test_casino_loss_and_gain() {
        let casino = SiteVariant::Casino;

        // luck 10 -> loss branch, 50 + 10 = 60%
        let mut rng = ScriptedRandom::new([10, 10]);
        assert_eq!(casino.process_transfer(100, &mut rng), 60);

        // luck 70 -> gain branch, 100 + 50 = 150%
        let mut rng = ScriptedRandom::new([70, 50]);
        assert_eq!(casino.process_transfer(100, &mut rng), 150);

        // Truncates toward zero
        let mut rng = ScriptedRandom::new([0, 25]);
        assert_eq!(casino.process_transfer(7, &mut rng), 5);
    }

    #[test]
    fn test_casino_payout_on_huge_balances() {
        let casino = SiteVariant::Casino;

        let mut rng = ScriptedRandom::new([99, 50]);
        assert_eq!(
            casino.process_transfer(i64::MAX / 100, &mut rng),
            138_350_580_552_821_637
        );

        // Beyond the i64 range the payout saturates
        let mut rng = ScriptedRandom::new([99, 50]);
        assert_eq!(casino.process_transfer(i64::MAX, &mut rng), i64::MAX);
    }

    #[test]
    fn test_normal_transfer_passes_through() {
        let mut rng = ScriptedRandom::default();
        assert_eq!(SiteVariant::Normal.process_transfer(42, &mut rng), 42);
        assert!(!SiteVariant::Normal.needs_random_position());
        assert!(SiteVariant::Autonomous.needs_random_position());
    }

    #[test]
    fn test_site_restore() {
        let mut site = Site::new(SiteId::from_sequence(3), SiteVariant::Normal, 5, 100);
        assert_eq!(site.id.to_string(), "store_0003");
        site.tenges = -20;
        assert!(!site.is_active());
        site.restore();
        assert_eq!(site.tenges, 100);
    }
}
