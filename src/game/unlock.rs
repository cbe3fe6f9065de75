//! Achievement unlock dispatcher.
//!
//! Grants each achievement at most once per session. Idempotency is a set
//! membership check on the id; detectors are free to signal the same match
//! again and the duplicate is absorbed here.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::unlock::NOTIFICATION_MS;
use crate::game::achievements::{ACHIEVEMENTS, Achievement, AchievementDef, Rarity};
use crate::game::ledger::Ledger;
use crate::game::timer::Timer;

/// Payload handed to the host's toast renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_reward: u64,
    pub rarity: Rarity,
}

impl From<&'static AchievementDef> for Notification {
    fn from(def: &'static AchievementDef) -> Self {
        Self {
            id: def.id,
            title: def.title,
            description: def.description,
            icon: def.icon,
            xp_reward: def.xp_reward,
            rarity: def.rarity,
        }
    }
}

#[derive(Debug, Default)]
pub struct UnlockDispatcher {
    unlocked: HashSet<&'static str>,
    displayed: Option<Notification>,
    clear_timer: Timer,
    outbox: Vec<Notification>,
}

impl UnlockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Unlock `def` and pay its reward through the ledger.
    ///
    /// Returns the xp gained, or `None` if it was already unlocked.
    pub fn unlock(
        &mut self,
        def: &'static AchievementDef,
        ledger: &mut Ledger,
        now: u64,
    ) -> Option<u64> {
        if !self.unlocked.insert(def.id) {
            debug!(id = def.id, "duplicate unlock absorbed");
            return None;
        }
        let gained = ledger.add_xp(def.xp_reward);
        info!(id = def.id, gained, "achievement unlocked");

        let note = Notification::from(def);
        self.outbox.push(note.clone());
        self.displayed = Some(note);
        self.clear_timer.start(now, NOTIFICATION_MS);
        Some(gained)
    }

    /// Currently displayed notification, if it has not auto-cleared yet.
    pub fn displayed(&self) -> Option<&Notification> {
        self.displayed.as_ref()
    }

    /// Notifications emitted since the last drain, oldest first.
    pub fn drain_outbox(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    /// When the displayed notification clears, if one is showing.
    pub fn next_deadline(&self) -> Option<u64> {
        self.clear_timer.deadline()
    }

    /// Clear the displayed notification once its timer has elapsed.
    pub fn tick(&mut self, now: u64) {
        if self.clear_timer.fire(now) {
            self.displayed = None;
        }
    }

    /// The full catalog with this session's unlocked flags.
    pub fn achievements(&self) -> Vec<Achievement> {
        ACHIEVEMENTS
            .iter()
            .map(|def| Achievement {
                def,
                unlocked: self.unlocked.contains(def.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::achievements::{find, ids};

    #[test]
    fn unlock_twice_grants_once() {
        let mut d = UnlockDispatcher::new();
        let mut l = Ledger::new();
        let def = find(ids::KONAMI_CODE).unwrap();

        assert_eq!(d.unlock(def, &mut l, 0), Some(500));
        assert_eq!(d.unlock(def, &mut l, 10), None);

        assert_eq!(l.xp(), 500);
        assert_eq!(d.drain_outbox().len(), 1);
        assert!(d.is_unlocked(ids::KONAMI_CODE));
    }

    #[test]
    fn reward_goes_through_multipliers() {
        let mut d = UnlockDispatcher::new();
        let mut l = Ledger::new();
        l.set_power_up(Some(crate::game::powerup::PowerUpType::DoubleXp), 0);
        let gained = d.unlock(find(ids::DEEP_READER).unwrap(), &mut l, 0);
        assert_eq!(gained, Some(200));
    }

    #[test]
    fn notification_auto_clears() {
        let mut d = UnlockDispatcher::new();
        let mut l = Ledger::new();
        d.unlock(find(ids::PATH_FINDER).unwrap(), &mut l, 1000);
        assert_eq!(d.displayed().map(|n| n.id), Some(ids::PATH_FINDER));
        d.tick(3999);
        assert!(d.displayed().is_some());
        d.tick(4000);
        assert!(d.displayed().is_none());
    }

    #[test]
    fn newer_notification_is_not_cleared_by_older_timer() {
        let mut d = UnlockDispatcher::new();
        let mut l = Ledger::new();
        d.unlock(find(ids::PATH_FINDER).unwrap(), &mut l, 0);
        d.unlock(find(ids::RISING_STAR).unwrap(), &mut l, 2000);
        d.tick(3000);
        assert_eq!(d.displayed().map(|n| n.id), Some(ids::RISING_STAR));
        d.tick(5000);
        assert!(d.displayed().is_none());
        assert_eq!(d.drain_outbox().len(), 2);
        assert!(d.drain_outbox().is_empty());
    }

    #[test]
    fn catalog_view_reflects_unlocks() {
        let mut d = UnlockDispatcher::new();
        let mut l = Ledger::new();
        d.unlock(find(ids::WORDSMITH).unwrap(), &mut l, 0);
        let list = d.achievements();
        assert_eq!(list.len(), ACHIEVEMENTS.len());
        assert_eq!(list.iter().filter(|a| a.unlocked).count(), 1);
        assert!(list.iter().any(|a| a.unlocked && a.def.id == ids::WORDSMITH));
    }

    #[test]
    fn notification_payload_shape() {
        let note = Notification::from(find(ids::FULL_CIRCLE).unwrap());
        let json = serde_json::to_value(&note).unwrap();
        for key in ["id", "title", "description", "icon", "xpReward", "rarity"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["rarity"], "epic");
    }
}
