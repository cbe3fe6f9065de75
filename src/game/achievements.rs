//! Achievement catalog.
//!
//! Every detector, coverage category and mini-game threshold maps to one
//! entry here. The catalog is static; whether an entry is unlocked lives in
//! the session's [`UnlockDispatcher`](crate::game::unlock::UnlockDispatcher).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Secret,
    Explorer,
    Gamer,
    Streak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_reward: u64,
    pub rarity: Rarity,
    pub category: Category,
}

/// An achievement as seen by one session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(flatten)]
    pub def: &'static AchievementDef,
    pub unlocked: bool,
}

pub mod ids {
    pub const SECRET_HANDSHAKE: &str = "secret_handshake";
    pub const PATH_FINDER: &str = "path_finder";
    pub const RISING_STAR: &str = "rising_star";
    pub const FULL_CIRCLE: &str = "full_circle";
    pub const IN_THE_GROOVE: &str = "in_the_groove";
    pub const KONAMI_CODE: &str = "konami_code";
    pub const WORDSMITH: &str = "wordsmith";
    pub const DEEP_READER: &str = "deep_reader";
    pub const PROJECT_EXPLORER: &str = "project_explorer";
    pub const SKILL_COLLECTOR: &str = "skill_collector";
    pub const CAREER_HISTORIAN: &str = "career_historian";
    pub const MEMORY_MASTER: &str = "memory_master";
    pub const SNAKE_CHARMER: &str = "snake_charmer";
    pub const SPEED_DEMON: &str = "speed_demon";
    pub const COMBO_MASTER: &str = "combo_master";
}

pub static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: ids::SECRET_HANDSHAKE,
        title: "Secret Handshake",
        description: "Pressed left, right, left, left",
        icon: "🤝",
        xp_reward: 200,
        rarity: Rarity::Rare,
        category: Category::Secret,
    },
    AchievementDef {
        id: ids::PATH_FINDER,
        title: "Path Finder",
        description: "Hovered about, projects and contact in order",
        icon: "🧭",
        xp_reward: 150,
        rarity: Rarity::Rare,
        category: Category::Secret,
    },
    AchievementDef {
        id: ids::RISING_STAR,
        title: "Rising Star",
        description: "Clicked four times along a rising diagonal",
        icon: "📈",
        xp_reward: 150,
        rarity: Rarity::Rare,
        category: Category::Secret,
    },
    AchievementDef {
        id: ids::FULL_CIRCLE,
        title: "Full Circle",
        description: "Drew a circle with eight clicks",
        icon: "⭕",
        xp_reward: 300,
        rarity: Rarity::Epic,
        category: Category::Secret,
    },
    AchievementDef {
        id: ids::IN_THE_GROOVE,
        title: "In the Groove",
        description: "Clicked on a half-second beat",
        icon: "🥁",
        xp_reward: 100,
        rarity: Rarity::Common,
        category: Category::Secret,
    },
    AchievementDef {
        id: ids::KONAMI_CODE,
        title: "Konami Code",
        description: "Up, up, down, down, left, right, left, right, B, A",
        icon: "🎮",
        xp_reward: 500,
        rarity: Rarity::Legendary,
        category: Category::Secret,
    },
    AchievementDef {
        id: ids::WORDSMITH,
        title: "Wordsmith",
        description: "Spelled a hidden word with your selections",
        icon: "🔤",
        xp_reward: 250,
        rarity: Rarity::Epic,
        category: Category::Secret,
    },
    AchievementDef {
        id: ids::DEEP_READER,
        title: "Deep Reader",
        description: "Lingered on one thing for ten seconds",
        icon: "📖",
        xp_reward: 100,
        rarity: Rarity::Common,
        category: Category::Explorer,
    },
    AchievementDef {
        id: ids::PROJECT_EXPLORER,
        title: "Project Explorer",
        description: "Opened every project",
        icon: "🗂️",
        xp_reward: 300,
        rarity: Rarity::Epic,
        category: Category::Explorer,
    },
    AchievementDef {
        id: ids::SKILL_COLLECTOR,
        title: "Skill Collector",
        description: "Inspected every skill",
        icon: "🧰",
        xp_reward: 200,
        rarity: Rarity::Rare,
        category: Category::Explorer,
    },
    AchievementDef {
        id: ids::CAREER_HISTORIAN,
        title: "Career Historian",
        description: "Read every experience entry",
        icon: "🏛️",
        xp_reward: 200,
        rarity: Rarity::Rare,
        category: Category::Explorer,
    },
    AchievementDef {
        id: ids::MEMORY_MASTER,
        title: "Memory Master",
        description: "Matched every pair in Memory-Match",
        icon: "🧠",
        xp_reward: 250,
        rarity: Rarity::Rare,
        category: Category::Gamer,
    },
    AchievementDef {
        id: ids::SNAKE_CHARMER,
        title: "Snake Charmer",
        description: "Scored 200 points in one game of Snake",
        icon: "🐍",
        xp_reward: 300,
        rarity: Rarity::Epic,
        category: Category::Gamer,
    },
    AchievementDef {
        id: ids::SPEED_DEMON,
        title: "Speed Demon",
        description: "Typed a snippet at 60 words per minute",
        icon: "⌨️",
        xp_reward: 300,
        rarity: Rarity::Epic,
        category: Category::Gamer,
    },
    AchievementDef {
        id: ids::COMBO_MASTER,
        title: "Combo Master",
        description: "Built a combo of ten",
        icon: "🔥",
        xp_reward: 200,
        rarity: Rarity::Rare,
        category: Category::Streak,
    },
];

pub fn find(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let mut seen = HashSet::new();
        for a in ACHIEVEMENTS {
            assert!(seen.insert(a.id), "duplicate achievement id {}", a.id);
        }
    }

    #[test]
    fn every_id_constant_is_in_catalog() {
        for id in [
            ids::SECRET_HANDSHAKE,
            ids::PATH_FINDER,
            ids::RISING_STAR,
            ids::FULL_CIRCLE,
            ids::IN_THE_GROOVE,
            ids::KONAMI_CODE,
            ids::WORDSMITH,
            ids::DEEP_READER,
            ids::PROJECT_EXPLORER,
            ids::SKILL_COLLECTOR,
            ids::CAREER_HISTORIAN,
            ids::MEMORY_MASTER,
            ids::SNAKE_CHARMER,
            ids::SPEED_DEMON,
            ids::COMBO_MASTER,
        ] {
            assert!(find(id).is_some(), "{id} missing");
        }
        assert_eq!(ACHIEVEMENTS.len(), 15);
    }

    #[test]
    fn achievement_serializes_flat() {
        let a = Achievement {
            def: find(ids::KONAMI_CODE).unwrap(),
            unlocked: true,
        };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["id"], "konami_code");
        assert_eq!(json["xpReward"], 500);
        assert_eq!(json["rarity"], "legendary");
        assert_eq!(json["unlocked"], true);
    }
}
