//! Site actions that pay XP directly (project views, skill clicks, section
//! visits). Each call site has its own reward and power-up chance.

use serde::Serialize;

use crate::config::rewards;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteAction {
    ViewProject,
    ClickSkill,
    VisitSection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reward {
    pub xp: u64,
    pub power_up_chance: f64,
}

impl SiteAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "view_project" => Some(Self::ViewProject),
            "click_skill" => Some(Self::ClickSkill),
            "visit_section" => Some(Self::VisitSection),
            _ => None,
        }
    }

    pub fn reward(self) -> Reward {
        match self {
            Self::ViewProject => Reward {
                xp: rewards::VIEW_PROJECT_XP,
                power_up_chance: rewards::VIEW_PROJECT_POWER_UP_CHANCE,
            },
            Self::ClickSkill => Reward {
                xp: rewards::CLICK_SKILL_XP,
                power_up_chance: rewards::CLICK_SKILL_POWER_UP_CHANCE,
            },
            Self::VisitSection => Reward {
                xp: rewards::VISIT_SECTION_XP,
                power_up_chance: rewards::VISIT_SECTION_POWER_UP_CHANCE,
            },
        }
    }
}
