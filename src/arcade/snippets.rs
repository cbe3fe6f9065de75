//! Typing-Speed difficulty tiers and their snippet pools.

use crate::config::typing::TIER_COUNT;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub level: u32,
    pub name: &'static str,
    pub time_limit_ms: u64,
    pub multiplier: f64,
    pub snippets: &'static [&'static str],
}

pub static TIERS: [Tier; TIER_COUNT as usize] = [
    Tier {
        level: 1,
        name: "Warm-up",
        time_limit_ms: 60_000,
        multiplier: 1.0,
        snippets: &[
            "let x = 5;",
            "fn main() {}",
            "println!(\"hi\");",
            "let mut n = 0;",
        ],
    },
    Tier {
        level: 2,
        name: "Easy",
        time_limit_ms: 50_000,
        multiplier: 1.25,
        snippets: &[
            "let name = String::from(\"ferris\");",
            "for i in 0..10 { total += i; }",
            "if score > best { best = score; }",
        ],
    },
    Tier {
        level: 3,
        name: "Medium",
        time_limit_ms: 45_000,
        multiplier: 1.5,
        snippets: &[
            "let evens: Vec<u32> = nums.iter().filter(|n| *n % 2 == 0).collect();",
            "match cmd { Some(c) => run(c), None => idle() }",
            "impl Default for Config { fn default() -> Self { Self::new() } }",
        ],
    },
    Tier {
        level: 4,
        name: "Hard",
        time_limit_ms: 40_000,
        multiplier: 2.0,
        snippets: &[
            "pub fn parse<T: FromStr>(s: &str) -> Option<T> { s.trim().parse().ok() }",
            "let total: u64 = items.iter().map(|i| i.price * i.qty as u64).sum();",
            "while let Some(job) = queue.pop_front() { job.run(&mut ctx)?; }",
        ],
    },
    Tier {
        level: 5,
        name: "Expert",
        time_limit_ms: 30_000,
        multiplier: 3.0,
        snippets: &[
            "impl<T: Clone + Send + 'static> Pool<T> { pub fn spawn(&self, t: T) -> JoinHandle<()> { self.run(t) } }",
            "let map: HashMap<_, Vec<_>> = pairs.into_iter().fold(HashMap::new(), |mut m, (k, v)| { m.entry(k).or_default().push(v); m });",
        ],
    },
];

/// Tier for a 1-based round number. Rounds past the last tier stay there.
pub fn tier_for_round(round: u32) -> &'static Tier {
    let idx = round.clamp(1, TIER_COUNT) - 1;
    &TIERS[idx as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_get_harder() {
        for pair in TIERS.windows(2) {
            assert!(pair[1].time_limit_ms < pair[0].time_limit_ms);
            assert!(pair[1].multiplier > pair[0].multiplier);
            assert_eq!(pair[1].level, pair[0].level + 1);
        }
        assert!(TIERS.iter().all(|t| !t.snippets.is_empty()));
    }

    #[test]
    fn round_maps_to_tier() {
        assert_eq!(tier_for_round(0).level, 1);
        assert_eq!(tier_for_round(1).level, 1);
        assert_eq!(tier_for_round(3).level, 3);
        assert_eq!(tier_for_round(5).level, 5);
        assert_eq!(tier_for_round(12).level, 5);
    }
}
