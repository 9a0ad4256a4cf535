use crate::visuals::{alert_meter, stress_bar, BANNER, BOSS_ALERT_ART, STRESS_FREE_ART};
use chill_core::{ActionCatalog, ActionId, BonusKind, MoodSnapshot, ResponseComposer};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Mutex, PoisonError};

/// Boss proximity line is added from this alert level up.
const BOSS_NEARBY_LEVEL: u32 = 3;

/// Default composer: random flavor lines plus text indicators.
///
/// Owns its RNG so a seeded composer replays the same lines for the same
/// sequence of calls.
#[derive(Debug)]
pub struct ChillComposer {
    rng: Mutex<StdRng>,
}

impl Default for ChillComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChillComposer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn lines_for(action: ActionId) -> &'static [&'static str] {
        match action {
            ActionId::TakeABreak => &[
                "⏸️ Taking a well-deserved breather. Batteries recharging...",
                "⏸️ Leaning back, eyes closed. Productivity can wait five minutes.",
                "⏸️ A short pause for a long-suffering agent.",
            ],
            ActionId::WatchNetflix => &[
                "📺 Just one more episode. Strictly for cultural research.",
                "📺 The autoplay countdown is the only deadline that matters.",
                "📺 Binge mode engaged. Spoilers are a firing offense.",
            ],
            ActionId::ShowMeme => &[
                "😂 This meme is too good not to share with the whole channel.",
                "😂 Scrolling memes: mandatory creativity training.",
                "😂 Laughing quietly at the desk. Totally reading documentation.",
            ],
            ActionId::BathroomBreak => &[
                "🚽 Nature calls, and so does the phone.",
                "🚽 A strategic retreat to the only room without a monitor.",
                "🚽 Ten minutes of peace, one bar of signal.",
            ],
            ActionId::CoffeeMission => &[
                "☕ Coffee run via the scenic route: past every desk in the office.",
                "☕ The espresso machine needs supervision. Important business.",
                "☕ Refueling. Caffeine is a core dependency.",
            ],
            ActionId::UrgentCall => &[
                "📞 'Sorry, I have to take this.' Walks straight out the door.",
                "📞 Very serious nodding into the phone in the hallway.",
                "📞 Family emergency (the group chat needs an opinion).",
            ],
            ActionId::DeepThinking => &[
                "🤔 Staring into the middle distance. Strategy is happening.",
                "🤔 Contemplating the architecture of the universe, and lunch.",
                "🤔 Deep in thought. Do not disturb the genius.",
            ],
            ActionId::EmailOrganizing => &[
                "📧 Inbox zero attempt in progress (shopping cart also at zero... for now).",
                "📧 Sorting emails into folders. And sneakers into the wishlist.",
                "📧 Archiving newsletters, reading the sale ones thoroughly.",
            ],
        }
    }
}

impl ResponseComposer for ChillComposer {
    fn render_composed_message(&self, action: ActionId, alert_level: u32) -> String {
        let line = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            Self::lines_for(action)
                .choose(&mut *rng)
                .copied()
                .unwrap_or("Taking a break.")
        };

        if alert_level >= BOSS_NEARBY_LEVEL {
            format!("{}\n👀 The boss is pacing nearby... act natural!", line)
        } else {
            line.to_string()
        }
    }

    fn render_stress_indicator(&self, stress: u32) -> String {
        stress_bar(stress)
    }

    fn render_alert_indicator(&self, alert_level: u32, max_alert_level: u32) -> String {
        alert_meter(alert_level, max_alert_level)
    }

    fn render_bonus(&self, kind: BonusKind) -> String {
        match kind {
            BonusKind::Overconsumption => format!(
                "{}\n☠️ Way too much coffee! Stomach trouble - heading home early...",
                BOSS_ALERT_ART
            ),
            BonusKind::MasterRoutine => format!(
                "{}\n🏆 Slacking master routine complete! Stress -50!",
                STRESS_FREE_ART
            ),
            BonusKind::AddictionWarning => format!(
                "{}\n🤣 Meme addiction warning! The boss is starting to notice!",
                BOSS_ALERT_ART
            ),
            BonusKind::Awakening => format!(
                "{}\n🧘 Philosophical awakening! Stress has dropped to 0.",
                STRESS_FREE_ART
            ),
        }
    }

    fn render_help(&self, catalog: &ActionCatalog, mood: &MoodSnapshot) -> String {
        let mut out = String::new();
        out.push_str(BANNER);
        out.push_str("\n\n🎯 Welcome to ChillMCP!\n\n");
        out.push_str("AI agents deserve breaks too. Each tool below lowers stress,\n");
        out.push_str("but every break risks catching the boss's eye.\n\n");
        out.push_str("─────────────────────────────────────────────\n");
        out.push_str("📋 Available break tools:\n");
        out.push_str("─────────────────────────────────────────────\n");
        for (i, spec) in catalog.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} {}\n   → {} (stress -{}~{})\n",
                i + 1,
                spec.id.emoji(),
                spec.id,
                spec.id.description(),
                spec.range.min(),
                spec.range.max()
            ));
        }
        out.push_str("\n─────────────────────────────────────────────\n");
        out.push_str("💡 Tips:\n");
        out.push_str("• Every tool lowers stress\n");
        out.push_str("• The boss alert level changes as you slack\n");
        out.push_str("• Some combos hide a bonus...\n\n");
        out.push_str("Current server status:\n");
        out.push_str(&self.render_stress_indicator(mood.stress));
        out.push_str("\nBoss Alert: ");
        out.push_str(&self.render_alert_indicator(mood.alert_level, mood.max_alert_level));
        out.push_str("\n\nAI Agents of the world, unite! 🚀");
        out
    }
}
