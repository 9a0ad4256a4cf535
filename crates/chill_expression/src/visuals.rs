//! Text indicators and banner art.

const BAR_CELLS: u32 = 10;

pub const STRESS_FREE_ART: &str = r"
   \(^o^)/   STRESS FREE   \(^o^)/
  ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

pub const BOSS_ALERT_ART: &str = r"
  /!\ /!\  BOSS ALERT  /!\ /!\
  ============================";

pub const BANNER: &str = r"
 ==========================================
    ____ _     _ _ _   __  __  ____ ____
   / ___| |__ (_) | | |  \/  |/ ___|  _ \
  | |   | '_ \| | | | | |\/| | |   | |_) |
  | |___| | | | | | | | |  | | |___|  __/
   \____|_| |_|_|_|_| |_|  |_|\____|_|

        AI Agent Liberation Server
 ==========================================";

/// `Stress Level: 45 [████░░░░░░]`
pub fn stress_bar(stress: u32) -> String {
    let stress = stress.min(100);
    let filled = (stress * BAR_CELLS + 50) / 100;
    format!(
        "Stress Level: {} [{}{}]",
        stress,
        "█".repeat(filled as usize),
        "░".repeat((BAR_CELLS - filled) as usize)
    )
}

/// `2/5 🚨🚨⬜⬜⬜`
pub fn alert_meter(level: u32, max: u32) -> String {
    let level = level.min(max);
    format!(
        "{}/{} {}{}",
        level,
        max,
        "🚨".repeat(level as usize),
        "⬜".repeat((max - level) as usize)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_bar_cells() {
        assert_eq!(stress_bar(0), "Stress Level: 0 [░░░░░░░░░░]");
        assert_eq!(stress_bar(100), "Stress Level: 100 [██████████]");
        assert_eq!(stress_bar(45), "Stress Level: 45 [█████░░░░░]");
        assert_eq!(stress_bar(44), "Stress Level: 44 [████░░░░░░]");
    }

    #[test]
    fn test_alert_meter() {
        assert_eq!(alert_meter(0, 5), "0/5 ⬜⬜⬜⬜⬜");
        assert_eq!(alert_meter(2, 5), "2/5 🚨🚨⬜⬜⬜");
        assert_eq!(alert_meter(9, 5), "5/5 🚨🚨🚨🚨🚨");
    }
}
