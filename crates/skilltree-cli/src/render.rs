use skilltree_core::{Achievement, NotificationSink, SkillNode};

/// Width of the character progress bars.
pub const BAR_WIDTH: usize = 20;

/// Renders `[#####...............] 25%`.
pub fn progress_bar(current: u64, max: u64) -> String {
    let percent = if max == 0 {
        0
    } else {
        (current.saturating_mul(100) / max).min(100)
    };
    let filled = (percent as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        percent
    )
}

/// One line of the skill listing.
pub fn skill_line(skill: &SkillNode) -> String {
    if skill.unlocked {
        format!(
            "  {} {:<14} Lv.{:<3} {} {}/{}",
            skill.icon,
            skill.name,
            skill.level,
            progress_bar(u64::from(skill.current_exp), u64::from(skill.max_exp)),
            skill.current_exp,
            skill.max_exp
        )
    } else {
        let needs = skill.prerequisite_ids().join(", ");
        format!("  🔒 {:<14} locked (needs {} at Lv.2)", skill.name, needs)
    }
}

/// One line of the achievement listing.
pub fn achievement_line(achievement: &Achievement) -> String {
    let marker = if achievement.unlocked { "✔" } else { " " };
    format!(
        "  [{}] {} {:<22} {:<10} {}",
        marker,
        achievement.icon,
        achievement.name,
        achievement.rarity.as_str(),
        achievement.description
    )
}

/// Prints unlocked achievements as they arrive.
#[derive(Debug, Default)]
pub struct TerminalSink {
    pub shown: usize,
}

impl NotificationSink for TerminalSink {
    fn notify(&mut self, achievement: &Achievement) {
        self.shown += 1;
        println!(
            "🏆 ACHIEVEMENT UNLOCKED: {} {} ({})",
            achievement.icon,
            achievement.name,
            achievement.rarity.as_str()
        );
        println!("   {}", achievement.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 100), "[....................] 0%");
        assert_eq!(progress_bar(45, 100), "[#########...........] 45%");
        assert_eq!(progress_bar(100, 100), "[####################] 100%");
        assert_eq!(progress_bar(250, 100), "[####################] 100%");
        assert_eq!(progress_bar(5, 0), "[....................] 0%");
    }
}
