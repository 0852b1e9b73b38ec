use std::collections::VecDeque;

use crate::achievement::Achievement;

/// Receives achievements as they unlock, one at a time and in order.
///
/// Display pacing is up to the implementation.
pub trait NotificationSink {
    fn notify(&mut self, achievement: &Achievement);
}

impl<T: NotificationSink + ?Sized> NotificationSink for &mut T {
    fn notify(&mut self, achievement: &Achievement) {
        (**self).notify(achievement)
    }
}

/// FIFO of achievement ids waiting to be shown.
#[derive(Debug, Default, Clone)]
pub struct AchievementQueue {
    pending: VecDeque<String>,
}

impl AchievementQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next achievement id to show.
    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes every pending id in unlock order.
    pub fn drain(&mut self) -> Vec<String> {
        self.pending.drain(..).collect()
    }
}

impl NotificationSink for AchievementQueue {
    fn notify(&mut self, achievement: &Achievement) {
        self.pending.push_back(achievement.id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievement::{Rarity, UnlockCondition};

    fn achievement(id: &str) -> Achievement {
        Achievement::new(id, id, "", "", Rarity::Common, UnlockCondition::AnySkillAtLeast { level: 1 })
    }

    #[test]
    fn test_queue_preserves_order() {
        let mut queue = AchievementQueue::new();
        queue.notify(&achievement("a"));
        queue.notify(&achievement("b"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some("a".to_string()));
        assert_eq!(queue.drain(), vec!["b".to_string()]);
        assert!(queue.is_empty());
    }
}
