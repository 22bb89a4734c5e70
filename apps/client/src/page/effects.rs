//! Timed reverts scheduled on the page, such as the auto-hide of the error
//! banner. Deadlines use the tokio clock so tests can drive them with a
//! paused runtime.

use tokio::time::{Duration, Instant};
use tracing::trace;

use super::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AddClass { id: String, class: &'static str },
    RemoveClass { id: String, class: &'static str },
}

impl Effect {
    pub fn add_class(id: &str, class: &'static str) -> Self {
        Effect::AddClass {
            id: id.to_string(),
            class,
        }
    }

    pub fn remove_class(id: &str, class: &'static str) -> Self {
        Effect::RemoveClass {
            id: id.to_string(),
            class,
        }
    }

    fn target(&self) -> (&str, &'static str) {
        match self {
            Effect::AddClass { id, class } | Effect::RemoveClass { id, class } => (id.as_str(), *class),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScheduledEffect {
    pub due: Instant,
    pub effect: Effect,
}

impl Document {
    /// Schedules `effect` to run after `delay`. A pending effect on the same
    /// element and class is replaced, so the latest schedule wins.
    pub fn schedule(&mut self, delay: Duration, effect: Effect) {
        let target = effect.target();
        self.effects.retain(|pending| pending.effect.target() != target);
        self.effects.push(ScheduledEffect {
            due: Instant::now() + delay,
            effect,
        });
    }

    /// Applies every effect whose deadline has passed. Returns how many ran.
    pub fn run_due_effects(&mut self) -> usize {
        let now = Instant::now();
        let (due, pending): (Vec<_>, Vec<_>) =
            self.effects.drain(..).partition(|scheduled| scheduled.due <= now);
        self.effects = pending;

        for scheduled in &due {
            trace!("Running scheduled effect {:?}", scheduled.effect);
            match &scheduled.effect {
                Effect::AddClass { id, class } => {
                    if let Some(element) = self.get_mut(id) {
                        element.add_class(class);
                    }
                }
                Effect::RemoveClass { id, class } => {
                    if let Some(element) = self.get_mut(id) {
                        element.remove_class(class);
                    }
                }
            }
        }
        due.len()
    }

    #[cfg(test)]
    pub fn pending_effects(&self) -> usize {
        self.effects.len()
    }
}
