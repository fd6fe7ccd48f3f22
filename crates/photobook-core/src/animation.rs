//! Settle animations and a deterministic, tick-driven animation primitive.
//!
//! A released or commanded page is animated from its current angle to the
//! resting angle of its direction. The [`Animator`] reports every running
//! animation's intermediate angle and then the completions of the frame, in
//! the order the animations actually finished. Pages started later with a
//! shorter remaining distance can therefore complete before older pages.

use crate::page::{FLAT_LEFT, FLAT_RIGHT, PageId, TurningPage};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Easing {
    /// Commanded turns that start from rest.
    EaseInOutCubic,
    /// Releases mid-drag; the page is already moving.
    EaseOutCubic,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// How a page settles: from where, to where, how long and with what curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SettlePlan {
    pub page: PageId,
    pub from: f64,
    pub to: f64,
    #[ts(type = "number")]
    pub duration_ms: u64,
    pub easing: Easing,
}

impl SettlePlan {
    /// Plan the settle of `page`.
    ///
    /// The duration scales with the remaining distance and shrinks with the
    /// logarithm of the release speed, so a fast flick lands quickly.
    pub fn for_page(
        page: &TurningPage,
        speed: f64,
        base_duration: Duration,
        flick_speed_factor: f64,
    ) -> Self {
        let from = page.angle();
        let to = page.direction().target_angle();
        let distance = (from - to).abs() / (FLAT_RIGHT - FLAT_LEFT);
        let flick = (speed.abs() * flick_speed_factor).ln().max(1.0);
        let duration_ms = (base_duration.as_millis() as f64 * distance / flick).round() as u64;
        let easing = if page.is_resting() {
            Easing::EaseInOutCubic
        } else {
            Easing::EaseOutCubic
        };
        Self {
            page: page.id(),
            from,
            to,
            duration_ms,
            easing,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn angle_at(&self, elapsed: Duration) -> f64 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration().as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

/// One running settle animation.
#[derive(Debug, Clone, Copy)]
pub struct SettleAnimation {
    plan: SettlePlan,
    elapsed: Duration,
}

impl SettleAnimation {
    pub fn new(plan: SettlePlan) -> Self {
        Self {
            plan,
            elapsed: Duration::ZERO,
        }
    }

    pub fn page(&self) -> PageId {
        self.plan.page
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.plan.duration());
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.plan.duration()
    }

    pub fn remaining(&self) -> Duration {
        self.plan.duration().saturating_sub(self.elapsed)
    }

    pub fn value(&self) -> f64 {
        self.plan.angle_at(self.elapsed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    Step { page: PageId, angle: f64 },
    Complete { page: PageId },
}

/// Drives any number of settle animations from a frame clock.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    running: Vec<SettleAnimation>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating; replaces a running animation of the same page.
    pub fn start(&mut self, plan: SettlePlan) {
        self.running.retain(|anim| anim.page() != plan.page);
        self.running.push(SettleAnimation::new(plan));
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Advance every animation by `dt`. Steps come first, in start order,
    /// followed by the completions of this frame ordered by finish time.
    pub fn advance(&mut self, dt: Duration) -> Vec<AnimationEvent> {
        let mut events = Vec::with_capacity(self.running.len());
        let mut finished: Vec<(Duration, PageId)> = Vec::new();
        for anim in &mut self.running {
            let remaining = anim.remaining();
            anim.tick(dt);
            events.push(AnimationEvent::Step {
                page: anim.page(),
                angle: anim.value(),
            });
            if anim.is_complete() {
                finished.push((remaining, anim.page()));
            }
        }
        // Stable sort keeps start order for animations finishing together.
        finished.sort_by_key(|(remaining, _)| *remaining);
        self.running.retain(|anim| !anim.is_complete());
        events.extend(
            finished
                .into_iter()
                .map(|(_, page)| AnimationEvent::Complete { page }),
        );
        events
    }
}
