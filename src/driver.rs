//! Per-frame animation driver.

use crate::effects::EffectTimer;
use crate::host::{Host, Sprite};
use crate::session::Session;

/// What one frame did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub fired: Vec<EffectTimer>,
    pub spawned: usize,
    pub updated: usize,
    pub released: usize,
}

/// Advances the session once per display refresh: due effect stages first,
/// then one physics step, then visual reconciliation.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    frames: u64,
    last_timestamp: Option<f64>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    pub fn tick<V, H: Host<Visual = V>>(
        &mut self,
        session: &mut Session<V>,
        now: f64,
        host: &mut H,
    ) -> TickReport {
        self.frames += 1;
        self.last_timestamp = Some(now);

        let mut report = TickReport {
            fired: session.poll_timers(now, host),
            ..TickReport::default()
        };

        let params = session.config.step_params();
        for expired in session.particles.step(&params) {
            if let Some(visual) = expired.visual {
                host.release_visual(visual);
                report.released += 1;
            }
        }

        let font_size = session.font_size;
        for p in session.particles.particles_mut() {
            let sprite = Sprite::of(p, font_size);
            match p.visual.as_mut() {
                Some(visual) => {
                    host.update_visual(visual, &sprite);
                    report.updated += 1;
                }
                None => {
                    p.visual = Some(host.spawn_visual(&sprite));
                    report.spawned += 1;
                }
            }
        }
        report
    }
}
