/// Fixed-timestep scheduling with bounded catch-up (the de Witters loop).
///
/// Each poll either asks for one simulation step or, once the simulation is
/// caught up with the clock (or the catch-up budget is spent), for one render
/// pass. The scheduler never sleeps; the caller polls again on its next loop
/// iteration.

use crate::config::Config;
use crate::entities::GameSession;

/// What the caller should do with this poll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slot {
    /// Advance physics by `delta` seconds of wall-clock time. Do not draw.
    Simulate { delta: f32 },
    /// Draw one frame and evaluate collisions.
    Render,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduler {
    /// Simulation step length in milliseconds.
    pub skip_ticks: u32,
    /// Upper bound on steps between two renders.
    pub max_frameskip: u32,
}

impl Scheduler {
    pub fn from_config(config: &Config) -> Scheduler {
        Scheduler {
            skip_ticks: config.skip_ticks_ms,
            max_frameskip: config.max_frameskip,
        }
    }

    pub fn tick(&self, session: &mut GameSession, now: u32) -> Slot {
        if is_after(now, session.next_tick) && session.loops < self.max_frameskip {
            let delta = now.wrapping_sub(session.last_time) as f32 / 1000.0;
            session.last_time = now;
            session.next_tick = session.next_tick.wrapping_add(self.skip_ticks);
            session.loops += 1;
            return Slot::Simulate { delta };
        }

        if session.loops >= self.max_frameskip && is_after(now, session.next_tick) {
            log::trace!(
                "frame skip limit hit, simulation {} ms behind",
                now.wrapping_sub(session.next_tick)
            );
        }
        session.loops = 0;
        Slot::Render
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler::from_config(&Config::default())
    }
}

/// `a > b` on a wrapping millisecond counter.
fn is_after(a: u32, b: u32) -> bool {
    let diff = a.wrapping_sub(b);
    diff != 0 && diff < u32::MAX / 2
}
