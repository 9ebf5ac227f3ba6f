use flappy_tft::config::{MAX_FRAMESKIP, SKIP_TICKS};
use flappy_tft::entities::GameSession;
use flappy_tft::scheduler::{Scheduler, Slot};

fn scheduler() -> Scheduler {
    Scheduler {
        skip_ticks: SKIP_TICKS,
        max_frameskip: MAX_FRAMESKIP,
    }
}

/// Poll at a fixed `now` until the scheduler asks for a render.
fn steps_before_render(s: &Scheduler, session: &mut GameSession, now: u32) -> Vec<f32> {
    let mut deltas = Vec::new();
    loop {
        match s.tick(session, now) {
            Slot::Simulate { delta } => deltas.push(delta),
            Slot::Render => return deltas,
        }
        assert!(deltas.len() <= 100, "scheduler never rendered");
    }
}

#[test]
fn five_steps_behind_runs_five_steps_then_renders() {
    let s = scheduler();
    let mut session = GameSession::start(1000);
    let now = 1000 + 5 * SKIP_TICKS;

    let deltas = steps_before_render(&s, &mut session, now);

    assert_eq!(deltas.len(), 5);
    assert_eq!(session.loops, 0);
    assert_eq!(session.next_tick, now);
    assert_eq!(session.last_time, now);
}

#[test]
fn first_catch_up_step_carries_elapsed_time_rest_carry_none() {
    let s = scheduler();
    let mut session = GameSession::start(1000);

    let deltas = steps_before_render(&s, &mut session, 1100);

    assert!((deltas[0] - 0.1).abs() < 1e-6);
    assert!(deltas[1..].iter().all(|&d| d == 0.0));
}

#[test]
fn catch_up_is_capped_and_falls_behind() {
    let s = scheduler();
    let mut session = GameSession::start(0);
    let now = 10 * SKIP_TICKS;

    let first = steps_before_render(&s, &mut session, now);
    assert_eq!(first.len(), MAX_FRAMESKIP as usize);
    assert_eq!(session.loops, 0);
    // Still behind: the next poll simulates again instead of stalling.
    assert!(session.next_tick < now);
    assert!(matches!(s.tick(&mut session, now), Slot::Simulate { .. }));
}

#[test]
fn caught_up_renders_immediately() {
    let s = scheduler();
    let mut session = GameSession::start(500);

    // The deadline has to be strictly passed.
    assert_eq!(s.tick(&mut session, 500), Slot::Render);
    assert_eq!(session.loops, 0);
    assert_eq!(session.next_tick, 500);
}

#[test]
fn nominal_rate_is_fifty_steps_per_second() {
    let s = scheduler();
    let mut session = GameSession::start(0);
    let mut steps = 0;
    let mut renders = 0;

    for now in 1..=1000 {
        match s.tick(&mut session, now) {
            Slot::Simulate { .. } => steps += 1,
            Slot::Render => renders += 1,
        }
    }

    assert_eq!(steps, 50);
    assert_eq!(renders, 950);
}

#[test]
fn step_advances_deadline_by_one_step() {
    let s = scheduler();
    let mut session = GameSession::start(0);

    assert_eq!(s.tick(&mut session, 7), Slot::Simulate { delta: 0.007 });
    assert_eq!(session.next_tick, SKIP_TICKS);
    assert_eq!(session.loops, 1);
}

#[test]
fn survives_millisecond_counter_wrap() {
    let s = scheduler();
    let start = u32::MAX - 5;
    let mut session = GameSession::start(start);
    let now = start.wrapping_add(SKIP_TICKS);

    match s.tick(&mut session, now) {
        Slot::Simulate { delta } => assert!((delta - 0.02).abs() < 1e-6),
        Slot::Render => panic!("expected a simulation step across the wrap"),
    }
    assert_eq!(session.next_tick, now);
}
