//! Heartpop entry point
//!
//! The browser build is driven from JavaScript through `platform::web`. The
//! native binary plays one scripted session on the simulated clock and logs
//! what a renderer would be told.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use heartpop::platform;
    use heartpop::settings::Settings;
    use heartpop::sim::{PointerInput, RngState, Session, TARGET_COUNT, handle_input, tick};
    use rand::seq::SliceRandom;

    platform::init_logging();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(platform::wall_clock_ms);
    log::info!("Heartpop (native) starting with seed: {}", seed);

    let settings = Settings::load();
    let timings = settings.timings.clone();
    let typing = settings.prompt.chars().count() as u64 * timings.type_interval_ms;
    let mut session = Session::with_settings(settings, seed);

    // Let the balloons float in, then pop them in a random order
    tick(&mut session, 1000);
    let mut order: Vec<u32> = (0..TARGET_COUNT as u32).collect();
    order.shuffle(&mut RngState::new(seed.wrapping_add(1)).to_rng());
    for id in order {
        handle_input(&mut session, &PointerInput::pop(id));
        tick(&mut session, 250);
        report(&mut session);
    }

    tick(&mut session, timings.pause_ms);
    tick(&mut session, typing + timings.buttons_delay_ms);
    report(&mut session);

    for _ in 0..=session.settings().max_dodges {
        handle_input(&mut session, &PointerInput::hover_decline());
        tick(&mut session, 300);
        report(&mut session);
    }
    tick(&mut session, timings.acknowledgement_ms);

    handle_input(&mut session, &PointerInput::confirm());
    tick(&mut session, timings.second_line_ms);
    report(&mut session);

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
    log::info!("Finished in act {} at {}ms", session.act(), session.now());
}

#[cfg(not(target_arch = "wasm32"))]
fn report(session: &mut heartpop::Session) {
    for event in session.drain_events() {
        log::info!("[{:>6}ms] {:?}", session.now(), event);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
