//! Headless watch-face session.
//!
//! # Responsibility
//! - Drive `analogwatch_core` through one simulated lifecycle against the
//!   headless renderer and print every host interaction.
//! - Verify workspace wiring without a device or emulator.

use analogwatch_core::headless::{
    HeadlessBadges, HeadlessDisplay, HeadlessHost, HeadlessLauncher, Journal,
};
use analogwatch_core::view::defines::{EMISSION_PRESS, EMISSION_RELEASE, PART_MISSED_CALLS};
use analogwatch_core::{
    init_logging, BadgeAction, BadgeChangeEvent, LaunchOutcome, SystemEvent, WatchApp,
    WatchConfig, APP_ID_CALL, APP_ID_MESSAGES,
};
use chrono::{Duration, Local};
use std::process::ExitCode;

const SCREEN_SIZE: i32 = 360;
const ACTIVE_TICKS: i64 = 3;
/// Host badge action code for a counter update.
const BADGE_ACTION_UPDATE: u32 = 2;
const SIMULATED_RESOURCE_DIR: &str = "/opt/usr/apps/org.example.analogwatch/res";

fn main() -> ExitCode {
    let config = match WatchConfig::default().with_env_overrides() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("analogwatch: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("analogwatch: logging disabled: {err}");
        }
    }

    println!(
        "analogwatch_core version={}",
        analogwatch_core::core_version()
    );

    let journal = Journal::new();
    run_session(config, &journal);

    for (index, entry) in journal.entries().iter().enumerate() {
        println!("{index:03} {entry}");
    }
    ExitCode::SUCCESS
}

fn run_session(config: WatchConfig, journal: &Journal) {
    let host = HeadlessHost::new(journal.clone())
        .with_locale("en_US.UTF-8")
        .with_resource_dir(SIMULATED_RESOURCE_DIR);
    let launcher = HeadlessLauncher::new(journal.clone());
    let pending = launcher.pending();
    let mut app = WatchApp::new(
        config,
        host,
        HeadlessDisplay::new(journal.clone()),
        HeadlessBadges::new(journal.clone()),
        launcher,
    );

    app.on_create(SCREEN_SIZE, SCREEN_SIZE);
    app.on_resume();

    let start = Local::now();
    for second in 0..ACTIVE_TICKS {
        app.on_time_tick(&(start + Duration::seconds(second)));
    }

    app.on_badge_changed_raw(BADGE_ACTION_UPDATE, Some(APP_ID_CALL), 2);
    app.on_badge_changed(&BadgeChangeEvent::new(
        BadgeAction::Update,
        APP_ID_MESSAGES,
        5,
    ));

    app.on_signal(EMISSION_PRESS, PART_MISSED_CALLS);
    app.on_signal(EMISSION_RELEASE, PART_MISSED_CALLS);
    // The host reports launch results on a later loop iteration.
    pending.complete_next(LaunchOutcome::Succeeded);

    app.on_ambient_changed(true);
    app.on_ambient_tick(&(start + Duration::minutes(1)));
    app.on_ambient_changed(false);

    app.on_system_event(SystemEvent::LanguageChanged);
    app.on_pause();
    app.on_terminate();
}
