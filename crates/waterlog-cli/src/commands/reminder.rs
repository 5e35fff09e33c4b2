use clap::Subcommand;
use waterlog_core::notify::{DesktopBackend, ReminderScheduler};
use waterlog_core::storage::{Config, Database};
use waterlog_core::toggle::{ReminderConfig, ToggleController, INTERVAL_PRESETS};
use waterlog_core::Event;

const REMINDER_KEY: &str = "reminder_config";

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Turn the repeating reminder on
    On,
    /// Turn the repeating reminder off
    Off,
    /// Select an interval preset (1, 30, 60 or 120 minutes)
    Interval {
        minutes: u32,
        /// Reschedule the active reminder immediately
        #[arg(long)]
        now: bool,
    },
    /// Print the persisted reminder state as JSON
    Status,
    /// Deliver reminders in the foreground until interrupted
    Run,
}

fn load_state(db: &Database, prefs: &Config) -> ReminderConfig {
    if let Ok(Some(json)) = db.kv_get(REMINDER_KEY) {
        if let Ok(state) = serde_json::from_str::<ReminderConfig>(&json) {
            return state;
        }
    }
    let mut state = ReminderConfig::default();
    if INTERVAL_PRESETS.contains(&prefs.reminder.interval_minutes) {
        state.interval_minutes = prefs.reminder.interval_minutes;
    }
    state
}

fn save_state(db: &Database, state: &ReminderConfig) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(state)?;
    db.kv_set(REMINDER_KEY, &json)?;
    Ok(())
}

/// Advisories go to stderr; everything else is an event on stdout.
fn emit(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    if let Event::Advisory { message, .. } = event {
        eprintln!("{message}");
    } else {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}

pub fn run(action: ReminderAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let prefs = Config::load_or_default();
    let scheduler = ReminderScheduler::new(DesktopBackend::new(), prefs.payload());
    let mut controller = ToggleController::new(load_state(&db, &prefs), scheduler);

    match action {
        ReminderAction::On => {
            match controller.toggle_on() {
                Some(event) => emit(&event)?,
                None => println!("reminder already on"),
            }
            if controller.enabled() {
                eprintln!("keep reminders firing with `waterlog reminder run`");
            }
        }
        ReminderAction::Off => match controller.toggle_off() {
            Some(event) => emit(&event)?,
            None => println!("reminder already off"),
        },
        ReminderAction::Interval { minutes, now } => {
            let event = controller.set_interval(minutes, now)?;
            emit(&event)?;
        }
        ReminderAction::Status => {
            println!("{}", serde_json::to_string_pretty(controller.config())?);
        }
        ReminderAction::Run => {
            // Running implies the reminder is wanted on.
            let event = controller.resume().or_else(|| controller.toggle_on());
            if let Some(event) = event {
                emit(&event)?;
            }
            if controller.enabled() {
                save_state(&db, controller.config())?;
                eprintln!(
                    "reminders every {} min; press Ctrl-C to stop",
                    controller.interval_minutes()
                );
                // The ticker thread owns delivery; keep the process alive.
                loop {
                    std::thread::sleep(std::time::Duration::from_secs(60));
                }
            }
        }
    }

    save_state(&db, controller.config())?;
    Ok(())
}
