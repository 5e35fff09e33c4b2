use chrono::Utc;
use clap::Subcommand;
use waterlog_core::clock::{Clock, SystemClock};
use waterlog_core::counter::DailyCounter;
use waterlog_core::storage::Database;
use waterlog_core::Event;

#[derive(Subcommand)]
pub enum DrinkAction {
    /// Record one drink for today
    Add,
    /// Print today's drink count
    Today,
}

pub fn run(action: DrinkAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let counter = DailyCounter::new(&db);
    let day = SystemClock.day_key();

    match action {
        DrinkAction::Add => {
            let count = counter.increment(&day)?;
            let event = Event::DrinkRecorded {
                day,
                count,
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        DrinkAction::Today => {
            println!("{}", counter.load(&day));
        }
    }
    Ok(())
}
