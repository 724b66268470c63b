//! CLI smoke entry point.
//!
//! Runs one create/edit/delete pass through the full stack and prints
//! every list update. Pass a database path to keep the notes; the default
//! is an in-memory store.

use jotpad_core::{
    default_log_level, init_logging, Entry, EntryCommands, Jotpad, JotpadConfig, ListUpdate,
    ListView,
};
use log::info;
use std::process::ExitCode;
use std::time::Duration;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

struct ConsoleView;

impl ListView for ConsoleView {
    fn reload(&mut self, entries: &[Entry]) {
        println!("reload rows={}", entries.len());
        for (position, entry) in entries.iter().enumerate() {
            println!(
                "  [{position}] #{} {} | {}",
                entry.id.unwrap_or_default(),
                entry.title,
                entry.body
            );
        }
    }

    fn dispatch(&mut self, update: &ListUpdate) {
        match update {
            ListUpdate::Inserted { position, entries } => {
                println!("inserted at={position} count={}", entries.len());
            }
            ListUpdate::Removed { position, count } => {
                println!("removed at={position} count={count}");
            }
            ListUpdate::Moved { from, to } => println!("moved from={from} to={to}"),
            ListUpdate::Changed { position, entry } => {
                println!("changed at={position} title={}", entry.title);
            }
        }
    }
}

fn main() -> ExitCode {
    let log_dir = std::env::temp_dir().join("jotpad-logs");
    if let Err(err) = init_logging(default_log_level(), &log_dir) {
        eprintln!("logging disabled: {err}");
    }

    let config = match std::env::args_os().nth(1) {
        Some(path) => JotpadConfig::with_db_path(path),
        None => JotpadConfig::default(),
    };

    println!("jotpad_core version={}", jotpad_core::core_version());
    let mut app = match Jotpad::open(&config, ConsoleView) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };

    let controller = app.controller_mut();
    controller.settle(SETTLE_TIMEOUT);

    let mut form = controller.open_create_form();
    form.set_title("smoke").set_body("created by jotpad_cli");
    let Some(id) = form.submit(controller) else {
        eprintln!("create failed");
        return ExitCode::FAILURE;
    };
    controller.settle(SETTLE_TIMEOUT);

    let position = controller.snapshot().len() - 1;
    if let Some(mut form) = controller.open_edit_form(position) {
        form.set_body("edited by jotpad_cli");
        form.submit(controller);
        controller.settle(SETTLE_TIMEOUT);
    }

    controller.delete(Entry::with_id(id, "smoke", "edited by jotpad_cli"));
    controller.settle(SETTLE_TIMEOUT);

    app.shutdown();
    info!("event=cli_smoke module=cli status=ok id={id}");
    ExitCode::SUCCESS
}
