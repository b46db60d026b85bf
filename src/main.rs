//! audiotray CLI

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::unbounded;
use tracing_subscriber::EnvFilter;

use audiotray::audio::{AudioCommand, ReplayScript};
use audiotray::config::{Args, Command, Settings};
use audiotray::menu::{
    Category, ControllerEvent, HeadlessShell, MenuController, MenuEntry, MenuRegistry,
};

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default()?,
    };

    // Initialize logging
    init_logging(&args, &settings)?;

    // Execute command
    match args.command {
        Command::Replay { ref script, calls } => cmd_replay(script, calls, &settings),
        Command::SampleConfig => {
            print!("{}", Settings::sample_config());
            Ok(())
        }
    }
}

fn init_logging(args: &Args, settings: &Settings) -> Result<()> {
    let level = args.log_level(&settings.log_level);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let log_file = args
        .log
        .clone()
        .or_else(|| (!settings.log_file.is_empty()).then(|| settings.log_file.clone()));

    if let Some(log_file) = log_file {
        let file = std::fs::File::create(log_file)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

/// Replay a recorded session against a headless shell
fn cmd_replay(script: &std::path::Path, show_calls: bool, settings: &Settings) -> Result<()> {
    let script = ReplayScript::load(script)?;

    let (event_tx, event_rx) = unbounded();
    for event in script.into_events() {
        event_tx.send(event)?;
    }
    event_tx.send(ControllerEvent::Shutdown)?;

    let registry = MenuRegistry::new(HeadlessShell::new());
    let mut controller = MenuController::new(registry, settings.device_filter());
    let mut commands: Vec<AudioCommand> = Vec::new();
    controller.run(&event_rx, &mut commands);

    let registry = controller.registry();
    print_menus(registry);

    println!("Commands issued:");
    if commands.is_empty() {
        println!("  (none)");
    }
    for command in &commands {
        println!("  {}", command);
    }

    if show_calls {
        println!("\nShell calls:");
        for call in registry.shell().calls() {
            println!("  {:?}", call);
        }
    }

    Ok(())
}

fn print_menus(registry: &MenuRegistry<HeadlessShell>) {
    for category in Category::ALL {
        let collection = registry.collection(category);
        let active = collection.selection().and_then(|group| group.active());

        println!("{}:", category.section_label());
        if collection.is_empty() {
            println!("  (empty)");
        }
        for entry in collection.iter() {
            print_entry(entry, active, 1);
            if let Some(submenu) = entry.submenu() {
                let routed = submenu.selection().and_then(|group| group.active());
                for mirror in submenu.iter() {
                    print_entry(mirror, routed, 2);
                }
            }
        }
        println!();
    }
}

fn print_entry(entry: &MenuEntry<u64>, active: Option<u32>, depth: usize) {
    let marker = if active == Some(entry.index()) { "*" } else { " " };
    println!(
        "{}{} {:>3}  {} ({})",
        "  ".repeat(depth),
        marker,
        entry.index(),
        entry.description(),
        entry.name()
    );
}
