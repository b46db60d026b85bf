//! audiotray system tray application
//!
//! Shows the device and stream menus in the system tray. Devices and streams
//! are fed from a session script; commands issued by clicks are logged.

use anyhow::Result;
use audiotray::audio::{AudioCommand, ReplayScript};
use audiotray::config::Settings;
use audiotray::menu::{Category, ControllerEvent, MenuController, MenuRegistry};
use audiotray::tray::{default_theme_dir, IconState, MudaShell, TrayIcons};
use clap::Parser;
use crossbeam_channel::unbounded;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "audiotray-tray")]
#[command(version, about = "Audio device and stream menus in the system tray")]
struct TrayArgs {
    /// Session script with the devices and streams to show
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Path to settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = TrayArgs::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default()?,
    };

    let level = if args.debug { "debug" } else { settings.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    #[cfg(target_os = "linux")]
    gtk::init()?;

    let theme_dir = settings.icon_theme_dir().or_else(default_theme_dir);
    let icons = TrayIcons::load(theme_dir.as_deref())?;

    let mut shell = MudaShell::new()?;
    shell.attach_tray_icon(&settings.tooltip, icons.get(IconState::NoOutput))?;

    let (event_tx, event_rx) = unbounded();
    shell.forward_clicks(event_tx.clone());

    let ctrlc_tx = event_tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = ctrlc_tx.send(ControllerEvent::Shutdown);
    }) {
        warn!("Failed to install Ctrl+C handler: {}", e);
    }

    if let Some(path) = &args.script {
        for event in ReplayScript::load(path)?.into_events() {
            event_tx.send(event)?;
        }
    }

    let (mut command_tx, command_rx) = unbounded::<AudioCommand>();
    let registry = MenuRegistry::new(shell);
    let mut controller = MenuController::new(registry, settings.device_filter());
    let mut icon_state = IconState::NoOutput;

    info!("Tray application event loop started");

    loop {
        pump_platform_events();

        if !controller.pump(&event_rx, &mut command_tx) {
            break;
        }

        while let Ok(command) = command_rx.try_recv() {
            info!("Audio command: {}", command);
        }

        let state = IconState::for_sinks(controller.registry().collection(Category::Sink).len());
        if state != icon_state {
            match controller.registry().shell().set_icon(icons.get(state)) {
                Ok(()) => icon_state = state,
                Err(e) => error!("Failed to update tray icon: {}", e),
            }
        }

        // Small sleep to avoid busy-waiting
        std::thread::sleep(Duration::from_millis(10));
    }

    controller.into_registry().destroy();
    info!("Tray application stopped");
    Ok(())
}

#[cfg(target_os = "linux")]
fn pump_platform_events() {
    while gtk::events_pending() {
        gtk::main_iteration_do(false);
    }
}

#[cfg(windows)]
fn pump_platform_events() {
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE,
    };

    unsafe {
        let mut msg: MSG = std::mem::zeroed();
        while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

#[cfg(not(any(target_os = "linux", windows)))]
fn pump_platform_events() {}
