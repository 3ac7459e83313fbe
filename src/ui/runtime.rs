use crate::config::Config;
use crate::demo::Latency;
use crate::error::ErrorRegistry;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::time::Duration;
use tokio::runtime::Handle;

/// Run the TUI until the user quits. Provider calls are spawned on
/// `runtime`; this thread only draws and handles input.
pub fn run(config: &Config, runtime: Handle) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(config.defaults.tick_rate_ms);
    let events = EventHandler::new(tick_rate);
    let latency = Latency::new(config.network.base_latency_ms, config.network.delay_ms)
        .with_timeout(config.network.timeout_ms);
    let errors = ErrorRegistry::new(config.region.error_history);

    let screens = config.defaults.screen.screens();
    let mut app = App::for_screens(&screens, latency, runtime, Some(events.notifier()), errors);
    tracing::info!(screens = screens.len(), ?latency, "Mounting regions");
    app.mount_all();

    loop {
        app.poll();
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) | Ok(AppEvent::RegionReady) | Ok(AppEvent::Resize(..)) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    app.unmount_all();
    drop(guard);
    Ok(())
}
