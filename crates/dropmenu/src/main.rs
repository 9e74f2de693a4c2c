//! dropmenu - drives a menu from a JSON definition and a script on stdin.

mod script;

use std::io::{Read, Write};
use std::process::ExitCode;
use std::sync::Arc;

use dropmenu_core::logging::{init_logging, log_dir, LogConfig};
use dropmenu_core::{MenuConfig, MenuError};
use dropmenu_ui::{Menu, MenuLoop};
use parking_lot::Mutex;
use script::Command;

const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;

const USAGE: &str = "usage: dropmenu <menu.json> [viewport-width] < script";

fn main() -> ExitCode {
    let _logging_guard = init_logging(LogConfig::new(log_dir()));

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "dropmenu failed");
            eprintln!("error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), MenuError> {
    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(arg) if arg == "--help" || arg == "-h" => {
            println!("{USAGE}");
            return Ok(());
        }
        Some(path) => path,
        None => return Err(MenuError::config_with_hint("missing menu file", USAGE)),
    };
    let viewport_width = args
        .next()
        .map(|width| width.parse::<u32>())
        .transpose()
        .map_err(|e| MenuError::config_with_hint(format!("invalid viewport width: {e}"), USAGE))?
        .unwrap_or(DEFAULT_VIEWPORT_WIDTH);

    let config = MenuConfig::from_file(&path)?;
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    let commands = script::parse_script(&source)?;

    let mut menu = Menu::new(config);
    menu.render(viewport_width);
    menu.on_item_selected(|event| {
        let nested = if event.parent().is_some() { " (submenu)" } else { "" };
        println!("selected {} via {}{nested}", event.label(), event.src());
    });
    tracing::info!(path = %path, viewport_width, commands = commands.len(), "Starting dropmenu");

    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    runtime.block_on(drive(Arc::new(Mutex::new(menu)), commands, &mut std::io::stdout()))
}

/// Feed the commands to an event loop over `menu`, writing state lines to `out`.
async fn drive(
    menu: Arc<Mutex<Menu>>,
    commands: Vec<Command>,
    out: &mut impl Write,
) -> Result<(), MenuError> {
    let (event_loop, sender) = MenuLoop::new(menu.clone());
    let handle = tokio::spawn(event_loop.run());

    for command in commands {
        match command {
            Command::Wait(duration) => tokio::time::sleep(duration).await,
            Command::State => writeln!(out, "{}", script::describe(&menu.lock()))?,
            command => {
                let input = command.to_input(&menu.lock())?;
                if let Some(input) = input {
                    sender.send(input)?;
                }
            }
        }
        // Let the loop drain the input before the next command reads state.
        tokio::task::yield_now().await;
    }

    drop(sender);
    let processed = handle.await.map_err(|e| MenuError::internal(format!("event loop panicked: {e}")))?;
    tracing::info!(processed, "Script finished");
    writeln!(out, "{}", script::describe(&menu.lock()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropmenu_core::SelectionSource;
    use std::path::PathBuf;

    fn demo(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos").join(name)
    }

    fn run_script(menu: Menu, source: &str) -> (Vec<String>, Vec<(String, SelectionSource)>) {
        let commands = script::parse_script(source).unwrap();
        let menu = Arc::new(Mutex::new(menu));
        let selected = Arc::new(Mutex::new(Vec::new()));
        let sink = selected.clone();
        menu.lock().on_item_selected(move |event| {
            sink.lock().push((event.label().to_string(), event.src()));
        });

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let mut out = Vec::new();
        runtime.block_on(drive(menu, commands, &mut out)).unwrap();

        let lines = String::from_utf8(out).unwrap().lines().map(String::from).collect();
        let selected = selected.lock().clone();
        (lines, selected)
    }

    #[test]
    fn test_demo_script() {
        let mut menu = Menu::new(MenuConfig::from_file(demo("edit_menu.json")).unwrap());
        menu.render(DEFAULT_VIEWPORT_WIDTH);
        let source = std::fs::read_to_string(demo("hover.script")).unwrap();

        let (lines, selected) = run_script(menu, &source);
        assert_eq!(
            lines,
            [
                "layout=overlay open=Edit items=5",
                "layout=overlay open=none items=5",
                "layout=inline open=File items=5",
                "layout=inline open=none items=5",
            ]
        );
        assert_eq!(
            selected,
            [
                ("Cut".to_string(), SelectionSource::Submenu),
                ("File".to_string(), SelectionSource::Click),
                ("File".to_string(), SelectionSource::Click),
                ("Quit".to_string(), SelectionSource::Shortcut),
                ("New".to_string(), SelectionSource::Shortcut),
            ]
        );
    }

    #[test]
    fn test_hover_settles_before_wait_ends() {
        let mut menu = Menu::new(MenuConfig::from_file(demo("edit_menu.json")).unwrap());
        menu.render(DEFAULT_VIEWPORT_WIDTH);

        let (lines, _) = run_script(menu, "hover 0\nwait 199\nstate\nwait 1\nstate\n");
        assert_eq!(
            lines,
            [
                "layout=overlay open=none items=5",
                "layout=overlay open=File items=5",
                "layout=overlay open=File items=5",
            ]
        );
    }

    #[test]
    fn test_commands_after_destroy_fail() {
        let mut menu = Menu::new(MenuConfig::from_file(demo("edit_menu.json")).unwrap());
        menu.render(DEFAULT_VIEWPORT_WIDTH);
        let commands = script::parse_script("destroy\nhideall\n").unwrap();

        let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let result = runtime.block_on(drive(Arc::new(Mutex::new(menu)), commands, &mut Vec::new()));
        assert!(matches!(result, Err(MenuError::Destroyed)));
    }
}
