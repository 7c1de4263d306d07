use anyhow::Context;
use std::time::Duration;
use toast_notifications::{
    NotificationAction, NotificationId, NotificationKind, NotifyOptions, Notifier, Position,
    SettingsEditor, Snapshot, service,
};
use toast_notifications_config::{FileStorage, MemoryStorage, SettingsStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, prelude::*};

const HELP: &str = "\
commands:
  success|error|warning|info <title> | <message>
  persist <kind> <title> | <message>
  dismiss <id>      action <id>      clear
  center            show             quit
  max <n>           duration <ms>    position <top-right|...>
  animate <on|off>  sound <on|off>   settings";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    #[cfg(feature = "systemd")]
    let journald = tracing_journald::layer().ok();
    #[cfg(not(feature = "systemd"))]
    let journald: Option<tracing_subscriber::layer::Identity> = None;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(journald)
        .init();
}

fn settings_store() -> SettingsStore {
    match FileStorage::from_env() {
        Ok(storage) => {
            tracing::info!("settings stored in {:?}", storage.dir());
            SettingsStore::new(storage)
        }
        Err(err) => {
            tracing::warn!("{err}, settings will only last for this session");
            SettingsStore::new(MemoryStorage::new())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    color_backtrace::install();
    init_logging();

    let (notify, service) = service::spawn(settings_store());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }
        if let Err(err) = run_command(&notify, line).await {
            println!("error: {err:#}");
            continue;
        }
        // Let the controller settle before drawing
        tokio::time::sleep(Duration::from_millis(10)).await;
        if let Some(snapshot) = notify.snapshot().await {
            print_snapshot(&snapshot);
        }
    }

    notify.shutdown();
    service.await.context("notification service panicked")?;
    Ok(())
}

async fn run_command(notify: &Notifier, line: &str) -> anyhow::Result<()> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "success" | "error" | "warning" | "info" => {
            let kind: NotificationKind = command.parse().map_err(anyhow::Error::msg)?;
            let id = post(notify, kind, rest, NotifyOptions::default());
            println!("posted {id}");
        }
        "persist" => {
            let (kind, rest) = rest.split_once(' ').context("usage: persist <kind> <title> | <message>")?;
            let kind: NotificationKind = kind.parse().map_err(anyhow::Error::msg)?;
            let id = post(notify, kind, rest, NotifyOptions::default().persistent());
            println!("posted {id}");
        }
        "dismiss" => notify.dismiss(&NotificationId::from(rest)),
        "action" => notify.invoke_action(&NotificationId::from(rest)),
        "clear" => notify.clear_all(),
        "center" => notify.toggle_center(),
        "show" => {}
        "max" | "duration" | "position" | "animate" | "sound" => {
            let current = notify.settings().await.context("notification service stopped")?;
            let editor = SettingsEditor::new(current);
            let editor = match command {
                "max" => editor.max_visible(rest.parse().context("max expects a number")?),
                "duration" => {
                    editor.default_duration_ms(rest.parse().context("duration expects milliseconds")?)
                }
                "position" => editor.position(parse_position(rest)?),
                "animate" => editor.animation_enabled(parse_switch(rest)?),
                _ => editor.sound_enabled(parse_switch(rest)?),
            };
            notify.update_settings(editor.commit());
        }
        "settings" => {
            let current = notify.settings().await.context("notification service stopped")?;
            println!("{}", serde_json::to_string_pretty(&current)?);
        }
        "help" => println!("{HELP}"),
        other => anyhow::bail!("unknown command {other:?}, try `help`"),
    }
    Ok(())
}

fn post(notify: &Notifier, kind: NotificationKind, text: &str, options: NotifyOptions) -> NotificationId {
    let (title, message) = text.split_once('|').unwrap_or((text, ""));
    let title = title.trim().to_string();
    let undo_title = title.clone();
    let options = options.action(NotificationAction::new("Undo", move || {
        tracing::info!("undo requested for '{undo_title}'");
    }));

    match kind {
        NotificationKind::Success => notify.success(title, message.trim(), options),
        NotificationKind::Error => notify.error(title, message.trim(), options),
        NotificationKind::Warning => notify.warning(title, message.trim(), options),
        NotificationKind::Info => notify.info(title, message.trim(), options),
    }
}

fn parse_position(value: &str) -> anyhow::Result<Position> {
    Position::ALL
        .into_iter()
        .find(|p| p.as_str() == value)
        .with_context(|| format!("unknown position {value:?}"))
}

fn parse_switch(value: &str) -> anyhow::Result<bool> {
    match value {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => anyhow::bail!("expected on/off, got {other:?}"),
    }
}

fn print_snapshot(snapshot: &Snapshot) {
    let overlay = &snapshot.overlay;
    println!("── overlay ({}) ──", overlay.position.as_str());
    for toast in &overlay.toasts {
        let action = toast
            .action_label
            .as_deref()
            .map(|label| format!(" [{label}]"))
            .unwrap_or_default();
        println!(
            "  {:<8} {}: {}{}  ({:?}, {})",
            toast.kind, toast.title, toast.message, action, toast.phase, toast.id
        );
    }

    let center = &snapshot.center;
    let badge = center.badge.as_deref().unwrap_or("-");
    println!("── center [{badge}] queued={} ──", snapshot.queue_len);
    for entry in &center.entries {
        println!("  {:>4}  {:<8} {}: {}", entry.time, entry.kind, entry.title, entry.preview);
    }
}
