use anyhow::{bail, Result};
use argh::FromArgs;
use shikiri::config::Config;
use shikiri::core::{MonitorRegistry, WindowSnapshot};
use shikiri::ipc::{IpcClient, IpcServer};
use shikiri::layout::{self, LayoutMode};
use shikiri::platform::{Platform, SceneFile};
use shikiri::LayoutController;
use shikiri_ipc::{Command, Direction, Response};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Multi-monitor tiling layout daemon.
struct Args {
    /// path to a config file (JSON)
    #[argh(option)]
    config: Option<PathBuf>,

    #[argh(subcommand)]
    command: SubCommand,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Start(StartArgs),
    Layout(LayoutArgs),
    Cycle(CycleArgs),
    Reapply(ReapplyArgs),
    RefreshMonitors(RefreshMonitorsArgs),
    Status(StatusArgs),
    Quit(QuitArgs),
    Tile(TileArgs),
}

#[derive(FromArgs)]
/// Run the daemon.
#[argh(subcommand, name = "start")]
struct StartArgs {
    /// scene file (JSON) describing monitors and windows
    #[argh(option)]
    scene: PathBuf,
}

#[derive(FromArgs)]
/// Select a layout (vertical, horizontal, grid) and retile.
#[argh(subcommand, name = "layout")]
struct LayoutArgs {
    /// layout name
    #[argh(positional)]
    mode: LayoutMode,
}

#[derive(FromArgs)]
/// Switch to the next or previous layout.
#[argh(subcommand, name = "cycle")]
struct CycleArgs {
    /// next or prev (default: next)
    #[argh(positional, from_str_fn(parse_direction), default = "Direction::Next")]
    direction: Direction,
}

#[derive(FromArgs)]
/// Retile with the current layout.
#[argh(subcommand, name = "reapply")]
struct ReapplyArgs {}

#[derive(FromArgs)]
/// Re-read the monitor set and retile.
#[argh(subcommand, name = "refresh-monitors")]
struct RefreshMonitorsArgs {}

#[derive(FromArgs)]
/// Show the current layout and monitors.
#[argh(subcommand, name = "status")]
struct StatusArgs {}

#[derive(FromArgs)]
/// Stop the daemon.
#[argh(subcommand, name = "quit")]
struct QuitArgs {}

#[derive(FromArgs)]
/// Print placements for a scene file without starting the daemon.
#[argh(subcommand, name = "tile")]
struct TileArgs {
    /// scene file (JSON) describing monitors and windows
    #[argh(option)]
    scene: PathBuf,

    /// layout to use instead of the configured default
    #[argh(option)]
    layout: Option<LayoutMode>,
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    match value {
        "next" => Ok(Direction::Next),
        "prev" => Ok(Direction::Prev),
        _ => Err(format!("unknown direction '{}' (use next or prev)", value)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Args = argh::from_env();
    let config = Config::load(args.config.as_deref())?;

    match args.command {
        SubCommand::Start(start) => run_daemon(config, start),
        SubCommand::Tile(tile) => run_tile(&config, tile),
        SubCommand::Layout(cmd) => send(&config, Command::SelectLayout { mode: cmd.mode }),
        SubCommand::Cycle(cmd) => send(
            &config,
            Command::CycleLayout {
                direction: cmd.direction,
            },
        ),
        SubCommand::Reapply(_) => send(&config, Command::Reapply),
        SubCommand::RefreshMonitors(_) => send(&config, Command::RefreshMonitors),
        SubCommand::Status(_) => send(&config, Command::Status),
        SubCommand::Quit(_) => send(&config, Command::Quit),
    }
}

fn run_daemon(config: Config, args: StartArgs) -> Result<()> {
    tracing::info!("shikiri starting with scene {}", args.scene.display());

    let mut controller = LayoutController::new(SceneFile::new(args.scene), &config);
    controller.reapply();

    let server = IpcServer::new(controller, config.socket_path.clone());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.run())?;

    tracing::info!("shikiri stopped");
    Ok(())
}

fn run_tile(config: &Config, args: TileArgs) -> Result<()> {
    let mut platform = SceneFile::new(args.scene);
    let mut registry = MonitorRegistry::new(config.max_monitors);
    registry.replace(platform.enumerate_monitors()?);
    let snapshot = WindowSnapshot::capture(platform.enumerate_windows()?, config.max_windows);

    let mode = args.layout.unwrap_or(config.default_layout);
    let placements = layout::compute(mode, snapshot.windows(), registry.current());
    println!("{}", serde_json::to_string_pretty(&placements)?);
    Ok(())
}

fn send(config: &Config, cmd: Command) -> Result<()> {
    let mut client = IpcClient::connect(&config.socket_path)?;
    match client.send(&cmd)? {
        Response::Ok => {}
        Response::Applied(info) => {
            println!(
                "{}: {} placed, {} failed",
                info.layout, info.placed, info.failed
            );
            if info.monitors_truncated || info.windows_truncated {
                println!("(capacity exceeded, some monitors or windows were not tiled)");
            }
        }
        Response::Status(status) => {
            println!("layout: {}", status.layout);
            for monitor in &status.monitors {
                let b = monitor.bounds;
                println!(
                    "monitor {}: {}x{} at ({}, {})",
                    monitor.id,
                    b.width(),
                    b.height(),
                    b.left,
                    b.top
                );
            }
        }
        Response::Error { message } => bail!("{}", message),
    }
    Ok(())
}
