use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hudguard", version)]
struct Cli {
    /// Settings JSON; every field is optional.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Override the deployment from the settings (prd, stg, dev).
    #[arg(long, global = true)]
    deployment: Option<hudguard::Deployment>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the games of a catalog.
    Games(GamesArgs),
    /// Print the canvas-space boxes of a game's regions.
    Align(AlignArgs),
    /// Run one occlusion pass over a scene snapshot and print the report.
    Check(CheckArgs),
    /// Verify a companion document.
    Verify(VerifyArgs),
    /// Verify and load the documents of the configured deployment.
    Refresh,
}

#[derive(Parser, Debug)]
struct GamesArgs {
    /// Catalog JSON; defaults to the deployment's regions.json.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct AlignArgs {
    /// Catalog JSON; defaults to the deployment's regions.json.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Game name.
    #[arg(long)]
    game: String,

    /// Canvas size as WxH.
    #[arg(long, default_value = "1920x1080")]
    canvas: String,

    /// In-game HUD scale.
    #[arg(long, default_value_t = 1.0)]
    hud_scale: f64,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Catalog JSON; defaults to the deployment's regions.json.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Game name.
    #[arg(long)]
    game: String,

    /// Scene snapshot JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Canvas size as WxH.
    #[arg(long, default_value = "1920x1080")]
    canvas: String,

    /// In-game HUD scale.
    #[arg(long, default_value_t = 1.0)]
    hud_scale: f64,

    /// Also print the recorded draw calls.
    #[arg(long, default_value_t = false)]
    draws: bool,
}

#[derive(Parser, Debug)]
struct VerifyArgs {
    /// Document kind (services or regions).
    #[arg(long)]
    kind: String,

    /// Document path.
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = match &cli.settings {
        Some(path) => hudguard::Settings::from_path(path)
            .with_context(|| format!("load settings '{}'", path.display()))?,
        None => hudguard::Settings::default(),
    };
    if let Some(d) = cli.deployment {
        settings.deployment = d;
    }

    match cli.cmd {
        Command::Games(args) => cmd_games(&settings, args),
        Command::Align(args) => cmd_align(&settings, args),
        Command::Check(args) => cmd_check(&settings, args),
        Command::Verify(args) => cmd_verify(args),
        Command::Refresh => cmd_refresh(&settings),
    }
}

fn load_games(
    settings: &hudguard::Settings,
    catalog: Option<PathBuf>,
) -> anyhow::Result<Arc<hudguard::GameManager>> {
    let path =
        catalog.unwrap_or_else(|| settings.paths().document(hudguard::DocumentKind::Regions));
    let games = hudguard::GameManager::new();
    games
        .refresh_from_path(&path, settings.deployment.name_suffix().as_deref())
        .with_context(|| format!("load catalog '{}'", path.display()))?;
    Ok(Arc::new(games))
}

fn validator_for(
    settings: &hudguard::Settings,
    games: Arc<hudguard::GameManager>,
    opts: hudguard::ValidatorOpts,
    game: &str,
    hud_scale: f64,
) -> anyhow::Result<hudguard::Validator> {
    let diagnostics = Arc::new(hudguard::Diagnostics::new(settings.diagnostics_interval()));
    let mut v = hudguard::Validator::new("cli", games, diagnostics, opts);
    let sel = v.select_game(game, hud_scale);
    if sel.game != game {
        anyhow::bail!("game '{game}' is not in the catalog");
    }
    Ok(v)
}

fn cmd_games(settings: &hudguard::Settings, args: GamesArgs) -> anyhow::Result<()> {
    let games = load_games(settings, args.catalog)?;
    let catalog = games.snapshot();
    for name in catalog.names() {
        if let Some(g) = catalog.get(name) {
            println!("{}\t{}", g.name, g.name_verbose);
        }
    }
    Ok(())
}

fn cmd_align(settings: &hudguard::Settings, args: AlignArgs) -> anyhow::Result<()> {
    let info = hudguard::VideoInfo::parse_size(&args.canvas)?;
    let games = load_games(settings, args.catalog)?;
    let opts = hudguard::ValidatorOpts {
        draw_all_regions: true,
        ..settings.validator_opts()
    };
    let mut v = validator_for(settings, games, opts, &args.game, args.hud_scale)?;

    let mut sink = hudguard::RecordingSink::new();
    let report = v
        .render(Some(info), &[], &mut sink)?
        .context("game has no regions to align")?;
    println!("{}", serde_json::to_string_pretty(&report.regions)?);
    Ok(())
}

fn cmd_check(settings: &hudguard::Settings, args: CheckArgs) -> anyhow::Result<()> {
    let info = hudguard::VideoInfo::parse_size(&args.canvas)?;
    let scene = hudguard::Scene::from_path(&args.scene)
        .with_context(|| format!("load scene '{}'", args.scene.display()))?;
    let games = load_games(settings, args.catalog)?;
    let mut v = validator_for(
        settings,
        games,
        settings.validator_opts(),
        &args.game,
        args.hud_scale,
    )?;

    let mut sink = hudguard::RecordingSink::new();
    let report = v
        .render(Some(info), &scene.items, &mut sink)?
        .context("game has no regions to check")?;

    if args.draws {
        let out = serde_json::json!({ "report": report, "draws": sink.calls() });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if report.total_hits() > 0 {
        eprintln!("{} item(s) overlap the HUD", report.hit_items.len());
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let kind = hudguard::DocumentKind::from_name(&args.kind)?;
    hudguard::read_verified(kind, &args.path)
        .with_context(|| format!("verify '{}'", args.path.display()))?;
    eprintln!("ok {}", args.path.display());
    Ok(())
}

fn cmd_refresh(settings: &hudguard::Settings) -> anyhow::Result<()> {
    let games = hudguard::GameManager::new();
    let mut refresher = hudguard::ConfigRefresher::new(settings.paths());
    let outcome = refresher
        .refresh(&games)
        .with_context(|| format!("refresh '{}'", settings.paths().dir().display()))?;
    tracing::info!(?outcome, games = games.get_games().len(), "refresh done");
    for name in games.get_games() {
        println!("{name}");
    }
    Ok(())
}
