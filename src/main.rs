use clap::Parser;
use finder::{
    build_index,
    cli::{commands, grades::GradeTracker, Cli, Commands},
    config::Settings,
    stats::ReadingSet,
    RecipeCatalog, RecipeIndex, Result,
};
use std::io::{self, Write};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Logs go to stderr so interactive output stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,finder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(path) = cli.catalog {
        settings.catalog.path = Some(path);
    }
    if cli.no_fuzzy {
        settings.search.fuzzy = false;
    }
    settings.validate()?;
    debug!("Settings: {:?}", settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Repl => {
            let mut index = load_index(&settings)?;
            commands::Repl::new(&mut index, io::stdin().lock(), &mut out)
                .with_prompt(settings.repl.prompt.clone())
                .run()?;
        }
        Commands::Search { query, by, json } => {
            let index = load_index(&settings)?;
            commands::search(&index, &query, by, json, &mut out)?;
        }
        Commands::List { json } => {
            let index = load_index(&settings)?;
            commands::list(&index, json, &mut out)?;
        }
        Commands::Water { data } => {
            let set = ReadingSet::load(data.as_deref())?;
            commands::water_report(&set, &mut out)?;
        }
        Commands::Grades => {
            GradeTracker::new(io::stdin().lock(), &mut out).run()?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load_index(settings: &Settings) -> Result<RecipeIndex> {
    let catalog = RecipeCatalog::load(settings.catalog.path.as_deref())?;
    let index = build_index(&catalog, settings.match_config());
    info!(
        "Recipe index ready: {} recipes (fuzzy matching {})",
        index.len(),
        if settings.search.fuzzy { "on" } else { "off" }
    );
    Ok(index)
}
