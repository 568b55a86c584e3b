//! camerconnect: Command-line front-end for the CamerConnect directory
//!
//! Browse the business directory from a terminal: list sectors, page through
//! businesses with search, filters and sorting, look one up, and keep local
//! favorites and a login session.
//!
//! Usage examples
//! --------------
//!
//! - Summary of the live directory
//!   $ camerconnect stats
//!
//! - Second page of Dschang restaurants, by number of reviews
//!   $ camerconnect list --sector Restauration --city Dschang --sort reviews -p 2
//!
//! - Work offline from a snapshot
//!   $ camerconnect fetch annuaire.json
//!   $ camerconnect -i annuaire.json list --search poisson --folded
//!
//! - Favorites
//!   $ camerconnect favorites toggle 12
//!   $ camerconnect favorites list
//!
//! Configuration
//! -------------
//!
//! `CAMERCONNECT_API_URL`, `CAMERCONNECT_TIMEOUT_SECS` and
//! `CAMERCONNECT_PAGE_SIZE` are read from the environment (and from a `.env`
//! file). `--api` and `--page-size` override them. Logs go to stderr and
//! honor `RUST_LOG`.
mod args;
mod render;

use crate::args::{CliArgs, Commands, FavoriteAction, ListArgs};
use anyhow::{anyhow, bail, Context, Result};
use camerconnect_core::favorites::FAVORITES_KEY;
use camerconnect_core::{
    BusinessRecord, ClientConfig, Directory, Favorites, Grouping, InteractionKind, InteractionLog,
    MatchMode, Query, Session,
};
use clap::Parser;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "client")]
use camerconnect_core::{ApiClient, Registration};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = CliArgs::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &args.api {
        config = config.with_api_url(url.as_str())?;
    }
    if let Some(size) = args.page_size {
        config.page_size = size;
    }
    let state = StateDir::resolve(args.state_dir.clone())?;
    debug!(api = %config.api_url, state = %state.root.display(), "configuration resolved");

    let input = args.input.as_deref();

    match args.command {
        Commands::Stats => {
            let dir = load_directory(input, &config)?;
            print!("{}", render::stats(&dir.stats()));
        }

        Commands::Sectors { search } => {
            let dir = load_directory(input, &config)?;
            let sectors = dir.search_sectors(search.as_deref().unwrap_or(""));
            if sectors.is_empty() {
                println!("Aucun secteur trouvé.");
            }
            for s in sectors {
                println!("{} ({})", s.name, s.len());
            }
        }

        Commands::List(list) => run_list(input, &config, &list)?,

        Commands::Show { id } => {
            let record = find_business(input, &config, &id)?
                .ok_or_else(|| anyhow!("Entreprise introuvable: {id}"))?;
            print!("{}", render::record_details(&record));
            state.log_interaction(&record, InteractionKind::View)?;
        }

        Commands::Favorites { action } => {
            let path = state.favorites();
            let mut favorites = Favorites::load(&path)?;
            match action {
                FavoriteAction::List => {
                    if favorites.is_empty() {
                        println!("Aucun favori.");
                    } else {
                        let dir = load_directory(input, &config)?;
                        let found = favorites.resolve(&dir);
                        for r in &found {
                            println!("{}", render::record_line(r));
                        }
                        let missing = favorites.len() - found.len();
                        if missing > 0 {
                            println!("({missing} favori(s) ne sont plus dans l'annuaire)");
                        }
                    }
                }
                FavoriteAction::Add { id } => {
                    if favorites.add(id.as_str()) {
                        favorite_added(&state, input, &config, &id)?;
                    } else {
                        println!("{id} est déjà un favori.");
                    }
                }
                FavoriteAction::Remove { id } => {
                    if favorites.remove(&id) {
                        println!("{id} retiré des favoris.");
                    } else {
                        println!("{id} n'était pas un favori.");
                    }
                }
                FavoriteAction::Toggle { id } => {
                    if favorites.toggle(&id) {
                        favorite_added(&state, input, &config, &id)?;
                    } else {
                        println!("{id} retiré des favoris.");
                    }
                }
            }
            favorites
                .save(&path)
                .with_context(|| format!("failed to save favorites: {}", path.display()))?;
        }

        #[cfg(feature = "client")]
        Commands::Login { email, password } => {
            let client = ApiClient::new(config)?;
            let session = client.login(&email, &password)?;
            session.save(state.session())?;
            let name = session.user().map(|u| u.name.as_str()).unwrap_or(email.as_str());
            println!("Bienvenue, {name} !");
        }

        #[cfg(feature = "client")]
        Commands::Register(form) => {
            let client = ApiClient::new(config)?;
            let body = client.register(&Registration {
                nom: form.nom,
                email: form.email,
                password: form.password,
                ville: form.ville,
                age: form.age,
                genre: form.genre,
            })?;
            match body.get("message").and_then(|m| m.as_str()) {
                Some(msg) => println!("{msg}"),
                None => println!("Compte créé."),
            }
        }

        #[cfg(feature = "client")]
        Commands::Logout => {
            let mut session = Session::load(state.session())?;
            if !session.is_authenticated() {
                println!("Aucune session ouverte.");
            } else {
                ApiClient::new(config)?.logout(&mut session);
                session.save(state.session())?;
                println!("Déconnecté.");
            }
        }

        Commands::Whoami => match Session::load(state.session())?.user() {
            Some(u) => {
                println!("{} <{}>", u.name, u.email);
                if let Some(city) = &u.city {
                    println!("Ville: {city}");
                }
            }
            None => println!("Non connecté."),
        },

        Commands::History { limit } => {
            let log = InteractionLog::load(state.interactions())?;
            if log.items().is_empty() {
                println!("Aucune interaction.");
            } else {
                for i in log.recent(limit) {
                    println!("{}", render::interaction_line(i));
                }
                println!("\n{}", render::interaction_summary(&log.summary()));
            }
        }

        #[cfg(feature = "client")]
        Commands::Fetch { output } => {
            let dir = ApiClient::new(config)?.sectors_with_businesses()?;
            dir.save_json_file(&output)
                .with_context(|| format!("failed to write snapshot: {}", output.display()))?;
            println!(
                "{} entreprises dans {} secteurs enregistrées dans {}",
                dir.all_records().len(),
                dir.sectors().len(),
                output.display()
            );
        }

        #[cfg(feature = "client")]
        Commands::Popular => {
            let body = ApiClient::new(config)?.popular_sectors()?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        #[cfg(feature = "client")]
        Commands::ApiStats { name } => {
            let body = ApiClient::new(config)?.stats(&name)?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_list(input: Option<&Path>, config: &ClientConfig, list: &ListArgs) -> Result<()> {
    let query = Query::new()
        .search(list.search.as_str())
        .sort_by(list.sort)
        .premium_only(list.premium)
        .page(list.page)
        .page_size(config.page_size)
        .match_mode(if list.folded { MatchMode::Folded } else { MatchMode::Exact });
    let query = match &list.city {
        Some(c) => query.city(c.as_str()),
        None => query,
    };
    let query = match &list.district {
        Some(d) => query.district(d.as_str()),
        None => query,
    };
    let grouping = if list.flat { Grouping::Flat } else { Grouping::Tiered };

    let dir = fetch_directory(input, config)
        .map_err(|e| anyhow!("Impossible de charger l'annuaire: {e}"))?;

    let Some(outcome) = dir.listing(list.sector.as_deref(), &query, grouping) else {
        bail!(
            "Secteur introuvable: {}",
            list.sector.as_deref().unwrap_or_default()
        );
    };

    if list.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render::outcome(&outcome));
    }
    Ok(())
}

fn favorite_added(
    state: &StateDir,
    input: Option<&Path>,
    config: &ClientConfig,
    id: &str,
) -> Result<()> {
    println!("{id} ajouté aux favoris.");
    match find_business(input, config, id) {
        Ok(Some(record)) => state.log_interaction(&record, InteractionKind::Favorite),
        Ok(None) => {
            println!("(attention: {id} n'existe pas dans l'annuaire)");
            Ok(())
        }
        Err(e) => {
            debug!(error = %e, "favorite not logged");
            Ok(())
        }
    }
}

/// Directory from a snapshot file, or from the backend when no file is given.
fn fetch_directory(input: Option<&Path>, config: &ClientConfig) -> camerconnect_core::Result<Directory> {
    if let Some(path) = input {
        return Directory::load_json_file(path);
    }
    #[cfg(feature = "client")]
    {
        ApiClient::new(config.clone())?.sectors_with_businesses()
    }
    #[cfg(not(feature = "client"))]
    {
        let _ = config;
        Err(camerconnect_core::DirectoryError::Config(
            "no --input snapshot given and this build has no API client".to_owned(),
        ))
    }
}

fn load_directory(input: Option<&Path>, config: &ClientConfig) -> Result<Directory> {
    fetch_directory(input, config).context("could not load the directory")
}

fn find_business(
    input: Option<&Path>,
    config: &ClientConfig,
    id: &str,
) -> Result<Option<BusinessRecord>> {
    #[cfg(feature = "client")]
    {
        if input.is_none() {
            return Ok(ApiClient::new(config.clone())?.business(id)?);
        }
    }
    Ok(load_directory(input, config)?.find(id).cloned())
}

/// Local state: favorites, session and interaction history.
struct StateDir {
    root: PathBuf,
}

impl StateDir {
    fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let root = match explicit {
            Some(p) => p,
            None => ProjectDirs::from("cm", "camerconnect", "camerconnect")
                .ok_or_else(|| anyhow!("unable to resolve data directory"))?
                .data_local_dir()
                .to_path_buf(),
        };
        Ok(Self { root })
    }

    fn favorites(&self) -> PathBuf {
        self.root.join(format!("{FAVORITES_KEY}.json"))
    }

    fn session(&self) -> PathBuf {
        self.root.join("session.json")
    }

    fn interactions(&self) -> PathBuf {
        self.root.join("interactions.json")
    }

    fn log_interaction(&self, record: &BusinessRecord, kind: InteractionKind) -> Result<()> {
        let path = self.interactions();
        let mut log = InteractionLog::load(&path)?;
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        log.record(record, kind, today);
        log.save(&path)
            .with_context(|| format!("failed to save history: {}", path.display()))
    }
}
