//! # PromptVault CLI
//!
//! Manage versioned prompts and ideas from the command line.

use anyhow::{bail, Context, Result};
use promptvault_ai::{Assistant, GeminiClient};
use promptvault_core::draft::INITIAL_CATEGORIES;
use promptvault_core::{
    merge_tags, Asset, AssetDraft, AssetFilter, AssetKind, CatalogQuery, CompareSession,
    Comparison, SortDirection, SortField, VersionLabel,
};
use promptvault_store::{
    export_to_path, AuthService, ScopeKey, SqliteStore, User, Workspace, DEFAULT_EXPORT_FILE,
};
use std::collections::{HashMap, HashSet};
use std::env;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let Some((command, rest)) = args.split_first() else {
        print_help();
        return Ok(());
    };

    if matches!(command.as_str(), "help" | "--help" | "-h") {
        print_help();
        return Ok(());
    }

    let config = CliConfig::from_env()?;
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;

    tracing::debug!(command = %command, db_path = %config.db_path.display(), "Running command");

    run(command, rest, &config, &store).await
}

async fn run(command: &str, rest: &[String], config: &CliConfig, store: &SqliteStore) -> Result<()> {
    let auth = AuthService::new(store);

    match command {
        "register" => {
            let args = Args::parse(rest, &[])?;
            let [username, password] = args.exact("register <username> <password>");
            let user = auth.register(username, password)?;
            println!("Registered and logged in as {}", user.username);
        }
        "login" => {
            let args = Args::parse(rest, &[])?;
            let [username, password] = args.exact("login <username> <password>");
            let user = auth.login(username, password)?;
            println!("Logged in as {}", user.username);
        }
        "logout" => {
            auth.logout()?;
            println!("Logged out");
        }
        "whoami" => match auth.current_user() {
            Some(user) => {
                let key = if user.api_key.is_some() { "set" } else { "not set" };
                println!("{} ({}), personal API key {key}", user.username, user.id);
            }
            None => println!("Guest (not logged in)"),
        },
        "set-api-key" => {
            let key = rest.first().map_or("", String::as_str);
            match auth.update_api_key(key)? {
                Some(user) if user.api_key.is_some() => println!("API key stored"),
                Some(_) => println!("API key cleared"),
                None => bail!("Log in to store a personal API key"),
            }
        }
        "list" => {
            let args = Args::parse(rest, &["--search", "--sort"])?;
            let mut query = CatalogQuery::default();
            if let Some(filter) = args.positional.first() {
                query.filter = filter.parse::<AssetFilter>()?;
            }
            if let Some(search) = args.option("--search") {
                query.search = search.to_string();
            }
            if let Some(field) = args.option("--sort") {
                query.sort.field = field.parse::<SortField>()?;
            }
            if args.switch("--asc") {
                query.sort.direction = SortDirection::Asc;
            } else if args.switch("--desc") {
                query.sort.direction = SortDirection::Desc;
            }

            let ws = open_workspace(store, &auth);
            let shown = ws.query(&query);
            if shown.is_empty() {
                println!("No assets");
            }
            for asset in shown {
                println!("{}", render::asset_row(asset));
            }
        }
        "show" => {
            let args = Args::parse(rest, &[])?;
            let Some(id) = args.positional.first() else {
                usage("show <id> [label]");
            };
            let ws = open_workspace(store, &auth);
            let asset = ws.require(id)?;
            let version = ws.version(id, args.positional.get(1).map(String::as_str))?;
            println!("{}", render::asset_detail(asset, version));
        }
        "history" => {
            let args = Args::parse(rest, &[])?;
            let [id] = args.exact("history <id>");
            let ws = open_workspace(store, &auth);
            print!("{}", render::history(ws.require(id)?));
        }
        "create" => {
            let args = Args::parse(rest, &["--category", "--tags"])?;
            let [kind, title, source] =
                args.exact("create <prompt|idea> <title> <content-file|-> [--category c] [--tags t]");
            let kind: AssetKind = kind.parse()?;

            let mut draft = AssetDraft::new(kind, title.as_str(), read_content(source)?);
            if let Some(category) = args.option("--category") {
                draft = draft.with_category(category);
            }
            if let Some(tags) = args.option("--tags") {
                draft = draft.with_tags(tags);
            }

            let mut ws = open_workspace(store, &auth);
            let asset = ws.create(draft)?;
            println!("Created {} at {}", asset.id, asset.current_version());
        }
        "edit" => {
            let args = Args::parse(rest, &["--title", "--category", "--tags"])?;
            let [id, source, changelog] = args.exact(
                "edit <id> <content-file|-> <changelog> [--title t] [--category c] [--tags t]",
            );

            let mut ws = open_workspace(store, &auth);
            let mut draft = AssetDraft::from_asset(ws.require(id)?);
            draft.content = read_content(source)?;
            if let Some(title) = args.option("--title") {
                draft.title = title.to_string();
            }
            if let Some(category) = args.option("--category") {
                draft = draft.with_category(category);
            }
            if let Some(tags) = args.option("--tags") {
                draft = draft.with_tags(tags);
            }

            let asset = ws.edit(id, draft, changelog)?;
            println!("Saved {} as {}", asset.id, asset.current_version());
        }
        "delete" => {
            let args = Args::parse(rest, &[])?;
            let [id] = args.exact("delete <id>");
            let mut ws = open_workspace(store, &auth);
            let removed = ws.delete(id)?;
            println!(
                "Deleted {} ({} versions)",
                removed.id,
                removed.versions().len()
            );
        }
        "compare" => {
            let args = Args::parse(rest, &[])?;
            let [id, first, second] = args.exact("compare <id> <label> <label>");
            let first: VersionLabel = first.parse()?;
            let second: VersionLabel = second.parse()?;

            let ws = open_workspace(store, &auth);
            let comparison = compare_versions(ws.require(id)?, first, second)?;
            print!("{}", render::comparison(&comparison));
        }
        "export" => {
            let path = rest.first().map_or(DEFAULT_EXPORT_FILE, String::as_str);
            let ws = open_workspace(store, &auth);
            export_to_path(ws.assets(), Path::new(path))
                .with_context(|| format!("Failed to export to {path}"))?;
            println!("Exported {} assets to {path}", ws.assets().len());
        }
        "suggest" => {
            let args = Args::parse(rest, &[])?;
            let [id] = args.exact("suggest <id>");
            let ws = open_workspace(store, &auth);
            let asset = ws.require(id)?;

            let ai = assistant(config, auth.current_user().as_ref())?;
            println!("{}", ai.suggest(asset.content(), asset.kind).await);
        }
        "autotag" => {
            let args = Args::parse(rest, &[])?;
            let [id] = args.exact("autotag <id> [--apply]");
            let mut ws = open_workspace(store, &auth);
            let asset = ws.require(id)?;

            let ai = assistant(config, auth.current_user().as_ref())?;
            let Some(suggestion) = ai.auto_categorize(asset.content(), INITIAL_CATEGORIES).await
            else {
                bail!("Auto-categorization unavailable. Please check your API configuration.");
            };

            let mut draft = AssetDraft::from_asset(asset);
            if !suggestion.category.trim().is_empty() {
                draft.category = suggestion.category;
            }
            draft.tags = merge_tags(&draft.tags, &suggestion.tags);
            println!("Category: {}", draft.category);
            println!("Tags:     {}", draft.tags.join(" "));

            if args.switch("--apply") {
                let asset = ws.edit(id, draft, "Auto-categorized")?;
                println!("Saved {} as {}", asset.id, asset.current_version());
            }
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn open_workspace<'s>(
    store: &'s SqliteStore,
    auth: &AuthService<&SqliteStore>,
) -> Workspace<&'s SqliteStore> {
    let scope = auth
        .current_user()
        .as_ref()
        .map_or(ScopeKey::Guest, User::scope);
    Workspace::open(store, scope)
}

/// Drive a compare session: view `first`, enter compare mode, pick `second`.
fn compare_versions(
    asset: &Asset,
    first: VersionLabel,
    second: VersionLabel,
) -> Result<Comparison<'_>> {
    let mut session = CompareSession::new(asset);
    session.pick(first);
    session.enter_compare();
    session.pick(second);

    let Some(comparison) = session.comparison(asset)? else {
        bail!("Pick two different versions to compare");
    };
    Ok(comparison)
}

fn assistant(config: &CliConfig, user: Option<&User>) -> Result<Assistant> {
    let user_key = user.and_then(|u| u.api_key.as_deref());
    let client =
        GeminiClient::new(config.ai.gemini(user_key)).context("Failed to create AI client")?;
    Ok(Assistant::new(client))
}

/// Content from a file path, or stdin for `-`.
fn read_content(source: &str) -> Result<String> {
    if source == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read content from stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))
    }
}

fn usage(text: &str) -> ! {
    eprintln!("Usage: promptvault {text}");
    std::process::exit(1);
}

/// Positional arguments, `--flag value` options and bare `--switch`es.
struct Args {
    positional: Vec<String>,
    options: HashMap<String, String>,
    switches: HashSet<String>,
}

impl Args {
    fn parse(raw: &[String], value_flags: &[&str]) -> Result<Self> {
        let mut args = Self {
            positional: Vec::new(),
            options: HashMap::new(),
            switches: HashSet::new(),
        };

        let mut iter = raw.iter();
        while let Some(arg) = iter.next() {
            if value_flags.contains(&arg.as_str()) {
                let Some(value) = iter.next() else {
                    bail!("{arg} requires a value");
                };
                args.options.insert(arg.clone(), value.clone());
            } else if arg.starts_with("--") {
                args.switches.insert(arg.clone());
            } else {
                args.positional.push(arg.clone());
            }
        }

        Ok(args)
    }

    /// Exactly `N` positional arguments, or exit with `usage_text`.
    fn exact<const N: usize>(&self, usage_text: &str) -> [&String; N] {
        let refs: Vec<&String> = self.positional.iter().collect();
        <[&String; N]>::try_from(refs).unwrap_or_else(|_| usage(usage_text))
    }

    fn option(&self, flag: &str) -> Option<&str> {
        self.options.get(flag).map(String::as_str)
    }

    fn switch(&self, flag: &str) -> bool {
        self.switches.contains(flag)
    }
}

fn print_help() {
    println!(
        r#"PromptVault CLI

USAGE:
    promptvault <COMMAND> [OPTIONS]

ACCOUNT:
    register <username> <password>   Create an account and log in
    login <username> <password>      Log in
    logout                           Log out (back to guest mode)
    whoami                           Show the logged-in user
    set-api-key [key]                Store (or clear) your Gemini API key

ASSETS:
    list [all|prompts|ideas] [--search q] [--sort updatedAt|createdAt|title] [--asc|--desc]
    show <id> [label]                Show an asset at its current or given version
    history <id>                     List versions, newest first
    create <prompt|idea> <title> <content-file|-> [--category c] [--tags t]
    edit <id> <content-file|-> <changelog> [--title t] [--category c] [--tags t]
    delete <id>                      Delete an asset and its history
    compare <id> <label> <label>     Word-level diff between two versions
    export [path]                    Write all assets as JSON

AI:
    suggest <id>                     Prompt direction for ideas, critique for prompts
    autotag <id> [--apply]           Suggest category and tags; --apply saves a version

ENVIRONMENT:
    PROMPTVAULT_DB_PATH              Database path (default ./promptvault.db)
    PROMPTVAULT_GEMINI_ENDPOINT      Gemini API root
    PROMPTVAULT_GEMINI_MODEL         Model (default gemini-2.5-flash)
    PROMPTVAULT_AI_TIMEOUT_SECS      AI request timeout (default 30)
    GEMINI_API_KEY                   API key when none is stored for the user
    RUST_LOG                         Log filter (default warn)

EXAMPLES:
    promptvault create prompt "Translator" prompt.txt --tags "translation, v1"
    promptvault edit P-001 prompt.txt "Tighten tone"
    promptvault compare P-001 v1.0 v1.1
"#
    );
}
