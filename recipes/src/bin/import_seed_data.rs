//! Import the regional recipe seed catalogue into the configured document store.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use ortho_config::OrthoConfig;
use recipes::config::{AppSettings, StoreBackend};
use recipes::domain::ports::DocumentStore;
use recipes::domain::{ImportSummary, RegionCatalogueService, regions_from_seeds};
use recipes::outbound::firestore::FirestoreHttpStore;
use recipes::outbound::memory::InMemoryDocumentStore;
use seed_data::SeedCatalogue;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `import-seed-data` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "import-seed-data",
    about = "Import regions and recipes from a seed catalogue into the document store",
    version
)]
struct CliArgs {
    /// Seed catalogue JSON. Falls back to `RECIPES_SEED_CATALOGUE_PATH`, then
    /// the bundled catalogue.
    #[arg(
        long = "catalogue",
        value_name = "path",
        long_help = "Seed catalogue JSON. Falls back to RECIPES_SEED_CATALOGUE_PATH, then to \
                     fixtures/seed-data/regions.json in the source tree the binary was built \
                     from. Installed binaries should pass this flag or set the variable."
    )]
    catalogue: Option<PathBuf>,
    /// Validate the catalogue and report counts without writing.
    #[arg(long = "dry-run")]
    dry_run: bool,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = AppSettings::load_from_iter([OsString::from("import-seed-data")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;

    let path = args
        .catalogue
        .unwrap_or_else(|| settings.seed_catalogue_path());
    let raw = read_catalogue(&path)?;
    let catalogue = SeedCatalogue::from_json(&raw).map_err(|error| {
        io::Error::other(format!("invalid catalogue '{}': {error}", path.display()))
    })?;
    info!(
        path = %path.display(),
        regions = catalogue.regions().len(),
        recipes = catalogue.recipe_count(),
        "seed catalogue loaded"
    );
    let regions = regions_from_seeds(catalogue.into_regions())
        .map_err(|error| io::Error::other(format!("convert catalogue: {error}")))?;

    if args.dry_run {
        let recipes_written: usize = regions.iter().map(|region| region.recipes.len()).sum();
        print_summary("dry-run", &ImportSummary {
            regions_written: regions.len(),
            recipes_written,
        });
        return Ok(());
    }

    let backend = settings
        .store_backend()
        .map_err(|error| io::Error::other(error.to_string()))?;
    let summary = match backend {
        StoreBackend::Memory => import(InMemoryDocumentStore::new(), &regions).await?,
        StoreBackend::Firestore => {
            let project_id = settings
                .firestore_project_id()
                .map_err(|error| io::Error::other(error.to_string()))?;
            let base_url = settings
                .firestore_base_url()
                .map_err(|error| io::Error::other(error.to_string()))?;
            let mut store =
                FirestoreHttpStore::new(base_url, project_id, settings.request_timeout())
                    .map_err(|error| io::Error::other(format!("create HTTP client: {error}")))?;
            if let Some(api_key) = settings.api_key() {
                store = store.with_api_key(api_key);
            }
            import(store, &regions).await?
        }
    };

    print_summary(backend_label(backend), &summary);
    Ok(())
}

async fn import<S>(store: S, regions: &[recipes::domain::Region]) -> io::Result<ImportSummary>
where
    S: DocumentStore,
{
    RegionCatalogueService::new(Arc::new(store))
        .import_seed_data(regions)
        .await
        .map_err(|error| io::Error::other(format!("seed import failed: {error}")))
}

fn backend_label(backend: StoreBackend) -> &'static str {
    match backend {
        StoreBackend::Memory => "memory",
        StoreBackend::Firestore => "firestore",
    }
}

fn print_summary(mode: &str, summary: &ImportSummary) {
    println!("mode={mode}");
    println!("regions_written={}", summary.regions_written);
    println!("recipes_written={}", summary.recipes_written);
}

fn read_catalogue(path: &Path) -> io::Result<String> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "catalogue path must be a file")
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        io::Error::other(format!(
            "open catalogue directory '{}': {error}",
            parent.display()
        ))
    })?;
    let mut file = directory.open(Path::new(file_name)).map_err(|error| {
        io::Error::other(format!("open catalogue '{}': {error}", path.display()))
    })?;
    let mut raw = String::new();
    file.read_to_string(&mut raw).map_err(|error| {
        io::Error::other(format!("read catalogue '{}': {error}", path.display()))
    })?;
    Ok(raw)
}
