use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Result};
use eve_sde_import::{
    cli::{Cli, Commands},
    config::ImportConfig,
    download::{CacheManager, SdeClient},
    import::{SdeImporter, SqliteSink},
    mapping::SourceFile,
    parser::version::{read_version, VersionStatus},
    ConsoleUi, Phase, Ui,
};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Check { db } => check(&db),

        Commands::Download {
            build,
            force,
            data_dir,
        } => download(build, force, data_dir).map(|_| ()),

        Commands::Install {
            db,
            build,
            path,
            force,
            chunk_size,
            data_dir,
        } => {
            let config = ImportConfig::resolve(data_dir, chunk_size)?;
            let data_path = resolve_install_path(&config, build, path);
            install(&db, &data_path, config.chunk_size, force)
        }

        Commands::Update {
            db,
            force,
            chunk_size,
            data_dir,
        } => update(&db, force, chunk_size, data_dir),

        Commands::ListFiles => {
            println!("Supported source files:\n");
            for file in SourceFile::ALL {
                println!("  {:40} -> {}", file.member_name(), file.table());
            }
            Ok(())
        }
    }
}

fn check(db: &Path) -> Result<()> {
    let client = SdeClient::new()?;
    let latest = client.fetch_latest_info()?;

    let sink = SqliteSink::open(db)?;
    let installed = sink.installed_version()?;
    let status = VersionStatus::compare(installed.as_deref(), latest.build_number);

    println!("status: {}", status);
    println!("latest build: {} ({})", latest.build_number, latest.release_date);
    println!(
        "installed: {}",
        installed.as_deref().unwrap_or("none")
    );
    if status.update_available() {
        println!("run `eve-sde-import update {}` to update", db.display());
    }
    Ok(())
}

/// Download the given build (or the latest) unless it is already cached.
/// Returns the build number and the archive path.
fn download(build: Option<u64>, force: bool, data_dir: Option<PathBuf>) -> Result<(u64, PathBuf)> {
    let config = ImportConfig::resolve(data_dir, None)?;
    let cache = CacheManager::new(config.data_path.clone())?;
    let client = SdeClient::new()?;

    let build_number = match build {
        Some(build) => build,
        None => client.fetch_latest_info()?.build_number,
    };

    let zip_path = cache.zip_path(build_number);
    if cache.is_cached(build_number) && !force {
        println!("build {} already downloaded: {}", build_number, zip_path.display());
        return Ok((build_number, zip_path));
    }

    let mut ui = ConsoleUi::new();
    ui.set_phase(Phase::Downloading);
    ui.log(format!("downloading build {}...", build_number));
    client.download_zip(build, &zip_path, &mut ui)?;
    cache.cleanup_old_builds(build_number)?;

    println!("downloaded {}", zip_path.display());
    Ok((build_number, zip_path))
}

fn resolve_install_path(
    config: &ImportConfig,
    build: Option<u64>,
    path: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = path {
        return path;
    }
    if let Some(build) = build {
        if let Ok(cache) = CacheManager::new(config.data_path.clone()) {
            return cache.zip_path(build);
        }
    }
    config.data_path.clone()
}

fn install(db: &Path, data_path: &Path, chunk_size: usize, force: bool) -> Result<()> {
    let start = Instant::now();

    let version = read_version(data_path)?;
    let sink = SqliteSink::open(db)?;

    if !force && sink.installed_version()?.as_deref() == Some(version.version.as_str()) {
        println!("{} is already installed (use --force to reinstall)", version.version);
        return Ok(());
    }

    let mut ui = ConsoleUi::new();
    let mut importer = SdeImporter::new(sink, chunk_size);
    let report = importer.run(data_path, &mut ui)?;

    let sink = importer.into_sink();
    sink.set_installed_version(&report.version.version)?;

    println!("\nInstalled {} in {:.1}s", report.version.version, start.elapsed().as_secs_f64());
    for (member, count) in &report.counts {
        println!("  {:40} {:>9} rows", member, count);
    }
    println!("  {:40} {:>9} rows", "TOTAL", report.total_rows());
    Ok(())
}

fn update(
    db: &Path,
    force: bool,
    chunk_size: Option<usize>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = ImportConfig::resolve(data_dir.clone(), chunk_size)?;
    let client = SdeClient::new()?;
    let latest = client.fetch_latest_info()?;

    let sink = SqliteSink::open(db)?;
    let installed = sink.installed_version()?;
    drop(sink);

    let status = VersionStatus::compare(installed.as_deref(), latest.build_number);
    match status {
        VersionStatus::UpToDate if !force => {
            println!("already up to date (build {})", latest.build_number);
            return Ok(());
        }
        VersionStatus::NewerThanLatest if !force => {
            bail!(
                "installed version {} is newer than the latest build {}; use --force to downgrade",
                installed.as_deref().unwrap_or("none"),
                latest.build_number
            );
        }
        _ => {}
    }

    let (_, zip_path) = download(Some(latest.build_number), false, data_dir)?;
    install(db, &zip_path, config.chunk_size, force)
}
