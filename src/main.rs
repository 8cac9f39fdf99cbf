use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use zfs_upgrade_guard::config::{DEFAULT_DNF_PATH, DEFAULT_META_BASE_URL, UpgradeConfig};
use zfs_upgrade_guard::logging::init_logging;
use zfs_upgrade_guard::upgrade::pipeline::UpgradePipeline;
use zfs_upgrade_guard::upgrade::runner::DnfRunner;
use zfs_upgrade_guard::version::fetchers::HttpMetadataFetcher;
use zfs_upgrade_guard::version::indexes::DnfPackageIndex;

#[derive(Parser)]
#[command(name = "zfs-upgrade-guard")]
#[command(
    version,
    about = "Upgrade packages with dnf without installing a kernel newer than ZFS supports",
    override_usage = "zfs-upgrade-guard [OPTIONS] [-- DNFOPTS...]"
)]
struct Cli {
    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,

    /// Proxy URL for the metadata fetch, e.g. 'socks5h://127.0.0.1:8080'.
    /// Requests made by dnf itself are not affected; use proxy= in dnf.conf for those.
    #[arg(short = 'x', long, value_name = "URL")]
    proxy: Option<String>,

    /// Print the planned dnf commands without running them
    #[arg(long)]
    dry_run: bool,

    /// Base URL of the OpenZFS release metadata
    #[arg(long, value_name = "URL", default_value = DEFAULT_META_BASE_URL)]
    meta_base_url: String,

    /// Path to the dnf executable
    #[arg(long = "dnf", value_name = "PATH", default_value = DEFAULT_DNF_PATH)]
    dnf_path: PathBuf,

    /// Additional options for dnf upgrade, e.g. `zfs-upgrade-guard -- -y`
    #[arg(last = true, value_name = "DNFOPTS")]
    dnf_opts: Vec<String>,
}

impl From<Cli> for UpgradeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            verbose: cli.verbose,
            proxy: cli.proxy,
            dry_run: cli.dry_run,
            meta_base_url: cli.meta_base_url,
            dnf_path: cli.dnf_path,
            dnf_opts: cli.dnf_opts,
        }
    }
}

async fn run(config: UpgradeConfig) -> anyhow::Result<i32> {
    let index = DnfPackageIndex::new(&config.dnf_path);
    let fetcher =
        HttpMetadataFetcher::from_config(&config).context("Failed to create HTTP client")?;
    let runner = DnfRunner::from_config(&config);

    let rc = UpgradePipeline::new(&index, &fetcher, &runner, &config)
        .run()
        .await?;
    Ok(rc)
}

fn main() -> anyhow::Result<ExitCode> {
    let config = UpgradeConfig::from(Cli::parse());
    init_logging(config.verbose);

    let rc = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(config))?;

    // Codes outside 0..=255 cannot be reported by the OS anyway
    Ok(ExitCode::from(u8::try_from(rc).unwrap_or(1)))
}
