use std::fmt;
use std::process::ExitCode;
use std::time::Instant;

use app_meta_init::cache::{MetaCache, RedisCache};
use app_meta_init::collect::{collect, preflight};
use app_meta_init::config::Cli;
use app_meta_init::env;
use app_meta_init::error::MetaResult;
use app_meta_init::node::{self, KubeNodes};
use clap::Parser;
use tracing::info;
use tracing_subscriber::fmt::time::FormatTime;

struct Elapsed(Instant);

impl FormatTime for Elapsed {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let d = self.0.elapsed();
        let total_secs = d.as_secs();
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        let millis = d.subsec_millis();
        write!(w, "[{mins:02}:{secs:02}:{millis:03}]")
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_timer(Elapsed(Instant::now()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> MetaResult<()> {
    info!(
        cache_addr = %cli.cache_addr,
        skip_cache_write = cli.skip_cache_write,
        "collecting app meta"
    );

    // Fail on missing env before any cluster config is loaded.
    preflight(env::process_env, !cli.skip_cache_write)?;

    let client = node::connect(cli.kubeconfig_path().as_deref()).await?;
    let nodes = KubeNodes::new(client);

    let cache = if cli.skip_cache_write {
        None
    } else {
        Some(RedisCache::open(&cli.cache_addr)?)
    };

    collect(
        env::process_env,
        &nodes,
        cache.as_ref().map(|c| c as &dyn MetaCache),
        cli.timeout(),
    )
    .await?;

    Ok(())
}
