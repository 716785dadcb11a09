//! The init procedure: env -> node labels -> cache.

use std::time::Duration;

use tokio::time::{Instant, timeout_at};
use tracing::info;

use crate::cache::MetaCache;
use crate::env;
use crate::error::{MetaError, MetaResult};
use crate::meta::{self, AppMeta};
use crate::node::NodeLabels;

/// Result of a successful run.
#[derive(Debug)]
pub struct Collected {
    pub meta: AppMeta,
    /// Key written to, or `None` when the cache write was skipped.
    pub cache_key: Option<String>,
}

/// Validate env without touching the network.
///
/// Returns the base metadata and, when `write` is set, the cache key. The app
/// identifier is only required when the cache is written.
pub fn preflight<F>(lookup: F, write: bool) -> MetaResult<(AppMeta, Option<String>)>
where
    F: Fn(&str) -> Option<String>,
{
    let key = if write {
        let app_id = env::read_app_id(&lookup).ok_or(MetaError::MissingEnv(env::APP_ID))?;
        Some(meta::cache_key(&app_id))
    } else {
        None
    };

    let meta = env::read_meta(&lookup)?;
    Ok((meta, key))
}

/// Assemble app metadata and, if `cache` is given, publish it.
///
/// Env is validated before any external call. The node lookup and the cache
/// write share one deadline of `timeout` from the start of the lookup.
pub async fn collect<F>(
    lookup: F,
    nodes: &dyn NodeLabels,
    cache: Option<&dyn MetaCache>,
    timeout: Duration,
) -> MetaResult<Collected>
where
    F: Fn(&str) -> Option<String>,
{
    let (mut meta, key) = preflight(&lookup, cache.is_some())?;
    let target = cache.zip(key);

    let deadline = Instant::now() + timeout;

    let labels = timeout_at(deadline, nodes.labels(&meta.host))
        .await
        .map_err(|_| MetaError::NodeLookup {
            name: meta.host.clone(),
            reason: format!("timed out after {timeout:?}"),
        })??;
    meta.apply_node_labels(&labels);

    info!(
        host = %meta.host,
        labels = labels.len(),
        zone = meta.zone.as_deref().unwrap_or("-"),
        "node labels fetched"
    );
    info!(meta = ?meta, "app meta collected");

    let Some((cache, key)) = target else {
        info!("cache write skipped");
        return Ok(Collected {
            meta,
            cache_key: None,
        });
    };

    let value = meta.to_json()?;
    timeout_at(deadline, cache.set(&key, &value))
        .await
        .map_err(|_| MetaError::CacheWrite(format!("timed out after {timeout:?}")))??;

    info!(key = %key, "app meta cached");

    Ok(Collected {
        meta,
        cache_key: Some(key),
    })
}
