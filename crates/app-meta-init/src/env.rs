//! Environment variable accessors for the identifying values of a workload.

use crate::error::{MetaError, MetaResult};
use crate::meta::AppMeta;

pub const HOST: &str = "HOST";
pub const JOB: &str = "JOB";
pub const TASK: &str = "TASK";
pub const PLUGIN: &str = "PLUGIN";
pub const APP_ID: &str = "WAGGLE_APP_ID";

/// Read process environment; the default lookup for [`read_meta`] and [`read_app_id`].
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Build the base metadata from `HOST`, `JOB`, `TASK` and `PLUGIN`.
///
/// Variables are checked in that order; the first one that is unset or empty
/// is reported.
pub fn read_meta<F>(lookup: F) -> MetaResult<AppMeta>
where
    F: Fn(&str) -> Option<String>,
{
    let require = |name: &'static str| {
        nonempty(lookup(name)).ok_or(MetaError::MissingEnv(name))
    };

    Ok(AppMeta {
        host: require(HOST)?,
        job: require(JOB)?,
        task: require(TASK)?,
        plugin: require(PLUGIN)?,
        zone: None,
    })
}

/// App identifier (`WAGGLE_APP_ID`); empty counts as unset.
pub fn read_app_id<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    nonempty(lookup(APP_ID))
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const FULL: &[(&str, &str)] = &[
        ("HOST", "node1"),
        ("JOB", "j1"),
        ("TASK", "t1"),
        ("PLUGIN", "p1"),
    ];

    #[test]
    fn reads_all_required_vars() {
        let meta = read_meta(env_of(FULL)).unwrap();
        assert_eq!(meta.host, "node1");
        assert_eq!(meta.job, "j1");
        assert_eq!(meta.task, "t1");
        assert_eq!(meta.plugin, "p1");
        assert!(meta.zone.is_none());
    }

    #[test]
    fn each_missing_var_is_reported() {
        for missing in [HOST, JOB, TASK, PLUGIN] {
            let pairs: Vec<_> = FULL.iter().copied().filter(|(k, _)| *k != missing).collect();
            let err = read_meta(env_of(&pairs)).unwrap_err();
            assert!(
                matches!(err, MetaError::MissingEnv(name) if name == missing),
                "expected {missing}, got {err}"
            );
        }
    }

    #[test]
    fn empty_var_counts_as_missing() {
        let pairs: Vec<_> = FULL
            .iter()
            .map(|&(k, v)| if k == TASK { (k, "") } else { (k, v) })
            .collect();
        let err = read_meta(env_of(&pairs)).unwrap_err();
        assert!(matches!(err, MetaError::MissingEnv("TASK")));
        assert_eq!(err.to_string(), "env var TASK is required and must be nonempty");
    }

    #[test]
    fn first_missing_var_wins() {
        let err = read_meta(env_of(&[("PLUGIN", "p1")])).unwrap_err();
        assert!(matches!(err, MetaError::MissingEnv("HOST")));
    }

    #[test]
    fn app_id_empty_is_none() {
        assert_eq!(read_app_id(env_of(&[("WAGGLE_APP_ID", "")])), None);
        assert_eq!(read_app_id(env_of(&[])), None);
        assert_eq!(
            read_app_id(env_of(&[("WAGGLE_APP_ID", "app42")])).as_deref(),
            Some("app42")
        );
    }
}
