use std::path::PathBuf;

use anyhow::{Context, Result};
use hud_core::{HudConfig, StatusPayload, StatusSnapshot, StatusStore};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayCounts {
    pub applied: usize,
    pub skipped: usize,
}

/// Where to read the feed from and how strict to be, after merging the
/// command line with the `[feed]` config section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySource {
    pub input: PathBuf,
    pub skip_invalid: bool,
}

impl ReplaySource {
    /// `--input` wins over `feed.path`; skipping is on if either side asks.
    pub fn resolve(
        input: Option<PathBuf>,
        skip_invalid: bool,
        config: &HudConfig,
    ) -> Result<Self> {
        let input = input
            .or_else(|| config.feed.path.clone())
            .context("no feed given: pass --input or set feed.path in the config")?;
        Ok(Self {
            input,
            skip_invalid: skip_invalid || config.feed.skip_invalid,
        })
    }
}

/// Applies each non-blank line of a JSON-lines feed to `store`.
///
/// A line that fails to decode aborts the replay, or is logged and skipped
/// when `skip_invalid` is set. Either way the store keeps its last status.
pub fn replay_lines(
    store: &mut StatusStore,
    feed: &str,
    skip_invalid: bool,
) -> Result<ReplayCounts> {
    let mut counts = ReplayCounts::default();
    for (idx, line) in feed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match StatusPayload::from_json_str(line) {
            Ok(payload) => {
                store.update_status(&payload);
                counts.applied += 1;
            }
            Err(err) if skip_invalid => {
                warn!(target: "hud_cli", line = idx + 1, %err, "skipping invalid payload");
                counts.skipped += 1;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("line {} is not a valid payload", idx + 1));
            }
        }
    }
    Ok(counts)
}

/// Applies `payloads` in order to a fresh store.
pub fn apply_payloads(payloads: &[String]) -> Result<StatusSnapshot> {
    let mut store = StatusStore::new();
    for (idx, raw) in payloads.iter().enumerate() {
        let payload = StatusPayload::from_json_str(raw)
            .with_context(|| format!("payload #{} is invalid", idx + 1))?;
        store.update_status(&payload);
    }
    Ok(store.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hud_core::HudError;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    const MIXED_FEED: &str = "{\"health\":5}\n[1]\n{\"shield\":\"x\"}\n{}\n";

    fn recording_store() -> (StatusStore, Arc<Mutex<Vec<StatusSnapshot>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = StatusStore::new();
        let sink = Arc::clone(&seen);
        store.subscribe(move |snapshot| sink.lock().unwrap().push(*snapshot));
        (store, seen)
    }

    #[test]
    fn blank_lines_are_ignored() {
        let (mut store, seen) = recording_store();
        let feed = "\n{\"health\":1}\n   \n\n{\"thirst\":2}\n";
        let counts = replay_lines(&mut store, feed, false).unwrap();

        assert_eq!(
            counts,
            ReplayCounts {
                applied: 2,
                skipped: 0
            }
        );
        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(store.health(), 100.0);
        assert_eq!(store.thirst(), 2.0);
    }

    #[test]
    fn invalid_line_aborts_with_its_number() {
        let (mut store, seen) = recording_store();
        let err = replay_lines(&mut store, MIXED_FEED, false).unwrap_err();

        assert_eq!(err.to_string(), "line 2 is not a valid payload");
        assert!(matches!(
            err.downcast_ref::<HudError>(),
            Some(HudError::NotAnObject { kind: "array" })
        ));
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(store.health(), 5.0);
    }

    #[test]
    fn skip_invalid_keeps_going_without_touching_the_store() {
        let (mut store, seen) = recording_store();
        let feed = "{\"health\":5}\n[1]\n{\"shield\":\"x\"}\n";
        let counts = replay_lines(&mut store, feed, true).unwrap();

        assert_eq!(
            counts,
            ReplayCounts {
                applied: 1,
                skipped: 2
            }
        );
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(store.health(), 5.0);

        let counts = replay_lines(&mut store, MIXED_FEED, true).unwrap();
        assert_eq!(
            counts,
            ReplayCounts {
                applied: 2,
                skipped: 2
            }
        );
        assert_eq!(store.snapshot(), StatusSnapshot::default());
    }

    #[test]
    fn input_falls_back_to_config_feed_path() {
        let config = HudConfig::from_toml_str("[feed]\npath = \"from_config.jsonl\"").unwrap();

        let source = ReplaySource::resolve(None, false, &config).unwrap();
        assert_eq!(source.input, Path::new("from_config.jsonl"));
        assert!(!source.skip_invalid);

        let source =
            ReplaySource::resolve(Some(PathBuf::from("cli.jsonl")), false, &config).unwrap();
        assert_eq!(source.input, Path::new("cli.jsonl"));

        let err = ReplaySource::resolve(None, false, &HudConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("no feed given"));
    }

    #[test]
    fn skip_invalid_comes_from_flag_or_config() {
        let strict = HudConfig::default();
        let lenient = HudConfig::from_toml_str("[feed]\nskip_invalid = true").unwrap();
        let input = || Some(PathBuf::from("feed.jsonl"));

        assert!(!ReplaySource::resolve(input(), false, &strict).unwrap().skip_invalid);
        assert!(ReplaySource::resolve(input(), true, &strict).unwrap().skip_invalid);
        assert!(ReplaySource::resolve(input(), false, &lenient).unwrap().skip_invalid);
    }

    #[test]
    fn apply_uses_the_last_payload_only() {
        let snapshot = apply_payloads(&[
            r#"{"health": 50}"#.to_string(),
            r#"{"shield": 30}"#.to_string(),
        ])
        .unwrap();
        assert_eq!(
            snapshot,
            StatusSnapshot {
                health: 100.0,
                shield: 30.0,
                hunger: 100.0,
                thirst: 100.0,
            }
        );
    }

    #[test]
    fn apply_rejects_non_object_payload() {
        let err =
            apply_payloads(&[r#"{"health": 1}"#.to_string(), "42".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "payload #2 is invalid");
        assert!(matches!(
            err.downcast_ref::<HudError>(),
            Some(HudError::NotAnObject { kind: "number" })
        ));
    }
}
