//! Sidecar written next to an edited layer: which engine and commit produced it,
//! from which source layer, and which features were filleted into which new ones.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One fillet edit as recorded in the sidecar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilletRun {
    /// Layer the features were read from.
    pub source: String,
    pub radius: f64,
    pub segments: usize,
    pub first: u64,
    pub second: u64,
    /// Ids of the arc, trimmed first line and trimmed second line, in that order.
    pub new_ids: Vec<u64>,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    engine: &'static str,
    code_rev: String,
    callsite: String,
    output: String,
    run: &'a FilletRun,
}

/// Write `<out stem>.provenance.json` next to `out`; returns its path.
#[track_caller]
pub fn write_sidecar(out: &Path, run: &FilletRun) -> Result<PathBuf> {
    let caller = Location::caller();
    let doc = Sidecar {
        engine: fillet::VERSION,
        code_rev: code_rev(),
        callsite: format!("{}:{}", caller.file(), caller.line()),
        output: out.to_string_lossy().into_owned(),
        run,
    };
    let path = sidecar_path(out);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "provenance_written");
    Ok(path)
}

fn sidecar_path(out: &Path) -> PathBuf {
    out.with_extension("provenance.json")
}

/// Commit of the running code: `GIT_COMMIT` (runtime, then build time), else `git`.
pub fn code_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .or_else(|| option_env!("GIT_COMMIT").map(str::to_owned))
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    Some(rev.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn sidecar_replaces_layer_extension() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/edits/roads.json")),
            Path::new("/tmp/edits/roads.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("roads")),
            Path::new("roads.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_the_edit() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.json");
        fs::write(&out, "{}").unwrap();
        let run = FilletRun {
            source: "in.csv".into(),
            radius: 4.0,
            segments: 20,
            first: 3,
            second: 8,
            new_ids: vec![9, 10, 11],
        };
        let path = write_sidecar(&out, &run).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["engine"], fillet::VERSION);
        assert_eq!(parsed["output"], out.to_string_lossy().as_ref());
        assert_eq!(parsed["run"]["source"], "in.csv");
        assert_eq!(parsed["run"]["radius"], 4.0);
        assert_eq!(parsed["run"]["first"], 3);
        assert_eq!(parsed["run"]["new_ids"], serde_json::json!([9, 10, 11]));
        assert!(parsed["callsite"].as_str().unwrap().contains("provenance.rs"));
    }
}
