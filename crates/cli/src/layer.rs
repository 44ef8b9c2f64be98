//! Line layers on disk.
//!
//! - JSON: `{"features": [{"id": 1, "parts": [[[x, y], ...]], "attributes": {...}}]}`.
//! - CSV / Parquet: one row per vertex with columns `fid`, `x`, `y` and an optional
//!   `part`; rows of one feature are kept in file order. Attributes are empty.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use fillet::host::{FeatureId, LineFeature, NewLine};
use fillet::{LineGeometry, Vec2};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Attributes = Map<String, Value>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerFile {
    pub features: Vec<FeatureRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub id: u64,
    pub parts: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl FeatureRecord {
    pub fn to_feature(&self) -> LineFeature<Attributes> {
        let mut parts: Vec<Vec<Vec2<f64>>> = self
            .parts
            .iter()
            .map(|part| part.iter().map(|p| Vec2::new(p[0], p[1])).collect())
            .collect();
        let geometry = if parts.len() == 1 {
            LineGeometry::Single(parts.remove(0))
        } else {
            LineGeometry::Multi(parts)
        };
        LineFeature {
            id: FeatureId(self.id),
            geometry,
            attributes: self.attributes.clone(),
        }
    }

    pub fn from_new_line(id: u64, line: NewLine<Attributes>) -> Self {
        Self {
            id,
            parts: vec![line.geometry.points().iter().map(|p| [p.x, p.y]).collect()],
            attributes: line.attributes,
        }
    }
}

impl LayerFile {
    pub fn features(&self) -> Vec<LineFeature<Attributes>> {
        self.features.iter().map(FeatureRecord::to_feature).collect()
    }

    /// Append new lines with fresh ids (after the current maximum); returns the ids.
    pub fn append(&mut self, lines: impl IntoIterator<Item = NewLine<Attributes>>) -> Vec<u64> {
        let mut next = self.features.iter().map(|f| f.id).max().map_or(1, |m| m + 1);
        let mut ids = Vec::new();
        for line in lines {
            self.features.push(FeatureRecord::from_new_line(next, line));
            ids.push(next);
            next += 1;
        }
        ids
    }
}

/// Load a layer; the format follows the file extension.
pub fn load(path: &Path) -> Result<LayerFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
        }
        Some("csv") => {
            let df = LazyCsvReader::new(path)
                .with_infer_schema_length(Some(100))
                .finish()?
                .collect()
                .with_context(|| format!("reading {}", path.display()))?;
            from_vertex_table(&df)
        }
        Some("parquet") => {
            let df = LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
                .collect()
                .with_context(|| format!("reading {}", path.display()))?;
            from_vertex_table(&df)
        }
        _ => bail!("unsupported layer format: {}", path.display()),
    }
}

/// Write a layer as pretty JSON.
pub fn save(path: &Path, layer: &LayerFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(layer)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn from_vertex_table(df: &DataFrame) -> Result<LayerFile> {
    tracing::info!(rows = df.height(), cols = df.width(), "vertex_table_shape");
    let fid = df.column("fid")?.cast(&DataType::Int64)?;
    let x = df.column("x")?.cast(&DataType::Float64)?;
    let y = df.column("y")?.cast(&DataType::Float64)?;
    let part = match df.column("part") {
        Ok(s) => Some(s.cast(&DataType::Int64)?),
        Err(_) => None,
    };
    let fid = fid.i64()?;
    let x = x.f64()?;
    let y = y.f64()?;
    let part = part.as_ref().map(|s| s.i64()).transpose()?;

    // fid -> part -> vertices; BTreeMap keeps parts ordered, features keep first-seen order.
    let mut order: Vec<i64> = Vec::new();
    let mut grouped: BTreeMap<i64, BTreeMap<i64, Vec<[f64; 2]>>> = BTreeMap::new();
    for row in 0..df.height() {
        let (Some(f), Some(px), Some(py)) = (fid.get(row), x.get(row), y.get(row)) else {
            bail!("vertex row {row} has a missing fid, x, or y");
        };
        let p = part.and_then(|c| c.get(row)).unwrap_or(0);
        if !grouped.contains_key(&f) {
            order.push(f);
        }
        grouped.entry(f).or_default().entry(p).or_default().push([px, py]);
    }

    let mut features = Vec::with_capacity(order.len());
    for f in order {
        let Some(parts) = grouped.remove(&f) else {
            continue;
        };
        let id = u64::try_from(f).with_context(|| format!("negative feature id {f}"))?;
        features.push(FeatureRecord {
            id,
            parts: parts.into_values().collect(),
            attributes: Attributes::new(),
        });
    }
    Ok(LayerFile { features })
}
