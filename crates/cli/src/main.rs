use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use fillet::host::{commit_fillet, FeatureId, FilletTool, LineFeature, NewLine, PressOutcome};
use fillet::{api, FilletResult, GeomCfg, Vec2};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod layer;
mod provenance;

use layer::Attributes;

/// Plugin default radius in map units.
const DEFAULT_RADIUS: f64 = 4.0;

const NO_FILLET: &str = "could not create fillet (lines may be parallel or too far apart)";

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Join two lines of a layer with a tangent arc and trim them")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Which two lines to fillet, and how.
#[derive(Args, Debug)]
struct Selection {
    /// Line layer (.json, .csv, or .parquet)
    #[arg(long)]
    layer: PathBuf,
    /// Id of the first line
    #[arg(long, requires = "second", conflicts_with = "pick")]
    first: Option<u64>,
    /// Id of the second line
    #[arg(long, requires = "first")]
    second: Option<u64>,
    /// Pick lines by position "x,y" (twice: first line, then second line)
    #[arg(long, value_parser = parse_point)]
    pick: Vec<Vec2<f64>>,
    /// Fillet radius in map units
    #[arg(long, default_value_t = DEFAULT_RADIUS, value_parser = parse_radius)]
    radius: f64,
    /// Arc segments (points emitted = segments + 1)
    #[arg(long, default_value_t = 20, value_parser = parse_segments)]
    segments: usize,
}

impl Selection {
    fn cfg(&self) -> GeomCfg {
        GeomCfg {
            arc_segments: self.segments,
            ..GeomCfg::default()
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Fillet two lines and write the layer with the arc and trimmed lines appended
    Fillet {
        #[command(flatten)]
        sel: Selection,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the fillet arc for two lines as JSON without editing anything
    Preview {
        #[command(flatten)]
        sel: Selection,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Fillet { sel, out } => run_fillet(&sel, &out).map(|_| ()),
        Action::Preview { sel } => {
            let fillet = preview(&sel)?;
            println!("{}", serde_json::to_string_pretty(&fillet_json(&fillet))?);
            Ok(())
        }
        Action::Report => report(),
    }
}

fn parse_radius(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(r) if r.is_finite() && r > 0.0 => Ok(r),
        _ => Err(format!("invalid radius {s:?}: expected a positive number")),
    }
}

fn parse_segments(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("invalid segment count {s:?}: expected an integer >= 1")),
    }
}

fn parse_point(s: &str) -> Result<Vec2<f64>, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("invalid point {s:?}: expected \"x,y\""))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("invalid x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("invalid y in {s:?}: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn find(features: &[LineFeature<Attributes>], id: u64) -> Result<&LineFeature<Attributes>> {
    features
        .iter()
        .find(|f| f.id == FeatureId(id))
        .with_context(|| format!("no feature with id {id}"))
}

fn picks(sel: &Selection) -> Result<(Vec2<f64>, Vec2<f64>)> {
    match sel.pick.as_slice() {
        [a, b] => Ok((*a, *b)),
        _ => bail!("select lines with --first/--second or exactly two --pick points"),
    }
}

/// Fillet the selected lines, append the results, and write `out` plus its sidecar.
fn run_fillet(sel: &Selection, out: &Path) -> Result<Vec<u64>> {
    tracing::info!(
        layer = %sel.layer.display(),
        radius = sel.radius,
        out = %out.display(),
        "fillet"
    );
    let mut layer = layer::load(&sel.layer)?;
    let features = layer.features();

    let selected: (u64, u64, [NewLine<Attributes>; 3]) = match (sel.first, sel.second) {
        (Some(a), Some(b)) => {
            let (fa, fb) = (find(&features, a)?, find(&features, b)?);
            let lines = commit_fillet(fa, fb, sel.radius, sel.cfg()).context(NO_FILLET)?;
            (a, b, lines)
        }
        _ => {
            let (p1, p2) = picks(sel)?;
            let mut tool = FilletTool::with_cfg(sel.radius, sel.cfg());
            match tool.press(&features, p1) {
                PressOutcome::Selected(_) => {}
                _ => bail!("no line near {},{}", p1.x, p1.y),
            }
            match tool.press(&features, p2) {
                PressOutcome::Committed {
                    first,
                    second,
                    lines,
                } => (first.0, second.0, lines),
                PressOutcome::Failed(err) => return Err(anyhow::Error::new(err).context(NO_FILLET)),
                _ => bail!("no second line near {},{}", p2.x, p2.y),
            }
        }
    };
    let (first, second, lines) = selected;

    let ids = layer.append(lines);
    tracing::info!(first, second, new_ids = ?ids, "fillet_appended");
    layer::save(out, &layer)?;

    let run = provenance::FilletRun {
        source: sel.layer.to_string_lossy().into_owned(),
        radius: sel.radius,
        segments: sel.segments,
        first,
        second,
        new_ids: ids,
    };
    provenance::write_sidecar(out, &run)?;
    Ok(run.new_ids)
}

fn preview(sel: &Selection) -> Result<FilletResult> {
    let layer = layer::load(&sel.layer)?;
    let features = layer.features();
    match (sel.first, sel.second) {
        (Some(a), Some(b)) => {
            let edit = api::fillet_with_trim_cfg(
                &find(&features, a)?.geometry,
                &find(&features, b)?.geometry,
                sel.radius,
                sel.cfg(),
            )
            .context(NO_FILLET)?;
            Ok(edit.fillet)
        }
        _ => {
            let (p1, p2) = picks(sel)?;
            let mut tool = FilletTool::with_cfg(sel.radius, sel.cfg());
            if !matches!(tool.press(&features, p1), PressOutcome::Selected(_)) {
                bail!("no line near {},{}", p1.x, p1.y);
            }
            tool.hover(&features, p2).context(NO_FILLET)
        }
    }
}

fn fillet_json(f: &FilletResult) -> serde_json::Value {
    let xy = |p: &Vec2<f64>| [p.x, p.y];
    serde_json::json!({
        "arc": f.arc.iter().map(xy).collect::<Vec<_>>(),
        "tp1": xy(&f.tp1),
        "tp2": xy(&f.tp2),
        "center": xy(&f.center),
        "corner": xy(&f.corner),
        "radius": f.radius,
    })
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "engine": fillet::VERSION,
        "defaults": {
            "radius": DEFAULT_RADIUS,
            "segments": GeomCfg::default().arc_segments,
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
