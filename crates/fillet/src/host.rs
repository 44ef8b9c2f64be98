//! Thin adapter for editor-like hosts.
//!
//! The engine only sees polylines and a radius. This module covers the glue an
//! editor needs around it, without any rendering or storage:
//! - picking the line feature nearest a pointer position (linear scan);
//! - turning a fillet into three new features with copied attributes;
//! - the two-click tool state (select first line, preview, commit on second).
//!
//! Attributes are an opaque payload `A`; they are cloned, never inspected.

use crate::api::{fillet_with_trim_cfg, FilletEdit};
use crate::geom2::{
    distance_to_segment, FilletError, FilletResult, GeomCfg, LineGeometry, Point, Polyline,
};

/// Host-assigned feature identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub u64);

/// A line feature as stored by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct LineFeature<A> {
    pub id: FeatureId,
    pub geometry: LineGeometry,
    pub attributes: A,
}

/// A feature to be added by the host (it assigns the id).
#[derive(Clone, Debug, PartialEq)]
pub struct NewLine<A> {
    pub geometry: Polyline,
    pub attributes: A,
}

/// Smallest distance from `p` to any segment of `line`.
pub fn distance_to_line(line: &Polyline, p: Point) -> f64 {
    line.segments()
        .map(|(a, b)| distance_to_segment(p, a, b))
        .fold(f64::INFINITY, f64::min)
}

/// Feature whose (first-part) geometry is nearest to `point`.
///
/// Features with unusable geometry and the `exclude` id are skipped. Ties keep the
/// earlier feature.
pub fn nearest_line_feature<'a, A>(
    features: &'a [LineFeature<A>],
    point: Point,
    exclude: Option<FeatureId>,
    cfg: &GeomCfg,
) -> Option<&'a LineFeature<A>> {
    let mut best: Option<(&'a LineFeature<A>, f64)> = None;
    for feat in features {
        if Some(feat.id) == exclude {
            continue;
        }
        let Ok(line) = Polyline::from_geometry(&feat.geometry, cfg.eps_len) else {
            continue;
        };
        let d = distance_to_line(&line, point);
        if best.as_ref().is_none_or(|(_, bd)| d < *bd) {
            best = Some((feat, d));
        }
    }
    best.map(|(feat, _)| feat)
}

/// Fillet two features and build the three features the host adds.
///
/// Order: arc (attributes of `first`), trimmed `first`, trimmed `second`. The
/// source features are not modified.
pub fn commit_fillet<A: Clone>(
    first: &LineFeature<A>,
    second: &LineFeature<A>,
    radius: f64,
    cfg: GeomCfg,
) -> Result<[NewLine<A>; 3], FilletError> {
    let FilletEdit {
        fillet,
        trimmed1,
        trimmed2,
    } = fillet_with_trim_cfg(&first.geometry, &second.geometry, radius, cfg)?;
    let arc = Polyline::new(fillet.arc)?;
    Ok([
        NewLine {
            geometry: arc,
            attributes: first.attributes.clone(),
        },
        NewLine {
            geometry: trimmed1,
            attributes: first.attributes.clone(),
        },
        NewLine {
            geometry: trimmed2,
            attributes: second.attributes.clone(),
        },
    ])
}

/// Result of a pointer press handed to `FilletTool::press`.
#[derive(Clone, Debug, PartialEq)]
pub enum PressOutcome<A> {
    /// No usable line near the pointer.
    Missed,
    /// First line selected; waiting for the second.
    Selected(FeatureId),
    /// Fillet built; the selection is cleared.
    Committed {
        first: FeatureId,
        second: FeatureId,
        lines: [NewLine<A>; 3],
    },
    /// No fillet for this pair; the first selection is kept.
    Failed(FilletError),
}

/// Two-click fillet tool state.
#[derive(Clone, Debug)]
pub struct FilletTool {
    pub radius: f64,
    pub cfg: GeomCfg,
    selected: Option<FeatureId>,
}

impl FilletTool {
    pub fn new(radius: f64) -> Self {
        Self::with_cfg(radius, GeomCfg::default())
    }

    pub fn with_cfg(radius: f64, cfg: GeomCfg) -> Self {
        Self {
            radius,
            cfg,
            selected: None,
        }
    }

    #[inline]
    pub fn selected(&self) -> Option<FeatureId> {
        self.selected
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }

    /// Pointer press at `point` over `features`.
    pub fn press<A: Clone>(
        &mut self,
        features: &[LineFeature<A>],
        point: Point,
    ) -> PressOutcome<A> {
        let first = self
            .selected
            .and_then(|id| features.iter().find(|f| f.id == id));
        let Some(first) = first else {
            // Nothing selected yet, or the selected feature is gone.
            self.selected = None;
            return match nearest_line_feature(features, point, None, &self.cfg) {
                Some(feat) => {
                    self.selected = Some(feat.id);
                    PressOutcome::Selected(feat.id)
                }
                None => PressOutcome::Missed,
            };
        };
        let Some(second) = nearest_line_feature(features, point, Some(first.id), &self.cfg) else {
            return PressOutcome::Missed;
        };
        match commit_fillet(first, second, self.radius, self.cfg) {
            Ok(lines) => {
                tracing::info!(
                    first = first.id.0,
                    second = second.id.0,
                    radius = self.radius,
                    "fillet committed"
                );
                self.reset();
                PressOutcome::Committed {
                    first: first.id,
                    second: second.id,
                    lines,
                }
            }
            Err(err) => {
                tracing::warn!(
                    %err,
                    first = first.id.0,
                    second = second.id.0,
                    "could not create fillet"
                );
                PressOutcome::Failed(err)
            }
        }
    }

    /// Preview arc for a pointer hovering at `point`, if a fillet is possible.
    pub fn hover<A>(&self, features: &[LineFeature<A>], point: Point) -> Option<FilletResult> {
        let id = self.selected?;
        let first = features.iter().find(|f| f.id == id)?;
        let second = nearest_line_feature(features, point, Some(id), &self.cfg)?;
        fillet_with_trim_cfg(&first.geometry, &second.geometry, self.radius, self.cfg)
            .ok()
            .map(|edit| edit.fillet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn feat(id: u64, pts: &[[f64; 2]], tag: &'static str) -> LineFeature<&'static str> {
        LineFeature {
            id: FeatureId(id),
            geometry: LineGeometry::Single(pts.iter().map(|p| vector![p[0], p[1]]).collect()),
            attributes: tag,
        }
    }

    fn layer() -> Vec<LineFeature<&'static str>> {
        vec![
            feat(1, &[[0.0, 0.0], [9.0, 0.0]], "road"),
            feat(2, &[[10.0, 1.0], [10.0, 10.0]], "river"),
            feat(3, &[[0.0, 5.0], [8.0, 5.0]], "fence"),
            feat(4, &[[50.0, 50.0]], "broken"),
        ]
    }

    #[test]
    fn nearest_scans_and_skips() {
        let cfg = GeomCfg::default();
        let l = layer();
        let hit = nearest_line_feature(&l, vector![4.0, 1.0], None, &cfg).unwrap();
        assert_eq!(hit.id, FeatureId(1));
        let hit = nearest_line_feature(&l, vector![4.0, 1.0], Some(FeatureId(1)), &cfg).unwrap();
        assert_eq!(hit.id, FeatureId(3));
        // The one-point feature is never picked, even right on top of it.
        let hit = nearest_line_feature(&l, vector![50.0, 50.0], None, &cfg).unwrap();
        assert_ne!(hit.id, FeatureId(4));
        let empty: Vec<LineFeature<()>> = Vec::new();
        assert!(nearest_line_feature(&empty, vector![0.0, 0.0], None, &cfg).is_none());
    }

    #[test]
    fn nearest_borrows_only_from_features() {
        let l = layer();
        let hit = {
            let cfg = GeomCfg::default();
            nearest_line_feature(&l, vector![10.5, 4.0], None, &cfg)
        };
        assert_eq!(hit.map(|f| f.attributes), Some("river"));
    }

    #[test]
    fn distance_to_line_uses_segments() {
        let line =
            Polyline::new(vec![vector![0.0, 0.0], vector![4.0, 0.0], vector![4.0, 4.0]]).unwrap();
        assert!((distance_to_line(&line, vector![2.0, 3.0]) - 2.0).abs() < 1e-12);
        assert!((distance_to_line(&line, vector![6.0, 6.0]) - 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn commit_copies_attributes() {
        let l = layer();
        let [arc, t1, t2] = commit_fillet(&l[0], &l[1], 2.0, GeomCfg::default()).unwrap();
        assert_eq!(arc.attributes, "road");
        assert_eq!(t1.attributes, "road");
        assert_eq!(t2.attributes, "river");
        assert_eq!(arc.geometry.len(), 21);
        assert!((t1.geometry.last() - vector![8.0, 0.0]).norm() < 1e-9);
        assert!((t2.geometry.first() - vector![10.0, 2.0]).norm() < 1e-9);
    }

    #[test]
    fn tool_two_clicks_commit_and_reset() {
        let l = layer();
        let mut tool = FilletTool::new(2.0);
        assert!(tool.hover(&l, vector![10.0, 5.0]).is_none());
        assert_eq!(tool.press(&l, vector![4.0, 0.5]), PressOutcome::Selected(FeatureId(1)));
        let preview = tool.hover(&l, vector![10.2, 5.0]).expect("preview");
        assert!((preview.center - vector![8.0, 2.0]).norm() < 1e-9);
        match tool.press(&l, vector![10.2, 5.0]) {
            PressOutcome::Committed { first, second, lines } => {
                assert_eq!(first, FeatureId(1));
                assert_eq!(second, FeatureId(2));
                assert_eq!(lines[2].attributes, "river");
            }
            other => panic!("expected commit, got {other:?}"),
        }
        assert_eq!(tool.selected(), None);
    }

    #[test]
    fn tool_keeps_selection_on_failure() {
        let l = layer();
        let mut tool = FilletTool::new(1.0);
        tool.press(&l, vector![4.0, 0.2]);
        // Fence is parallel to the road.
        assert_eq!(
            tool.press(&l, vector![4.0, 4.9]),
            PressOutcome::Failed(FilletError::NoIntersection)
        );
        assert_eq!(tool.selected(), Some(FeatureId(1)));
        assert!(tool.hover(&l, vector![4.0, 4.9]).is_none());
        tool.reset();
        assert_eq!(tool.selected(), None);
    }

    #[test]
    fn tool_misses_on_empty_layer() {
        let empty: Vec<LineFeature<()>> = Vec::new();
        let mut tool = FilletTool::new(1.0);
        assert_eq!(tool.press(&empty, vector![0.0, 0.0]), PressOutcome::Missed);
    }
}
