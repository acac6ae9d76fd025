//! Preconfigured workspaces for the command line and for quick experiments.

use anyhow::{bail, Result};
use geo::Point;

use crate::decomposition::Decomposition;
use crate::geom::CanonicalPolygon;

/// A hard-coded workspace with its initial decomposition and robot sites.
pub struct Preset {
    pub workspace: CanonicalPolygon,
    pub cells: Vec<CanonicalPolygon>,
    pub sites: Vec<(f64, f64)>,
}

/// Look up a preconfigured workspace by id.
pub fn preset(polygon_id: usize) -> Result<Preset> {
    match polygon_id {
        // A 10x1 corridor in four equal strips; every robot parked at a
        // corner far from its strip.
        0 => Ok(Preset {
            workspace: CanonicalPolygon::new(
                vec![(0.0, 0.0), (10.0, 0.0), (10.0, 1.0), (0.0, 1.0)],
                vec![],
            ),
            cells: (0..4)
                .map(|i| {
                    let x0 = 2.5 * i as f64;
                    let x1 = x0 + 2.5;
                    CanonicalPolygon::new(
                        vec![(x0, 0.0), (x1, 0.0), (x1, 1.0), (x0, 1.0)],
                        vec![],
                    )
                })
                .collect(),
            sites: vec![(10.0, 0.0), (10.0, 1.0), (0.0, 1.0), (0.0, 0.0)],
        }),

        // The same corridor carved into four triangles meeting at (5, 0.5).
        1 => Ok(Preset {
            workspace: CanonicalPolygon::new(
                vec![(0.0, 0.0), (10.0, 0.0), (10.0, 1.0), (0.0, 1.0)],
                vec![],
            ),
            cells: vec![
                CanonicalPolygon::new(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 0.5)], vec![]),
                CanonicalPolygon::new(
                    vec![(0.0, 0.0), (10.0, 0.5), (10.0, 1.0), (5.0, 0.5)],
                    vec![],
                ),
                CanonicalPolygon::new(vec![(5.0, 0.5), (10.0, 1.0), (0.0, 1.0)], vec![]),
                CanonicalPolygon::new(vec![(0.0, 0.0), (5.0, 0.5), (0.0, 1.0)], vec![]),
            ],
            sites: vec![(0.0, 0.0), (10.0, 0.0), (10.0, 1.0), (0.0, 1.0)],
        }),

        // A square courtyard: the workspace has a central hole and each cell
        // is the trapezoid between the hole and one wall.
        2 => Ok(Preset {
            workspace: CanonicalPolygon::new(
                vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
                vec![vec![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]],
            ),
            cells: vec![
                CanonicalPolygon::new(
                    vec![(0.0, 0.0), (4.0, 0.0), (3.0, 1.0), (1.0, 1.0)],
                    vec![],
                ),
                CanonicalPolygon::new(
                    vec![(4.0, 0.0), (4.0, 4.0), (3.0, 3.0), (3.0, 1.0)],
                    vec![],
                ),
                CanonicalPolygon::new(
                    vec![(4.0, 4.0), (0.0, 4.0), (1.0, 3.0), (3.0, 3.0)],
                    vec![],
                ),
                CanonicalPolygon::new(
                    vec![(0.0, 4.0), (0.0, 0.0), (1.0, 1.0), (1.0, 3.0)],
                    vec![],
                ),
            ],
            sites: vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
        }),

        _ => bail!("no preconfigured workspace with id {polygon_id}"),
    }
}

/// Assemble a validated decomposition from a preset.
pub fn build_decomposition(preset: &Preset) -> Result<Decomposition> {
    let mut decomposition = Decomposition::new(preset.workspace.to_polygon())?;
    for cell in &preset.cells {
        decomposition.add_cell(cell.to_polygon())?;
    }
    for (cell_id, &(x, y)) in preset.sites.iter().enumerate() {
        decomposition.add_site(cell_id, Point::new(x, y))?;
    }
    decomposition.validate()?;
    Ok(decomposition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_builds_a_valid_decomposition() {
        for polygon_id in 0..3 {
            let preset = preset(polygon_id).unwrap();
            let decomposition = build_decomposition(&preset).unwrap();
            assert_eq!(decomposition.len(), preset.sites.len());
        }
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert!(preset(99).is_err());
    }
}
