use anyhow::{bail, Result};
use geo::{Area, Point, Polygon};
use geo_validity_check::Valid;

use crate::geom::{self, CanonicalPolygon, Overlap};

/// Relative tolerance on the cells-cover-the-workspace area check.
const AREA_TOLERANCE: f64 = 1e-6;

/// One cell of the decomposition together with the start location of the
/// robot responsible for it.
#[derive(Clone, Debug)]
struct Cell {
    polygon: Polygon<f64>,
    site: Option<Point<f64>>,
}

/// A partition of a workspace polygon into cells, one per robot.
///
/// Cell ids are contiguous from 0 and stable for the lifetime of the
/// container; sites stay bound to their ids across every mutation. After
/// construction the only mutation is [`Decomposition::replace_cells`], so the
/// cell count never changes while the optimizer runs.
#[derive(Clone, Debug)]
pub struct Decomposition {
    workspace: Polygon<f64>,
    cells: Vec<Cell>,
}

impl Decomposition {
    /// Construct an empty decomposition over a workspace polygon.
    pub fn new(workspace: Polygon<f64>) -> Result<Self> {
        if !workspace.is_valid() {
            bail!("workspace polygon is not valid");
        }
        if workspace.unsigned_area() <= geom::EPS {
            bail!("workspace polygon has no area");
        }
        Ok(Self { workspace, cells: Vec::new() })
    }

    /// Add a cell and return its assigned id.
    pub fn add_cell(&mut self, polygon: Polygon<f64>) -> Result<usize> {
        if !polygon.is_valid() {
            bail!("cell polygon is not valid");
        }
        if polygon.unsigned_area() <= geom::EPS {
            bail!("cell polygon has no area");
        }
        self.cells.push(Cell { polygon, site: None });
        Ok(self.cells.len() - 1)
    }

    /// Bind a robot start location to a cell. Sites must be pairwise distinct.
    pub fn add_site(&mut self, cell_id: usize, site: Point<f64>) -> Result<()> {
        if cell_id >= self.cells.len() {
            bail!("no cell with id {cell_id}");
        }
        if self.cells.iter().any(|cell| cell.site == Some(site)) {
            bail!("site ({}, {}) is already assigned", site.x(), site.y());
        }
        self.cells[cell_id].site = Some(site);
        Ok(())
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the decomposition has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the workspace polygon.
    #[inline]
    pub fn workspace(&self) -> &Polygon<f64> {
        &self.workspace
    }

    /// Get a reference to a cell's polygon.
    #[inline]
    pub fn polygon(&self, cell_id: usize) -> &Polygon<f64> {
        &self.cells[cell_id].polygon
    }

    /// Get the site bound to a cell. Panics if the cell was never sited.
    #[inline]
    pub fn site(&self, cell_id: usize) -> Point<f64> {
        self.cells[cell_id].site.expect("cell has no site")
    }

    /// Iterate over `(cell_id, polygon, site)` triples.
    pub fn items(&self) -> impl Iterator<Item = (usize, &Polygon<f64>, Point<f64>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(id, cell)| (id, &cell.polygon, cell.site.expect("cell has no site")))
    }

    /// Atomically swap in new polygons for two cells; their sites stay put.
    /// Fails without touching the container when either polygon is empty or
    /// invalid.
    pub fn replace_cells(
        &mut self,
        id_a: usize,
        polygon_a: Polygon<f64>,
        id_b: usize,
        polygon_b: Polygon<f64>,
    ) -> Result<()> {
        if id_a >= self.cells.len() || id_b >= self.cells.len() {
            bail!("cell id out of range");
        }
        if id_a == id_b {
            bail!("cannot replace a cell with itself");
        }
        for polygon in [&polygon_a, &polygon_b] {
            if !polygon.is_valid() {
                bail!("replacement polygon is not valid");
            }
            if polygon.unsigned_area() <= geom::EPS {
                bail!("replacement polygon has no area");
            }
        }
        self.cells[id_a].polygon = polygon_a;
        self.cells[id_b].polygon = polygon_b;
        Ok(())
    }

    /// Serialize every cell to its vertex-list form.
    pub fn canonical_view(&self) -> Vec<CanonicalPolygon> {
        self.cells.iter().map(|cell| CanonicalPolygon::from_polygon(&cell.polygon)).collect()
    }

    /// Check the container invariants: at least one cell, every cell sited,
    /// pairwise disjoint interiors, and the cells covering the workspace area.
    pub fn validate(&self) -> Result<()> {
        if self.cells.is_empty() {
            bail!("decomposition has no cells");
        }
        for (id, cell) in self.cells.iter().enumerate() {
            if cell.site.is_none() {
                bail!("cell {id} has no site");
            }
        }

        for id_a in 0..self.cells.len() {
            for id_b in id_a + 1..self.cells.len() {
                if let Overlap::Area(_) =
                    geom::classify_overlap(self.polygon(id_a), self.polygon(id_b))
                {
                    bail!("cells {id_a} and {id_b} overlap");
                }
            }
        }

        let total: f64 = self.cells.iter().map(|cell| cell.polygon.unsigned_area()).sum();
        let target = self.workspace.unsigned_area();
        if (total - target).abs() > AREA_TOLERANCE * target {
            bail!("cells cover area {total} but the workspace has area {target}");
        }

        Ok(())
    }
}
