//! Grid & cell model (how cells group into lines).
//!
//! Two shapes are supported: ordinary rectangular grids (2 line directions: row and column) and
//! triangular "triddler" grids (3 line directions). Both are expressed through the same
//! [`Topology`] so the rest of the solver never special-cases triddlers: it only ever asks "how
//! many directions does this puzzle have" and "which cells are on line (dir, i)".

use crate::error::LoadError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Row,
    Col,
    /// Only present on triddler topologies: the third line family, running parallel to the
    /// triangle's hypotenuse-ish edge (see `Topology::triddler`'s barycentric derivation).
    Diag,
}

/// One cell's address within a single direction's line table.
#[derive(Clone, Copy, Debug)]
pub struct LinePos {
    pub dir: Direction,
    pub line: usize,
    pub pos: usize,
}

pub struct Topology {
    pub ncells: usize,
    /// `directions[d]` lists, for each line index, the cell indices on that line in order.
    directions: Vec<Vec<Vec<usize>>>,
    /// For each cell, its `(dir, line, pos)` in every direction it participates in.
    cell_lines: Vec<Vec<LinePos>>,
}

impl Topology {
    pub fn nset(&self) -> usize {
        self.directions.len()
    }

    pub fn dirs(&self) -> impl Iterator<Item = Direction> + 'static {
        let nset = self.nset();
        (0..nset).map(|d| match d {
            0 => Direction::Row,
            1 => Direction::Col,
            _ => Direction::Diag,
        })
    }

    pub fn dir_index(&self, dir: Direction) -> usize {
        match dir {
            Direction::Row => 0,
            Direction::Col => 1,
            Direction::Diag => 2,
        }
    }

    pub fn nlines(&self, dir: Direction) -> usize {
        self.directions[self.dir_index(dir)].len()
    }

    pub fn line_cells(&self, dir: Direction, line: usize) -> &[usize] {
        &self.directions[self.dir_index(dir)][line]
    }

    pub fn line_len(&self, dir: Direction, line: usize) -> usize {
        self.line_cells(dir, line).len()
    }

    pub fn cell_lines(&self, cell: usize) -> &[LinePos] {
        &self.cell_lines[cell]
    }

    /// All other cells sharing a line with `cell`, across every direction.
    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.cell_lines(cell).iter().flat_map(move |lp| {
            self.line_cells(lp.dir, lp.line)
                .iter()
                .copied()
                .filter(move |&c| c != cell)
        })
    }

    /// The two grid-adjacent neighbors of `cell` along each direction (one step forward/back in
    /// each line). Used by the `AdHoc`/`Math` cell raters and by `count_neighbors`.
    pub fn adjacent(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.cell_lines(cell).iter().flat_map(move |lp| {
            let line = self.line_cells(lp.dir, lp.line);
            let mut out = Vec::with_capacity(2);
            if lp.pos > 0 {
                out.push(line[lp.pos - 1]);
            }
            if lp.pos + 1 < line.len() {
                out.push(line[lp.pos + 1]);
            }
            out.into_iter()
        })
    }

    pub fn rectangular(width: usize, height: usize) -> Topology {
        let ncells = width * height;
        let idx = |x: usize, y: usize| y * width + x;

        let mut rows = vec![Vec::with_capacity(width); height];
        for y in 0..height {
            for x in 0..width {
                rows[y].push(idx(x, y));
            }
        }
        let mut cols = vec![Vec::with_capacity(height); width];
        for x in 0..width {
            for y in 0..height {
                cols[x].push(idx(x, y));
            }
        }

        let directions = vec![rows, cols];
        let cell_lines = build_cell_lines(ncells, &directions);
        Topology {
            ncells,
            directions,
            cell_lines,
        }
    }

    /// A triangular grid of side `n`, built from `n^2` unit triangles arranged as `n` rows of
    /// `1, 3, 5, ..., 2n-1` cells (alternating "up" and "down" triangles), the standard triddler
    /// layout. Cells are addressed by barycentric-style coordinates `(a, b, c)`: "up" triangles
    /// satisfy `a+b+c = n-1`, "down" triangles satisfy `a+b+c = n-2`, and the three clue
    /// directions are the three families obtained by holding `a`, `b`, or `c` fixed.
    pub fn triddler(n: usize) -> Result<Topology, LoadError> {
        if n == 0 {
            return Err(LoadError::DegenerateTriddler(n));
        }

        // Enumerate cells row by row (row r has 2r+1 cells), assigning each an (a, b, c).
        // Row r, position i (0 <= i <= 2r): even i -> "up" triangle, odd i -> "down" triangle.
        #[derive(Clone, Copy)]
        struct Coord {
            a: i64,
            b: i64,
            c: i64,
            up: bool,
        }
        let mut coords = Vec::with_capacity(n * n);
        let mut index_of = std::collections::HashMap::new();
        for r in 0..n {
            for i in 0..=(2 * r) {
                let up = i % 2 == 0;
                let (a, b, c) = if up {
                    let k = (i / 2) as i64;
                    ((n - 1 - r) as i64, k, r as i64 - k)
                } else {
                    let k = (i / 2) as i64;
                    ((n - 1 - r) as i64, k, r as i64 - 1 - k)
                };
                let cell = coords.len();
                index_of.insert((a, b, c, up), cell);
                coords.push(Coord { a, b, c, up });
            }
        }
        let ncells = coords.len();
        debug_assert_eq!(ncells, n * n);

        // Family A: group by `a`, order by `b` ascending (ties: up before down, matching
        // construction order since up and down triangles at the same (a, b) are adjacent).
        let mut by_a: std::collections::BTreeMap<i64, Vec<usize>> = Default::default();
        let mut by_b: std::collections::BTreeMap<i64, Vec<usize>> = Default::default();
        let mut by_c: std::collections::BTreeMap<i64, Vec<usize>> = Default::default();
        for (cell, co) in coords.iter().enumerate() {
            by_a.entry(co.a).or_default().push(cell);
            by_b.entry(co.b).or_default().push(cell);
            by_c.entry(co.c).or_default().push(cell);
        }
        let sort_by = |lines: &mut std::collections::BTreeMap<i64, Vec<usize>>, key: fn(&Coord) -> i64| {
            for line in lines.values_mut() {
                line.sort_by_key(|&cell| {
                    let co = coords[cell];
                    (key(&co), !co.up as i32)
                });
            }
        };
        sort_by(&mut by_a, |co| co.b);
        sort_by(&mut by_b, |co| co.a);
        sort_by(&mut by_c, |co| co.a);

        let to_lines = |m: std::collections::BTreeMap<i64, Vec<usize>>| -> Vec<Vec<usize>> {
            m.into_values().collect()
        };
        let directions = vec![to_lines(by_a), to_lines(by_b), to_lines(by_c)];
        let cell_lines = build_cell_lines(ncells, &directions);

        Ok(Topology {
            ncells,
            directions,
            cell_lines,
        })
    }
}

fn build_cell_lines(ncells: usize, directions: &[Vec<Vec<usize>>]) -> Vec<Vec<LinePos>> {
    let mut cell_lines = vec![Vec::new(); ncells];
    for (d, lines) in directions.iter().enumerate() {
        let dir = match d {
            0 => Direction::Row,
            1 => Direction::Col,
            _ => Direction::Diag,
        };
        for (line_idx, cells) in lines.iter().enumerate() {
            for (pos, &cell) in cells.iter().enumerate() {
                cell_lines[cell].push(LinePos {
                    dir,
                    line: line_idx,
                    pos,
                });
            }
        }
    }
    cell_lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangular_has_right_shape() {
        let t = Topology::rectangular(4, 3);
        assert_eq!(t.ncells, 12);
        assert_eq!(t.nlines(Direction::Row), 3);
        assert_eq!(t.nlines(Direction::Col), 4);
        assert_eq!(t.line_len(Direction::Row, 0), 4);
        assert_eq!(t.line_len(Direction::Col, 0), 3);
    }

    #[test]
    fn triddler_cell_count_and_line_lengths() {
        for n in 1..=6 {
            let t = Topology::triddler(n).unwrap();
            assert_eq!(t.ncells, n * n, "n={n}");
            for dir in [Direction::Row, Direction::Col, Direction::Diag] {
                let total: usize = (0..t.nlines(dir)).map(|i| t.line_len(dir, i)).sum();
                assert_eq!(total, n * n, "n={n} dir={dir:?}");
                for i in 0..t.nlines(dir) {
                    assert_eq!(t.line_len(dir, i) % 2, 1, "triddler lines are always odd length");
                }
            }
        }
    }

    #[test]
    fn every_cell_belongs_to_exactly_one_line_per_direction() {
        let t = Topology::triddler(5).unwrap();
        for cell in 0..t.ncells {
            let lps = t.cell_lines(cell);
            assert_eq!(lps.len(), 3);
            let dirs: std::collections::HashSet<_> = lps.iter().map(|lp| lp.dir).collect();
            assert_eq!(dirs.len(), 3);
        }
    }
}
