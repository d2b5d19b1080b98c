//! Job queue (C3): a priority work list of lines to re-solve.
//!
//! Lower slack lines are re-solved sooner, since they're the ones most likely to have become
//! newly constrained. Ties break in FIFO order via a monotonic sequence counter, so the queue
//! doesn't thrash between two equally-slack lines.

use std::collections::BinaryHeap;

use crate::topology::{Direction, Topology};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Job {
    dir: Direction,
    line: usize,
    // Lower slack = higher priority; we negate so `BinaryHeap` (a max-heap) pops it first.
    neg_slack: i64,
    seq: u64,
}

impl Ord for Job {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.neg_slack
            .cmp(&other.neg_slack)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for Job {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

pub struct JobQueue {
    heap: BinaryHeap<Job>,
    /// Whether `(dir, line)` is currently enqueued, so `add` is idempotent.
    queued: Vec<Vec<bool>>,
    seq: u64,
}

impl JobQueue {
    pub fn new(topology: &Topology) -> JobQueue {
        let queued = (0..topology.nset())
            .map(|d| {
                let dir = dir_for(d);
                vec![false; topology.nlines(dir)]
            })
            .collect();
        JobQueue {
            heap: BinaryHeap::new(),
            queued,
            seq: 0,
        }
    }

    pub fn flush(&mut self) {
        self.heap.clear();
        for row in &mut self.queued {
            row.iter_mut().for_each(|b| *b = false);
        }
    }

    pub fn init(&mut self, topology: &Topology) {
        self.flush();
        for dir in topology.dirs() {
            for line in 0..topology.nlines(dir) {
                let slack = topology.line_len(dir, line) as i64;
                self.add_with_slack(dir, line, slack);
            }
        }
    }

    pub fn add(&mut self, puzzle: &crate::puzzle::Puzzle, dir: Direction, line: usize) {
        let slack = puzzle.slack(dir, line);
        self.add_with_slack(dir, line, slack);
    }

    fn add_with_slack(&mut self, dir: Direction, line: usize, slack: i64) {
        let d = dir_index(dir);
        if self.queued[d][line] {
            return;
        }
        self.queued[d][line] = true;
        self.seq += 1;
        self.heap.push(Job {
            dir,
            line,
            neg_slack: -slack,
            seq: self.seq,
        });
    }

    pub fn add_jobs(&mut self, puzzle: &crate::puzzle::Puzzle, cell: usize) {
        for lp in puzzle.topology.cell_lines(cell) {
            self.add(puzzle, lp.dir, lp.line);
        }
    }

    pub fn pop(&mut self) -> Option<(Direction, usize)> {
        let job = self.heap.pop()?;
        self.queued[dir_index(job.dir)][job.line] = false;
        Some((job.dir, job.line))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

fn dir_index(dir: Direction) -> usize {
    match dir {
        Direction::Row => 0,
        Direction::Col => 1,
        Direction::Diag => 2,
    }
}

fn dir_for(d: usize) -> Direction {
    match d {
        0 => Direction::Row,
        1 => Direction::Col,
        _ => Direction::Diag,
    }
}
