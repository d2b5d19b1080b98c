//! Configuration switches (C12): every knob a caller can turn, gathered in one struct so the
//! top-level search loop and CLI share a single source of truth.

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum CellRating {
    /// No heuristic: every unsolved cell scores the same.
    Simple,
    /// Weighted combination of slack and clue count on both crossing lines.
    #[default]
    AdHoc,
    /// log2 binomial-coefficient estimate of each crossing line's remaining ambiguity.
    Math,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum ColorPicker {
    #[default]
    Max,
    Min,
    Random,
    Contrast,
}

#[derive(Clone, Debug, clap::Args)]
pub struct SolveOptions {
    /// Run ordinary line-based constraint propagation. Turning this off only makes sense
    /// alongside `may_exhaust`, for testing the exhaustive fallback in isolation.
    #[arg(long, default_value_t = true)]
    pub may_line_solve: bool,

    /// Allow guessing and backtracking when propagation alone stalls.
    #[arg(long, default_value_t = true)]
    pub may_backtrack: bool,

    /// Allow the probing engine to look for forced consequences before falling back to a blind
    /// guess.
    #[arg(long, default_value_t = true)]
    pub may_probe: bool,

    /// When probing, merge consequences common to every color tried on a cell.
    #[arg(long, default_value_t = true)]
    pub merge_probe: bool,

    /// 1 = scan every cell once per probe round; 2 = also revisit neighbors of recently-touched
    /// cells first.
    #[arg(long, default_value_t = 1)]
    pub probe_level: u8,

    /// When propagation and probing both stall with no guesses on the table yet, run the
    /// exhaustive fallback before resorting to a guess. Has no effect once backtracking has
    /// started (a guess is already live in history); re-running the exhaustive pass there would
    /// just be restating work the probe/guess already covers.
    #[arg(long, default_value_t = false)]
    pub try_harder: bool,

    /// After finding a solution, verify it's the only one (by continuing the search for a
    /// second, distinct solution).
    #[arg(long, default_value_t = false)]
    pub check_unique: bool,

    /// After finding a solution, re-run every line solver against it as a sanity check.
    #[arg(long, default_value_t = true)]
    pub check_solution: bool,

    /// Master switch for the cross-line exhaustive fallback (C7): whether it's permitted to run
    /// at all. `try_harder` governs *when* it's actually invoked.
    #[arg(long, default_value_t = true)]
    pub may_exhaust: bool,

    #[arg(long, value_enum, default_value_t = CellRating::default())]
    pub cell_rating: CellRating,

    #[arg(long, value_enum, default_value_t = ColorPicker::default())]
    pub color_picker: ColorPicker,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            may_line_solve: true,
            may_backtrack: true,
            may_probe: true,
            merge_probe: true,
            probe_level: 1,
            try_harder: false,
            check_unique: false,
            check_solution: true,
            may_exhaust: true,
            cell_rating: CellRating::default(),
            color_picker: ColorPicker::default(),
        }
    }
}
