use tracing::debug;

/// `count` adjacent fragments, each spanning `units` fetch-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub units: u64,
    pub count: u64,
}

impl Run {
    /// One single-page fragment per unit; empty for zero units.
    pub fn uniform(units: u64) -> Vec<Run> {
        if units == 0 {
            return Vec::new();
        }
        vec![Run { units: 1, count: units }]
    }
}

/// Reduces a fragment plan to at most `max_fragments` entries.
///
/// Policy: repeated passes walk the plan from its tail and merge adjacent
/// pairs (last two, then the two before them, ...) until the excess over the
/// bound is gone. Each pass at most halves the plan, which keeps merged
/// fragments within a factor of two of each other. Order is never changed.
///
/// The layout is kept run-length encoded, so its size depends on the number
/// of passes rather than on the number of pages.
pub struct FragmentCoalescer {
    max_fragments: u64,
}

impl FragmentCoalescer {
    /// A bound of zero is treated as one.
    pub fn new(max_fragments: usize) -> Self {
        Self {
            max_fragments: (max_fragments as u64).max(1),
        }
    }

    /// Fragment layout for `pages` single-page fragments.
    pub fn layout(&self, pages: u64) -> Vec<Run> {
        let mut runs = Run::uniform(pages);
        let mut fragments = pages;
        let mut passes = 0;

        while fragments > self.max_fragments {
            let excess = fragments - self.max_fragments;
            runs = merge_pass(runs, excess);
            fragments -= excess.min(fragments / 2);
            passes += 1;
        }

        if passes > 0 {
            debug!(
                target: "es_storage::planner",
                input = pages,
                output = fragments,
                passes,
                runs = runs.len(),
                "Coalesced fragments to parallelism bound"
            );
        }
        runs
    }
}

/// Merges up to `budget` adjacent pairs, starting from the tail.
fn merge_pass(runs: Vec<Run>, mut budget: u64) -> Vec<Run> {
    // Built tail-first, reversed at the end
    let mut out: Vec<Run> = Vec::with_capacity(runs.len() + 2);
    let mut pending: Option<u64> = None;

    for Run { units, mut count } in runs.into_iter().rev() {
        if let Some(next) = pending.take() {
            if budget > 0 {
                push_run(&mut out, units + next, 1);
                budget -= 1;
                count -= 1;
            } else {
                push_run(&mut out, next, 1);
            }
        }

        let pairs = (count / 2).min(budget);
        push_run(&mut out, units * 2, pairs);
        budget -= pairs;
        count -= pairs * 2;

        if count == 1 && budget > 0 {
            pending = Some(units);
        } else {
            push_run(&mut out, units, count);
        }
    }

    if let Some(first) = pending {
        push_run(&mut out, first, 1);
    }
    out.reverse();
    out
}

fn push_run(out: &mut Vec<Run>, units: u64, count: u64) {
    if count == 0 {
        return;
    }
    match out.last_mut() {
        Some(last) if last.units == units => last.count += count,
        _ => out.push(Run { units, count }),
    }
}
