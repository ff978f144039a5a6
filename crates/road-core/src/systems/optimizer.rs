//! Greedy Assignment
//!
//! Walks the stores in ascending cell order and sends each one the robot
//! with the best `balance - distance`, measured from where that robot would
//! be after the assignments already made. Ties go to the first robot in
//! iteration order. Stores whose best gain is negative are skipped.

/// One store handed to one robot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Index of the robot in the position list
    pub agent: usize,
    /// Where the robot stands when it is sent
    pub from: usize,
    /// Store cell
    pub site: usize,
    pub gain: i64,
}

impl Assignment {
    pub fn meters(&self) -> i64 {
        self.site as i64 - self.from as i64
    }
}

/// Virtual robot positions while assigning
#[derive(Debug, Clone)]
pub struct GreedyAssignment {
    positions: Vec<usize>,
}

impl GreedyAssignment {
    /// `agents` are robot cells in the order they should be considered.
    pub fn new(agents: &[usize]) -> Self {
        Self {
            positions: agents.to_vec(),
        }
    }

    /// Picks the best robot for the store at `site` holding `balance`.
    /// When the gain is non-negative the robot's virtual position moves to
    /// the store.
    pub fn assign(&mut self, site: usize, balance: i64) -> Option<Assignment> {
        let mut best: Option<(usize, i64)> = None;
        for (index, &position) in self.positions.iter().enumerate() {
            let gain = balance.saturating_sub(site.abs_diff(position) as i64);
            if best.map_or(true, |(_, g)| gain > g) {
                best = Some((index, gain));
            }
        }

        let (agent, gain) = best.filter(|&(_, gain)| gain >= 0)?;
        let from = self.positions[agent];
        self.positions[agent] = site;
        Some(Assignment {
            agent,
            from,
            site,
            gain,
        })
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }
}

/// Best profit the greedy walk reaches for the given robots and
/// `(cell, balance)` stores, which must be in ascending cell order.
pub fn estimate_max_profit(agents: &[usize], sites: &[(usize, i64)]) -> i64 {
    if agents.is_empty() || sites.is_empty() {
        return 0;
    }
    let mut greedy = GreedyAssignment::new(agents);
    sites
        .iter()
        .filter(|&&(_, balance)| balance > 0)
        .filter_map(|&(site, balance)| greedy.assign(site, balance))
        .fold(0i64, |total, a| total.saturating_add(a.gain))
}
