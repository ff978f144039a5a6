//! Road Grid
//!
//! Cells `0..=length`, each holding at most one robot and one store.

use super::agent::Agent;
use super::site::Site;
use crate::error::RoadError;

/// One cell of the road
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub agent: Option<Agent>,
    pub site: Option<Site>,
}

/// The road itself
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(length: usize) -> Self {
        Self {
            cells: vec![Cell::default(); length + 1],
        }
    }

    /// Highest valid index.
    pub fn length(&self) -> usize {
        self.cells.len() - 1
    }

    /// Converts a signed position into a valid index.
    pub fn index(&self, position: i64) -> Result<usize, RoadError> {
        usize::try_from(position)
            .ok()
            .filter(|&p| p <= self.length())
            .ok_or(RoadError::InvalidIndex {
                position,
                length: self.length(),
            })
    }

    pub fn agent(&self, position: usize) -> Option<&Agent> {
        self.cells.get(position).and_then(|c| c.agent.as_ref())
    }

    pub fn agent_mut(&mut self, position: usize) -> Option<&mut Agent> {
        self.cells.get_mut(position).and_then(|c| c.agent.as_mut())
    }

    pub fn site(&self, position: usize) -> Option<&Site> {
        self.cells.get(position).and_then(|c| c.site.as_ref())
    }

    pub fn take_agent(&mut self, position: usize) -> Option<Agent> {
        self.cells.get_mut(position).and_then(|c| c.agent.take())
    }

    pub fn take_site(&mut self, position: usize) -> Option<Site> {
        self.cells.get_mut(position).and_then(|c| c.site.take())
    }

    /// Puts a robot on its `position` cell, replacing nothing.
    /// Callers check occupancy first.
    pub fn put_agent(&mut self, mut agent: Agent, position: usize) {
        agent.position = position;
        if let Some(cell) = self.cells.get_mut(position) {
            debug_assert!(cell.agent.is_none(), "cell {} already has a robot", position);
            cell.agent = Some(agent);
        }
    }

    pub fn put_site(&mut self, mut site: Site, position: usize) {
        site.position = position;
        if let Some(cell) = self.cells.get_mut(position) {
            debug_assert!(cell.site.is_none(), "cell {} already has a store", position);
            cell.site = Some(site);
        }
    }

    /// Mutable access to a robot and the store on the same cell.
    pub fn pair_mut(&mut self, position: usize) -> Option<(&mut Agent, &mut Site)> {
        let cell = self.cells.get_mut(position)?;
        match (cell.agent.as_mut(), cell.site.as_mut()) {
            (Some(agent), Some(site)) => Some((agent, site)),
            _ => None,
        }
    }

    /// Cells holding a robot, ascending.
    pub fn agent_positions(&self) -> Vec<usize> {
        self.positions(|c| c.agent.is_some())
    }

    /// `(cell, balance)` of every store with a positive balance, ascending.
    pub fn active_sites(&self) -> Vec<(usize, i64)> {
        self.sites()
            .filter(|s| s.is_active())
            .map(|s| (s.position, s.tenges))
            .collect()
    }

    /// Cells without a store.
    pub fn free_site_cells(&self) -> Vec<usize> {
        self.positions(|c| c.site.is_none())
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.cells.iter().filter_map(|c| c.agent.as_ref())
    }

    pub fn agents_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.cells.iter_mut().filter_map(|c| c.agent.as_mut())
    }

    pub fn sites(&self) -> impl Iterator<Item = &Site> {
        self.cells.iter().filter_map(|c| c.site.as_ref())
    }

    pub fn sites_mut(&mut self) -> impl Iterator<Item = &mut Site> {
        self.cells.iter_mut().filter_map(|c| c.site.as_mut())
    }

    pub fn agent_count(&self) -> usize {
        self.agents().count()
    }

    pub fn site_count(&self) -> usize {
        self.sites().count()
    }

    /// Removes every robot and store.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    fn positions(&self, predicate: impl Fn(&Cell) -> bool) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| predicate(c))
            .map(|(i, _)| i)
            .collect()
    }
}
