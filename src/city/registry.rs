//! Structure & plan registry - what is built, and what is planned, per cell

use ahash::AHashMap;

use crate::city::building::{Structure, StructureKind};
use crate::city::construction::{Plan, PlanToggle};
use crate::spatial::grid::Cell;

/// Authoritative mapping of cells to structures and pending plans
#[derive(Debug, Clone)]
pub struct StructureRegistry {
    structures: AHashMap<Cell, Structure>,
    plans: AHashMap<Cell, Plan>,
    /// Work steps given to newly placed plans
    construction_steps: u32,
}

impl StructureRegistry {
    pub fn new(construction_steps: u32) -> Self {
        Self {
            structures: AHashMap::new(),
            plans: AHashMap::new(),
            construction_steps,
        }
    }

    /// Place a structure, discarding whatever stood there before
    pub fn add_structure(&mut self, cell: Cell, kind: StructureKind) {
        self.structures.insert(cell, Structure::new(kind));
    }

    pub fn structure(&self, cell: Cell) -> Option<&Structure> {
        self.structures.get(&cell)
    }

    pub fn structure_mut(&mut self, cell: Cell) -> Option<&mut Structure> {
        self.structures.get_mut(&cell)
    }

    pub fn is_structure_kind(&self, cell: Cell, kind: StructureKind) -> bool {
        self.structures.get(&cell).is_some_and(|s| s.kind == kind)
    }

    /// Surface cells and staircases allow moving between rows
    pub fn can_travel_vertically(&self, cell: Cell) -> bool {
        cell.is_surface()
            || self
                .structures
                .get(&cell)
                .is_some_and(|s| s.kind.permits_vertical_travel())
    }

    /// Underground cells are only walkable once something is built there
    pub fn can_travel(&self, cell: Cell) -> bool {
        cell.is_surface() || self.structures.contains_key(&cell)
    }

    pub fn plan(&self, cell: Cell) -> Option<&Plan> {
        self.plans.get(&cell)
    }

    pub fn plan_mut(&mut self, cell: Cell) -> Option<&mut Plan> {
        self.plans.get_mut(&cell)
    }

    pub fn has_plan(&self, cell: Cell) -> bool {
        self.plans.contains_key(&cell)
    }

    pub fn is_planned(&self, cell: Cell, kind: StructureKind) -> bool {
        self.plans.get(&cell).is_some_and(|p| p.kind == kind)
    }

    /// Place, remove or replace the plan at `cell`
    ///
    /// Toggling the same kind twice leaves the cell without a plan.
    pub fn toggle_plan(&mut self, cell: Cell, kind: StructureKind) -> PlanToggle {
        match self.plans.remove(&cell) {
            Some(existing) if existing.kind == kind => PlanToggle::Removed,
            Some(existing) => {
                self.plans
                    .insert(cell, Plan::new(kind, self.construction_steps));
                PlanToggle::Replaced {
                    previous: existing.kind,
                }
            }
            None => {
                self.plans
                    .insert(cell, Plan::new(kind, self.construction_steps));
                PlanToggle::Placed
            }
        }
    }

    /// Replace a finished plan with its structure
    ///
    /// Returns the kind that was built, or `None` if no plan was there.
    pub fn complete_plan(&mut self, cell: Cell) -> Option<StructureKind> {
        let plan = self.plans.remove(&cell)?;
        self.add_structure(cell, plan.kind);
        Some(plan.kind)
    }

    pub fn structures(&self) -> impl Iterator<Item = (&Cell, &Structure)> {
        self.structures.iter()
    }

    pub fn plans(&self) -> impl Iterator<Item = (&Cell, &Plan)> {
        self.plans.iter()
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }
}

impl Default for StructureRegistry {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_structure_replaces() {
        let mut reg = StructureRegistry::default();
        let cell = Cell::new(3, 2);
        reg.add_structure(cell, StructureKind::Corridor);
        reg.structure_mut(cell).unwrap().assignee = Some(crate::core::types::DwarfId(0));
        reg.add_structure(cell, StructureKind::ProductionFarm);

        let s = reg.structure(cell).unwrap();
        assert_eq!(s.kind, StructureKind::ProductionFarm);
        assert!(s.is_available());
        assert_eq!(reg.structure_count(), 1);
    }

    #[test]
    fn test_surface_is_always_traversable() {
        let reg = StructureRegistry::default();
        assert!(reg.can_travel(Cell::new(0, 42)));
        assert!(reg.can_travel_vertically(Cell::new(0, 42)));
        assert!(!reg.can_travel(Cell::new(1, 42)));
        assert!(!reg.can_travel_vertically(Cell::new(1, 42)));
    }

    #[test]
    fn test_underground_traversal_needs_structure() {
        let mut reg = StructureRegistry::default();
        reg.add_structure(Cell::new(2, 1), StructureKind::Corridor);
        reg.add_structure(Cell::new(2, 2), StructureKind::Staircase);

        assert!(reg.can_travel(Cell::new(2, 1)));
        assert!(!reg.can_travel_vertically(Cell::new(2, 1)));
        assert!(reg.can_travel(Cell::new(2, 2)));
        assert!(reg.can_travel_vertically(Cell::new(2, 2)));
        assert!(reg.is_structure_kind(Cell::new(2, 2), StructureKind::Staircase));
        assert!(!reg.is_structure_kind(Cell::new(2, 3), StructureKind::Staircase));
    }

    #[test]
    fn test_toggle_plan_cycle() {
        let mut reg = StructureRegistry::default();
        let cell = Cell::new(1, 1);

        assert_eq!(reg.toggle_plan(cell, StructureKind::Staircase), PlanToggle::Placed);
        assert!(reg.is_planned(cell, StructureKind::Staircase));
        assert_eq!(reg.toggle_plan(cell, StructureKind::Staircase), PlanToggle::Removed);
        assert!(!reg.has_plan(cell));
    }

    #[test]
    fn test_toggle_plan_different_kind_replaces_with_fresh_progress() {
        let mut reg = StructureRegistry::default();
        let cell = Cell::new(1, 1);
        reg.toggle_plan(cell, StructureKind::Staircase);
        reg.plan_mut(cell).unwrap().work_done = 40;

        let outcome = reg.toggle_plan(cell, StructureKind::Corridor);
        assert_eq!(
            outcome,
            PlanToggle::Replaced {
                previous: StructureKind::Staircase
            }
        );
        let plan = reg.plan(cell).unwrap();
        assert_eq!(plan.kind, StructureKind::Corridor);
        assert_eq!(plan.work_done, 0);
    }

    #[test]
    fn test_complete_plan_materializes_structure() {
        let mut reg = StructureRegistry::new(5);
        let cell = Cell::new(4, 4);
        reg.toggle_plan(cell, StructureKind::Staircase);
        assert_eq!(reg.plan(cell).unwrap().work_required, 5);

        assert_eq!(reg.complete_plan(cell), Some(StructureKind::Staircase));
        assert!(!reg.has_plan(cell));
        assert!(reg.is_structure_kind(cell, StructureKind::Staircase));
        assert_eq!(reg.complete_plan(cell), None);
    }
}
