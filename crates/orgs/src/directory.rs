use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use adminkit_core::{DomainError, DomainResult, OrgUnitId, UserId};

use crate::unit::{OrgUnit, UnitLeader, UnitStatus};

/// Input for creating a unit. Ancestors are computed by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDraft {
    pub id: OrgUnitId,
    pub parent_id: Option<OrgUnitId>,
    pub name: String,
    pub sort: u32,
    pub status: UnitStatus,
}

/// A unit with its subtree, as handed to tree views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitNode {
    pub unit: OrgUnit,
    pub children: Vec<UnitNode>,
}

/// In-memory organizational directory.
///
/// Owns the unit hierarchy and leader assignments. Persistence lives behind
/// the callers of this type; everything here is deterministic and synchronous.
#[derive(Debug, Clone, Default)]
pub struct OrgUnitDirectory {
    units: HashMap<OrgUnitId, OrgUnit>,
    leaders: HashMap<OrgUnitId, Vec<UnitLeader>>,
}

impl OrgUnitDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: OrgUnitId) -> Option<&OrgUnit> {
        self.units.get(&id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrgUnit> {
        self.units.values()
    }

    /// Insert a new unit under its parent.
    ///
    /// Rejects duplicate ids, a unit naming itself as parent, and unknown
    /// parents. The ancestor path is derived from the parent.
    pub fn insert(&mut self, draft: UnitDraft) -> DomainResult<()> {
        if self.units.contains_key(&draft.id) {
            return Err(DomainError::conflict(format!("unit {} already exists", draft.id)));
        }

        let ancestors = self.path_for(draft.id, draft.parent_id)?;
        self.units.insert(
            draft.id,
            OrgUnit {
                id: draft.id,
                parent_id: draft.parent_id,
                ancestors,
                name: draft.name,
                sort: draft.sort,
                status: draft.status,
            },
        );
        Ok(())
    }

    /// Update display fields. Hierarchy changes go through [`Self::reparent`].
    pub fn update_info(
        &mut self,
        id: OrgUnitId,
        name: impl Into<String>,
        sort: u32,
        status: UnitStatus,
    ) -> DomainResult<()> {
        let unit = self.units.get_mut(&id).ok_or(DomainError::NotFound)?;
        unit.name = name.into();
        unit.sort = sort;
        unit.status = status;
        Ok(())
    }

    /// Move a unit (and its subtree) under a new parent.
    ///
    /// A unit cannot be moved under itself or under one of its descendants;
    /// ancestor paths of the whole subtree are recomputed.
    pub fn reparent(&mut self, id: OrgUnitId, new_parent: Option<OrgUnitId>) -> DomainResult<()> {
        if !self.units.contains_key(&id) {
            return Err(DomainError::NotFound);
        }
        if let Some(parent) = new_parent {
            if self.descendants(id).contains(&parent) {
                return Err(DomainError::validation(
                    "unit cannot be moved under itself or a descendant",
                ));
            }
        }

        let new_path = self.path_for(id, new_parent)?;
        let subtree = self.descendants(id);

        let unit = self.units.get_mut(&id).ok_or(DomainError::NotFound)?;
        unit.parent_id = new_parent;
        unit.ancestors = new_path.clone();

        // Rewrite the stale prefix of every descendant's path.
        for child_id in subtree.into_iter().filter(|c| *c != id) {
            if let Some(child) = self.units.get_mut(&child_id) {
                let keep = child
                    .ancestors
                    .iter()
                    .position(|a| *a == id)
                    .map(|pos| child.ancestors.split_off(pos))
                    .unwrap_or_default();
                child.ancestors = new_path.iter().copied().chain(keep).collect();
            }
        }
        Ok(())
    }

    /// Whether any unit has `id` as its direct parent.
    pub fn has_children(&self, id: OrgUnitId) -> bool {
        self.units.values().any(|u| u.parent_id == Some(id))
    }

    /// `id` plus every transitive child, in no particular order.
    pub fn descendants(&self, id: OrgUnitId) -> Vec<OrgUnitId> {
        if !self.units.contains_key(&id) {
            return Vec::new();
        }
        let mut out = vec![id];
        out.extend(
            self.units
                .values()
                .filter(|u| u.has_ancestor(id))
                .map(|u| u.id),
        );
        out
    }

    /// Remove the given units where possible.
    ///
    /// Units that still have children are skipped; their names are returned so
    /// the caller can report them. Leader assignments of removed units are
    /// dropped with the unit.
    pub fn remove(&mut self, ids: &[OrgUnitId]) -> Vec<String> {
        let mut skipped = Vec::new();
        for id in ids {
            if self.has_children(*id) {
                if let Some(unit) = self.units.get(id) {
                    skipped.push(unit.name.clone());
                }
                continue;
            }
            self.units.remove(id);
            self.leaders.remove(id);
        }
        skipped
    }

    /// Full tree, roots first, siblings ordered by `sort` descending.
    pub fn tree(&self) -> Vec<UnitNode> {
        let mut by_parent: HashMap<Option<OrgUnitId>, Vec<&OrgUnit>> = HashMap::new();
        for unit in self.units.values() {
            by_parent.entry(unit.parent_id).or_default().push(unit);
        }
        self.build_level(&by_parent, None)
    }

    fn build_level(
        &self,
        by_parent: &HashMap<Option<OrgUnitId>, Vec<&OrgUnit>>,
        parent: Option<OrgUnitId>,
    ) -> Vec<UnitNode> {
        let Some(level) = by_parent.get(&parent) else {
            return Vec::new();
        };
        let mut level = level.clone();
        level.sort_by(|a, b| b.sort.cmp(&a.sort).then_with(|| a.name.cmp(&b.name)));
        level
            .into_iter()
            .map(|unit| UnitNode {
                unit: unit.clone(),
                children: self.build_level(by_parent, Some(unit.id)),
            })
            .collect()
    }

    /// Assign leaders to a unit. Users already assigned are left as-is.
    pub fn add_leaders(
        &mut self,
        id: OrgUnitId,
        users: &[UserId],
        assigned_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        if !self.units.contains_key(&id) {
            return Err(DomainError::NotFound);
        }
        let assigned = self.leaders.entry(id).or_default();
        for user in users {
            if assigned.iter().all(|l| l.user_id != *user) {
                assigned.push(UnitLeader {
                    user_id: *user,
                    assigned_at,
                });
            }
        }
        Ok(())
    }

    /// Withdraw leader assignments. Unknown users are ignored.
    pub fn remove_leaders(&mut self, id: OrgUnitId, users: &[UserId]) -> DomainResult<()> {
        if !self.units.contains_key(&id) {
            return Err(DomainError::NotFound);
        }
        if let Some(assigned) = self.leaders.get_mut(&id) {
            assigned.retain(|l| !users.contains(&l.user_id));
        }
        Ok(())
    }

    pub fn leaders(&self, id: OrgUnitId) -> &[UnitLeader] {
        self.leaders.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    fn path_for(
        &self,
        id: OrgUnitId,
        parent_id: Option<OrgUnitId>,
    ) -> DomainResult<Vec<OrgUnitId>> {
        match parent_id {
            None => Ok(Vec::new()),
            Some(parent) if parent == id => {
                Err(DomainError::validation("unit cannot be its own parent"))
            }
            Some(parent) => {
                let parent = self.units.get(&parent).ok_or(DomainError::NotFound)?;
                let mut path = parent.ancestors.clone();
                path.push(parent.id);
                Ok(path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: OrgUnitId, parent: Option<OrgUnitId>, name: &str, sort: u32) -> UnitDraft {
        UnitDraft {
            id,
            parent_id: parent,
            name: name.to_string(),
            sort,
            status: UnitStatus::Enabled,
        }
    }

    /// head office ─┬─ sales ── field sales
    ///              └─ engineering
    fn directory() -> (OrgUnitDirectory, [OrgUnitId; 4]) {
        let ids = [OrgUnitId::new(), OrgUnitId::new(), OrgUnitId::new(), OrgUnitId::new()];
        let [hq, sales, field, eng] = ids;

        let mut dir = OrgUnitDirectory::new();
        dir.insert(draft(hq, None, "Head Office", 100)).unwrap();
        dir.insert(draft(sales, Some(hq), "Sales", 50)).unwrap();
        dir.insert(draft(field, Some(sales), "Field Sales", 10)).unwrap();
        dir.insert(draft(eng, Some(hq), "Engineering", 80)).unwrap();
        (dir, ids)
    }

    #[test]
    fn insert_computes_ancestor_path() {
        let (dir, [hq, sales, field, _]) = directory();
        assert!(dir.get(hq).unwrap().ancestors.is_empty());
        assert_eq!(dir.get(sales).unwrap().ancestors, vec![hq]);
        assert_eq!(dir.get(field).unwrap().ancestors, vec![hq, sales]);
    }

    #[test]
    fn insert_rejects_self_parent() {
        let mut dir = OrgUnitDirectory::new();
        let id = OrgUnitId::new();
        let err = dir.insert(draft(id, Some(id), "Ouroboros", 0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn insert_rejects_unknown_parent_and_duplicate_id() {
        let mut dir = OrgUnitDirectory::new();
        let id = OrgUnitId::new();
        assert_eq!(
            dir.insert(draft(id, Some(OrgUnitId::new()), "Orphan", 0)),
            Err(DomainError::NotFound)
        );

        dir.insert(draft(id, None, "Root", 0)).unwrap();
        let err = dir.insert(draft(id, None, "Root again", 0)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn tree_orders_siblings_by_sort_descending() {
        let (dir, [hq, sales, _, eng]) = directory();
        let tree = dir.tree();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].unit.id, hq);

        let children: Vec<OrgUnitId> = tree[0].children.iter().map(|n| n.unit.id).collect();
        assert_eq!(children, vec![eng, sales]);
    }

    #[test]
    fn remove_skips_units_with_children_and_reports_them() {
        let (mut dir, [_, sales, field, eng]) = directory();

        let skipped = dir.remove(&[sales, eng]);
        assert_eq!(skipped, vec!["Sales".to_string()]);
        assert!(dir.get(sales).is_some());
        assert!(dir.get(eng).is_none());

        // Once the child is gone the parent can be removed.
        assert!(dir.remove(&[field]).is_empty());
        assert!(dir.remove(&[sales]).is_empty());
        assert!(dir.get(sales).is_none());
    }

    #[test]
    fn descendants_cover_the_subtree() {
        let (dir, [hq, sales, field, eng]) = directory();

        let mut all = dir.descendants(hq);
        all.sort_by_key(|id| id.to_string());
        let mut expected = vec![hq, sales, field, eng];
        expected.sort_by_key(|id| id.to_string());
        assert_eq!(all, expected);

        assert_eq!(dir.descendants(sales).len(), 2);
        assert_eq!(dir.descendants(field), vec![field]);
        assert!(dir.descendants(OrgUnitId::new()).is_empty());
    }

    #[test]
    fn reparent_rewrites_subtree_paths() {
        let (mut dir, [hq, sales, field, eng]) = directory();

        dir.reparent(sales, Some(eng)).unwrap();
        assert_eq!(dir.get(sales).unwrap().ancestors, vec![hq, eng]);
        assert_eq!(dir.get(field).unwrap().ancestors, vec![hq, eng, sales]);
    }

    #[test]
    fn reparent_rejects_cycles() {
        let (mut dir, [_, sales, field, _]) = directory();
        let err = dir.reparent(sales, Some(field)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn leader_assignment_roundtrip() {
        let (mut dir, [hq, ..]) = directory();
        let alice = UserId::new();
        let bob = UserId::new();
        let now = Utc::now();

        dir.add_leaders(hq, &[alice, bob], now).unwrap();
        // Re-adding is a no-op, not a duplicate.
        dir.add_leaders(hq, &[alice], now).unwrap();
        assert_eq!(dir.leaders(hq).len(), 2);

        dir.remove_leaders(hq, &[alice]).unwrap();
        assert_eq!(dir.leaders(hq).len(), 1);
        assert_eq!(dir.leaders(hq)[0].user_id, bob);

        assert_eq!(
            dir.add_leaders(OrgUnitId::new(), &[alice], now),
            Err(DomainError::NotFound)
        );
    }
}
