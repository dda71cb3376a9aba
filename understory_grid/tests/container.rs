// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_grid` container model.
//!
//! These exercise occupancy, the selection mutators (cell-level and
//! occupant-level flags), resizing, and the revision counters.

use proptest::prelude::*;
use understory_grid::{
    Container, ContainerId, ContainerKind, GlobalId, GridCoord, LayoutError, Location,
    LocationId, MoveError, Occupant, OutOfBounds, RecordKind,
};

#[derive(Clone, Debug, PartialEq)]
struct Tube {
    id: GlobalId,
    selected: bool,
}

impl Tube {
    fn new(id: u64) -> Self {
        Self {
            id: GlobalId::new(RecordKind::Subsample, id),
            selected: false,
        }
    }
}

impl Occupant for Tube {
    type Id = GlobalId;

    fn global_id(&self) -> Option<&GlobalId> {
        Some(&self.id)
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

fn rack_with(columns: u32, rows: u32, filled: &[(u32, u32)]) -> Container<Tube> {
    let mut rack = Container::grid(ContainerId(1), columns, rows);
    for (n, &(x, y)) in filled.iter().enumerate() {
        rack.put(GridCoord::new(x, y), Tube::new(n as u64 + 1)).unwrap();
    }
    rack
}

#[test]
fn find_location_reports_signed_out_of_bounds() {
    let rack = rack_with(3, 3, &[]);
    assert!(rack.find_location(3, 3).is_ok());
    assert_eq!(rack.find_location(0, 1).err(), Some(OutOfBounds { x: 0, y: 1 }));
    assert_eq!(rack.find_location(-2, 4).err(), Some(OutOfBounds { x: -2, y: 4 }));
    assert_eq!(rack.find_location(4, 1).err(), Some(OutOfBounds { x: 4, y: 1 }));
}

#[test]
fn put_and_take_bump_occupancy_revision() {
    let mut rack = rack_with(2, 2, &[]);
    let before = rack.occupancy_revision();

    let displaced = rack.put(GridCoord::new(1, 2), Tube::new(9)).unwrap();
    assert!(displaced.is_none());
    assert!(rack.occupancy_revision() > before);

    let taken = rack.take(GridCoord::new(1, 2));
    assert_eq!(taken.map(|t| t.id), Some(GlobalId::new(RecordKind::Subsample, 9)));
    assert!(!rack.is_occupied(GridCoord::new(1, 2)));
}

#[test]
fn selection_mirrors_onto_occupants_and_clears_both() {
    let mut rack = rack_with(3, 1, &[(1, 1), (2, 1)]);
    rack.set_selected(GridCoord::new(1, 1), true);
    rack.set_selected(GridCoord::new(2, 1), true);

    assert_eq!(rack.selected_count(), 2);
    assert!(rack.content(GridCoord::new(1, 1)).unwrap().selected);

    let rev = rack.selection_revision();
    rack.clear_selection();
    assert_eq!(rack.selected_count(), 0);
    assert!(rack.iter().filter_map(Location::content).all(|t| !t.selected));
    assert!(rack.selection_revision() > rev);

    // Clearing an already clear selection is a no-op.
    let rev = rack.selection_revision();
    rack.clear_selection();
    assert_eq!(rack.selection_revision(), rev);
}

#[test]
fn clear_selection_reaches_occupant_flags_set_elsewhere() {
    let mut rack = rack_with(2, 1, &[(1, 1)]);
    let mut tube = rack.take(GridCoord::new(1, 1)).unwrap();
    tube.selected = true;
    rack.put(GridCoord::new(1, 1), tube).unwrap();

    rack.clear_selection();
    assert!(!rack.content(GridCoord::new(1, 1)).unwrap().selected);
}

#[test]
fn toggle_and_select_only() {
    let mut rack = rack_with(3, 1, &[(1, 1), (2, 1), (3, 1)]);
    assert!(rack.toggle_selected(GridCoord::new(1, 1)));
    assert!(rack.toggle_selected(GridCoord::new(2, 1)));
    assert!(!rack.toggle_selected(GridCoord::new(1, 1)));

    rack.select_only(GridCoord::new(3, 1));
    let selected: Vec<_> = rack.selected_locations().map(Location::coord).collect();
    assert_eq!(selected, [GridCoord::new(3, 1)]);
}

#[test]
fn select_rect_skips_empty_cells() {
    let mut rack = rack_with(4, 4, &[(1, 1), (2, 2), (4, 4), (3, 1)]);
    rack.select_rect(GridCoord::new(3, 2), GridCoord::new(1, 1));

    let selected: Vec<_> = rack.selected_locations().map(Location::coord).collect();
    assert_eq!(
        selected,
        [GridCoord::new(1, 1), GridCoord::new(3, 1), GridCoord::new(2, 2)]
    );
}

#[test]
fn locate_finds_occupant_by_global_id() {
    let rack = rack_with(3, 3, &[(1, 1), (3, 2)]);
    let id = GlobalId::new(RecordKind::Subsample, 2);
    assert_eq!(rack.locate(&id).map(Location::coord), Some(GridCoord::new(3, 2)));
    assert!(rack.locate(&GlobalId::new(RecordKind::Sample, 2)).is_none());
}

#[test]
fn resize_keeps_survivors_and_refuses_to_drop_occupants() {
    let mut rack = rack_with(4, 4, &[(1, 1), (2, 3)]);
    rack.set_selected(GridCoord::new(2, 3), true);

    assert_eq!(
        rack.resize(2, 2),
        Err(LayoutError::WouldDropOccupant(GridCoord::new(2, 3)))
    );
    assert_eq!(rack.layout_revision(), 0);
    assert_eq!(rack.locations().len(), 16);

    rack.resize(3, 3).unwrap();
    assert_eq!(rack.kind(), ContainerKind::Grid { columns: 3, rows: 3 });
    assert_eq!(rack.locations().len(), 9);
    assert!(rack.is_occupied(GridCoord::new(1, 1)));
    assert!(rack.location(GridCoord::new(2, 3)).unwrap().is_selected());
    assert_eq!(rack.layout_revision(), 1);
}

#[test]
fn image_containers_keep_explicit_locations() {
    let mut shelf = Container::image(
        ContainerId(5),
        vec![
            Location::new(GridCoord::new(1, 1)).with_id(LocationId(11)),
            Location::new(GridCoord::new(2, 1))
                .with_id(LocationId(12))
                .with_content(Tube::new(1)),
        ],
    )
    .unwrap();

    assert!(!shelf.supports_multi_move());
    assert_eq!(shelf.column_count(), 2);
    assert_eq!(shelf.row_count(), 1);
    assert_eq!(shelf.resize(3, 3), Err(LayoutError::NotAGrid));
    assert_eq!(
        shelf.location(GridCoord::new(2, 1)).and_then(Location::id),
        Some(LocationId(12))
    );
    assert!(shelf.put(GridCoord::new(1, 1), Tube::new(2)).is_ok());
}

#[test]
fn image_rejects_duplicate_coordinates() {
    let result = Container::<Tube>::image(
        ContainerId(5),
        vec![
            Location::new(GridCoord::new(1, 1)),
            Location::new(GridCoord::new(1, 1)),
        ],
    );
    assert_eq!(
        result.err(),
        Some(LayoutError::DuplicateCoord(GridCoord::new(1, 1)))
    );
}

fn ids(rack: &Container<Tube>) -> Vec<Option<u64>> {
    rack.iter()
        .map(|l| l.global_id().map(|id| id.id))
        .collect()
}

#[test]
fn take_leaves_no_empty_selected_cell() {
    let mut rack = rack_with(3, 1, &[(1, 1), (2, 1)]);
    rack.select_all_occupied();

    let tube = rack.take(GridCoord::new(2, 1)).unwrap();
    assert_eq!(rack.selected_count(), 1);
    assert!(rack.selected_locations().all(Location::is_occupied));
    // The occupant keeps its own flag until it is placed and cleared.
    assert!(tube.selected);
}

#[test]
fn move_occupants_handles_chains_and_reverses_exactly() {
    let mut rack = rack_with(3, 1, &[(1, 1), (2, 1)]);
    rack.set_selected(GridCoord::new(1, 1), true);
    let pairs = [
        (GridCoord::new(1, 1), GridCoord::new(2, 1)),
        (GridCoord::new(2, 1), GridCoord::new(3, 1)),
    ];

    rack.move_occupants(&pairs).unwrap();
    assert_eq!(ids(&rack), [None, Some(1), Some(2)]);
    // Selection stays on the cells.
    assert!(rack.location(GridCoord::new(1, 1)).unwrap().is_selected());

    let reversed: Vec<_> = pairs.iter().map(|&(a, b)| (b, a)).collect();
    rack.move_occupants(&reversed).unwrap();
    assert_eq!(ids(&rack), [Some(1), Some(2), None]);
    assert_eq!(rack.selected_count(), 1);
}

#[test]
fn move_occupants_refuses_to_overwrite_a_stationary_occupant() {
    let mut rack = rack_with(3, 1, &[(1, 1), (2, 1)]);
    let rev = rack.occupancy_revision();

    let err = rack
        .move_occupants(&[(GridCoord::new(1, 1), GridCoord::new(2, 1))])
        .unwrap_err();
    assert_eq!(err, MoveError::DestinationOccupied(GridCoord::new(2, 1)));
    assert_eq!(ids(&rack), [Some(1), Some(2), None]);
    assert_eq!(rack.occupancy_revision(), rev);
}

#[test]
fn move_occupants_refuses_bad_pairs() {
    let mut rack = rack_with(3, 1, &[(1, 1), (2, 1)]);
    let (a, b, c) = (GridCoord::new(1, 1), GridCoord::new(2, 1), GridCoord::new(3, 1));

    assert_eq!(
        rack.move_occupants(&[(a, GridCoord::new(4, 1))]),
        Err(MoveError::NotInContainer(GridCoord::new(4, 1)))
    );
    assert_eq!(rack.move_occupants(&[(c, a)]), Err(MoveError::EmptySource(c)));
    assert_eq!(
        rack.move_occupants(&[(a, c), (b, c)]),
        Err(MoveError::DestinationOccupied(c))
    );
    assert_eq!(ids(&rack), [Some(1), Some(2), None]);
}

proptest! {
    #[test]
    fn select_rect_selects_exactly_occupied_cells_inside(
        filled in proptest::collection::btree_set((1_u32..=6, 1_u32..=6), 0..20),
        a in (1_u32..=6, 1_u32..=6),
        b in (1_u32..=6, 1_u32..=6),
    ) {
        let filled: Vec<_> = filled.into_iter().collect();
        let mut rack = rack_with(6, 6, &filled);
        rack.select_rect(GridCoord::new(a.0, a.1), GridCoord::new(b.0, b.1));

        let (x0, x1) = (a.0.min(b.0), a.0.max(b.0));
        let (y0, y1) = (a.1.min(b.1), a.1.max(b.1));
        for location in rack.iter() {
            let c = location.coord();
            let inside = (x0..=x1).contains(&c.x) && (y0..=y1).contains(&c.y);
            prop_assert_eq!(location.is_selected(), inside && location.is_occupied());
        }
    }
}
