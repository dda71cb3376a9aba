// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer modality: press-and-hold activation and hit-tested hovering.
//!
//! A pointer drag starts only after the pointer has been held on an occupied
//! cell for [`DragConfig::activation_delay_ms`] without moving further than
//! [`DragConfig::activation_tolerance`]. Moving further first aborts the
//! gesture so the host can treat it as a scroll or a click.
//!
//! [`PointerActivation`] is the bare timer and tolerance tracker.
//! [`PointerDrag`] wires it to a [`DragSession`] and a container's
//! [`hit_test`](understory_grid::Container::hit_test).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_grid::{Container, ContainerId, GlobalId, GridCoord, GridGeometry, RecordKind};
//! use understory_grid_drag::pointer::{PointerAction, PointerDrag};
//! use understory_grid_drag::{DragConfig, DragSession};
//!
//! let mut rack = Container::grid(ContainerId(1), 3, 3);
//! rack.layout_cells(&GridGeometry::default());
//! rack.put(GridCoord::new(1, 1), GlobalId::new(RecordKind::Sample, 9)).unwrap();
//!
//! let config = DragConfig::default();
//! let mut session = DragSession::new(config.clone());
//! let mut pointer = PointerDrag::new(&config);
//!
//! assert!(pointer.pointer_down(&session, &rack, Point::new(10.0, 10.0), 0));
//! let action = pointer.tick(&mut session, &mut rack, 300).unwrap();
//! assert!(matches!(action, PointerAction::Armed { count: 1 }));
//! ```

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Point;
use understory_grid::{Container, GridCoord, Occupant};

use crate::{DragConfig, DragPhase, DragSession, DropOutcome, PlacementError};

/// State of a press-and-hold activation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ActivationState {
    /// No press in progress.
    #[default]
    Idle,
    /// Pressed; waiting for the hold delay.
    Pending,
    /// The hold delay elapsed within tolerance; a drag may start at this cell.
    Ready(GridCoord),
    /// The pointer moved too far too early; this press is not a drag.
    Aborted,
}

#[derive(Copy, Clone, Debug)]
struct Press {
    coord: GridCoord,
    at: Point,
    time_ms: u64,
}

/// Press-and-hold gesture recognizer.
#[derive(Clone, Debug)]
pub struct PointerActivation {
    delay_ms: u64,
    tolerance: f64,
    press: Option<Press>,
    state: ActivationState,
}

impl PointerActivation {
    /// Creates a recognizer using the delay and tolerance of `config`.
    #[must_use]
    pub fn new(config: &DragConfig) -> Self {
        Self {
            delay_ms: config.activation_delay_ms,
            tolerance: config.activation_tolerance,
            press: None,
            state: ActivationState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ActivationState {
        self.state
    }

    /// Starts tracking a press on `coord` at pixel position `at`.
    pub fn press(&mut self, coord: GridCoord, at: Point, time_ms: u64) -> ActivationState {
        self.press = Some(Press { coord, at, time_ms });
        self.state = ActivationState::Pending;
        self.tick(time_ms)
    }

    /// Reports pointer motion while the button is held.
    pub fn motion(&mut self, at: Point, time_ms: u64) -> ActivationState {
        if self.state == ActivationState::Pending
            && let Some(press) = self.press
            && press.at.distance(at) > self.tolerance
            && time_ms.saturating_sub(press.time_ms) < self.delay_ms
        {
            self.state = ActivationState::Aborted;
            return self.state;
        }
        self.tick(time_ms)
    }

    /// Advances the hold timer without motion.
    pub fn tick(&mut self, time_ms: u64) -> ActivationState {
        if self.state == ActivationState::Pending
            && let Some(press) = self.press
            && time_ms.saturating_sub(press.time_ms) >= self.delay_ms
        {
            self.state = ActivationState::Ready(press.coord);
        }
        self.state
    }

    /// Ends the press and returns the state it ended in.
    pub fn release(&mut self) -> ActivationState {
        self.press = None;
        core::mem::take(&mut self.state)
    }
}

/// What the host should render after a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerAction {
    /// Nothing changed.
    None,
    /// The hold delay elapsed and the session was armed.
    Armed {
        /// Number of items picked up.
        count: usize,
    },
    /// The candidate destination was updated.
    Hover {
        /// The cell under the pointer, if the whole group fits inside the container there.
        candidate: Option<GridCoord>,
        /// Whether a drop there would be accepted.
        allowed: bool,
    },
    /// The press turned out not to be a drag.
    Aborted,
}

/// Pointer front end for a [`DragSession`].
#[derive(Clone, Debug)]
pub struct PointerDrag {
    activation: PointerActivation,
}

impl PointerDrag {
    /// Creates a pointer front end.
    #[must_use]
    pub fn new(config: &DragConfig) -> Self {
        Self {
            activation: PointerActivation::new(config),
        }
    }

    /// The underlying activation recognizer.
    #[must_use]
    pub fn activation(&self) -> &PointerActivation {
        &self.activation
    }

    /// Handles a button press. Returns `true` if a hold was started, which
    /// requires an idle session and an occupied cell under the pointer.
    pub fn pointer_down<C>(
        &mut self,
        session: &DragSession<C::Id>,
        container: &Container<C>,
        at: Point,
        time_ms: u64,
    ) -> bool
    where
        C: Occupant,
    {
        if !session.can_start() {
            return false;
        }
        let Some(coord) = container.hit_test(at).filter(|&c| container.is_occupied(c)) else {
            return false;
        };
        self.activation.press(coord, at, time_ms);
        true
    }

    /// Handles pointer motion with the button held.
    pub fn pointer_move<C>(
        &mut self,
        session: &mut DragSession<C::Id>,
        container: &mut Container<C>,
        at: Point,
        time_ms: u64,
    ) -> Result<PointerAction, PlacementError>
    where
        C: Occupant,
    {
        if session.phase() == DragPhase::Armed {
            let candidate = session.hover(container, container.hit_test(at));
            let allowed = candidate.is_some_and(|dest| session.footprint_allowed(container, dest));
            return Ok(PointerAction::Hover { candidate, allowed });
        }
        let state = self.activation.motion(at, time_ms);
        self.advance(state, session, container)
    }

    /// Advances the hold timer; call from the host's frame or timer callback.
    pub fn tick<C>(
        &mut self,
        session: &mut DragSession<C::Id>,
        container: &mut Container<C>,
        time_ms: u64,
    ) -> Result<PointerAction, PlacementError>
    where
        C: Occupant,
    {
        if session.phase() == DragPhase::Armed {
            return Ok(PointerAction::None);
        }
        let state = self.activation.tick(time_ms);
        self.advance(state, session, container)
    }

    /// Handles the button release. Returns the drop outcome if a drag was armed.
    pub fn pointer_up<C>(
        &mut self,
        session: &mut DragSession<C::Id>,
        container: &mut Container<C>,
    ) -> Result<Option<DropOutcome<C::Id>>, PlacementError>
    where
        C: Occupant,
    {
        self.activation.release();
        if session.phase() != DragPhase::Armed {
            return Ok(None);
        }
        session.drop(container).map(Some)
    }

    /// Abandons the gesture. Returns `true` if an armed drag was cancelled.
    pub fn escape<I>(&mut self, session: &mut DragSession<I>) -> bool
    where
        I: Clone + Eq + Hash + Debug,
    {
        self.activation.release();
        session.cancel()
    }

    fn advance<C>(
        &mut self,
        state: ActivationState,
        session: &mut DragSession<C::Id>,
        container: &mut Container<C>,
    ) -> Result<PointerAction, PlacementError>
    where
        C: Occupant,
    {
        match state {
            ActivationState::Ready(coord) => {
                if session.arm(container, coord)? {
                    session.hover(container, Some(coord));
                    Ok(PointerAction::Armed {
                        count: session.count_being_moved(),
                    })
                } else {
                    self.activation.release();
                    Ok(PointerAction::None)
                }
            }
            ActivationState::Aborted => {
                self.activation.release();
                Ok(PointerAction::Aborted)
            }
            ActivationState::Idle | ActivationState::Pending => Ok(PointerAction::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_grid::{ContainerId, GlobalId, GridGeometry, RecordKind};

    fn activation() -> PointerActivation {
        PointerActivation::new(&DragConfig::default())
    }

    #[test]
    fn hold_within_tolerance_becomes_ready() {
        let mut a = activation();
        let coord = GridCoord::new(2, 3);
        assert_eq!(a.press(coord, Point::new(0.0, 0.0), 1_000), ActivationState::Pending);
        assert_eq!(a.motion(Point::new(3.0, 4.0), 1_100), ActivationState::Pending);
        assert_eq!(a.tick(1_250), ActivationState::Ready(coord));
        assert_eq!(a.release(), ActivationState::Ready(coord));
        assert_eq!(a.state(), ActivationState::Idle);
    }

    #[test]
    fn early_movement_aborts() {
        let mut a = activation();
        a.press(GridCoord::new(1, 1), Point::new(0.0, 0.0), 0);
        assert_eq!(a.motion(Point::new(6.0, 0.0), 100), ActivationState::Aborted);
        // Once aborted, waiting does not revive the press.
        assert_eq!(a.tick(1_000), ActivationState::Aborted);
    }

    #[test]
    fn movement_after_the_delay_keeps_the_drag() {
        let mut a = activation();
        let coord = GridCoord::new(1, 1);
        a.press(coord, Point::new(0.0, 0.0), 0);
        assert_eq!(a.motion(Point::new(50.0, 0.0), 300), ActivationState::Ready(coord));
    }

    #[test]
    fn zero_delay_is_ready_on_press() {
        let mut a = PointerActivation::new(&DragConfig::default().with_delay(0));
        let coord = GridCoord::new(1, 1);
        assert_eq!(a.press(coord, Point::ZERO, 5), ActivationState::Ready(coord));
    }

    #[test]
    fn pointer_drag_hovers_and_drops() {
        let mut rack = Container::grid(ContainerId(1), 3, 3);
        let geometry = GridGeometry::default();
        rack.layout_cells(&geometry);
        rack.put(GridCoord::new(1, 1), GlobalId::new(RecordKind::Sample, 1))
            .unwrap();

        let config = DragConfig::default();
        let mut session = DragSession::new(config.clone());
        let mut pointer = PointerDrag::new(&config);

        let start = geometry.cell_rect(GridCoord::new(1, 1)).center();
        assert!(pointer.pointer_down(&session, &rack, start, 0));
        let armed = pointer.tick(&mut session, &mut rack, 250).unwrap();
        assert_eq!(armed, PointerAction::Armed { count: 1 });

        let over = geometry.cell_rect(GridCoord::new(3, 2)).center();
        let hover = pointer
            .pointer_move(&mut session, &mut rack, over, 400)
            .unwrap();
        assert_eq!(
            hover,
            PointerAction::Hover { candidate: Some(GridCoord::new(3, 2)), allowed: true }
        );

        let outcome = pointer.pointer_up(&mut session, &mut rack).unwrap();
        let pending = outcome.and_then(DropOutcome::into_pending).unwrap();
        assert_eq!(pending.records()[0].coord, GridCoord::new(3, 2));
        session.settle(&mut rack, pending, Ok::<(), ()>(()));
        assert!(rack.is_occupied(GridCoord::new(3, 2)));
    }

    #[test]
    fn press_on_empty_cell_is_ignored() {
        let mut rack = Container::<GlobalId>::grid(ContainerId(1), 2, 2);
        rack.layout_cells(&GridGeometry::default());
        let session = DragSession::default();
        let mut pointer = PointerDrag::new(&DragConfig::default());
        assert!(!pointer.pointer_down(&session, &rack, Point::new(10.0, 10.0), 0));
    }

    #[test]
    fn release_before_activation_drops_nothing() {
        let mut rack = Container::grid(ContainerId(1), 2, 2);
        rack.layout_cells(&GridGeometry::default());
        rack.put(GridCoord::new(1, 1), GlobalId::new(RecordKind::Sample, 1))
            .unwrap();
        let mut session = DragSession::default();
        let mut pointer = PointerDrag::new(&DragConfig::default());

        assert!(pointer.pointer_down(&session, &rack, Point::new(10.0, 10.0), 0));
        assert!(pointer.pointer_up(&mut session, &mut rack).unwrap().is_none());
        assert_eq!(session.phase(), DragPhase::Idle);
    }
}
