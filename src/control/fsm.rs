//! Finite state machines over a shared context.
//!
//! States are small value types (usually a fieldless enum) implementing
//! [`State`]. Transitions pair a source and a target state with a guard that
//! reads the context. The transition table is fixed when the machine is built.

use std::fmt;

/// Behavior attached to one state of a [`StateMachine`].
pub trait State<C>: Copy + PartialEq {
    /// Runs once per machine update while this state is active.
    fn update(&self, context: &mut C);

    /// Runs when the machine switches into this state.
    fn enter(&self, _context: &mut C) {}

    /// Runs when the machine switches away from this state.
    fn exit(&self, _context: &mut C) {}
}

/// Boolean predicate gating a transition.
pub type Guard<C> = Box<dyn Fn(&C) -> bool>;

/// A guarded edge between two states.
pub struct Transition<S, C> {
    from: S,
    to: S,
    guard: Guard<C>,
}

impl<S: Copy, C> Transition<S, C> {
    /// The state this transition leaves.
    pub fn source(&self) -> S {
        self.from
    }

    /// The state this transition enters.
    pub fn target(&self) -> S {
        self.to
    }

    /// Evaluates the guard.
    pub fn may_perform(&self, context: &C) -> bool {
        (self.guard)(context)
    }
}

impl<S: fmt::Debug, C> fmt::Debug for Transition<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// A machine with exactly one active state.
///
/// [`StateMachine::update`] runs the active state, then applies at most one
/// transition: the first registered one leaving the active state whose guard
/// holds.
pub struct StateMachine<S, C> {
    active_state: S,
    transitions: Vec<Transition<S, C>>,
}

impl<S: State<C>, C> StateMachine<S, C> {
    /// Creates a machine in `initial` without any transitions.
    ///
    /// The `enter` hook of `initial` is not run; use
    /// [`StateMachine::set_active_state`] for that.
    pub fn new(initial: S) -> Self {
        Self {
            active_state: initial,
            transitions: Vec::new(),
        }
    }

    /// Registers a transition. Transitions are tried in registration order.
    #[must_use]
    pub fn with_transition<G>(mut self, from: S, to: S, guard: G) -> Self
    where
        G: Fn(&C) -> bool + 'static,
    {
        self.transitions.push(Transition {
            from,
            to,
            guard: Box::new(guard),
        });
        self
    }

    /// The active state.
    pub fn active_state(&self) -> S {
        self.active_state
    }

    /// Registered transitions, in evaluation order.
    pub fn transitions(&self) -> &[Transition<S, C>] {
        &self.transitions
    }

    /// Switches to `state`, running the `exit` hook of the old state and the
    /// `enter` hook of the new one.
    pub fn set_active_state(&mut self, state: S, context: &mut C) {
        self.active_state.exit(context);
        state.enter(context);
        self.active_state = state;
    }

    /// Runs the active state, then applies the first matching transition.
    ///
    /// Returns the entered state if a transition fired.
    pub fn update(&mut self, context: &mut C) -> Option<S> {
        self.active_state.update(context);

        let target = self
            .transitions
            .iter()
            .find(|t| t.from == self.active_state && t.may_perform(context))
            .map(|t| t.to)?;

        self.set_active_state(target, context);
        Some(target)
    }
}

impl<S: fmt::Debug, C> fmt::Debug for StateMachine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("active_state", &self.active_state)
            .field("transitions", &self.transitions)
            .finish()
    }
}
