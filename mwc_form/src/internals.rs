// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The form side of a form-associated control.

use crate::value::FormValue;

/// Receives a control's value and state whenever they may have changed.
///
/// `None` means the control contributes nothing, as an unchecked checkbox.
pub trait FormInternals {
    /// Replace the submitted value and the saved state.
    fn set_form_value(&mut self, _value: Option<&FormValue>, _state: Option<&FormValue>) {}
}

/// Internals that drop every update.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopInternals;

impl FormInternals for NoopInternals {}

/// Internals that keep the last pushed value and state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InMemoryInternals {
    value: Option<FormValue>,
    state: Option<FormValue>,
    pushes: usize,
}

impl InMemoryInternals {
    /// Nothing pushed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last submitted value.
    pub fn value(&self) -> Option<&FormValue> {
        self.value.as_ref()
    }

    /// Last saved state.
    pub fn state(&self) -> Option<&FormValue> {
        self.state.as_ref()
    }

    /// How many times a value was pushed.
    pub fn push_count(&self) -> usize {
        self.pushes
    }
}

impl FormInternals for InMemoryInternals {
    fn set_form_value(&mut self, value: Option<&FormValue>, state: Option<&FormValue>) {
        self.value = value.cloned();
        self.state = state.cloned();
        self.pushes += 1;
    }
}
