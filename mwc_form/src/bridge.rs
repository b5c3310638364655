// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pairs a control with its form internals and keeps them in step.

use alloc::string::String;

use tracing::{debug, trace};

use crate::error::FormError;
use crate::internals::FormInternals;
use crate::value::{FormData, FormEntry, FormEntryValue, FormValue, StateShape};

/// A control that takes part in form submission, reset, and restoration.
pub trait FormAssociated {
    /// The value submitted with the form, `None` to submit nothing.
    fn form_value(&self) -> Option<FormValue>;

    /// The state saved for restoration. Defaults to the value.
    fn form_state(&self) -> Option<FormValue> {
        self.form_value()
    }

    /// Go back to the value declared by attributes.
    fn form_reset(&mut self);

    /// Restore from a saved text or file.
    fn restore_primitive(&mut self, state: &FormValue) -> Result<(), FormError> {
        Err(FormError::UnsupportedState(state.shape()))
    }

    /// Restore from a saved entry list.
    fn restore_entries(&mut self, _entries: &[FormEntry]) -> Result<(), FormError> {
        Err(FormError::UnsupportedState(StateShape::Entries))
    }

    /// An attribute other than `name` or `disabled` changed.
    fn attribute_changed(&mut self, _name: &str, _value: Option<&str>) {}

    /// The control's form name changed.
    fn name_changed(&mut self, _name: Option<&str>) {}
}

/// Keeps a control's form value current.
///
/// Every mutation that goes through the bridge recomputes the control's value
/// and state and pushes both to the internals before returning, so a submit
/// handler running right after sees the new value.
#[derive(Debug)]
pub struct FormBridge<C, I> {
    control: C,
    internals: I,
    name: Option<String>,
    disabled: bool,
    connected: bool,
}

impl<C: FormAssociated, I: FormInternals> FormBridge<C, I> {
    /// A disconnected bridge. Nothing is pushed until [`connect`](Self::connect).
    pub fn new(control: C, internals: I) -> Self {
        Self {
            control,
            internals,
            name: None,
            disabled: false,
            connected: false,
        }
    }

    /// The control.
    pub fn control(&self) -> &C {
        &self.control
    }

    /// The internals.
    pub fn internals(&self) -> &I {
        &self.internals
    }

    /// Whether the bridge is connected.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Attach to the form and push the current value. Returns `false` if already
    /// connected.
    pub fn connect(&mut self) -> bool {
        if self.connected {
            return false;
        }
        self.connected = true;
        debug!(name = ?self.name, "form control connected");
        self.push();
        true
    }

    /// Detach from the form. Returns `false` if not connected.
    pub fn disconnect(&mut self) -> bool {
        let was_connected = self.connected;
        self.connected = false;
        was_connected
    }

    /// The form name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the form name and push.
    pub fn set_name(&mut self, name: Option<&str>) {
        self.name = name.map(String::from);
        self.control.name_changed(name);
        self.push();
    }

    /// Whether the control is disabled.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Disable or enable the control and push.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.push();
    }

    /// Mutate the control and push.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut C) -> R) -> R {
        let result = f(&mut self.control);
        self.push();
        result
    }

    /// An attribute changed on the host element.
    ///
    /// `name` and `disabled` update the bridge; everything else goes to the
    /// control. Either way the value is pushed.
    pub fn attribute_changed(&mut self, name: &str, value: Option<&str>) {
        match name {
            "name" => self.set_name(value),
            "disabled" => self.set_disabled(value.is_some()),
            _ => {
                self.control.attribute_changed(name, value);
                self.push();
            }
        }
    }

    /// The owning form was reset.
    pub fn form_reset(&mut self) {
        self.control.form_reset();
        debug!(name = ?self.name, "form control reset");
        self.push();
    }

    /// The browser restored saved state.
    ///
    /// Text and files take the primitive path, entry lists the entry path.
    pub fn form_state_restore(&mut self, state: &FormValue) -> Result<(), FormError> {
        match state {
            FormValue::Text(_) | FormValue::File(_) => self.control.restore_primitive(state)?,
            FormValue::Entries(entries) => self.control.restore_entries(entries)?,
        }
        trace!(shape = ?state.shape(), "form state restored");
        self.push();
        Ok(())
    }

    /// Add the control's entries to `data`.
    ///
    /// Disabled controls and, for single values, unnamed controls add nothing.
    pub fn append_to(&self, data: &mut FormData) {
        if self.disabled {
            return;
        }
        match self.control.form_value() {
            None => {}
            Some(FormValue::Entries(entries)) => {
                for entry in entries {
                    data.append(entry.name, entry.value);
                }
            }
            Some(FormValue::Text(text)) => {
                if let Some(name) = self.named() {
                    data.append(name, FormEntryValue::Text(text));
                }
            }
            Some(FormValue::File(file)) => {
                if let Some(name) = self.named() {
                    data.append(name, FormEntryValue::File(file));
                }
            }
        }
    }

    fn named(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    fn push(&mut self) {
        if !self.connected {
            return;
        }
        let value = self.control.form_value();
        let state = self.control.form_state();
        trace!(?value, "form value pushed");
        self.internals.set_form_value(value.as_ref(), state.as_ref());
    }
}

/// Build the entry list for a set of bridges, in order.
pub fn collect_form_data<'a, C, I>(
    bridges: impl IntoIterator<Item = &'a FormBridge<C, I>>,
) -> FormData
where
    C: FormAssociated + 'a,
    I: FormInternals + 'a,
{
    let mut data = FormData::new();
    for bridge in bridges {
        bridge.append_to(&mut data);
    }
    data
}
