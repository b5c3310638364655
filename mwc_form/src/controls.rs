// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-bearing controls.
//!
//! Each control separates its live value from the default declared by its
//! attributes. Attribute changes move the default, and the live value follows
//! until the user edits it. A form reset copies the default back.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;

use crate::bridge::FormAssociated;
use crate::error::FormError;
use crate::value::{FormEntry, FormEntryValue, FormValue, StateShape};

/// A single-line text field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextFieldControl {
    value: String,
    default_value: String,
    dirty: bool,
}

impl TextFieldControl {
    /// An empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// The live value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the live value, as the user typing would.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }
}

impl FormAssociated for TextFieldControl {
    fn form_value(&self) -> Option<FormValue> {
        Some(FormValue::Text(self.value.clone()))
    }

    fn form_reset(&mut self) {
        self.value.clone_from(&self.default_value);
        self.dirty = false;
    }

    fn restore_primitive(&mut self, state: &FormValue) -> Result<(), FormError> {
        match state {
            FormValue::Text(text) => {
                self.set_value(text.as_str());
                Ok(())
            }
            _ => Err(FormError::UnsupportedState(state.shape())),
        }
    }

    fn attribute_changed(&mut self, name: &str, value: Option<&str>) {
        if name == "value" {
            self.default_value = value.unwrap_or_default().to_string();
            if !self.dirty {
                self.value.clone_from(&self.default_value);
            }
        }
    }
}

/// A checkbox or switch.
///
/// Submits its `value` (default `"on"`) only while checked. Its saved state is
/// `"true"` or `"false"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckboxControl {
    checked: bool,
    default_checked: bool,
    value: String,
    dirty: bool,
}

impl Default for CheckboxControl {
    fn default() -> Self {
        Self {
            checked: false,
            default_checked: false,
            value: "on".to_string(),
            dirty: false,
        }
    }
}

impl CheckboxControl {
    /// An unchecked checkbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether it is checked.
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Check or uncheck it, as a click would.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
        self.dirty = true;
    }
}

impl FormAssociated for CheckboxControl {
    fn form_value(&self) -> Option<FormValue> {
        self.checked.then(|| FormValue::Text(self.value.clone()))
    }

    fn form_state(&self) -> Option<FormValue> {
        Some(FormValue::Text(self.checked.to_string()))
    }

    fn form_reset(&mut self) {
        self.checked = self.default_checked;
        self.dirty = false;
    }

    fn restore_primitive(&mut self, state: &FormValue) -> Result<(), FormError> {
        match state.as_text() {
            Some(text) => {
                self.set_checked(text == "true");
                Ok(())
            }
            None => Err(FormError::UnsupportedState(state.shape())),
        }
    }

    fn attribute_changed(&mut self, name: &str, value: Option<&str>) {
        match name {
            "checked" => {
                self.default_checked = value.is_some();
                if !self.dirty {
                    self.checked = self.default_checked;
                }
            }
            "value" => self.value = value.unwrap_or("on").to_string(),
            _ => {}
        }
    }
}

/// A slider, optionally with two handles.
///
/// A single slider submits its value under the control name. A range slider
/// submits two entries, named by its `name-start` and `name-end` attributes and
/// falling back to the control name.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderControl {
    min: f64,
    max: f64,
    range: bool,
    value: f64,
    value_start: f64,
    value_end: f64,
    defaults: [f64; 3],
    name: Option<String>,
    name_start: Option<String>,
    name_end: Option<String>,
    dirty: bool,
}

impl Default for SliderControl {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

impl SliderControl {
    /// A single-handle slider from `min` to `max`, at the midpoint.
    ///
    /// A bound that is not finite falls back to 0 for `min` and 100 for `max`.
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() { min } else { 0.0 };
        let max = if max.is_finite() { max } else { 100.0 };
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let middle = min + (max - min) / 2.0;
        Self {
            min,
            max,
            range: false,
            value: middle,
            value_start: min,
            value_end: max,
            defaults: [middle, min, max],
            name: None,
            name_start: None,
            name_end: None,
            dirty: false,
        }
    }

    /// A two-handle slider from `min` to `max`, spanning the whole track.
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            range: true,
            ..Self::new(min, max)
        }
    }

    /// Whether the slider has two handles.
    pub fn is_range(&self) -> bool {
        self.range
    }

    /// The single handle's value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The two handles' values.
    pub fn values(&self) -> (f64, f64) {
        (self.value_start, self.value_end)
    }

    /// Move the single handle, clamped to the track.
    pub fn set_value(&mut self, value: f64) {
        self.value = self.clamp(value);
        self.dirty = true;
    }

    /// Move both handles, clamped to the track and ordered.
    pub fn set_values(&mut self, start: f64, end: f64) {
        let (start, end) = (self.clamp(start), self.clamp(end));
        self.value_start = start.min(end);
        self.value_end = start.max(end);
        self.dirty = true;
    }

    fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    fn entry_name(&self, own: Option<&String>) -> String {
        own.or(self.name.as_ref()).cloned().unwrap_or_default()
    }
}

fn parse_number(text: &str, shape: StateShape) -> Result<f64, FormError> {
    text.trim().parse().map_err(|_| FormError::MalformedState {
        shape,
        reason: "not a number",
    })
}

impl FormAssociated for SliderControl {
    fn form_value(&self) -> Option<FormValue> {
        if !self.range {
            return Some(FormValue::Text(format!("{}", self.value)));
        }
        Some(FormValue::Entries(vec![
            FormEntry::text(
                self.entry_name(self.name_start.as_ref()),
                format!("{}", self.value_start),
            ),
            FormEntry::text(
                self.entry_name(self.name_end.as_ref()),
                format!("{}", self.value_end),
            ),
        ]))
    }

    fn form_reset(&mut self) {
        let [value, start, end] = self.defaults;
        self.value = value;
        self.value_start = start;
        self.value_end = end;
        self.dirty = false;
    }

    fn restore_primitive(&mut self, state: &FormValue) -> Result<(), FormError> {
        let Some(text) = state.as_text() else {
            return Err(FormError::UnsupportedState(state.shape()));
        };
        if self.range {
            return Err(FormError::UnsupportedState(StateShape::Text));
        }
        let value = parse_number(text, StateShape::Text)?;
        self.set_value(value);
        Ok(())
    }

    fn restore_entries(&mut self, entries: &[FormEntry]) -> Result<(), FormError> {
        if !self.range {
            return Err(FormError::UnsupportedState(StateShape::Entries));
        }
        let malformed = FormError::MalformedState {
            shape: StateShape::Entries,
            reason: "expected two text entries",
        };
        let [start, end] = entries else {
            return Err(malformed);
        };
        let (FormEntryValue::Text(start), FormEntryValue::Text(end)) = (&start.value, &end.value)
        else {
            return Err(malformed);
        };
        let start = parse_number(start, StateShape::Entries)?;
        let end = parse_number(end, StateShape::Entries)?;
        self.set_values(start, end);
        Ok(())
    }

    fn attribute_changed(&mut self, name: &str, value: Option<&str>) {
        let number = value.and_then(|value| value.trim().parse::<f64>().ok());
        let slot = match name {
            "name-start" => {
                self.name_start = value.map(String::from);
                return;
            }
            "name-end" => {
                self.name_end = value.map(String::from);
                return;
            }
            "value" => 0,
            "value-start" => 1,
            "value-end" => 2,
            _ => return,
        };
        let Some(number) = number else {
            return;
        };
        self.defaults[slot] = self.clamp(number);
        if !self.dirty {
            self.form_reset();
        }
    }

    fn name_changed(&mut self, name: Option<&str>) {
        self.name = name.map(String::from);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_value_follows_attribute_until_edited() {
        let mut field = TextFieldControl::new();
        field.attribute_changed("value", Some("draft"));
        assert_eq!(field.value(), "draft");
        field.set_value("edited");
        field.attribute_changed("value", Some("newer"));
        assert_eq!(field.value(), "edited");
        field.form_reset();
        assert_eq!(field.value(), "newer");
    }

    #[test]
    fn checkbox_submits_only_when_checked() {
        let mut checkbox = CheckboxControl::new();
        assert_eq!(checkbox.form_value(), None);
        assert_eq!(checkbox.form_state(), Some(FormValue::text("false")));
        checkbox.attribute_changed("value", Some("yes"));
        checkbox.set_checked(true);
        assert_eq!(checkbox.form_value(), Some(FormValue::text("yes")));
        assert_eq!(checkbox.form_state(), Some(FormValue::text("true")));
    }

    #[test]
    fn checkbox_restores_from_state_text() {
        let mut checkbox = CheckboxControl::new();
        checkbox.restore_primitive(&FormValue::text("true")).unwrap();
        assert!(checkbox.checked());
        checkbox.attribute_changed("checked", Some(""));
        checkbox.set_checked(false);
        checkbox.form_reset();
        assert!(checkbox.checked());
    }

    #[test]
    fn slider_clamps_and_orders_handles() {
        let mut slider = SliderControl::range(0.0, 10.0);
        slider.set_values(12.0, 3.0);
        assert_eq!(slider.values(), (3.0, 10.0));
        let mut single = SliderControl::new(0.0, 10.0);
        assert_eq!(single.value(), 5.0);
        single.set_value(-4.0);
        assert_eq!(single.value(), 0.0);
        single.set_value(f64::NAN);
        assert_eq!(single.value(), 0.0);
    }

    #[test]
    fn slider_replaces_non_finite_bounds() {
        let mut slider = SliderControl::new(f64::NAN, 10.0);
        assert_eq!(slider.value(), 5.0);
        slider.set_value(20.0);
        assert_eq!(slider.value(), 10.0);

        let mut open = SliderControl::range(f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(open.values(), (0.0, 100.0));
        open.set_values(-1.0, f64::NAN);
        assert_eq!(open.values(), (0.0, 0.0));
    }

    #[test]
    fn range_slider_submits_named_entries() {
        let mut slider = SliderControl::range(0.0, 100.0);
        slider.name_changed(Some("price"));
        slider.attribute_changed("name-end", Some("price-max"));
        slider.set_values(20.0, 80.0);
        assert_eq!(
            slider.form_value(),
            Some(FormValue::Entries(vec![
                FormEntry::text("price", "20"),
                FormEntry::text("price-max", "80"),
            ]))
        );
    }

    #[test]
    fn slider_attribute_defaults_drive_reset() {
        let mut slider = SliderControl::new(0.0, 100.0);
        slider.attribute_changed("value", Some("30"));
        assert_eq!(slider.value(), 30.0);
        slider.set_value(70.0);
        slider.attribute_changed("value", Some("40"));
        assert_eq!(slider.value(), 70.0);
        slider.form_reset();
        assert_eq!(slider.value(), 40.0);
        slider.attribute_changed("value", Some("nonsense"));
        assert_eq!(slider.value(), 40.0);
    }

    #[test]
    fn slider_restore_checks_shape_and_content() {
        let mut single = SliderControl::new(0.0, 100.0);
        single.restore_primitive(&FormValue::text("25")).unwrap();
        assert_eq!(single.value(), 25.0);
        assert_eq!(
            single.restore_primitive(&FormValue::text("wide")),
            Err(FormError::MalformedState {
                shape: StateShape::Text,
                reason: "not a number",
            })
        );
        assert_eq!(
            single.restore_entries(&[]),
            Err(FormError::UnsupportedState(StateShape::Entries))
        );

        let mut range = SliderControl::range(0.0, 100.0);
        range
            .restore_entries(&[FormEntry::text("a", "10"), FormEntry::text("b", "90")])
            .unwrap();
        assert_eq!(range.values(), (10.0, 90.0));
        assert!(range.restore_entries(&[FormEntry::text("a", "10")]).is_err());
    }
}
