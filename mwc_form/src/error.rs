// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::value::StateShape;

/// A saved state a control cannot take back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormError {
    /// The control has no restore path for this shape.
    #[error("control cannot restore {0:?} state")]
    UnsupportedState(StateShape),
    /// The shape is right but the content is not.
    #[error("malformed {shape:?} state: {reason}")]
    MalformedState {
        /// Shape of the rejected state.
        shape: StateShape,
        /// What was wrong with it.
        reason: &'static str,
    },
}
