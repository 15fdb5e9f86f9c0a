// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for stage operations.

use thiserror::Error;
use understory_presentation::error::{InvariantViolation, PresentationError};
use understory_presentation::types::ControllerId;

/// Failure of a [`StageController`](crate::stage::StageController) operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StageError {
    /// The operation needs a root controller and none is installed.
    #[error("no root view controller installed")]
    NoRoot,
    /// The controller is not part of the chain shown in this window.
    #[error("controller {0:?} is not displayed by this stage")]
    NotDisplayed(ControllerId),
    /// The installed root controller cannot be removed.
    #[error("controller {0:?} is the root view controller")]
    RootInUse(ControllerId),
    /// The underlying hierarchy rejected the operation.
    #[error(transparent)]
    Presentation(#[from] PresentationError),
}

impl From<InvariantViolation> for StageError {
    fn from(err: InvariantViolation) -> Self {
        Self::Presentation(err.into())
    }
}
