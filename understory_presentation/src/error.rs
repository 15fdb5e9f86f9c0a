// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for view loading and presentation.
//!
//! No error is retried. A [`ViewLoadError`] surfaces to whichever operation
//! triggered the load, and an [`InvariantViolation`] is reported before any
//! lifecycle hook of the rejected operation fires.

use alloc::string::String;

use thiserror::Error;

use crate::types::ControllerId;

/// The view-loading hook failed to produce a view.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ViewLoadError {
    /// The controller has no markup location and does not build its view itself.
    #[error("no markup location configured")]
    NoLocation,
    /// A markup location is configured but no loader is installed.
    #[error("no view loader installed for `{location}`")]
    NoLoader {
        /// Location that could not be loaded.
        location: String,
    },
    /// The markup document does not exist.
    #[error("markup resource `{location}` not found")]
    MissingResource {
        /// Location that was requested.
        location: String,
    },
    /// The markup document exists but could not be parsed.
    #[error("malformed markup in `{location}`: {reason}")]
    Malformed {
        /// Location of the offending document.
        location: String,
        /// Loader-specific description.
        reason: String,
    },
    /// A reference declared in the markup could not be bound to its controller.
    #[error("cannot bind `{reference}` declared in `{location}`")]
    Binding {
        /// Location of the offending document.
        location: String,
        /// Name of the unresolved reference.
        reference: String,
    },
}

/// An operation would corrupt the presentation chain and was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The id does not refer to a live controller.
    #[error("controller {0:?} is not alive")]
    StaleController(ControllerId),
    /// A controller was asked to present itself.
    #[error("controller {0:?} cannot present itself")]
    PresentSelf(ControllerId),
    /// The presenter already presents another controller.
    #[error("controller {presenter:?} already presents {presented:?}")]
    AlreadyPresenting {
        /// Controller asked to present.
        presenter: ControllerId,
        /// Controller it currently presents.
        presented: ControllerId,
    },
    /// The target presents a controller of its own.
    #[error("controller {target:?} presents {presented:?} and cannot be presented")]
    TargetPresenting {
        /// Controller that was to be presented.
        target: ControllerId,
        /// Controller it currently presents.
        presented: ControllerId,
    },
    /// The target is already presented by another controller.
    #[error("controller {target:?} is already presented by {presenter:?}")]
    TargetPresented {
        /// Controller that was to be presented.
        target: ControllerId,
        /// Controller currently presenting it.
        presenter: ControllerId,
    },
    /// The controller is still part of a presentation chain.
    #[error("controller {0:?} is still linked into a presentation chain")]
    StillLinked(ControllerId),
}

/// Failure of a hierarchy operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PresentationError {
    /// Loading a view required by the operation failed.
    #[error("failed to load view of controller {id:?}")]
    ViewLoad {
        /// Controller whose view failed to load.
        id: ControllerId,
        /// Underlying loader failure.
        #[source]
        source: ViewLoadError,
    },
    /// The operation was rejected to keep the chain well-formed.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}
