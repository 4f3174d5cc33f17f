// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types of the plotter.

use scout_scene::{PrimitiveId, SceneError};
use scout_spline::SplineError;
use thiserror::Error;

/// A registration that would break the one-to-one primitive/node mapping.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The primitive is already registered.
    #[error("primitive {0} is already registered")]
    DuplicatePrimitive(PrimitiveId),
    /// The node already has a live primitive.
    #[error("node already has primitive {0}")]
    DuplicateNode(PrimitiveId),
}

/// Any failure surfaced by the [`Plotter`](crate::Plotter).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PlotError {
    /// Malformed spline input.
    #[error(transparent)]
    Spline(#[from] SplineError),
    /// The rendering backend failed.
    #[error(transparent)]
    Scene(#[from] SceneError),
    /// Registry contract violation.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_primitive() {
        let id = PrimitiveId::new(2, 5);
        assert_eq!(
            RegistryError::DuplicateNode(id).to_string(),
            "node already has primitive 2v5"
        );
        let err: PlotError = SceneError::StalePrimitive(id).into();
        assert_eq!(err.to_string(), "primitive 2v5 is not alive");
    }
}
