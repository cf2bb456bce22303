//! [`GeometryConfig`] is the construction-time configuration shared by a geometry and its children.

use crate::measurer::{Measurer, PlanarMeasurer};
use std::sync::Arc;

/// Default number of vertices used to approximate a circle with a polygon.
pub const DEFAULT_SHELL_POINTS: usize = 60;

/// Default hit test tolerance in pixels.
pub const DEFAULT_HIT_TOLERANCE: f64 = 2.0;

/// Immutable configuration of a geometry.
///
/// Collections pass a clone of their own configuration to every element they construct, so all the
/// parts of a collection measure with the same [`Measurer`].
#[derive(Debug, Clone)]
pub struct GeometryConfig {
    measurer: Option<Arc<dyn Measurer>>,
    shell_points: usize,
    hit_tolerance: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            measurer: Some(Arc::new(PlanarMeasurer)),
            shell_points: DEFAULT_SHELL_POINTS,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
        }
    }
}

impl GeometryConfig {
    /// Configuration with a planar measurer and default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the measurer.
    pub fn with_measurer(self, measurer: Arc<dyn Measurer>) -> Self {
        Self {
            measurer: Some(measurer),
            ..self
        }
    }

    /// Removes the measurer. Geometries without a measurer have no extent and no shell.
    pub fn without_measurer(self) -> Self {
        Self {
            measurer: None,
            ..self
        }
    }

    /// Sets the number of vertices used to convert circles into polygons.
    pub fn with_shell_points(self, shell_points: usize) -> Self {
        Self {
            shell_points,
            ..self
        }
    }

    /// Sets the default hit test tolerance in pixels.
    pub fn with_hit_tolerance(self, hit_tolerance: f64) -> Self {
        Self {
            hit_tolerance,
            ..self
        }
    }

    /// Active measurer.
    pub fn measurer(&self) -> Option<&dyn Measurer> {
        self.measurer.as_deref()
    }

    /// Number of vertices of a circle shell.
    pub fn shell_points(&self) -> usize {
        self.shell_points
    }

    /// Hit test tolerance in pixels.
    pub fn hit_tolerance(&self) -> f64 {
        self.hit_tolerance
    }
}
