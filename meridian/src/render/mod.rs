//! Raster drawing surface used by symbolizers.
//!
//! [`RasterContext`] is a minimal immediate-mode 2d context in screen pixels with a save/restore state
//! stack. State changes that must only affect a few draw calls are made through the scoped guards
//! [`SavedState`] and [`AlphaScope`], which undo the change when dropped on every exit path.

mod pixmap;

pub use pixmap::PixmapContext;

use crate::decoded_image::DecodedImage;
use crate::error::RenderError;
use std::ops::{Deref, DerefMut};

/// 2d raster drawing context.
pub trait RasterContext {
    /// Pushes the current transform and global alpha onto the state stack.
    fn save(&mut self);
    /// Pops the state saved by the last [`RasterContext::save`] call. Does nothing if the stack is
    /// empty.
    fn restore(&mut self);
    /// Moves the origin of the coordinate system.
    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotates the coordinate system clockwise (on screen) by `angle` radians around the origin.
    fn rotate(&mut self, angle: f64);
    /// Opacity multiplier applied to everything drawn.
    fn global_alpha(&self) -> f64;
    /// Sets the opacity multiplier.
    fn set_global_alpha(&mut self, alpha: f64);
    /// Draws the image scaled into the rectangle with top-left corner at `(x, y)`.
    fn draw_image(
        &mut self,
        image: &DecodedImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), RenderError>;
}

/// Saves the context state when created and restores it when dropped.
pub struct SavedState<'a, C: RasterContext + ?Sized> {
    context: &'a mut C,
}

impl<'a, C: RasterContext + ?Sized> SavedState<'a, C> {
    /// Saves the state of the context.
    pub fn new(context: &'a mut C) -> Self {
        context.save();
        Self { context }
    }
}

impl<C: RasterContext + ?Sized> Deref for SavedState<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.context
    }
}

impl<C: RasterContext + ?Sized> DerefMut for SavedState<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.context
    }
}

impl<C: RasterContext + ?Sized> Drop for SavedState<'_, C> {
    fn drop(&mut self) {
        self.context.restore();
    }
}

/// Multiplies the global alpha of the context by an opacity and puts the previous value back when
/// dropped.
///
/// Opacity of `1.0` or more leaves the context untouched.
pub struct AlphaScope<'a, C: RasterContext + ?Sized> {
    context: &'a mut C,
    prior: Option<f64>,
}

impl<'a, C: RasterContext + ?Sized> AlphaScope<'a, C> {
    /// Applies the opacity to the context.
    pub fn new(context: &'a mut C, opacity: f64) -> Self {
        let prior = if opacity < 1.0 {
            let alpha = context.global_alpha();
            context.set_global_alpha(alpha * opacity);
            Some(alpha)
        } else {
            None
        };

        Self { context, prior }
    }
}

impl<C: RasterContext + ?Sized> Deref for AlphaScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.context
    }
}

impl<C: RasterContext + ?Sized> DerefMut for AlphaScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.context
    }
}

impl<C: RasterContext + ?Sized> Drop for AlphaScope<'_, C> {
    fn drop(&mut self) {
        if let Some(alpha) = self.prior {
            self.context.set_global_alpha(alpha);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Operation recorded by [`RecordingContext`].
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Op {
        Save,
        Restore,
        Translate(f64, f64),
        Rotate(f64),
        Alpha(f64),
        Draw {
            x: f64,
            y: f64,
            width: f64,
            height: f64,
            alpha: f64,
        },
    }

    /// Context that records every call.
    #[derive(Debug)]
    pub(crate) struct RecordingContext {
        pub ops: Vec<Op>,
        pub alpha: f64,
        pub depth: usize,
        pub saved_alpha: Vec<f64>,
        pub fail_draws: bool,
    }

    impl Default for RecordingContext {
        fn default() -> Self {
            Self {
                ops: vec![],
                alpha: 1.0,
                depth: 0,
                saved_alpha: vec![],
                fail_draws: false,
            }
        }
    }

    impl RecordingContext {
        pub fn draws(&self) -> Vec<Op> {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::Draw { .. }))
                .cloned()
                .collect()
        }
    }

    impl RasterContext for RecordingContext {
        fn save(&mut self) {
            self.depth += 1;
            self.saved_alpha.push(self.alpha);
            self.ops.push(Op::Save);
        }

        fn restore(&mut self) {
            if let Some(alpha) = self.saved_alpha.pop() {
                self.depth -= 1;
                self.alpha = alpha;
            }
            self.ops.push(Op::Restore);
        }

        fn translate(&mut self, dx: f64, dy: f64) {
            self.ops.push(Op::Translate(dx, dy));
        }

        fn rotate(&mut self, angle: f64) {
            self.ops.push(Op::Rotate(angle));
        }

        fn global_alpha(&self) -> f64 {
            self.alpha
        }

        fn set_global_alpha(&mut self, alpha: f64) {
            self.alpha = alpha;
            self.ops.push(Op::Alpha(alpha));
        }

        fn draw_image(
            &mut self,
            _image: &DecodedImage,
            x: f64,
            y: f64,
            width: f64,
            height: f64,
        ) -> Result<(), RenderError> {
            if self.fail_draws {
                return Err(RenderError::InvalidDrawArea);
            }

            self.ops.push(Op::Draw {
                x,
                y,
                width,
                height,
                alpha: self.alpha,
            });
            Ok(())
        }
    }

    #[test]
    fn saved_state_restores_on_drop() {
        let mut context = RecordingContext::default();
        {
            let mut saved = SavedState::new(&mut context);
            saved.rotate(1.0);
            assert_eq!(saved.depth, 1);
        }
        assert_eq!(context.depth, 0);
        assert_eq!(context.ops, vec![Op::Save, Op::Rotate(1.0), Op::Restore]);
    }

    #[test]
    fn alpha_scope_restores_prior_alpha() {
        let mut context = RecordingContext {
            alpha: 0.8,
            ..Default::default()
        };
        {
            let scope = AlphaScope::new(&mut context, 0.5);
            assert!((scope.global_alpha() - 0.4).abs() < 1e-12);
        }
        assert_eq!(context.alpha, 0.8);

        context.ops.clear();
        {
            let _scope = AlphaScope::new(&mut context, 1.0);
        }
        assert!(context.ops.is_empty());
    }
}
