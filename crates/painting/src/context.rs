//! Shared brush state: active color, stamp, size and the paint-enabled toggle
//!
//! Every value is a last-writer-wins broadcast backed by a
//! [`tokio::sync::watch`] channel. The channels need no async runtime:
//! writers call the setters, each engine holds a [`ContextSubscription`]
//! and reads the most recent value when it stamps. Dropping the
//! subscription unregisters the engine.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};
use wallpaint_config::PaintConfig;

use crate::stamp::BrushStamp;

/// Process-wide brush state shared by every paint surface
pub struct PaintContext {
    color: watch::Sender<[f32; 4]>,
    stamp: watch::Sender<Option<Arc<BrushStamp>>>,
    brush_size: watch::Sender<f32>,
    toggle: watch::Sender<f32>,
}

impl PaintContext {
    /// Create a context with no external stamp selected
    pub fn new(color: [f32; 4], brush_size: f32, toggle: f32) -> Self {
        Self {
            color: watch::Sender::new(color),
            stamp: watch::Sender::new(None),
            brush_size: watch::Sender::new(brush_size),
            toggle: watch::Sender::new(toggle),
        }
    }

    pub fn from_config(config: &PaintConfig) -> Self {
        Self::new(
            config.initial_color,
            config.initial_brush_size,
            config.initial_toggle,
        )
    }

    /// Broadcast a new active color
    pub fn set_color(&self, color: impl Into<[f32; 4]>) {
        let color = color.into();
        self.color.send_replace(color);
        debug!("Selected color: {:?}", color);
    }

    pub fn color(&self) -> [f32; 4] {
        *self.color.borrow()
    }

    /// Select an externally supplied brush stamp
    pub fn set_brush_stamp(&self, stamp: Arc<BrushStamp>) {
        info!("Brush stamp set to: {}", stamp.name());
        self.stamp.send_replace(Some(stamp));
    }

    /// The selected stamp, None until one has been selected
    pub fn brush_stamp(&self) -> Option<Arc<BrushStamp>> {
        self.stamp.borrow().clone()
    }

    /// Set the brush size scale (nominal range 0..=10)
    pub fn set_brush_size(&self, scale: f32) {
        self.brush_size.send_replace(scale);
        debug!("Brush size scale: {}", scale);
    }

    pub fn brush_size(&self) -> f32 {
        *self.brush_size.borrow()
    }

    /// Set the raw toggle value as a slider reports it (0.0 or 1.0)
    pub fn set_toggle_value(&self, value: f32) {
        self.toggle.send_replace(value);
    }

    pub fn set_paint_enabled(&self, enabled: bool) {
        self.set_toggle_value(if enabled { 1.0 } else { 0.0 });
    }

    pub fn toggle_value(&self) -> f32 {
        *self.toggle.borrow()
    }

    /// Register a new listener for all four values
    pub fn subscribe(&self) -> ContextSubscription {
        ContextSubscription {
            color: self.color.subscribe(),
            stamp: self.stamp.subscribe(),
            brush_size: self.brush_size.subscribe(),
            toggle: self.toggle.subscribe(),
        }
    }

    /// Listen to color changes only (e.g. to tint brush buttons)
    pub fn watch_color(&self) -> watch::Receiver<[f32; 4]> {
        self.color.subscribe()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.toggle.receiver_count()
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::from_config(&PaintConfig::default())
    }
}

/// One listener's view of a [`PaintContext`]
#[derive(Debug)]
pub struct ContextSubscription {
    color: watch::Receiver<[f32; 4]>,
    stamp: watch::Receiver<Option<Arc<BrushStamp>>>,
    brush_size: watch::Receiver<f32>,
    toggle: watch::Receiver<f32>,
}

impl ContextSubscription {
    pub fn color(&self) -> [f32; 4] {
        *self.color.borrow()
    }

    pub fn brush_stamp(&self) -> Option<Arc<BrushStamp>> {
        self.stamp.borrow().clone()
    }

    pub fn brush_size(&self) -> f32 {
        *self.brush_size.borrow()
    }

    pub fn toggle_value(&self) -> f32 {
        *self.toggle.borrow()
    }

    /// The toggle value if it was written since the last call.
    ///
    /// A write of the same value still counts as a change.
    pub fn poll_toggle(&mut self) -> Option<f32> {
        match self.toggle.has_changed() {
            Ok(true) => Some(*self.toggle.borrow_and_update()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba8;

    #[test]
    fn test_defaults_from_config() {
        let context = PaintContext::default();
        assert_eq!(context.color(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(context.brush_size(), 1.0);
        assert_eq!(context.toggle_value(), 1.0);
        assert!(context.brush_stamp().is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let context = PaintContext::default();
        let subscription = context.subscribe();

        context.set_color(Rgba8::RED);
        context.set_color([0.0, 0.0, 1.0, 1.0]);
        context.set_brush_size(3.0);

        assert_eq!(subscription.color(), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(subscription.brush_size(), 3.0);
    }

    #[test]
    fn test_stamp_broadcast_shares_instance() {
        let context = PaintContext::default();
        let a = context.subscribe();
        let b = context.subscribe();

        let stamp = Arc::new(BrushStamp::hard_square(8));
        context.set_brush_stamp(stamp.clone());

        assert!(Arc::ptr_eq(&a.brush_stamp().unwrap(), &stamp));
        assert!(Arc::ptr_eq(&b.brush_stamp().unwrap(), &stamp));
    }

    #[test]
    fn test_poll_toggle() {
        let context = PaintContext::default();
        let mut subscription = context.subscribe();
        assert_eq!(subscription.poll_toggle(), None);

        context.set_paint_enabled(false);
        assert_eq!(subscription.poll_toggle(), Some(0.0));
        assert_eq!(subscription.poll_toggle(), None);

        context.set_toggle_value(0.0);
        assert_eq!(subscription.poll_toggle(), Some(0.0));
    }

    #[test]
    fn test_dropping_subscription_unregisters() {
        let context = PaintContext::default();
        let a = context.subscribe();
        let b = context.subscribe();
        assert_eq!(context.subscriber_count(), 2);
        drop(a);
        assert_eq!(context.subscriber_count(), 1);
        drop(b);
        assert_eq!(context.subscriber_count(), 0);
        // Writes with no listeners are kept for future subscribers
        context.set_brush_size(7.0);
        assert_eq!(context.subscribe().brush_size(), 7.0);
    }

    #[test]
    fn test_watch_color() {
        let context = PaintContext::default();
        let mut rx = context.watch_color();
        context.set_color(Rgba8::GREEN);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), [0.0, 1.0, 0.0, 1.0]);
    }
}
