//! Space view abstraction - base trait for all dockable views

use std::time::Duration;
use egui::Ui;
use uuid::Uuid;

use crate::ViewerContext;

/// Unique identifier for a space view
pub type SpaceViewId = Uuid;

/// Base trait for all space views (charts, tables)
pub trait SpaceView: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> SpaceViewId;

    /// Get the display name
    fn display_name(&self) -> &str;

    /// Get the view type
    fn view_type(&self) -> &str;

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui);

    /// Called each frame before drawing
    fn on_frame_update(&mut self, _ctx: &ViewerContext, _dt: Duration) {}

    /// Get as any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;
}
