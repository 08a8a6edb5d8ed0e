//! Viewport - manages dockable space views

use std::collections::HashMap;
use std::time::Duration;
use egui::Ui;
use egui_dock::{DockArea, DockState, NodeIndex, TabViewer};
use uuid::Uuid;

use crate::plots::{
    AnimatedChoroplethView, ChoroplethView, TopPopulationView, TrendLineView, YearComparisonView,
};
use crate::{RawDataView, SpaceView, SpaceViewId, ViewerContext};

/// The chart area of the dashboard
pub struct Viewport {
    dock_state: DockState<SpaceViewId>,
    space_views: HashMap<SpaceViewId, Box<dyn SpaceView>>,
}

impl Viewport {
    /// Default layout: trend and ranking on top, the maps below, the
    /// comparison and raw data at the bottom right
    pub fn dashboard() -> Self {
        let trend: Box<dyn SpaceView> = Box::new(TrendLineView::new(Uuid::new_v4()));
        let top: Box<dyn SpaceView> = Box::new(TopPopulationView::new(Uuid::new_v4()));
        let map: Box<dyn SpaceView> = Box::new(ChoroplethView::new(Uuid::new_v4()));
        let animated: Box<dyn SpaceView> = Box::new(AnimatedChoroplethView::new(Uuid::new_v4()));
        let comparison: Box<dyn SpaceView> = Box::new(YearComparisonView::new(Uuid::new_v4()));
        let raw: Box<dyn SpaceView> = Box::new(RawDataView::new(Uuid::new_v4()));

        let mut dock_state = DockState::new(vec![trend.id()]);
        let surface = dock_state.main_surface_mut();
        let [upper, lower] = surface.split_below(NodeIndex::root(), 0.5, vec![map.id(), animated.id()]);
        surface.split_right(upper, 0.5, vec![top.id()]);
        surface.split_right(lower, 0.5, vec![comparison.id(), raw.id()]);

        let space_views = [trend, top, map, animated, comparison, raw]
            .into_iter()
            .map(|view| (view.id(), view))
            .collect();

        Self {
            dock_state,
            space_views,
        }
    }

    /// Number of views in the viewport
    pub fn len(&self) -> usize {
        self.space_views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.space_views.is_empty()
    }

    /// Draw the viewport
    pub fn ui(&mut self, ui: &mut Ui, viewer_context: &ViewerContext) {
        let dt = Duration::from_secs_f32(ui.input(|i| i.stable_dt).max(0.0));
        for view in self.space_views.values_mut() {
            view.on_frame_update(viewer_context, dt);
        }

        DockArea::new(&mut self.dock_state)
            .show_close_buttons(false)
            .draggable_tabs(true)
            .show_tab_name_on_hover(true)
            .show_inside(ui, &mut ViewportTabViewer {
                space_views: &mut self.space_views,
                viewer_context,
            });
    }
}

/// Tab viewer for egui_dock
struct ViewportTabViewer<'a> {
    space_views: &'a mut HashMap<SpaceViewId, Box<dyn SpaceView>>,
    viewer_context: &'a ViewerContext,
}

impl<'a> TabViewer for ViewportTabViewer<'a> {
    type Tab = SpaceViewId;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        if let Some(view) = self.space_views.get(tab) {
            view.display_name().into()
        } else {
            "?".into()
        }
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        if let Some(view) = self.space_views.get_mut(tab) {
            view.ui(self.viewer_context, ui);
        }
    }
}
