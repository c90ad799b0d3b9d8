use bevy::prelude::*;

/// What the selection manager needs from the world around it.
///
/// Render order is whatever decides 2D draw order (transform `z` in the
/// game). The notification hooks default to doing nothing, so a port only
/// implements the ones it cares about.
pub trait SelectionPort {
    fn render_order(&self, target: Entity) -> Option<f32>;
    fn set_render_order(&mut self, target: Entity, order: f32);
    fn set_dimmer_visible(&mut self, visible: bool);

    fn on_select(&mut self, _target: Entity) {}
    fn on_unselect(&mut self, _target: Entity) {}
}

/// Single-selection state: nothing selected, or exactly one entity.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SelectionManager {
    current: Option<Entity>,
    saved_order: Option<f32>,
    highlight_order: f32,
}

impl SelectionManager {
    pub fn new(highlight_order: f32) -> Self {
        Self {
            current: None,
            saved_order: None,
            highlight_order,
        }
    }

    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    pub fn is_selected(&self, target: Entity) -> bool {
        self.current == Some(target)
    }

    pub fn highlight_order(&self) -> f32 {
        self.highlight_order
    }

    pub fn select(&mut self, target: Entity, port: &mut impl SelectionPort) {
        if self.is_selected(target) {
            return;
        }
        self.clear(port);

        self.current = Some(target);
        self.saved_order = port.render_order(target);
        if self.saved_order.is_some() {
            port.set_render_order(target, self.highlight_order);
        }
        port.set_dimmer_visible(true);
        port.on_select(target);
    }

    pub fn toggle(&mut self, target: Entity, port: &mut impl SelectionPort) {
        if self.is_selected(target) {
            self.clear(port);
        } else {
            self.select(target, port);
        }
    }

    pub fn clear(&mut self, port: &mut impl SelectionPort) {
        let Some(previous) = self.current.take() else { return };

        if let Some(order) = self.saved_order.take() {
            port.set_render_order(previous, order);
        }
        port.on_unselect(previous);
        port.set_dimmer_visible(false);
    }

    /// Drop the selection without touching the world, for when the selected
    /// entity no longer exists.
    pub fn forget(&mut self, target: Entity) -> bool {
        if self.is_selected(target) {
            self.current = None;
            self.saved_order = None;
            true
        } else {
            false
        }
    }
}
