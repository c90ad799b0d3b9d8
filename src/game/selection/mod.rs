mod manager;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::game::config::InitialConfig;

pub use manager::{SelectionManager, SelectionPort};

/// Marks an entity that can be selected and highlighted
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Selectable;

/// Full-screen overlay shown behind the current selection
#[derive(Component)]
pub struct Dimmer;

/// Triggered on an entity when it becomes the selection. Observing it is optional.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct SelectionGained {
    pub entity: Entity,
}

/// Triggered on an entity when it stops being the selection. Observing it is optional.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct SelectionLost {
    pub entity: Entity,
}

/// Requests from input handling and other plugins
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRequest {
    Select(Entity),
    Toggle(Entity),
    Clear,
}

/// The ECS side of [`SelectionPort`]: render order is the transform `z`,
/// notifications are entity events.
#[derive(SystemParam)]
pub struct SelectionContext<'w, 's> {
    commands: Commands<'w, 's>,
    transforms: Query<'w, 's, &'static mut Transform, With<Selectable>>,
    dimmers: Query<'w, 's, &'static mut Visibility, With<Dimmer>>,
}

impl SelectionPort for SelectionContext<'_, '_> {
    fn render_order(&self, target: Entity) -> Option<f32> {
        self.transforms.get(target).ok().map(|t| t.translation.z)
    }

    fn set_render_order(&mut self, target: Entity, order: f32) {
        if let Ok(mut transform) = self.transforms.get_mut(target) {
            transform.translation.z = order;
        }
    }

    fn set_dimmer_visible(&mut self, visible: bool) {
        for mut visibility in &mut self.dimmers {
            *visibility = if visible { Visibility::Visible } else { Visibility::Hidden };
        }
    }

    fn on_select(&mut self, target: Entity) {
        self.commands.trigger(SelectionGained { entity: target });
    }

    fn on_unselect(&mut self, target: Entity) {
        self.commands.trigger(SelectionLost { entity: target });
    }
}

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SelectionRequest>()
           .add_systems(Startup, setup_selection)
           .add_systems(Update, (forget_despawned_selection, apply_selection_requests).chain());
    }
}

fn setup_selection(mut commands: Commands, config: Res<InitialConfig>) {
    commands.insert_resource(SelectionManager::new(config.highlight_order));
    commands.spawn((
        Name::new("Dimmer"),
        Dimmer,
        Sprite::from_color(config.dimmer_color(), config.playfield_size * 2.0),
        Transform::from_xyz(0.0, 0.0, config.dimmer_order),
        Visibility::Hidden,
    ));
}

pub fn apply_selection_requests(
    mut requests: MessageReader<SelectionRequest>,
    mut manager: ResMut<SelectionManager>,
    mut context: SelectionContext,
) {
    for request in requests.read() {
        match *request {
            SelectionRequest::Select(target) => manager.select(target, &mut context),
            SelectionRequest::Toggle(target) => manager.toggle(target, &mut context),
            SelectionRequest::Clear => manager.clear(&mut context),
        }
        debug!("Selection after {:?}: {:?}", request, manager.current());
    }
}

/// A despawned selection has nothing left to restore; just drop it.
pub fn forget_despawned_selection(
    mut removed: RemovedComponents<Selectable>,
    mut manager: ResMut<SelectionManager>,
    mut context: SelectionContext,
) {
    for entity in removed.read() {
        if manager.forget(entity) {
            context.set_dimmer_visible(false);
        }
    }
}
