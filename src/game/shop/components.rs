use bevy::prelude::*;

use crate::game::roster::UnitStatus;

/// The shop row. Generated buttons are spawned as its children.
#[derive(Component, Debug, Clone)]
pub struct BuyUnitMenu {
    pub template: ButtonTemplate,
}

/// World-space rectangle the button row has to fill. The menu's transform
/// is the row's left anchor, vertically centred.
#[derive(Component, Debug, Clone, Copy)]
pub struct MenuRect {
    pub size: Vec2,
}

/// Blueprint every shop button is spawned from.
#[derive(Debug, Clone)]
pub struct ButtonTemplate {
    pub sprite_size: Option<Vec2>,
    pub color: Color,
    pub preview_slot: Option<PreviewSlot>,
}

/// Area of the button, in template space, that the unit preview fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSlot {
    pub offset: Vec2,
    pub size: Vec2,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyUnitButton {
    pub menu: Entity,
    pub unit_status_index: usize,
}

#[derive(Component)]
pub struct ButtonPreview;

#[derive(Component)]
pub struct ButtonLabel;

/// Editor commands for the shop row.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopCommand {
    /// Regenerate every preview and rebuild the row.
    CreateButtons,
    /// Remove every generated button.
    DeleteButtons,
}

/// A `CreateButtons` waiting on its thumbnails.
#[derive(Resource, Debug)]
pub struct PendingShopBuild {
    pub menu: Entity,
    pub statuses: Vec<UnitStatus>,
    pub thumbnails: Vec<Handle<Image>>,
    pub requested_at: f32,
}

#[derive(Component)]
pub struct ShopEditorRoot;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEditorAction {
    CreateButtons,
    DeleteButtons,
}

impl From<ShopEditorAction> for ShopCommand {
    fn from(action: ShopEditorAction) -> Self {
        match action {
            ShopEditorAction::CreateButtons => ShopCommand::CreateButtons,
            ShopEditorAction::DeleteButtons => ShopCommand::DeleteButtons,
        }
    }
}
