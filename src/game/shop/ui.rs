use bevy::prelude::*;
use super::components::*;

const BUTTON_IDLE: Color = Color::srgb(0.3, 0.3, 0.3);
const BUTTON_HOVERED: Color = Color::srgb(0.4, 0.4, 0.4);
const BUTTON_PRESSED: Color = Color::srgb(0.1, 0.1, 0.1);

macro_rules! spawn_button {
    ($parent:expr, $text:expr, $action:expr) => {
        $parent
            .spawn((
                Button,
                Node {
                    width: Val::Px(200.0),
                    height: Val::Px(40.0),
                    margin: UiRect::all(Val::Px(5.0)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(BUTTON_IDLE),
                $action,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new($text),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
    };
}

/// Sets up the shop editor panel when entering the editor
pub fn setup_shop_editor_ui(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            ShopEditorRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Shop Editor"),
                TextFont { font_size: 22.0, ..default() },
                TextColor(Color::WHITE),
                Node { margin: UiRect::bottom(Val::Px(10.0)), ..default() },
            ));

            spawn_button!(parent, "Create Buttons", ShopEditorAction::CreateButtons);
            spawn_button!(parent, "Delete Buttons", ShopEditorAction::DeleteButtons);
        });
}

pub fn cleanup_shop_editor_ui(mut commands: Commands, query: Query<Entity, With<ShopEditorRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

pub fn shop_editor_button_system(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor, &ShopEditorAction),
        (Changed<Interaction>, With<Button>),
    >,
    mut shop_commands: MessageWriter<ShopCommand>,
) {
    for (interaction, mut color, action) in &mut interaction_query {
        match *interaction {
            Interaction::Pressed => {
                *color = BackgroundColor(BUTTON_PRESSED);
                shop_commands.write(ShopCommand::from(*action));
            }
            Interaction::Hovered => *color = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *color = BackgroundColor(BUTTON_IDLE),
        }
    }
}
