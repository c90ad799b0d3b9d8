use bevy::prelude::*;

use crate::game::config::InitialConfig;
use crate::game::preview::{
    evaluate_readiness, fit_scale, generate_preview, load_persisted, KeyColor, PreviewSprite,
    PreviewStore, Readiness, ThumbnailState,
};
use crate::game::profiling::profile;
use crate::game::roster::{UnitRoster, UnitStatus};
use crate::game::selection::Selectable;
use super::components::*;
use super::layout::{LayoutError, RowLayout};
use super::manifest::{load_manifest, manifest_path, remove_manifest, save_manifest, ManifestEntry, ShopManifest};

pub const MENU_ORDER: f32 = 10.0;
pub const BUTTON_ORDER: f32 = 0.0;
const PREVIEW_ORDER: f32 = 0.1;
const LABEL_ORDER: f32 = 0.2;

/// Spawn the shop row described by the initial config.
pub fn spawn_shop_menu(mut commands: Commands, config: Res<InitialConfig>) {
    let preview_slot = config.preview_slot_size.map(|size| PreviewSlot {
        offset: config.preview_slot_offset,
        size,
    });

    commands.spawn((
        Name::new("BuyUnitMenu"),
        BuyUnitMenu {
            template: ButtonTemplate {
                sprite_size: config.button_template_size,
                color: config.button_color(),
                preview_slot,
            },
        },
        MenuRect { size: config.menu_rect_size },
        Transform::from_translation(config.menu_anchor.extend(MENU_ORDER)),
        Visibility::default(),
    ));
}

/// Rebuild the row from previews persisted by an earlier run. Queues a full
/// regeneration when there is nothing usable on disk.
#[profile]
pub fn restore_shop_from_manifest(
    mut commands: Commands,
    mut shop_commands: MessageWriter<ShopCommand>,
    roster: Res<UnitRoster>,
    store: Res<PreviewStore>,
    asset_server: Res<AssetServer>,
    menus: Query<(Entity, &BuyUnitMenu, Option<&MenuRect>)>,
) {
    let Ok((menu_entity, menu, rect)) = menus.single() else {
        error!("Expected exactly one BuyUnitMenu, found {}", menus.iter().count());
        return;
    };

    let path = manifest_path(&store);
    let manifest = match load_manifest(&path) {
        Ok(manifest) => manifest,
        Err(e) => {
            info!("No usable shop manifest at {} ({}); regenerating buttons", path.display(), e);
            shop_commands.write(ShopCommand::CreateButtons);
            return;
        }
    };

    let statuses = roster.reset_unit_statuses();
    let Some(entries) = manifest.entries_for(&statuses) else {
        warn!("Shop manifest does not match the unit roster; regenerating buttons");
        shop_commands.write(ShopCommand::CreateButtons);
        return;
    };

    if let Some(entry) = entries.iter().find(|entry| !persisted_preview_usable(&store, entry)) {
        warn!("Persisted preview {} is missing or invalid; regenerating buttons", entry.asset_path);
        shop_commands.write(ShopCommand::CreateButtons);
        return;
    }

    let result = build_button_row(&mut commands, menu_entity, menu, rect, &statuses, |status, _| {
        let entry = entries[status.index];
        Some(PreviewSprite {
            image: load_persisted(&asset_server, &entry.asset_path),
            pixel_size: UVec2::from(entry.pixel_size),
            pixels_per_unit: entry.pixels_per_unit,
        })
    });

    match result {
        Ok(built) => info!("Restored {} shop buttons from {}", built.len(), path.display()),
        Err(e) => error!("Cannot lay out shop buttons: {}", e),
    }
}

fn persisted_preview_usable(store: &PreviewStore, entry: &ManifestEntry) -> bool {
    entry.pixel_size[0] > 0
        && entry.pixel_size[1] > 0
        && entry.pixels_per_unit.is_finite()
        && entry.pixels_per_unit > 0.0
        && store.file_for_asset(&entry.asset_path).is_file()
}

/// Apply `ShopCommand`s. Creation only requests thumbnails here; the row is
/// rebuilt by [`poll_shop_build`] once they are all loaded.
pub fn handle_shop_commands(
    mut commands: Commands,
    mut shop_commands: MessageReader<ShopCommand>,
    roster: Res<UnitRoster>,
    asset_server: Res<AssetServer>,
    time: Res<Time>,
    pending: Option<Res<PendingShopBuild>>,
    menus: Query<Entity, With<BuyUnitMenu>>,
    buttons: Query<(Entity, &BuyUnitButton)>,
) {
    // Tracks inserts and removals queued earlier in this same frame
    let mut build_pending = pending.is_some();

    for command in shop_commands.read() {
        match command {
            ShopCommand::CreateButtons => {
                let Ok(menu) = menus.single() else {
                    error!("Expected exactly one BuyUnitMenu, found {}", menus.iter().count());
                    continue;
                };
                if build_pending {
                    warn!("Replacing a shop build that was still waiting for thumbnails");
                }

                let statuses = roster.reset_unit_statuses();
                let thumbnails = statuses
                    .iter()
                    .map(|status| asset_server.load(status.config.thumbnail.clone()))
                    .collect::<Vec<Handle<Image>>>();

                info!("Waiting for {} unit thumbnails", thumbnails.len());
                commands.insert_resource(PendingShopBuild {
                    menu,
                    statuses,
                    thumbnails,
                    requested_at: time.elapsed_secs(),
                });
                build_pending = true;
            }
            ShopCommand::DeleteButtons => {
                if build_pending {
                    info!("Cancelled pending shop build");
                    commands.remove_resource::<PendingShopBuild>();
                    build_pending = false;
                }
                for menu in menus.iter() {
                    let removed = delete_all_buttons(&mut commands, menu, &buttons);
                    info!("Deleted {} shop buttons", removed);
                }
            }
        }
    }
}

/// Wait for the requested thumbnails, then regenerate every preview and
/// rebuild the row.
#[profile(4)]
pub fn poll_shop_build(
    mut commands: Commands,
    pending: Option<Res<PendingShopBuild>>,
    time: Res<Time>,
    config: Res<InitialConfig>,
    store: Res<PreviewStore>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    menus: Query<(&BuyUnitMenu, Option<&MenuRect>)>,
    buttons: Query<(Entity, &BuyUnitButton)>,
) {
    let Some(pending) = pending else { return };

    let readiness = evaluate_readiness(
        pending
            .thumbnails
            .iter()
            .map(|handle| ThumbnailState::from(asset_server.get_load_state(handle.id()))),
        time.elapsed_secs() - pending.requested_at,
        config.thumbnail_timeout_secs,
    );

    match readiness {
        Readiness::Pending { ready, total } => {
            debug!("Waiting for thumbnails ({}/{})", ready, total);
            return;
        }
        Readiness::Failed(index) => {
            error!(
                "Thumbnail {} for {} failed to load; shop buttons were not rebuilt",
                pending.statuses[index].config.thumbnail, pending.statuses[index].config.name
            );
            commands.remove_resource::<PendingShopBuild>();
            return;
        }
        Readiness::TimedOut { ready, total } => {
            error!(
                "Timed out after {:.1}s with {}/{} thumbnails loaded; shop buttons were not rebuilt",
                config.thumbnail_timeout_secs, ready, total
            );
            commands.remove_resource::<PendingShopBuild>();
            return;
        }
        Readiness::Ready => {}
    }
    commands.remove_resource::<PendingShopBuild>();

    if pending.statuses.is_empty() {
        let removed = delete_all_buttons(&mut commands, pending.menu, &buttons);
        let path = manifest_path(&store);
        if let Err(e) = remove_manifest(&path) {
            error!("Failed to remove shop manifest {}: {}", path.display(), e);
        }
        info!("Unit roster is empty; removed {} shop buttons", removed);
        return;
    }

    let Ok((menu, rect)) = menus.get(pending.menu) else {
        error!("Shop menu {:?} disappeared before its buttons were built", pending.menu);
        return;
    };

    // Check preconditions before touching the existing row
    if let Err(e) = RowLayout::new(rect, &menu.template) {
        error!("Cannot lay out shop buttons: {}", e);
        return;
    }
    delete_all_buttons(&mut commands, pending.menu, &buttons);

    let key = KeyColor::new(config.preview_key_color);
    let mut manifest_entries = Vec::with_capacity(pending.statuses.len());
    let result = build_button_row(&mut commands, pending.menu, menu, rect, &pending.statuses, |status, target| {
        let thumbnail = images.get(&pending.thumbnails[status.index])?;
        match generate_preview(thumbnail, status.index, target, key, &store, &asset_server) {
            Ok(generated) => {
                manifest_entries.push(ManifestEntry {
                    unit_index: status.index,
                    unit_name: status.config.name.clone(),
                    asset_path: generated.asset_path,
                    pixel_size: generated.sprite.pixel_size.to_array(),
                    pixels_per_unit: generated.sprite.pixels_per_unit,
                });
                Some(generated.sprite)
            }
            Err(e) => {
                error!("Preview for {} failed: {}", status.config.name, e);
                None
            }
        }
    });

    match result {
        Ok(built) => {
            info!("Created {} shop buttons", built.len());
            let path = manifest_path(&store);
            match save_manifest(&path, &ShopManifest::new(manifest_entries)) {
                Ok(()) => info!("Wrote shop manifest to {}", path.display()),
                Err(e) => error!("Failed to write shop manifest {}: {}", path.display(), e),
            }
        }
        Err(e) => error!("Cannot lay out shop buttons: {}", e),
    }
}

/// Despawn every generated button of `menu`. Returns how many were removed.
pub fn delete_all_buttons(
    commands: &mut Commands,
    menu: Entity,
    buttons: &Query<(Entity, &BuyUnitButton)>,
) -> usize {
    let mut removed = 0;
    for (entity, button) in buttons.iter() {
        if button.menu == menu {
            commands.entity(entity).despawn();
            removed += 1;
        }
    }
    removed
}

/// Spawn one button per status under `menu_entity`. `preview_for` supplies
/// the preview for a status given the slot size; returning `None` leaves the
/// button without one.
pub fn build_button_row<F>(
    commands: &mut Commands,
    menu_entity: Entity,
    menu: &BuyUnitMenu,
    rect: Option<&MenuRect>,
    statuses: &[UnitStatus],
    mut preview_for: F,
) -> Result<Vec<Entity>, LayoutError>
where
    F: FnMut(&UnitStatus, Vec2) -> Option<PreviewSprite>,
{
    let layout = RowLayout::new(rect, &menu.template)?;
    if layout.overflows(statuses.len()) {
        warn!("{} shop buttons do not fit in a {}-wide menu", statuses.len(), layout.row_width);
    }

    let mut built = Vec::with_capacity(statuses.len());
    for (index, status) in statuses.iter().enumerate() {
        let placement = layout.place(index);

        let button = commands
            .spawn((
                Name::new(format!("BuyUnitButton {}", status.config.name)),
                BuyUnitButton { menu: menu_entity, unit_status_index: status.index },
                Selectable,
                Sprite::from_color(menu.template.color, layout.template_size),
                Transform::from_translation(placement.translation(BUTTON_ORDER))
                    .with_scale(Vec3::new(placement.scale, placement.scale, 1.0)),
                ChildOf(menu_entity),
            ))
            .id();

        if let Some(slot) = menu.template.preview_slot {
            if let Some(preview) = preview_for(status, slot.size) {
                let scale = fit_scale(slot.size, preview.world_size());
                commands.spawn((
                    ButtonPreview,
                    preview.to_sprite(),
                    Transform::from_translation(slot.offset.extend(PREVIEW_ORDER))
                        .with_scale(scale.extend(1.0)),
                    ChildOf(button),
                ));
            }
        }

        commands.spawn((
            ButtonLabel,
            Text2d::new(format!("{} ({})", status.config.name, status.config.cost)),
            TextFont { font_size: 9.0, ..default() },
            TextColor(Color::WHITE),
            Transform::from_xyz(0.0, -layout.template_size.y * 0.5 + 8.0, LABEL_ORDER),
            ChildOf(button),
        ));

        built.push(button);
    }

    Ok(built)
}
