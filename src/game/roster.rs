use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const UNIT_CATALOG_PATH: &str = "assets/units.ron";

/// Everything needed to show a unit in the shop and to place it as a tower.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct UnitConfig {
    pub name: String,
    /// Thumbnail image path, relative to the asset root.
    pub thumbnail: String,
    pub cost: u32,
    pub color: [f32; 4],
    pub size: f32,

    pub range: f32,
    pub fire_interval_secs: f32,
    pub projectile_damage: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime_secs: f32,
}

impl UnitConfig {
    pub fn color(&self) -> Color {
        let [r, g, b, a] = self.color;
        Color::srgba(r, g, b, a)
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct UnitCatalog {
    pub units: Vec<UnitConfig>,
}

/// One shop entry. Created fresh for each button build and dropped afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitStatus {
    pub index: usize,
    pub config: UnitConfig,
}

/// Units the player can buy, in shop order.
#[derive(Resource, Clone, Debug)]
pub struct UnitRoster {
    catalog: UnitCatalog,
}

impl UnitRoster {
    pub fn new(catalog: UnitCatalog) -> Self {
        Self { catalog }
    }

    pub fn reset_unit_statuses(&self) -> Vec<UnitStatus> {
        self.catalog
            .units
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, config)| UnitStatus { index, config })
            .collect()
    }

    pub fn unit(&self, index: usize) -> Option<&UnitConfig> {
        self.catalog.units.get(index)
    }

    pub fn len(&self) -> usize {
        self.catalog.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.units.is_empty()
    }
}

pub struct RosterPlugin;

impl Plugin for RosterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_unit_catalog);
    }
}

fn load_unit_catalog(mut commands: Commands) {
    commands.insert_resource(UnitRoster::new(read_unit_catalog(UNIT_CATALOG_PATH)));
}

pub fn read_unit_catalog(path: &str) -> UnitCatalog {
    match std::fs::read_to_string(path) {
        Ok(contents) => match ron::from_str::<UnitCatalog>(&contents) {
            Ok(catalog) => {
                info!("Loaded {} units from {}", catalog.units.len(), path);
                catalog
            }
            Err(e) => {
                error!("Failed to parse unit catalog: {}", e);
                UnitCatalog::default()
            }
        },
        Err(e) => {
            error!("Failed to read {}: {}", path, e);
            UnitCatalog::default()
        }
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self {
            units: vec![
                UnitConfig {
                    name: "Archer".to_string(),
                    thumbnail: "thumbnails/archer.png".to_string(),
                    cost: 50,
                    color: [0.35, 0.75, 0.35, 1.0],
                    size: 28.0,
                    range: 260.0,
                    fire_interval_secs: 0.8,
                    projectile_damage: 10.0,
                    projectile_speed: 420.0,
                    projectile_lifetime_secs: 1.5,
                },
                UnitConfig {
                    name: "Cannon".to_string(),
                    thumbnail: "thumbnails/cannon.png".to_string(),
                    cost: 90,
                    color: [0.75, 0.45, 0.25, 1.0],
                    size: 34.0,
                    range: 200.0,
                    fire_interval_secs: 1.8,
                    projectile_damage: 35.0,
                    projectile_speed: 260.0,
                    projectile_lifetime_secs: 2.0,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_statuses_follow_catalog_order() {
        let roster = UnitRoster::new(UnitCatalog::default());
        let statuses = roster.reset_unit_statuses();

        assert_eq!(statuses.len(), roster.len());
        for (i, status) in statuses.iter().enumerate() {
            assert_eq!(status.index, i);
            assert_eq!(Some(&status.config), roster.unit(i));
        }
    }

    #[test]
    fn test_reset_is_fresh_each_call() {
        let roster = UnitRoster::new(UnitCatalog::default());
        let mut first = roster.reset_unit_statuses();
        first[0].config.cost = 0;

        let second = roster.reset_unit_statuses();
        assert_eq!(second[0].config.cost, 50);
    }

    #[test]
    fn test_catalog_parses_from_ron() {
        let src = r#"(units: [(
            name: "Scout",
            thumbnail: "thumbnails/scout.png",
            cost: 10,
            color: (1.0, 1.0, 1.0, 1.0),
            size: 20.0,
            range: 100.0,
            fire_interval_secs: 0.5,
            projectile_damage: 2.0,
            projectile_speed: 300.0,
            projectile_lifetime_secs: 1.0,
        )])"#;
        let catalog: UnitCatalog = ron::from_str(src).unwrap();
        assert_eq!(catalog.units.len(), 1);
        assert_eq!(catalog.units[0].name, "Scout");
    }
}
