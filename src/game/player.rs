use bevy::prelude::*;

use crate::game::config::InitialConfig;

/// Credits to buy towers with and lives left before the base falls
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatus {
    pub credits: u32,
    pub lives: u32,
}

impl PlayerStatus {
    pub fn new(credits: u32, lives: u32) -> Self {
        Self { credits, lives }
    }

    /// Deduct `cost` if the balance covers it.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        match self.credits.checked_sub(cost) {
            Some(rest) => {
                self.credits = rest;
                true
            }
            None => false,
        }
    }

    pub fn earn(&mut self, amount: u32) {
        self.credits = self.credits.saturating_add(amount);
    }

    /// Returns the lives left.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn is_defeated(&self) -> bool {
        self.lives == 0
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_player);
    }
}

fn setup_player(mut commands: Commands, config: Res<InitialConfig>) {
    commands.insert_resource(PlayerStatus::new(config.starting_credits, config.starting_lives));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_only_when_affordable() {
        let mut status = PlayerStatus::new(100, 3);
        assert!(status.try_spend(60));
        assert_eq!(status.credits, 40);
        assert!(!status.try_spend(41));
        assert_eq!(status.credits, 40);
        assert!(status.try_spend(40));
        assert_eq!(status.credits, 0);
    }

    #[test]
    fn test_lives_bottom_out_at_zero() {
        let mut status = PlayerStatus::new(0, 1);
        assert_eq!(status.lose_life(), 0);
        assert!(status.is_defeated());
        assert_eq!(status.lose_life(), 0);
    }
}
