//! The human side of the mission: key bindings and mission outcome.

use skystrike_kernel::MissionStatus;
use skystrike_scene::CommandQueue;
use std::collections::BTreeMap;

use crate::action::PlayerAction;
use crate::source::{InputEvent, InputSource, Key};

/// Translates key state into player-aircraft commands.
#[derive(Debug, Clone)]
pub struct Player {
    bindings: BTreeMap<Key, PlayerAction>,
    speed: f32,
    mission_status: MissionStatus,
}

impl Player {
    /// Player with the default bindings: arrows move, space fires, `m`
    /// launches a missile.
    pub fn new(speed: f32) -> Self {
        let bindings = BTreeMap::from([
            (Key::Left, PlayerAction::MoveLeft),
            (Key::Right, PlayerAction::MoveRight),
            (Key::Up, PlayerAction::MoveUp),
            (Key::Down, PlayerAction::MoveDown),
            (Key::Space, PlayerAction::Fire),
            (Key::Char('m'), PlayerAction::LaunchMissile),
        ]);
        Self {
            bindings,
            speed,
            mission_status: MissionStatus::Running,
        }
    }

    /// One-shot actions: a key press bound to an event-driven action queues
    /// its command once.
    pub fn handle_event(&self, event: &InputEvent, commands: &mut CommandQueue) {
        if let InputEvent::KeyPressed(key) = event {
            if let Some(action) = self.bindings.get(key) {
                if !action.is_realtime() {
                    commands.push(action.command(self.speed));
                }
            }
        }
    }

    /// Held keys: every realtime action whose key is down queues its command.
    /// Called once per frame.
    pub fn handle_realtime_input(&self, input: &dyn InputSource, commands: &mut CommandQueue) {
        for (key, action) in &self.bindings {
            if action.is_realtime() && input.is_key_pressed(*key) {
                commands.push(action.command(self.speed));
            }
        }
    }

    /// Bind `key` to `action`, dropping the action's previous key and
    /// whatever `key` was bound to before.
    pub fn assign_key(&mut self, action: PlayerAction, key: Key) {
        self.bindings.retain(|_, bound| *bound != action);
        if let Some(previous) = self.bindings.insert(key, action) {
            tracing::debug!(%key, ?previous, "key rebound");
        }
    }

    pub fn assigned_key(&self, action: PlayerAction) -> Option<Key> {
        self.bindings
            .iter()
            .find(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
    }

    pub fn bindings(&self) -> &BTreeMap<Key, PlayerAction> {
        &self.bindings
    }

    pub fn set_mission_status(&mut self, status: MissionStatus) {
        if status != self.mission_status {
            tracing::info!(?status, "mission status changed");
        }
        self.mission_status = status;
    }

    pub fn mission_status(&self) -> MissionStatus {
        self.mission_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedInput;
    use glam::Vec2;
    use skystrike_scene::CommandAction;

    fn drain(commands: &mut CommandQueue) -> Vec<CommandAction> {
        let mut out = Vec::new();
        while !commands.is_empty() {
            out.push(commands.pop().action);
        }
        out
    }

    #[test]
    fn default_bindings_cover_every_action() {
        let player = Player::new(200.0);
        for action in PlayerAction::ALL {
            assert!(player.assigned_key(action).is_some(), "{action:?} unbound");
        }
        assert_eq!(player.assigned_key(PlayerAction::LaunchMissile), Some(Key::Char('m')));
    }

    #[test]
    fn held_keys_repeat_every_frame() {
        let player = Player::new(200.0);
        let mut input = ScriptedInput::new();
        input.press(Key::Left);
        input.press(Key::Space);
        input.press(Key::Char('m'));

        let mut commands = CommandQueue::new();
        player.handle_realtime_input(&input, &mut commands);
        player.handle_realtime_input(&input, &mut commands);
        let actions = drain(&mut commands);
        assert_eq!(actions.len(), 4);
        assert!(!actions.contains(&CommandAction::LaunchMissile));
        assert_eq!(
            actions.iter().filter(|a| **a == CommandAction::Fire).count(),
            2
        );
        assert!(actions.contains(&CommandAction::Accelerate(Vec2::new(-200.0, 0.0))));
    }

    #[test]
    fn missile_launches_on_key_press_only() {
        let player = Player::new(200.0);
        let mut commands = CommandQueue::new();
        player.handle_event(&InputEvent::KeyPressed(Key::Char('m')), &mut commands);
        player.handle_event(&InputEvent::KeyReleased(Key::Char('m')), &mut commands);
        player.handle_event(&InputEvent::KeyPressed(Key::Space), &mut commands);
        assert_eq!(drain(&mut commands), vec![CommandAction::LaunchMissile]);
    }

    #[test]
    fn rebinding_moves_action_to_new_key() {
        let mut player = Player::new(200.0);
        player.assign_key(PlayerAction::Fire, Key::Char('f'));
        assert_eq!(player.assigned_key(PlayerAction::Fire), Some(Key::Char('f')));
        assert!(!player.bindings().contains_key(&Key::Space));

        // Taking over a key unbinds the action that had it.
        player.assign_key(PlayerAction::MoveUp, Key::Char('f'));
        assert_eq!(player.assigned_key(PlayerAction::Fire), None);
        assert_eq!(player.bindings().len(), 5);
    }

    #[test]
    fn mission_status_starts_running() {
        let mut player = Player::new(200.0);
        assert_eq!(player.mission_status(), MissionStatus::Running);
        player.set_mission_status(MissionStatus::Success);
        assert_eq!(player.mission_status(), MissionStatus::Success);
    }
}
