//! Radio controls.

use super::types::{RadioPlayer, STATIONS, VOLUME_STEP};
use crate::activities::{ActivityInput, ActivityOutcome};
use tracing::debug;

pub fn toggle_play(player: &mut RadioPlayer) {
    player.playing = !player.playing;
    debug!(
        station = player.current_station().id,
        playing = player.playing,
        "radio toggled"
    );
}

/// Tune to another station. Playback stops until toggled again.
pub fn change_station(player: &mut RadioPlayer, index: usize) {
    if index >= STATIONS.len() || index == player.station {
        return;
    }
    player.station = index;
    player.playing = false;
}

fn step_station(player: &mut RadioPlayer, step: isize) {
    let len = STATIONS.len() as isize;
    let next = (player.station as isize + step).rem_euclid(len) as usize;
    change_station(player, next);
}

/// Raise or lower the volume by `steps` increments, clamped to 0..=100.
pub fn adjust_volume(player: &mut RadioPlayer, steps: i8) {
    let delta = i16::from(steps) * i16::from(VOLUME_STEP);
    player.volume_percent = (i16::from(player.volume_percent) + delta).clamp(0, 100) as u8;
}

pub fn process_input(player: &mut RadioPlayer, input: ActivityInput) -> ActivityOutcome {
    match input {
        ActivityInput::Up => step_station(player, -1),
        ActivityInput::Down => step_station(player, 1),
        ActivityInput::Left => adjust_volume(player, -1),
        ActivityInput::Right => adjust_volume(player, 1),
        ActivityInput::Primary => toggle_play(player),
        ActivityInput::Cancel => return ActivityOutcome::Close,
        _ => {}
    }
    ActivityOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_station_stops_playback() {
        let mut player = RadioPlayer::new();
        toggle_play(&mut player);
        assert!(player.playing);
        change_station(&mut player, 2);
        assert_eq!(player.current_station().id, "ambient");
        assert!(!player.playing);
    }

    #[test]
    fn test_same_station_keeps_playing() {
        let mut player = RadioPlayer::new();
        toggle_play(&mut player);
        change_station(&mut player, 0);
        assert!(player.playing);
        change_station(&mut player, 9);
        assert_eq!(player.station, 0);
    }

    #[test]
    fn test_volume_clamps() {
        let mut player = RadioPlayer::new();
        adjust_volume(&mut player, 3);
        assert_eq!(player.volume_percent, 80);
        adjust_volume(&mut player, 5);
        assert_eq!(player.volume_percent, 100);
        adjust_volume(&mut player, -12);
        assert_eq!(player.volume_percent, 0);
    }

    #[test]
    fn test_process_input() {
        let mut player = RadioPlayer::new();
        process_input(&mut player, ActivityInput::Primary);
        assert!(player.playing);
        process_input(&mut player, ActivityInput::Up);
        assert_eq!(player.current_station().id, "ambient");
        assert!(!player.playing);
        process_input(&mut player, ActivityInput::Left);
        assert_eq!(player.volume_percent, 40);
        assert_eq!(
            process_input(&mut player, ActivityInput::Cancel),
            ActivityOutcome::Close
        );
    }
}
