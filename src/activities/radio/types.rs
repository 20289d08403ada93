//! Radio stations and player state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Station {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub icon: &'static str,
}

pub const STATIONS: [Station; 3] = [
    Station {
        id: "lofi",
        name: "Lofi Hip-Hop",
        url: "https://stream.laut.fm/lofi",
        icon: "🎧",
    },
    Station {
        id: "chillhop",
        name: "Chillhop / Jazz",
        url: "http://streams.fluxfm.de/Chillhop/mp3-128/",
        icon: "☕",
    },
    Station {
        id: "ambient",
        name: "Deep Focus / Ambient",
        url: "https://stream.laut.fm/study",
        icon: "📚",
    },
];

/// Volume step, in percent
pub const VOLUME_STEP: u8 = 10;
pub const DEFAULT_VOLUME: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioPlayer {
    /// Index into `STATIONS`
    pub station: usize,
    pub playing: bool,
    /// 0 to 100
    pub volume_percent: u8,
}

impl Default for RadioPlayer {
    fn default() -> Self {
        Self {
            station: 0,
            playing: false,
            volume_percent: DEFAULT_VOLUME,
        }
    }
}

impl RadioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_station(&self) -> &'static Station {
        &STATIONS[self.station % STATIONS.len()]
    }

    /// Volume as a 0.0 to 1.0 gain.
    pub fn volume(&self) -> f32 {
        f32::from(self.volume_percent) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let player = RadioPlayer::new();
        assert_eq!(player.current_station().id, "lofi");
        assert!(!player.playing);
        assert!((player.volume() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_station_ids_unique() {
        for (i, a) in STATIONS.iter().enumerate() {
            for b in &STATIONS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
