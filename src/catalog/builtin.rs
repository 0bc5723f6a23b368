use super::model::{Catalog, Track};

fn track(
    id: u32,
    title: &str,
    artist: &str,
    album: &str,
    cover: &str,
    song: u32,
    accent: &str,
    duration: u64,
) -> Track {
    Track {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        cover: format!("https://images.unsplash.com/{cover}?q=80&w=400&h=400&auto=format&fit=crop"),
        source: format!("https://www.soundhelix.com/examples/mp3/SoundHelix-Song-{song}.mp3"),
        accent: accent.to_string(),
        duration,
        lyrics: Vec::new(),
    }
}

impl Catalog {
    /// The playlist shipped with the player, used when no catalog file is configured.
    pub fn builtin() -> Self {
        let mut midnight = track(
            1,
            "Midnight City",
            "M83",
            "Hurry Up, We're Dreaming",
            "photo-1614613535308-eb5fbd3d2c17",
            1,
            "#4f46e5",
            372,
        );
        midnight.lyrics = vec![
            "I'm staring at the midnight city".to_string(),
            "And the lights are shining down".to_string(),
            "Waiting for the sun to rise".to_string(),
        ];

        let tracks = vec![
            midnight,
            track(
                2,
                "After Hours",
                "The Weeknd",
                "After Hours",
                "photo-1493225255756-d9584f8606e9",
                2,
                "#e11d48",
                425,
            ),
            track(
                3,
                "Lost in Yesterday",
                "Tame Impala",
                "The Slow Rush",
                "photo-1459749411177-042180ce673c",
                3,
                "#10b981",
                310,
            ),
            track(
                4,
                "Levitating",
                "Dua Lipa",
                "Future Nostalgia",
                "photo-1470225620780-dba8ba36b745",
                4,
                "#a855f7",
                203,
            ),
        ];

        Self { tracks }
    }
}
