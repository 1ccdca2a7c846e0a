//! Weather condition keywords mapped to dashboard icons and ambient sounds.

use serde::{Deserialize, Serialize};

/// Condition category as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Clear,
    Rain,
    Snow,
    Clouds,
    Other,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::Clear,
        Condition::Rain,
        Condition::Snow,
        Condition::Clouds,
        Condition::Other,
    ];

    /// Classify a provider keyword such as `"Clouds"`, ignoring case.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_lowercase().as_str() {
            "clear" => Condition::Clear,
            "rain" => Condition::Rain,
            "snow" => Condition::Snow,
            "clouds" => Condition::Clouds,
            _ => Condition::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Clear => "clear",
            Condition::Rain => "rain",
            Condition::Snow => "snow",
            Condition::Clouds => "clouds",
            Condition::Other => "default",
        }
    }

    pub fn icon_path(&self) -> &'static str {
        match self {
            Condition::Clear => "/icons/sunny.svg",
            Condition::Rain => "/icons/rainy.svg",
            Condition::Snow => "/icons/snowy.svg",
            Condition::Clouds => "/icons/cloudy.svg",
            Condition::Other => "/icons/default.svg",
        }
    }

    /// Looping ambient clip for this condition, if it has one.
    pub fn sound(&self) -> Option<SoundClip> {
        match self {
            Condition::Clear => Some(SoundClip::Summer),
            Condition::Rain => Some(SoundClip::Rain),
            Condition::Snow => Some(SoundClip::Snow),
            Condition::Clouds => Some(SoundClip::Cloud),
            Condition::Other => None,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the fixed ambient audio clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundClip {
    Cloud,
    Rain,
    Snow,
    Summer,
}

impl SoundClip {
    pub const ALL: [SoundClip; 4] = [
        SoundClip::Cloud,
        SoundClip::Rain,
        SoundClip::Snow,
        SoundClip::Summer,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundClip::Cloud => "CloudSound.mp3",
            SoundClip::Rain => "RainSound.mp3",
            SoundClip::Snow => "SnowRain.mp3",
            SoundClip::Summer => "SummerSound.mp3",
        }
    }
}

impl std::fmt::Display for SoundClip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}
