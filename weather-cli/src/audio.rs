use std::{collections::HashMap, path::PathBuf, process::Stdio};

use anyhow::Context;
use tokio::process::{Child, Command};
use weather_core::{AudioSink, Config, PlaybackEffect, SoundClip};

/// Plays clips by launching an external player, one process per clip.
///
/// Stopping kills the process, so the next start begins from the top.
#[derive(Debug)]
pub struct PlayerProcess {
    program: String,
    args: Vec<String>,
    sounds_dir: PathBuf,
    running: HashMap<SoundClip, Child>,
}

impl PlayerProcess {
    pub fn new(program: String, args: Vec<String>, sounds_dir: PathBuf) -> Self {
        Self {
            program,
            args,
            sounds_dir,
            running: HashMap::new(),
        }
    }

    pub fn clip_path(&self, clip: SoundClip) -> PathBuf {
        self.sounds_dir.join(clip.file_name())
    }
}

impl AudioSink for PlayerProcess {
    fn apply(&mut self, effect: PlaybackEffect) -> anyhow::Result<()> {
        match effect {
            PlaybackEffect::Play(clip) => {
                let path = self.clip_path(clip);
                let child = Command::new(&self.program)
                    .args(&self.args)
                    .arg(&path)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .kill_on_drop(true)
                    .spawn()
                    .with_context(|| format!("Failed to start `{}` for {}", self.program, path.display()))?;
                tracing::debug!(%clip, "player started");
                self.running.insert(clip, child);
            }
            PlaybackEffect::StopAndRewind(clip) => {
                if let Some(mut child) = self.running.remove(&clip) {
                    // The player may already have exited on its own.
                    if let Err(e) = child.start_kill() {
                        tracing::debug!(%clip, "player already gone: {e}");
                    }
                }
            }
        }
        Ok(())
    }
}

/// Used when no player is configured: the dashboard still tracks the slot.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn apply(&mut self, effect: PlaybackEffect) -> anyhow::Result<()> {
        tracing::info!(?effect, "no audio player configured");
        Ok(())
    }
}

pub fn sink_from_config(config: &Config) -> Box<dyn AudioSink> {
    match config.audio_player_command() {
        Some((program, args)) => Box::new(PlayerProcess::new(program, args, config.sounds_dir())),
        None => Box::new(Silent),
    }
}
