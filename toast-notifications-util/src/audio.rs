//! Sound theme playback for toasts.
//!
//! Only files below a sound theme directory are ever opened:
//! - `/usr/share/sounds/**`
//! - `/usr/local/share/sounds/**`
//! - `$XDG_DATA_HOME/sounds/**` (or `$HOME/.local/share/sounds/**`)

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, error, warn};

/// Upper bound on sounds playing at the same time. Extra requests are dropped.
pub const MAX_CONCURRENT_SOUNDS: usize = 2;

const SOUND_EXTENSIONS: [&str; 4] = ["oga", "ogg", "wav", "mp3"];

static ACTIVE_SOUNDS: AtomicUsize = AtomicUsize::new(0);

/// Holds one playback slot and releases it on drop.
struct PlaybackSlot;

impl PlaybackSlot {
    fn acquire() -> Option<Self> {
        ACTIVE_SOUNDS
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < MAX_CONCURRENT_SOUNDS).then_some(n + 1)
            })
            .ok()
            .map(|_| PlaybackSlot)
    }
}

impl Drop for PlaybackSlot {
    fn drop(&mut self) {
        ACTIVE_SOUNDS.fetch_sub(1, Ordering::SeqCst);
    }
}

fn user_sound_root() -> Option<PathBuf> {
    std::env::var_os("XDG_DATA_HOME")
        .map(|d| PathBuf::from(d).join("sounds"))
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share/sounds")))
}

fn sound_roots() -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = user_sound_root().into_iter().collect();
    roots.push(PathBuf::from("/usr/share/sounds"));
    roots.push(PathBuf::from("/usr/local/share/sounds"));
    roots
}

/// Directories searched for a theme entry, most specific first.
fn theme_dirs() -> Vec<PathBuf> {
    sound_roots()
        .into_iter()
        .flat_map(|root| {
            [
                root.join("freedesktop/stereo"),
                root.join("freedesktop"),
                root,
            ]
        })
        .collect()
}

/// Whether `path` resolves (symlinks and `..` included) to a file below a sound root.
fn is_allowed_sound_path(path: &Path) -> bool {
    let Ok(canonical) = path.canonicalize() else {
        warn!("Failed to canonicalize sound path {:?}", path);
        return false;
    };

    let allowed = sound_roots()
        .iter()
        .filter_map(|root| root.canonicalize().ok())
        .any(|root| canonical.starts_with(root));

    if !allowed {
        warn!("Sound path {:?} is outside the sound directories", canonical);
    }
    allowed
}

fn find_theme_sound(name: &str) -> Result<PathBuf, AudioError> {
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(AudioError::SoundNotFound(name.to_string()));
    }

    theme_dirs()
        .iter()
        .flat_map(|dir| SOUND_EXTENSIONS.iter().map(move |ext| dir.join(format!("{name}.{ext}"))))
        .find(|path| path.exists())
        .inspect(|path| debug!("Found sound theme file: {:?}", path))
        .ok_or_else(|| AudioError::SoundNotFound(name.to_string()))
}

/// Play a sound theme entry such as `"dialog-warning"` on a background thread.
pub fn play_sound_name(name: &str) -> Result<(), AudioError> {
    let path = find_theme_sound(name)?;
    play_sound_file(&path)
}

/// Play a sound file on a background thread.
///
/// Returns `Ok(())` without playing anything when [`MAX_CONCURRENT_SOUNDS`] are
/// already playing.
pub fn play_sound_file(path: &Path) -> Result<(), AudioError> {
    if !path.exists() {
        return Err(AudioError::FileNotFound(path.to_path_buf()));
    }
    if !is_allowed_sound_path(path) {
        return Err(AudioError::PathNotAllowed(path.to_path_buf()));
    }

    let Some(slot) = PlaybackSlot::acquire() else {
        warn!("{} sounds already playing, dropping {:?}", MAX_CONCURRENT_SOUNDS, path);
        return Ok(());
    };

    let path = path.to_path_buf();
    let spawned = thread::Builder::new()
        .name("toast-sound".into())
        .spawn(move || {
            let _slot = slot;
            if let Err(e) = play_blocking(&path) {
                error!("Failed to play sound file {:?}: {}", path, e);
            }
        });

    if let Err(e) = spawned {
        warn!("Failed to spawn sound thread: {}", e);
    }
    Ok(())
}

fn play_blocking(path: &Path) -> Result<(), AudioError> {
    let (_stream, handle) = OutputStream::try_default().map_err(|_| AudioError::NoAudioDevice)?;

    let file = File::open(path).map_err(|e| AudioError::IoError(e.to_string()))?;
    let source =
        Decoder::new(BufReader::new(file)).map_err(|e| AudioError::DecodeError(e.to_string()))?;

    let sink = Sink::try_new(&handle).map_err(|e| AudioError::PlaybackError(e.to_string()))?;
    sink.append(source);
    sink.sleep_until_end();

    Ok(())
}

/// Audio playback errors
#[derive(Debug, Clone)]
pub enum AudioError {
    /// No audio output device available
    NoAudioDevice,
    /// Sound file not found
    FileNotFound(PathBuf),
    /// Sound theme entry not found
    SoundNotFound(String),
    /// Sound file is outside the sound directories
    PathNotAllowed(PathBuf),
    /// IO error reading file
    IoError(String),
    /// Error decoding audio file
    DecodeError(String),
    /// Error during playback
    PlaybackError(String),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoAudioDevice => write!(f, "No audio output device available"),
            AudioError::FileNotFound(path) => write!(f, "Sound file not found: {:?}", path),
            AudioError::SoundNotFound(name) => write!(f, "Sound '{}' not found in theme", name),
            AudioError::PathNotAllowed(path) => {
                write!(f, "Sound file path not in allowed directory: {:?}", path)
            }
            AudioError::IoError(e) => write!(f, "IO error: {}", e),
            AudioError::DecodeError(e) => write!(f, "Audio decode error: {}", e),
            AudioError::PlaybackError(e) => write!(f, "Playback error: {}", e),
        }
    }
}

impl std::error::Error for AudioError {}
