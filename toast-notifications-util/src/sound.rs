use crate::NotificationKind;

/// Hook called when a toast is shown while sound is enabled.
pub trait SoundHook: Send {
    fn play(&self, kind: NotificationKind);
}

/// Plays nothing. Used unless a concrete sound backend is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSound;

impl SoundHook for SilentSound {
    fn play(&self, kind: NotificationKind) {
        tracing::trace!("sound hook: {} (silent)", kind);
    }
}

/// Plays the XDG sound theme entry for the notification kind.
#[cfg(feature = "audio")]
#[derive(Debug, Default, Clone, Copy)]
pub struct XdgSound;

#[cfg(feature = "audio")]
impl SoundHook for XdgSound {
    fn play(&self, kind: NotificationKind) {
        if let Err(e) = crate::audio::play_sound_name(kind.sound_name()) {
            tracing::warn!("Failed to play sound for {} notification: {}", kind, e);
        }
    }
}

/// Pick the best available backend for this build.
pub fn default_sound() -> Box<dyn SoundHook> {
    #[cfg(feature = "audio")]
    {
        Box::new(XdgSound)
    }
    #[cfg(not(feature = "audio"))]
    {
        Box::new(SilentSound)
    }
}
