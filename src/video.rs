//! Custom controls for the hero video.
//!
//! The player UI (play/pause icon, mute icon, poster) mirrors the media
//! element. User toggles issue [`MediaCommand`]s and update the UI right
//! away; media events from the host re-sync it so the UI follows the
//! element even when something else started or paused playback.

use crate::dom::{Directive, ElementRef, Icon, MediaCommand};
use crate::models::VideoHooks;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Event raised by the media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaEvent {
    /// `play`
    Play,
    /// `pause`
    Pause,
    /// `volumechange`
    VolumeChange {
        /// Current `muted` value
        muted: bool,
    },
    /// `fullscreenchange`
    FullscreenChange {
        /// Whether the document is now fullscreen
        active: bool,
    },
    /// `canplay`
    CanPlay,
    /// The promise returned by an autoplay attempt was rejected
    AutoplayRejected,
}

/// Player UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoControls {
    hooks: VideoHooks,
    playing: bool,
    muted: bool,
    fullscreen: bool,
}

impl VideoControls {
    /// Creates paused controls for the elements the page has.
    #[must_use]
    pub fn new(hooks: VideoHooks) -> Self {
        let muted = hooks.muted;
        Self {
            hooks,
            playing: false,
            muted,
            fullscreen: false,
        }
    }

    /// Whether the UI shows the video as playing.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the UI shows the video as muted.
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether the video is fullscreen.
    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Play/pause button, big play button, Space or `k`.
    pub fn toggle_play_pause(&mut self) -> Vec<Directive> {
        let command = if self.playing {
            MediaCommand::Pause
        } else {
            MediaCommand::Play
        };
        self.playing = !self.playing;

        let mut directives = vec![Directive::Media { command }];
        directives.extend(self.sync_playback_ui());
        directives
    }

    /// Mute button or `m`.
    pub fn toggle_mute(&mut self) -> Vec<Directive> {
        self.muted = !self.muted;
        let mut directives = vec![Directive::Media {
            command: MediaCommand::SetMuted(self.muted),
        }];
        directives.extend(self.sync_mute_ui());
        directives
    }

    /// Fullscreen button or `f`.
    ///
    /// The fullscreen flag itself only changes on `fullscreenchange`.
    pub fn toggle_fullscreen(&self) -> Vec<Directive> {
        let command = if self.fullscreen {
            MediaCommand::ExitFullscreen
        } else {
            MediaCommand::RequestFullscreen
        };
        vec![Directive::Media { command }]
    }

    /// Re-syncs the UI from a media event.
    pub fn on_media_event(&mut self, event: MediaEvent) -> Vec<Directive> {
        debug!(?event, "media event");
        match event {
            MediaEvent::Play => {
                self.playing = true;
                self.sync_playback_ui()
            }
            MediaEvent::Pause => {
                self.playing = false;
                self.sync_playback_ui()
            }
            MediaEvent::VolumeChange { muted } => {
                self.muted = muted;
                self.sync_mute_ui()
            }
            MediaEvent::FullscreenChange { active } => {
                self.fullscreen = active;
                Vec::new()
            }
            MediaEvent::CanPlay => vec![Directive::Media {
                command: MediaCommand::Autoplay,
            }],
            MediaEvent::AutoplayRejected => {
                warn!("autoplay was prevented, showing poster");
                self.playing = false;
                self.poster(true).into_iter().collect()
            }
        }
    }

    fn sync_playback_ui(&self) -> Vec<Directive> {
        let mut directives = Vec::new();
        if self.hooks.play_pause_button {
            directives.push(Directive::SetIcon {
                target: ElementRef::PlayPauseButton,
                icon: if self.playing { Icon::Pause } else { Icon::Play },
            });
        }
        directives.extend(self.poster(!self.playing));
        directives
    }

    fn sync_mute_ui(&self) -> Vec<Directive> {
        if !self.hooks.mute_button {
            return Vec::new();
        }
        vec![Directive::SetIcon {
            target: ElementRef::MuteButton,
            icon: if self.muted {
                Icon::VolumeMute
            } else {
                Icon::VolumeUp
            },
        }]
    }

    fn poster(&self, visible: bool) -> Option<Directive> {
        self.hooks.poster.then_some(Directive::SetOpacity {
            target: ElementRef::VideoPoster,
            opaque: visible,
        })
    }
}
