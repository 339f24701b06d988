use serde::{Deserialize, Serialize};

/// Colour theme of the page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// A saved `light`/`dark` preference wins, anything else falls back to the system preference.
    pub fn resolve(saved: Option<&str>, system_prefers_light: bool) -> Self {
        match saved {
            Some("light") => Theme::Light,
            Some("dark") => Theme::Dark,
            _ if system_prefers_light => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SweepCurve {
    Linear,
    Exponential,
}

/// One frequency sweep the page plays for a menu cue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Sweep {
    pub delay_ms: u32,
    pub from_hz: f32,
    pub to_hz: f32,
    pub duration_ms: u32,
    pub waveform: Waveform,
    pub gain: f32,
    pub curve: SweepCurve,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Open,
    Close,
}

impl SoundCue {
    pub fn sweeps(&self) -> Vec<Sweep> {
        match self {
            SoundCue::Open => vec![
                Sweep {
                    delay_ms: 0,
                    from_hz: 280.0,
                    to_hz: 900.0,
                    duration_ms: 140,
                    waveform: Waveform::Triangle,
                    gain: 0.07,
                    curve: SweepCurve::Exponential,
                },
                Sweep {
                    delay_ms: 50,
                    from_hz: 600.0,
                    to_hz: 1000.0,
                    duration_ms: 70,
                    waveform: Waveform::Sine,
                    gain: 0.045,
                    curve: SweepCurve::Linear,
                },
            ],
            SoundCue::Close => vec![Sweep {
                delay_ms: 0,
                from_hz: 520.0,
                to_hz: 200.0,
                duration_ms: 100,
                waveform: Waveform::Square,
                gain: 0.055,
                curve: SweepCurve::Exponential,
            }],
        }
    }
}

/// Page chrome state: theme, mobile menu and motion preference.
///
/// Passed explicitly to whoever needs it; the booking core never reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteContext {
    pub theme: Theme,
    pub reduce_motion: bool,
    pub menu_open: bool,
}

impl SiteContext {
    pub fn new(saved_theme: Option<&str>, system_prefers_light: bool, reduce_motion: bool) -> Self {
        Self {
            theme: Theme::resolve(saved_theme, system_prefers_light),
            reduce_motion,
            menu_open: false,
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn toggle_menu(&mut self) -> Option<SoundCue> {
        self.menu_open = !self.menu_open;
        let cue = if self.menu_open { SoundCue::Open } else { SoundCue::Close };
        self.audible(cue)
    }

    /// Closing always plays the close cue, even when the menu was already shut.
    pub fn close_menu(&mut self) -> Option<SoundCue> {
        self.menu_open = false;
        self.audible(SoundCue::Close)
    }

    fn audible(&self, cue: SoundCue) -> Option<SoundCue> {
        if self.reduce_motion {
            None
        } else {
            Some(cue)
        }
    }
}

impl Default for SiteContext {
    fn default() -> Self {
        Self::new(None, false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_resolution() {
        assert_eq!(Theme::resolve(Some("light"), false), Theme::Light);
        assert_eq!(Theme::resolve(Some("dark"), true), Theme::Dark);
        assert_eq!(Theme::resolve(Some("sepia"), true), Theme::Light);
        assert_eq!(Theme::resolve(None, false), Theme::Dark);
    }

    #[test]
    fn test_menu_cues() {
        let mut ctx = SiteContext::default();
        assert_eq!(ctx.toggle_menu(), Some(SoundCue::Open));
        assert!(ctx.menu_open);
        assert_eq!(ctx.toggle_menu(), Some(SoundCue::Close));
        assert!(!ctx.menu_open);
        assert_eq!(SoundCue::Open.sweeps().len(), 2);
    }

    #[test]
    fn test_reduced_motion_is_silent() {
        let mut ctx = SiteContext::new(None, false, true);
        assert_eq!(ctx.toggle_menu(), None);
        assert!(ctx.menu_open);
        assert_eq!(ctx.close_menu(), None);
        assert!(!ctx.menu_open);
    }

    #[test]
    fn test_toggle_theme() {
        let mut ctx = SiteContext::new(Some("light"), false, false);
        assert_eq!(ctx.toggle_theme(), Theme::Dark);
        assert_eq!(ctx.toggle_theme(), Theme::Light);
    }
}
