use crate::render::pipeline::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    ReducedMotion,
    OutOfView,
    TabHidden,
    NotReady,
}

impl PauseReason {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReducedMotion => "reduced motion",
            Self::OutOfView => "out of view",
            Self::TabHidden => "hidden",
            Self::NotReady => "waiting for source",
        }
    }
}

/// Host conditions every scheduled step re-checks before advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSignals {
    pub reduced_motion: bool,
    pub in_view: bool,
    pub tab_visible: bool,
}

impl Default for HostSignals {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            in_view: true,
            tab_visible: true,
        }
    }
}

impl HostSignals {
    pub fn pause_reason(&self) -> Option<PauseReason> {
        if self.reduced_motion {
            Some(PauseReason::ReducedMotion)
        } else if !self.in_view {
            Some(PauseReason::OutOfView)
        } else if !self.tab_visible {
            Some(PauseReason::TabHidden)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    pub signals: HostSignals,
    /// Set by the user to push the animation out of view.
    pub hidden_by_user: bool,
    pub quit_requested: bool,
}

impl InputState {
    pub fn with_reduced_motion(reduced_motion: bool) -> Self {
        Self {
            signals: HostSignals {
                reduced_motion,
                ..HostSignals::default()
            },
            ..Self::default()
        }
    }

    /// Marks the animation on screen and focused regardless of viewport size.
    pub fn assume_visible(&mut self) {
        self.signals.in_view = true;
        self.signals.tab_visible = true;
    }

    /// The animation intersects the terminal when there is room to draw it
    /// and the user has not hidden it.
    pub fn refresh_visibility(&mut self, viewport: Viewport) {
        self.signals.in_view = !self.hidden_by_user && viewport.cols > 0 && viewport.rows > 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_takes_priority() {
        let signals = HostSignals {
            reduced_motion: true,
            in_view: false,
            tab_visible: false,
        };
        assert_eq!(signals.pause_reason(), Some(PauseReason::ReducedMotion));
    }

    #[test]
    fn default_signals_allow_motion() {
        assert_eq!(HostSignals::default().pause_reason(), None);
    }

    #[test]
    fn user_hide_and_empty_viewport_leave_view() {
        let mut state = InputState::default();
        state.refresh_visibility(Viewport::new(80, 24));
        assert!(state.signals.in_view);

        state.refresh_visibility(Viewport::new(80, 0));
        assert!(!state.signals.in_view);

        state.hidden_by_user = true;
        state.refresh_visibility(Viewport::new(80, 24));
        assert_eq!(state.signals.pause_reason(), Some(PauseReason::OutOfView));
    }
}
