//! Boot-time display bring-up
//!
//! A glove without a working display is not worth running, so the only
//! fatal error in the firmware lives here. The result is returned to the
//! entry point, which logs it and halts.

use grabbity_display::{DisplayError, DisplayInit};

/// Why the glove could not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    /// Nothing answered at the display address
    DisplayNotFound,
    /// The display answered but its init sequence failed
    DisplayInit,
}

impl From<DisplayError> for StartupError {
    fn from(_: DisplayError) -> Self {
        StartupError::DisplayInit
    }
}

/// Outcome of bringing up the display
#[derive(Debug)]
pub enum Startup<D> {
    /// Display initialized and ready to draw
    Ready(D),
    /// Boot cannot continue
    Halted(StartupError),
}

impl<D> Startup<D> {
    /// Probe and initialize `display`
    pub fn bring_up(mut display: D) -> Self
    where
        D: DisplayInit,
    {
        if display.probe().is_err() {
            return Startup::Halted(StartupError::DisplayNotFound);
        }
        match display.init() {
            Ok(()) => Startup::Ready(display),
            Err(e) => Startup::Halted(e.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Startup::Ready(_))
    }

    /// Convert into a `Result` for `?` propagation
    pub fn into_result(self) -> Result<D, StartupError> {
        match self {
            Startup::Ready(display) => Ok(display),
            Startup::Halted(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Panel {
        present: bool,
        init_ok: bool,
        initialized: bool,
    }

    impl DisplayInit for Panel {
        fn probe(&mut self) -> Result<(), DisplayError> {
            if self.present {
                Ok(())
            } else {
                Err(DisplayError::Communication)
            }
        }

        fn init(&mut self) -> Result<(), DisplayError> {
            if self.init_ok {
                self.initialized = true;
                Ok(())
            } else {
                Err(DisplayError::Communication)
            }
        }
    }

    fn panel(present: bool, init_ok: bool) -> Panel {
        Panel {
            present,
            init_ok,
            initialized: false,
        }
    }

    #[test]
    fn test_ready() {
        let startup = Startup::bring_up(panel(true, true));
        assert!(startup.is_ready());
        let display = startup.into_result().unwrap();
        assert!(display.initialized);
    }

    #[test]
    fn test_missing_display_halts() {
        let startup = Startup::bring_up(panel(false, true));
        assert!(!startup.is_ready());
        assert_eq!(
            startup.into_result().err(),
            Some(StartupError::DisplayNotFound)
        );
    }

    #[test]
    fn test_failed_init_halts() {
        let startup = Startup::bring_up(panel(true, false));
        assert_eq!(startup.into_result().err(), Some(StartupError::DisplayInit));
    }
}
