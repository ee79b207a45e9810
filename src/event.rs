use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Terminal events fed to the app
#[derive(Debug, Clone)]
pub enum Event {
    /// Animation tick (spinner)
    Tick,
    /// Time to draw a frame
    Render,
    Key(KeyEvent),
    Resize(u16, u16),
}

impl Event {
    pub fn is_force_quit(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
        )
    }
}
