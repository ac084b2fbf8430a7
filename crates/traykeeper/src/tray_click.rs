use tray_icon::{MouseButton, MouseButtonState, TrayIconEvent};

/// Icon clicks the controller registers handlers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayClick {
    /// Single left click.
    Left,
    /// Double left click.
    Double,
    /// Single right click.
    Right,
}

impl TrayClick {
    /// Classify a raw tray icon event. Hover and move events yield `None`.
    pub fn from_event(event: &TrayIconEvent) -> Option<Self> {
        match event {
            TrayIconEvent::Click {
                button,
                button_state,
                ..
            } => Self::from_click(*button, *button_state),
            TrayIconEvent::DoubleClick { button, .. } => Self::from_double_click(*button),
            _ => None,
        }
    }

    /// Single clicks fire on release.
    pub fn from_click(button: MouseButton, state: MouseButtonState) -> Option<Self> {
        match (button, state) {
            (MouseButton::Left, MouseButtonState::Up) => Some(Self::Left),
            (MouseButton::Right, MouseButtonState::Up) => Some(Self::Right),
            _ => None,
        }
    }

    /// Only left double clicks are reported.
    pub fn from_double_click(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Self::Double),
            _ => None,
        }
    }
}
