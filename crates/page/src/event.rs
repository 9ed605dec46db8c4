use html::Id;

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Click on `target`; behaviours see it on `target` and all its ancestors.
    Click { target: Id },
    /// The value of a text control changed.
    Input { target: Id, value: String },
    /// The viewport scrolled to `y` px from the top of the document.
    Scroll { y: f32 },
    MouseEnter { target: Id },
    MouseLeave { target: Id },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// A behaviour handled the event in place of the host's default action.
    pub default_prevented: bool,
}

impl EventOutcome {
    pub const PREVENTED: Self = Self {
        default_prevented: true,
    };

    pub fn merge(self, other: Self) -> Self {
        Self {
            default_prevented: self.default_prevented || other.default_prevented,
        }
    }
}
