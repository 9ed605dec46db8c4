/// Milliseconds on the page's virtual clock.
pub type Millis = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Vertical alignment requested when scrolling an element into view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBlock {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}
