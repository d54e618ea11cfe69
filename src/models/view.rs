//! Screen identifiers.

use std::fmt;

/// The screen currently mounted. Owned by the view controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Signup,
    Quiz,
    Result,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Login => "login",
            View::Signup => "signup",
            View::Quiz => "quiz",
            View::Result => "result",
        };
        f.write_str(name)
    }
}
