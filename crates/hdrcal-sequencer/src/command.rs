//! Command surface of the sequencer.

use std::fmt;

/// One user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Step to the following test.
    NextTest,
    /// Step to the preceding test.
    PrevTest,
    /// Jump to the test at this index.
    JumpToTest(usize),
    /// Adjust the current test's value.
    AdjustValue {
        /// Usually +1 or -1.
        increment: i32,
        /// Multiplies the increment by ten.
        shift: bool,
    },
    /// Show or hide the explanatory text.
    ToggleExplanatoryText,
    /// Cycle the checkerboard layout; the sign picks the direction.
    SelectCheckerboard(i32),
    /// Enter the cooldown screen, remembering the current test.
    StartCooldown,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::NextTest => f.write_str("next"),
            Command::PrevTest => f.write_str("prev"),
            Command::JumpToTest(n) => write!(f, "jump {n}"),
            Command::AdjustValue { increment, shift } => {
                write!(f, "adjust {increment:+}")?;
                if *shift {
                    f.write_str(" shift")?;
                }
                Ok(())
            }
            Command::ToggleExplanatoryText => f.write_str("text"),
            Command::SelectCheckerboard(d) => write!(f, "checker {d:+}"),
            Command::StartCooldown => f.write_str("cooldown"),
        }
    }
}
