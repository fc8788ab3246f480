//! Scripted test run.
//!
//! Drives the sequencer from a text script and prints the frames a renderer
//! would receive. One frame is rendered after every line.
//!
//! Script syntax, one command per line, `#` starts a comment:
//!
//! ```text
//! next | prev                 step through the tests
//! jump N                      go to test N
//! adjust +N|-N [shift]        change the current test's value
//! checker +1|-1               cycle the checkerboard layout
//! text                        toggle explanatory text
//! cooldown                    enter cooldown
//! tick SECONDS                render one frame after SECONDS
//! refresh                     re-query the display next frame
//! ```

use crate::RunArgs;
use crate::config::Profile;
use anyhow::{Context, Result, bail};
use hdrcal_display::CalibrationState;
use hdrcal_sequencer::{Command, FrameOutput, Sequencer};
use tracing::{debug, info};

/// One parsed script line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Sequencer command.
    Apply(Command),
    /// Advance timers by this many seconds.
    Tick(f32),
    /// Mark the display info stale.
    Refresh,
}

/// Parses one script line; blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Step>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    let step = match word.to_ascii_lowercase().as_str() {
        "next" | "n" => Step::Apply(Command::NextTest),
        "prev" | "p" => Step::Apply(Command::PrevTest),
        "jump" | "j" => Step::Apply(Command::JumpToTest(number(arg, word)?)),
        "adjust" | "a" => {
            let increment = number(arg, word)?;
            let shift = match words.next() {
                None => false,
                Some("shift") => true,
                Some(other) => bail!("unexpected '{other}' after adjust"),
            };
            Step::Apply(Command::AdjustValue { increment, shift })
        }
        "checker" | "c" => Step::Apply(Command::SelectCheckerboard(number(arg, word)?)),
        "text" | "t" => Step::Apply(Command::ToggleExplanatoryText),
        "cooldown" => Step::Apply(Command::StartCooldown),
        "tick" => {
            let seconds: f32 = number(arg, word)?;
            if seconds.is_nan() || seconds < 0.0 {
                bail!("tick needs a non-negative number of seconds");
            }
            Step::Tick(seconds)
        }
        "refresh" => Step::Refresh,
        other => bail!("unknown command '{other}'"),
    };
    if let Some(extra) = words.next() {
        bail!("unexpected '{extra}' after {word}");
    }
    Ok(Some(step))
}

fn number<T: std::str::FromStr>(arg: Option<&str>, word: &str) -> Result<T> {
    let arg = arg.with_context(|| format!("{word} needs an argument"))?;
    arg.parse()
        .map_err(|_| anyhow::anyhow!("'{arg}' is not a valid argument for {word}"))
}

/// Parses a whole script.
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (n, line) in script.lines().enumerate() {
        if let Some(step) = parse_line(line).with_context(|| format!("line {}", n + 1))? {
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Runs the run command.
pub fn run(args: RunArgs, verbose: bool) -> Result<()> {
    let profile = Profile::load(args.profile.profile.as_deref())?;
    let mut steps = match &args.script {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read script: {}", path.display()))?;
            parse_script(&text).with_context(|| format!("Invalid script: {}", path.display()))?
        }
        None => Vec::new(),
    };
    for cmd in &args.commands {
        if let Some(step) = parse_line(cmd).with_context(|| format!("Invalid command: {cmd}"))? {
            steps.push(step);
        }
    }
    info!(profile = %profile.name, steps = steps.len(), "starting run");

    let mut provider = profile.provider();
    let mut seq = Sequencer::new(CalibrationState::new());
    let first = seq.step(&mut provider, 0.0);
    print_frame(&first, verbose);

    for step in steps {
        let elapsed = match step {
            Step::Apply(command) => {
                if let Err(e) = seq.apply(command) {
                    eprintln!("Ignored '{command}': {e}");
                }
                args.frame_time
            }
            Step::Tick(seconds) => seconds,
            Step::Refresh => {
                seq.state_mut().mark_stale();
                args.frame_time
            }
        };
        let frame = seq.step(&mut provider, elapsed);
        debug!(test = %frame.test, dirty = frame.metadata_dirty, "frame");
        if frame.metadata_dirty || args.all {
            print_frame(&frame, verbose);
        }
    }
    println!("Display queries: {}", provider.queries());
    Ok(())
}

fn print_frame(f: &FrameOutput, verbose: bool) {
    let mut line = format!("{:<44} {} {:>8.1} nits", f.test.to_string(), f.color_mode, f.nits);
    if let Some(s) = f.remaining_seconds {
        line.push_str(&format!("  {s:>6.1}s"));
    }
    if f.flash_on {
        line.push_str("  flash");
    }
    if let Some(i) = f.selected {
        line.push_str(&format!("  sel {i}"));
    }
    if let Some((tile, max)) = f.profile_tile {
        line.push_str(&format!("  tile {tile}/{max}"));
    }
    if let Some(cb) = f.checkerboard {
        let (cols, rows) = cb.grid();
        line.push_str(&format!("  {cols}x{rows}"));
    }
    if !f.resource_valid {
        line.push_str("  [resource missing]");
    }
    if f.defaults_in_use {
        line.push_str("  [defaults]");
    }
    println!("{line}");
    println!("    {}", f.metadata);
    if verbose {
        for (i, p) in f.patches.iter().enumerate() {
            println!(
                "    patch {i}: working {:.4} {:.4} {:.4}  hdr10 {:.4} {:.4} {:.4}",
                p.working.x, p.working.y, p.working.z, p.hdr10.x, p.hdr10.y, p.hdr10.z
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("next").unwrap(), Some(Step::Apply(Command::NextTest)));
        assert_eq!(parse_line("  P ").unwrap(), Some(Step::Apply(Command::PrevTest)));
        assert_eq!(
            parse_line("jump 7").unwrap(),
            Some(Step::Apply(Command::JumpToTest(7)))
        );
        assert_eq!(
            parse_line("adjust -1 shift").unwrap(),
            Some(Step::Apply(Command::AdjustValue { increment: -1, shift: true }))
        );
        assert_eq!(
            parse_line("adjust +2").unwrap(),
            Some(Step::Apply(Command::AdjustValue { increment: 2, shift: false }))
        );
        assert_eq!(
            parse_line("checker -1").unwrap(),
            Some(Step::Apply(Command::SelectCheckerboard(-1)))
        );
        assert_eq!(parse_line("tick 2.5").unwrap(), Some(Step::Tick(2.5)));
        assert_eq!(parse_line("refresh").unwrap(), Some(Step::Refresh));
    }

    #[test]
    fn test_parse_comments_and_blanks() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # just a note").unwrap(), None);
        assert_eq!(parse_line("text # toggle").unwrap(), Some(Step::Apply(Command::ToggleExplanatoryText)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("jump").is_err());
        assert!(parse_line("jump seven").is_err());
        assert!(parse_line("jump -1").is_err());
        assert!(parse_line("adjust 1 ctrl").is_err());
        assert!(parse_line("tick -3").is_err());
        assert!(parse_line("next 3").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn test_script_error_names_line() {
        let err = parse_script("next\n\nbogus\n").unwrap_err();
        assert_eq!(err.to_string(), "line 3");
    }

    #[test]
    fn test_script_drives_sequencer() {
        let steps = parse_script("jump 7\ncooldown\ntick 1\nnext\n").unwrap();
        let mut provider = Profile::builtin().provider();
        let mut seq = Sequencer::new(CalibrationState::new());
        for step in steps {
            match step {
                Step::Apply(c) => seq.apply(c).unwrap(),
                Step::Tick(s) => {
                    seq.step(&mut provider, s);
                }
                Step::Refresh => seq.state_mut().mark_stale(),
            }
        }
        assert_eq!(seq.current().index(), 7);
    }
}
