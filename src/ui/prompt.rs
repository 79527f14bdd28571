//! Line-oriented battle prompt
//!
//! Drives one ranking session from any reader/writer pair, so the same loop
//! serves the terminal and tests.

use std::io::{BufRead, Write};

use crate::core::error::Result;
use crate::core::types::{Candidate, RankedItem};
use crate::ranking::{BeginOutcome, Choice, Ranker, Step, Tier};

/// A parsed line of user input during a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pick(Choice),
    Undo,
    Skip,
    Cancel,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" | "n" | "new" => Some(Command::Pick(Choice::Candidate)),
            "2" | "o" | "opponent" => Some(Command::Pick(Choice::Opponent)),
            "u" | "undo" => Some(Command::Undo),
            "s" | "skip" => Some(Command::Skip),
            "q" | "quit" | "cancel" => Some(Command::Cancel),
            _ => None,
        }
    }
}

/// Place `candidate` by asking the user to compare it against ranked items
///
/// Returns the placed item, or `None` if the candidate was a duplicate, the
/// user cancelled, or input ran out.
pub fn run_battle<R: BufRead, W: Write>(
    ranker: &mut Ranker,
    candidate: Candidate,
    tier: Tier,
    input: &mut R,
    output: &mut W,
) -> Result<Option<RankedItem>> {
    match ranker.begin(candidate, tier)? {
        BeginOutcome::Placed { item, index } => {
            announce(output, &item, index)?;
            return Ok(Some(item));
        }
        BeginOutcome::Duplicate => {
            writeln!(output, "Already in your rankings.")?;
            return Ok(None);
        }
        BeginOutcome::Busy => {
            writeln!(output, "Finish the current battle first.")?;
            return Ok(None);
        }
        BeginOutcome::Battle { .. } => {}
    }

    loop {
        if !render_battle(ranker, output)? {
            ranker.cancel();
            return Ok(None);
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            ranker.cancel();
            writeln!(output)?;
            writeln!(output, "Cancelled.")?;
            return Ok(None);
        }

        let step = match Command::parse(&line) {
            Some(Command::Pick(choice)) => ranker.pick(choice)?,
            Some(Command::Undo) => {
                if !ranker.can_undo() {
                    writeln!(output, "Nothing to undo.")?;
                    continue;
                }
                ranker.undo()?
            }
            Some(Command::Skip) => ranker.skip()?,
            Some(Command::Cancel) => {
                ranker.cancel();
                writeln!(output, "Cancelled.")?;
                return Ok(None);
            }
            None => {
                writeln!(output, "Unknown choice: {}", line.trim())?;
                continue;
            }
        };

        if let Step::Placed { item, index } = step {
            announce(output, &item, index)?;
            return Ok(Some(item));
        }
    }
}

/// Show the current matchup. Returns false if there is nothing to show.
fn render_battle<W: Write>(ranker: &Ranker, output: &mut W) -> Result<bool> {
    let (Some(session), Some(opponent)) = (ranker.session(), ranker.opponent()) else {
        return Ok(false);
    };
    let candidate = session.candidate();

    writeln!(output)?;
    writeln!(output, "Which is superior?")?;
    writeln!(output, "  [1] {} ({})", candidate.title, candidate.year_label())?;
    writeln!(output, "  [2] {} ({})", opponent.title, opponent.year_label())?;
    if ranker.can_undo() {
        writeln!(output, "  [u] undo  [s] too tough to call  [q] cancel")?;
    } else {
        writeln!(output, "  [s] too tough to call  [q] cancel")?;
    }
    write!(output, "> ")?;
    output.flush()?;
    Ok(true)
}

fn announce<W: Write>(output: &mut W, item: &RankedItem, index: usize) -> Result<()> {
    writeln!(
        output,
        "Placed {} at #{} with {:.1} ({})",
        item.title,
        index + 1,
        item.score,
        item.tier
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("1\n"), Some(Command::Pick(Choice::Candidate)));
        assert_eq!(Command::parse(" O "), Some(Command::Pick(Choice::Opponent)));
        assert_eq!(Command::parse("undo"), Some(Command::Undo));
        assert_eq!(Command::parse("s"), Some(Command::Skip));
        assert_eq!(Command::parse("q"), Some(Command::Cancel));
        assert_eq!(Command::parse("maybe"), None);
    }
}
