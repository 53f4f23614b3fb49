//! Console report of a finished draw.

use crate::Participant;
use colored::Colorize;
use std::io::{self, Write};

/// Width of the tab stops the name column is padded to.
const NAME_COLUMN: usize = 30;

/// Result of a raffle, ready to print.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    /// Member count reported by the platform.
    pub total: u64,
    /// Members actually collected.
    pub searched: usize,
    /// Winners in draw order.
    pub winners: &'a [Participant],
}

impl<'a> Report<'a> {
    /// Creates a report.
    #[must_use]
    pub fn new(total: u64, searched: usize, winners: &'a [Participant]) -> Self {
        Self {
            total,
            searched,
            winners,
        }
    }

    /// Writes the report. Winners keep the order they were drawn in.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{} {}", "Total users:".blue(), self.total)?;
        writeln!(out, "{} {}", "Search users:".blue(), self.searched)?;
        writeln!(out, "{}", "Congratulations to the following subscribers!".green())?;

        for (index, winner) in self.winners.iter().enumerate() {
            let number = (index + 1).to_string();
            let name = winner.display_name();

            // Pad on the plain text so escape codes do not shift the column.
            let width = number.len() + 2 + name.chars().count();
            let padding = NAME_COLUMN - width % NAME_COLUMN;

            writeln!(
                out,
                "{}. {name}{:padding$}(id: {}, username: {})",
                number.blue(),
                "",
                winner.id,
                winner.username.as_deref().unwrap_or("-"),
            )?;
        }

        Ok(())
    }
}
