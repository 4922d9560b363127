//! Verdict and rendering of a comparison run.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::violation::Violation;

/// Banner printed before the violation list.
pub const BREAKING_BANNER: &str = "Breaking API contract changes detected:";

/// Single line printed when the candidate is compatible.
pub const COMPATIBLE_LINE: &str = "No breaking API contract changes detected.";

/// Outcome of a comparison. There is no warning tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Compatible,
    Breaking,
}

impl Verdict {
    /// Process exit status for this verdict.
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Compatible => 0,
            Verdict::Breaking => 1,
        }
    }
}

/// All violations of one baseline/candidate pair, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub breaking: bool,
    pub violations: Vec<Violation>,
}

impl Report {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self {
            breaking: !violations.is_empty(),
            violations,
        }
    }

    pub fn verdict(&self) -> Verdict {
        if self.violations.is_empty() {
            Verdict::Compatible
        } else {
            Verdict::Breaking
        }
    }

    /// Write the human-readable form: the compatible line, or the banner
    /// followed by one ` - <message>` bullet per violation.
    pub fn write_text<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.violations.is_empty() {
            return writeln!(writer, "{COMPATIBLE_LINE}");
        }
        writeln!(writer, "{BREAKING_BANNER}")?;
        for violation in &self.violations {
            writeln!(writer, " - {violation}")?;
        }
        Ok(())
    }

    pub fn render_text(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_text(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
