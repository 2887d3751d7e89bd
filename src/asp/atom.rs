//! Result atom grammar.
//!
//! The solver answers with ground atoms. Only two shapes carry meaning:
//!
//! ```text
//! schedule(<evaluated>, <timeslot>)
//! certify(<reviewer>, <evaluated>)
//! ```
//!
//! Each argument is a bare identifier: no nested parentheses, no commas.
//! Surrounding whitespace and a trailing `.` are tolerated. Anything else
//! parses as [`Atom::Unrecognized`].

/// A parsed result atom, borrowing from the solver output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom<'a> {
    /// The meeting date chosen for an evaluated participant.
    Schedule { evaluated: &'a str, timeslot: &'a str },
    /// A reviewer assigned to an evaluated participant.
    Certify { reviewer: &'a str, evaluated: &'a str },
    /// Any other atom, kept verbatim.
    Unrecognized(&'a str),
}

impl<'a> Atom<'a> {
    /// Parses one atom.
    ///
    /// # Example
    /// ```
    /// use u_committee::asp::Atom;
    ///
    /// assert_eq!(
    ///     Atom::parse("certify(bob, ana)"),
    ///     Atom::Certify { reviewer: "bob", evaluated: "ana" }
    /// );
    /// assert_eq!(Atom::parse("cost(3)"), Atom::Unrecognized("cost(3)"));
    /// ```
    pub fn parse(text: &'a str) -> Self {
        let Some((relation, first, second)) = split_binary(text) else {
            return Self::Unrecognized(text);
        };
        match relation {
            "schedule" => Self::Schedule {
                evaluated: first,
                timeslot: second,
            },
            "certify" => Self::Certify {
                reviewer: first,
                evaluated: second,
            },
            _ => Self::Unrecognized(text),
        }
    }

    /// Whether the atom is one of the interpreted shapes.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// Splits `rel(a, b)` into its three parts.
fn split_binary(text: &str) -> Option<(&str, &str, &str)> {
    let text = text.trim();
    let text = text.strip_suffix('.').unwrap_or(text).trim_end();
    let (relation, rest) = text.split_once('(')?;
    let args = rest.strip_suffix(')')?;
    if args.contains('(') || args.contains(')') {
        return None;
    }
    let (first, second) = args.split_once(',')?;
    let (first, second) = (first.trim(), second.trim());
    if !is_identifier(relation) || !is_identifier(first) || !is_identifier(second) {
        return None;
    }
    Some((relation, first, second))
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
