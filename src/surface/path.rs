use crate::error::{PathError, Result};
use crate::math::bezier::CubicBezier;
use crate::math::Point2;
use crate::surface::{PointId, Surface};

/// A single path command, referencing points by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveTo(PointId),
    LineTo(PointId),
    CurveTo {
        cp1: PointId,
        cp2: PointId,
        to: PointId,
    },
    Close,
}

/// An atomic piece of a path, resolved to raw coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line { from: Point2, to: Point2 },
    Curve(CubicBezier),
}

impl Segment {
    /// The segment's start point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        match self {
            Segment::Line { from, .. } => *from,
            Segment::Curve(c) => c.from,
        }
    }

    /// The segment's end point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Segment::Line { to, .. } => *to,
            Segment::Curve(c) => c.to,
        }
    }
}

/// An ordered sequence of commands forming one continuous path.
///
/// Invariants enforced on construction: the path begins with exactly one
/// `MoveTo`, no later command is a `MoveTo`, and `Close` may only appear
/// as the final command. Closing implies a straight line back to the
/// starting point; it is never curved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    commands: Vec<Command>,
}

impl Path {
    /// Builds a path from a command list, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPath`] when the command list violates
    /// the path invariants.
    pub fn new(commands: Vec<Command>) -> Result<Self> {
        match commands.first() {
            Some(Command::MoveTo(_)) => {}
            _ => {
                return Err(PathError::InvalidPath("path must begin with a move".into()).into());
            }
        }
        let last = commands.len() - 1;
        for (i, cmd) in commands.iter().enumerate().skip(1) {
            match cmd {
                Command::MoveTo(_) => {
                    return Err(
                        PathError::InvalidPath("path may only move at its start".into()).into(),
                    );
                }
                Command::Close if i != last => {
                    return Err(
                        PathError::InvalidPath("close must be the final command".into()).into(),
                    );
                }
                _ => {}
            }
        }
        Ok(Self { commands })
    }

    /// Parses the whitespace-tokenized path mini-language, resolving point
    /// names against the surface.
    ///
    /// Syntax: `M <point>`, `L <point>`, `C <cp1> <cp2> <point>`, `z`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Parse`] for malformed input,
    /// [`crate::error::PointError::UnknownPoint`] for unresolvable names,
    /// and [`PathError::InvalidPath`] when the parsed commands violate the
    /// path invariants.
    pub fn parse(surface: &Surface, input: &str) -> Result<Self> {
        let mut tokens = input.split_whitespace();
        let mut commands = Vec::new();
        let resolve = |tokens: &mut std::str::SplitWhitespace<'_>, op: &str| {
            let name = tokens
                .next()
                .ok_or_else(|| PathError::Parse(format!("missing point after '{op}'")))?;
            surface.named(name)
        };
        while let Some(token) = tokens.next() {
            match token {
                "M" => commands.push(Command::MoveTo(resolve(&mut tokens, "M")?)),
                "L" => commands.push(Command::LineTo(resolve(&mut tokens, "L")?)),
                "C" => {
                    let cp1 = resolve(&mut tokens, "C")?;
                    let cp2 = resolve(&mut tokens, "C")?;
                    let to = resolve(&mut tokens, "C")?;
                    commands.push(Command::CurveTo { cp1, cp2, to });
                }
                "z" | "Z" => commands.push(Command::Close),
                other => {
                    return Err(PathError::Parse(format!("unexpected token '{other}'")).into());
                }
            }
        }
        Self::new(commands)
    }

    /// The path's commands, in order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Whether the path ends with a `Close` command.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(Command::Close))
    }

    /// The point the path starts at.
    #[must_use]
    pub fn start(&self) -> PointId {
        match self.commands[0] {
            Command::MoveTo(id) => id,
            // Unreachable: construction guarantees a leading move.
            _ => unreachable!("path begins with a move"),
        }
    }

    /// The point the path ends at. For a closed path this is the starting
    /// point.
    #[must_use]
    pub fn end(&self) -> PointId {
        for cmd in self.commands.iter().rev() {
            match *cmd {
                Command::MoveTo(id) | Command::LineTo(id) | Command::CurveTo { to: id, .. } => {
                    return id;
                }
                Command::Close => return self.start(),
            }
        }
        self.start()
    }

    /// Decomposes the path into atomic segments with resolved coordinates,
    /// in path order. A trailing `Close` becomes a straight line back to
    /// the starting point.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PointError::Expired`] when a referenced
    /// point no longer exists on the surface.
    pub fn segments(&self, surface: &Surface) -> Result<Vec<Segment>> {
        let start = surface.pos(self.start())?;
        let mut current = start;
        let mut segments = Vec::new();
        for cmd in self.commands.iter().skip(1) {
            match *cmd {
                Command::MoveTo(_) => {}
                Command::LineTo(id) => {
                    let to = surface.pos(id)?;
                    segments.push(Segment::Line { from: current, to });
                    current = to;
                }
                Command::CurveTo { cp1, cp2, to } => {
                    let cp1 = surface.pos(cp1)?;
                    let cp2 = surface.pos(cp2)?;
                    let to = surface.pos(to)?;
                    segments.push(Segment::Curve(CubicBezier::new(current, cp1, cp2, to)));
                    current = to;
                }
                Command::Close => {
                    segments.push(Segment::Line {
                        from: current,
                        to: start,
                    });
                    current = start;
                }
            }
        }
        Ok(segments)
    }
}
