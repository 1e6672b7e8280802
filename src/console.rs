//! Operator-facing text output.

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::command::Transition;
use crate::joints::JointStore;
use crate::publisher::PublishError;

const MIN_DECIMALS: usize = 4;
const MAX_DECIMALS: usize = 15;

/// Line-oriented status writer. Colors only when writing to a terminal.
pub struct Console<W: Write> {
    out: W,
    color: bool,
    decimals: usize,
}

impl Console<Stdout> {
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal();
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            decimals: MIN_DECIMALS,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Key help, the joint layout and the current selection.
    ///
    /// Also fixes the position precision so a single `step` is always visible.
    pub fn banner(&mut self, store: &JointStore, step: f64) -> io::Result<()> {
        self.decimals = decimals_for(step);
        self.styled("\n=== Joint keyboard control ===", Color::Cyan, true)?;
        self.line("")?;
        self.line(&format!("1-{}: select joint", store.len()))?;
        self.line(&format!("a/d: move selected joint by -/+{}", step))?;
        self.line("q: quit")?;
        let joints: Vec<String> = store
            .names()
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}={}", i + 1, name))
            .collect();
        self.line(&format!("Joints: {}", joints.join(" ")))?;
        let joint = store.selected();
        self.selection(joint.name, joint.position)?;
        self.out.flush()
    }

    /// Render the visible effect of one command. No-ops print nothing.
    pub fn transition(&mut self, transition: &Transition) -> io::Result<()> {
        match transition {
            Transition::Selected { name, position, .. } => {
                self.line("")?;
                self.selection(name, *position)?;
            }
            Transition::Adjusted {
                direction,
                name,
                position,
                ..
            } => {
                let text = format!(
                    "{} {}: {:.*}",
                    direction.symbol(),
                    name,
                    self.decimals,
                    position
                );
                self.styled(&text, Color::Green, false)?;
                self.line("")?;
            }
            Transition::Quit | Transition::NoOp => return Ok(()),
        }
        self.out.flush()
    }

    pub fn publish_failed(&mut self, err: &PublishError) -> io::Result<()> {
        self.styled(&format!("! publish failed: {}", err), Color::Yellow, false)?;
        self.line("")?;
        self.out.flush()
    }

    pub fn farewell(&mut self, interrupted: bool) -> io::Result<()> {
        let text = if interrupted {
            "\nInterrupted, exiting..."
        } else {
            "\nExiting..."
        };
        self.line(text)?;
        self.out.flush()
    }

    fn selection(&mut self, name: &str, position: f64) -> io::Result<()> {
        self.styled(&format!("Selected joint: {}", name), Color::Cyan, true)?;
        self.line("")?;
        self.line(&format!("Position: {:.*}", self.decimals, position))
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text), Print("\n"))
    }

    fn styled(&mut self, text: &str, color: Color, bold: bool) -> io::Result<()> {
        if !self.color {
            return queue!(self.out, Print(text));
        }
        if bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(
            self.out,
            SetForegroundColor(color),
            Print(text),
            ResetColor,
            SetAttribute(Attribute::Reset)
        )
    }
}

/// One digit past the first significant digit of `step`, at least four.
fn decimals_for(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return MIN_DECIMALS;
    }
    // Bias below exact powers of ten so 1e-5 is not rounded up a digit.
    let leading = (-step.log10() - 1e-9).ceil();
    if leading <= 0.0 {
        return MIN_DECIMALS;
    }
    (leading as usize + 1).clamp(MIN_DECIMALS, MAX_DECIMALS)
}
