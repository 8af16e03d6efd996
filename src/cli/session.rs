use std::io::{self, BufRead, Write};

use log::trace;

use crate::{
    environment::Environment,
    evaluator::Evaluator,
    object::Object,
    output::render,
    parser::{parse, ParseError},
};

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Blank line; nothing ran
    Empty,
    /// The line was `exit`
    Exit,
    /// The line did not parse and was not evaluated
    ParseFailed(Vec<ParseError>),
    /// The line ran and produced this result
    Evaluated(Object),
}

impl LineOutcome {
    /// True for parse failures and error results.
    pub fn is_failure(&self) -> bool {
        match self {
            LineOutcome::ParseFailed(_) => true,
            LineOutcome::Evaluated(obj) => obj.is_error(),
            LineOutcome::Empty | LineOutcome::Exit => false,
        }
    }
}

/// One shell session: the variable bindings plus the evaluator that
/// runs lines against them.
#[derive(Debug, Default)]
pub struct Session {
    env: Environment,
    evaluator: Evaluator,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        Session {
            env: Environment::new(),
            evaluator,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Parses and evaluates one line without printing anything.
    pub fn execute_line(&mut self, line: &str) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Empty;
        }
        if line == "exit" {
            return LineOutcome::Exit;
        }

        match parse(line) {
            Ok(program) => {
                trace!("evaluating {}", program);
                LineOutcome::Evaluated(self.evaluator.eval(&program, &mut self.env))
            }
            Err(errors) => LineOutcome::ParseFailed(errors),
        }
    }

    /// Runs one line and writes its result: parse errors and error results
    /// to `err`, everything else to `out`.
    pub fn run_line<O: Write, E: Write>(
        &mut self,
        line: &str,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<LineOutcome> {
        let outcome = self.execute_line(line);
        match &outcome {
            LineOutcome::ParseFailed(errors) => {
                for e in errors {
                    writeln!(err, "parse error: {}", e)?;
                }
                err.flush()?;
            }
            LineOutcome::Evaluated(obj) => render(obj).write_to(out, err)?,
            LineOutcome::Empty | LineOutcome::Exit => {}
        }
        Ok(outcome)
    }

    /// Runs every line of `input` until it ends or a line is `exit`.
    ///
    /// Returns whether the last line that ran succeeded.
    pub fn run_script<R: BufRead, O: Write, E: Write>(
        &mut self,
        input: R,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<bool> {
        let mut succeeded = true;
        for line in input.lines() {
            match self.run_line(&line?, out, err)? {
                LineOutcome::Exit => break,
                LineOutcome::Empty => {}
                outcome => succeeded = !outcome.is_failure(),
            }
        }
        Ok(succeeded)
    }
}
