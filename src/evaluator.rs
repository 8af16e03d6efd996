use std::{
    io::Write,
    process::{Command, Stdio},
    thread,
};

use log::debug;
use serde_json::{Map, Value};

use crate::{
    ast::{CommandExpression, Expression, Identifier, Program, Statement, TokenKind},
    builtins::BuiltinTable,
    environment::Environment,
    object::{Object, ObjectType},
};

/// Errors that can occur during evaluation.
///
/// They never escape the evaluator as Rust errors: each one is turned into
/// an [`Object::Error`] carrying its message, so callers see a single
/// result channel.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A builtin that needs pipeline input was run as the first stage
    MissingInput(&'static str),

    /// Pipeline input of the wrong kind
    InputNotJson {
        builtin: &'static str,
        found: ObjectType,
    },

    /// JSON input of a shape the builtin cannot work with
    InputShape {
        builtin: &'static str,
        expected: &'static str,
    },

    /// Wrong number of arguments; holds the usage line
    Usage(&'static str),

    /// More arguments than the builtin accepts
    TooManyArguments(&'static str),

    /// A non-string argument where a string is required
    ArgumentType {
        builtin: &'static str,
        found: ObjectType,
    },

    /// Comparison operator not valid for the compared values
    UnsupportedOperator { op: String, kind: &'static str },

    /// Not a comparison operator at all
    UnknownOperator(String),

    /// `cd` with no argument and no home directory
    HomeNotFound,

    /// Any other builtin failure
    Builtin {
        builtin: &'static str,
        message: String,
    },

    /// Arguments given to a name bound by `let`
    NotACommand(String),

    /// Something other than a command after `|`
    InvalidPipelineStage(String),

    /// The program could not be started
    Spawn { command: String, message: String },

    /// The program exited unsuccessfully
    CommandFailed { command: String, status: String },

    /// An error object produced by a builtin, passed through unchanged
    Raised(String),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::MissingInput(builtin) => {
                write!(f, "{}: requires input from a pipeline", builtin)
            }
            EvalError::InputNotJson { builtin, found } => {
                write!(f, "{}: input must be JSON, got {}", builtin, found)
            }
            EvalError::InputShape { builtin, expected } => {
                write!(f, "{}: can only operate on {}", builtin, expected)
            }
            EvalError::Usage(usage) => write!(f, "usage: {}", usage),
            EvalError::TooManyArguments(builtin) => write!(f, "{}: too many arguments", builtin),
            EvalError::ArgumentType { builtin, found } => {
                write!(f, "{}: arguments must be strings, got {}", builtin, found)
            }
            EvalError::UnsupportedOperator { op, kind } => {
                write!(f, "unsupported operator '{}' for {} values", op, kind)
            }
            EvalError::UnknownOperator(op) => write!(
                f,
                "unknown operator '{}' (expected ==, !=, >, <, >= or <=)",
                op
            ),
            EvalError::HomeNotFound => write!(f, "cd: could not find the home directory"),
            EvalError::Builtin { builtin, message } => write!(f, "{}: {}", builtin, message),
            EvalError::NotACommand(name) => write!(
                f,
                "variable '{}' is not a command and accepts no arguments",
                name
            ),
            EvalError::InvalidPipelineStage(stage) => write!(
                f,
                "invalid right side of pipe: expected a command, got '{}'",
                stage
            ),
            EvalError::Spawn { command, message } => {
                write!(f, "error running '{}': {}", command, message)
            }
            EvalError::CommandFailed { command, status } => {
                write!(f, "error running '{}': {}", command, status)
            }
            EvalError::Raised(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<EvalError> for Object {
    fn from(e: EvalError) -> Self {
        match e {
            EvalError::Raised(message) => Object::Error(message),
            other => Object::Error(other.to_string()),
        }
    }
}

type EvalResult = Result<Object, EvalError>;

/// Lifts an error object into the `Err` channel so `?` can propagate it.
fn check(obj: Object) -> EvalResult {
    match obj {
        Object::Error(message) => Err(EvalError::Raised(message)),
        other => Ok(other),
    }
}

/// Tree-walking interpreter.
///
/// Holds only the builtin table; all session state lives in the
/// [`Environment`] passed to [`Evaluator::eval`].
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    builtins: BuiltinTable,
}

impl Evaluator {
    /// An evaluator with the standard builtins.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins(builtins: BuiltinTable) -> Self {
        Evaluator { builtins }
    }

    pub fn builtins(&self) -> &BuiltinTable {
        &self.builtins
    }

    /// Evaluates every statement in order and returns the last result.
    ///
    /// Stops at the first statement that yields an error and returns that
    /// error. An empty program yields `Null`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonsh::{parse, Environment, Evaluator, Object};
    ///
    /// let mut env = Environment::new();
    /// let evaluator = Evaluator::new();
    ///
    /// let program = parse("let greeting = \"hello\"").unwrap();
    /// assert_eq!(evaluator.eval(&program, &mut env), Object::Null);
    ///
    /// let program = parse("greeting").unwrap();
    /// assert_eq!(evaluator.eval(&program, &mut env), Object::String("hello".into()));
    /// ```
    pub fn eval(&self, program: &Program, env: &mut Environment) -> Object {
        let mut result = Object::Null;
        for stmt in &program.statements {
            result = self.eval_statement(stmt, env).unwrap_or_else(Object::from);
            if result.is_error() {
                break;
            }
        }
        result
    }

    fn eval_statement(&self, stmt: &Statement, env: &mut Environment) -> EvalResult {
        match stmt {
            Statement::Let(let_stmt) => {
                let value = self.eval_expression(&let_stmt.value, env)?;
                debug!("binding {} to {}", let_stmt.name, value.object_type());
                env.set(let_stmt.name.value.clone(), value);
                Ok(Object::Null)
            }
            Statement::Expression(expr_stmt) => self.eval_expression(&expr_stmt.expression, env),
        }
    }

    fn eval_expression(&self, expr: &Expression, env: &Environment) -> EvalResult {
        match expr {
            Expression::Identifier(ident) => Ok(self.eval_identifier(ident, env)),
            Expression::StringLiteral(lit) => Ok(Object::String(lit.value.clone())),
            Expression::Command(cmd) => self.eval_command(cmd, env, None),
            Expression::Pipeline(pipe) => {
                let input = self.eval_expression(&pipe.left, env)?;
                self.eval_stage(&pipe.right, env, input)
            }
        }
    }

    /// Runs the right-hand side of a `|` with `input` as its input. Nested
    /// pipelines thread each stage's result into the next.
    fn eval_stage(&self, expr: &Expression, env: &Environment, input: Object) -> EvalResult {
        match expr {
            Expression::Command(cmd) => self.eval_command(cmd, env, Some(&input)),
            Expression::Pipeline(pipe) => {
                let intermediate = self.eval_stage(&pipe.left, env, input)?;
                debug!("pipeline stage produced {}", intermediate.object_type());
                self.eval_stage(&pipe.right, env, intermediate)
            }
            other => Err(EvalError::InvalidPipelineStage(other.to_string())),
        }
    }

    /// Bound variables first, then builtins; any other name is a plain word.
    fn eval_identifier(&self, ident: &Identifier, env: &Environment) -> Object {
        if let Some(value) = env.get(&ident.value) {
            return value.clone();
        }
        if let Some(builtin) = self.builtins.get(&ident.value) {
            return Object::Builtin(*builtin);
        }
        Object::String(ident.value.clone())
    }

    fn eval_command(
        &self,
        cmd: &CommandExpression,
        env: &Environment,
        input: Option<&Object>,
    ) -> EvalResult {
        // A bare variable name substitutes its value
        if let Some(value) = env.get(&cmd.name.value) {
            if !cmd.args.is_empty() {
                return Err(EvalError::NotACommand(cmd.name.value.clone()));
            }
            return Ok(value.clone());
        }

        if cmd.token.is(TokenKind::Vars) && !self.builtins.contains(&cmd.name.value) {
            return list_vars(cmd, env);
        }

        let name = self.eval_identifier(&cmd.name, env);
        let args = cmd
            .args
            .iter()
            .map(|arg| self.eval_expression(arg, env))
            .collect::<Result<Vec<_>, _>>()?;

        match name {
            Object::Builtin(builtin) => {
                debug!("calling builtin {} with {} argument(s)", builtin.name, args.len());
                check(builtin.call(input, &args))
            }
            other => run_external(&other.inspect(), &args, input),
        }
    }
}

/// `vars`: every binding as one JSON object.
fn list_vars(cmd: &CommandExpression, env: &Environment) -> EvalResult {
    if !cmd.args.is_empty() {
        return Err(EvalError::Usage("vars"));
    }
    let bindings: Map<String, Value> = env
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_json_value()))
        .collect();
    Ok(Object::Json(Value::Object(bindings)))
}

/// Spawns `program` and waits for it.
///
/// Each argument is passed as its textual rendering. Standard input is the
/// rendering of `input`, or the session's own stdin for a first stage;
/// stderr is inherited; stdout is captured whole and coerced through
/// [`Object::from_process_output`].
fn run_external(program: &str, args: &[Object], input: Option<&Object>) -> EvalResult {
    let argv: Vec<String> = args.iter().map(Object::inspect).collect();
    debug!("spawning {} {:?}", program, argv);

    let spawn_error = |e: std::io::Error| EvalError::Spawn {
        command: program.to_string(),
        message: e.to_string(),
    };

    let mut child = Command::new(program)
        .args(&argv)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(spawn_error)?;

    let output = match input {
        Some(input) => {
            let data = input.inspect();
            let stdin = child.stdin.take();
            // Feed stdin from a second thread so a child that fills its
            // stdout pipe before draining stdin cannot deadlock us.
            thread::scope(|scope| {
                scope.spawn(move || {
                    if let Some(mut stdin) = stdin
                        && let Err(e) = stdin.write_all(data.as_bytes())
                    {
                        debug!("{} stopped reading its input: {}", program, e);
                    }
                });
                child.wait_with_output()
            })
        }
        None => child.wait_with_output(),
    }
    .map_err(spawn_error)?;

    if !output.status.success() {
        return Err(EvalError::CommandFailed {
            command: program.to_string(),
            status: output.status.to_string(),
        });
    }

    debug!("{} wrote {} byte(s)", program, output.stdout.len());
    Ok(Object::from_process_output(&output.stdout))
}
