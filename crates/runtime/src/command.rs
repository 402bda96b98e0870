/// Undoable operations as capability traits over an explicit context.
///
/// The context type parameter is the dependency-injection seam: commands
/// mutate whatever application state is threaded into `execute`/`revert`,
/// so there are no global singletons and parallel tests can each own a
/// context. Flat structs implementing the two traits replace deep command
/// class hierarchies.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    ExecuteFailed(String),
    RevertFailed(String),
    NothingToUndo,
    NothingToRedo,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::ExecuteFailed(msg) => write!(f, "command failed: {msg}"),
            CommandError::RevertFailed(msg) => write!(f, "revert failed: {msg}"),
            CommandError::NothingToUndo => write!(f, "nothing to undo"),
            CommandError::NothingToRedo => write!(f, "nothing to redo"),
        }
    }
}

impl std::error::Error for CommandError {}

pub trait Executable<Ctx> {
    fn title(&self) -> &str;
    fn execute(&mut self, ctx: &mut Ctx) -> Result<(), CommandError>;
}

pub trait Revertible<Ctx>: Executable<Ctx> {
    fn revert(&mut self, ctx: &mut Ctx) -> Result<(), CommandError>;
}

/// Runs members in order; a member failure reverts the already-executed
/// prefix (in reverse) so the sequence is all-or-nothing.
pub struct SequenceCommand<Ctx> {
    title: String,
    commands: Vec<Box<dyn Revertible<Ctx>>>,
}

impl<Ctx> SequenceCommand<Ctx> {
    pub fn new(commands: Vec<Box<dyn Revertible<Ctx>>>) -> Self {
        let title = commands
            .iter()
            .map(|c| c.title())
            .collect::<Vec<_>>()
            .join(", ");
        Self { title, commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<Ctx> Executable<Ctx> for SequenceCommand<Ctx> {
    fn title(&self) -> &str {
        &self.title
    }

    fn execute(&mut self, ctx: &mut Ctx) -> Result<(), CommandError> {
        for i in 0..self.commands.len() {
            if let Err(e) = self.commands[i].execute(ctx) {
                for j in (0..i).rev() {
                    let _ = self.commands[j].revert(ctx);
                }
                return Err(e);
            }
        }
        Ok(())
    }
}

impl<Ctx> Revertible<Ctx> for SequenceCommand<Ctx> {
    fn revert(&mut self, ctx: &mut Ctx) -> Result<(), CommandError> {
        for cmd in self.commands.iter_mut().rev() {
            cmd.revert(ctx)?;
        }
        Ok(())
    }
}

/// Bounded undo/redo history.
///
/// Executing a new command truncates the redo branch; exceeding the limit
/// drops the oldest undoable entry.
pub struct CommandHistory<Ctx> {
    limit: usize,
    undo: Vec<Box<dyn Revertible<Ctx>>>,
    redo: Vec<Box<dyn Revertible<Ctx>>>,
}

impl<Ctx> CommandHistory<Ctx> {
    pub const DEFAULT_LIMIT: usize = 50;

    pub fn new() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_titles(&self) -> Vec<&str> {
        self.undo.iter().map(|c| c.title()).collect()
    }

    pub fn execute(
        &mut self,
        mut command: Box<dyn Revertible<Ctx>>,
        ctx: &mut Ctx,
    ) -> Result<(), CommandError> {
        command.execute(ctx)?;
        self.redo.clear();
        self.undo.push(command);
        if self.undo.len() > self.limit {
            self.undo.remove(0);
        }
        Ok(())
    }

    pub fn undo(&mut self, ctx: &mut Ctx) -> Result<(), CommandError> {
        let mut command = self.undo.pop().ok_or(CommandError::NothingToUndo)?;
        match command.revert(ctx) {
            Ok(()) => {
                self.redo.push(command);
                Ok(())
            }
            Err(e) => {
                // A command that failed to revert is in an unknown state;
                // dropping it keeps the history consistent.
                Err(e)
            }
        }
    }

    pub fn redo(&mut self, ctx: &mut Ctx) -> Result<(), CommandError> {
        let mut command = self.redo.pop().ok_or(CommandError::NothingToRedo)?;
        command.execute(ctx)?;
        self.undo.push(command);
        Ok(())
    }
}

impl<Ctx> Default for CommandHistory<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandError, CommandHistory, Executable, Revertible, SequenceCommand};

    #[derive(Debug, Default, PartialEq)]
    struct Counter {
        value: i64,
    }

    struct Add {
        amount: i64,
        fail: bool,
    }

    impl Add {
        fn new(amount: i64) -> Self {
            Self {
                amount,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                amount: 0,
                fail: true,
            }
        }
    }

    impl Executable<Counter> for Add {
        fn title(&self) -> &str {
            "add"
        }

        fn execute(&mut self, ctx: &mut Counter) -> Result<(), CommandError> {
            if self.fail {
                return Err(CommandError::ExecuteFailed("boom".to_string()));
            }
            ctx.value += self.amount;
            Ok(())
        }
    }

    impl Revertible<Counter> for Add {
        fn revert(&mut self, ctx: &mut Counter) -> Result<(), CommandError> {
            ctx.value -= self.amount;
            Ok(())
        }
    }

    #[test]
    fn execute_undo_redo() {
        let mut ctx = Counter::default();
        let mut history = CommandHistory::new();

        history.execute(Box::new(Add::new(5)), &mut ctx).unwrap();
        history.execute(Box::new(Add::new(2)), &mut ctx).unwrap();
        assert_eq!(ctx.value, 7);

        history.undo(&mut ctx).unwrap();
        assert_eq!(ctx.value, 5);
        history.redo(&mut ctx).unwrap();
        assert_eq!(ctx.value, 7);
    }

    #[test]
    fn new_command_clears_redo_branch() {
        let mut ctx = Counter::default();
        let mut history = CommandHistory::new();

        history.execute(Box::new(Add::new(1)), &mut ctx).unwrap();
        history.undo(&mut ctx).unwrap();
        assert!(history.can_redo());

        history.execute(Box::new(Add::new(10)), &mut ctx).unwrap();
        assert!(!history.can_redo());
        assert_eq!(ctx.value, 10);
    }

    #[test]
    fn history_limit_drops_oldest() {
        let mut ctx = Counter::default();
        let mut history = CommandHistory::with_limit(2);

        for _ in 0..3 {
            history.execute(Box::new(Add::new(1)), &mut ctx).unwrap();
        }
        assert_eq!(ctx.value, 3);

        history.undo(&mut ctx).unwrap();
        history.undo(&mut ctx).unwrap();
        assert_eq!(history.undo(&mut ctx), Err(CommandError::NothingToUndo));
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn sequence_reverts_executed_prefix_on_failure() {
        let mut ctx = Counter::default();
        let mut seq = SequenceCommand::new(vec![
            Box::new(Add::new(3)),
            Box::new(Add::new(4)),
            Box::new(Add::failing()),
        ]);

        assert!(seq.execute(&mut ctx).is_err());
        assert_eq!(ctx.value, 0);
    }

    #[test]
    fn sequence_reverts_in_reverse_order() {
        let mut ctx = Counter::default();
        let mut seq = SequenceCommand::new(vec![Box::new(Add::new(3)), Box::new(Add::new(4))]);
        seq.execute(&mut ctx).unwrap();
        assert_eq!(ctx.value, 7);
        seq.revert(&mut ctx).unwrap();
        assert_eq!(ctx.value, 0);
    }
}
