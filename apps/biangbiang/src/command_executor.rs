use std::collections::VecDeque;

use bb_app::Mode;

/// Host-side commands produced from core effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    /// Convert text to Pinyin and queue its translation.
    ProcessText { request_id: u64, text: String },
    ClearOutputs,
    CopyToClipboard(String),
    ShowCopiedToast,
    HideCopiedToast,
    RecognizeCapturedImage { request_id: u64 },
    PinyinToggled(bool),
    ModeChanged(Mode),
    /// Feed an action back into the core model.
    Core(bb_app::Action),
}

/// Command queue.
///
/// Runs commands iteratively; commands produced while executing are appended
/// to the back.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
    executed_count: usize,
}

/// Safety valve against command cycles.
pub const MAX_ITERATIONS: usize = 1000;

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        if !matches!(command, Command::None) {
            self.pending.push_back(command);
        }
    }

    pub fn push_batch(&mut self, commands: impl IntoIterator<Item = Command>) {
        for cmd in commands {
            self.push(cmd);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn executed_count(&self) -> usize {
        self.executed_count
    }

    /// Execute until the queue is empty or [`MAX_ITERATIONS`] is reached.
    pub fn process_all<E: CommandExecutor + ?Sized>(&mut self, executor: &mut E) {
        let mut iteration = 0;

        while let Some(command) = self.pending.pop_front() {
            self.executed_count += 1;
            let new_commands = executor.execute_command(command);
            self.push_batch(new_commands);

            iteration += 1;
            if iteration >= MAX_ITERATIONS {
                log::warn!(
                    "Command queue exceeded {MAX_ITERATIONS} iterations, dropping {} pending",
                    self.pending.len()
                );
                self.pending.clear();
                break;
            }
        }
    }
}

pub trait CommandExecutor {
    /// Execute one command and return any follow-up commands.
    fn execute_command(&mut self, command: Command) -> Vec<Command>;

    fn execute_command_chain(&mut self, commands: Vec<Command>) {
        let mut queue = CommandQueue::new();
        queue.push_batch(commands);
        queue.process_all(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        seen: Vec<Command>,
    }

    impl CommandExecutor for Recorder {
        fn execute_command(&mut self, command: Command) -> Vec<Command> {
            self.seen.push(command.clone());
            match command {
                Command::ShowCopiedToast => vec![Command::HideCopiedToast, Command::None],
                _ => Vec::new(),
            }
        }
    }

    struct Looper;

    impl CommandExecutor for Looper {
        fn execute_command(&mut self, command: Command) -> Vec<Command> {
            vec![command]
        }
    }

    #[test]
    fn follow_ups_run_after_queued_commands() {
        let mut r = Recorder { seen: Vec::new() };
        r.execute_command_chain(vec![Command::ShowCopiedToast, Command::ClearOutputs]);
        assert_eq!(
            r.seen,
            vec![
                Command::ShowCopiedToast,
                Command::ClearOutputs,
                Command::HideCopiedToast
            ]
        );
    }

    #[test]
    fn none_is_never_queued() {
        let mut q = CommandQueue::new();
        q.push(Command::None);
        assert!(q.is_empty());
        q.push(Command::ClearOutputs);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn cycles_are_cut_off() {
        let mut q = CommandQueue::new();
        q.push(Command::ClearOutputs);
        q.process_all(&mut Looper);
        assert_eq!(q.executed_count(), MAX_ITERATIONS);
        assert!(q.is_empty());
    }
}
