use crate::types::{Command, CommandKind};
use std::collections::BTreeMap;

/// Latest pending command per kind.
///
/// Recording a command overwrites any pending command of the same kind; the
/// whole set is replayed after every successful (re)connection. Entries are
/// never removed, only superseded.
#[derive(Debug, Default, Clone)]
pub struct CommandQueue {
    pending: BTreeMap<CommandKind, Vec<String>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, command: Command) {
        self.pending.insert(command.kind, command.args);
    }

    /// Every pending command, ordered by kind
    pub fn replay_all(&self) -> Vec<Command> {
        self.pending
            .iter()
            .map(|(kind, args)| Command {
                kind: *kind,
                args: args.clone(),
            })
            .collect()
    }

    pub fn get(&self, kind: CommandKind) -> Option<Command> {
        self.pending.get(&kind).map(|args| Command {
            kind,
            args: args.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
