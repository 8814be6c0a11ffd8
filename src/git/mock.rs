use crate::error::Result;
use crate::git::{CommandOutput, CommandRunner};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// Scripted command runner for testing without a real repository.
///
/// Responses are keyed by the exact argument list. When several responses
/// are queued for the same arguments they are returned in order and the
/// last one repeats. Unscripted commands succeed with empty output.
pub struct MockRunner {
    responses: Mutex<HashMap<Vec<String>, VecDeque<CommandOutput>>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds silently
    pub fn new() -> Self {
        MockRunner {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a full response for `args`
    pub fn push_response(&self, args: &[&str], output: CommandOutput) {
        lock(&self.responses)
            .entry(to_key(args))
            .or_default()
            .push_back(output);
    }

    /// Script a successful run printing `stdout`
    pub fn respond(self, args: &[&str], stdout: &str) -> Self {
        self.push_response(args, CommandOutput::success(stdout));
        self
    }

    /// Script a failing run
    pub fn fail(self, args: &[&str], status: i32, stderr: &str) -> Self {
        self.push_response(args, CommandOutput::failure(status, stderr));
        self
    }

    /// Every argument list run so far, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        lock(&self.calls).clone()
    }

    /// Whether a command with exactly these arguments was run
    pub fn was_called(&self, args: &[&str]) -> bool {
        let key = to_key(args);
        lock(&self.calls).iter().any(|c| *c == key)
    }

    /// Whether any command starting with `prefix` was run
    pub fn was_called_with_prefix(&self, prefix: &[&str]) -> bool {
        lock(&self.calls)
            .iter()
            .any(|c| c.len() >= prefix.len() && c.iter().zip(prefix).all(|(a, b)| a == b))
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, _program: &str, args: &[&str]) -> Result<CommandOutput> {
        let key = to_key(args);
        lock(&self.calls).push(key.clone());

        let mut responses = lock(&self.responses);
        let output = match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => CommandOutput::success(""),
        };
        Ok(output)
    }
}

fn to_key(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
