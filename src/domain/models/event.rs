use super::ChatEvent;
use super::ExecutionResult;

#[derive(Clone, Debug)]
pub enum Event {
    ChatFailed(String),
    ChatFinished(),
    ChatStream(ChatEvent),
    ExecutionCompleted(ExecutionResult),
    ExecutionFailed(String),
    Notice(String),
}
