use super::ChatRequest;
use super::ExecutionRequest;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Panel {
    Execution,
    Chat,
}

#[derive(Debug)]
pub enum Action {
    Cancel(Panel),
    ChatRequest(ChatRequest),
    ExecutionRequest(ExecutionRequest),
    ListRuntimes(),
}
