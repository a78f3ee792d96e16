/// A Piston `/execute` response for a Python program that wrote to both
/// streams and exited with status 1.
pub fn failed_execution_fixture() -> &'static str {
    return r#"
{
  "language": "python",
  "version": "3.10.0",
  "run": {
    "stdout": "starting\n",
    "stderr": "Traceback (most recent call last):\nValueError: nope\n",
    "code": 1,
    "signal": null,
    "output": "starting\nTraceback (most recent call last):\nValueError: nope\n"
  }
}
"#
    .trim();
}

/// A Piston `/execute` response where compilation failed and no run stage was
/// produced.
pub fn compile_error_fixture() -> &'static str {
    return r#"
{
  "language": "rust",
  "version": "1.68.2",
  "compile": {
    "stdout": "",
    "stderr": "error[E0425]: cannot find value `x` in this scope\n",
    "code": 1,
    "signal": null,
    "output": "error[E0425]: cannot find value `x` in this scope\n"
  }
}
"#
    .trim();
}

/// A chat event stream covering every event type, including a blank keepalive
/// line and a comment line that must be ignored.
pub fn chat_stream_fixture() -> &'static str {
    return r#"
data: {"type": "conversation_id", "conversation_id": "conv-42"}

: keepalive
data: {"type": "text", "content": "Hel"}
data: {"type": "text", "content": "lo"}
data: {"type": "references", "references": [{"title": "Rust Book", "url": "https://doc.rust-lang.org/book/"}]}
data: {"type": "references", "references": [{"title": "Tokio", "url": "https://tokio.rs", "kind": "docs"}]}
data: {"type": "done"}
"#
    .trim();
}
