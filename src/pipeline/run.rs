//! pipeline::run
//!
//! Execute a shell line in a provisioned container and extract its stdout.

use tracing::{debug, instrument};

use crate::container::{Container, ContainerEngine, EngineError};

/// Run `sh -c <line>` on top of `container` and return stdout with one
/// trailing newline removed.
#[instrument(skip(engine, container), fields(engine = engine.name()))]
pub async fn run(
    engine: &dyn ContainerEngine,
    container: Container,
    line: &str,
) -> Result<String, EngineError> {
    let container = container.with_exec(["sh", "-c", line]);
    let output = engine.stdout(&container).await?;
    debug!(bytes = output.len(), "command finished");
    Ok(trim_trailing_newline(output))
}

/// Strip exactly one trailing `\n`, if present.
pub fn trim_trailing_newline(mut output: String) -> String {
    if output.ends_with('\n') {
        output.pop();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::mock::RecordingEngine;

    #[test]
    fn trims_exactly_one_newline() {
        assert_eq!(trim_trailing_newline("1.2.3\n".into()), "1.2.3");
        assert_eq!(trim_trailing_newline("1.2.3".into()), "1.2.3");
        assert_eq!(trim_trailing_newline("a\n\n".into()), "a\n");
        assert_eq!(trim_trailing_newline(String::new()), "");
    }

    #[tokio::test]
    async fn runs_line_through_sh() {
        let engine = RecordingEngine::with_output("ok\n");
        let output = run(&engine, Container::from("rust:latest"), "cog check")
            .await
            .unwrap();

        assert_eq!(output, "ok");
        assert_eq!(engine.last_shell_line().as_deref(), Some("cog check"));
    }

    #[tokio::test]
    async fn failure_keeps_code_and_stderr() {
        let engine = RecordingEngine::failing(Some(1), "Error: invalid commit");
        let err = run(&engine, Container::from("rust:latest"), "cog verify \"x\"")
            .await
            .unwrap_err();

        match err {
            EngineError::Exec { code, stderr } => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "Error: invalid commit");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
