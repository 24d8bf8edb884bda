//! Terminal front-end: one-shot rendering and a stdin REPL for local testing.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::classifier::{ProposedAction, classify};

/// Human-readable rendering: the confirmation prompt plus kind and confidence.
pub fn render(action: &ProposedAction) -> String {
    format!(
        "{}\n  [{} · confidence {:.2}]",
        action.confirmation_message(),
        action.kind(),
        action.confidence()
    )
}

/// Pretty JSON rendering, same shape as the API's `action` field.
pub fn render_json(action: &ProposedAction) -> serde_json::Result<String> {
    serde_json::to_string_pretty(action)
}

/// Read utterances line by line and write one rendered action per line.
///
/// Blank lines are skipped; `/quit`, `/exit` or EOF end the loop. Returns
/// how many utterances were classified.
pub async fn run<R, W>(reader: R, mut writer: W) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut classified = 0;

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        if matches!(line, "/quit" | "/exit") {
            break;
        }

        let action = classify(line);
        writer
            .write_all(format!("{}\n\n", render(&action)).as_bytes())
            .await?;
        writer.flush().await?;
        classified += 1;
        eprint!("> ");
    }

    Ok(classified)
}
