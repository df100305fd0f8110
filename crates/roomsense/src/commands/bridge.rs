//! JSON-lines bridge between a UI process and the dispatcher.
//!
//! Each stdin line is one request action (`{"type":"getDevices"}`); each
//! result action is written to stdout as one line. Failed fetches produce
//! no line. Lines that are not valid UTF-8 or not a request are logged and
//! skipped. At EOF the bridge waits for in-flight runs, then exits.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use roomsense_core::{Dispatcher, Request, ServiceConfig, Update};

use crate::error::CliError;

pub async fn handle(service: &ServiceConfig) -> Result<(), CliError> {
    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();
    serve(service, input, output).await
}

/// Run the bridge over arbitrary streams until `input` hits EOF or Ctrl-C.
pub async fn serve<R, W>(service: &ServiceConfig, input: R, output: W) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(service, update_tx)?;
    let writer = tokio::spawn(write_updates(update_rx, output));

    info!(url = %service.base_url, "bridge ready");

    let mut segments = input.split(b'\n');
    let mut read_error = None;
    loop {
        tokio::select! {
            segment = segments.next_segment() => match segment {
                Ok(Some(bytes)) => {
                    if let Some(request) = decode_line(&bytes).and_then(parse_request) {
                        dispatcher.dispatch(request).await;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "stdin read failed, finishing in-flight requests");
                    read_error = Some(e);
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, cancelling in-flight requests");
                dispatcher.shutdown().await;
                break;
            }
        }
    }

    dispatcher.drain().await;
    // Last sender goes with the dispatcher; the writer then sees a closed channel.
    drop(dispatcher);

    writer
        .await
        .map_err(|e| CliError::Internal(format!("update writer panicked: {e}")))??;

    match read_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn decode_line(bytes: &[u8]) -> Option<&str> {
    match std::str::from_utf8(bytes) {
        Ok(line) => Some(line),
        Err(e) => {
            warn!(error = %e, "ignoring request line that is not valid UTF-8");
            None
        }
    }
}

fn parse_request(line: &str) -> Option<Request> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<Request>(line) {
        Ok(request) => Some(request),
        Err(e) => {
            warn!(error = %e, line, "ignoring unrecognised request line");
            None
        }
    }
}

async fn write_updates<W>(
    mut updates: mpsc::UnboundedReceiver<Update>,
    mut output: W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(update) = updates.recv().await {
        let mut line = serde_json::to_vec(&update)?;
        line.push(b'\n');
        output.write_all(&line).await?;
        output.flush().await?;
        debug!(action = update.action_type(), "update written");
    }
    Ok(())
}
