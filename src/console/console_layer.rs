// Console layer - turns JSON-lines requests into page service calls.
//
// Reads one JSON request per line and writes one JSON response per line:
//
//   {"op":"save","title":"Home","content":"..."}  -> {"ok":true,"slug":"home"}
//   {"op":"get","slug":"home"}                    -> {"ok":true,"page":{...}}
//   {"op":"list"}                                 -> {"ok":true,"pages":[...]}
//   {"op":"delete","slug":"home"}                 -> {"ok":true}
//   {"op":"sweep"}                                -> {"ok":true,"armed":0}
//   {"op":"evictions"}                            -> {"ok":true,"events":[...]}
//
// Bad lines get {"ok":false,"detail":...} and the loop keeps going.

pub mod protocol;

use crate::core::pages::{PageService, PageStore};
use protocol::{failure, ok, Request};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Serve requests until the reader hits EOF.
pub async fn run<S, R, W>(service: &PageService<S>, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    S: PageStore + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                let response = failure(format!("Invalid request: {}", e));
                write_response(&mut writer, &response).await?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => handle(service, request).await,
            Err(e) => failure(format!("Invalid request: {}", e)),
        };

        write_response(&mut writer, &response).await?;
    }

    Ok(())
}

async fn write_response<W>(writer: &mut W, response: &Value) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut encoded = serde_json::to_vec(response)?;
    encoded.push(b'\n');
    writer.write_all(&encoded).await?;
    writer.flush().await?;
    Ok(())
}

/// Execute a single request against the service.
pub async fn handle<S: PageStore + 'static>(service: &PageService<S>, request: Request) -> Value {
    match request {
        Request::Save { title, content } => match service.save(&title, &content).await {
            Ok(outcome) => ok(json!({ "slug": outcome.slug })),
            Err(e) => e.into(),
        },
        Request::Get { slug } => match service.get(&slug).await {
            Ok(page) => ok(json!({ "page": page })),
            Err(e) => e.into(),
        },
        Request::List => match service.list().await {
            Ok(pages) => ok(json!({ "pages": pages })),
            Err(e) => e.into(),
        },
        Request::Delete { slug } => match service.delete(&slug).await {
            Ok(()) => ok(json!({})),
            Err(e) => e.into(),
        },
        Request::Sweep => match service.sweep().await {
            Ok(armed) => ok(json!({ "armed": armed })),
            Err(e) => e.into(),
        },
        Request::Evictions => ok(json!({ "events": service.evictions() })),
    }
}
