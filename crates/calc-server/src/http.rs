use serde_json::json;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::handler::{CalcHandler, Request, Response};

const MAX_HEAD_BYTES: usize = 8 * 1024;

enum ReadOutcome {
    Complete(Request),
    Malformed,
    Closed,
}

/// Reads one HTTP/1.1 request, dispatches it, writes the response, and
/// leaves the connection to be closed.
///
/// # Errors
///
/// Returns an error if the underlying stream fails mid-read or mid-write.
pub async fn serve_connection<S>(
    mut stream: S,
    conn_id: &str,
    handler: &CalcHandler,
    max_body_bytes: usize,
) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let response = match read_request(&mut stream, max_body_bytes).await? {
        ReadOutcome::Complete(request) => {
            let response = handler.handle(&request);
            info!(
                conn = conn_id,
                method = %request.method,
                path = %request.path,
                status = response.status,
                "request"
            );
            response
        }
        ReadOutcome::Malformed => {
            warn!(conn = conn_id, "malformed request");
            Response {
                status: 400,
                body: json!({ "error": "Bad request" }).to_string(),
            }
        }
        ReadOutcome::Closed => return Ok(()),
    };
    write_response(&mut stream, &response).await
}

async fn read_request<S>(stream: &mut S, max_body_bytes: usize) -> io::Result<ReadOutcome>
where
    S: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        if let Some(idx) = find_head_end(&buf) {
            break idx;
        }
        if buf.len() > MAX_HEAD_BYTES {
            return Ok(ReadOutcome::Malformed);
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(if buf.is_empty() {
                ReadOutcome::Closed
            } else {
                ReadOutcome::Malformed
            });
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.lines();
    let Some(request_line) = lines.next() else {
        return Ok(ReadOutcome::Malformed);
    };
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(path), Some(_version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Ok(ReadOutcome::Malformed);
    };

    let mut content_length = 0;
    for line in lines {
        if let Some((name, value)) = line.split_once(':')
            && name.trim().eq_ignore_ascii_case("content-length")
        {
            match value.trim().parse::<usize>() {
                Ok(n) => content_length = n,
                Err(_) => return Ok(ReadOutcome::Malformed),
            }
        }
    }
    if content_length > max_body_bytes {
        return Ok(ReadOutcome::Malformed);
    }

    let mut body = buf.split_off(head_end + 4);
    if body.len() < content_length {
        let mut rest = vec![0_u8; content_length - body.len()];
        stream.read_exact(&mut rest).await?;
        body.extend_from_slice(&rest);
    } else {
        body.truncate(content_length);
    }

    Ok(ReadOutcome::Complete(Request {
        method: method.to_string(),
        path: path.to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}

const fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

async fn write_response<S>(stream: &mut S, response: &Response) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    let head = format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: application/json\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Access-Control-Allow-Headers: Content-Type\r\n\
         Access-Control-Allow-Methods: POST, OPTIONS\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        response.status,
        status_reason(response.status),
        response.body.len(),
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(response.body.as_bytes()).await?;
    stream.flush().await
}
