//! In-process HTTP server for tests.
//!
//! Routes:
//! - `/status/<code>` answers with that status.
//! - `/page/<name>` answers with a canned HTML page.
//! - anything else echoes `<METHOD> <target>`, plus the request body on a
//!   second line when one was sent.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub(crate) const TITLE_PAGE: &str = "<html><head><title>\n  Hello\n   World  </title></head>\
<body><h1>Heading</h1><p>text</p></body></html>";
pub(crate) const H1_PAGE: &str =
    "<html><head></head><body><h1> Only  Heading </h1><p>text</p></body></html>";
pub(crate) const PLAIN_PAGE: &str = "<html><body><p>  just   some\n text </p></body></html>";

/// Start the server on an ephemeral port and return its base URL.
pub(crate) async fn serve() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("test server addr");

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(handle(stream));
        }
    });

    format!("http://{addr}")
}

async fn handle(mut stream: TcpStream) {
    let Some((method, target, body)) = read_request(&mut stream).await else {
        return;
    };

    let (status, content_type, payload) = route(&method, &target, &body);
    let response = format!(
        "HTTP/1.1 {status} X\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn route(method: &str, target: &str, body: &str) -> (u16, &'static str, String) {
    if let Some(code) = target.strip_prefix("/status/") {
        let code = code.parse().unwrap_or(500);
        return (code, "text/plain", format!("status {code}"));
    }
    if let Some(name) = target.strip_prefix("/page/") {
        let page = match name {
            "title" => TITLE_PAGE,
            "h1" => H1_PAGE,
            "plain" => PLAIN_PAGE,
            _ => "",
        };
        return (200, "text/html", page.to_string());
    }

    let mut echo = format!("{method} {target}");
    if !body.is_empty() {
        echo.push('\n');
        echo.push_str(body);
    }
    (200, "text/plain", echo)
}

async fn read_request(stream: &mut TcpStream) -> Option<(String, String, String)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let body = String::from_utf8_lossy(&buf[head_end..]).to_string();

    Some((method, target, body))
}
