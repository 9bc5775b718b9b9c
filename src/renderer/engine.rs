//! Page engine - fetches documents and reports load lifecycle events
//!
//! One engine task runs per content page. It streams the document so
//! progress can be reported while the body arrives, and extracts the
//! title for the tab label.

use futures_util::StreamExt;
use tokio::sync::{mpsc, oneshot};
use url::Url;

use crate::constants::ABOUT_BLANK;
use crate::messages::renderer::{LoadPhase, RendererEvent};
use crate::pages::PageId;

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Engine task for one page. Processes navigation requests until the
/// page is closed or the whole renderer shuts down.
pub async fn run_page_engine(
    page: PageId,
    client: reqwest::Client,
    event_tx: mpsc::UnboundedSender<RendererEvent>,
    mut nav_rx: mpsc::UnboundedReceiver<String>,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;

            _ = &mut cancel_rx => return,

            address = nav_rx.recv() => {
                match address {
                    Some(address) => {
                        tracing::info!(%page, %address, "navigation started");
                        load_document(page, &client, &address, &event_tx).await;
                        tracing::info!(%page, %address, "navigation finished");
                    }
                    None => return,
                }
            }
        }
    }
}

fn send(event_tx: &mpsc::UnboundedSender<RendererEvent>, event: RendererEvent) {
    // The app actor only goes away during shutdown
    let _ = event_tx.send(event);
}

/// Fetch one document and emit the load lifecycle for it. Fetch errors
/// are reported as failed loads; they never take the engine down.
async fn load_document(
    page: PageId,
    client: &reqwest::Client,
    address: &str,
    event_tx: &mpsc::UnboundedSender<RendererEvent>,
) {
    send(
        event_tx,
        RendererEvent::LoadChanged {
            page,
            phase: LoadPhase::Started,
        },
    );

    // The empty page has no document to fetch
    if address == ABOUT_BLANK {
        send(
            event_tx,
            RendererEvent::LoadChanged {
                page,
                phase: LoadPhase::Committed,
            },
        );
        send(
            event_tx,
            RendererEvent::LoadChanged {
                page,
                phase: LoadPhase::Finished,
            },
        );
        return;
    }

    let response = match client.get(address).send().await {
        Ok(response) => response,
        Err(e) => {
            send(
                event_tx,
                RendererEvent::LoadFailed {
                    page,
                    message: format!("Request failed: {}", e),
                },
            );
            return;
        }
    };

    let final_address = response.url().to_string();
    if final_address != address {
        send(
            event_tx,
            RendererEvent::LoadChanged {
                page,
                phase: LoadPhase::Redirected,
            },
        );
    }
    send(
        event_tx,
        RendererEvent::AddressChanged {
            page,
            address: final_address.clone(),
        },
    );
    send(
        event_tx,
        RendererEvent::LoadChanged {
            page,
            phase: LoadPhase::Committed,
        },
    );

    let total = response.content_length();
    let mut received: u64 = 0;
    let mut body: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => {
                received += bytes.len() as u64;
                body.extend_from_slice(&bytes);
                send(
                    event_tx,
                    RendererEvent::ProgressChanged {
                        page,
                        fraction: estimate_progress(received, total),
                    },
                );
            }
            Err(e) => {
                send(
                    event_tx,
                    RendererEvent::LoadFailed {
                        page,
                        message: format!("Body read failed: {}", e),
                    },
                );
                return;
            }
        }
    }

    let html = String::from_utf8_lossy(&body);
    let title = extract_title(&html).unwrap_or_else(|| host_of(&final_address));
    send(event_tx, RendererEvent::TitleChanged { page, title });
    send(
        event_tx,
        RendererEvent::ProgressChanged {
            page,
            fraction: 1.0,
        },
    );
    send(
        event_tx,
        RendererEvent::LoadChanged {
            page,
            phase: LoadPhase::Finished,
        },
    );
}

/// Fraction of the document received. Without a known length the value
/// approaches but never reaches completion.
fn estimate_progress(received: u64, total: Option<u64>) -> f64 {
    match total {
        Some(total) if total > 0 => (received as f64 / total as f64).min(1.0),
        _ => (1.0 - 1.0 / (1.0 + received as f64 / 16384.0)).min(0.99),
    }
}

/// Extract the document title, with inner whitespace collapsed
pub fn extract_title(html: &str) -> Option<String> {
    let re = regex::Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?;
    let raw = re.captures(html)?.get(1)?.as_str();
    let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Host portion of an address, used as title fallback
fn host_of(address: &str) -> String {
    Url::parse(address)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| address.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_basic() {
        let html = "<html><head><title>Example Domain</title></head></html>";
        assert_eq!(extract_title(html), Some(String::from("Example Domain")));
    }

    #[test]
    fn test_extract_title_collapses_whitespace() {
        let html = "<title>\n  Example\n  Domain\n</title>";
        assert_eq!(extract_title(html), Some(String::from("Example Domain")));
    }

    #[test]
    fn test_extract_title_case_insensitive_with_attributes() {
        let html = r#"<TITLE lang="en">Hello</TITLE>"#;
        assert_eq!(extract_title(html), Some(String::from("Hello")));
    }

    #[test]
    fn test_extract_title_missing_or_empty() {
        assert_eq!(extract_title("<html></html>"), None);
        assert_eq!(extract_title("<title>   </title>"), None);
    }

    #[test]
    fn test_host_fallback() {
        assert_eq!(host_of("https://example.com/some/page"), "example.com");
        assert_eq!(host_of("not a url"), "not a url");
    }

    #[test]
    fn test_progress_estimate() {
        assert_eq!(estimate_progress(50, Some(100)), 0.5);
        assert_eq!(estimate_progress(200, Some(100)), 1.0);
        let unknown = estimate_progress(1 << 30, None);
        assert!(unknown < 1.0);
        let early = estimate_progress(1024, None);
        let later = estimate_progress(65536, None);
        assert!(early < later);
    }
}
