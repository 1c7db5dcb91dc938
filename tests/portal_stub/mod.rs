#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n";

pub const STATES_HTML: &str = r#"<option value="">Select State</option>
<option value="26">Delhi</option>
<option value="3">Maharashtra</option>"#;

pub const DISTRICTS_HTML: &str = r#"<option value="">Select District</option>
<option value="8">New Delhi</option>"#;

pub const COMPLEXES_HTML: &str = r#"<option value="">Select Court Complex</option>
<option value="1080010">Patiala House Court Complex</option>"#;

pub const COURTS_HTML: &str = r#"<option value="">Select Court</option>
<option value="3">Court No. 3 - Civil Judge</option>
<option value=""> </option>"#;

pub const EMPTY_COURTS_HTML: &str = r#"<select id="court_code"></select>"#;

pub const CAUSE_LIST_HTML: &str = r#"<!doctype html>
<html><body>
  <a href="?p=home">Home</a>
  <a href="reports/cause_list_pdf.php?court=3&amp;date=2024-01-15">Civil</a>
  <a href="reports/cause_list_pdf.php?court=3&amp;date=2024-01-15&amp;type=crim">Criminal</a>
</body></html>"#;

pub const EMPTY_CAUSE_LIST_HTML: &str = r#"<!doctype html>
<html><body><p>Record not found</p><a href="?p=home">Home</a></body></html>"#;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub delay: Option<Duration>,
}

impl Route {
    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            body: body.as_bytes().to_vec(),
            content_type: "text/html; charset=utf-8",
            delay: None,
        }
    }

    pub fn pdf(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
            content_type: "application/pdf",
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"upstream error".to_vec(),
            content_type: "text/plain",
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub user_agent: Option<String>,
}

/// Local stand-in for the court portal.
pub struct PortalStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

pub fn cause_list_query(court_code: &str, date: &str) -> String {
    format!(
        "/ecourtindia_v6/?p=cause_list&state_code=26&dist_code=8&court_code={court_code}&date={date}"
    )
}

impl PortalStub {
    /// The portal with one state → district → complex → court chain and
    /// an empty court list for complex 1080011, and
    /// cause lists for court 3 (found), 4 (no link) and 5 (server error).
    pub fn ecourts() -> Self {
        Self::spawn(vec![
            ("/ecourtindia_v6/get_state.php".to_owned(), Route::html(STATES_HTML)),
            (
                "/ecourtindia_v6/get_district.php?state_code=26".to_owned(),
                Route::html(DISTRICTS_HTML),
            ),
            (
                "/ecourtindia_v6/get_complex.php?district_code=8".to_owned(),
                Route::html(COMPLEXES_HTML),
            ),
            (
                "/ecourtindia_v6/get_court.php?complex_code=1080010".to_owned(),
                Route::html(COURTS_HTML),
            ),
            (
                "/ecourtindia_v6/get_court.php?complex_code=1080011".to_owned(),
                Route::html(EMPTY_COURTS_HTML),
            ),
            (
                cause_list_query("3", "2024-01-15"),
                Route::html(CAUSE_LIST_HTML),
            ),
            (
                "/ecourtindia_v6/reports/cause_list_pdf.php?court=3&date=2024-01-15".to_owned(),
                Route::pdf(PDF_BYTES),
            ),
            (
                cause_list_query("4", "2024-01-15"),
                Route::html(EMPTY_CAUSE_LIST_HTML),
            ),
            (cause_list_query("5", "2024-01-15"), Route::status(500)),
        ])
    }

    pub fn spawn(routes: Vec<(String, Route)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start portal stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}/ecourtindia_v6/");

        let routes = routes.into_iter().collect::<HashMap<_, _>>();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_string();
                let user_agent = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("User-Agent"))
                    .map(|h| h.value.as_str().to_owned());
                recorded.lock().unwrap().push(RecordedRequest {
                    url: url.clone(),
                    user_agent,
                });

                let Some(route) = routes.get(&url) else {
                    let _ = request.respond(
                        tiny_http::Response::from_string("not found").with_status_code(404),
                    );
                    continue;
                };

                if let Some(delay) = route.delay {
                    thread::sleep(delay);
                }

                let header = tiny_http::Header::from_bytes(
                    &b"Content-Type"[..],
                    route.content_type.as_bytes(),
                )
                .expect("content-type header");
                let response = tiny_http::Response::from_data(route.body.clone())
                    .with_status_code(route.status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested(&self, url: &str) -> bool {
        self.requests().iter().any(|req| req.url == url)
    }
}

impl Drop for PortalStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
