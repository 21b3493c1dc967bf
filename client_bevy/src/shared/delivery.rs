use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use bevy::prelude::Resource;
use nexora_shared::contact::{ContactTransport, DeliveryOutcome, DispatchError};
use nexora_shared::protocol::ContactSubmission;

/// Sends contact submissions without blocking the frame. Outcomes come back
/// over a channel and are drained with [`ContactDelivery::poll_outcomes`].
#[derive(Resource)]
pub struct ContactDelivery {
    endpoint: Option<String>,
    outcome_tx: Sender<DeliveryOutcome>,
    outcome_rx: Mutex<Receiver<DeliveryOutcome>>,
    dispatched: u64,
}

impl ContactDelivery {
    pub fn new(endpoint: Option<String>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel::<DeliveryOutcome>();
        Self {
            endpoint: endpoint.filter(|url| !url.trim().is_empty()),
            outcome_tx,
            outcome_rx: Mutex::new(outcome_rx),
            dispatched: 0,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn poll_outcomes(&self) -> Vec<DeliveryOutcome> {
        let mut out = Vec::new();
        if let Ok(rx) = self.outcome_rx.lock() {
            while let Ok(outcome) = rx.try_recv() {
                out.push(outcome);
            }
        }
        out
    }
}

impl ContactTransport for ContactDelivery {
    fn dispatch(&mut self, submission: &ContactSubmission) -> Result<(), DispatchError> {
        let Some(url) = self.endpoint.clone() else {
            return Err(DispatchError::NoEndpoint);
        };
        let body = serde_json::to_string(submission)?;
        send_request(url, body, self.outcome_tx.clone())?;
        self.dispatched += 1;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn send_request(
    url: String,
    body: String,
    outcome_tx: Sender<DeliveryOutcome>,
) -> Result<(), DispatchError> {
    std::thread::Builder::new()
        .name("contact-delivery".to_string())
        .spawn(move || {
            let _ = outcome_tx.send(post_json(&url, &body));
        })
        .map(|_| ())
        .map_err(|e| DispatchError::Spawn(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn post_json(url: &str, body: &str) -> DeliveryOutcome {
    let result = ureq::post(url)
        .header("Content-Type", "application/json")
        .send(body);
    match result {
        Ok(response) => DeliveryOutcome::Delivered {
            status: response.status().as_u16(),
        },
        Err(ureq::Error::StatusCode(status)) => DeliveryOutcome::Delivered { status },
        Err(e) => DeliveryOutcome::Failed {
            reason: e.to_string(),
        },
    }
}

#[cfg(target_arch = "wasm32")]
fn send_request(
    url: String,
    body: String,
    outcome_tx: Sender<DeliveryOutcome>,
) -> Result<(), DispatchError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response, ResponseType};

    let window =
        web_sys::window().ok_or_else(|| DispatchError::Spawn("no browser window".to_string()))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::NoCors);
    init.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&url, &init)
        .map_err(|e| DispatchError::Spawn(format!("{e:?}")))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| DispatchError::Spawn(format!("{e:?}")))?;

    let promise = window.fetch_with_request(&request);
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = match JsFuture::from(promise).await {
            Ok(value) => match value.dyn_into::<Response>() {
                Ok(resp) if resp.type_() == ResponseType::Opaque => DeliveryOutcome::Opaque,
                Ok(resp) => DeliveryOutcome::Delivered {
                    status: resp.status(),
                },
                Err(_) => DeliveryOutcome::Opaque,
            },
            Err(e) => DeliveryOutcome::Failed {
                reason: format!("{e:?}"),
            },
        };
        let _ = outcome_tx.send(outcome);
    });
    Ok(())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    use axum::http::header::CONTENT_TYPE;
    use axum::http::{HeaderMap, Method, StatusCode, Uri};
    use axum::Router;
    use nexora_shared::protocol::Domain;

    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "1234567890".to_string(),
            domain: Domain::Course,
            message: None,
        }
    }

    fn wait_for_outcome(delivery: &ContactDelivery) -> DeliveryOutcome {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(outcome) = delivery.poll_outcomes().into_iter().next() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "no delivery outcome");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    struct ReceivedRequest {
        method: String,
        path: String,
        content_type: Option<String>,
        body: String,
    }

    struct StubEndpoint {
        url: String,
        received: mpsc::Receiver<ReceivedRequest>,
    }

    impl StubEndpoint {
        fn next_request(&self) -> ReceivedRequest {
            self.received
                .recv_timeout(Duration::from_secs(10))
                .expect("endpoint received no request")
        }
    }

    /// Contact endpoint on an ephemeral port that answers every request
    /// with `status` and hands each request back to the test.
    fn stub_endpoint(status: StatusCode) -> StubEndpoint {
        let (request_tx, received) = mpsc::channel();
        let (addr_tx, addr_rx) = mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let app = Router::new().fallback(
                    move |method: Method, uri: Uri, headers: HeaderMap, body: String| {
                        let request_tx = request_tx.clone();
                        async move {
                            let _ = request_tx.send(ReceivedRequest {
                                method: method.to_string(),
                                path: uri.path().to_string(),
                                content_type: headers
                                    .get(CONTENT_TYPE)
                                    .and_then(|v| v.to_str().ok())
                                    .map(str::to_string),
                                body,
                            });
                            (status, "{}")
                        }
                    },
                );
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });
        let addr = addr_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        StubEndpoint {
            url: format!("http://{addr}/api/contact"),
            received,
        }
    }

    #[test]
    fn missing_endpoint_fails_synchronously() {
        let mut delivery = ContactDelivery::new(None);
        assert!(matches!(
            delivery.dispatch(&submission()),
            Err(DispatchError::NoEndpoint)
        ));
        assert_eq!(delivery.dispatched(), 0);

        let blank = ContactDelivery::new(Some("  ".to_string()));
        assert!(blank.endpoint().is_none());
    }

    #[test]
    fn delivered_status_is_reported() {
        let endpoint = stub_endpoint(StatusCode::OK);
        let mut delivery = ContactDelivery::new(Some(endpoint.url.clone()));

        delivery.dispatch(&submission()).unwrap();
        assert_eq!(
            wait_for_outcome(&delivery),
            DeliveryOutcome::Delivered { status: 200 }
        );
        assert_eq!(delivery.dispatched(), 1);

        let request = endpoint.next_request();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/contact");
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
        let sent: ContactSubmission = serde_json::from_str(&request.body).unwrap();
        assert_eq!(sent, submission());
    }

    #[test]
    fn error_status_is_still_a_delivery() {
        let endpoint = stub_endpoint(StatusCode::INTERNAL_SERVER_ERROR);
        let mut delivery = ContactDelivery::new(Some(endpoint.url.clone()));

        delivery.dispatch(&submission()).unwrap();
        let outcome = wait_for_outcome(&delivery);
        assert_eq!(outcome, DeliveryOutcome::Delivered { status: 500 });
        assert!(outcome.is_failure());
        endpoint.next_request();
    }

    #[test]
    fn unreachable_endpoint_reports_failure() {
        // Bind then drop to get a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{port}/api/contact");
        let mut delivery = ContactDelivery::new(Some(url));

        assert!(delivery.dispatch(&submission()).is_ok());
        assert!(matches!(
            wait_for_outcome(&delivery),
            DeliveryOutcome::Failed { .. }
        ));
    }
}
