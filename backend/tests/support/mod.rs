//! In-process HTTP world shared by the behaviour suites.
//!
//! Steps are synchronous, so each request spins up a fresh actix system and
//! app over the same [`TestServices`]. The shared session key lets the cookie
//! from one request authenticate the next.

use std::cell::RefCell;

use actix_web::cookie::Cookie;
use actix_web::http::Method;
use actix_web::test;
use serde_json::Value;
use usuarios::test_support::{TestServices, test_app};

/// Status and decoded JSON body of the last response.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub status: u16,
    pub body: Value,
}

pub struct HttpWorld {
    pub services: TestServices,
    cookie: RefCell<Option<Cookie<'static>>>,
    last: RefCell<Option<Recorded>>,
}

impl HttpWorld {
    pub fn new() -> Self {
        Self {
            services: TestServices::new(),
            cookie: RefCell::new(None),
            last: RefCell::new(None),
        }
    }

    /// Send a request, carrying the current session cookie when one is held.
    pub fn send(&self, method: Method, path: &str, payload: Option<Value>) {
        let cookie = self.cookie.borrow().clone();
        let services = self.services.clone();
        let path = path.to_owned();

        let (status, issued, body) = actix_rt::System::new().block_on(async move {
            let app = test::init_service(test_app(&services)).await;
            let mut request = test::TestRequest::default().method(method).uri(&path);
            if let Some(cookie) = cookie {
                request = request.cookie(cookie);
            }
            if let Some(payload) = payload {
                request = request.set_json(payload);
            }

            let res = test::call_service(&app, request.to_request()).await;
            let status = res.status().as_u16();
            let issued = res
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .map(Cookie::into_owned);
            let bytes = test::read_body(res).await;
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, issued, body)
        });

        if let Some(cookie) = issued {
            *self.cookie.borrow_mut() = Some(cookie);
        }
        *self.last.borrow_mut() = Some(Recorded { status, body });
    }

    pub fn register(&self, name: &str, username: &str, password: &str, roles: Option<&[&str]>) {
        let mut payload = serde_json::json!({
            "name": name,
            "username": username,
            "password": password,
        });
        if let Some(roles) = roles {
            payload["roles"] = serde_json::json!(roles);
        }
        self.send(Method::POST, "/usuarios/create", Some(payload));
    }

    pub fn login(&self, username: &str, password: &str) {
        self.send(
            Method::POST,
            "/login",
            Some(serde_json::json!({ "username": username, "password": password })),
        );
    }

    pub fn last(&self) -> Recorded {
        self.last.borrow().clone().expect("a request was sent")
    }
}
