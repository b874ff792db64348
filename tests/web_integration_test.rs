//! Integration tests for the web boundary.
//!
//! These tests drive the example controller the way a host framework would:
//! build a request, run the pre-invocation hook, call the handler, inspect
//! the response.

use std::io::{self, Read};
use std::sync::Arc;
use std::thread;

use json_dto::web::example_handler::{
    get_note, get_notes, get_with_params, note_registry, post_note, post_note_model,
    post_with_body, NoteDto,
};
use json_dto::web::{before_invocation, prepare, ExtractRequest};
use json_dto::{
    read_stream, Body, BufferedResponse, HttpMethod, Request, RESPONSE_CONTENT_TYPE,
    TEXT_CONTENT_TYPE,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn post(content_type: &str, body: &str) -> Request {
    Request::new("req-web", HttpMethod::Post)
        .with_content_type(content_type)
        .with_body(body)
}

#[test]
fn get_note_renders_dto() {
    let mut response = BufferedResponse::new();
    get_note(&mut response).expect("rendered");

    assert_eq!(response.content_type(), Some(RESPONSE_CONTENT_TYPE));
    assert_eq!(response.body_str(), Some(r#"{"tit":"My note"}"#));
}

#[test]
fn get_notes_renders_dto_list() {
    let mut response = BufferedResponse::new();
    get_notes(&mut response).expect("rendered");

    assert_eq!(response.content_type(), Some(RESPONSE_CONTENT_TYPE));
    assert_eq!(
        response.body_str(),
        Some(r#"[{"tit":"foo"},{"tit":"bar"}]"#)
    );
}

#[test]
fn get_with_params_is_left_alone() {
    init_tracing();

    let mut request = Request::new("req-get", HttpMethod::Get);
    request.add_query_param("param", "dihdah");
    let ctx = before_invocation(request);

    let mut response = BufferedResponse::new();
    get_with_params(&ctx, &mut response).expect("rendered");

    assert!(ctx.captured_body().is_none());
    assert_eq!(response.content_type(), Some(TEXT_CONTENT_TYPE));
    assert_eq!(response.body_str(), Some("param=dihdah"));
}

#[test]
fn post_with_form_body_is_not_bound() {
    init_tracing();

    let mut ctx = before_invocation(post(
        "application/x-www-form-urlencoded",
        "wellhellothere",
    ));
    let mut response = BufferedResponse::new();

    post_with_body(&mut ctx, &mut response).expect("rendered");

    assert_eq!(response.body_str(), Some("body=wellhellothere"));
}

#[test]
fn post_note_binds_and_exhausts_body() {
    init_tracing();

    let mut ctx = before_invocation(post("application/json", r#"{"tit":"My note"}"#));
    let mut response = BufferedResponse::new();

    post_note(&mut ctx, &mut response).expect("rendered");

    assert_eq!(response.content_type(), Some(TEXT_CONTENT_TYPE));
    assert_eq!(response.body_str(), Some("title=My note;body="));
}

#[test]
fn post_note_model_resolves_to_default() {
    let mut ctx = before_invocation(post("application/json", r#"{"tit":"My note"}"#));
    let mut response = BufferedResponse::new();

    post_note_model(&mut ctx, &note_registry(), &mut response).expect("rendered");

    assert_eq!(response.body_str(), Some("note=null;body="));
}

#[test]
fn expected_field_missing_shows_null() {
    let mut ctx = before_invocation(post(
        "application/json",
        r#"{"something":"unexpected"}"#,
    ));
    let mut response = BufferedResponse::new();

    post_note(&mut ctx, &mut response).expect("rendered");

    assert_eq!(response.body_str(), Some("title=null;body="));
}

#[test]
fn malformed_json_resolves_to_null() {
    init_tracing();

    let mut ctx = before_invocation(post("application/json", "{not json"));
    let mut response = BufferedResponse::new();

    post_note(&mut ctx, &mut response).expect("rendered");

    assert_eq!(response.body_str(), Some("title=null;body="));
}

#[test]
fn put_is_bound_like_post() {
    let request = Request::new("req-put", HttpMethod::Put)
        .with_content_type("application/json")
        .with_body(r#"{"tit":"updated"}"#);
    let mut ctx = before_invocation(request);
    let mut response = BufferedResponse::new();

    post_note(&mut ctx, &mut response).expect("rendered");

    assert_eq!(response.body_str(), Some("title=updated;body="));
}

#[test]
fn json_with_charset_parameter_is_not_captured() {
    let mut ctx = before_invocation(post(
        "application/json; charset=utf-8",
        r#"{"tit":"x"}"#,
    ));
    let mut response = BufferedResponse::new();

    post_with_body(&mut ctx, &mut response).expect("rendered");

    assert_eq!(response.body_str(), Some(r#"body={"tit":"x"}"#));
}

#[test]
fn read_failure_leaves_exhausted_stream_and_no_body() {
    init_tracing();

    struct Unreadable;

    impl Read for Unreadable {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::TimedOut, "socket timeout"))
        }
    }

    let request = Request::new("req-broken", HttpMethod::Post)
        .with_content_type("application/json")
        .with_body_stream(Body::from_reader(Unreadable));
    let mut ctx = before_invocation(request);

    assert!(ctx.captured_body().is_none());
    // No body binds as an empty object.
    assert_eq!(
        ctx.binder().bind::<NoteDto>("note").into_option(),
        Some(NoteDto { tit: None })
    );
    assert_eq!(read_stream(ctx.request_mut().body_mut()).unwrap(), "");
}

#[test]
fn prepare_extracts_framework_requests() {
    struct FrameworkRequest {
        method: &'static str,
        content_type: &'static str,
        payload: &'static str,
    }

    impl ExtractRequest for FrameworkRequest {
        fn extract_request(self) -> Request {
            Request::new("req-framework", self.method)
                .with_content_type(self.content_type)
                .with_body(self.payload)
        }
    }

    let ctx = prepare(FrameworkRequest {
        method: "POST",
        content_type: "application/json",
        payload: r#"{"tit":"from framework"}"#,
    });

    assert_eq!(
        ctx.binder().bind::<NoteDto>("note").into_option(),
        Some(NoteDto {
            tit: Some("from framework".to_string())
        })
    );
}

#[test]
fn concurrent_requests_do_not_share_bodies() {
    let registry = Arc::new(note_registry());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let request = Request::new(format!("req-{}", i), HttpMethod::Post)
                    .with_content_type("application/json")
                    .with_body(format!(r#"{{"tit":"note {}"}}"#, i));
                let ctx = before_invocation(request);

                let dto = registry
                    .bind_as::<NoteDto>(&ctx.binder(), "note")
                    .into_option()
                    .expect("bound");
                (i, dto.tit)
            })
        })
        .collect();

    for handle in handles {
        let (i, title) = handle.join().expect("thread finished");
        assert_eq!(title, Some(format!("note {}", i)));
    }
}
