mod common;

use std::collections::HashMap;

use bytes::BytesMut;
use common::DocRoot;
use triton::http::request::RequestBuilder;
use triton::http::response::{Response, ResponseBuilder, StatusCode};
use triton::http::writer::{ResponseWriter, serialize_head, write_sorted_headers};

async fn write(response: &Response) -> Vec<u8> {
    let mut out = Vec::new();
    ResponseWriter::new(response).write_to(&mut out).await.unwrap();
    out
}

#[test]
fn test_sorted_headers_independent_of_insertion_order() {
    let keys = ["Date", "Connection", "Last-Modified", "Content-Type", "Content-Length"];

    let mut forward = HashMap::new();
    for key in keys {
        forward.insert(key.to_string(), "v".to_string());
    }
    let mut backward = HashMap::new();
    for key in keys.iter().rev() {
        backward.insert(key.to_string(), "v".to_string());
    }

    let mut a = BytesMut::new();
    let mut b = BytesMut::new();
    write_sorted_headers(&forward, &mut a);
    write_sorted_headers(&backward, &mut b);

    assert_eq!(a, b);
    assert_eq!(
        &a[..],
        b"Connection: v\r\nContent-Length: v\r\nContent-Type: v\r\nDate: v\r\nLast-Modified: v\r\n\r\n"
    );
}

#[test]
fn test_sorted_headers_empty_map() {
    let mut buf = BytesMut::new();
    write_sorted_headers(&HashMap::new(), &mut buf);

    assert_eq!(&buf[..], b"\r\n");
}

#[test]
fn test_serialize_head_is_idempotent() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .header("Date", "Thu, 01 Jan 1970 00:00:00 GMT")
        .header("Connection", "close")
        .build();

    let first = serialize_head(&response);
    let second = serialize_head(&response);

    assert_eq!(first, second);
    assert_eq!(
        &first[..],
        b"HTTP/1.1 404 Not Found\r\nConnection: close\r\nDate: Thu, 01 Jan 1970 00:00:00 GMT\r\n\r\n"
    );
}

#[tokio::test]
async fn test_bad_request_has_no_body() {
    let out = write(&Response::bad_request()).await;
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\nConnection: close\r\nDate: "));
    assert!(text.ends_with("\r\n\r\n"));
}

#[tokio::test]
async fn test_ok_streams_file_body() {
    let root = DocRoot::new();
    // Larger than one chunk
    let body: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    let path = root.write("data.bin", &body);
    let req = RequestBuilder::new().url("/data.bin").host("h").build().unwrap();

    let response = Response::ok(req, &path).await;
    let out = write(&response).await;

    let head = serialize_head(&response);
    assert_eq!(&out[..head.len()], &head[..]);
    assert_eq!(&out[head.len()..], &body[..]);
}

#[tokio::test]
async fn test_body_only_written_for_ok() {
    let root = DocRoot::new();
    let path = root.write("secret.txt", b"do not send");

    let response = ResponseBuilder::new(StatusCode::NotFound).file(&path).build();
    let out = write(&response).await;

    assert_eq!(out, serialize_head(&response).to_vec());
}

#[tokio::test]
async fn test_ok_with_unreadable_file_fails() {
    let root = DocRoot::new();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .file(root.path().join("gone.html"))
        .build();

    let mut out = Vec::new();
    let result = ResponseWriter::new(&response).write_to(&mut out).await;

    assert!(result.is_err());
    // The head went out before the body failed
    assert!(out.starts_with(b"HTTP/1.1 200 OK\r\n"));
}
