use axum::{
    extract::{FromRequest, Multipart},
    http::Request,
};

use crate::endpoints;

/// Build a multipart upload with one file per `(content type, contents)` pair.
pub(crate) async fn must_make_multipart(files: &[(&str, &str)]) -> Multipart {
    let files = files
        .iter()
        .map(|(content_type, contents)| (*content_type, contents.as_bytes()))
        .collect::<Vec<_>>();

    must_make_multipart_bytes(&files).await
}

/// Build a multipart upload from raw file contents, which need not be UTF-8.
pub(crate) async fn must_make_multipart_bytes(files: &[(&str, &[u8])]) -> Multipart {
    let boundary = "MY_BOUNDARY123456789";

    let mut data: Vec<u8> = Vec::new();

    for (content_type, contents) in files {
        data.extend_from_slice(
            format!(
                "--{boundary}\r\n\
                Content-Disposition: form-data; name=\"files\"; filename=\"beneficiaires.csv\";\r\n\
                Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        data.extend_from_slice(contents);
        data.extend_from_slice(b"\r\n");
    }

    data.extend_from_slice(format!("--{boundary}--").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(endpoints::IMPORT)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(data.into())
        .unwrap();

    Multipart::from_request(request, &{}).await.unwrap()
}
