use axum::{
    Form,
    body::Body,
    extract::{FromRequest, Multipart},
};
use http::{HeaderMap, header::CONTENT_TYPE};

use crate::{error::TtsError, types::SpeechForm};

/// Extractor for `POST /tts/` form bodies
///
/// Accepts `application/x-www-form-urlencoded` and `multipart/form-data`.
/// Anything else is rejected with 415.
pub struct ExtractForm(pub SpeechForm);

enum FormEncoding {
    UrlEncoded,
    Multipart,
}

fn form_encoding(headers: &HeaderMap) -> Result<FormEncoding, TtsError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "application/x-www-form-urlencoded" => Ok(FormEncoding::UrlEncoded),
        "multipart/form-data" => Ok(FormEncoding::Multipart),
        "" => Err(TtsError::UnsupportedMediaType("missing, expected form data".to_owned())),
        other => Err(TtsError::UnsupportedMediaType(format!("'{other}', expected form data"))),
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<SpeechForm, TtsError> {
    let mut form = SpeechForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| TtsError::InvalidRequest(format!("malformed multipart body: {e}")))?
    {
        let slot = match field.name() {
            Some("text") => &mut form.text,
            Some("lang") => &mut form.lang,
            Some("voice") => &mut form.voice,
            _ => continue,
        };

        let value = field
            .text()
            .await
            .map_err(|e| TtsError::InvalidRequest(format!("unreadable form field: {e}")))?;
        *slot = Some(value);
    }

    Ok(form)
}

impl<S> FromRequest<S> for ExtractForm
where
    S: Send + Sync,
{
    type Rejection = TtsError;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let form = match form_encoding(request.headers())? {
            FormEncoding::UrlEncoded => {
                let Form(form) = Form::<SpeechForm>::from_request(request, state)
                    .await
                    .map_err(|e| TtsError::InvalidRequest(format!("malformed form body: {}", e.body_text())))?;
                form
            }
            FormEncoding::Multipart => {
                let multipart = Multipart::from_request(request, state)
                    .await
                    .map_err(|e| TtsError::InvalidRequest(format!("malformed multipart body: {}", e.body_text())))?;
                read_multipart(multipart).await?
            }
        };

        Ok(Self(form))
    }
}
