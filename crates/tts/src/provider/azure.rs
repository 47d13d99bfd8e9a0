use async_trait::async_trait;
use reqwest::{
    Client,
    header::{CONTENT_TYPE, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};

use super::{SynthesisClient, SynthesisError};
use crate::{http_client::http_client, spool::AudioSpool, voice::VoiceCatalog};

/// Output format requested from the service; matches the stored `.mp3` objects
const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";

/// Azure Cognitive Services neural TTS over REST
pub struct AzureSynthesizer {
    client: Client,
    base_url: String,
    api_key: SecretString,
    name: String,
}

impl AzureSynthesizer {
    pub fn new(base_url: String, api_key: SecretString) -> Self {
        Self {
            client: http_client(),
            base_url,
            api_key,
            name: "azure".to_owned(),
        }
    }
}

/// Escape text for inclusion in an SSML element
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Wrap plain text in a single-voice SSML document
fn build_ssml(text: &str, voice: &str) -> String {
    let lang = VoiceCatalog::locale(voice).unwrap_or("en-US");

    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='{lang}'>\
         <voice name='{voice}'>{text}</voice></speak>",
        voice = escape_xml(voice),
        text = escape_xml(text),
    )
}

#[async_trait]
impl SynthesisClient for AzureSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str, spool: &mut AudioSpool) -> Result<(), SynthesisError> {
        let url = format!("{}/cognitiveservices/v1", self.base_url);

        tracing::debug!(voice, input_len = text.len(), "Azure TTS request");

        let mut response = self
            .client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, self.api_key.expose_secret())
            .header(OUTPUT_FORMAT_HEADER, OUTPUT_FORMAT)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/ssml+xml"))
            .body(build_ssml(text, voice))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Azure TTS request failed: {e}");
                SynthesisError::UpstreamUnavailable(format!("failed to reach Azure TTS: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Azure TTS API error ({status}): {error_text}");

            return Err(SynthesisError::UpstreamUnavailable(format!(
                "Azure TTS returned {status}: {error_text}"
            )));
        }

        while let Some(chunk) = response.chunk().await.map_err(|e| {
            tracing::error!("Failed to read Azure TTS response body: {e}");
            SynthesisError::UpstreamUnavailable(format!("audio stream interrupted: {e}"))
        })? {
            spool
                .write(&chunk)
                .await
                .map_err(|e| SynthesisError::Spool(e.to_string()))?;
        }

        if spool.is_empty() {
            return Err(SynthesisError::NoAudioProduced);
        }

        tracing::debug!(bytes = spool.len(), "Azure TTS synthesis complete");

        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }

    fn name(&self) -> &str {
        &self.name
    }
}
