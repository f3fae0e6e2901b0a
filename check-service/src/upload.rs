//! Reading a submission out of a request body, bounded by the upload ceiling.

use std::fmt;
use std::str::FromStr;

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::error::PayloadError;
use actix_web::http::header::CONTENT_LENGTH;
use actix_web::http::StatusCode;
use actix_web::{web, HttpMessage, HttpRequest};
use futures::{StreamExt, TryStreamExt};
use serde::Deserialize;
use thiserror::Error;

const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;

/// Room left for multipart boundaries and part headers, or for JSON
/// keys and punctuation, on top of the file contents.
const FRAMING_ALLOWANCE: usize = 64 * KIB;

/// Longest JSON escape of one content byte (`\u0001`).
const JSON_ESCAPE_FACTOR: usize = 6;

pub const INPUT_FIELD: &str = "input_file";
pub const OUTPUT_FIELD: &str = "output_file";

/// Largest accepted file, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimit(usize);

impl UploadLimit {
    /// Ceiling of the serverless deployment.
    pub const STANDARD: UploadLimit = UploadLimit(16 * MIB);
    /// Ceiling of the container deployments.
    pub const EXTENDED: UploadLimit = UploadLimit(50 * MIB);

    pub const fn from_bytes(bytes: usize) -> Self {
        UploadLimit(bytes)
    }

    pub fn bytes(self) -> usize {
        self.0
    }

    /// Bound on a multipart request body: two files plus framing.
    pub fn request_ceiling(self) -> usize {
        self.0.saturating_mul(2).saturating_add(FRAMING_ALLOWANCE)
    }

    /// Bound on a JSON request body: two files escaped in the worst case,
    /// plus framing. The decoded contents are held to the real limit.
    pub fn json_ceiling(self) -> usize {
        self.0
            .saturating_mul(2 * JSON_ESCAPE_FACTOR)
            .saturating_add(FRAMING_ALLOWANCE)
    }

    pub fn check(self, len: usize) -> Result<(), UploadError> {
        if len > self.0 {
            return Err(UploadError::TooLarge { limit: self });
        }
        Ok(())
    }
}

impl Default for UploadLimit {
    fn default() -> Self {
        UploadLimit::STANDARD
    }
}

impl fmt::Display for UploadLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % MIB == 0 {
            write!(f, "{}MB", self.0 / MIB)
        } else if self.0 % KIB == 0 {
            write!(f, "{}KB", self.0 / KIB)
        } else {
            write!(f, "{} bytes", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid upload size '{0}', expected bytes or a value like 16MB or 512KB")]
pub struct ParseLimitError(String);

impl FromStr for UploadLimit {
    type Err = ParseLimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let upper = raw.to_ascii_uppercase();
        let (digits, unit) = if let Some(n) = upper.strip_suffix("MB") {
            (n, MIB)
        } else if let Some(n) = upper.strip_suffix("KB") {
            (n, KIB)
        } else if let Some(n) = upper.strip_suffix('B') {
            (n, 1)
        } else {
            (upper.as_str(), 1)
        };

        digits
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_mul(unit))
            .filter(|bytes| *bytes > 0)
            .map(UploadLimit)
            .ok_or_else(|| ParseLimitError(raw.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Payload too large: files are limited to {limit}.")]
    TooLarge { limit: UploadLimit },
    #[error("Both input and output files are required.")]
    MissingFiles,
    #[error("Please select both files.")]
    EmptyFilename,
    #[error("The {field} is not valid UTF-8 text.")]
    NotUtf8 { field: &'static str },
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not read request body: {0}")]
    Payload(#[from] PayloadError),
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// The two text files of one check request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Deserialize)]
struct JsonSubmission {
    #[serde(default)]
    input_content: String,
    #[serde(default)]
    output_content: String,
}

/// Extracts a submission from a JSON or multipart request.
///
/// Each file may be at most `limit` bytes. Requests whose declared length
/// exceeds the request ceiling are refused before any body is read.
pub async fn read_submission(
    req: &HttpRequest,
    payload: web::Payload,
    limit: UploadLimit,
) -> Result<Submission, UploadError> {
    let json = is_json(req);
    let ceiling = if json {
        limit.json_ceiling()
    } else {
        limit.request_ceiling()
    };
    if let Some(length) = declared_length(req) {
        if length > ceiling {
            return Err(UploadError::TooLarge { limit });
        }
    }

    if json {
        read_json(payload, limit).await
    } else {
        read_multipart(Multipart::new(req.headers(), payload), limit).await
    }
}

fn declared_length(req: &HttpRequest) -> Option<usize> {
    req.headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn is_json(req: &HttpRequest) -> bool {
    let content_type = req.content_type();
    content_type == "application/json" || content_type.ends_with("+json")
}

async fn read_json(mut payload: web::Payload, limit: UploadLimit) -> Result<Submission, UploadError> {
    let ceiling = limit.json_ceiling();
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > ceiling {
            return Err(UploadError::TooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    let submission: JsonSubmission = serde_json::from_slice(&body)?;
    limit.check(submission.input_content.len())?;
    limit.check(submission.output_content.len())?;
    Ok(Submission {
        input: strip_bom(submission.input_content),
        output: strip_bom(submission.output_content),
    })
}

struct UploadedFile {
    filename: Option<String>,
    content: web::BytesMut,
}

async fn read_multipart(mut multipart: Multipart, limit: UploadLimit) -> Result<Submission, UploadError> {
    let ceiling = limit.request_ceiling();
    let mut received = 0;
    let mut input = None;
    let mut output = None;

    while let Some(mut field) = multipart.try_next().await? {
        let name = field.name().map(str::to_owned);
        let filename = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned);

        let slot = match name.as_deref() {
            Some(INPUT_FIELD) => &mut input,
            Some(OUTPUT_FIELD) => &mut output,
            _ => {
                // Unrelated fields are drained but still count against the request.
                read_field(&mut field, ceiling, &mut received, ceiling, limit).await?;
                continue;
            }
        };

        let content = read_field(&mut field, limit.bytes(), &mut received, ceiling, limit).await?;
        *slot = Some(UploadedFile { filename, content });
    }

    let (Some(input), Some(output)) = (input, output) else {
        return Err(UploadError::MissingFiles);
    };
    if input.filename.as_deref() == Some("") || output.filename.as_deref() == Some("") {
        return Err(UploadError::EmptyFilename);
    }

    Ok(Submission {
        input: decode(input.content, "input file")?,
        output: decode(output.content, "output file")?,
    })
}

async fn read_field(
    field: &mut Field,
    cap: usize,
    received: &mut usize,
    ceiling: usize,
    limit: UploadLimit,
) -> Result<web::BytesMut, UploadError> {
    let mut content = web::BytesMut::new();
    while let Some(chunk) = field.try_next().await? {
        *received += chunk.len();
        if *received > ceiling || content.len() + chunk.len() > cap {
            return Err(UploadError::TooLarge { limit });
        }
        content.extend_from_slice(&chunk);
    }
    Ok(content)
}

fn decode(content: web::BytesMut, field: &'static str) -> Result<String, UploadError> {
    String::from_utf8(content.to_vec())
        .map(strip_bom)
        .map_err(|_| UploadError::NotUtf8 { field })
}

fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}
