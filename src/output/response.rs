//! CLI response formatting and output.
//!
//! Provides the JSON envelope, plain-text lines, and exit code mapping.

use doc_rewriter::error::Hint;
use doc_rewriter::{Error, ErrorCode, Result};
use serde::Serialize;
use std::io::{self, Write};

/// The `--json` envelope: `data` on success, `error` on failure.
#[derive(Serialize)]
struct CliResponse<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CliError<'a>>,
}

#[derive(Serialize)]
struct CliError<'a> {
    code: &'static str,
    message: &'a str,
    details: &'a serde_json::Value,
    #[serde(skip_serializing_if = "no_hints")]
    hints: &'a [Hint],
}

fn no_hints(hints: &&[Hint]) -> bool {
    hints.is_empty()
}

impl<'a> CliResponse<'a> {
    fn from_result(result: &'a Result<serde_json::Value>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(CliError {
                    code: err.code.as_str(),
                    message: &err.message,
                    details: &err.details,
                    hints: &err.hints,
                }),
            },
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

/// Write one line to `out`, treating a closed pipe as success.
pub fn write_line<W: Write>(out: &mut W, line: &str) -> Result<()> {
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn print_line(line: &str) -> Result<()> {
    write_line(&mut io::stdout().lock(), line)
}

/// Report a failure in text mode: message first, then any hints.
pub fn print_error_text(err: &Error) {
    eprintln!("Error: {}", err.message);
    for hint in &err.hints {
        eprintln!("Hint: {}", hint.message);
    }
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ValidationInvalidArgument | ErrorCode::ValidationInvalidJson => 2,

        ErrorCode::FileNotFound => 4,

        ErrorCode::FileAccessFailed
        | ErrorCode::FileInvalidEncoding
        | ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError => 1,
    }
}

pub fn print_json_result(result: Result<serde_json::Value>) -> Result<()> {
    print_line(&CliResponse::from_result(&result).to_json()?)
}
