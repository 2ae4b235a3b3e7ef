//! Crate-level end-to-end tests driving the full invocation pipeline.
//!
//! Every test here runs [`run_request`] against in-memory streams, with
//! the process environment serialised through the shared mutex because
//! configuration resolution reads it on every invocation.

use std::io::{self, Read, Write};
use std::path::Path;

use wherry_plugin_api::{
    ENV_CWD, ENV_CWD_HOST, ENV_MESSAGE_DELIMITER, ExitCode, WriteFileRequest, WriteFileResponse,
};

use crate::context::Context;
use crate::failure::PluginFailure;
use crate::plugin::{MockPlugin, Plugin};
use crate::runtime::run_request;

mod support;

use support::env::{EnvVarGuard, lock_env};

/// Reader that fails the test if the supervisor touches the stream.
struct ForbiddenReader;

impl Read for ForbiddenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        panic!("the input stream must not be read")
    }
}

/// Writer that rejects every write.
struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "injected write failure"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Handler that panics with a `&str` payload.
struct PanickingPlugin;

impl Plugin for PanickingPlugin {
    fn write_file(
        &self,
        _ctx: &Context,
        _request: &WriteFileRequest,
    ) -> Result<WriteFileResponse, PluginFailure> {
        panic!("boom")
    }
}

fn run(plugin: Option<&dyn Plugin>, input: &[u8]) -> (ExitCode, Vec<u8>) {
    let mut output = Vec::new();
    let code = run_request(plugin, input, &mut output);
    (code, output)
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[test]
fn write_file_request_round_trips() {
    let _env = lock_env();
    let mut plugin = MockPlugin::new();
    plugin
        .expect_write_file()
        .times(1)
        .returning(|_, _| Ok(WriteFileResponse::new()));

    let (code, output) = run(Some(&plugin), b"{\"writeFile\":{}}\n");
    assert_eq!(code, ExitCode::Ok);
    assert_eq!(output, b"{\"writeFile\":{}}\n");
}

#[test]
fn request_data_and_metadata_reach_the_handler() {
    let _env = lock_env();
    let mut plugin = MockPlugin::new();
    plugin
        .expect_write_file()
        .withf(|ctx, request| {
            ctx.data().get("dry_run") == Some(&serde_json::Value::Bool(true))
                && ctx.metadata() == Some(&serde_json::json!({"invocation_id": "abc"}))
                && request.path() == Path::new("notes.txt")
        })
        .times(1)
        .returning(|_, _| Ok(WriteFileResponse::new().with_bytes_written(5)));

    let input = b"{\"writeFile\":{\"path\":\"notes.txt\",\"content\":\"hello\"},\
\"data\":{\"dry_run\":true},\"metadata\":{\"invocation_id\":\"abc\"}}\n";
    let (code, output) = run(Some(&plugin), input);
    assert_eq!(code, ExitCode::Ok);
    assert_eq!(output, b"{\"writeFile\":{\"bytesWritten\":5}}\n");
}

#[test]
fn noop_request_writes_the_empty_response_without_the_handler() {
    let _env = lock_env();
    let mut plugin = MockPlugin::new();
    plugin.expect_write_file().times(0);

    let (code, output) = run(Some(&plugin), b"{}\n");
    assert_eq!(code, ExitCode::Ok);
    assert_eq!(output, b"{}\n");
}

#[test]
fn empty_input_returns_ok_with_output_untouched() {
    let _env = lock_env();
    let mut plugin = MockPlugin::new();
    plugin.expect_write_file().times(0);

    let (code, output) = run(Some(&plugin), b"");
    assert_eq!(code, ExitCode::Ok);
    assert!(output.is_empty());
}

// ---------------------------------------------------------------------------
// Handler failures stay inside the protocol
// ---------------------------------------------------------------------------

#[test]
fn panicking_handler_reports_one_error_issue() {
    let _env = lock_env();
    let (code, output) = run(Some(&PanickingPlugin), b"{\"writeFile\":{}}\n");
    assert_eq!(code, ExitCode::Ok);
    assert_eq!(
        output,
        b"{\"issues\":[{\"level\":\"ERROR\",\"message\":\"runtime error: boom\"}]}\n"
    );
}

#[test]
fn returned_failure_reports_issues_in_order() {
    let _env = lock_env();
    let mut plugin = MockPlugin::new();
    plugin.expect_write_file().times(1).returning(|_, _| {
        Err(PluginFailure::joined(vec![
            PluginFailure::warn("existing content kept"),
            PluginFailure::error("target is read-only"),
        ]))
    });

    let (code, output) = run(Some(&plugin), b"{\"writeFile\":{}}\n");
    assert_eq!(code, ExitCode::Ok);
    assert_eq!(
        output,
        b"{\"issues\":[{\"level\":\"WARN\",\"message\":\"existing content kept\"},\
{\"level\":\"ERROR\",\"message\":\"target is read-only\"}]}\n"
    );
}

// ---------------------------------------------------------------------------
// Protocol faults
// ---------------------------------------------------------------------------

#[test]
fn missing_registration_short_circuits_everything() {
    let _env = lock_env();
    let (code, output) = run(None, b"{\"writeFile\":{}}\n");
    assert_eq!(code, ExitCode::PluginNotRegistered);
    assert!(output.is_empty());
}

#[test]
fn malformed_request_fails_to_unmarshal() {
    let _env = lock_env();
    let mut plugin = MockPlugin::new();
    plugin.expect_write_file().times(0);

    let (code, output) = run(Some(&plugin), b"{\"writeFile\"\n");
    assert_eq!(code, ExitCode::FailedToUnmarshalRequest);
    assert!(output.is_empty());
}

#[test]
fn unterminated_request_fails_to_read() {
    let _env = lock_env();
    let mut plugin = MockPlugin::new();
    plugin.expect_write_file().times(0);

    let (code, output) = run(Some(&plugin), b"{\"writeFile\":{}}");
    assert_eq!(code, ExitCode::FailedToReadRequest);
    assert!(output.is_empty());
}

#[test]
fn write_failure_surfaces_failed_to_write() {
    let _env = lock_env();
    let mut plugin = MockPlugin::new();
    plugin
        .expect_write_file()
        .times(1)
        .returning(|_, _| Ok(WriteFileResponse::new()));

    let code = run_request(Some(&plugin), &b"{\"writeFile\":{}}\n"[..], BrokenWriter);
    assert_eq!(code, ExitCode::FailedToWriteResponse);
}

// ---------------------------------------------------------------------------
// Environment-driven configuration
// ---------------------------------------------------------------------------

#[test]
fn invalid_delimiter_fails_before_any_stream_io() {
    let _env = lock_env();
    let _delim = EnvVarGuard::set(ENV_MESSAGE_DELIMITER, ";;");
    let mut plugin = MockPlugin::new();
    plugin.expect_write_file().times(0);

    let mut output = Vec::new();
    let code = run_request(Some(&plugin), ForbiddenReader, &mut output);
    assert_eq!(code, ExitCode::MessageDelimInvalid);
    assert!(output.is_empty());
}

#[test]
fn missing_host_mount_path_fails_before_any_stream_io() {
    let _env = lock_env();
    let _cwd = EnvVarGuard::set(ENV_CWD, "/mnt/project");
    let mut plugin = MockPlugin::new();
    plugin.expect_write_file().times(0);

    let mut output = Vec::new();
    let code = run_request(Some(&plugin), ForbiddenReader, &mut output);
    assert_eq!(code, ExitCode::CwdHostPathMissing);
    assert!(output.is_empty());
}

#[test]
fn configured_delimiter_frames_both_streams() {
    let _env = lock_env();
    let _delim = EnvVarGuard::set(ENV_MESSAGE_DELIMITER, "|");
    let mut plugin = MockPlugin::new();
    plugin
        .expect_write_file()
        .times(1)
        .returning(|_, _| Ok(WriteFileResponse::new()));

    let (code, output) = run(Some(&plugin), b"{\"writeFile\":{}}|");
    assert_eq!(code, ExitCode::Ok);
    assert_eq!(output, b"{\"writeFile\":{}}|");
}

#[test]
fn granted_mount_reaches_the_handler() {
    let _env = lock_env();
    let guest_root = tempfile::tempdir().expect("tempdir");
    let guest_path = guest_root.path().to_path_buf();
    let _cwd = EnvVarGuard::set(
        ENV_CWD,
        guest_path.to_str().expect("tempdir path is utf-8"),
    );
    let _cwd_host = EnvVarGuard::set(ENV_CWD_HOST, "/home/user/project");

    let mut plugin = MockPlugin::new();
    let expected = guest_path.clone();
    plugin
        .expect_write_file()
        .withf(move |ctx, _| {
            ctx.mount().is_some_and(|mount| {
                mount.guest_path() == expected.as_path()
                    && mount.host_path() == Path::new("/home/user/project")
            })
        })
        .times(1)
        .returning(|_, _| Ok(WriteFileResponse::new()));

    let (code, output) = run(Some(&plugin), b"{\"writeFile\":{}}\n");
    assert_eq!(code, ExitCode::Ok);
    assert_eq!(output, b"{\"writeFile\":{}}\n");
}
