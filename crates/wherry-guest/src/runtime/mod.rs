//! The invocation supervisor behind the guest's single entry point.
//!
//! One invocation is one strictly sequential pass: resolve configuration,
//! frame in the request, dispatch to the handler under failure isolation,
//! frame out the response. Each step gates the next and the first
//! protocol failure short-circuits the rest, surfacing as the returned
//! exit code with nothing written to the output stream. Handler failures
//! are different: they are recovered locally, folded into the response's
//! issue list, and the invocation still reports [`ExitCode::Ok`] — the
//! host distinguishes "the protocol broke" from "the operation failed".

use std::io::{self, Read, Write};
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info};

use wherry_plugin_api::{ExitCode, Response, WriteFileRequest};

use crate::codec;
use crate::config::GuestConfig;
use crate::context::Context;
use crate::failure::PluginFailure;
use crate::framing;
use crate::plugin::Plugin;
use crate::registry;
use crate::telemetry;

/// Tracing target for supervisor operations.
const RUNTIME_TARGET: &str = "wherry_guest::runtime";

/// Serves one invocation against the process's stdin and stdout using the
/// registered plugin.
///
/// This is the function behind the `handleRequest` export generated by
/// [`register_plugin!`](crate::register_plugin); the host observes only
/// the returned status code and the output stream.
#[must_use]
pub fn handle_request() -> ExitCode {
    let plugin = registry::current();
    run_request(plugin.as_deref(), io::stdin().lock(), io::stdout().lock())
}

/// Serves one invocation over the given streams.
///
/// Split out from [`handle_request`] so tests can drive the full
/// pipeline against in-memory streams and an injected handler.
#[must_use]
pub fn run_request(plugin: Option<&dyn Plugin>, input: impl Read, output: impl Write) -> ExitCode {
    telemetry::initialise();

    let Some(plugin) = plugin else {
        error!(target: RUNTIME_TARGET, "no plugin registered before invocation");
        return ExitCode::PluginNotRegistered;
    };

    let config = match GuestConfig::resolve() {
        Ok(config) => config,
        Err(err) => {
            error!(target: RUNTIME_TARGET, error = %err, "failed to resolve configuration");
            return err.exit_code();
        }
    };
    let delimiter = config.message_delimiter();

    info!(target: RUNTIME_TARGET, "reading request");
    let payload = match framing::read_framed(input, delimiter) {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            info!(target: RUNTIME_TARGET, "received an empty request, returning");
            return ExitCode::Ok;
        }
        Err(err) => {
            error!(target: RUNTIME_TARGET, error = %err, "failed to read request");
            return err.exit_code();
        }
    };

    let request = match codec::decode_request(&payload) {
        Ok(request) => request,
        Err(err) => {
            error!(target: RUNTIME_TARGET, error = %err, "failed to decode request");
            return err.exit_code();
        }
    };

    let parts = request.into_parts();
    let ctx = Context::new(config.into_mount(), parts.data, parts.metadata);

    info!(target: RUNTIME_TARGET, "handling request");
    let response = match dispatch(plugin, &ctx, parts.write_file.as_ref()) {
        Ok(response) => response,
        Err(failure) => {
            error!(target: RUNTIME_TARGET, error = %failure, "failed to handle request");
            Response::failure(failure.to_issues())
        }
    };

    info!(target: RUNTIME_TARGET, "returning response");
    let encoded = match codec::encode_response(&response) {
        Ok(encoded) => encoded,
        Err(err) => {
            error!(target: RUNTIME_TARGET, error = %err, "failed to encode response");
            return err.exit_code();
        }
    };
    if let Err(err) = framing::write_framed(output, delimiter, &encoded) {
        error!(target: RUNTIME_TARGET, error = %err, "failed to write response");
        return err.exit_code();
    }

    ExitCode::Ok
}

/// Invokes the handler under failure isolation.
///
/// A request with no operation populated short-circuits to the empty
/// response without touching the plugin. A panic raised inside the
/// handler is intercepted at this boundary and converted into an opaque
/// failure; it never crosses the supervisor or terminates the process.
fn dispatch(
    plugin: &dyn Plugin,
    ctx: &Context,
    write_file: Option<&WriteFileRequest>,
) -> Result<Response, PluginFailure> {
    let Some(request) = write_file else {
        debug!(target: RUNTIME_TARGET, "no operation populated, returning the empty response");
        return Ok(Response::new());
    };

    match panic::catch_unwind(AssertUnwindSafe(|| plugin.write_file(ctx, request))) {
        Ok(Ok(result)) => Ok(Response::success(result)),
        Ok(Err(failure)) => Err(failure),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(target: RUNTIME_TARGET, panic = %message, "panic occurred in plugin handler");
            Err(PluginFailure::from(anyhow::anyhow!(
                "runtime error: {message}"
            )))
        }
    }
}

/// Renders a panic payload into a human-readable description.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("unknown panic")
    }
}
