//! Wire contract between a Wherry host and its guest modules.
//!
//! A Wherry guest is a sandboxed module that exposes a single entry point,
//! [`HANDLE_REQUEST_EXPORT`]. The host configures each invocation through
//! environment variables, writes one delimiter-terminated JSON
//! [`Request`] envelope to the guest's stdin, invokes the entry point, and
//! inspects the returned [`ExitCode`] before reading the framed
//! [`Response`] envelope from the guest's stdout.
//!
//! This crate defines only the shared vocabulary of that exchange: the
//! envelope types, the user-facing [`Issue`] diagnostics, the exit-code
//! taxonomy, and the environment variable names. The guest-side runtime
//! that speaks the protocol lives in `wherry-guest`; the host lives
//! outside this workspace.

pub mod envelope;
pub mod exit_code;
pub mod issue;

pub use self::envelope::{Request, Response, WriteFileRequest, WriteFileResponse, WriteMode};
pub use self::exit_code::ExitCode;
pub use self::issue::{Issue, IssueLevel};

/// Name of the exported guest function the host calls once per invocation.
pub const HANDLE_REQUEST_EXPORT: &str = "handleRequest";

/// Environment variable holding the single byte that terminates every
/// framed message on stdin and stdout. Optional; when unset the guest uses
/// [`DEFAULT_MESSAGE_DELIMITER`].
pub const ENV_MESSAGE_DELIMITER: &str = "__MESSAGE_DELIM";

/// Default message delimiter used when [`ENV_MESSAGE_DELIMITER`] is unset.
pub const DEFAULT_MESSAGE_DELIMITER: u8 = b'\n';

/// Environment variable holding the guest-side path of the mounted working
/// directory. Only set when the user grants filesystem access.
pub const ENV_CWD: &str = "__CWD";

/// Environment variable holding the host-side path corresponding to
/// [`ENV_CWD`]. Required whenever [`ENV_CWD`] is set; used for more
/// informative logging and error messages.
pub const ENV_CWD_HOST: &str = "__CWD_HOST";

/// Environment variable selecting the guest's diagnostic log filter.
/// Optional; the guest falls back to `info`.
pub const ENV_LOG_LEVEL: &str = "__LOG_LEVEL";
