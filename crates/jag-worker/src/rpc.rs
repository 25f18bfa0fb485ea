//! Worker RPC Handler
//!
//! Implements the stdin/stdout JSON RPC handler for the worker
//! entrypoint. This is the main entry point the scheduler's plugin shim
//! invokes:
//!
//!   jag-worker gate rpc
//!
//! The handler reads a single JSON request from stdin, dispatches to the
//! appropriate operation handler, and writes a single JSON response to
//! stdout. Operator log lines go to stderr.

use std::io::{self, BufRead, Write};

use jag_hooks::SubmissionGate;
use jag_protocol::{ops::names, RpcError, RpcRequest, RpcResponse, PROTOCOL_VERSION_PROBE};

use crate::config::WorkerConfig;
use crate::handlers;

/// Main RPC handler for the worker.
pub struct RpcHandler {
    config: WorkerConfig,
    gate: SubmissionGate,
}

impl RpcHandler {
    /// Create a new RPC handler with the given configuration and gate.
    pub fn new(config: WorkerConfig, gate: SubmissionGate) -> Self {
        Self { config, gate }
    }

    /// Run the RPC handler, reading from stdin and writing to stdout.
    pub fn run(&self) -> io::Result<()> {
        self.run_with_io(&mut io::stdin().lock(), &mut io::stdout().lock())
    }

    /// Run the RPC handler with custom I/O (for testing and for in-process
    /// callers).
    pub fn run_with_io<R: BufRead, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> io::Result<()> {
        // Read the request
        let request = match self.read_request(reader) {
            Ok(req) => req,
            Err(e) => {
                // On parse error, return an error response with protocol_version: 0
                let response = RpcResponse::error(PROTOCOL_VERSION_PROBE, String::new(), e);
                self.write_response(writer, &response)?;
                return Ok(());
            }
        };

        // Validate protocol version
        if let Err(e) = self.validate_protocol_version(&request) {
            let response =
                RpcResponse::error(request.protocol_version, request.request_id.clone(), e);
            self.write_response(writer, &response)?;
            return Ok(());
        }

        // Dispatch to operation handler
        let response = self.dispatch(&request);
        self.write_response(writer, &response)?;

        Ok(())
    }

    /// Read and parse the RPC request from the reader.
    fn read_request<R: BufRead>(&self, reader: &mut R) -> Result<RpcRequest, RpcError> {
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| RpcError::invalid_request(format!("failed to read request: {}", e)))?;

        let request: RpcRequest = serde_json::from_str(&line)
            .map_err(|e| RpcError::invalid_request(format!("invalid JSON: {}", e)))?;

        Ok(request)
    }

    /// Validate the protocol version in the request.
    fn validate_protocol_version(&self, request: &RpcRequest) -> Result<(), RpcError> {
        // probe requests MUST use protocol_version: 0
        if request.op == names::PROBE {
            if request.protocol_version != PROTOCOL_VERSION_PROBE {
                return Err(RpcError::unsupported_protocol(
                    request.protocol_version,
                    PROTOCOL_VERSION_PROBE,
                    PROTOCOL_VERSION_PROBE,
                ));
            }
            return Ok(());
        }

        // All other operations MUST NOT use protocol_version: 0
        if request.protocol_version == PROTOCOL_VERSION_PROBE {
            return Err(RpcError::unsupported_protocol(
                PROTOCOL_VERSION_PROBE,
                self.config.protocol_min,
                self.config.protocol_max,
            ));
        }

        // Check if version is within supported range
        if request.protocol_version < self.config.protocol_min
            || request.protocol_version > self.config.protocol_max
        {
            return Err(RpcError::unsupported_protocol(
                request.protocol_version,
                self.config.protocol_min,
                self.config.protocol_max,
            ));
        }

        Ok(())
    }

    /// Dispatch the request to the appropriate operation handler.
    fn dispatch(&self, request: &RpcRequest) -> RpcResponse {
        let protocol_version = if request.op == names::PROBE {
            PROTOCOL_VERSION_PROBE // probe responses must use protocol_version: 0
        } else {
            request.protocol_version
        };

        let result = match request.op.as_str() {
            names::PROBE => handlers::probe::handle(&self.config, &self.gate),
            names::JOB_SUBMIT => handlers::submit::handle(request, &self.gate),
            names::JOB_MODIFY => handlers::modify::handle(request, &self.gate),
            _ => Err(RpcError::unknown_operation(&request.op)),
        };

        match result {
            Ok(payload) => {
                RpcResponse::success(protocol_version, request.request_id.clone(), payload)
            }
            Err(e) => RpcResponse::error(protocol_version, request.request_id.clone(), e),
        }
    }

    /// Write the response to the writer.
    fn write_response<W: Write>(&self, writer: &mut W, response: &RpcResponse) -> io::Result<()> {
        let json = serde_json::to_string(response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(writer, "{}", json)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jag_hooks::GateConfig;
    use jag_protocol::ErrorCode;
    use std::io::Cursor;

    fn create_handler() -> RpcHandler {
        let gate = SubmissionGate::from_config(&GateConfig::default()).unwrap();
        RpcHandler::new(WorkerConfig::default(), gate)
    }

    fn round_trip(handler: &RpcHandler, input: &str) -> RpcResponse {
        let mut reader = Cursor::new(input.to_string());
        let mut output = Vec::new();
        handler.run_with_io(&mut reader, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_probe_request() {
        let handler = create_handler();
        let response = round_trip(
            &handler,
            "{\"protocol_version\":0,\"op\":\"probe\",\"request_id\":\"test-001\",\"payload\":{}}\n",
        );

        assert!(response.ok);
        assert_eq!(response.protocol_version, 0);
        assert_eq!(response.request_id, "test-001");
        assert!(response.payload.is_some());
    }

    #[test]
    fn test_probe_with_wrong_version() {
        let handler = create_handler();
        let response = round_trip(
            &handler,
            "{\"protocol_version\":1,\"op\":\"probe\",\"request_id\":\"test-002\",\"payload\":{}}\n",
        );

        assert!(!response.ok);
        assert_eq!(
            response.error.as_ref().unwrap().code,
            ErrorCode::UnsupportedProtocol
        );
    }

    #[test]
    fn test_non_probe_with_version_zero() {
        let handler = create_handler();
        let response = round_trip(
            &handler,
            "{\"protocol_version\":0,\"op\":\"job_submit\",\"request_id\":\"test-003\",\"payload\":{}}\n",
        );

        assert!(!response.ok);
        assert_eq!(
            response.error.as_ref().unwrap().code,
            ErrorCode::UnsupportedProtocol
        );
    }

    #[test]
    fn test_invalid_json() {
        let handler = create_handler();
        let response = round_trip(&handler, "not valid json\n");

        assert!(!response.ok);
        assert_eq!(
            response.error.as_ref().unwrap().code,
            ErrorCode::InvalidRequest
        );
    }

    #[test]
    fn test_unknown_operation() {
        let handler = create_handler();
        let response = round_trip(
            &handler,
            "{\"protocol_version\":1,\"op\":\"unknown_op\",\"request_id\":\"test-004\",\"payload\":{}}\n",
        );

        assert!(!response.ok);
        assert_eq!(
            response.error.as_ref().unwrap().code,
            ErrorCode::UnknownOperation
        );
    }

    #[test]
    fn test_job_submit_round_trip() {
        let handler = create_handler();
        let input = "{\"protocol_version\":1,\"op\":\"job_submit\",\"request_id\":\"test-005\",\
                     \"payload\":{\"job\":{\"name\":\"demo\"},\"submit_uid\":1001}}\n";
        let response = round_trip(&handler, input);

        assert!(response.ok);
        let payload = response.payload.unwrap();
        assert_eq!(payload["decision_code"], 0);
        assert_eq!(payload["outcome"], "ADMIT");
        assert!(payload["user_msg"]
            .as_str()
            .unwrap()
            .contains(" [INFO] Job submitted by 1001."));
    }
}
