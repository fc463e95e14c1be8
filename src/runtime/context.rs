use std::io;

/// Execution-time collaborator giving runtime operations access to the
/// interpreter's output sink.
pub trait Context {
    fn output_stream(&mut self) -> &mut dyn io::Write;
}

/// Context backed by any writer: stdout in the driver, a byte buffer in
/// tests.
pub struct WriterContext<W: io::Write> {
    output: W,
}

impl<W: io::Write> WriterContext<W> {
    pub fn new(output: W) -> Self {
        WriterContext { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: io::Write> Context for WriterContext<W> {
    fn output_stream(&mut self) -> &mut dyn io::Write {
        &mut self.output
    }
}
