use std::io::{self, Write};

/// Where a guarded run writes captured output and error messages.
///
/// Defaults to the process standard streams.
pub struct OutputSinks<'a> {
    stdout: Box<dyn Write + 'a>,
    stderr: Box<dyn Write + 'a>,
}

impl OutputSinks<'static> {
    /// The process's own stdout and stderr.
    pub fn standard() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl Default for OutputSinks<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> OutputSinks<'a> {
    pub fn new(stdout: impl Write + 'a, stderr: impl Write + 'a) -> Self {
        Self {
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
        }
    }

    pub fn stdout(&mut self) -> &mut (dyn Write + 'a) {
        &mut *self.stdout
    }

    pub fn stderr(&mut self) -> &mut (dyn Write + 'a) {
        &mut *self.stderr
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}
