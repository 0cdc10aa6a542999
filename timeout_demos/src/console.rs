use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
    time::Duration,
};

use tokio::time::Instant;

/// A line written to the console and when it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub at: Duration,
    pub text: String,
}

struct Inner {
    out: Box<dyn Write>,
    origin: Instant,
    lines: Vec<Line>,
}

/// Line-oriented output shared between an example and its callbacks.
///
/// Every line is written through to the underlying writer and also kept,
/// stamped with the time since the console was created.
#[derive(Clone)]
pub struct Console {
    inner: Rc<RefCell<Inner>>,
}

impl Console {
    pub fn new(out: impl Write + 'static) -> Self {
        Console {
            inner: Rc::new(RefCell::new(Inner {
                out: Box::new(out),
                origin: Instant::now(),
                lines: Vec::new(),
            })),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Record lines without printing them.
    pub fn capture() -> Self {
        Self::new(io::sink())
    }

    pub fn log(&self, text: impl Into<String>) -> io::Result<()> {
        let text = text.into();
        let mut inner = self.inner.borrow_mut();
        writeln!(inner.out, "{text}")?;
        inner.out.flush()?;
        let at = inner.origin.elapsed();
        inner.lines.push(Line { at, text });
        Ok(())
    }

    pub fn lines(&self) -> Vec<Line> {
        self.inner.borrow().lines.clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.inner
            .borrow()
            .lines
            .iter()
            .map(|line| line.text.clone())
            .collect()
    }
}
