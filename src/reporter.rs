use std::io::Write;

use crate::ast::Pos;

pub trait Reporter {
    fn report(&mut self, pos: Pos, msg: &str);
}

// A reporter that renders runtime errors to the output
pub struct WriteReporter<W> {
    writer: W,
}

impl<W> WriteReporter<W> {
    pub fn new(writer: W) -> WriteReporter<W> {
        WriteReporter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Reporter for WriteReporter<W>
where
    W: Write,
{
    fn report(&mut self, pos: Pos, msg: &str) {
        // If the write fails, we don't care
        _ = writeln!(self.writer, "{}\n[line {}]", msg, pos.line);
    }
}

pub struct NoopReporter {}

impl Reporter for NoopReporter {
    fn report(&mut self, _pos: Pos, _msg: &str) {}
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn write_reporter_renders_line() {
        let mut reporter = WriteReporter::new(Vec::new());
        reporter.report(Pos::line(12), "Undefined variable 'x'.");
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!("Undefined variable 'x'.\n[line 12]\n", text);
    }
}
