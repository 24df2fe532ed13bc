//! Destination for `print` statements and REPL echoes.
//!
//! - `Stdout`: the default for hosts
//! - `Buffer`: captures output so tests and embedders can inspect it
//! - `Silent`: discards everything

use std::{cell::RefCell, rc::Rc};

/// A cloneable in-memory sink. Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer(Rc<RefCell<String>>);

impl SharedBuffer {
    pub fn new() -> SharedBuffer {
        SharedBuffer::default()
    }

    pub fn contents(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push_line(&self, msg: &str) {
        let mut buf = self.0.borrow_mut();
        buf.push_str(msg);
        buf.push('\n');
    }
}

#[derive(Clone, Debug, Default)]
pub enum Output {
    #[default]
    Stdout,
    Buffer(SharedBuffer),
    Silent,
}

impl Output {
    pub fn println(&self, msg: &str) {
        match self {
            Output::Stdout => println!("{msg}"),
            Output::Buffer(buffer) => buffer.push_line(msg),
            Output::Silent => {}
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn buffer_captures_lines() {
        let buffer = SharedBuffer::new();
        let output = Output::Buffer(buffer.clone());
        output.println("one");
        output.println("two");
        assert_eq!("one\ntwo\n", buffer.contents());
        assert_eq!(vec!["one", "two"], buffer.lines());

        buffer.clear();
        assert_eq!("", buffer.contents());
    }

    #[test]
    fn silent_discards() {
        Output::Silent.println("ignored");
    }
}
